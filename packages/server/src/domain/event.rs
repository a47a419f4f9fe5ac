//! Outbound events and the port used to deliver them to connections.

use super::{
    translation::Translation,
    value_object::{ConnectionId, DisplayName, RoomName, Timestamp},
};

/// Sender name used for system notices.
pub const SYSTEM_SENDER: &str = "Admin";

/// A chat message rendered for one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatDelivery {
    pub sender: DisplayName,
    pub translation: Translation,
    pub sent_at: Timestamp,
    /// Replayed from history on room entry rather than posted live
    pub replay: bool,
}

/// Event pushed to a connected client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// Welcome or system notice
    Notice { text: String, at: Timestamp },
    Chat(ChatDelivery),
    /// Full member list of a room
    UserList {
        room: RoomName,
        users: Vec<DisplayName>,
    },
    /// Currently active rooms
    RoomList { rooms: Vec<RoomName> },
    /// Someone is typing
    Activity { name: DisplayName },
    /// A client request was refused with no other side effects
    Rejected { reason: String },
}

impl OutboundEvent {
    pub fn notice(text: impl Into<String>) -> Self {
        Self::Notice {
            text: text.into(),
            at: Timestamp::now(),
        }
    }
}

/// Delivers outbound events to live connections.
///
/// Delivery is a non-blocking hand-off to the connection's outbound queue.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Returns `false` if the connection is gone.
    fn send(&self, to: &ConnectionId, event: OutboundEvent) -> bool;

    /// Send to every live connection.
    fn broadcast(&self, event: OutboundEvent);
}
