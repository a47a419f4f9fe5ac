//! Core domain models for the chat relay.

use serde::{Deserialize, Serialize};

use super::value_object::{
    ConnectionId, DisplayName, LanguageCode, MessageContent, MessageId, RoomId, RoomName,
    Timestamp, UserId,
};

/// Live binding between one connection and a display name/room.
///
/// Created on connect with no name and no room; both are set by the first
/// successful room entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: ConnectionId,
    pub display_name: Option<DisplayName>,
    pub room: Option<RoomName>,
    pub connected_at: Timestamp,
}

impl Session {
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            display_name: None,
            room: None,
            connected_at,
        }
    }

    pub fn state(&self) -> SessionState<'_> {
        match &self.room {
            Some(room) => SessionState::InRoom(room),
            None => SessionState::Connected,
        }
    }
}

/// Connection lifecycle as seen by the registry. A missing session is `Disconnected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState<'a> {
    Connected,
    InRoom(&'a RoomName),
}

/// A room member as reported by membership snapshots.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Member {
    pub display_name: DisplayName,
    pub connection_id: ConnectionId,
}

impl Member {
    pub fn new(connection_id: ConnectionId, display_name: DisplayName) -> Self {
        Self {
            display_name,
            connection_id,
        }
    }
}

/// A chat message posted to a room. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: DisplayName,
    pub content: MessageContent,
    pub source_language: LanguageCode,
    pub room: RoomName,
    pub created_at: Timestamp,
}

/// User record as exposed by the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    /// Either a short code (`zh`) or a language name (`Chinese`)
    pub preferred_language: String,
}

/// Room record as exposed by the room directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub id: RoomId,
    pub name: RoomName,
}

/// Message to be appended to the message store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub sender_name: DisplayName,
    pub content: MessageContent,
    pub source_language: LanguageCode,
    pub created_at: Timestamp,
}

/// Message as read back from the message store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub id: MessageId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub sender_name: DisplayName,
    pub content: MessageContent,
    pub source_language: LanguageCode,
    pub created_at: Timestamp,
}

impl StoredMessage {
    pub fn from_new(id: MessageId, message: NewMessage) -> Self {
        Self {
            id,
            room_id: message.room_id,
            user_id: message.user_id,
            sender_name: message.sender_name,
            content: message.content,
            source_language: message.source_language,
            created_at: message.created_at,
        }
    }
}
