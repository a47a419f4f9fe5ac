//! WebSocket message DTOs for the chat relay.
//!
//! Every frame is a JSON object tagged by `type` (kebab-case).

use lingo_shared::time::format_local_clock_time;
use serde::{Deserialize, Serialize};

use crate::domain::{ChatDelivery, OutboundEvent, SYSTEM_SENDER, TranslationStatus};

/// Message type enum for server → client frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    Notice,
    Chat,
    UserList,
    RoomList,
    Activity,
    Rejected,
}

/// Welcome or system notice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticeMessage {
    pub r#type: MessageType,
    pub name: String,
    pub text: String,
    /// Wall-clock time such as `3:04:05 PM`
    pub time: String,
}

/// A chat message translated for the receiving client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub r#type: MessageType,
    pub name: String,
    pub text: String,
    pub time: String,
    /// The translation failed and `text` is the original
    pub untranslated: bool,
    /// Language of the original text, omitted when no translation was needed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
    /// Redelivered from history on room entry
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub history: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListMessage {
    pub r#type: MessageType,
    pub room: String,
    pub users: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomListMessage {
    pub r#type: MessageType,
    pub rooms: Vec<String>,
}

/// Typing indicator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityMessage {
    pub r#type: MessageType,
    pub name: String,
}

/// A client request was refused
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedMessage {
    pub r#type: MessageType,
    pub reason: String,
}

/// Client → server frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    EnterRoom { name: String, room: String },
    Message { text: String },
    Activity {},
    LeaveRoom {},
}

impl From<&ChatDelivery> for ChatMessage {
    fn from(delivery: &ChatDelivery) -> Self {
        let translation = &delivery.translation;
        let original_language = match translation.status {
            TranslationStatus::SameLanguage => None,
            TranslationStatus::Translated | TranslationStatus::Failed => {
                Some(translation.source.to_string())
            }
        };
        Self {
            r#type: MessageType::Chat,
            name: delivery.sender.as_str().to_string(),
            text: translation.text.clone(),
            time: format_local_clock_time(delivery.sent_at.value()),
            untranslated: translation.is_untranslated(),
            original_language,
            history: delivery.replay,
        }
    }
}

/// Serialize an outbound event into a text frame.
pub fn encode_event(event: &OutboundEvent) -> Result<String, serde_json::Error> {
    match event {
        OutboundEvent::Notice { text, at } => serde_json::to_string(&NoticeMessage {
            r#type: MessageType::Notice,
            name: SYSTEM_SENDER.to_string(),
            text: text.clone(),
            time: format_local_clock_time(at.value()),
        }),
        OutboundEvent::Chat(delivery) => serde_json::to_string(&ChatMessage::from(delivery)),
        OutboundEvent::UserList { room, users } => serde_json::to_string(&UserListMessage {
            r#type: MessageType::UserList,
            room: room.as_str().to_string(),
            users: users.iter().map(|name| name.as_str().to_string()).collect(),
        }),
        OutboundEvent::RoomList { rooms } => serde_json::to_string(&RoomListMessage {
            r#type: MessageType::RoomList,
            rooms: rooms.iter().map(|room| room.as_str().to_string()).collect(),
        }),
        OutboundEvent::Activity { name } => serde_json::to_string(&ActivityMessage {
            r#type: MessageType::Activity,
            name: name.as_str().to_string(),
        }),
        OutboundEvent::Rejected { reason } => serde_json::to_string(&RejectedMessage {
            r#type: MessageType::Rejected,
            reason: reason.clone(),
        }),
    }
}
