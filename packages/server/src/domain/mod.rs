//! Domain layer for the chat relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod language;
pub mod registry;
pub mod repository;
pub mod translation;
pub mod value_object;

pub use entity::{
    ChatMessage, Member, NewMessage, RoomRecord, Session, SessionState, StoredMessage, UserProfile,
};
pub use error::{RepositoryError, TranslationError, ValueObjectError};
pub use event::{ChatDelivery, Notifier, OutboundEvent, SYSTEM_SENDER};
pub use factory::ConnectionIdFactory;
pub use language::{FALLBACK_LANGUAGE, detect_language, resolve_language_code};
pub use registry::{Departure, JoinOutcome, RoomSnapshot, SessionRegistry};
pub use repository::{ActivityLog, MessageStore, RoomDirectory, UserDirectory};
pub use translation::{Translation, TranslationProvider, TranslationStatus};
pub use value_object::{
    ConnectionId, DisplayName, LanguageCode, MessageContent, MessageId, RoomId, RoomName,
    Timestamp, UserId,
};
