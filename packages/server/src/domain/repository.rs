//! Ports for the external collaborators the relay consumes.
//!
//! The relay never owns user, room or message records; it reaches them only
//! through these traits. Implementations live in the infrastructure layer
//! (dependency inversion), and tests substitute fakes or mocks.

use async_trait::async_trait;

use super::{
    entity::{NewMessage, RoomRecord, StoredMessage, UserProfile},
    error::RepositoryError,
    value_object::{MessageId, RoomId, RoomName, UserId},
};

/// User directory: resolves a display name to a user record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// `Ok(None)` when no user has this name.
    async fn lookup_by_name(&self, name: &str) -> Result<Option<UserProfile>, RepositoryError>;
}

/// Room directory: resolves a room name to the persistence target for messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    async fn lookup_by_name(&self, name: &RoomName) -> Result<Option<RoomRecord>, RepositoryError>;
}

/// Durable message history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn append(&self, message: NewMessage) -> Result<MessageId, RepositoryError>;

    /// The `limit` most recent messages of a room. Ordering is up to the store.
    async fn recent_by_room(
        &self,
        room_id: RoomId,
        limit: usize,
    ) -> Result<Vec<StoredMessage>, RepositoryError>;
}

/// Audit trail of user actions. Callers treat it as fire-and-forget.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityLog: Send + Sync {
    async fn record(&self, user_id: UserId, description: String) -> Result<(), RepositoryError>;
}
