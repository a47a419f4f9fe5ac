//! InMemory Activity Log 実装

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ActivityLog, RepositoryError, Timestamp, UserId};

/// One audit entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub user_id: UserId,
    pub description: String,
    pub recorded_at: Timestamp,
}

/// インメモリ Activity Log 実装
#[derive(Debug, Default)]
pub struct InMemoryActivityLog {
    entries: Mutex<Vec<ActivityEntry>>,
}

impl InMemoryActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<ActivityEntry> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl ActivityLog for InMemoryActivityLog {
    async fn record(&self, user_id: UserId, description: String) -> Result<(), RepositoryError> {
        tracing::debug!("activity user={} {}", user_id.0, description);
        self.entries.lock().await.push(ActivityEntry {
            user_id,
            description,
            recorded_at: Timestamp::now(),
        });
        Ok(())
    }
}
