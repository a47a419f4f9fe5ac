//! InMemory Room Directory 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RepositoryError, RoomDirectory, RoomId, RoomName, RoomRecord};

#[derive(Debug, Default)]
struct RoomTable {
    next_id: u64,
    by_name: HashMap<RoomName, RoomRecord>,
}

/// インメモリ Room Directory 実装
///
/// メッセージの永続化先となるルームレコードを保持します。
/// ルームの「アクティブ状態」は SessionRegistry が管理し、ここには関与しません。
#[derive(Debug, Default)]
pub struct InMemoryRoomDirectory {
    table: Mutex<RoomTable>,
}

impl InMemoryRoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed room records by name.
    pub async fn with_rooms(names: impl IntoIterator<Item = RoomName>) -> Self {
        let directory = Self::new();
        for name in names {
            directory.ensure(name).await;
        }
        directory
    }

    /// Return the record for `name`, creating it if missing.
    pub async fn ensure(&self, name: RoomName) -> RoomRecord {
        let mut table = self.table.lock().await;
        if let Some(existing) = table.by_name.get(&name) {
            return existing.clone();
        }
        table.next_id += 1;
        let record = RoomRecord {
            id: RoomId(table.next_id),
            name: name.clone(),
        };
        table.by_name.insert(name, record.clone());
        record
    }
}

#[async_trait]
impl RoomDirectory for InMemoryRoomDirectory {
    async fn lookup_by_name(&self, name: &RoomName) -> Result<Option<RoomRecord>, RepositoryError> {
        let table = self.table.lock().await;
        Ok(table.by_name.get(name).cloned())
    }
}
