//! InMemory Message Store 実装

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessageId, MessageStore, NewMessage, RepositoryError, RoomId, StoredMessage};

/// Default number of messages kept per room
pub const DEFAULT_MESSAGE_CAPACITY: usize = 100;

#[derive(Debug, Default)]
struct MessageTable {
    next_id: u64,
    by_room: HashMap<RoomId, VecDeque<StoredMessage>>,
}

/// インメモリ Message Store 実装
///
/// ルームごとに直近 `capacity` 件を保持し、古いものから捨てます。
/// `recent_by_room` は DB の `ORDER BY created_at DESC LIMIT n` と同様に
/// 新しい順で返します（時系列への並べ替えは呼び出し側の責務）。
#[derive(Debug)]
pub struct InMemoryMessageStore {
    table: Mutex<MessageTable>,
    capacity: usize,
}

impl Default for InMemoryMessageStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MESSAGE_CAPACITY)
    }
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: Mutex::new(MessageTable::default()),
            capacity,
        }
    }

    /// Total number of stored messages across all rooms.
    pub async fn len(&self) -> usize {
        let table = self.table.lock().await;
        table.by_room.values().map(VecDeque::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, message: NewMessage) -> Result<MessageId, RepositoryError> {
        if self.capacity == 0 {
            return Err(RepositoryError::Storage(
                "message store has zero capacity".to_string(),
            ));
        }
        let mut table = self.table.lock().await;
        table.next_id += 1;
        let id = MessageId(table.next_id);
        let room = table.by_room.entry(message.room_id).or_default();
        if room.len() >= self.capacity {
            room.pop_front();
        }
        room.push_back(StoredMessage::from_new(id, message));
        Ok(id)
    }

    async fn recent_by_room(
        &self,
        room_id: RoomId,
        limit: usize,
    ) -> Result<Vec<StoredMessage>, RepositoryError> {
        let table = self.table.lock().await;
        Ok(table
            .by_room
            .get(&room_id)
            .map(|messages| messages.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
