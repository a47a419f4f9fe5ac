//! InMemory User Directory 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RepositoryError, UserDirectory, UserId, UserProfile};

#[derive(Debug, Default)]
struct UserTable {
    next_id: u64,
    by_name: HashMap<String, UserProfile>,
}

/// インメモリ User Directory 実装
///
/// ユーザー名（大文字小文字を区別）をキーにユーザーを保持します。
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    table: Mutex<UserTable>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed users from `(name, preferred_language)` pairs.
    pub async fn with_users<'a>(users: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let directory = Self::new();
        for (name, language) in users {
            directory.upsert(name, language).await;
        }
        directory
    }

    /// Insert a user, or update the preferred language of an existing one.
    pub async fn upsert(&self, name: &str, preferred_language: &str) -> UserProfile {
        let mut table = self.table.lock().await;
        if let Some(existing) = table.by_name.get_mut(name) {
            existing.preferred_language = preferred_language.to_string();
            return existing.clone();
        }
        table.next_id += 1;
        let profile = UserProfile {
            id: UserId(table.next_id),
            name: name.to_string(),
            preferred_language: preferred_language.to_string(),
        };
        table.by_name.insert(name.to_string(), profile.clone());
        profile
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn lookup_by_name(&self, name: &str) -> Result<Option<UserProfile>, RepositoryError> {
        let table = self.table.lock().await;
        Ok(table.by_name.get(name).cloned())
    }
}
