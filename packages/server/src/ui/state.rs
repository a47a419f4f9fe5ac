//! Server state shared by every handler.

use std::sync::Arc;

use crate::{infrastructure::ConnectionHub, usecase::RelayContext};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// UseCase 層の依存関係一式
    pub context: RelayContext,
    /// WebSocket sender channels (the same hub is the context's notifier)
    pub hub: Arc<ConnectionHub>,
}
