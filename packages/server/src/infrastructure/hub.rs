//! Per-connection outbound channels.
//!
//! Each WebSocket task owns the receiving half of an unbounded channel; the hub
//! keeps the sending halves so use cases can push frames without touching
//! sockets.

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use tokio::sync::mpsc;

use crate::domain::{ConnectionId, Notifier, OutboundEvent};

use super::dto::websocket::encode_event;

/// Client connection information
pub struct ClientInfo {
    /// Message sender channel
    pub sender: mpsc::UnboundedSender<String>,
}

/// Registry of outbound channels keyed by connection.
#[derive(Default)]
pub struct ConnectionHub {
    clients: RwLock<HashMap<ConnectionId, ClientInfo>>,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection and return the receiver its socket task drains.
    pub fn register(&self, id: ConnectionId) -> mpsc::UnboundedReceiver<String> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.clients
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, ClientInfo { sender });
        receiver
    }

    pub fn unregister(&self, id: &ConnectionId) -> bool {
        self.clients
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some()
    }

    pub fn count(&self) -> usize {
        self.clients
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn encode(event: &OutboundEvent) -> Option<String> {
        match encode_event(event) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::error!("Failed to encode outbound event: {}", e);
                None
            }
        }
    }
}

impl Notifier for ConnectionHub {
    fn send(&self, to: &ConnectionId, event: OutboundEvent) -> bool {
        let Some(json) = Self::encode(&event) else {
            return false;
        };
        let clients = self.clients.read().unwrap_or_else(PoisonError::into_inner);
        match clients.get(to) {
            Some(client) => client.sender.send(json).is_ok(),
            None => false,
        }
    }

    fn broadcast(&self, event: OutboundEvent) {
        let Some(json) = Self::encode(&event) else {
            return;
        };
        let clients = self.clients.read().unwrap_or_else(PoisonError::into_inner);
        for (id, client) in clients.iter() {
            if client.sender.send(json.clone()).is_err() {
                tracing::warn!("Failed to broadcast to client '{}'", id);
            }
        }
    }
}
