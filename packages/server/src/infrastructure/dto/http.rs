//! HTTP API response DTOs for the chat relay.

use serde::{Deserialize, Serialize};

use crate::usecase::MetricsSnapshot;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub connections: usize,
    pub persistence_failures: u64,
    pub messages_relayed: u64,
    pub untranslated_deliveries: u64,
}

impl HealthDto {
    pub fn ok(connections: usize, metrics: MetricsSnapshot) -> Self {
        Self {
            status: "ok".to_string(),
            connections,
            persistence_failures: metrics.persistence_failures,
            messages_relayed: metrics.messages_relayed,
            untranslated_deliveries: metrics.untranslated_deliveries,
        }
    }
}

/// Room summary for list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub members: Vec<String>,
}

/// Room detail for detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub name: String,
    pub members: Vec<MemberDetailDto>,
}

/// Member detail for room detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDetailDto {
    pub name: String,
    pub connection_id: String,
    pub connected_at: String, // RFC 3339
}
