//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use lingo_shared::time::timestamp_to_rfc3339;

use crate::{
    domain::RoomName,
    infrastructure::dto::http::{HealthDto, MemberDetailDto, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    Json(HealthDto::ok(
        state.context.registry.connection_count(),
        state.context.metrics.snapshot(),
    ))
}

/// Get list of active rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let registry = &state.context.registry;
    let rooms = registry
        .active_room_names()
        .into_iter()
        .map(|room| RoomSummaryDto {
            members: registry
                .members_of(&room)
                .into_iter()
                .map(|member| member.display_name.into_string())
                .collect(),
            name: room.into_string(),
        })
        .collect();

    Json(rooms)
}

/// Get room detail by name
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room = RoomName::new(name).map_err(|_| StatusCode::NOT_FOUND)?;
    let registry = &state.context.registry;

    // Rooms only exist while someone is in them
    let members = registry.members_of(&room);
    if members.is_empty() {
        return Err(StatusCode::NOT_FOUND);
    }

    let members = members
        .into_iter()
        .map(|member| {
            let connected_at = registry
                .session(&member.connection_id)
                .map(|session| timestamp_to_rfc3339(session.connected_at.value()))
                .unwrap_or_default();
            MemberDetailDto {
                name: member.display_name.into_string(),
                connection_id: member.connection_id.to_string(),
                connected_at,
            }
        })
        .collect();

    Ok(Json(RoomDetailDto {
        name: room.into_string(),
        members,
    }))
}
