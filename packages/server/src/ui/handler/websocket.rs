//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, OutboundEvent, Timestamp},
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, EnterRoomUseCase,
        NotifyActivityUseCase, SendMessageUseCase,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection_id = ConnectionIdFactory::generate();
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    // The outbound channel must exist before the welcome notice is queued
    let mut rx = state.hub.register(connection_id);

    let connect_usecase = ConnectParticipantUseCase::new(state.context.clone());
    if let Err(e) = connect_usecase
        .execute(connection_id, Timestamp::now())
        .await
    {
        tracing::warn!("Rejecting connection: {}", e);
        state.hub.unregister(&connection_id);
        return;
    }

    let (mut sender, mut receiver) = socket.split();
    let state_clone = state.clone();

    // Spawn a task to receive frames from this client, one at a time
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", connection_id, text);
                    match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(message) => dispatch(&state_clone, connection_id, message).await,
                        Err(e) => {
                            tracing::warn!(
                                "Ignoring undecodable frame from '{}': {}",
                                connection_id,
                                e
                            );
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward queued events to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.hub.unregister(&connection_id);
    DisconnectParticipantUseCase::new(state.context.clone()).execute(connection_id);
}

/// Route one decoded client frame to its use case.
async fn dispatch(state: &AppState, connection_id: ConnectionId, message: ClientMessage) {
    let context = state.context.clone();
    match message {
        ClientMessage::EnterRoom { name, room } => {
            if let Err(e) = EnterRoomUseCase::new(context)
                .execute(connection_id, name, room)
                .await
            {
                tracing::warn!("Rejected room entry from '{}': {}", connection_id, e);
                reject(state, connection_id, e.to_string());
            }
        }
        ClientMessage::Message { text } => {
            match SendMessageUseCase::new(context)
                .execute(connection_id, text)
                .await
            {
                Ok(Some(_)) => {}
                Ok(None) => {
                    tracing::debug!("'{}' posted without a room, dropped", connection_id);
                }
                Err(e) => {
                    tracing::warn!("Rejected message from '{}': {}", connection_id, e);
                    reject(state, connection_id, e.to_string());
                }
            }
        }
        ClientMessage::Activity {} => {
            NotifyActivityUseCase::new(context).execute(connection_id);
        }
        ClientMessage::LeaveRoom {} => {
            DisconnectParticipantUseCase::new(context).leave_room(connection_id);
        }
    }
}

fn reject(state: &AppState, connection_id: ConnectionId, reason: String) {
    state
        .context
        .notifier
        .send(&connection_id, OutboundEvent::Rejected { reason });
}
