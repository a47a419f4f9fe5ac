//! Server wiring and main loop.

use std::sync::Arc;

use axum::{
    Router,
    routing::{any, get},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    domain::{RoomName, SessionRegistry},
    error::ServerError,
    infrastructure::{
        ConnectionHub,
        repository::{
            InMemoryActivityLog, InMemoryMessageStore, InMemoryRoomDirectory,
            InMemoryUserDirectory,
        },
        translation::MyMemoryTranslator,
    },
    ui::{handler, signal::shutdown_signal, state::AppState},
    usecase::{RelayContext, RelayMetrics, TranslationGateway},
};

/// Wire every collaborator from the configuration.
///
/// Seed users and rooms populate the in-memory directories.
pub async fn build_state(config: &ServerConfig) -> Result<Arc<AppState>, ServerError> {
    let provider = MyMemoryTranslator::new(
        config.translation_endpoint.clone(),
        config.translation_timeout(),
    )?;
    tracing::info!("Translation provider: {}", provider.endpoint());

    let rooms = config
        .seed_rooms
        .iter()
        .map(|name| {
            RoomName::new(name.clone()).map_err(|e| ServerError::Seed(format!("room '{name}': {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let users = InMemoryUserDirectory::with_users(
        config
            .seed_users
            .iter()
            .map(|user| (user.name.as_str(), user.preferred_language.as_str())),
    )
    .await;
    tracing::info!(
        "Seeded {} room(s) and {} user(s)",
        rooms.len(),
        config.seed_users.len()
    );

    let hub = Arc::new(ConnectionHub::new());
    let context = RelayContext {
        registry: Arc::new(SessionRegistry::new()),
        notifier: hub.clone(),
        gateway: Arc::new(TranslationGateway::new(
            Arc::new(provider),
            config.gateway_config(),
        )),
        users: Arc::new(users),
        rooms: Arc::new(InMemoryRoomDirectory::with_rooms(rooms).await),
        messages: Arc::new(InMemoryMessageStore::new()),
        activity: Arc::new(InMemoryActivityLog::new()),
        metrics: Arc::new(RelayMetrics::default()),
        settings: config.relay_settings(),
    };

    Ok(Arc::new(AppState { context, hub }))
}

/// Build the router for the given state.
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", any(handler::websocket_handler))
        .route("/api/health", get(handler::health_check))
        .route("/api/rooms", get(handler::get_rooms))
        .route("/api/rooms/{name}", get(handler::get_room_detail))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)
}

/// Run the server until Ctrl+C or SIGTERM.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let state = build_state(&config).await?;
    let app = build_app(state);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("Listening on {}", addr);

    serve(listener, app, shutdown_signal()).await?;
    tracing::info!("Server stopped");
    Ok(())
}
