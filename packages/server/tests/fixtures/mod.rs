//! Test fixtures: an in-process server and a JSON WebSocket client.
//!
//! The translation endpoint points at a closed local port, so every
//! cross-language delivery exercises the untranslated fallback.

#![allow(dead_code)]

use std::time::Duration;

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use lingo_server::{
    ServerConfig,
    ui::{build_app, build_state, serve},
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::oneshot};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const FRAME_TIMEOUT: Duration = Duration::from_secs(5);

/// A server running on a background task, stopped on drop.
pub struct TestServer {
    port: u16,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Start a server on `127.0.0.1:<port>` with users alice (en) and bob (zh).
    pub async fn start(port: u16) -> Self {
        let port_arg = port.to_string();
        let config = ServerConfig::try_parse_from([
            "lingo-server",
            "--host",
            "127.0.0.1",
            "--port",
            port_arg.as_str(),
            "--translation-endpoint",
            "http://127.0.0.1:9/get",
            "--translation-timeout-ms",
            "500",
            "--seed-user",
            "alice=en",
            "--seed-user",
            "bob=Chinese",
        ])
        .expect("Failed to parse test config");

        let state = build_state(&config).await.expect("Failed to build state");
        let app = build_app(state);
        let listener = TcpListener::bind(config.addr())
            .await
            .expect("Failed to bind test port");

        let (tx, rx) = oneshot::channel();
        tokio::spawn(serve(listener, app, async move {
            let _ = rx.await;
        }));

        Self {
            port,
            shutdown: Some(tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }

    pub async fn connect(&self) -> TestClient {
        let (stream, _) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        TestClient { stream }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// WebSocket client speaking JSON frames.
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
}

impl TestClient {
    pub async fn send_json(&mut self, value: Value) {
        self.stream
            .send(Message::text(value.to_string()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn enter_room(&mut self, name: &str, room: &str) {
        self.send_json(serde_json::json!({"type": "enter-room", "name": name, "room": room}))
            .await;
    }

    pub async fn say(&mut self, text: &str) {
        self.send_json(serde_json::json!({"type": "message", "text": text}))
            .await;
    }

    /// Next JSON frame, or `None` after the timeout.
    pub async fn next_frame(&mut self) -> Option<Value> {
        loop {
            let msg = tokio::time::timeout(FRAME_TIMEOUT, self.stream.next())
                .await
                .ok()??
                .ok()?;
            if let Message::Text(text) = msg {
                return serde_json::from_str(text.as_str()).ok();
            }
        }
    }

    /// Skip frames until one of the given type arrives.
    pub async fn expect_type(&mut self, frame_type: &str) -> Value {
        while let Some(frame) = self.next_frame().await {
            if frame["type"] == frame_type {
                return frame;
            }
        }
        panic!("No '{frame_type}' frame received");
    }

    /// Skip frames until a notice with the given text arrives.
    pub async fn expect_notice(&mut self, text: &str) -> Value {
        loop {
            let frame = self.expect_type("notice").await;
            if frame["text"] == text {
                return frame;
            }
        }
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
