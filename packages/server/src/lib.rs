//! Multilingual group-chat relay.
//!
//! Clients join named rooms over WebSocket; every message is persisted once
//! and delivered to each member translated into that member's preferred
//! language.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use error::ServerError;
pub use ui::run;
