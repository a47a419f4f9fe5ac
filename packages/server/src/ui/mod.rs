//! UI 層
//!
//! axum のルーター、WebSocket / HTTP ハンドラー、グレースフルシャットダウン。

mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{build_app, build_state, run, serve};
pub use signal::shutdown_signal;
