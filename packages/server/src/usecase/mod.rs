//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod connect_participant;
pub mod context;
pub mod disconnect_participant;
pub mod enter_room;
pub mod error;
pub mod notify_activity;
pub mod send_message;
pub mod translation_gateway;

#[cfg(test)]
mod test_support;

pub use connect_participant::{ConnectParticipantUseCase, WELCOME_NOTICE};
pub use context::{MetricsSnapshot, RelayContext, RelayMetrics, RelaySettings};
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use enter_room::EnterRoomUseCase;
pub use error::{ConnectError, EnterRoomError, SendMessageError};
pub use notify_activity::NotifyActivityUseCase;
pub use send_message::{PostOutcome, SendMessageUseCase};
pub use translation_gateway::{GatewayConfig, TranslationGateway};
