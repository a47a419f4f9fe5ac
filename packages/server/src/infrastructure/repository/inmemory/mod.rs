//! InMemory 実装
//!
//! 永続化層は relay の外部にあるため、ここでは開発用・テスト用に
//! HashMap / Vec をインメモリ DB として使用します。

mod activity;
mod message;
mod room;
mod user;

pub use activity::{ActivityEntry, InMemoryActivityLog};
pub use message::InMemoryMessageStore;
pub use room::InMemoryRoomDirectory;
pub use user::InMemoryUserDirectory;
