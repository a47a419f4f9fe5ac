//! UseCase: 参加者接続処理
//!
//! 接続直後のセッションをレジストリに登録し、ウェルカム通知と
//! 現在アクティブなルーム一覧を本人に送る。

use crate::domain::{ConnectionId, OutboundEvent, Timestamp};

use super::{context::RelayContext, error::ConnectError};

/// Notice sent to every new connection
pub const WELCOME_NOTICE: &str = "Welcome to Chat App!";

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    context: RelayContext,
}

impl ConnectParticipantUseCase {
    pub fn new(context: RelayContext) -> Self {
        Self { context }
    }

    /// 参加者接続を実行
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 接続成功（Connected 状態、ルーム未参加）
    /// * `Err(ConnectError)` - 同じ接続 ID が登録済み
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        connected_at: Timestamp,
    ) -> Result<(), ConnectError> {
        if !self.context.registry.connect(connection_id, connected_at) {
            return Err(ConnectError::DuplicateConnection(connection_id.to_string()));
        }

        self.context
            .notifier
            .send(&connection_id, OutboundEvent::notice(WELCOME_NOTICE));
        // 全体配信と順序が入れ替わらないよう、一覧は配信の順番待ちの中で読む
        self.context.registry.publish_active_rooms(|rooms| {
            self.context.notifier.send(
                &connection_id,
                OutboundEvent::RoomList {
                    rooms: rooms.into_iter().collect(),
                },
            )
        });

        tracing::info!("Connection '{}' registered", connection_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionIdFactory, SessionState},
        usecase::test_support::{TestRelay, notice_texts},
    };

    #[tokio::test]
    async fn test_connect_sends_welcome_and_room_list() {
        // テスト項目: 接続すると本人にウェルカム通知とルーム一覧が届く
        // given (前提条件):
        let relay = TestRelay::new(&[]).await;
        let usecase = ConnectParticipantUseCase::new(relay.context.clone());
        let id = ConnectionIdFactory::generate();

        // when (操作):
        let result = usecase.execute(id, Timestamp::new(1000)).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let session = relay.context.registry.session(&id).unwrap();
        assert_eq!(session.state(), SessionState::Connected);
        let events = relay.notifier.events_for(&id);
        assert_eq!(notice_texts(&events), vec![WELCOME_NOTICE.to_string()]);
        assert!(matches!(events[1], OutboundEvent::RoomList { ref rooms } if rooms.is_empty()));
    }

    #[tokio::test]
    async fn test_connect_duplicate_error() {
        // テスト項目: 同じ接続 ID での二重接続はエラーになる
        // given (前提条件):
        let relay = TestRelay::new(&[]).await;
        let usecase = ConnectParticipantUseCase::new(relay.context.clone());
        let id = ConnectionIdFactory::generate();
        usecase.execute(id, Timestamp::new(1000)).await.unwrap();

        // when (操作):
        let result = usecase.execute(id, Timestamp::new(2000)).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConnectError::DuplicateConnection(id.to_string()))
        );
        assert_eq!(relay.context.registry.connection_count(), 1);
    }
}
