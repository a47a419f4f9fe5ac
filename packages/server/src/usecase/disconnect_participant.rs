//! UseCase: 退出・切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute()（切断）と leave_room()（退出のみ）
//!
//! ### なぜこのテストが必要か
//! - 切断は「退出 + セッション破棄」であり、残ったメンバーへの通知は入室時の退出経路と同じ
//! - 最後のメンバーが抜けたルームはルーム一覧から消える必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーが残るルームからの切断、最後のメンバーの退出
//! - エッジケース：ルーム未参加の接続の切断、未登録の接続

use crate::domain::{ConnectionId, Departure, OutboundEvent};

use super::context::RelayContext;

/// 退出・切断のユースケース
pub struct DisconnectParticipantUseCase {
    context: RelayContext,
}

impl DisconnectParticipantUseCase {
    pub fn new(context: RelayContext) -> Self {
        Self { context }
    }

    /// 切断を実行（ルームからの退出とセッションの破棄）
    ///
    /// 未登録の接続に対しては何もせず空の [`Departure`] を返す。
    pub fn execute(&self, connection_id: ConnectionId) -> Departure {
        let departure = self.context.registry.disconnect(&connection_id);
        self.announce(&departure);
        tracing::info!("Connection '{}' disconnected", connection_id);
        departure
    }

    /// ルームから退出する（接続は維持）
    pub fn leave_room(&self, connection_id: ConnectionId) -> Departure {
        let departure = self.context.registry.leave(&connection_id);
        self.announce(&departure);
        departure
    }

    fn announce(&self, departure: &Departure) {
        let (Some(name), Some(previous)) = (&departure.display_name, &departure.previous) else {
            return;
        };

        let left = OutboundEvent::notice(format!("{name} has left the room"));
        self.context.notify_members(&previous.members, &left, None);
        self.context.publish_user_list(&previous.room);
        self.context.publish_room_list();
        self.context
            .record_activity(name, format!("Left chatroom: {}", previous.room));

        tracing::info!("'{}' left room '{}'", name, previous.room);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::ConnectionIdFactory,
        usecase::test_support::{TestRelay, notice_texts, room, user_lists},
    };

    #[tokio::test]
    async fn test_disconnect_keeps_room_for_remaining_members() {
        // テスト項目: メンバーが残るルームからの切断では、ルームは一覧に残り、メンバー一覧から本人が消える
        // given (前提条件): alice と bob が Blue にいる
        let relay = TestRelay::new(&[("alice", "en")]).await;
        let alice = relay.join("alice", "Blue").await;
        let bob = relay.join("bob", "Blue").await;
        relay.notifier.clear();

        // when (操作):
        let departure = DisconnectParticipantUseCase::new(relay.context.clone()).execute(alice);

        // then (期待する結果):
        assert_eq!(departure.display_name.unwrap().as_str(), "alice");
        assert!(relay.context.registry.session(&alice).is_none());

        let bob_events = relay.notifier.events_for(&bob);
        assert_eq!(
            notice_texts(&bob_events),
            vec!["alice has left the room".to_string()]
        );
        assert_eq!(user_lists(&bob_events), vec![vec!["bob".to_string()]]);
        assert_eq!(relay.notifier.last_room_list(), Some(vec!["Blue".to_string()]));

        let entries = relay.wait_for_activity(2).await;
        assert!(
            entries
                .iter()
                .any(|e| e.description == "Left chatroom: Blue")
        );
    }

    #[tokio::test]
    async fn test_last_member_leaving_removes_room() {
        // テスト項目: 最後のメンバーが退出するとルーム一覧から消える
        // given (前提条件):
        let relay = TestRelay::new(&[]).await;
        let bob = relay.join("bob", "Blue").await;
        let carol = relay.join("carol", "Green").await;
        relay.notifier.clear();

        // when (操作):
        let departure = DisconnectParticipantUseCase::new(relay.context.clone()).leave_room(bob);

        // then (期待する結果):
        let previous = departure.previous.unwrap();
        assert_eq!(previous.room, room("Blue"));
        assert!(previous.members.is_empty());
        assert_eq!(relay.notifier.last_room_list(), Some(vec!["Green".to_string()]));
        // 接続は維持され、ルーム一覧は他の接続にも届く
        assert!(relay.context.registry.session(&bob).is_some());
        assert!(relay.context.registry.current_room(&bob).is_none());
        assert!(!relay.notifier.events_for(&carol).is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_without_room_announces_nothing() {
        // テスト項目: ルーム未参加の接続の切断では何も配信されない
        // given (前提条件):
        let relay = TestRelay::new(&[]).await;
        let alice = relay.connect();
        relay.notifier.clear();

        // when (操作):
        let departure = DisconnectParticipantUseCase::new(relay.context.clone()).execute(alice);

        // then (期待する結果):
        assert_eq!(departure.previous, None);
        assert_eq!(relay.context.registry.connection_count(), 0);
        assert!(relay.notifier.broadcasts().is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_unknown_connection_is_noop() {
        // テスト項目: 未登録の接続の切断は空の結果を返す
        // given (前提条件):
        let relay = TestRelay::new(&[]).await;

        // when (操作):
        let departure = DisconnectParticipantUseCase::new(relay.context.clone())
            .execute(ConnectionIdFactory::generate());

        // then (期待する結果):
        assert_eq!(departure, Departure::default());
    }
}
