//! UseCase: 入室処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - EnterRoomUseCase::execute() メソッド
//! - 退出元ルームへの通知、本人へのウェルカム、入室先への通知、ルーム一覧の全体配信
//! - 入室者の言語に翻訳された履歴の再送（時系列順）
//!
//! ### なぜこのテストが必要か
//! - ルーム移動は「暗黙の退出 + 入室」であり、通知の宛先を誤りやすい
//! - 履歴はストアの取得順に関係なく古い順で届く必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回入室、ルーム移動、履歴再送
//! - 異常系：空の名前での入室（副作用なしで拒否）
//! - エッジケース：ルームディレクトリに無いルーム（履歴なし）

use futures_util::future::join_all;

use crate::domain::{
    ChatDelivery, ConnectionId, DisplayName, JoinOutcome, OutboundEvent, RoomName,
};

use super::{context::RelayContext, error::EnterRoomError};

/// 入室のユースケース
pub struct EnterRoomUseCase {
    context: RelayContext,
}

impl EnterRoomUseCase {
    pub fn new(context: RelayContext) -> Self {
        Self { context }
    }

    /// 入室を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 入室する接続
    /// * `name` - 表示名（未検証）
    /// * `room` - ルーム名（未検証）
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - 退出元と入室先のメンバー
    /// * `Err(EnterRoomError)` - 名前が不正。レジストリは変更されない
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        name: String,
        room: String,
    ) -> Result<JoinOutcome, EnterRoomError> {
        let name = DisplayName::new(name).map_err(EnterRoomError::InvalidDisplayName)?;
        let room = RoomName::new(room).map_err(EnterRoomError::InvalidRoomName)?;

        let outcome = self
            .context
            .registry
            .join(connection_id, name.clone(), room.clone());

        // 1. 退出元ルームへの通知
        if let Some(previous) = &outcome.previous {
            let left = OutboundEvent::notice(format!("{name} has left the room"));
            self.context
                .notify_members(&previous.members, &left, None);
            self.context.publish_user_list(&previous.room);
            self.context
                .record_activity(&name, format!("Left chatroom: {}", previous.room));
        }

        // 2. 本人へのウェルカムと入室先への通知
        self.context.notifier.send(
            &connection_id,
            OutboundEvent::notice(format!("You have joined the {room} chat room")),
        );
        let joined = OutboundEvent::notice(format!("{name} has joined the room"));
        self.context
            .notify_members(&outcome.current.members, &joined, Some(&connection_id));
        self.context.publish_user_list(&room);

        // 3. ルームの存在はグローバルな状態なので全接続へ配信
        self.context.publish_room_list();
        self.context
            .record_activity(&name, format!("Joined chatroom: {room}"));

        tracing::info!("'{}' ({}) entered room '{}'", name, connection_id, room);

        // 4. 履歴の再送（入室者のみ）
        self.replay_history(&connection_id, &name, &room).await;

        Ok(outcome)
    }

    /// Redeliver recent room history to the joiner, oldest first, each entry
    /// translated into the joiner's preferred language.
    ///
    /// Returns the number of replayed messages. Directory and store failures
    /// only mean an empty replay.
    pub async fn replay_history(
        &self,
        connection_id: &ConnectionId,
        name: &DisplayName,
        room: &RoomName,
    ) -> usize {
        let record = match self.context.rooms.lookup_by_name(room).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!("Room '{}' has no directory record, no history", room);
                return 0;
            }
            Err(e) => {
                tracing::warn!("Room directory lookup for '{}' failed: {}", room, e);
                return 0;
            }
        };

        let mut history = match self
            .context
            .messages
            .recent_by_room(record.id, self.context.settings.history_limit)
            .await
        {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!("Failed to load history for '{}': {}", room, e);
                return 0;
            }
        };
        history.sort_by_key(|message| (message.created_at, message.id));

        let target = self.context.preferred_language(name).await;
        let translations = join_all(history.iter().map(|message| {
            self.context.gateway.translate(
                message.content.as_str(),
                &target,
                Some(message.source_language.as_str()),
            )
        }))
        .await;

        let mut replayed = 0;
        for (message, translation) in history.into_iter().zip(translations) {
            let delivery = ChatDelivery {
                sender: message.sender_name,
                translation,
                sent_at: message.created_at,
                replay: true,
            };
            if self
                .context
                .notifier
                .send(connection_id, OutboundEvent::Chat(delivery))
            {
                replayed += 1;
            }
        }
        tracing::debug!("Replayed {} messages of '{}' to '{}'", replayed, room, name);
        replayed
    }
}
