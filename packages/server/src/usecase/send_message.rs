//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 永続化（1 回のみ）→ メンバーごとの翻訳 → 個別配信、の順序
//!
//! ### なぜこのテストが必要か
//! - 1 つのメッセージが N 人分の独立した翻訳済みメッセージに展開される
//! - 翻訳失敗や永続化失敗があっても配信は止まらない
//!
//! ### どのような状況を想定しているか
//! - 正常系：異なる言語のメンバーへの翻訳配信、送信者へのエコー
//! - 異常系：翻訳プロバイダーの障害、メッセージストアの障害
//! - エッジケース：ルーム未参加の送信者（黙って無視）、ユーザーディレクトリに無いメンバー

use futures_util::future::join_all;

use crate::domain::{
    ChatDelivery, ChatMessage, ConnectionId, MessageContent, MessageId, NewMessage,
    OutboundEvent, Timestamp, UserProfile, detect_language,
};

use super::{context::RelayContext, error::SendMessageError};

/// Result of a successful post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOutcome {
    /// `None` when persistence failed or was impossible
    pub message_id: Option<MessageId>,
    /// Number of members the message was handed to
    pub delivered: usize,
    /// Number of deliveries that fell back to the original text
    pub untranslated: usize,
}

/// メッセージ送信のユースケース
///
/// 送信者本人もルームのメンバーとして配信対象に含まれる。
/// 送信者の言語は本人の希望言語と同じなので、エコーは翻訳されない。
pub struct SendMessageUseCase {
    context: RelayContext,
}

impl SendMessageUseCase {
    pub fn new(context: RelayContext) -> Self {
        Self { context }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(PostOutcome))` - 配信済み
    /// * `Ok(None)` - 送信者がどのルームにもいない（クライアント側の競合なので無視）
    /// * `Err(SendMessageError)` - メッセージ内容が不正
    pub async fn execute(
        &self,
        sender_id: ConnectionId,
        text: String,
    ) -> Result<Option<PostOutcome>, SendMessageError> {
        let Some((sender, room)) = self.context.registry.current_room(&sender_id) else {
            tracing::debug!("Dropping message from '{}' with no room", sender_id);
            return Ok(None);
        };
        let content = MessageContent::new(text).map_err(SendMessageError::InvalidContent)?;

        // 1. 配信対象はこの時点のスナップショットで確定する
        let recipients = self.context.registry.members_of(&room);

        let profile = self.context.find_user(&sender).await;
        let source_language = match &profile {
            Some(profile) => self
                .context
                .gateway
                .resolve_language_code(&profile.preferred_language),
            None => detect_language(content.as_str()),
        };
        let message = ChatMessage {
            sender,
            content,
            source_language,
            room,
            created_at: Timestamp::now(),
        };

        // 2. 永続化は配信より先に完了させる（失敗しても配信は行う）
        let message_id = self.persist(&message, profile.as_ref()).await;
        if profile.is_some() {
            self.context.record_activity(
                &message.sender,
                format!("Sent a message in chatroom: {}", message.room),
            );
        }

        // 3. メンバーごとに翻訳して個別に配信
        let context = &self.context;
        let text = message.content.as_str();
        let source = message.source_language.as_str();
        let translations = join_all(recipients.iter().map(|member| async move {
            let target = context.preferred_language(&member.display_name).await;
            context.gateway.translate(text, &target, Some(source)).await
        }))
        .await;

        let mut delivered = 0;
        let mut untranslated = 0;
        for (member, translation) in recipients.iter().zip(translations) {
            if translation.is_untranslated() {
                untranslated += 1;
            }
            let delivery = ChatDelivery {
                sender: message.sender.clone(),
                translation,
                sent_at: message.created_at,
                replay: false,
            };
            if self
                .context
                .notifier
                .send(&member.connection_id, OutboundEvent::Chat(delivery))
            {
                delivered += 1;
            } else {
                tracing::warn!(
                    "Failed to deliver message to '{}' ({})",
                    member.display_name,
                    member.connection_id
                );
            }
        }

        self.context.metrics.record_relayed();
        self.context.metrics.record_untranslated(untranslated as u64);
        tracing::info!(
            "Relayed message from '{}' in '{}' to {} member(s), {} untranslated",
            message.sender,
            message.room,
            delivered,
            untranslated
        );

        Ok(Some(PostOutcome {
            message_id,
            delivered,
            untranslated,
        }))
    }

    /// Append the message to the store exactly once.
    ///
    /// Failures are logged and counted, never returned: live delivery takes
    /// priority over durability.
    async fn persist(
        &self,
        message: &ChatMessage,
        sender: Option<&UserProfile>,
    ) -> Option<MessageId> {
        let Some(sender) = sender else {
            tracing::error!(
                "Message from '{}' not persisted: sender is not in the user directory",
                message.sender
            );
            self.context.metrics.record_persistence_failure();
            return None;
        };

        let room = match self.context.rooms.lookup_by_name(&message.room).await {
            Ok(Some(room)) => room,
            Ok(None) => {
                tracing::error!(
                    "Message from '{}' not persisted: room '{}' is not in the room directory",
                    message.sender,
                    message.room
                );
                self.context.metrics.record_persistence_failure();
                return None;
            }
            Err(e) => {
                tracing::error!("Room directory lookup for '{}' failed: {}", message.room, e);
                self.context.metrics.record_persistence_failure();
                return None;
            }
        };

        let new_message = NewMessage {
            room_id: room.id,
            user_id: sender.id,
            sender_name: message.sender.clone(),
            content: message.content.clone(),
            source_language: message.source_language.clone(),
            created_at: message.created_at,
        };
        match self.context.messages.append(new_message).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::error!(
                    "Failed to persist message from '{}' in '{}': {}",
                    message.sender,
                    message.room,
                    e
                );
                self.context.metrics.record_persistence_failure();
                None
            }
        }
    }
}
