//! UseCase: 入力中通知

use crate::domain::{ConnectionId, OutboundEvent};

use super::context::RelayContext;

/// 入力中通知のユースケース
///
/// 同じルームの他のメンバーにだけ届け、永続化はしない。
pub struct NotifyActivityUseCase {
    context: RelayContext,
}

impl NotifyActivityUseCase {
    pub fn new(context: RelayContext) -> Self {
        Self { context }
    }

    /// 入力中通知を実行し、届いたメンバー数を返す
    ///
    /// ルーム未参加の接続からの通知は無視する。
    pub fn execute(&self, connection_id: ConnectionId) -> usize {
        let Some((name, room)) = self.context.registry.current_room(&connection_id) else {
            return 0;
        };
        let members = self.context.registry.members_of(&room);
        self.context.notify_members(
            &members,
            &OutboundEvent::Activity { name },
            Some(&connection_id),
        )
    }
}
