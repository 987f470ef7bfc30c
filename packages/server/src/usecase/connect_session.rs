//! UseCase: 接続の受け付け
//!
//! 新しい WebSocket 接続にセッション ID を割り当て、MessagePusher に登録する。
//! この時点ではどのルームにも属さない（Unbound）。

use std::sync::Arc;

use crate::domain::{MessagePusher, PusherChannel, SessionId};

/// 接続受け付けのユースケース
pub struct ConnectSessionUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectSessionUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を登録し、割り当てたセッション ID を返す
    pub async fn execute(&self, sender: PusherChannel) -> SessionId {
        let session = SessionId::generate();
        self.message_pusher
            .register_session(session.clone(), sender)
            .await;
        tracing::info!("Session '{}' opened", session);
        session
    }
}
