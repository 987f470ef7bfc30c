//! UseCase: 接続の終了
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::execute() メソッド
//! - 接続終了時に disconnect イベントが処理され、MessagePusher から登録解除されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルームに参加中のセッションの切断（残りの参加者に通知）
//! - エッジケース：一度も join していないセッションの切断（何もしない）

use std::sync::Arc;

use crate::domain::{MessagePusher, SessionEvent, SessionId};

use super::DispatchEventUseCase;

/// 接続終了のユースケース
pub struct DisconnectSessionUseCase {
    /// DispatchEventUseCase（disconnect イベントの処理）
    dispatch_event_usecase: Arc<DispatchEventUseCase>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectSessionUseCase {
    pub fn new(
        dispatch_event_usecase: Arc<DispatchEventUseCase>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            dispatch_event_usecase,
            message_pusher,
        }
    }

    /// 接続終了を実行
    ///
    /// 先に送信チャンネルを外してから disconnect を処理するため、
    /// 閉じた接続自身には通知を送らない。
    pub async fn execute(&self, session: &SessionId) {
        self.message_pusher.unregister_session(session).await;
        let steps = self
            .dispatch_event_usecase
            .execute(session, SessionEvent::Disconnect)
            .await;
        tracing::info!("Session '{}' closed ({} outbound steps)", session, steps);
    }
}
