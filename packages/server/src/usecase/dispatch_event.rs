//! UseCase: セッションイベントの処理と配信
//!
//! ## 処理の流れ
//!
//! 1. 共有 Orchestrator のロックを取得
//! 2. イベントを適用し Outbound の列を得る（ストアの変更はここで全て確定）
//! 3. ロックを保持したまま MessagePusher で購読変更・配信を順に行う
//!
//! 全クライアントはストアの変更順と同じ順序で通知を受け取る。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{MessagePusher, Outbound, SessionEvent, SessionId, Timestamp};

use super::SharedOrchestrator;

/// セッションイベント処理のユースケース
pub struct DispatchEventUseCase {
    /// Orchestrator（ユーザー・プレゼンス・履歴の単一ロック）
    orchestrator: SharedOrchestrator,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// Clock（メッセージのタイムスタンプ）
    clock: Arc<dyn Clock>,
}

impl DispatchEventUseCase {
    pub fn new(
        orchestrator: SharedOrchestrator,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            orchestrator,
            message_pusher,
            clock,
        }
    }

    /// イベントを処理する
    ///
    /// # Returns
    ///
    /// 実行した Outbound の数（0 は何もしなかったことを意味する）
    pub async fn execute(&self, session: &SessionId, event: SessionEvent) -> usize {
        let event_name = event.name();
        let mut orchestrator = self.orchestrator.lock().await;
        let now = Timestamp::new(self.clock.now());
        let outbound = orchestrator.handle(session, event, now);

        if outbound.is_empty() {
            tracing::debug!("Event '{}' from '{}' was a no-op", event_name, session);
            return 0;
        }

        let count = outbound.len();
        for step in outbound {
            self.apply(step).await;
        }
        tracing::debug!(
            "Event '{}' from '{}' produced {} outbound steps",
            event_name,
            session,
            count
        );
        count
    }

    async fn apply(&self, step: Outbound) {
        match step {
            Outbound::Subscribe { session, room } => {
                self.message_pusher.subscribe(&session, &room).await;
            }
            Outbound::Unsubscribe { session, room } => {
                self.message_pusher.unsubscribe(&session, &room).await;
            }
            Outbound::Deliver {
                scope,
                notification,
            } => {
                if let Err(e) = self.message_pusher.deliver(&scope, &notification).await {
                    tracing::warn!("Failed to deliver to {:?}: {}", scope, e);
                }
            }
        }
    }
}
