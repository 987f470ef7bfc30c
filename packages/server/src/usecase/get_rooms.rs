//! UseCase: ルーム一覧の取得

use crate::domain::RoomSummary;

use super::SharedOrchestrator;

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    orchestrator: SharedOrchestrator,
}

impl GetRoomsUseCase {
    pub fn new(orchestrator: SharedOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// 参加者のいるルームを名前順で返す
    pub async fn execute(&self) -> Vec<RoomSummary> {
        self.orchestrator.lock().await.room_summaries()
    }
}
