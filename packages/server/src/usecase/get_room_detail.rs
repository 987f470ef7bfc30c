//! UseCase: ルーム詳細の取得

use crate::domain::{RoomMember, RoomName};

use super::{GetRoomDetailError, SharedOrchestrator};

/// Snapshot of one room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetail {
    pub room: RoomName,
    pub capacity: usize,
    pub users: Vec<RoomMember>,
}

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    orchestrator: SharedOrchestrator,
}

impl GetRoomDetailUseCase {
    pub fn new(orchestrator: SharedOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// ルームの参加者とオンライン状態を返す
    ///
    /// # Errors
    ///
    /// * `InvalidRoomName` - ルーム名が空
    /// * `RoomNotFound` - 参加者が 1 人もいない
    pub async fn execute(&self, room: String) -> Result<RoomDetail, GetRoomDetailError> {
        let room = RoomName::new(room).map_err(|_| GetRoomDetailError::InvalidRoomName)?;
        let orchestrator = self.orchestrator.lock().await;
        let users = orchestrator
            .registry()
            .list_room_users(&room, orchestrator.presence());
        if users.is_empty() {
            return Err(GetRoomDetailError::RoomNotFound(room.to_string()));
        }

        Ok(RoomDetail {
            room,
            capacity: orchestrator.room_capacity(),
            users,
        })
    }
}
