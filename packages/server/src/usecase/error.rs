//! UseCase errors.

use thiserror::Error;

/// GetRoomDetailUseCase のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    /// The requested room name is blank
    #[error("Invalid room name")]
    InvalidRoomName,

    /// Nobody is registered in the room
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}
