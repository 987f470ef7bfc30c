//! Domain errors.

use thiserror::Error;

/// Value Object の生成時に発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// User name is empty after trimming
    #[error("User name must not be empty")]
    EmptyUserName,

    /// Room name is empty after trimming
    #[error("Room name must not be empty")]
    EmptyRoomName,

    /// User id is empty
    #[error("User id must not be empty")]
    EmptyUserId,
}

/// Join を拒否した理由（要求したセッションにのみ通知される）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    /// The room already holds `capacity` users
    #[error("Room is full (max {capacity} users)")]
    RoomCapacityExceeded { room: String, capacity: usize },
}

/// MessagePusher のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// No live channel is registered for the session
    #[error("Session '{0}' not found")]
    SessionNotFound(String),

    /// The session channel is closed
    #[error("Failed to push message: {0}")]
    PushFailed(String),

    /// The notification could not be encoded for the wire
    #[error("Failed to serialize notification: {0}")]
    Serialization(String),
}

/// AttachmentStore のエラー
#[derive(Debug, Error)]
pub enum UploadError {
    /// The multipart body carried no `file` field
    #[error("No file uploaded")]
    MissingFile,

    /// The file exceeds the configured limit
    #[error("File is too large (max {max_bytes} bytes)")]
    TooLarge { max_bytes: usize },

    /// Writing the file failed
    #[error("Failed to store file: {0}")]
    Io(#[from] std::io::Error),
}
