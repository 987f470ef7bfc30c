//! WebSocket event DTOs.
//!
//! Every frame is a JSON object `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

// ========================================
// Client → Server
// ========================================

/// Inbound frame sent by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    Join(JoinPayload),
    SendMessage(SendMessagePayload),
    PrivateMessage(PrivateMessagePayload),
    Typing(TypingPayload),
    LeaveRoom(LeaveRoomPayload),
    SetOnline(SetOnlinePayload),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinPayload {
    pub name: String,
    pub room: String,
}

/// `(name, room)` a client uses to refer to itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityDto {
    pub name: String,
    pub room: String,
}

/// Attachment as returned by `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDto {
    pub url: String,
    #[serde(rename = "type")]
    pub mime_category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessagePayload {
    pub message: String,
    pub params: IdentityDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateMessagePayload {
    /// Recipient user id
    pub to: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingPayload {
    pub room: String,
    pub is_typing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRoomPayload {
    pub params: IdentityDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOnlinePayload {
    pub user_id: String,
}

// ========================================
// Server → Client
// ========================================

/// Outbound frame sent to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    Message(MessageDto),
    History(Vec<MessageDto>),
    RoomData(RoomDataDto),
    PrivateMessage(PrivateMessageDto),
    Typing(TypingDto),
    UserStatusChanged(UserStatusDto),
    Error(ErrorDto),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SenderDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDto {
    pub user: SenderDto,
    pub message: String,
    /// ISO-8601 (UTC)
    pub timestamp: String,
    pub room: String,
    /// `text`, `system`, `audio`, `video` or `image`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMemberDto {
    pub id: String,
    pub name: String,
    pub is_online: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDataDto {
    pub users: Vec<RoomMemberDto>,
    pub room: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateMessageDto {
    pub from: SenderDto,
    pub to: SenderDto,
    pub message: String,
    pub timestamp: String,
    /// Always `private`
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingDto {
    pub user_id: String,
    pub name: String,
    pub is_typing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusDto {
    pub user_id: String,
    pub is_online: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub message: String,
}
