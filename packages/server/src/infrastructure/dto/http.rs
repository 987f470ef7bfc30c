//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::RoomMemberDto;

/// Entry of `GET /api/rooms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub room: String,
    pub users: usize,
    pub online: usize,
    pub history: usize,
}

/// Body of `GET /api/rooms/{room}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub room: String,
    pub capacity: usize,
    pub users: Vec<RoomMemberDto>,
}

/// Body of a successful `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponseDto {
    pub url: String,
    #[serde(rename = "type")]
    pub mime_category: String,
}

/// Body of a failed HTTP request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
}
