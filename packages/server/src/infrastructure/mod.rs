//! Infrastructure layer: wire DTOs, the WebSocket pusher and attachment storage.

pub mod dto;
pub mod message_pusher;
pub mod storage;
