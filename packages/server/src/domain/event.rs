//! Inbound session events.
//!
//! Transport 層から受け取るイベントを 1 つの tagged variant で表し、
//! Orchestrator の単一のディスパッチ関数で網羅的に処理する。

use super::{
    entity::Attachment,
    value_object::{RoomName, UserId, UserName},
};

/// `(name, room)` pair a client uses to refer to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: UserName,
    pub room: RoomName,
}

impl Identity {
    pub fn new(name: UserName, room: RoomName) -> Self {
        Self { name, room }
    }
}

/// An event delivered by the transport on behalf of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Join {
        name: UserName,
        room: RoomName,
    },
    SendMessage {
        sender: Identity,
        text: String,
        attachment: Option<Attachment>,
    },
    PrivateMessage {
        to: UserId,
        text: String,
    },
    Typing {
        room: RoomName,
        is_typing: bool,
    },
    LeaveRoom {
        sender: Identity,
    },
    SetOnline {
        user_id: UserId,
    },
    Disconnect,
}

impl SessionEvent {
    /// Event name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::SendMessage { .. } => "sendMessage",
            Self::PrivateMessage { .. } => "privateMessage",
            Self::Typing { .. } => "typing",
            Self::LeaveRoom { .. } => "leaveRoom",
            Self::SetOnline { .. } => "setOnline",
            Self::Disconnect => "disconnect",
        }
    }
}
