//! Entities
//!
//! User / Message などのドメインエンティティ。

use super::value_object::{RoomName, SessionId, Timestamp, UserId, UserName};

/// A registered chat user.
///
/// `id` is assigned once and survives reconnection; `session_id` is replaced
/// whenever the same (name, room) identity joins from a new connection.
/// `room` never changes in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub room: RoomName,
    pub session_id: SessionId,
}

impl User {
    pub fn new(id: UserId, name: UserName, room: RoomName, session_id: SessionId) -> Self {
        Self {
            id,
            name,
            room,
            session_id,
        }
    }

    pub fn is_identified_by(&self, name: &UserName, room: &RoomName) -> bool {
        &self.name == name && &self.room == room
    }

    pub fn as_sender(&self) -> Sender {
        Sender {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// `{id, name}` pair attached to messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: UserId,
    pub name: UserName,
}

impl Sender {
    /// Synthetic sender of system messages (`Admin` / `system`).
    pub fn system() -> Self {
        Self {
            id: UserId::system(),
            name: UserName::admin(),
        }
    }
}

/// Kind of a room message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    System,
    Audio,
    Video,
    Image,
}

impl MessageKind {
    /// Kind derived from an optional attachment; categories other than
    /// audio/video/image stay `Text`.
    pub fn for_attachment(attachment: Option<&Attachment>) -> Self {
        match attachment.map(|a| a.mime_category.as_str()) {
            Some("audio") => Self::Audio,
            Some("video") => Self::Video,
            Some("image") => Self::Image,
            _ => Self::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::System => "system",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Image => "image",
        }
    }
}

/// A stored upload, embedded verbatim in the message that references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub url: String,
    /// Top-level MIME type, e.g. `image` for `image/png`.
    pub mime_category: String,
}

/// A room message, as kept in history and broadcast to the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub user: Sender,
    pub text: String,
    pub timestamp: Timestamp,
    pub room: RoomName,
    pub kind: MessageKind,
    pub attachment: Option<Attachment>,
}

impl Message {
    /// Build a message authored by a user.
    pub fn from_user(
        user: &User,
        text: String,
        attachment: Option<Attachment>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            user: user.as_sender(),
            text,
            timestamp,
            room: user.room.clone(),
            kind: MessageKind::for_attachment(attachment.as_ref()),
            attachment,
        }
    }

    /// Build a system announcement for a room.
    pub fn system(room: RoomName, text: String, timestamp: Timestamp) -> Self {
        Self {
            user: Sender::system(),
            text,
            timestamp,
            room,
            kind: MessageKind::System,
            attachment: None,
        }
    }
}

/// One row of a room-state snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMember {
    pub id: UserId,
    pub name: UserName,
    pub is_online: bool,
}

/// A direct message between two users. Never stored in room history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateMessage {
    pub from: Sender,
    pub to: Sender,
    pub text: String,
    pub timestamp: Timestamp,
}
