//! Conversion logic between DTOs and domain types.

use crate::domain::{
    Attachment, Identity, Message, Notification, PrivateMessage, RoomMember, RoomName,
    RoomSummary, Sender, SessionEvent, UserId, UserName, ValueObjectError,
};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::IdentityDto> for Identity {
    type Error = ValueObjectError;

    fn try_from(dto: dto::IdentityDto) -> Result<Self, Self::Error> {
        Ok(Identity::new(UserName::new(dto.name)?, RoomName::new(dto.room)?))
    }
}

impl From<dto::FileDto> for Attachment {
    fn from(dto: dto::FileDto) -> Self {
        Self {
            url: dto.url,
            mime_category: dto.mime_category,
        }
    }
}

impl TryFrom<dto::ClientEvent> for SessionEvent {
    type Error = ValueObjectError;

    fn try_from(dto: dto::ClientEvent) -> Result<Self, Self::Error> {
        let event = match dto {
            dto::ClientEvent::Join(payload) => SessionEvent::Join {
                name: UserName::new(payload.name)?,
                room: RoomName::new(payload.room)?,
            },
            dto::ClientEvent::SendMessage(payload) => SessionEvent::SendMessage {
                sender: payload.params.try_into()?,
                text: payload.message,
                attachment: payload.file.map(Attachment::from),
            },
            dto::ClientEvent::PrivateMessage(payload) => SessionEvent::PrivateMessage {
                to: UserId::new(payload.to)?,
                text: payload.message,
            },
            dto::ClientEvent::Typing(payload) => SessionEvent::Typing {
                room: RoomName::new(payload.room)?,
                is_typing: payload.is_typing,
            },
            dto::ClientEvent::LeaveRoom(payload) => SessionEvent::LeaveRoom {
                sender: payload.params.try_into()?,
            },
            dto::ClientEvent::SetOnline(payload) => SessionEvent::SetOnline {
                user_id: UserId::new(payload.user_id)?,
            },
        };
        Ok(event)
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&Sender> for dto::SenderDto {
    fn from(sender: &Sender) -> Self {
        Self {
            id: sender.id.to_string(),
            name: sender.name.to_string(),
        }
    }
}

impl From<&Attachment> for dto::FileDto {
    fn from(attachment: &Attachment) -> Self {
        Self {
            url: attachment.url.clone(),
            mime_category: attachment.mime_category.clone(),
        }
    }
}

impl From<&Message> for dto::MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            user: (&message.user).into(),
            message: message.text.clone(),
            timestamp: message.timestamp.to_iso8601(),
            room: message.room.to_string(),
            kind: message.kind.as_str().to_string(),
            file: message.attachment.as_ref().map(dto::FileDto::from),
        }
    }
}

impl From<&RoomMember> for dto::RoomMemberDto {
    fn from(member: &RoomMember) -> Self {
        Self {
            id: member.id.to_string(),
            name: member.name.to_string(),
            is_online: member.is_online,
        }
    }
}

impl From<&PrivateMessage> for dto::PrivateMessageDto {
    fn from(message: &PrivateMessage) -> Self {
        Self {
            from: (&message.from).into(),
            to: (&message.to).into(),
            message: message.text.clone(),
            timestamp: message.timestamp.to_iso8601(),
            kind: "private".to_string(),
        }
    }
}

impl From<&Notification> for dto::ServerEvent {
    fn from(notification: &Notification) -> Self {
        match notification {
            Notification::Message(message) => dto::ServerEvent::Message(message.into()),
            Notification::History(messages) => {
                dto::ServerEvent::History(messages.iter().map(dto::MessageDto::from).collect())
            }
            Notification::RoomData { room, users } => dto::ServerEvent::RoomData(dto::RoomDataDto {
                users: users.iter().map(dto::RoomMemberDto::from).collect(),
                room: room.to_string(),
            }),
            Notification::PrivateMessage(message) => {
                dto::ServerEvent::PrivateMessage(message.into())
            }
            Notification::Typing {
                user_id,
                name,
                is_typing,
            } => dto::ServerEvent::Typing(dto::TypingDto {
                user_id: user_id.to_string(),
                name: name.to_string(),
                is_typing: *is_typing,
            }),
            Notification::UserStatusChanged { user_id, is_online } => {
                dto::ServerEvent::UserStatusChanged(dto::UserStatusDto {
                    user_id: user_id.to_string(),
                    is_online: *is_online,
                })
            }
            Notification::Error { message } => dto::ServerEvent::Error(dto::ErrorDto {
                message: message.clone(),
            }),
        }
    }
}

impl From<&RoomSummary> for http::RoomSummaryDto {
    fn from(summary: &RoomSummary) -> Self {
        Self {
            room: summary.room.to_string(),
            users: summary.users,
            online: summary.online,
            history: summary.history,
        }
    }
}

impl From<Attachment> for http::UploadResponseDto {
    fn from(attachment: Attachment) -> Self {
        Self {
            url: attachment.url,
            mime_category: attachment.mime_category,
        }
    }
}
