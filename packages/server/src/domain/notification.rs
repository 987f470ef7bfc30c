//! Outbound notifications and their delivery scope.

use super::{
    entity::{Message, PrivateMessage, RoomMember},
    value_object::{RoomName, SessionId, UserId, UserName},
};

/// Who receives a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryScope {
    /// A single session.
    Session(SessionId),
    /// Every session subscribed to the room.
    Room(RoomName),
    /// Every session subscribed to the room except `except`.
    RoomExcept { room: RoomName, except: SessionId },
    /// Every connected session.
    Everyone,
}

/// Payload of an outbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Message(Message),
    History(Vec<Message>),
    RoomData {
        room: RoomName,
        users: Vec<RoomMember>,
    },
    PrivateMessage(PrivateMessage),
    Typing {
        user_id: UserId,
        name: UserName,
        is_typing: bool,
    },
    UserStatusChanged {
        user_id: UserId,
        is_online: bool,
    },
    Error {
        message: String,
    },
}

/// One step the transport must perform, in order.
///
/// Subscription changes are interleaved with deliveries so that a room
/// broadcast emitted right after a join reaches the joiner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Subscribe {
        session: SessionId,
        room: RoomName,
    },
    Unsubscribe {
        session: SessionId,
        room: RoomName,
    },
    Deliver {
        scope: DeliveryScope,
        notification: Notification,
    },
}

impl Outbound {
    pub fn deliver(scope: DeliveryScope, notification: Notification) -> Self {
        Self::Deliver {
            scope,
            notification,
        }
    }

    pub fn to_session(session: &SessionId, notification: Notification) -> Self {
        Self::deliver(DeliveryScope::Session(session.clone()), notification)
    }

    pub fn to_room(room: &RoomName, notification: Notification) -> Self {
        Self::deliver(DeliveryScope::Room(room.clone()), notification)
    }

    pub fn to_room_except(room: &RoomName, except: &SessionId, notification: Notification) -> Self {
        Self::deliver(
            DeliveryScope::RoomExcept {
                room: room.clone(),
                except: except.clone(),
            },
            notification,
        )
    }
}
