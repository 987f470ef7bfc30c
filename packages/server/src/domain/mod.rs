//! Domain layer: value objects, entities, the in-memory stores and the
//! session state machine, plus the traits the outer layers implement.

pub mod attachment_store;
pub mod entity;
pub mod error;
pub mod event;
pub mod history;
pub mod notification;
pub mod orchestrator;
pub mod presence;
pub mod pusher;
pub mod registry;
pub mod value_object;

pub use attachment_store::AttachmentStore;
pub use entity::{Attachment, Message, MessageKind, PrivateMessage, RoomMember, Sender, User};
pub use error::{JoinError, MessagePushError, UploadError, ValueObjectError};
pub use event::{Identity, SessionEvent};
pub use history::{DEFAULT_HISTORY_LIMIT, RoomHistory};
pub use notification::{DeliveryScope, Notification, Outbound};
pub use orchestrator::{DEFAULT_ROOM_CAPACITY, RoomSummary, SessionOrchestrator};
pub use presence::PresenceTracker;
pub use pusher::{MessagePusher, PusherChannel};
pub use registry::UserRegistry;
pub use value_object::{RoomName, SessionId, Timestamp, UserId, UserIdFactory, UserName};

#[cfg(test)]
pub use pusher::MockMessagePusher;
