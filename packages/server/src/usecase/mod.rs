//! UseCase layer: the operations the UI layer invokes.

mod connect_session;
mod disconnect_session;
mod dispatch_event;
mod error;
mod get_room_detail;
mod get_rooms;
mod upload_file;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::SessionOrchestrator;

pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use dispatch_event::DispatchEventUseCase;
pub use error::GetRoomDetailError;
pub use get_room_detail::{GetRoomDetailUseCase, RoomDetail};
pub use get_rooms::GetRoomsUseCase;
pub use upload_file::UploadFileUseCase;

/// The single mutual-exclusion domain guarding users, presence and history.
pub type SharedOrchestrator = Arc<Mutex<SessionOrchestrator>>;

/// Wrap an orchestrator for sharing between use cases.
pub fn share(orchestrator: SessionOrchestrator) -> SharedOrchestrator {
    Arc::new(Mutex::new(orchestrator))
}
