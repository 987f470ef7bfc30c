//! Request handlers.

mod http;
mod upload;
mod websocket;

pub use http::{get_room_detail, get_rooms, health_check};
pub use upload::upload_file;
pub use websocket::websocket_handler;
