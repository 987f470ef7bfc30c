//! UI layer: axum router and connection handlers.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
