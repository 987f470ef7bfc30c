//! Hiroba: room-based chat server with presence tracking.
//!
//! Clients connect over WebSocket, join named rooms, exchange public and
//! private messages and see who is online. Each room keeps a bounded history
//! that is replayed to newcomers.

// layers
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
