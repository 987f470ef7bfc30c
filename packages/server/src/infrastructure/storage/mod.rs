//! Attachment storage implementations.

pub mod local;

pub use local::LocalAttachmentStore;
