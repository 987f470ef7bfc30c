//! Server configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{DEFAULT_HISTORY_LIMIT, DEFAULT_ROOM_CAPACITY};

/// Default upload size limit (50 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// 設定値の検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("room capacity must be at least 1")]
    ZeroRoomCapacity,

    #[error("history limit must be at least 1")]
    ZeroHistoryLimit,

    #[error("max upload size must be at least 1 byte")]
    ZeroMaxUploadBytes,
}

/// Runtime settings of the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum number of users registered in one room
    pub room_capacity: usize,
    /// Messages retained per room
    pub history_limit: usize,
    /// Directory uploaded files are written to
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            room_capacity: DEFAULT_ROOM_CAPACITY,
            history_limit: DEFAULT_HISTORY_LIMIT,
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServerConfig {
    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.room_capacity == 0 {
            return Err(ConfigError::ZeroRoomCapacity);
        }
        if self.history_limit == 0 {
            return Err(ConfigError::ZeroHistoryLimit);
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::ZeroMaxUploadBytes);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
