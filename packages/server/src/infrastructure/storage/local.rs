//! ローカルディスクへのアップロード保存
//!
//! ファイル名は `{ミリ秒}-{uuid}{拡張子}` とし、同時アップロードでも衝突しない。
//! 保存したファイルは `/uploads/<file>` で配信される。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use hiroba_shared::time::get_utc_timestamp_millis;
use uuid::Uuid;

use crate::domain::{Attachment, AttachmentStore, UploadError};

/// URL prefix under which stored files are served.
pub const UPLOADS_ROUTE: &str = "/uploads";

pub struct LocalAttachmentStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl LocalAttachmentStore {
    /// Create the store, creating `dir` if it does not exist yet.
    pub async fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Result<Self, UploadError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir, max_bytes })
    }

    fn unique_file_name(original: Option<&str>) -> String {
        let extension = original
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        format!(
            "{}-{}{}",
            get_utc_timestamp_millis(),
            Uuid::new_v4().simple(),
            extension
        )
    }

    /// `image/png` -> `image`; missing or malformed types are `application`.
    fn mime_category(content_type: Option<&str>) -> String {
        content_type
            .and_then(|ct| ct.split('/').next())
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .unwrap_or("application")
            .to_ascii_lowercase()
    }
}

#[async_trait]
impl AttachmentStore for LocalAttachmentStore {
    async fn store(
        &self,
        file_name: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<Attachment, UploadError> {
        if bytes.len() > self.max_bytes {
            return Err(UploadError::TooLarge {
                max_bytes: self.max_bytes,
            });
        }

        let stored_name = Self::unique_file_name(file_name);
        tokio::fs::write(self.dir.join(&stored_name), bytes).await?;
        tracing::info!("Stored upload '{}' ({} bytes)", stored_name, bytes.len());

        Ok(Attachment {
            url: format!("{UPLOADS_ROUTE}/{stored_name}"),
            mime_category: Self::mime_category(content_type),
        })
    }

    fn max_bytes(&self) -> usize {
        self.max_bytes
    }
}
