//! AttachmentStore trait 定義
//!
//! アップロードされたファイルを保存し、メッセージに埋め込む `Attachment` を返す。

use async_trait::async_trait;

use super::{entity::Attachment, error::UploadError};

#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Store `bytes` and return where it can be fetched from.
    ///
    /// `file_name` only contributes its extension; `content_type` decides the
    /// MIME category.
    async fn store(
        &self,
        file_name: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<Attachment, UploadError>;

    /// Largest accepted upload, in bytes.
    fn max_bytes(&self) -> usize;
}
