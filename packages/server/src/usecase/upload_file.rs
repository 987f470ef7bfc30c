//! UseCase: ファイルアップロード

use std::sync::Arc;

use crate::domain::{Attachment, AttachmentStore, UploadError};

/// ファイルアップロードのユースケース
pub struct UploadFileUseCase {
    /// AttachmentStore（保存先の抽象化）
    store: Arc<dyn AttachmentStore>,
}

impl UploadFileUseCase {
    pub fn new(store: Arc<dyn AttachmentStore>) -> Self {
        Self { store }
    }

    /// Largest accepted upload, in bytes.
    pub fn max_bytes(&self) -> usize {
        self.store.max_bytes()
    }

    /// ファイルを保存し、メッセージに添付できる `Attachment` を返す
    pub async fn execute(
        &self,
        file_name: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<Attachment, UploadError> {
        let attachment = self.store.store(file_name, content_type, bytes).await?;
        tracing::debug!(
            "Upload stored at '{}' as {}",
            attachment.url,
            attachment.mime_category
        );
        Ok(attachment)
    }
}
