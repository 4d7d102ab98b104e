use std::io;
use std::path::PathBuf;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::UploadPath;

/// Holds user uploads on a filesystem the inference process can read.
#[async_trait::async_trait]
pub trait UploadStore: Send + Sync {
    async fn store(
        &self,
        path: &UploadPath,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, UploadStoreError>;

    async fn delete(&self, path: &UploadPath) -> Result<(), UploadStoreError>;

    /// Filesystem location of a stored upload, as the inference process must open it.
    fn local_path(&self, path: &UploadPath) -> Result<PathBuf, UploadStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UploadStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("invalid upload path: {0}")]
    InvalidPath(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
