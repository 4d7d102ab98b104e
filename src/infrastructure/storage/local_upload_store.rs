use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{MultipartUpload, ObjectStore, PutPayload};

use crate::application::ports::{UploadStore, UploadStoreError};
use crate::domain::UploadPath;

pub struct LocalUploadStore {
    inner: Arc<LocalFileSystem>,
    base_path: PathBuf,
}

impl LocalUploadStore {
    pub fn new(base_path: PathBuf) -> Result<Self, UploadStoreError> {
        std::fs::create_dir_all(&base_path).map_err(UploadStoreError::Io)?;
        let base_path = std::fs::canonicalize(&base_path)?;
        // Deleting the last file of a submission also removes its now-empty directories.
        let fs = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| UploadStoreError::UploadFailed(e.to_string()))?
            .with_automatic_cleanup(true);
        Ok(Self {
            inner: Arc::new(fs),
            base_path,
        })
    }

    /// Removes directories left empty by an aborted upload, stopping at the base directory.
    fn prune_empty_parents(&self, store_path: &StorePath) {
        let Ok(file) = self.inner.path_to_filesystem(store_path) else {
            return;
        };
        let mut parent = file.parent();
        while let Some(dir) = parent {
            if dir == self.base_path.as_path() || std::fs::remove_dir(dir).is_err() {
                break;
            }
            parent = dir.parent();
        }
    }

    async fn abort(&self, upload: &mut Box<dyn MultipartUpload>, store_path: &StorePath) {
        if let Err(e) = upload.abort().await {
            tracing::debug!(error = %e, path = %store_path, "Failed to abort upload");
        }
        self.prune_empty_parents(store_path);
    }
}

fn is_within(base: &Path, path: &Path) -> bool {
    path.starts_with(base) && path != base
}

#[async_trait::async_trait]
impl UploadStore for LocalUploadStore {
    async fn store(
        &self,
        path: &UploadPath,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, UploadStoreError> {
        let store_path = StorePath::from(path.as_str());
        let mut upload = self
            .inner
            .put_multipart(&store_path)
            .await
            .map_err(|e| UploadStoreError::UploadFailed(e.to_string()))?;

        let mut total_bytes: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    self.abort(&mut upload, &store_path).await;
                    return Err(UploadStoreError::Io(e));
                }
            };
            total_bytes += bytes.len() as u64;
            if let Err(e) = upload.put_part(PutPayload::from(bytes)).await {
                self.abort(&mut upload, &store_path).await;
                return Err(UploadStoreError::UploadFailed(e.to_string()));
            }
        }

        if let Err(e) = upload.complete().await {
            self.abort(&mut upload, &store_path).await;
            return Err(UploadStoreError::UploadFailed(e.to_string()));
        }

        tracing::debug!(path = %path, bytes = total_bytes, "Upload stored");
        Ok(total_bytes)
    }

    async fn delete(&self, path: &UploadPath) -> Result<(), UploadStoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner
            .delete(&store_path)
            .await
            .map_err(|e| match e {
                object_store::Error::NotFound { .. } => {
                    UploadStoreError::NotFound(path.to_string())
                }
                other => UploadStoreError::DeleteFailed(other.to_string()),
            })
    }

    fn local_path(&self, path: &UploadPath) -> Result<PathBuf, UploadStoreError> {
        // Keys are percent-encoded on disk, so resolve them the way the store writes them.
        let local = self
            .inner
            .path_to_filesystem(&StorePath::from(path.as_str()))
            .map_err(|e| UploadStoreError::InvalidPath(e.to_string()))?;
        if !is_within(&self.base_path, &local) {
            return Err(UploadStoreError::InvalidPath(path.to_string()));
        }
        Ok(local)
    }
}
