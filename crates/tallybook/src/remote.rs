use std::sync::Arc;

/// One JSON document stored at a fixed logical path in the remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub path: String,
    /// Decoded UTF-8 text. The store never parses it.
    pub content: String,
    /// Opaque revision token current at read time. The store rejects a
    /// conditional write that carries a stale one.
    pub revision: String,
}

/// Errors from the remote file store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Any non-2xx, non-404 response, including a stale-revision conflict
    /// on write.
    #[error("remote store returned HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    /// Connection-level failure or a response body that could not be read.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Whole-file get/put against a hosted contents API.
///
/// A write to a path is always paired with a read of that path inside the
/// same operation, so the revision carried on the write is the one current
/// at read time. A concurrent writer surfaces as `StoreError::Remote`, never
/// as a silent overwrite. Nothing is retried or cached between calls.
#[async_trait::async_trait]
pub trait RemoteStore: Send + Sync {
    /// Read the file at `path`. An absent file is `Ok(None)`, not an error.
    async fn fetch(&self, path: &str) -> Result<Option<RemoteFile>, StoreError>;

    /// Create or replace the file at `path`, recording `message` in the
    /// store's change log.
    async fn upsert(&self, path: &str, content: &str, message: &str) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<T: RemoteStore + ?Sized> RemoteStore for Arc<T> {
    async fn fetch(&self, path: &str) -> Result<Option<RemoteFile>, StoreError> {
        (**self).fetch(path).await
    }

    async fn upsert(&self, path: &str, content: &str, message: &str) -> Result<(), StoreError> {
        (**self).upsert(path, content, message).await
    }
}
