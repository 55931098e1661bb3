use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::info;

use crate::error::BlobError;
use crate::store::{AttachmentStore, validate_upload};
use crate::types::AttachmentLocator;

/// An attachment store that keeps blobs in process memory.
///
/// Useful for local runs and tests where no object storage is available.
/// Locators have the form `memory://<filename>`.
#[derive(Debug, Default)]
pub struct MemoryAttachmentStore {
    blobs: DashMap<String, Bytes>,
}

impl MemoryAttachmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a stored blob by filename.
    pub fn get(&self, filename: &str) -> Option<Bytes> {
        self.blobs.get(filename).map(|entry| entry.value().clone())
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl AttachmentStore for MemoryAttachmentStore {
    async fn upload(&self, data: Bytes, filename: &str) -> Result<AttachmentLocator, BlobError> {
        validate_upload(&data, filename)?;
        info!(filename, size = data.len(), "stored attachment in memory");
        self.blobs.insert(filename.to_owned(), data);
        Ok(AttachmentLocator::new(format!("memory://{filename}")))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_stores_and_returns_locator() {
        let store = MemoryAttachmentStore::new();
        let loc = store
            .upload(Bytes::from_static(b"hello"), "hello.txt")
            .await
            .unwrap();
        assert_eq!(loc.as_str(), "memory://hello.txt");
        assert_eq!(store.get("hello.txt").unwrap(), Bytes::from_static(b"hello"));
    }

    #[tokio::test]
    async fn same_name_overwrites() {
        let store = MemoryAttachmentStore::new();
        store.upload(Bytes::from_static(b"one"), "a.bin").await.unwrap();
        store.upload(Bytes::from_static(b"two"), "a.bin").await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a.bin").unwrap(), Bytes::from_static(b"two"));
    }

    #[tokio::test]
    async fn empty_upload_is_rejected_without_write() {
        let store = MemoryAttachmentStore::new();
        let err = store.upload(Bytes::new(), "a.bin").await.unwrap_err();
        assert!(matches!(err, BlobError::InvalidAttachment(_)));
        assert!(store.is_empty());
    }
}
