use async_trait::async_trait;
use bytes::Bytes;

use crate::error::BlobError;
use crate::types::AttachmentLocator;

/// Pluggable storage backend for offloaded attachments.
///
/// Implementors persist the bytes under the given filename and hand back a
/// locator the recipient can follow. Writes with the same filename overwrite
/// each other; no collision handling is expected.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Store `data` under `filename` and return a locator for it.
    ///
    /// Empty data or an empty filename must fail with
    /// [`BlobError::InvalidAttachment`] before any write happens.
    async fn upload(&self, data: Bytes, filename: &str) -> Result<AttachmentLocator, BlobError>;

    /// Short backend name for logs (e.g. `"s3"`, `"memory"`).
    fn backend_name(&self) -> &'static str;
}

/// Shared argument check for [`AttachmentStore::upload`] implementations.
pub fn validate_upload(data: &Bytes, filename: &str) -> Result<(), BlobError> {
    if data.is_empty() {
        return Err(BlobError::InvalidAttachment(
            "attachment has no content".to_owned(),
        ));
    }
    if filename.trim().is_empty() {
        return Err(BlobError::InvalidAttachment(
            "attachment has no filename".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_data() {
        let err = validate_upload(&Bytes::new(), "a.txt").unwrap_err();
        assert!(matches!(err, BlobError::InvalidAttachment(_)));
    }

    #[test]
    fn rejects_blank_filename() {
        let err = validate_upload(&Bytes::from_static(b"x"), "  ").unwrap_err();
        assert!(matches!(err, BlobError::InvalidAttachment(_)));
    }

    #[test]
    fn accepts_valid_upload() {
        validate_upload(&Bytes::from_static(b"x"), "a.txt").unwrap();
    }
}
