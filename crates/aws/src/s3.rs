use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use herald_blob::{AttachmentLocator, AttachmentStore, BlobError, guess_content_type, validate_upload};
use herald_config::{ConfigResolver, settings};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, error, info, instrument};

use crate::auth::build_sdk_config;
use crate::config::S3StoreConfig;
use crate::error::classify_sdk_error;

/// Characters left unescaped in object keys: alphanumerics plus `_.-~`.
const KEY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

/// Attachment store that writes each attachment to an S3 bucket.
///
/// Objects are keyed by filename, carry a guessed content type, expire after
/// the configured lifetime, and are written with the
/// `bucket-owner-full-control` canned ACL.
pub struct S3AttachmentStore {
    config: S3StoreConfig,
    resolver: Arc<ConfigResolver>,
    client: aws_sdk_s3::Client,
}

impl std::fmt::Debug for S3AttachmentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3AttachmentStore")
            .field("config", &self.config)
            .field("client", &"<S3Client>")
            .finish_non_exhaustive()
    }
}

impl S3AttachmentStore {
    /// Create a store by building an AWS SDK client from the environment.
    pub async fn new(config: S3StoreConfig, resolver: Arc<ConfigResolver>) -> Self {
        let sdk_config = build_sdk_config(&config.aws).await;
        let client = aws_sdk_s3::Client::new(&sdk_config);
        Self {
            config,
            resolver,
            client,
        }
    }

    /// Create a store with a pre-built client (for testing).
    pub fn with_client(
        config: S3StoreConfig,
        resolver: Arc<ConfigResolver>,
        client: aws_sdk_s3::Client,
    ) -> Self {
        Self {
            config,
            resolver,
            client,
        }
    }

    fn resolve_bucket(&self) -> Result<String, BlobError> {
        match &self.config.bucket {
            Some(bucket) => Ok(bucket.clone()),
            None => Ok(self.resolver.setting(settings::BUCKET_NAME)?),
        }
    }

    fn expires_at(&self) -> aws_sdk_s3::primitives::DateTime {
        let lifetime = chrono::Duration::from_std(self.config.expiry)
            .unwrap_or_else(|_| chrono::Duration::weeks(1));
        let expires = chrono::Utc::now() + lifetime;
        aws_sdk_s3::primitives::DateTime::from_secs(expires.timestamp())
    }
}

/// Console URL of an object.
///
/// The key is escaped the way HTML form values are: spaces become `+` and
/// everything outside `[A-Za-z0-9_.~-]` is percent-encoded.
pub fn object_url(bucket: &str, key: &str, region: &str) -> String {
    format!(
        "https://console.aws.amazon.com/s3/object/{bucket}/{}?region={region}",
        quote_plus(key)
    )
}

fn quote_plus(value: &str) -> String {
    utf8_percent_encode(value, KEY_ESCAPE)
        .to_string()
        .replace("%20", "+")
}

#[async_trait]
impl AttachmentStore for S3AttachmentStore {
    #[instrument(skip(self, data), fields(size = data.len(), backend = "s3"))]
    async fn upload(&self, data: Bytes, filename: &str) -> Result<AttachmentLocator, BlobError> {
        validate_upload(&data, filename)?;
        let bucket = self.resolve_bucket()?;
        let content_type = guess_content_type(filename);

        debug!(
            bucket = %bucket,
            key = %filename,
            content_type = content_type.mime,
            "uploading attachment to S3"
        );

        let mut request = self
            .client
            .put_object()
            .bucket(&bucket)
            .key(filename)
            .body(aws_sdk_s3::primitives::ByteStream::from(data))
            .content_type(content_type.mime)
            .expires(self.expires_at())
            .acl(aws_sdk_s3::types::ObjectCannedAcl::BucketOwnerFullControl);

        if let Some(encoding) = content_type.encoding {
            request = request.content_encoding(encoding);
        }

        request.send().await.map_err(|e| {
            let err_str = e.to_string();
            error!(error = %err_str, bucket = %bucket, key = %filename, "error uploading attachment to S3");
            BlobError::from(classify_sdk_error(&err_str))
        })?;

        let url = object_url(&bucket, filename, &self.config.aws.region);
        info!(url = %url, "uploaded attachment");
        Ok(AttachmentLocator::new(url))
    }

    fn backend_name(&self) -> &'static str {
        "s3"
    }
}
