use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "eu-west-1";

/// How long stored attachments remain valid.
pub const DEFAULT_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Shared AWS connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsBaseConfig {
    /// AWS region (e.g. `"eu-west-1"`). Also used in returned locator URLs.
    pub region: String,

    /// Optional endpoint URL override for local development (e.g. `LocalStack`).
    pub endpoint_url: Option<String>,
}

impl AwsBaseConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint_url: None,
        }
    }

    /// Set an endpoint URL override for local development.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }
}

impl Default for AwsBaseConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

/// Configuration for the S3 attachment store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3StoreConfig {
    #[serde(flatten)]
    pub aws: AwsBaseConfig,

    /// Fixed bucket. When `None` the bucket is resolved per upload from
    /// `BUCKET_NAME` / `[S3].bucket_name`.
    pub bucket: Option<String>,

    /// Lifetime stamped on each object through the `Expires` header.
    #[serde(default = "default_expiry", with = "secs")]
    pub expiry: Duration,
}

fn default_expiry() -> Duration {
    DEFAULT_EXPIRY
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

impl S3StoreConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            aws: AwsBaseConfig::new(region),
            bucket: None,
            expiry: DEFAULT_EXPIRY,
        }
    }

    /// Pin the bucket instead of resolving it per upload.
    #[must_use]
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.aws.endpoint_url = Some(endpoint_url.into());
        self
    }

    #[must_use]
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }
}

impl Default for S3StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}
