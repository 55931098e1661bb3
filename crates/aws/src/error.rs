use herald_blob::BlobError;
use thiserror::Error;

/// Errors from S3 operations, classified from the SDK's error text.
#[derive(Debug, Error)]
pub enum AwsStoreError {
    /// The AWS SDK returned an error from the service.
    #[error("AWS service error: {0}")]
    ServiceError(String),

    /// The request was throttled by the AWS service.
    #[error("AWS request throttled")]
    Throttled,

    /// A network or connection error occurred communicating with AWS.
    #[error("AWS connection error: {0}")]
    Connection(String),

    /// The request timed out.
    #[error("AWS request timed out")]
    Timeout,
}

impl From<AwsStoreError> for BlobError {
    fn from(err: AwsStoreError) -> Self {
        BlobError::Storage(err.to_string())
    }
}

/// Classify an AWS SDK error string into the appropriate [`AwsStoreError`].
pub fn classify_sdk_error(error_str: &str) -> AwsStoreError {
    let lower = error_str.to_lowercase();
    if lower.contains("throttl") || lower.contains("slowdown") || lower.contains("too many") {
        AwsStoreError::Throttled
    } else if lower.contains("timeout") || lower.contains("timed out") {
        AwsStoreError::Timeout
    } else if lower.contains("connect") || lower.contains("dns") || lower.contains("network") {
        AwsStoreError::Connection(error_str.to_owned())
    } else {
        AwsStoreError::ServiceError(error_str.to_owned())
    }
}
