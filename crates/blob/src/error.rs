use herald_config::ConfigError;
use thiserror::Error;

/// Errors that can occur while offloading an attachment.
#[derive(Debug, Error)]
pub enum BlobError {
    /// The attachment bytes or filename are missing.
    #[error("invalid attachment: {0}")]
    InvalidAttachment(String),

    /// The store could not resolve its own configuration (e.g. bucket name).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A storage backend error occurred.
    #[error("blob storage error: {0}")]
    Storage(String),
}
