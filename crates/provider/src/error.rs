use herald_blob::BlobError;
use herald_config::ConfigError;
use herald_core::SenderKind;
use thiserror::Error;

/// Errors that can occur while preparing or sending a message.
///
/// Integration crates keep their own error types and convert into this one at
/// the [`Sender`](crate::Sender) boundary.
#[derive(Debug, Error)]
pub enum SenderError {
    /// A required setting is missing from both environment and config file,
    /// or is present but unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The attachment could not be decoded or lacks a filename.
    #[error("invalid attachment: {0}")]
    InvalidAttachment(String),

    /// The sender does not deliver this message type.
    #[error("{sender} does not support message type '{message_type}'")]
    UnsupportedChannel {
        sender: SenderKind,
        message_type: String,
    },

    /// The provider or webhook call failed.
    #[error("delivery failed: {message}")]
    Delivery {
        message: String,
        /// HTTP status returned by the remote side, if any.
        status: Option<u16>,
        /// Response body returned by the remote side, if any.
        body: Option<String>,
    },

    /// The attachment could not be written to the blob store.
    #[error("attachment storage failed: {0}")]
    Storage(String),

    /// The event is missing a field this channel requires.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// `prepare` was called a second time on the same sender.
    #[error("message already prepared")]
    AlreadyPrepared,

    /// `send` was called on a sender that was never prepared.
    #[error("message was not prepared before send")]
    NotPrepared,
}

impl SenderError {
    /// A delivery failure with no HTTP details.
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// A delivery failure caused by a non-success HTTP response.
    pub fn delivery_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::Delivery {
            message: format!("HTTP {status}: {body}"),
            status: Some(status),
            body: Some(body),
        }
    }

    /// Short machine-friendly name of the error kind, for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(ConfigError::Missing { .. }) => "config_missing",
            Self::Config(ConfigError::KeyMissing { .. }) => "config_key_missing",
            Self::Config(_) => "config_invalid",
            Self::InvalidAttachment(_) => "invalid_attachment",
            Self::UnsupportedChannel { .. } => "unsupported_channel",
            Self::Delivery { .. } => "delivery",
            Self::Storage(_) => "storage",
            Self::InvalidPayload(_) => "invalid_payload",
            Self::AlreadyPrepared | Self::NotPrepared => "lifecycle",
        }
    }
}

impl From<BlobError> for SenderError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::InvalidAttachment(msg) => Self::InvalidAttachment(msg),
            BlobError::Config(e) => Self::Config(e),
            BlobError::Storage(msg) => Self::Storage(msg),
        }
    }
}
