use herald_config::ConfigError;
use herald_provider::SenderError;
use thiserror::Error;

/// Errors specific to the Notify integration.
///
/// These are converted into [`SenderError`] at the sender boundary.
#[derive(Debug, Error)]
pub enum GovNotifyError {
    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Notify answered with a non-success status.
    #[error("Notify API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The API key or base URL could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request token could not be signed.
    #[error("failed to sign request token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// A success response whose body is not JSON.
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}

impl From<GovNotifyError> for SenderError {
    fn from(err: GovNotifyError) -> Self {
        match err {
            GovNotifyError::Http(e) => SenderError::delivery(e.to_string()),
            GovNotifyError::Api { status, body } => SenderError::delivery_status(status, body),
            GovNotifyError::Config(e) => SenderError::Config(e),
            GovNotifyError::Token(e) => SenderError::delivery(format!("failed to sign request token: {e}")),
            GovNotifyError::InvalidResponse(msg) => SenderError::delivery(msg),
        }
    }
}
