use herald_provider::SenderError;
use thiserror::Error;

/// Errors specific to the Teams webhook integration.
///
/// These are converted into [`SenderError`] at the sender boundary.
#[derive(Debug, Error)]
pub enum TeamsError {
    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook answered with a non-success status.
    #[error("Teams webhook error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The webhook URL could not be parsed.
    #[error("invalid webhook URL: {0}")]
    InvalidUrl(String),

    /// The event could not be turned into a card.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl From<TeamsError> for SenderError {
    fn from(err: TeamsError) -> Self {
        match err {
            TeamsError::Http(e) => SenderError::delivery(e.to_string()),
            TeamsError::Api { status, body } => SenderError::delivery_status(status, body),
            TeamsError::InvalidUrl(msg) => SenderError::delivery(format!("invalid webhook URL: {msg}")),
            TeamsError::InvalidPayload(msg) => SenderError::InvalidPayload(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_keeps_status_and_body() {
        let err: SenderError = TeamsError::Api {
            status: 400,
            body: "Bad payload".into(),
        }
        .into();
        assert!(matches!(
            err,
            SenderError::Delivery { status: Some(400), ref body, .. } if body.as_deref() == Some("Bad payload")
        ));
    }

    #[test]
    fn invalid_payload_maps_to_invalid_payload() {
        let err: SenderError = TeamsError::InvalidPayload("not a card".into()).into();
        assert!(matches!(err, SenderError::InvalidPayload(_)));
    }

    #[test]
    fn error_display() {
        let err = TeamsError::Api {
            status: 500,
            body: "oops".into(),
        };
        assert_eq!(err.to_string(), "Teams webhook error: HTTP 500: oops");
    }
}
