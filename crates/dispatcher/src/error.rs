use herald_provider::SenderError;
use thiserror::Error;

/// Errors returned by [`Dispatcher::handle`](crate::Dispatcher::handle).
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The message type is absent, unparsable, or has no route. Raised
    /// before any sender is built.
    #[error("unknown message type '{0}'")]
    UnknownMessageType(String),

    /// The sender failed to prepare or deliver the message.
    #[error(transparent)]
    Sender(#[from] SenderError),
}

impl DispatchError {
    /// Short machine-friendly name of the error kind, for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownMessageType(_) => "unknown_message_type",
            Self::Sender(e) => e.kind(),
        }
    }
}
