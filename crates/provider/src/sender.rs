use herald_core::{Event, SenderKind};

use crate::error::SenderError;

/// A channel-specific message sender.
///
/// A sender is built fresh for every dispatch and used exactly once:
/// [`prepare`](Self::prepare) turns the event into a provider payload, then
/// [`send`](Self::send) consumes the sender and makes a single delivery
/// attempt.
///
/// The trait uses native `async fn` and is not object-safe. The dispatcher
/// selects the concrete sender through a [`SenderKind`]-keyed routing table
/// instead of dynamic dispatch.
pub trait Sender: Send + Sized {
    /// Which variant this sender is.
    fn kind(&self) -> SenderKind;

    /// Build the provider payload from the event.
    ///
    /// May offload attachments. Must be called exactly once; a second call
    /// fails with [`SenderError::AlreadyPrepared`].
    fn prepare(
        &mut self,
        event: &Event,
    ) -> impl std::future::Future<Output = Result<(), SenderError>> + Send;

    /// Deliver the prepared payload.
    ///
    /// Returns the raw provider data, or `None` when the provider succeeded
    /// without a body. Fails with [`SenderError::NotPrepared`] if
    /// [`prepare`](Self::prepare) never ran.
    fn send(
        self,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>, SenderError>> + Send;
}
