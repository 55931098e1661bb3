use herald_core::{DispatchResponse, Event, SenderKind};
use herald_provider::{Sender, SenderError};
use serde_json::Value;
use tracing::{Span, debug, error, field, info, instrument};

use crate::error::DispatchError;
use crate::routing::RoutingTable;
use crate::services::SenderServices;

/// Entry point that turns one [`Event`] into one delivery.
///
/// `handle` takes `&self`; a single dispatcher can serve many concurrent
/// tasks. Nothing is retried at this layer.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    services: SenderServices,
    routing: RoutingTable,
}

impl Dispatcher {
    /// Create a dispatcher with the default routing table.
    pub fn new(services: SenderServices) -> Self {
        Self {
            services,
            routing: RoutingTable::default(),
        }
    }

    #[must_use]
    pub fn with_routing(mut self, routing: RoutingTable) -> Self {
        self.routing = routing;
        self
    }

    pub fn routing(&self) -> &RoutingTable {
        &self.routing
    }

    /// Route, prepare, send, and normalize a single event.
    ///
    /// `context` is caller metadata. It is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// [`DispatchError::UnknownMessageType`] when the event's message type is
    /// missing or has no route; no sender is built and nothing is sent.
    /// Otherwise any error from the sender, unchanged.
    #[instrument(
        name = "dispatcher.handle",
        skip_all,
        fields(message_type = field::Empty, sender = field::Empty)
    )]
    pub async fn handle(&self, event: Event, context: &Value) -> Result<DispatchResponse, DispatchError> {
        let message_type = event.message_type.clone().unwrap_or_default();
        let span = Span::current();
        span.record("message_type", message_type.as_str());
        debug!(%context, "handling event");

        let kind = match self.route(&event) {
            Ok(kind) => kind,
            Err(err) => {
                error!(message_type = %message_type, error_kind = err.kind(), error = %err, "no route for event");
                return Err(err);
            }
        };
        span.record("sender", kind.as_str());

        let result = match kind {
            SenderKind::EmailSms => run(self.services.email_sms_sender(), &event).await,
            SenderKind::ChatWebhook => {
                let mut sender = self.services.chat_sender();
                if let Some(url) = event.webhook_url.as_deref() {
                    sender.set_webhook_url(url);
                }
                run(sender, &event).await
            }
        };

        match result {
            Ok(data) => {
                let response = DispatchResponse::from_provider(data, kind);
                info!(response = %response.response, "event dispatched");
                Ok(response)
            }
            Err(err) => {
                log_failure(&message_type, kind, &err);
                Err(err.into())
            }
        }
    }

    fn route(&self, event: &Event) -> Result<SenderKind, DispatchError> {
        let unknown = || {
            DispatchError::UnknownMessageType(event.message_type.clone().unwrap_or_default())
        };
        match event.parsed_message_type() {
            Some(Ok(message_type)) => self.routing.route(message_type).ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }
}

async fn run<S: Sender>(mut sender: S, event: &Event) -> Result<Option<Value>, SenderError> {
    sender.prepare(event).await?;
    sender.send().await
}

fn log_failure(message_type: &str, kind: SenderKind, err: &SenderError) {
    if let SenderError::Delivery {
        message,
        status,
        body,
    } = err
    {
        error!(
            message_type,
            sender = %kind,
            error_kind = err.kind(),
            status = ?status,
            body = body.as_deref().unwrap_or_default(),
            error = %message,
            "delivery failed"
        );
    } else {
        error!(
            message_type,
            sender = %kind,
            error_kind = err.kind(),
            error = %err,
            "dispatch failed"
        );
    }
}
