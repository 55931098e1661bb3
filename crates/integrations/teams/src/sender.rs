use std::sync::Arc;

use herald_config::{ConfigResolver, settings};
use herald_core::{Event, SenderKind};
use herald_provider::{PreparedSlot, Sender, SenderError};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::client::WebhookClient;
use crate::error::TeamsError;
use crate::types::{MessageCard, is_message_card};

/// Sender for the chat channel, delivering `MessageCard`s to a Teams
/// incoming webhook.
pub struct ChatWebhookSender {
    config: Arc<ConfigResolver>,
    client: Arc<dyn WebhookClient>,
    webhook_url: Option<String>,
    payload: PreparedSlot<Value>,
}

impl std::fmt::Debug for ChatWebhookSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The webhook URL is itself the credential.
        f.debug_struct("ChatWebhookSender")
            .field("webhook_url", &self.webhook_url.as_ref().map(|_| "[REDACTED]"))
            .field("prepared", &self.payload.is_filled())
            .finish_non_exhaustive()
    }
}

impl ChatWebhookSender {
    pub fn new(config: Arc<ConfigResolver>, client: Arc<dyn WebhookClient>) -> Self {
        Self {
            config,
            client,
            webhook_url: None,
            payload: PreparedSlot::new(),
        }
    }

    /// Override the destination for this message. An empty URL is ignored.
    pub fn set_webhook_url(&mut self, url: impl Into<String>) {
        let url = url.into();
        if !url.is_empty() {
            self.webhook_url = Some(url);
        }
    }

    /// The prepared card, if [`prepare`](Sender::prepare) has run.
    pub fn payload(&self) -> Option<&Value> {
        self.payload.get()
    }

    fn build_payload(event: &Event) -> Result<Value, TeamsError> {
        if let Some(body) = event.body.as_ref().filter(|b| is_message_card(b)) {
            return Ok(body.clone());
        }

        let text = match &event.body {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        let mut card = MessageCard::new(text);
        if let Some(subject) = &event.subject {
            card = card.with_subject(subject.as_str());
        }

        serde_json::to_value(&card)
            .map_err(|e| TeamsError::InvalidPayload(format!("failed to serialize card: {e}")))
    }
}

impl Sender for ChatWebhookSender {
    fn kind(&self) -> SenderKind {
        SenderKind::ChatWebhook
    }

    async fn prepare(&mut self, event: &Event) -> Result<(), SenderError> {
        let payload = Self::build_payload(event)?;
        debug!(pass_through = event.body.as_ref().is_some_and(is_message_card), "prepared chat card");
        self.payload.fill(payload)
    }

    #[instrument(skip_all, fields(sender = "ChatWebhookSender"))]
    async fn send(self) -> Result<Option<Value>, SenderError> {
        let payload = self.payload.take()?;
        let url = match self.webhook_url {
            Some(url) => url,
            None => self.config.setting(settings::TEAMS_URL)?,
        };

        let body = self.client.post_json(&url, &payload).await?;
        info!(response = %body, "chat webhook accepted message");

        Ok((!body.is_empty()).then_some(Value::String(body)))
    }
}

#[cfg(test)]
mod tests {
    use herald_config::Environment;
    use serde_json::json;

    use super::*;
    use crate::client::HttpWebhookClient;
    use crate::config::RetryPolicy;
    use crate::mock_server::MockTeamsServer;

    fn resolver(env: &[(&str, &str)]) -> Arc<ConfigResolver> {
        Arc::new(ConfigResolver::empty().with_environment(Environment::fixed(env.iter().copied())))
    }

    fn http_client() -> Arc<dyn WebhookClient> {
        Arc::new(HttpWebhookClient::new(RetryPolicy::default().with_max_retries(0)).unwrap())
    }

    #[tokio::test]
    async fn synthesizes_card_from_subject_and_text() {
        let mut sender = ChatWebhookSender::new(resolver(&[]), http_client());
        let event = Event::new("chat")
            .with_subject("Deploy finished")
            .with_body("All green");
        sender.prepare(&event).await.unwrap();

        assert_eq!(
            sender.payload().unwrap(),
            &json!({
                "@type": "MessageCard",
                "@context": "https://schema.org/extensions",
                "summary": "Deploy finished",
                "title": "Deploy finished",
                "text": "All green"
            })
        );
    }

    #[tokio::test]
    async fn structured_body_rendered_as_json_text() {
        let mut sender = ChatWebhookSender::new(resolver(&[]), http_client());
        sender
            .prepare(&Event::new("chat").with_body(json!({"cpu": 93})))
            .await
            .unwrap();
        let payload = sender.payload().unwrap();
        assert_eq!(payload["text"], r#"{"cpu":93}"#);
        assert!(payload.get("title").is_none());
    }

    #[tokio::test]
    async fn missing_body_gives_empty_text() {
        let mut sender = ChatWebhookSender::new(resolver(&[]), http_client());
        sender.prepare(&Event::new("chat")).await.unwrap();
        assert_eq!(sender.payload().unwrap()["text"], "");
    }

    #[tokio::test]
    async fn preformatted_card_passes_through() {
        let card = json!({
            "@type": "MessageCard",
            "summary": "s",
            "title": "t",
            "text": "x",
            "sections": [{"activityTitle": "a"}]
        });
        let mut sender = ChatWebhookSender::new(resolver(&[]), http_client());
        sender
            .prepare(&Event::new("chat").with_subject("ignored").with_body(card.clone()))
            .await
            .unwrap();
        assert_eq!(sender.payload().unwrap(), &card);
    }

    #[test]
    fn empty_override_is_ignored() {
        let mut sender = ChatWebhookSender::new(resolver(&[]), http_client());
        sender.set_webhook_url("");
        assert!(sender.webhook_url.is_none());
        sender.set_webhook_url("https://example.webhook.office.com/x");
        assert!(format!("{sender:?}").contains("[REDACTED]"));
        assert!(!format!("{sender:?}").contains("example.webhook"));
    }

    #[tokio::test]
    async fn sends_to_configured_url() {
        let server = MockTeamsServer::start().await;
        let url = format!("{}/configured", server.base_url);
        let mut sender = ChatWebhookSender::new(resolver(&[("TEAMS_URL", url.as_str())]), http_client());
        sender.prepare(&Event::new("chat").with_body("hi")).await.unwrap();

        let server_handle = tokio::spawn(async move { server.respond_once(200, "1").await });
        let out = sender.send().await.unwrap();
        let request = server_handle.await.unwrap();

        assert_eq!(out, Some(json!("1")));
        assert!(request.starts_with("POST /configured"));
    }

    #[tokio::test]
    async fn override_url_wins() {
        let server = MockTeamsServer::start().await;
        let url = format!("{}/override", server.base_url);
        let mut sender = ChatWebhookSender::new(
            resolver(&[("TEAMS_URL", "http://127.0.0.1:1/never")]),
            http_client(),
        );
        sender.set_webhook_url(url);
        sender.prepare(&Event::new("chat").with_body("hi")).await.unwrap();

        let server_handle = tokio::spawn(async move { server.respond_once(200, "").await });
        let out = sender.send().await.unwrap();
        let request = server_handle.await.unwrap();

        assert_eq!(out, None);
        assert!(request.starts_with("POST /override"));
    }

    #[tokio::test]
    async fn missing_url_is_config_error() {
        let mut sender = ChatWebhookSender::new(resolver(&[]), http_client());
        sender.prepare(&Event::new("chat").with_body("hi")).await.unwrap();
        let err = sender.send().await.unwrap_err();
        assert!(matches!(err, SenderError::Config(_)));
        assert_eq!(err.kind(), "config_missing");
    }

    #[tokio::test]
    async fn webhook_failure_carries_status_and_body() {
        let server = MockTeamsServer::start().await;
        let mut sender = ChatWebhookSender::new(resolver(&[]), http_client());
        sender.set_webhook_url(server.base_url.clone());
        sender.prepare(&Event::new("chat").with_body("hi")).await.unwrap();

        let server_handle = tokio::spawn(async move { server.respond_once(400, "Bad payload").await });
        let err = sender.send().await.unwrap_err();
        server_handle.await.unwrap();

        assert!(matches!(
            err,
            SenderError::Delivery { status: Some(400), ref body, .. } if body.as_deref() == Some("Bad payload")
        ));
    }

    #[tokio::test]
    async fn send_before_prepare_fails() {
        let sender = ChatWebhookSender::new(resolver(&[]), http_client());
        assert!(matches!(sender.send().await, Err(SenderError::NotPrepared)));
    }
}
