use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use herald_blob::AttachmentStore;
use herald_config::{ConfigResolver, settings};
use herald_core::{Event, MessageType, SenderKind};
use herald_provider::{PreparedSlot, Sender, SenderError};
use serde_json::{Map, Value, json};
use tracing::{debug, info, instrument};

use crate::attachment::AttachmentPolicy;
use crate::client::EmailSmsProvider;
use crate::types::{EmailNotification, SmsNotification};

#[derive(Debug)]
struct PreparedMessage {
    message_type: Option<String>,
    to: Option<String>,
    template_id: Option<String>,
    template_vars: Map<String, Value>,
}

/// Sender for the email and SMS channels.
pub struct EmailSmsSender {
    config: Arc<ConfigResolver>,
    provider: Arc<dyn EmailSmsProvider>,
    attachments: Arc<dyn AttachmentStore>,
    policy: AttachmentPolicy,
    prepared: PreparedSlot<PreparedMessage>,
}

impl std::fmt::Debug for EmailSmsSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailSmsSender")
            .field("policy", &self.policy)
            .field("attachments", &self.attachments.backend_name())
            .field("prepared", &self.prepared.is_filled())
            .finish_non_exhaustive()
    }
}

impl EmailSmsSender {
    pub fn new(
        config: Arc<ConfigResolver>,
        provider: Arc<dyn EmailSmsProvider>,
        attachments: Arc<dyn AttachmentStore>,
    ) -> Self {
        Self {
            config,
            provider,
            attachments,
            policy: AttachmentPolicy::default(),
            prepared: PreparedSlot::new(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: AttachmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Template variables after attachment handling, if prepared.
    pub fn template_vars(&self) -> Option<&Map<String, Value>> {
        self.prepared.get().map(|m| &m.template_vars)
    }

    async fn attach(
        &self,
        encoded: &str,
        filename: Option<&str>,
        vars: &mut Map<String, Value>,
    ) -> Result<(), SenderError> {
        let data = STANDARD
            .decode(encoded)
            .map_err(|e| SenderError::InvalidAttachment(format!("attachment is not valid base64: {e}")))?;

        if self.policy.should_inline(filename, data.len()) {
            debug!(size = data.len(), "inlining attachment as Notify document");
            vars.insert(
                "link_to_document".to_owned(),
                json!({ "file": STANDARD.encode(&data) }),
            );
            return Ok(());
        }

        let filename = filename
            .filter(|name| !name.is_empty())
            .ok_or_else(|| SenderError::InvalidAttachment("attachment has no name".into()))?;
        let locator = self.attachments.upload(Bytes::from(data), filename).await?;
        info!(locator = %locator, backend = self.attachments.backend_name(), "attachment offloaded");
        vars.insert("s3_link".to_owned(), Value::String(locator.into_string()));
        Ok(())
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, SenderError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SenderError::InvalidPayload(format!("event has no '{field}'")))
}

impl Sender for EmailSmsSender {
    fn kind(&self) -> SenderKind {
        SenderKind::EmailSms
    }

    async fn prepare(&mut self, event: &Event) -> Result<(), SenderError> {
        if self.prepared.is_filled() {
            return Err(SenderError::AlreadyPrepared);
        }

        let mut template_vars = event.template_vars.clone().unwrap_or_default();
        if let Some(encoded) = event.attachment.as_deref().filter(|a| !a.is_empty()) {
            self.attach(encoded, event.attachment_name.as_deref(), &mut template_vars)
                .await?;
        }

        self.prepared.fill(PreparedMessage {
            message_type: event.message_type.clone(),
            to: event.to.clone(),
            template_id: event.template_id.clone(),
            template_vars,
        })
    }

    #[instrument(skip_all, fields(sender = "EmailSmsSender"))]
    async fn send(self) -> Result<Option<Value>, SenderError> {
        let message = self.prepared.take()?;
        let raw_type = message.message_type.unwrap_or_default();

        let response = match raw_type.parse::<MessageType>() {
            Ok(MessageType::Email) => {
                let notification = EmailNotification {
                    email_address: required(message.to, "to")?,
                    template_id: required(message.template_id, "template_id")?,
                    personalisation: message.template_vars,
                    email_reply_to_id: Some(self.config.setting(settings::GOV_NOTIFY_REPLY_TO)?),
                };
                self.provider.send_email(&notification).await?
            }
            Ok(MessageType::Sms) => {
                let notification = SmsNotification {
                    phone_number: required(message.to, "to")?,
                    template_id: required(message.template_id, "template_id")?,
                    personalisation: message.template_vars,
                };
                self.provider.send_sms(&notification).await?
            }
            _ => {
                return Err(SenderError::UnsupportedChannel {
                    sender: SenderKind::EmailSms,
                    message_type: raw_type,
                });
            }
        };

        info!(has_response = response.is_some(), "notification accepted");
        Ok(response)
    }
}
