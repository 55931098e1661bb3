use serde::{Deserialize, Serialize};

use crate::types::{MessageType, ParseMessageTypeError};

/// A single notification request handed to the dispatcher.
///
/// Every field is optional at the wire level: the dispatcher and the selected
/// sender decide which ones are required for the channel at hand. Unknown
/// fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Raw message type (`email`, `sms`, `chat`, ...). Kept as a string so an
    /// unrecognized value surfaces as a routing failure rather than a
    /// deserialization error.
    #[serde(default)]
    pub message_type: Option<String>,

    /// Recipient: email address, phone number, or channel identifier.
    #[serde(default)]
    pub to: Option<String>,

    /// Subject line. Used as the card title and summary for chat messages.
    #[serde(default)]
    pub subject: Option<String>,

    /// Message body. Either plain text or a structured payload such as a
    /// pre-formatted message card.
    #[serde(default)]
    pub body: Option<serde_json::Value>,

    /// Provider template identifier.
    #[serde(default)]
    pub template_id: Option<String>,

    /// Template personalisation variables.
    #[serde(default)]
    pub template_vars: Option<serde_json::Map<String, serde_json::Value>>,

    /// Base64-encoded attachment bytes.
    #[serde(default)]
    pub attachment: Option<String>,

    /// Attachment filename.
    #[serde(default)]
    pub attachment_name: Option<String>,

    /// Per-event chat webhook URL override.
    #[serde(default)]
    pub webhook_url: Option<String>,
}

impl Event {
    /// Create an event with only the message type set.
    #[must_use]
    pub fn new(message_type: impl Into<String>) -> Self {
        Self {
            message_type: Some(message_type.into()),
            ..Self::default()
        }
    }

    /// Parse the raw message type.
    ///
    /// Returns `None` when the event carries no message type at all.
    pub fn parsed_message_type(&self) -> Option<Result<MessageType, ParseMessageTypeError>> {
        self.message_type.as_deref().map(str::parse)
    }

    #[must_use]
    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn with_template(
        mut self,
        template_id: impl Into<String>,
        vars: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        self.template_id = Some(template_id.into());
        self.template_vars = Some(vars);
        self
    }

    /// Attach a base64-encoded file.
    #[must_use]
    pub fn with_attachment(mut self, data_base64: impl Into<String>, name: impl Into<String>) -> Self {
        self.attachment = Some(data_base64.into());
        self.attachment_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }
}
