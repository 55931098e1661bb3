use serde::{Deserialize, Serialize};

/// Value of the `@type` field that marks a pre-formatted card.
pub const MESSAGE_CARD_TYPE: &str = "MessageCard";

/// Value of the `@context` field on synthesized cards.
pub const MESSAGE_CARD_CONTEXT: &str = "https://schema.org/extensions";

/// A simple `MessageCard` for Teams incoming webhooks.
///
/// This follows the [Office 365 MessageCard](https://learn.microsoft.com/en-us/outlook/actionable-messages/message-card-reference)
/// format which is the simplest way to send formatted messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageCard {
    /// Card type, always `"MessageCard"`.
    #[serde(rename = "@type")]
    pub card_type: String,

    /// Card context, always the Office 365 connector schema.
    #[serde(rename = "@context")]
    pub context: String,

    /// Summary text (displayed in notifications).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Card title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Card body text (supports basic markdown).
    pub text: String,
}

impl MessageCard {
    /// Create a new message card with the given body text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            card_type: MESSAGE_CARD_TYPE.to_owned(),
            context: MESSAGE_CARD_CONTEXT.to_owned(),
            summary: None,
            title: None,
            text: text.into(),
        }
    }

    /// Set both the title and the notification summary.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        self.summary = Some(subject.clone());
        self.title = Some(subject);
        self
    }

}

/// Whether `value` is already a formatted card (an object whose `@type` is
/// `MessageCard`).
pub fn is_message_card(value: &serde_json::Value) -> bool {
    value
        .get("@type")
        .and_then(serde_json::Value::as_str)
        .is_some_and(|t| t == MESSAGE_CARD_TYPE)
}
