use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The channel a message should be delivered over.
///
/// Parsed from the raw `message_type` string of an [`Event`](crate::Event).
/// Parsing is case-insensitive and accepts `teams` as an alias of `chat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Email,
    Sms,
    #[serde(alias = "teams")]
    Chat,
    /// Postal letter. Recognized, but no built-in sender delivers it.
    Letter,
}

impl MessageType {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Chat => "chat",
            Self::Letter => "letter",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known [`MessageType`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown message type '{0}'")]
pub struct ParseMessageTypeError(pub String);

impl FromStr for MessageType {
    type Err = ParseMessageTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            "chat" | "teams" => Ok(Self::Chat),
            "letter" => Ok(Self::Letter),
            _ => Err(ParseMessageTypeError(s.to_owned())),
        }
    }
}

/// The sender variant a message type is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SenderKind {
    /// Email and SMS through the transactional notification provider.
    EmailSms,
    /// Message cards posted to a chat incoming webhook.
    ChatWebhook,
}

impl SenderKind {
    /// Name used in logs and in the "no response" fallback message.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmailSms => "EmailSmsSender",
            Self::ChatWebhook => "ChatWebhookSender",
        }
    }
}

impl fmt::Display for SenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_types() {
        assert_eq!("email".parse::<MessageType>().unwrap(), MessageType::Email);
        assert_eq!("SMS".parse::<MessageType>().unwrap(), MessageType::Sms);
        assert_eq!("chat".parse::<MessageType>().unwrap(), MessageType::Chat);
        assert_eq!(" letter ".parse::<MessageType>().unwrap(), MessageType::Letter);
    }

    #[test]
    fn teams_is_an_alias_of_chat() {
        assert_eq!("teams".parse::<MessageType>().unwrap(), MessageType::Chat);
        let parsed: MessageType = serde_json::from_str("\"teams\"").unwrap();
        assert_eq!(parsed, MessageType::Chat);
    }

    #[test]
    fn rejects_unknown_type() {
        let err = "invalid".parse::<MessageType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown message type 'invalid'");
    }

    #[test]
    fn sender_kind_names() {
        assert_eq!(SenderKind::EmailSms.to_string(), "EmailSmsSender");
        assert_eq!(SenderKind::ChatWebhook.to_string(), "ChatWebhookSender");
    }
}
