use serde::{Deserialize, Serialize};

use crate::types::SenderKind;

/// Normalized result of a successful dispatch.
///
/// Serializes as `{"response": <provider data>}`. A response only ever exists
/// for a delivery that succeeded; failures travel as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchResponse {
    /// Raw provider data, or a fallback message when the provider returned
    /// nothing.
    pub response: serde_json::Value,
}

impl DispatchResponse {
    /// Build a response from whatever the sender returned.
    ///
    /// `null`, empty strings, empty objects and empty arrays count as "no
    /// response" and are replaced by a message naming the sender.
    #[must_use]
    pub fn from_provider(data: Option<serde_json::Value>, sender: SenderKind) -> Self {
        match data {
            Some(value) if !is_empty(&value) => Self { response: value },
            _ => Self::no_response(sender),
        }
    }

    /// The fallback used when the provider call succeeded without a payload.
    #[must_use]
    pub fn no_response(sender: SenderKind) -> Self {
        Self {
            response: serde_json::Value::String(format!(
                "Success but no response from sender: {sender}"
            )),
        }
    }
}

fn is_empty(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Array(a) => a.is_empty(),
        serde_json::Value::Object(o) => o.is_empty(),
        serde_json::Value::Bool(_) | serde_json::Value::Number(_) => false,
    }
}
