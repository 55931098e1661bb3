use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON body of `POST /v2/notifications/email`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailNotification {
    pub email_address: String,
    pub template_id: String,
    pub personalisation: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_reply_to_id: Option<String>,
}

/// JSON body of `POST /v2/notifications/sms`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmsNotification {
    pub phone_number: String,
    pub template_id: String,
    pub personalisation: Map<String, Value>,
}

/// Claims of the per-request bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Service id.
    pub iss: String,
    /// Issued-at (seconds since epoch).
    pub iat: u64,
}
