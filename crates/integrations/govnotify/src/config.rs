use std::time::Duration;

use herald_config::{ConfigError, settings};

/// Production Notify API.
pub const DEFAULT_BASE_URL: &str = "https://api.notifications.service.gov.uk";

/// Timeout for each Notify request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const UUID_LEN: usize = 36;

/// A Notify API key split into the parts used for request signing.
///
/// Keys look like `<key name>-<service id>-<secret>`, where the service id
/// and the secret are both 36-character UUIDs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    service_id: String,
    secret: String,
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("service_id", &self.service_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl ApiKey {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        let invalid = |reason: &str| ConfigError::Invalid {
            setting: settings::GOV_NOTIFY_KEY.env_var.to_owned(),
            reason: reason.to_owned(),
        };

        if !raw.is_ascii() {
            return Err(invalid("API key must be ASCII"));
        }
        if raw.len() < 2 * UUID_LEN + 1 {
            return Err(invalid("API key is too short"));
        }

        let secret_start = raw.len() - UUID_LEN;
        let service_start = secret_start - 1 - UUID_LEN;
        if raw.as_bytes()[secret_start - 1] != b'-' {
            return Err(invalid("API key is malformed"));
        }

        Ok(Self {
            service_id: raw[service_start..secret_start - 1].to_owned(),
            secret: raw[secret_start..].to_owned(),
        })
    }

    /// Service id, used as the token issuer.
    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

/// Settings for [`GovNotifyClient`](crate::GovNotifyClient).
#[derive(Debug, Clone)]
pub struct GovNotifyConfig {
    /// Fixed base URL. When `None` the URL is resolved per request from
    /// `GOV_NOTIFY_BASE_URL`, falling back to [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl Default for GovNotifyConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GovNotifyConfig {
    /// Override the API base URL (useful for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
}
