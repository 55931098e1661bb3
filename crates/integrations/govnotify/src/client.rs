use std::sync::Arc;

use async_trait::async_trait;
use herald_config::{ConfigResolver, settings};
use jsonwebtoken::{EncodingKey, Header, encode};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::{ApiKey, DEFAULT_BASE_URL, GovNotifyConfig};
use crate::error::GovNotifyError;
use crate::types::{Claims, EmailNotification, SmsNotification};

/// Sends template notifications by email and SMS.
#[async_trait]
pub trait EmailSmsProvider: Send + Sync {
    /// Returns the provider's response data, or `None` when it sent none.
    async fn send_email(
        &self,
        notification: &EmailNotification,
    ) -> Result<Option<serde_json::Value>, GovNotifyError>;

    async fn send_sms(
        &self,
        notification: &SmsNotification,
    ) -> Result<Option<serde_json::Value>, GovNotifyError>;
}

/// [`EmailSmsProvider`] for the GOV.UK Notify REST API.
///
/// The API key is resolved on every request, so rotating `GOV_NOTIFY_KEY`
/// takes effect without rebuilding the client.
pub struct GovNotifyClient {
    config: GovNotifyConfig,
    resolver: Arc<ConfigResolver>,
    client: Client,
}

impl std::fmt::Debug for GovNotifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GovNotifyClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GovNotifyClient {
    pub fn new(config: GovNotifyConfig, resolver: Arc<ConfigResolver>) -> Result<Self, GovNotifyError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            config,
            resolver,
            client,
        })
    }

    fn base_url(&self) -> Result<String, GovNotifyError> {
        let base = match &self.config.base_url {
            Some(url) => url.clone(),
            None => self
                .resolver
                .optional_setting(settings::GOV_NOTIFY_BASE_URL)?
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        };
        Ok(base.trim_end_matches('/').to_owned())
    }

    fn bearer_token(&self) -> Result<String, GovNotifyError> {
        let key = ApiKey::parse(&self.resolver.setting(settings::GOV_NOTIFY_KEY)?)?;
        sign_token(&key, jsonwebtoken::get_current_timestamp())
    }

    async fn post<T: Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Option<serde_json::Value>, GovNotifyError> {
        let url = format!("{}{path}", self.base_url()?);
        let token = self.bearer_token()?;

        debug!(url = %url, "posting notification to Notify");

        let request = serde_json::to_string(body).unwrap_or_default();
        let response = match self.client.post(&url).bearer_auth(token).json(body).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(url = %url, request = %request, error = %err, "Notify request failed");
                return Err(err.into());
            }
        };

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                request = %request,
                response = %text,
                "Notify rejected notification"
            );
            return Err(GovNotifyError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| GovNotifyError::InvalidResponse(format!("{e}: {text}")))
    }
}

/// Sign the HS256 bearer token Notify expects.
pub(crate) fn sign_token(key: &ApiKey, issued_at: u64) -> Result<String, GovNotifyError> {
    let claims = Claims {
        iss: key.service_id().to_owned(),
        iat: issued_at,
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(key.secret().as_bytes()),
    )?)
}

#[async_trait]
impl EmailSmsProvider for GovNotifyClient {
    #[instrument(skip_all, fields(template_id = %notification.template_id))]
    async fn send_email(
        &self,
        notification: &EmailNotification,
    ) -> Result<Option<serde_json::Value>, GovNotifyError> {
        self.post("/v2/notifications/email", notification).await
    }

    #[instrument(skip_all, fields(template_id = %notification.template_id))]
    async fn send_sms(
        &self,
        notification: &SmsNotification,
    ) -> Result<Option<serde_json::Value>, GovNotifyError> {
        self.post("/v2/notifications/sms", notification).await
    }
}
