use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, error, instrument, warn};

use crate::config::RetryPolicy;
use crate::error::TeamsError;

/// Posts JSON payloads to a chat webhook.
#[async_trait]
pub trait WebhookClient: Send + Sync {
    /// POST `payload` to `url`, returning the response body text on success.
    async fn post_json(&self, url: &str, payload: &serde_json::Value) -> Result<String, TeamsError>;
}

/// [`WebhookClient`] backed by `reqwest`, retrying transient failures
/// according to a [`RetryPolicy`].
pub struct HttpWebhookClient {
    client: Client,
    policy: RetryPolicy,
}

impl std::fmt::Debug for HttpWebhookClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpWebhookClient")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl HttpWebhookClient {
    /// Create a client that does not follow redirects.
    pub fn new(policy: RetryPolicy) -> Result<Self, TeamsError> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client, policy })
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    async fn attempt(&self, url: &Url, payload: &serde_json::Value) -> Result<String, TeamsError> {
        let response = self
            .client
            .post(url.clone())
            .timeout(self.policy.timeout)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TeamsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        // The webhook has accepted the post by now; a failed body read must
        // not turn into a retry.
        match response.text().await {
            Ok(body) => Ok(body),
            Err(err) => {
                warn!(status = status.as_u16(), error = %err, "could not read chat webhook response body");
                Ok(String::new())
            }
        }
    }
}

fn is_retryable(err: &TeamsError) -> bool {
    match err {
        TeamsError::Http(_) => true,
        TeamsError::Api { status, .. } => matches!(
            StatusCode::from_u16(*status),
            Ok(StatusCode::TOO_MANY_REQUESTS
                | StatusCode::INTERNAL_SERVER_ERROR
                | StatusCode::BAD_GATEWAY
                | StatusCode::SERVICE_UNAVAILABLE
                | StatusCode::GATEWAY_TIMEOUT)
        ),
        TeamsError::InvalidUrl(_) | TeamsError::InvalidPayload(_) => false,
    }
}

#[async_trait]
impl WebhookClient for HttpWebhookClient {
    #[instrument(skip_all, fields(host = tracing::field::Empty))]
    async fn post_json(&self, url: &str, payload: &serde_json::Value) -> Result<String, TeamsError> {
        let url = Url::parse(url).map_err(|e| TeamsError::InvalidUrl(e.to_string()))?;
        tracing::Span::current().record("host", url.host_str().unwrap_or_default());

        let max_retries = self.policy.retries_for(&url);
        let mut attempt = 0;

        loop {
            debug!(attempt, "posting to chat webhook");
            let err = match self.attempt(&url, payload).await {
                Ok(body) => return Ok(body),
                Err(err) => err,
            };

            if !is_retryable(&err) || attempt >= max_retries {
                match &err {
                    TeamsError::Api { status, body } => error!(
                        attempt,
                        status,
                        request = %payload,
                        response = %body,
                        "chat webhook request failed"
                    ),
                    _ => error!(attempt, request = %payload, error = %err, "chat webhook request failed"),
                }
                return Err(err);
            }

            let delay = self.policy.strategy.delay_for(attempt);
            warn!(attempt, ?delay, error = %err, "retrying chat webhook request");
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
