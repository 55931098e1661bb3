//! Microsoft Teams chat sender for Herald.
//!
//! Events routed to the chat channel are turned into an
//! [Office 365 `MessageCard`](https://learn.microsoft.com/en-us/outlook/actionable-messages/message-card-reference)
//! and posted to a
//! [Teams incoming webhook](https://learn.microsoft.com/en-us/microsoftteams/platform/webhooks-and-connectors/how-to/add-incoming-webhook).
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use herald_config::ConfigResolver;
//! use herald_teams::{ChatWebhookSender, HttpWebhookClient, RetryPolicy};
//!
//! let client = HttpWebhookClient::new(RetryPolicy::default()).unwrap();
//! let mut sender = ChatWebhookSender::new(Arc::new(ConfigResolver::empty()), Arc::new(client));
//! sender.set_webhook_url("https://example.webhook.office.com/webhookb2/...");
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod sender;
pub mod types;

#[cfg(test)]
mod mock_server;

pub use client::{HttpWebhookClient, WebhookClient};
pub use config::{RetryPolicy, RetryStrategy};
pub use error::TeamsError;
pub use sender::ChatWebhookSender;
pub use types::{MessageCard, is_message_card};
