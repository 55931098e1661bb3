//! GOV.UK Notify sender for Herald.
//!
//! Email and SMS events are sent as
//! [Notify](https://docs.notifications.service.gov.uk/rest-api.html) template
//! notifications. Small PDF attachments are inlined as a Notify document
//! upload; anything else is offloaded to an
//! [`AttachmentStore`](herald_blob::AttachmentStore) and linked from the
//! template.

pub mod attachment;
pub mod client;
pub mod config;
pub mod error;
pub mod sender;
pub mod types;

#[cfg(test)]
mod mock_server;

pub use attachment::AttachmentPolicy;
pub use client::{EmailSmsProvider, GovNotifyClient};
pub use config::{ApiKey, GovNotifyConfig};
pub use error::GovNotifyError;
pub use sender::EmailSmsSender;
pub use types::{EmailNotification, SmsNotification};
