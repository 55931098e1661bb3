use std::sync::Arc;

use herald_aws::{S3AttachmentStore, S3StoreConfig};
use herald_blob::{AttachmentStore, MemoryAttachmentStore};
use herald_config::{ConfigResolver, settings};
use herald_dispatcher::SenderServices;
use herald_govnotify::{GovNotifyClient, GovNotifyConfig};
use herald_teams::{HttpWebhookClient, RetryPolicy};
use tracing::info;

use crate::AttachmentBackend;

/// Build the production services: Notify, the Teams webhook client, and the
/// chosen attachment store.
pub async fn build(
    config: Arc<ConfigResolver>,
    backend: AttachmentBackend,
) -> anyhow::Result<SenderServices> {
    let notify = GovNotifyClient::new(GovNotifyConfig::default(), Arc::clone(&config))?;
    let webhook = HttpWebhookClient::new(RetryPolicy::default())?;

    let attachments: Arc<dyn AttachmentStore> = match backend {
        AttachmentBackend::S3 => {
            let region = config
                .optional_setting(settings::AWS_REGION)?
                .unwrap_or_else(|| herald_aws::config::DEFAULT_REGION.to_owned());
            info!(region = %region, "using S3 attachment store");
            Arc::new(S3AttachmentStore::new(S3StoreConfig::new(region), Arc::clone(&config)).await)
        }
        AttachmentBackend::Memory => {
            info!("using in-memory attachment store");
            Arc::new(MemoryAttachmentStore::new())
        }
    };

    Ok(SenderServices::new(
        config,
        Arc::new(notify),
        Arc::new(webhook),
        attachments,
    ))
}
