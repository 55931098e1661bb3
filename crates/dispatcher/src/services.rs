use std::sync::Arc;

use herald_blob::AttachmentStore;
use herald_config::ConfigResolver;
use herald_govnotify::{AttachmentPolicy, EmailSmsProvider, EmailSmsSender};
use herald_teams::{ChatWebhookSender, WebhookClient};

/// Shared dependencies from which a fresh sender is built for every event.
#[derive(Clone)]
pub struct SenderServices {
    pub config: Arc<ConfigResolver>,
    pub notify: Arc<dyn EmailSmsProvider>,
    pub webhook: Arc<dyn WebhookClient>,
    pub attachments: Arc<dyn AttachmentStore>,
    pub attachment_policy: AttachmentPolicy,
}

impl std::fmt::Debug for SenderServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SenderServices")
            .field("config", &self.config)
            .field("attachments", &self.attachments.backend_name())
            .field("attachment_policy", &self.attachment_policy)
            .finish_non_exhaustive()
    }
}

impl SenderServices {
    pub fn new(
        config: Arc<ConfigResolver>,
        notify: Arc<dyn EmailSmsProvider>,
        webhook: Arc<dyn WebhookClient>,
        attachments: Arc<dyn AttachmentStore>,
    ) -> Self {
        Self {
            config,
            notify,
            webhook,
            attachments,
            attachment_policy: AttachmentPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_attachment_policy(mut self, policy: AttachmentPolicy) -> Self {
        self.attachment_policy = policy;
        self
    }

    pub(crate) fn email_sms_sender(&self) -> EmailSmsSender {
        EmailSmsSender::new(
            Arc::clone(&self.config),
            Arc::clone(&self.notify),
            Arc::clone(&self.attachments),
        )
        .with_policy(self.attachment_policy.clone())
    }

    pub(crate) fn chat_sender(&self) -> ChatWebhookSender {
        ChatWebhookSender::new(Arc::clone(&self.config), Arc::clone(&self.webhook))
    }
}
