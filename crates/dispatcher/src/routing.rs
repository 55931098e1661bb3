use std::collections::HashMap;

use herald_core::{MessageType, SenderKind};

/// Maps message types to the sender variant that delivers them.
///
/// # Examples
///
/// ```
/// use herald_core::{MessageType, SenderKind};
/// use herald_dispatcher::RoutingTable;
///
/// let table = RoutingTable::default();
/// assert_eq!(table.route(MessageType::Sms), Some(SenderKind::EmailSms));
/// assert_eq!(table.route(MessageType::Letter), None);
///
/// let table = table.with_route(MessageType::Letter, SenderKind::EmailSms);
/// assert_eq!(table.route(MessageType::Letter), Some(SenderKind::EmailSms));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    routes: HashMap<MessageType, SenderKind>,
}

impl Default for RoutingTable {
    /// `email` and `sms` go to the email/SMS sender, `chat` to the chat
    /// webhook sender.
    fn default() -> Self {
        Self::empty()
            .with_route(MessageType::Email, SenderKind::EmailSms)
            .with_route(MessageType::Sms, SenderKind::EmailSms)
            .with_route(MessageType::Chat, SenderKind::ChatWebhook)
    }
}

impl RoutingTable {
    /// A table with no routes.
    pub fn empty() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Add or replace a route.
    #[must_use]
    pub fn with_route(mut self, message_type: MessageType, sender: SenderKind) -> Self {
        self.routes.insert(message_type, sender);
        self
    }

    pub fn route(&self, message_type: MessageType) -> Option<SenderKind> {
        self.routes.get(&message_type).copied()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
