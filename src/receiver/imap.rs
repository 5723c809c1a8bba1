use std::sync::Arc;

use super::types::SearchTermStrategy;
use super::ReceiverCore;

/// Receiver for the IMAP family of protocols ("imap", "imaps").
///
/// IMAP keeps flags on the server, so messages are left in place by
/// default and can instead be marked as read after retrieval.
pub struct ImapReceiver {
    pub(crate) core: ReceiverCore,
    search_term_strategy: Option<Arc<dyn SearchTermStrategy>>,
    /// Tri-state: `None` leaves the decision to the transport layer.
    should_mark_messages_as_read: Option<bool>,
}

impl ImapReceiver {
    pub fn new(store_uri: Option<String>) -> Self {
        Self {
            core: ReceiverCore::new(store_uri, false),
            search_term_strategy: None,
            should_mark_messages_as_read: None,
        }
    }

    pub fn set_search_term_strategy(&mut self, strategy: Arc<dyn SearchTermStrategy>) {
        self.search_term_strategy = Some(strategy);
    }

    pub fn search_term_strategy(&self) -> Option<&Arc<dyn SearchTermStrategy>> {
        self.search_term_strategy.as_ref()
    }

    /// The tri-state is passed through as-is, including "unset".
    pub fn set_should_mark_messages_as_read(&mut self, mark_as_read: Option<bool>) {
        self.should_mark_messages_as_read = mark_as_read;
    }

    pub fn should_mark_messages_as_read(&self) -> Option<bool> {
        self.should_mark_messages_as_read
    }
}
