use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};
use tokio::sync::Mutex;

use crate::config::ReceiverSettings;
use crate::receiver::builder::{build_receiver, LogFacade, ReceiverConfig, ReceiverLogger};
use crate::receiver::error::ReceiverError;
use crate::receiver::types::{
    CredentialsProvider, HeaderMapper, MessageSelector, ReceiverType, SearchTermStrategy,
    TransportProperties, TransportSession,
};
use crate::receiver::MailReceiver;

/// Factory producing a single configured [`MailReceiver`].
///
/// Configuration is accumulated through the setters (order-independent, no
/// construction side effects). The receiver is built on the first
/// [`receiver()`](Self::receiver) call and cached for the factory's
/// lifetime; the whole check/build/store sequence runs under one lock so
/// the transition happens exactly once even under concurrent first access.
pub struct MailReceiverFactory {
    config: ReceiverConfig,
    logger: Arc<dyn ReceiverLogger>,
    receiver: Mutex<Option<Arc<MailReceiver>>>,
    disposed: AtomicBool,
}

impl MailReceiverFactory {
    pub fn new() -> Self {
        Self::with_logger(Arc::new(LogFacade))
    }

    /// Injects the warning sink used during the build step.
    pub fn with_logger(logger: Arc<dyn ReceiverLogger>) -> Self {
        Self {
            config: ReceiverConfig::new(),
            logger,
            receiver: Mutex::new(None),
            disposed: AtomicBool::new(false),
        }
    }

    /// Applies the plain-data subset of the configuration from loaded
    /// settings. Capability objects (session, credentials, mappers, ...)
    /// are still wired up through the setters.
    pub fn from_settings(settings: &ReceiverSettings) -> Self {
        let mut factory = Self::new();
        factory.config.store_uri = settings.store_uri.clone();
        factory.config.protocol = settings.protocol.clone();
        if !settings.transport_properties.is_empty() {
            factory.config.transport_properties = Some(settings.transport_properties.clone());
        }
        factory.config.should_delete_messages = settings.should_delete_messages;
        factory.config.should_mark_messages_as_read = settings.should_mark_messages_as_read;
        factory.config.max_fetch_size = settings.max_fetch_size;
        factory.config.user_flag = settings.user_flag.clone();
        factory.config.embedded_parts_as_bytes = settings.embedded_parts_as_bytes;
        factory.config.simple_content = settings.simple_content;
        factory
    }

    // --- Configuration surface ---

    pub fn set_store_uri(&mut self, store_uri: impl Into<String>) {
        self.config.store_uri = Some(store_uri.into());
    }

    pub fn set_protocol(&mut self, protocol: impl Into<String>) {
        self.config.protocol = Some(protocol.into());
    }

    pub fn set_session(&mut self, session: Arc<dyn TransportSession>) {
        self.config.session = Some(session);
    }

    pub fn set_transport_properties(&mut self, properties: TransportProperties) {
        self.config.transport_properties = Some(properties);
    }

    pub fn set_credentials(&mut self, credentials: CredentialsProvider) {
        self.config.credentials = Some(credentials);
    }

    pub fn set_should_delete_messages(&mut self, should_delete: bool) {
        self.config.should_delete_messages = Some(should_delete);
    }

    pub fn set_should_mark_messages_as_read(&mut self, mark_as_read: bool) {
        self.config.should_mark_messages_as_read = Some(mark_as_read);
    }

    pub fn set_max_fetch_size(&mut self, max_fetch_size: u32) {
        self.config.max_fetch_size = max_fetch_size;
    }

    pub fn set_selector(&mut self, selector: MessageSelector) {
        self.config.selector = Some(selector);
    }

    pub fn set_search_term_strategy(&mut self, strategy: Arc<dyn SearchTermStrategy>) {
        self.config.search_term_strategy = Some(strategy);
    }

    pub fn set_user_flag(&mut self, user_flag: impl Into<String>) {
        self.config.user_flag = Some(user_flag.into());
    }

    pub fn set_context(&mut self, context: Arc<dyn Any + Send + Sync>) {
        self.config.context = Some(context);
    }

    pub fn set_header_mapper(&mut self, header_mapper: Arc<dyn HeaderMapper>) {
        self.config.header_mapper = Some(header_mapper);
    }

    pub fn set_embedded_parts_as_bytes(&mut self, embedded_parts_as_bytes: bool) {
        self.config.embedded_parts_as_bytes = Some(embedded_parts_as_bytes);
    }

    pub fn set_simple_content(&mut self, simple_content: bool) {
        self.config.simple_content = Some(simple_content);
    }

    // --- Lifecycle ---

    /// Returns the receiver, building it on the first call.
    ///
    /// A failed build leaves the factory unbuilt; a later call retries
    /// (and fails again deterministically for the same configuration).
    pub async fn receiver(&self) -> Result<Arc<MailReceiver>, ReceiverError> {
        let mut slot = self.receiver.lock().await;
        if let Some(receiver) = slot.as_ref() {
            debug!("Returning cached mail receiver");
            return Ok(Arc::clone(receiver));
        }

        let built = Arc::new(build_receiver(&self.config, self.logger.as_ref())?);
        info!("Built {:?} mail receiver", built.receiver_type());
        *slot = Some(Arc::clone(&built));
        Ok(built)
    }

    /// Concrete variant of the cached receiver, or
    /// [`ReceiverType::Generic`] while unbuilt.
    pub async fn receiver_type(&self) -> ReceiverType {
        let slot = self.receiver.lock().await;
        slot.as_ref()
            .map(|receiver| receiver.receiver_type())
            .unwrap_or(ReceiverType::Generic)
    }

    /// The factory always manages a single shared instance.
    pub fn is_singleton(&self) -> bool {
        true
    }

    /// Disposes the built receiver, at most once.
    ///
    /// A no-op when nothing was built, when the receiver has no attached
    /// session to release, or when teardown already ran. Disposal failures
    /// propagate unmodified.
    pub async fn close(&self) -> Result<(), ReceiverError> {
        if self.disposed.swap(true, Ordering::SeqCst) {
            debug!("Factory already closed");
            return Ok(());
        }
        let slot = self.receiver.lock().await;
        match slot.as_ref() {
            Some(receiver) => {
                info!("Disposing mail receiver");
                receiver.dispose().await
            }
            None => Ok(()),
        }
    }
}

impl Default for MailReceiverFactory {
    fn default() -> Self {
        Self::new()
    }
}
