// Publicly export key modules and types
pub mod builder;
pub mod error;
pub mod imap;
pub mod pop3;
pub mod protocol;
pub mod types;

pub use self::error::ReceiverError;
pub use self::imap::ImapReceiver;
pub use self::pop3::Pop3Receiver;

use std::any::Any;
use std::sync::Arc;

use log::debug;
use url::Url;

use self::types::{
    CredentialsProvider, HeaderMapper, MessageSelector, ReceiverType, TransportProperties,
    TransportSession,
};

/// Option state shared by both receiver variants.
///
/// The builder writes into this through the [`MailReceiver`] delegation
/// methods; the transport layer reads it once the receiver is in use.
#[derive(Default)]
pub(crate) struct ReceiverCore {
    pub(crate) store_uri: Option<String>,
    pub(crate) url: Option<Url>,
    pub(crate) session: Option<Arc<dyn TransportSession>>,
    pub(crate) transport_properties: TransportProperties,
    pub(crate) credentials: Option<CredentialsProvider>,
    pub(crate) should_delete_messages: bool,
    pub(crate) max_fetch_size: u32,
    pub(crate) selector: Option<MessageSelector>,
    pub(crate) user_flag: Option<String>,
    pub(crate) context: Option<Arc<dyn Any + Send + Sync>>,
    pub(crate) header_mapper: Option<Arc<dyn HeaderMapper>>,
    pub(crate) embedded_parts_as_bytes: bool,
    pub(crate) simple_content: bool,
    pub(crate) finalized: bool,
}

impl ReceiverCore {
    fn new(store_uri: Option<String>, should_delete_messages: bool) -> Self {
        Self {
            store_uri,
            should_delete_messages,
            max_fetch_size: 1,
            embedded_parts_as_bytes: true,
            simple_content: false,
            ..Self::default()
        }
    }

    /// Validates the accumulated state, in particular the store URI.
    fn finalize(&mut self) -> Result<(), ReceiverError> {
        if let Some(uri) = &self.store_uri {
            let parsed = Url::parse(uri).map_err(|source| ReceiverError::InvalidUri {
                uri: uri.clone(),
                source,
            })?;
            debug!("Store URI validated: {}://{}", parsed.scheme(), parsed.host_str().unwrap_or(""));
            self.url = Some(parsed);
        }
        self.finalized = true;
        Ok(())
    }

    async fn dispose(&self) -> Result<(), ReceiverError> {
        match &self.session {
            Some(session) => {
                debug!("Closing transport session");
                session.close().await
            }
            // Nothing was attached, nothing to release.
            None => Ok(()),
        }
    }
}

/// A configured mail receiver, one of the two supported protocol variants.
///
/// The shared option surface is delegated to the variant's core; options
/// that only one variant accepts (search term strategy, mark-as-read) live
/// on [`ImapReceiver`] and are guarded at the builder boundary.
pub enum MailReceiver {
    Pop3(Pop3Receiver),
    Imap(ImapReceiver),
}

impl std::fmt::Debug for MailReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MailReceiver::Pop3(_) => f.write_str("MailReceiver::Pop3"),
            MailReceiver::Imap(_) => f.write_str("MailReceiver::Imap"),
        }
    }
}

impl MailReceiver {
    fn core(&self) -> &ReceiverCore {
        match self {
            MailReceiver::Pop3(receiver) => &receiver.core,
            MailReceiver::Imap(receiver) => &receiver.core,
        }
    }

    fn core_mut(&mut self) -> &mut ReceiverCore {
        match self {
            MailReceiver::Pop3(receiver) => &mut receiver.core,
            MailReceiver::Imap(receiver) => &mut receiver.core,
        }
    }

    pub fn receiver_type(&self) -> ReceiverType {
        match self {
            MailReceiver::Pop3(_) => ReceiverType::Pop3,
            MailReceiver::Imap(_) => ReceiverType::Imap,
        }
    }

    pub fn store_uri(&self) -> Option<&str> {
        self.core().store_uri.as_deref()
    }

    /// Parsed form of the store URI, available after `finalize()`.
    pub fn url(&self) -> Option<&Url> {
        self.core().url.as_ref()
    }

    pub fn set_session(&mut self, session: Arc<dyn TransportSession>) {
        self.core_mut().session = Some(session);
    }

    pub fn has_session(&self) -> bool {
        self.core().session.is_some()
    }

    pub fn set_transport_properties(&mut self, properties: TransportProperties) {
        self.core_mut().transport_properties = properties;
    }

    pub fn transport_properties(&self) -> &TransportProperties {
        &self.core().transport_properties
    }

    pub fn set_credentials(&mut self, credentials: CredentialsProvider) {
        self.core_mut().credentials = Some(credentials);
    }

    pub fn has_credentials(&self) -> bool {
        self.core().credentials.is_some()
    }

    pub fn set_should_delete_messages(&mut self, should_delete: bool) {
        self.core_mut().should_delete_messages = should_delete;
    }

    pub fn should_delete_messages(&self) -> bool {
        self.core().should_delete_messages
    }

    pub fn set_max_fetch_size(&mut self, max_fetch_size: u32) {
        self.core_mut().max_fetch_size = max_fetch_size;
    }

    pub fn max_fetch_size(&self) -> u32 {
        self.core().max_fetch_size
    }

    pub fn set_selector(&mut self, selector: Option<MessageSelector>) {
        self.core_mut().selector = selector;
    }

    pub fn selector(&self) -> Option<&MessageSelector> {
        self.core().selector.as_ref()
    }

    pub fn set_user_flag(&mut self, user_flag: impl Into<String>) {
        self.core_mut().user_flag = Some(user_flag.into());
    }

    pub fn user_flag(&self) -> Option<&str> {
        self.core().user_flag.as_deref()
    }

    pub fn set_context(&mut self, context: Arc<dyn Any + Send + Sync>) {
        self.core_mut().context = Some(context);
    }

    pub fn set_header_mapper(&mut self, header_mapper: Arc<dyn HeaderMapper>) {
        self.core_mut().header_mapper = Some(header_mapper);
    }

    pub fn header_mapper(&self) -> Option<&Arc<dyn HeaderMapper>> {
        self.core().header_mapper.as_ref()
    }

    pub fn set_embedded_parts_as_bytes(&mut self, embedded_parts_as_bytes: bool) {
        self.core_mut().embedded_parts_as_bytes = embedded_parts_as_bytes;
    }

    pub fn set_simple_content(&mut self, simple_content: bool) {
        self.core_mut().simple_content = simple_content;
    }

    /// Final configuration step; fails on a malformed store URI.
    pub fn finalize(&mut self) -> Result<(), ReceiverError> {
        self.core_mut().finalize()
    }

    /// Releases the attached transport session, if any.
    ///
    /// A receiver built without a session has nothing to release, so this
    /// is a no-op for it.
    pub async fn dispose(&self) -> Result<(), ReceiverError> {
        self.core().dispose().await
    }
}
