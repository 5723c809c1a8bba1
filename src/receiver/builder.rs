use std::any::Any;
use std::sync::Arc;

use log::warn;

use super::error::ReceiverError;
use super::imap::ImapReceiver;
use super::pop3::Pop3Receiver;
use super::protocol::{resolve_protocol, Protocol};
use super::types::{
    CredentialsProvider, HeaderMapper, MessageSelector, SearchTermStrategy, TransportProperties,
    TransportSession,
};
use super::MailReceiver;

/// Warning sink used by the builder.
///
/// Warnings are advisory (construction still succeeds); injecting the sink
/// keeps the builder free of ambient global state and lets tests assert on
/// what was emitted.
pub trait ReceiverLogger: Send + Sync {
    fn warn(&self, message: &str);
}

/// Default sink forwarding to the `log` facade.
#[derive(Debug, Default, Clone)]
pub struct LogFacade;

impl ReceiverLogger for LogFacade {
    fn warn(&self, message: &str) {
        warn!("{message}");
    }
}

/// Full receiver configuration, accumulated before the first build.
///
/// Tri-state booleans stay `Option<bool>`: `None` means "not configured"
/// and leaves the chosen variant's own default untouched, which is not the
/// same thing as `Some(false)`.
#[derive(Clone)]
pub struct ReceiverConfig {
    pub store_uri: Option<String>,
    pub protocol: Option<String>,
    pub session: Option<Arc<dyn TransportSession>>,
    pub transport_properties: Option<TransportProperties>,
    pub credentials: Option<CredentialsProvider>,
    pub should_delete_messages: Option<bool>,
    pub should_mark_messages_as_read: Option<bool>,
    pub max_fetch_size: u32,
    pub selector: Option<MessageSelector>,
    pub search_term_strategy: Option<Arc<dyn SearchTermStrategy>>,
    pub user_flag: Option<String>,
    pub context: Option<Arc<dyn Any + Send + Sync>>,
    pub header_mapper: Option<Arc<dyn HeaderMapper>>,
    pub embedded_parts_as_bytes: Option<bool>,
    pub simple_content: Option<bool>,
}

impl ReceiverConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            store_uri: None,
            protocol: None,
            session: None,
            transport_properties: None,
            credentials: None,
            should_delete_messages: None,
            should_mark_messages_as_read: None,
            max_fetch_size: 1,
            selector: None,
            search_term_strategy: None,
            user_flag: None,
            context: None,
            header_mapper: None,
            embedded_parts_as_bytes: None,
            simple_content: None,
        }
    }
}

/// Builds and configures the receiver variant matching the resolved
/// protocol, enforcing the cross-option constraints along the way.
///
/// No network I/O happens here; the receiver only starts talking to the
/// server once the host uses it.
pub fn build_receiver(
    config: &ReceiverConfig,
    logger: &dyn ReceiverLogger,
) -> Result<MailReceiver, ReceiverError> {
    let protocol = resolve_protocol(config.store_uri.as_deref(), config.protocol.as_deref())?;
    let kind = Protocol::classify(&protocol)?;

    let mut receiver = match kind {
        Protocol::Pop3 => MailReceiver::Pop3(Pop3Receiver::new(config.store_uri.clone())),
        Protocol::Imap => MailReceiver::Imap(ImapReceiver::new(config.store_uri.clone())),
    };

    if let Some(session) = &config.session {
        if config.transport_properties.is_some() {
            return Err(ReceiverError::config(
                "transport properties are not allowed when a session has been provided",
            ));
        }
        if config.credentials.is_some() {
            return Err(ReceiverError::config(
                "a credentials provider is not allowed when a session has been provided",
            ));
        }
        receiver.set_session(Arc::clone(session));
    }

    if let Some(strategy) = &config.search_term_strategy {
        match &mut receiver {
            MailReceiver::Imap(imap) => imap.set_search_term_strategy(Arc::clone(strategy)),
            MailReceiver::Pop3(_) => {
                return Err(ReceiverError::config(
                    "a search term strategy is only allowed with imap",
                ));
            }
        }
    }

    if let Some(properties) = &config.transport_properties {
        receiver.set_transport_properties(properties.clone());
    }
    if let Some(credentials) = &config.credentials {
        receiver.set_credentials(Arc::clone(credentials));
    }
    if let Some(should_delete) = config.should_delete_messages {
        // Only when configured explicitly; otherwise the variant default
        // stays in effect (delete for POP3, keep for IMAP).
        receiver.set_should_delete_messages(should_delete);
    }
    receiver.set_max_fetch_size(config.max_fetch_size);
    receiver.set_selector(config.selector.clone());
    if let Some(user_flag) = config.user_flag.as_deref().filter(|f| !f.trim().is_empty()) {
        receiver.set_user_flag(user_flag);
    }

    match &mut receiver {
        MailReceiver::Pop3(_) => {
            if config.should_mark_messages_as_read == Some(true) {
                logger.warn("Setting 'should_mark_messages_as_read' to true while using POP3 has no effect");
            }
        }
        MailReceiver::Imap(imap) => {
            imap.set_should_mark_messages_as_read(config.should_mark_messages_as_read);
        }
    }

    if let Some(context) = &config.context {
        receiver.set_context(Arc::clone(context));
    }
    if let Some(header_mapper) = &config.header_mapper {
        receiver.set_header_mapper(Arc::clone(header_mapper));
    }
    if let Some(embedded_parts_as_bytes) = config.embedded_parts_as_bytes {
        receiver.set_embedded_parts_as_bytes(embedded_parts_as_bytes);
    }
    if let Some(simple_content) = config.simple_content {
        receiver.set_simple_content(simple_content);
    }

    receiver.finalize()?;
    Ok(receiver)
}
