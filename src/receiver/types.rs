use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use mail_parser::Message;
use serde::{Deserialize, Serialize};

use super::error::ReceiverError;

/// Username/password pair produced by a [`CredentialsProvider`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Callback supplying credentials on demand.
///
/// The factory never stores credentials itself; the provider is invoked by
/// the transport layer whenever it needs to authenticate.
pub type CredentialsProvider = Arc<dyn Fn() -> Credentials + Send + Sync>;

/// Predicate applied to each candidate message to decide inclusion.
pub type MessageSelector = Arc<dyn Fn(&Message) -> bool + Send + Sync>;

/// Key/value settings handed to the underlying transport.
pub type TransportProperties = HashMap<String, String>;

/// Concrete receiver kind, as reported by the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiverType {
    /// The factory has not built a receiver yet.
    Generic,
    Pop3,
    Imap,
}

/// Protocol-native search predicate built by a [`SearchTermStrategy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriteria {
    All,
    Unseen,
    Flagged(String),
    Unflagged(String),
    And(Vec<SearchCriteria>),
    Or(Vec<SearchCriteria>),
    Not(Box<SearchCriteria>),
}

/// Pluggable builder of protocol-native search predicates (IMAP only).
pub trait SearchTermStrategy: Send + Sync {
    /// Generates the search term used to pick up new messages, given the
    /// flags the selected mailbox supports.
    fn generate_search_term(&self, supported_flags: &[String]) -> SearchCriteria;
}

/// Converts protocol-native message headers into the generic header
/// representation used downstream.
pub trait HeaderMapper: Send + Sync {
    fn map_headers(&self, message: &Message) -> HashMap<String, String>;
}

/// Header mapper that copies every raw header through verbatim.
#[derive(Debug, Default, Clone)]
pub struct DefaultHeaderMapper;

impl HeaderMapper for DefaultHeaderMapper {
    fn map_headers(&self, message: &Message) -> HashMap<String, String> {
        message
            .headers_raw()
            .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            .collect()
    }
}

/// Pre-built transport session handed in by the host.
///
/// This is also the receiver's disposal capability: a receiver without an
/// attached session has nothing to release at teardown.
#[async_trait]
pub trait TransportSession: Send + Sync + fmt::Debug {
    async fn close(&self) -> Result<(), ReceiverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_header_mapper_copies_raw_headers() {
        let raw = concat!(
            "From: sender@example.com\r\n",
            "To: recipient@example.com\r\n",
            "Subject: Hello\r\n",
            "\r\n",
            "Body\r\n",
        );
        let message = Message::parse(raw.as_bytes()).expect("parseable message");

        let headers = DefaultHeaderMapper.map_headers(&message);
        assert_eq!(headers.get("Subject").map(String::as_str), Some("Hello"));
        assert_eq!(
            headers.get("From").map(String::as_str),
            Some("sender@example.com")
        );
    }
}
