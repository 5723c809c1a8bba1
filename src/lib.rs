//! Library core for mailreceiver.
//!
//! Builds a POP3 or IMAP mail receiver from declarative configuration and
//! manages its lifecycle: the receiver is constructed lazily on first
//! request, cached for the factory's lifetime and disposed once at
//! shutdown. Wire-level protocol I/O is left to the injected
//! collaborators (`TransportSession`, `CredentialsProvider`, ...).

// --- Modules ---
pub mod config;
pub mod factory;
pub mod receiver;

// Re-export key types for convenience (optional, but common)
// CONSOLIDATED PRELUDE
pub mod prelude {
    // Config
    pub use crate::config::ReceiverSettings;

    // Factory / receivers
    pub use crate::factory::MailReceiverFactory;
    pub use crate::receiver::builder::{ReceiverConfig, ReceiverLogger};
    pub use crate::receiver::error::ReceiverError;
    pub use crate::receiver::types::{
        Credentials, CredentialsProvider, HeaderMapper, MessageSelector, ReceiverType,
        SearchCriteria, SearchTermStrategy, TransportSession,
    };
    pub use crate::receiver::{ImapReceiver, MailReceiver, Pop3Receiver};

    // Common Libs
    pub use log::{debug, error, info, trace, warn};
    pub use std::sync::Arc;
    pub use thiserror::Error;
    pub use tokio::sync::Mutex as TokioMutex;
}

#[cfg(test)]
pub mod test_helpers;
