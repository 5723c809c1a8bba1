use thiserror::Error;
use url;

#[derive(Debug, Error, Clone)]
pub enum ReceiverError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid store URI '{uri}': {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Session error: {0}")]
    Session(String),
}

impl ReceiverError {
    /// Shorthand used throughout the builder for constraint violations.
    pub(crate) fn config(message: impl Into<String>) -> Self {
        ReceiverError::Configuration(message.into())
    }
}
