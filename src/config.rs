use config::{Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Plain-data subset of the receiver configuration, loadable from a file
/// and environment overrides.
///
/// Capability objects (pre-built session, credentials provider, selector,
/// search term strategy, header mapper) cannot come from declarative
/// sources and are wired up on the factory directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverSettings {
    pub store_uri: Option<String>,
    pub protocol: Option<String>,
    pub transport_properties: HashMap<String, String>,
    pub should_delete_messages: Option<bool>,
    pub should_mark_messages_as_read: Option<bool>,
    pub max_fetch_size: u32,
    pub user_flag: Option<String>,
    pub embedded_parts_as_bytes: Option<bool>,
    pub simple_content: Option<bool>,
}

impl ReceiverSettings {
    pub fn new(config_path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut config_builder = config::Config::builder()
            // Defaults
            .set_default("max_fetch_size", 1)?;

        // Add configuration from file
        if let Some(path) = config_path {
            config_builder = config_builder.add_source(File::with_name(path));
        }

        // Add environment variables with prefix
        // e.g. `MAILRECEIVER_STORE_URI=...` would override `store_uri`.
        // Double underscore as separator so flat keys containing '_' survive.
        config_builder = config_builder.add_source(
            Environment::with_prefix("MAILRECEIVER")
                .separator("__")
                .ignore_empty(true),
        );

        // Build the config and deserialize it into ReceiverSettings
        config_builder.build()?.try_deserialize()
    }
}

impl Default for ReceiverSettings {
    fn default() -> Self {
        Self {
            store_uri: None,
            protocol: None,
            transport_properties: HashMap::new(),
            should_delete_messages: None,
            should_mark_messages_as_read: None,
            max_fetch_size: 1,
            user_flag: None,
            embedded_parts_as_bytes: None,
            simple_content: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load or parse configuration: {0}")]
    LoadError(#[from] config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_leave_tristates_unset() {
        let settings = ReceiverSettings::new(None).unwrap();
        assert_eq!(settings.max_fetch_size, 1);
        assert!(settings.store_uri.is_none());
        assert!(settings.should_delete_messages.is_none());
        assert!(settings.should_mark_messages_as_read.is_none());
        assert!(settings.transport_properties.is_empty());
    }

    #[test]
    fn loads_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receiver.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
store_uri = "imap://user@host/INBOX"
max_fetch_size = 25
should_delete_messages = false
user_flag = "processed"

[transport_properties]
"mail.imap.timeout" = "5000"
"#
        )
        .unwrap();

        let settings = ReceiverSettings::new(path.to_str()).unwrap();
        assert_eq!(settings.store_uri.as_deref(), Some("imap://user@host/INBOX"));
        assert_eq!(settings.max_fetch_size, 25);
        assert_eq!(settings.should_delete_messages, Some(false));
        assert_eq!(settings.user_flag.as_deref(), Some("processed"));
        assert_eq!(
            settings.transport_properties.get("mail.imap.timeout"),
            Some(&"5000".to_string())
        );
        // Not mentioned in the file, stays unset
        assert!(settings.should_mark_messages_as_read.is_none());
    }
}
