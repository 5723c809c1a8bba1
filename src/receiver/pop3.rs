use super::ReceiverCore;

/// Receiver for the POP3 family of protocols ("pop3", "pop3s").
///
/// POP3 has no server-side message flags, so retrieved messages are
/// deleted from the server by default; hosts that want to leave mail in
/// place must configure the delete flag explicitly.
pub struct Pop3Receiver {
    pub(crate) core: ReceiverCore,
}

impl Pop3Receiver {
    pub fn new(store_uri: Option<String>) -> Self {
        Self {
            core: ReceiverCore::new(store_uri, true),
        }
    }
}
