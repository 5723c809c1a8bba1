//! Shared mocks for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::receiver::builder::ReceiverLogger;
use crate::receiver::error::ReceiverError;
use crate::receiver::types::TransportSession;

/// Warning sink that records every message for later assertions.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    warnings: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().expect("warnings lock poisoned").clone()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.lock().expect("warnings lock poisoned").len()
    }
}

impl ReceiverLogger for RecordingLogger {
    fn warn(&self, message: &str) {
        self.warnings
            .lock()
            .expect("warnings lock poisoned")
            .push(message.to_string());
    }
}

/// Transport session that tracks close calls and can be made to fail.
#[derive(Debug)]
pub struct MockTransportSession {
    close_count: AtomicUsize,
    close_result: Option<ReceiverError>,
}

impl MockTransportSession {
    pub fn new() -> Self {
        Self {
            close_count: AtomicUsize::new(0),
            close_result: None,
        }
    }

    pub fn with_close_result(mut self, result: ReceiverError) -> Self {
        self.close_result = Some(result);
        self
    }

    pub fn close_count(&self) -> usize {
        self.close_count.load(Ordering::SeqCst)
    }
}

impl Default for MockTransportSession {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransportSession for MockTransportSession {
    async fn close(&self) -> Result<(), ReceiverError> {
        self.close_count.fetch_add(1, Ordering::SeqCst);
        match &self.close_result {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
