//! The message panel: an append-only list of human readable status lines.

use std::sync::{Mutex, PoisonError};

/// Sink for operation-tagged status messages. Appending never fails and
/// returns nothing.
pub trait MessageLog: Send + Sync {
    fn append(&self, message: String);
}

/// In-memory [`MessageLog`] keeping every message in insertion order.
#[derive(Debug, Default)]
pub struct MessageService {
    messages: Mutex<Vec<String>>,
}

impl MessageService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl MessageLog for MessageService {
    fn append(&self, message: String) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
    }
}
