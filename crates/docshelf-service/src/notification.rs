//! Notification sinks.

use std::sync::Mutex;

use tracing::{info, warn};

use docshelf_core::traits::{Notification, NotificationSink, Severity};

/// Emits notifications as log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        let description = notification.description.as_deref().unwrap_or("");
        match notification.severity {
            Severity::Default => info!(description, "{}", notification.title),
            Severity::Destructive => warn!(description, "{}", notification.title),
        }
    }
}

/// Keeps every notification in memory, oldest first.
#[derive(Debug, Default)]
pub struct RecordingSink {
    received: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far.
    pub fn all(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Drain the recorded notifications.
    pub fn take(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }

    /// Title of the most recent notification.
    pub fn last_title(&self) -> Option<String> {
        self.received
            .lock()
            .ok()
            .and_then(|guard| guard.last().map(|n| n.title.clone()))
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        if let Ok(mut guard) = self.received.lock() {
            guard.push(notification);
        }
    }
}
