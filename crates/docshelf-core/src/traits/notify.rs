//! User-visible notifications raised by interactive front ends.

use serde::{Deserialize, Serialize};

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational or success message.
    Default,
    /// Failure message.
    Destructive,
}

/// A short message surfaced to the person using the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Headline, e.g. "Group created successfully".
    pub title: String,
    /// Optional second line.
    pub description: Option<String>,
    /// Visual weight.
    pub severity: Severity,
}

impl Notification {
    /// A success notification.
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            severity: Severity::Default,
        }
    }

    /// A failure notification.
    pub fn failure(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            severity: Severity::Destructive,
        }
    }

    /// Attach a second line.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Receives notifications. Delivery is fire-and-forget.
pub trait NotificationSink: Send + Sync {
    /// Deliver one notification.
    fn notify(&self, notification: Notification);
}
