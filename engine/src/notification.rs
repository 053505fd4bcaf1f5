//! Single-slot notification model.
//!
//! At most one notification is active. A newer one replaces the current one
//! immediately. Each notification gets a generation number so that an expiry
//! scheduled for an older notification can never clear a newer one.

use serde::{Deserialize, Serialize};

/// Default lifetime of a notification, in milliseconds.
pub const NOTIFICATION_TTL_MS: u64 = 3000;

/// Severity tag shown with a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
}

/// A transient, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    /// Slot generation this notification was shown under
    pub generation: u64,
}

/// Holds the active notification, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationSlot {
    current: Option<Notification>,
    last_generation: u64,
}

impl NotificationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notification, replacing whatever was active.
    ///
    /// Returns the generation to pass to [`NotificationSlot::expire`].
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.last_generation += 1;
        self.current = Some(Notification {
            message: message.into(),
            severity,
            generation: self.last_generation,
        });
        self.last_generation
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Success)
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Info)
    }

    /// Clear the slot if `generation` is still the active notification.
    ///
    /// Returns whether anything was cleared.
    pub fn expire(&mut self, generation: u64) -> bool {
        match &self.current {
            Some(n) if n.generation == generation => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}
