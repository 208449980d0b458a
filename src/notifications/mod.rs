//! Transient user feedback.
//!
//! At most one notification is visible; posting a new one replaces the current one.
//! Each notification lives for [`DISPLAY_DURATION`] and then fades for [`FADE_DURATION`]
//! before it is dropped.

use std::time::{Duration, Instant};

/// How long a notification stays fully visible
pub const DISPLAY_DURATION: Duration = Duration::from_millis(3000);
/// Fade-out window after the display duration
pub const FADE_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    /// End of the fully visible period; the fade runs after this
    pub expires_at: Instant,
}

impl Notification {
    pub fn is_fading(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn is_gone(&self, now: Instant) -> bool {
        now >= self.expires_at + FADE_DURATION
    }
}

#[derive(Debug, Default)]
pub struct NotificationCenter {
    current: Option<Notification>,
    posted: u64,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, message: impl Into<String>, severity: Severity) {
        self.post_at(message, severity, Instant::now());
    }

    pub fn post_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.current = Some(Notification {
            message: message.into(),
            severity,
            expires_at: now + DISPLAY_DURATION,
        });
        self.posted += 1;
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.post(message, Severity::Info);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.post(message, Severity::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.post(message, Severity::Error);
    }

    /// Drop the notification once its fade has finished. Returns true if one was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        if self.current.as_ref().is_some_and(|n| n.is_gone(now)) {
            self.current = None;
            return true;
        }
        false
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Total number of notifications ever posted
    pub fn posted_count(&self) -> u64 {
        self.posted
    }
}
