//! Fire-and-forget user notifications.
//!
//! The data-access layer reports outcomes through a `Notifier` sink and
//! never waits on or inspects the delivery.

use owo_colors::OwoColorize;
use parking_lot::Mutex;

/// Severity level for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyVariant {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing notification message.
#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotifyVariant,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        variant: NotifyVariant,
    ) -> Self {
        Notification {
            title: title.into(),
            description: description.into(),
            variant,
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, NotifyVariant::Info)
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, NotifyVariant::Success)
    }

    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, NotifyVariant::Warning)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, NotifyVariant::Error)
    }
}

/// Notification sink. Callers never depend on its outcome.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Drops every notification.
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _notification: Notification) {}
}

/// Prints notifications to stderr with level colors.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let tag = format!("[{}]", notification.title);
        let colored = match notification.variant {
            NotifyVariant::Info => tag.cyan().to_string(),
            NotifyVariant::Success => tag.green().to_string(),
            NotifyVariant::Warning => tag.yellow().to_string(),
            NotifyVariant::Error => tag.red().to_string(),
        };
        eprintln!("{} {}", colored, notification.description);
    }
}

/// Collects notifications for inspection in tests.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_variant() {
        assert_eq!(Notification::info("t", "d").variant, NotifyVariant::Info);
        assert_eq!(
            Notification::success("t", "d").variant,
            NotifyVariant::Success
        );
        assert_eq!(
            Notification::warning("t", "d").variant,
            NotifyVariant::Warning
        );
        assert_eq!(Notification::error("t", "d").variant, NotifyVariant::Error);
    }

    #[test]
    fn test_recording_notifier_captures_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::info("first", "a"));
        notifier.notify(Notification::error("second", "b"));
        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].title, "first");
        assert_eq!(sent[1].title, "second");
    }
}
