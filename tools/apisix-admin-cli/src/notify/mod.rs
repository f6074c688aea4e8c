use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Outcome class of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Error,
}

impl Severity {
    /// Display colour used by the dashboard for this severity
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Success => "green",
            Severity::Info => "blue",
            Severity::Error => "red",
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            Severity::Success => "OK",
            Severity::Info => "INFO",
            Severity::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Upload,
    Download,
    Info,
}

/// A toast-style message raised at the end of an import or export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub icon: Option<Icon>,
}

/// Side channel for user notifications
pub trait Notifier: Send + Sync {
    fn show(&self, notification: Notification);
}

/// Writes one line per notification to stderr
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn format(notification: &Notification) -> String {
        format!(
            "[{}] {}: {}",
            notification.severity.tag(),
            notification.title,
            notification.message
        )
    }
}

impl Notifier for ConsoleNotifier {
    fn show(&self, notification: Notification) {
        eprintln!("{}", Self::format(&notification));
    }
}

/// Keeps every notification in memory; cloning shares the same buffer
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.lock().ok().and_then(|g| g.last().cloned())
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, notification: Notification) {
        if let Ok(mut guard) = self.seen.lock() {
            guard.push(notification);
        }
    }
}
