//! Notification hook.
//!
//! The service calls every registered [`Notifier`] with
//! `(message, recipient)` after a successful schedule, reschedule or
//! status change. Delivery (mail, chat) belongs to the embedding
//! application; the handlers here cover logging, stdout and capture.

use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::NotifierKind;

/// Receives scheduling events.
pub trait Notifier: Send + Sync + Debug {
    /// Delivers one message. Must not block for long; called outside the
    /// schedule lock but on the caller's thread.
    fn notify(&self, message: &str, recipient: &str);
}

/// Emits each notification as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, recipient: &str) {
        info!(target: "u_timetable::notify", recipient, "{message}");
    }
}

/// Prints each notification to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, message: &str, recipient: &str) {
        println!("[{recipient}] {message}");
    }
}

/// A delivered notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub recipient: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far, oldest first.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, recipient: &str) {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification {
                recipient: recipient.to_string(),
                message: message.to_string(),
                sent_at: Utc::now(),
            });
    }
}

/// Builds the handler named by configuration.
pub fn from_kind(kind: NotifierKind) -> Arc<dyn Notifier> {
    match kind {
        NotifierKind::Log => Arc::new(LogNotifier),
        NotifierKind::Stdout => Arc::new(StdoutNotifier),
    }
}
