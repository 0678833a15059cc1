//! Bounded activity log.
//!
//! A most-recent-first record of human-readable event strings shown in the
//! debug overlay. Purely observational: nothing in the state machine reads
//! it back, and appending never fails.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::Local;
use serde::Serialize;
use uuid::Uuid;

/// Default number of retained entries.
pub const DEFAULT_CAP: usize = 50;

/// One immutable log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Opaque unique identifier for render keying.
    pub id: String,
    /// Human-readable event description.
    pub message: String,
    /// Wall-clock time of the append, formatted `HH:MM:SS`.
    pub timestamp: String,
}

/// Bounded, newest-first activity log.
///
/// `append` front-inserts and truncates from the tail, so the retained
/// entries are always the most recent ones in reverse arrival order.
#[derive(Debug)]
pub struct ActivityLog {
    entries: Mutex<VecDeque<LogEntry>>,
    cap: usize,
}

impl ActivityLog {
    /// Creates a log retaining at most `cap` entries.
    ///
    /// A cap of zero keeps the log permanently empty.
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(cap)),
            cap,
        }
    }

    /// Appends a message at the front, dropping the oldest entry when full.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn append(&self, message: impl Into<String>) {
        let entry = LogEntry {
            id: Uuid::new_v4().to_string(),
            message: message.into(),
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        };
        let mut entries = self.entries.lock().expect("log lock poisoned");
        entries.push_front(entry);
        entries.truncate(self.cap);
    }

    /// Returns a snapshot of the retained entries, newest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .expect("log lock poisoned")
            .iter()
            .cloned()
            .collect()
    }

    /// Returns the number of retained entries.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().expect("log lock poisoned").len()
    }

    /// Returns whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the configured cap.
    #[must_use]
    pub const fn cap(&self) -> usize {
        self.cap
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAP)
    }
}
