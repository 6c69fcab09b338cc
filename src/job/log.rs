use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// Severity of a single job log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Failure,
}

/// One timestamped message recorded during a job run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
}

impl LogEntry {
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }
}

/// Append-only message sink for a job run.
///
/// Cloning yields another handle to the same underlying log, so the runner,
/// the operations, and the caller all observe one sequence of entries.
/// Entries are mirrored as `tracing` events; the log itself is the
/// host-facing record.
#[derive(Debug, Clone, Default)]
pub struct JobLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl JobLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an informational message.
    pub fn message(&self, text: impl Into<String>) {
        self.push(Severity::Info, text.into());
    }

    /// Records a failure message.
    pub fn failed(&self, text: impl Into<String>) {
        self.push(Severity::Failure, text.into());
    }

    fn push(&self, severity: Severity, message: String) {
        match severity {
            Severity::Info => event!(Level::INFO, "{}", message),
            Severity::Failure => event!(Level::ERROR, "{}", message),
        }
        self.lock().push(LogEntry {
            timestamp: Utc::now(),
            severity,
            message,
        });
    }

    /// Snapshot of all entries recorded so far, in append order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        // A poisoned log still holds a consistent Vec.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_append_order() {
        let log = JobLog::new();
        log.message("first");
        log.failed("second");
        log.message("third");

        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].message, "second");
        assert_eq!(entries[2].message, "third");
    }

    #[test]
    fn test_severity_is_recorded() {
        let log = JobLog::new();
        log.message("ok");
        log.failed("boom");

        let entries = log.entries();
        assert_eq!(entries[0].severity, Severity::Info);
        assert!(!entries[0].is_failure());
        assert_eq!(entries[1].severity, Severity::Failure);
        assert!(entries[1].is_failure());
    }

    #[test]
    fn test_clones_share_one_log() {
        let log = JobLog::new();
        let other = log.clone();
        other.message("via clone");

        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].message, "via clone");
    }
}
