use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a job run.
///
/// A job starts `Running` and reaches exactly one terminal state. Terminal
/// states are final: once a run has succeeded or failed, later events (such
/// as a cleanup failure) may still be logged but never change the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Running,
    Succeeded,
    /// The run failed; `reason` is the first failure recorded.
    Failed { reason: String },
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Running)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, JobStatus::Succeeded)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, JobStatus::Failed { .. })
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            JobStatus::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Running => write!(f, "running"),
            JobStatus::Succeeded => write!(f, "succeeded"),
            JobStatus::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}
