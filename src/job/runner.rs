use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use futures::FutureExt;
use tokio::task::JoinHandle;
use tracing::{Instrument, info_span};
use uuid::Uuid;

use crate::core::{PersistError, Result};
use crate::job::log::{JobLog, LogEntry};
use crate::job::status::JobStatus;

/// Generates a unique job id.
pub fn new_job_id() -> String {
    Uuid::new_v4().to_string()
}

/// Tracking state for one execution instance.
///
/// Cloning yields another handle to the same run: the runner, the unit of
/// work, and the caller's [`JobHandle`] all observe one log and one status.
#[derive(Debug, Clone)]
pub struct Job {
    id: String,
    log: JobLog,
    status: Arc<Mutex<JobStatus>>,
}

impl Job {
    fn new() -> Self {
        Self {
            id: new_job_id(),
            log: JobLog::new(),
            status: Arc::new(Mutex::new(JobStatus::Running)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn log(&self) -> &JobLog {
        &self.log
    }

    /// Snapshot of the current status.
    pub fn status(&self) -> JobStatus {
        self.status_cell().clone()
    }

    /// Records an informational message.
    pub fn message(&self, text: impl Into<String>) {
        self.log.message(text);
    }

    /// Records a failure. The first failure of a run fixes the terminal
    /// status; later ones (cleanup errors after a failed write, for
    /// instance) are appended to the log without touching it.
    pub fn fail(&self, reason: impl Into<String>) {
        let reason = reason.into();
        self.log.failed(reason.clone());
        let mut status = self.status_cell();
        if !status.is_terminal() {
            *status = JobStatus::Failed { reason };
        }
    }

    /// Logs `err` as a failure and hands it back, so a call site can record
    /// and propagate in one step.
    pub fn fail_with(&self, err: PersistError) -> PersistError {
        self.fail(err.to_string());
        err
    }

    fn mark_succeeded(&self) {
        let mut status = self.status_cell();
        if !status.is_terminal() {
            *status = JobStatus::Succeeded;
        }
    }

    fn status_cell(&self) -> MutexGuard<'_, JobStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A unit of work executable by the [`JobRunner`].
///
/// Implementations report progress and failures through the passed [`Job`];
/// the returned `Result` lets the runner fix the terminal status without
/// the work having to touch it directly.
#[async_trait]
pub trait JobWork: Send + Sync + 'static {
    async fn run(&self, job: &Job) -> Result<()>;
}

/// Schedules persistence work on background tasks.
///
/// Submission never blocks: the returned [`JobHandle`] is available
/// immediately while the work proceeds on its own tokio task.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobRunner;

impl JobRunner {
    pub fn new() -> Self {
        Self
    }

    /// Spawns `work` as a tracked job and returns the caller's handle to it.
    pub fn submit<W: JobWork>(&self, work: W) -> JobHandle {
        let job = Job::new();
        let shared = job.clone();
        let handle = tokio::spawn(run_job(job, work));
        JobHandle {
            job: shared,
            handle,
        }
    }
}

/// Caller-side view of a submitted job.
#[derive(Debug)]
pub struct JobHandle {
    job: Job,
    handle: JoinHandle<()>,
}

impl JobHandle {
    pub fn id(&self) -> &str {
        self.job.id()
    }

    /// Shared view of the run's tracking state. Clone it to keep access to
    /// the log and status after `join` consumes the handle.
    pub fn job(&self) -> &Job {
        &self.job
    }

    /// Snapshot of the job's current status.
    pub fn status(&self) -> JobStatus {
        self.job.status()
    }

    /// Snapshot of the log entries recorded so far, in append order.
    pub fn log_entries(&self) -> Vec<LogEntry> {
        self.job.log().entries()
    }

    /// Waits for the run to finish and returns its terminal status.
    pub async fn join(self) -> JobStatus {
        // The runner contains panics, so the spawned task only aborts when
        // the runtime shuts down underneath it.
        let _ = self.handle.await;
        self.job.status()
    }
}

/// Executes one unit of work with the lifecycle bracketing every run gets:
/// a "Started" entry before any work, a terminal status on every exit path
/// (success, handled failure, caught panic), and an "Ended" entry after.
async fn run_job<W: JobWork>(job: Job, work: W) {
    let span = info_span!("persist.job.run", job_id = %job.id());
    async {
        let context = execution_context();
        job.message(format!("Started dashboard persistence task [{}]", context));

        match AssertUnwindSafe(work.run(&job)).catch_unwind().await {
            Ok(Ok(())) => job.mark_succeeded(),
            Ok(Err(err)) => {
                // Failures are normally recorded where they occur; this
                // catches an error that reached the boundary unlogged.
                if !job.status().is_terminal() {
                    job.fail(format!("Error in persistence task: {}", err));
                }
            }
            Err(panic) => {
                job.fail(format!(
                    "Error in persistence task: {}",
                    panic_message(panic.as_ref())
                ));
            }
        }

        job.message(format!("Ended dashboard persistence task [{}]", context));
    }
    .instrument(span)
    .await;
}

fn execution_context() -> String {
    std::thread::current()
        .name()
        .unwrap_or("unnamed-worker")
        .to_string()
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(text) = panic.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = panic.downcast_ref::<String>() {
        text.clone()
    } else {
        "task panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Succeeding;

    #[async_trait]
    impl JobWork for Succeeding {
        async fn run(&self, job: &Job) -> Result<()> {
            job.message("did the thing");
            Ok(())
        }
    }

    struct FailingLogged;

    #[async_trait]
    impl JobWork for FailingLogged {
        async fn run(&self, job: &Job) -> Result<()> {
            Err(job.fail_with(PersistError::DirectoryNotConfigured))
        }
    }

    struct FailingUnlogged;

    #[async_trait]
    impl JobWork for FailingUnlogged {
        async fn run(&self, _job: &Job) -> Result<()> {
            Err(PersistError::Io("surprise".to_string()))
        }
    }

    struct Panicking;

    #[async_trait]
    impl JobWork for Panicking {
        async fn run(&self, _job: &Job) -> Result<()> {
            panic!("boom");
        }
    }

    #[test]
    fn test_first_failure_fixes_terminal_status() {
        let job = Job::new();
        job.fail("first");
        job.fail("second");

        assert_eq!(job.status().failure_reason(), Some("first"));
        // Both failures are still in the log.
        assert_eq!(job.log().len(), 2);
    }

    #[test]
    fn test_success_does_not_override_failure() {
        let job = Job::new();
        job.fail("broken");
        job.mark_succeeded();

        assert!(job.status().is_failed());
    }

    #[test]
    fn test_fail_with_returns_the_error() {
        let job = Job::new();
        let err = job.fail_with(PersistError::UnknownOperation("x".to_string()));

        assert!(matches!(err, PersistError::UnknownOperation(_)));
        assert_eq!(
            job.status().failure_reason(),
            Some("Unknown operation: x. Use 'save' or 'load'")
        );
    }

    #[tokio::test]
    async fn test_run_is_bracketed_by_started_and_ended() {
        let handle = JobRunner::new().submit(Succeeding);
        let job = handle.job().clone();
        let status = handle.join().await;

        assert!(status.is_succeeded());
        let entries = job.log().entries();
        assert!(
            entries
                .first()
                .unwrap()
                .message
                .starts_with("Started dashboard persistence task [")
        );
        assert!(
            entries
                .last()
                .unwrap()
                .message
                .starts_with("Ended dashboard persistence task [")
        );
    }

    #[tokio::test]
    async fn test_logged_failure_is_not_double_reported() {
        let handle = JobRunner::new().submit(FailingLogged);
        let job = handle.job().clone();
        let status = handle.join().await;

        assert_eq!(status.failure_reason(), Some("Directory not configured"));
        let failures: Vec<_> = job
            .log()
            .entries()
            .into_iter()
            .filter(|entry| entry.is_failure())
            .collect();
        assert_eq!(failures.len(), 1);
    }

    #[tokio::test]
    async fn test_unlogged_failure_is_caught_at_the_boundary() {
        let status = JobRunner::new().submit(FailingUnlogged).join().await;

        assert_eq!(
            status.failure_reason(),
            Some("Error in persistence task: I/O error: surprise")
        );
    }

    #[tokio::test]
    async fn test_panic_is_contained_and_ended_still_logged() {
        let handle = JobRunner::new().submit(Panicking);
        let job = handle.job().clone();
        let status = handle.join().await;

        assert_eq!(
            status.failure_reason(),
            Some("Error in persistence task: boom")
        );
        let entries = job.log().entries();
        assert!(
            entries
                .last()
                .unwrap()
                .message
                .starts_with("Ended dashboard persistence task [")
        );
    }
}
