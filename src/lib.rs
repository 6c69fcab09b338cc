// ============================================================================
// dashpersist Library
// ============================================================================

pub mod core;
pub mod job;
pub mod keys;
pub mod storage;
pub mod task;

// Re-export main types for convenience
pub use crate::core::{PersistError, Result};
pub use job::{Job, JobHandle, JobLog, JobRunner, JobStatus, JobWork, LogEntry, RunReport, Severity};
pub use storage::{FileIdentity, LocalStorage, StorageResolver};
pub use task::{OutputSlot, PersistTask, TaskConfig};

use std::sync::Arc;

// ============================================================================
// High-level Persister API
// ============================================================================

/// Long-lived persistence front end for a host.
///
/// Owns the storage backend, the job runner, and the `loadedData` output
/// slot across submissions. Each `execute` call runs as its own background
/// job; the slot keeps the last successfully loaded payload until a later
/// load replaces it.
///
/// # Examples
///
/// ```
/// use dashpersist::{Persister, TaskConfig, keys};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let dir = tempfile::tempdir()?;
/// # let dir_path = dir.path().to_str().unwrap();
/// let persister = Persister::local();
///
/// // Save one slice of dashboard state.
/// let config = TaskConfig::new(dir_path)
///     .data_key(keys::CUSTOM_CARDS)
///     .payload(r#"[{"id":"card-1"}]"#);
/// let status = persister.execute(config).join().await;
/// assert!(status.is_succeeded());
///
/// // Load it back through the output slot.
/// let config = TaskConfig::new(dir_path)
///     .operation("load")
///     .data_key(keys::CUSTOM_CARDS);
/// persister.execute(config).join().await;
/// assert_eq!(persister.loaded_data().as_deref(), Some(r#"[{"id":"card-1"}]"#));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Persister {
    storage: Arc<dyn StorageResolver>,
    runner: JobRunner,
    output: OutputSlot,
}

impl Persister {
    /// Create a persister over a custom storage backend.
    pub fn new<S: StorageResolver + 'static>(storage: S) -> Self {
        Self {
            storage: Arc::new(storage),
            runner: JobRunner::new(),
            output: OutputSlot::new(),
        }
    }

    /// Create a persister over the local filesystem.
    pub fn local() -> Self {
        Self::new(LocalStorage::new())
    }

    /// Submit one persistence run.
    ///
    /// Returns immediately; the run proceeds on a background task. The
    /// handle exposes the job's id, log, and terminal status.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dashpersist::{Persister, TaskConfig};
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// # let dir = tempfile::tempdir().unwrap();
    /// # let persister = Persister::local();
    /// let config = TaskConfig::new(dir.path().to_str().unwrap()).payload("{}");
    /// let handle = persister.execute(config);
    /// let status = handle.join().await;
    /// assert!(status.is_succeeded());
    /// # }
    /// ```
    pub fn execute(&self, config: TaskConfig) -> JobHandle {
        let task = PersistTask::new(self.storage.clone(), config, self.output.clone());
        self.runner.submit(task)
    }

    /// The most recently loaded payload, if any load has succeeded.
    pub fn loaded_data(&self) -> Option<String> {
        self.output.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_execute_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let dir_path = dir.path().to_str().unwrap();
        let persister = Persister::local();

        let status = persister
            .execute(
                TaskConfig::new(dir_path)
                    .data_key(keys::CARD_ORDER)
                    .payload(r#"["a","b"]"#),
            )
            .join()
            .await;
        assert!(status.is_succeeded());

        let status = persister
            .execute(
                TaskConfig::new(dir_path)
                    .operation("load")
                    .data_key(keys::CARD_ORDER),
            )
            .join()
            .await;
        assert!(status.is_succeeded());
        assert_eq!(persister.loaded_data().as_deref(), Some(r#"["a","b"]"#));
    }

    #[tokio::test]
    async fn test_loaded_data_survives_unrelated_runs() {
        let dir = tempfile::tempdir().unwrap();
        let dir_path = dir.path().to_str().unwrap();
        let persister = Persister::local();

        persister
            .execute(TaskConfig::new(dir_path).payload("kept"))
            .join()
            .await;
        persister
            .execute(TaskConfig::new(dir_path).operation("load"))
            .join()
            .await;
        assert_eq!(persister.loaded_data().as_deref(), Some("kept"));

        // A save run and a load of a missing key leave the slot alone.
        persister
            .execute(TaskConfig::new(dir_path).payload("other"))
            .join()
            .await;
        persister
            .execute(
                TaskConfig::new(dir_path)
                    .operation("load")
                    .data_key("neverSaved"),
            )
            .join()
            .await;
        assert_eq!(persister.loaded_data().as_deref(), Some("kept"));
    }
}
