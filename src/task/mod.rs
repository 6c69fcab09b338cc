pub mod config;
pub mod load;
pub mod output;
pub mod save;

pub use config::{DEFAULT_OPERATION, TaskConfig};
pub use output::OutputSlot;

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::{PersistError, Result};
use crate::job::{Job, JobWork};
use crate::storage::{FileIdentity, StorageResolver};

/// One persistence run: resolves the target file from its configuration and
/// dispatches to save or load.
///
/// Exactly one operation executes per run. Configuration problems (missing
/// directory, unknown operation) fail the job before any file I/O happens.
pub struct PersistTask {
    storage: Arc<dyn StorageResolver>,
    config: TaskConfig,
    output: OutputSlot,
}

impl PersistTask {
    pub fn new(storage: Arc<dyn StorageResolver>, config: TaskConfig, output: OutputSlot) -> Self {
        Self {
            storage,
            config,
            output,
        }
    }
}

#[async_trait]
impl JobWork for PersistTask {
    async fn run(&self, job: &Job) -> Result<()> {
        let operation = self.config.operation_or_default();
        let data_key = self.config.data_key_or_default();
        let payload = self.config.payload_or_default();

        let Some(directory) = self.config.directory.as_deref() else {
            return Err(job.fail_with(PersistError::DirectoryNotConfigured));
        };

        let identity = FileIdentity::for_data_key(directory, data_key);

        match operation {
            "save" => save::save_data(self.storage.as_ref(), job, &identity, payload).await,
            "load" => load::load_data(self.storage.as_ref(), job, &identity, &self.output).await,
            other => Err(job.fail_with(PersistError::UnknownOperation(other.to_string()))),
        }
    }
}
