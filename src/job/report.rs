use serde::Serialize;

use crate::job::log::LogEntry;
use crate::job::runner::Job;
use crate::job::status::JobStatus;

/// Serializable summary of a job run.
///
/// Taken after the run finished this is the complete record; taken earlier
/// it is a snapshot of whatever has happened so far.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub job_id: String,
    pub status: JobStatus,
    pub entries: Vec<LogEntry>,
}

impl RunReport {
    pub fn from_job(job: &Job) -> Self {
        Self {
            job_id: job.id().to_string(),
            status: job.status(),
            entries: job.log().entries(),
        }
    }
}
