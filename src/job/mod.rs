pub mod log;
pub mod report;
pub mod runner;
pub mod status;

pub use log::{JobLog, LogEntry, Severity};
pub use report::RunReport;
pub use runner::{Job, JobHandle, JobRunner, JobWork, new_job_id};
pub use status::JobStatus;
