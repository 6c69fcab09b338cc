use tokio::io::AsyncWriteExt;

use crate::core::{PersistError, Result};
use crate::job::Job;
use crate::storage::{FileIdentity, StorageResolver};

/// Writes `payload` as the target file's full content.
///
/// The existence check only decides which message gets logged; either way
/// the previous content is replaced in place, never appended to. The write
/// stream is shut down on every exit path. A close failure after a failed
/// write is logged but the write failure stays the run's terminal reason;
/// a close failure after a successful write is the run's failure.
pub async fn save_data(
    storage: &dyn StorageResolver,
    job: &Job,
    identity: &FileIdentity,
    payload: &str,
) -> Result<()> {
    let file_name = identity.file_name();

    let exists = storage
        .exists(identity)
        .await
        .map_err(|err| job.fail_with(PersistError::Io(err.to_string())))?;

    if exists {
        job.message(format!("File \"{}\" exists. Overwriting...", file_name));
    } else {
        job.message(format!("Creating new file \"{}\"", file_name));
    }

    let mut writer = match storage.create_writer(identity).await {
        Ok(writer) => writer,
        Err(err) if exists => {
            return Err(job.fail_with(PersistError::WriteFile(
                file_name.to_string(),
                err.to_string(),
            )));
        }
        Err(err) => {
            return Err(job.fail_with(PersistError::CreateFile(
                file_name.to_string(),
                err.to_string(),
            )));
        }
    };

    let mut primary = None;
    match writer.write_all(payload.as_bytes()).await {
        Ok(()) => job.message(format!("Successfully saved data to \"{}\"", file_name)),
        Err(err) => {
            primary = Some(job.fail_with(PersistError::WriteFile(
                file_name.to_string(),
                err.to_string(),
            )));
        }
    }

    // Close unconditionally; for files this is also the flush.
    if let Err(err) = writer.shutdown().await {
        let close_err = job.fail_with(PersistError::CloseWriter(err.to_string()));
        primary.get_or_insert(close_err);
    }

    match primary {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
