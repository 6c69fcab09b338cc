use tokio::io::AsyncBufReadExt;

use crate::core::{PersistError, Result};
use crate::job::Job;
use crate::storage::{FileIdentity, StorageResolver};
use crate::task::output::OutputSlot;

/// Reads the target file's full content into the output slot.
///
/// An absent file is a normal outcome: the run stays successful and the
/// slot keeps its prior value. The content is read line by line and
/// reassembled with a newline after each line, then trimmed once, so a
/// payload round-trips modulo that final trim. The slot is only written
/// after the whole read succeeded.
pub async fn load_data(
    storage: &dyn StorageResolver,
    job: &Job,
    identity: &FileIdentity,
    output: &OutputSlot,
) -> Result<()> {
    let file_name = identity.file_name();

    let reader = match storage.open_reader(identity).await {
        Ok(Some(reader)) => reader,
        Ok(None) => {
            job.message(format!("File \"{}\" does not exist yet.", file_name));
            return Ok(());
        }
        Err(err) => {
            return Err(job.fail_with(PersistError::ReadFile(
                file_name.to_string(),
                err.to_string(),
            )));
        }
    };

    let mut lines = reader.lines();
    let mut content = String::new();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                content.push_str(&line);
                content.push('\n');
            }
            Ok(None) => break,
            Err(err) => {
                return Err(job.fail_with(PersistError::ReadFile(
                    file_name.to_string(),
                    err.to_string(),
                )));
            }
        }
    }

    let payload = content.trim().to_string();
    let character_count = payload.chars().count();
    output.publish(payload);
    job.message(format!(
        "Successfully loaded data from \"{}\" ({} characters)",
        file_name, character_count
    ));

    Ok(())
}
