use thiserror::Error;

/// Crate-wide error type. `Display` output is host-facing: these strings are
/// exactly what ends up in the job log when an operation fails.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Directory not configured")]
    DirectoryNotConfigured,

    #[error("Unknown operation: {0}. Use 'save' or 'load'")]
    UnknownOperation(String),

    #[error("Failed creating file \"{0}\": {1}")]
    CreateFile(String, String),

    #[error("Failed writing to file \"{0}\": {1}")]
    WriteFile(String, String),

    #[error("Failed reading file \"{0}\": {1}")]
    ReadFile(String, String),

    #[error("Error closing file writer: {0}")]
    CloseWriter(String),

    #[error("I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, PersistError>;

impl From<std::io::Error> for PersistError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
