use std::io;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::storage::identity::FileIdentity;

/// Buffered byte stream over a stored file's content.
pub type StorageReader = Box<dyn AsyncBufRead + Send + Unpin>;

/// Byte sink replacing a stored file's content.
pub type StorageWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Byte-level access to the files a persistence run targets.
///
/// The save and load operations do all their I/O through this seam; errors
/// come back as raw `io::Error` so the callers can attach the filename and
/// pick the host-facing message themselves.
#[async_trait]
pub trait StorageResolver: Send + Sync {
    /// Whether the target file currently exists.
    async fn exists(&self, identity: &FileIdentity) -> io::Result<bool>;

    /// Opens the target for reading. `Ok(None)` means the file is absent,
    /// which load treats as a normal outcome, not an error.
    async fn open_reader(&self, identity: &FileIdentity) -> io::Result<Option<StorageReader>>;

    /// Opens the target for writing, creating it when missing and
    /// truncating any previous content.
    async fn create_writer(&self, identity: &FileIdentity) -> io::Result<StorageWriter>;
}
