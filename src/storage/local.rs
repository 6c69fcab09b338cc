use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::BufReader;

use crate::storage::identity::FileIdentity;
use crate::storage::resolver::{StorageReader, StorageResolver, StorageWriter};

/// Local-filesystem storage backend.
///
/// Interprets an identity's directory as a filesystem path. The directory
/// itself is expected to exist already; nothing here creates it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn target_path(identity: &FileIdentity) -> PathBuf {
        Path::new(identity.directory()).join(identity.file_name())
    }
}

#[async_trait]
impl StorageResolver for LocalStorage {
    async fn exists(&self, identity: &FileIdentity) -> io::Result<bool> {
        fs::try_exists(Self::target_path(identity)).await
    }

    async fn open_reader(&self, identity: &FileIdentity) -> io::Result<Option<StorageReader>> {
        match File::open(Self::target_path(identity)).await {
            Ok(file) => Ok(Some(Box::new(BufReader::new(file)))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn create_writer(&self, identity: &FileIdentity) -> io::Result<StorageWriter> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(Self::target_path(identity))
            .await?;
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt};

    use super::*;

    fn identity_in(dir: &tempfile::TempDir, key: &str) -> FileIdentity {
        FileIdentity::for_data_key(dir.path().to_string_lossy().into_owned(), key)
    }

    #[tokio::test]
    async fn test_exists_reflects_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let identity = identity_in(&dir, "customCards");
        let storage = LocalStorage::new();

        assert!(!storage.exists(&identity).await.unwrap());
        std::fs::write(dir.path().join("dashboard_customCards.json"), "[]").unwrap();
        assert!(storage.exists(&identity).await.unwrap());
    }

    #[tokio::test]
    async fn test_open_reader_on_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let identity = identity_in(&dir, "cardTitles");

        let reader = LocalStorage::new().open_reader(&identity).await.unwrap();
        assert!(reader.is_none());
    }

    #[tokio::test]
    async fn test_create_writer_truncates_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let identity = identity_in(&dir, "cardSizes");
        let path = dir.path().join("dashboard_cardSizes.json");
        std::fs::write(&path, "previous content that is longer").unwrap();

        let storage = LocalStorage::new();
        let mut writer = storage.create_writer(&identity).await.unwrap();
        writer.write_all(b"short").await.unwrap();
        writer.shutdown().await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");

        let mut reader = storage.open_reader(&identity).await.unwrap().unwrap();
        let mut line = String::new();
        reader.read_line(&mut line).await.unwrap();
        assert_eq!(line, "short");
    }
}
