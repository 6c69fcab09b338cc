use std::fmt;

/// Resolved target of one persistence run: the configured directory plus
/// the filename computed from the data key.
///
/// The filename contract is fixed at `dashboard_<key>.json`, placed
/// directly inside the directory. Save and load both derive their target
/// through here, so a load always finds what an earlier save wrote for the
/// same key. The directory is kept as an opaque reference; interpreting it
/// is the storage backend's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIdentity {
    directory: String,
    file_name: String,
}

impl FileIdentity {
    pub fn for_data_key(directory: impl Into<String>, data_key: &str) -> Self {
        Self {
            directory: directory.into(),
            file_name: format!("dashboard_{}.json", data_key),
        }
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// The bare filename, as used in job log messages.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl fmt::Display for FileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.directory, self.file_name)
    }
}
