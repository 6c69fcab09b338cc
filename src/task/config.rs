use crate::keys;

/// Operation selected when a configuration leaves it unset.
pub const DEFAULT_OPERATION: &str = "save";

/// Configuration for one persistence run.
///
/// Every field is optional at the type level; the missing-value behavior is
/// part of the contract. `operation`, `data_key`, and `payload` fall back
/// to defaults at dispatch time, while a missing `directory` fails the job
/// before any file I/O.
#[derive(Debug, Clone, Default)]
pub struct TaskConfig {
    /// Location the target file lives in. Opaque to the task; interpreted
    /// by the storage backend.
    pub directory: Option<String>,

    /// `"save"` or `"load"`, compared exactly. Defaults to `"save"`.
    pub operation: Option<String>,

    /// Logical dataset name, used verbatim in the filename. Defaults to
    /// `"dashboard_state"`. Callers supply values safe as a filename
    /// component; path separators are not filtered here.
    pub data_key: Option<String>,

    /// Text written by a save. Defaults to the empty string. Content is
    /// opaque; nothing validates that it is JSON.
    pub payload: Option<String>,
}

impl TaskConfig {
    /// Create a configuration targeting `directory`.
    pub fn new(directory: &str) -> Self {
        Self {
            directory: Some(directory.to_string()),
            ..Self::default()
        }
    }

    /// Set the operation
    pub fn operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    /// Set the data key
    pub fn data_key(mut self, data_key: &str) -> Self {
        self.data_key = Some(data_key.to_string());
        self
    }

    /// Set the payload
    pub fn payload(mut self, payload: &str) -> Self {
        self.payload = Some(payload.to_string());
        self
    }

    pub fn operation_or_default(&self) -> &str {
        self.operation.as_deref().unwrap_or(DEFAULT_OPERATION)
    }

    pub fn data_key_or_default(&self) -> &str {
        self.data_key.as_deref().unwrap_or(keys::DASHBOARD_STATE)
    }

    pub fn payload_or_default(&self) -> &str {
        self.payload.as_deref().unwrap_or("")
    }
}
