use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared slot holding the most recently loaded payload.
///
/// This is the host-facing `loadedData` output. Only a fully successful
/// load writes it; a failed or no-op run leaves the prior value in place.
/// The slot outlives individual runs, so the last loaded value stays
/// visible until a later load replaces it.
#[derive(Debug, Clone, Default)]
pub struct OutputSlot {
    value: Arc<Mutex<Option<String>>>,
}

impl OutputSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value, if any load has published one.
    pub fn get(&self) -> Option<String> {
        self.lock().clone()
    }

    pub(crate) fn publish(&self, value: String) {
        *self.lock() = Some(value);
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
