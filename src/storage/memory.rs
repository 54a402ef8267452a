//! In-memory store for tests and throwaway sessions

use super::{KeyValueStore, StoreError};
use std::collections::HashMap;
use std::sync::Mutex;

/// `KeyValueStore` backed by a `HashMap`
///
/// Also counts successful saves, which lets tests observe write coalescing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls made so far
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.lock().map_or(0, |saves| *saves)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .insert(key.to_string(), value.to_string());
        *self.saves.lock().map_err(|_| StoreError::Poisoned)? += 1;
        Ok(())
    }
}
