//! Sled-backed durable store
//!
//! All keys live in a single `state` tree. Values are stored as UTF-8 JSON
//! text and the tree is flushed after every write so state survives a crash
//! right after a debounced save.

use super::{KeyValueStore, StoreError};
use sled::{Db, Tree};
use std::path::Path;

/// Durable `KeyValueStore` on top of sled
pub struct SledStore {
    db: Db,
    state: Tree,
}

impl SledStore {
    /// Opens or creates a store at the specified directory
    ///
    /// # Examples
    /// ```no_run
    /// use dewit::storage::SledStore;
    /// let store = SledStore::open("my_state").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database or its tree cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let state = db.open_tree("state")?;
        Ok(Self { db, state })
    }
}

impl KeyValueStore for SledStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.state.get(key.as_bytes())? {
            Some(value) => String::from_utf8(value.to_vec())
                .map(Some)
                .map_err(|_| StoreError::InvalidUtf8(key.to_string())),
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.state.insert(key.as_bytes(), value.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TempStore;

    #[test]
    fn test_round_trip() {
        let temp = TempStore::new();
        let store = temp.store();
        assert_eq!(store.load("tried").unwrap(), None);

        store.save("tried", r#"["Voltage"]"#).unwrap();
        assert_eq!(store.load("tried").unwrap().as_deref(), Some(r#"["Voltage"]"#));
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state");
        {
            let store = SledStore::open(&path).unwrap();
            store.save("filters", r#"{"excludeDiet":true}"#).unwrap();
        }
        let store = SledStore::open(&path).unwrap();
        assert_eq!(
            store.load("filters").unwrap().as_deref(),
            Some(r#"{"excludeDiet":true}"#)
        );
    }

    #[test]
    fn test_non_utf8_value() {
        let temp = TempStore::new();
        let store = temp.store();
        store.state.insert("tried", vec![0xffu8, 0xfe]).unwrap();
        assert!(matches!(store.load("tried"), Err(StoreError::InvalidUtf8(_))));
    }
}
