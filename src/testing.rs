//! Testing utilities for dewit
//!
//! Catalog fixtures, a `TempStore` wrapper for a sled store living in a
//! temporary directory, and `wait_until` for observing background writes.
//!
//! Only available when compiled with `cfg(test)`.

use crate::catalog::{Catalog, Item};
use crate::storage::SledStore;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Two-item catalog used by the worked filter examples
///
/// # Panics
/// Panics if the fixture is invalid.
#[must_use]
pub fn two_item_catalog() -> Catalog {
    Catalog::new(vec![
        Item::new("Diet Code Red", &["US"], false),
        Item::new("Voltage", &["US", "CA"], true),
    ])
    .expect("valid fixture catalog")
}

/// Small catalog touching every filter rule
///
/// Exactly one name contains "diet", two items are sold in Japan and two
/// are discontinued.
///
/// # Panics
/// Panics if the fixture is invalid.
#[must_use]
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        Item::new("Mountain Dew", &["US", "Canada"], false),
        Item::new("Diet Code Red", &["US"], false),
        Item::new("Voltage", &["US", "Canada"], false),
        Item::new("Pitch Black", &["US", "Japan"], false),
        Item::new("Kickstart Orange Citrus", &["US"], false),
        Item::new("Hard Mtn Dew Original", &["US"], false),
        Item::new("Game Fuel Charged Berry Blast", &["US"], true),
        Item::new("Spark", &["US"], false),
        Item::new("Mountain Dew Green Tea", &["Japan"], true),
        Item::new("Mountain Dew Energy", &["UK", "Ireland"], false),
        Item::new("Baja Blast", &["US"], false),
    ])
    .expect("valid fixture catalog")
}

/// Sled store in a temporary directory, removed on drop
///
/// # Examples
/// ```ignore
/// let temp = TempStore::new();
/// temp.store().save("tried", "[]").unwrap();
/// ```
pub struct TempStore {
    store: Arc<SledStore>,
    dir: TempDir,
}

impl TempStore {
    /// Create an empty store
    ///
    /// # Panics
    /// Panics if the temporary directory or the database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = SledStore::open(dir.path().join("state")).expect("Failed to open test store");
        Self {
            store: Arc::new(store),
            dir,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<SledStore> {
        &self.store
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for TempStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Poll `condition` until it holds or `timeout` elapses
///
/// Returns whether the condition was met.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(Duration::from_millis(5));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KeyValueStore;

    #[test]
    fn test_fixtures_are_valid() {
        assert_eq!(two_item_catalog().len(), 2);
        assert_eq!(sample_catalog().len(), 11);
    }

    #[test]
    fn test_temp_store_round_trip() {
        let temp = TempStore::new();
        assert!(temp.path().exists());
        temp.store().save("tried", "[]").unwrap();
        assert_eq!(temp.store().load("tried").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_wait_until() {
        let mut calls = 0;
        assert!(wait_until(Duration::from_secs(1), || {
            calls += 1;
            calls == 3
        }));
        assert!(!wait_until(Duration::from_millis(20), || false));
    }
}
