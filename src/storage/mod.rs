//! Persistence adapter
//!
//! Session state is mirrored into a string-keyed store under two keys:
//!
//! - [`TRIED_KEY`]: JSON array of tried item names, sorted
//! - [`FILTERS_KEY`]: JSON object of the filter state (camelCase keys)
//!
//! Writes go through a [`DebouncedWriter`] so bursts of mutations collapse
//! into a single save per key. Reads happen once at session start; a missing
//! or unreadable value falls back to the default state.

pub mod debounce;
pub mod error;
pub mod memory;
pub mod sled_store;

pub use debounce::DebouncedWriter;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use sled_store::SledStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Key holding the serialized tried set
pub const TRIED_KEY: &str = "tried";

/// Key holding the serialized filter state
pub const FILTERS_KEY: &str = "filters";

/// Durable string key-value store
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, if any
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Load and decode a value, falling back to `T::default()` when it is absent or unusable
///
/// Read and decode failures are logged and otherwise treated as "no prior state".
pub fn load_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "no stored value, using defaults");
            return T::default();
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read stored value, using defaults");
            return T::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "stored value is malformed, using defaults");
        T::default()
    })
}

/// Encode a value for storage
///
/// # Errors
///
/// Returns `StoreError::SerializeError` if the value cannot be encoded.
pub fn encode<T: Serialize>(value: &T) -> Result<String, StoreError> {
    Ok(serde_json::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{FilterField, FilterState};
    use crate::tried::TriedState;

    #[test]
    fn test_tried_round_trip() {
        let store = MemoryStore::new();
        let tried: TriedState = ["Voltage"].into_iter().collect();
        store.save(TRIED_KEY, &encode(&tried).unwrap()).unwrap();

        let loaded: TriedState = load_or_default(&store, TRIED_KEY);
        assert_eq!(loaded, tried);
        assert!(loaded.contains("Voltage"));
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_filters_round_trip() {
        let store = MemoryStore::new();
        let mut filters = FilterState::default();
        filters.set(FilterField::SearchQuery("baja".into()));
        filters.set(FilterField::ExcludeKickstart(true));
        filters.toggle_country_include("US");
        filters.toggle_country_include("Japan");
        filters.toggle_countries_expanded();
        store.save(FILTERS_KEY, &encode(&filters).unwrap()).unwrap();

        let loaded: FilterState = load_or_default(&store, FILTERS_KEY);
        assert_eq!(loaded, filters);
    }

    #[test]
    fn test_absent_value_uses_default() {
        let store = MemoryStore::new();
        let tried: TriedState = load_or_default(&store, TRIED_KEY);
        let filters: FilterState = load_or_default(&store, FILTERS_KEY);
        assert!(tried.is_empty());
        assert_eq!(filters, FilterState::default());
    }

    #[test]
    fn test_malformed_value_uses_default() {
        let store = MemoryStore::new();
        store.save(TRIED_KEY, "not json").unwrap();
        store.save(FILTERS_KEY, "[1, 2, 3]").unwrap();

        let tried: TriedState = load_or_default(&store, TRIED_KEY);
        let filters: FilterState = load_or_default(&store, FILTERS_KEY);
        assert!(tried.is_empty());
        assert_eq!(filters, FilterState::default());
    }
}
