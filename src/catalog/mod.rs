//! Catalog store
//!
//! The catalog is the immutable, ordered list of items the checklist is built
//! from. It is supplied from outside (the bundled `data/flavors.json` or a
//! user-provided JSON file) and never modified at runtime.
//!
//! # Format
//!
//! ```json
//! [
//!   { "name": "Voltage", "countries": ["US", "Canada"], "discontinued": false }
//! ]
//! ```
//!
//! Item names are unique; they are the key for tried-state lookups.

pub mod error;

pub use error::CatalogError;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

/// The flavor catalog shipped with dewit
const BUNDLED_CATALOG: &str = include_str!("../../data/flavors.json");

/// A single catalog record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Unique display name
    pub name: String,
    /// Regions where the item is or was available
    pub countries: Vec<String>,
    /// Whether the item is no longer produced
    #[serde(default)]
    pub discontinued: bool,
}

impl Item {
    /// Create a new item
    #[must_use]
    pub fn new(name: impl Into<String>, countries: &[&str], discontinued: bool) -> Self {
        Self {
            name: name.into(),
            countries: countries.iter().map(|c| (*c).to_string()).collect(),
            discontinued,
        }
    }
}

/// Ordered, validated collection of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Build a catalog from items, checking name uniqueness and country lists
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateName` if two items share a name, or
    /// `CatalogError::NoCountries` if an item lists no countries.
    pub fn new(items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.countries.is_empty() {
                return Err(CatalogError::NoCountries(item.name.clone()));
            }
            if !seen.insert(item.name.as_str()) {
                return Err(CatalogError::DuplicateName(item.name.clone()));
            }
        }
        Ok(Self { items })
    }

    /// Parse a catalog from a JSON array
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is malformed or the items are invalid.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let items: Vec<Item> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// Load a catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or is not a valid catalog.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// The catalog compiled into the binary
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the bundled data is invalid.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// All items in catalog order
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Look up an item by exact name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Check whether an item with this name exists
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sorted list of every distinct country across the catalog
    #[must_use]
    pub fn distinct_countries(&self) -> Vec<String> {
        self.items
            .iter()
            .flat_map(|item| item.countries.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
