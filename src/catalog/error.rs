//! Catalog-specific error types
//!
//! A catalog is rejected as a whole when any record breaks the catalog
//! invariants; there is no partial loading.

use std::io;
use thiserror::Error;

/// Errors that can occur while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The catalog is not a valid JSON array of items
    #[error("Error while parsing catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two items share the same name
    #[error("Duplicate item name '{0}'")]
    DuplicateName(String),

    /// An item lists no countries
    #[error("Item '{0}' has no countries")]
    NoCountries(String),
}
