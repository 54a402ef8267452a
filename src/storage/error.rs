//! Storage-specific error types
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`InvalidUtf8`**: A stored value is not valid UTF-8 text
//! - **`SerializeError`**: State could not be encoded as JSON
//! - **`Io`**: The background writer could not be started
//! - **`Poisoned`**: A store's lock was poisoned by a panicking writer

use thiserror::Error;

/// Errors raised by `KeyValueStore` implementations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Stored bytes for a key are not UTF-8
    #[error("Value for key '{0}' is not valid UTF-8")]
    InvalidUtf8(String),

    /// Represents a JSON encoding error
    #[error("Error during serialization: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A lock guarding the store was poisoned
    #[error("Store lock poisoned")]
    Poisoned,
}
