//! Dewit - a checklist of every Mountain Dew flavor you've tried
//!
//! This library provides the catalog store, the filter engine that derives the
//! visible list, and debounced persistence of the user's tried and filter
//! state into an embedded database.

use thiserror::Error;

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod filters;
pub mod output;
pub mod session;
pub mod storage;
pub mod tried;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum DewitError {
    /// Catalog could not be loaded
    #[error("Catalog error: {0}")]
    CatalogError(#[from] catalog::CatalogError),
    /// State store error
    #[error("Storage error: {0}")]
    StoreError(#[from] storage::StoreError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
