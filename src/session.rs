//! Checklist session
//!
//! `Session` is the state object a front end owns: the catalog, the tried
//! set, the filter state and the derived-view memo. Every mutation schedules a
//! debounced save of the piece of state it touched.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use dewit::catalog::Catalog;
//! use dewit::session::Session;
//! use dewit::storage::MemoryStore;
//!
//! let catalog = Catalog::bundled().unwrap();
//! let mut session = Session::open(catalog, Arc::new(MemoryStore::new())).unwrap();
//!
//! session.toggle("Voltage");
//! let view = session.view();
//! assert_eq!(view.tried_count, 1);
//! ```

use crate::catalog::Catalog;
use crate::filters::{DeriveCache, Exclusion, FilterField, FilterState, View};
use crate::storage::{
    self, DebouncedWriter, FILTERS_KEY, KeyValueStore, StoreError, TRIED_KEY,
};
use crate::tried::TriedState;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Catalog plus the user's tried and filter state
pub struct Session {
    catalog: Catalog,
    countries: Vec<String>,
    tried: TriedState,
    filters: FilterState,
    cache: DeriveCache,
    writer: DebouncedWriter,
}

impl Session {
    /// Open a session with the default debounce delay
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the background writer cannot be started.
    pub fn open(catalog: Catalog, store: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        Self::with_delay(catalog, store, storage::debounce::DEFAULT_DELAY)
    }

    /// Open a session, restoring tried and filter state from `store`
    ///
    /// Missing or malformed stored state is replaced with defaults.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the background writer cannot be started.
    pub fn with_delay(
        catalog: Catalog,
        store: Arc<dyn KeyValueStore>,
        delay: Duration,
    ) -> Result<Self, StoreError> {
        let tried: TriedState = storage::load_or_default(&*store, TRIED_KEY);
        let filters: FilterState = storage::load_or_default(&*store, FILTERS_KEY);
        tracing::debug!(
            items = catalog.len(),
            tried = tried.len(),
            "session opened"
        );

        Ok(Self {
            countries: catalog.distinct_countries(),
            catalog,
            tried,
            filters,
            cache: DeriveCache::default(),
            writer: DebouncedWriter::new(store, delay)?,
        })
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn tried(&self) -> &TriedState {
        &self.tried
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Sorted distinct countries of the catalog
    #[must_use]
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Flip the tried mark on `name`, returning whether it is now tried
    pub fn toggle(&mut self, name: &str) -> bool {
        let now_tried = self.tried.toggle(name);
        tracing::debug!(name, tried = now_tried, "toggled item");
        self.persist_tried();
        now_tried
    }

    /// Empty the tried set
    pub fn clear_tried(&mut self) {
        self.tried.clear();
        self.persist_tried();
    }

    /// Replace one filter field
    pub fn set_filter_field(&mut self, field: FilterField) {
        tracing::debug!(?field, "set filter field");
        self.filters.set(field);
        self.persist_filters();
    }

    /// Included countries the catalog no longer lists, sorted
    ///
    /// These come from filter state saved against a different catalog. They
    /// hide every item until removed.
    #[must_use]
    pub fn unlisted_included_countries(&self) -> Vec<&str> {
        let mut unlisted: Vec<&str> = self
            .filters
            .included_countries
            .iter()
            .filter(|country| self.countries.binary_search(*country).is_err())
            .map(String::as_str)
            .collect();
        unlisted.sort_unstable();
        unlisted
    }

    /// Flip an exclusion toggle, returning its new value
    pub fn toggle_exclusion(&mut self, exclusion: Exclusion) -> bool {
        let enabled = self.filters.toggle_exclusion(exclusion);
        tracing::debug!(%exclusion, enabled, "toggled exclusion");
        self.persist_filters();
        enabled
    }

    /// Flip inclusion of `country`, returning whether it is now included
    pub fn toggle_country_include(&mut self, country: &str) -> bool {
        let included = self.filters.toggle_country_include(country);
        tracing::debug!(country, included, "toggled country");
        self.persist_filters();
        included
    }

    /// Flip the country panel flag, returning its new value
    pub fn toggle_countries_expanded(&mut self) -> bool {
        let expanded = self.filters.toggle_countries_expanded();
        self.persist_filters();
        expanded
    }

    /// Restore the default filter state
    pub fn reset_filters(&mut self) {
        self.filters = FilterState::default();
        self.persist_filters();
    }

    /// Visible items with tried and total counts
    #[must_use]
    pub fn view(&self) -> View<'_> {
        self.cache.view(&self.catalog, &self.filters, &self.tried)
    }

    /// Visible items under `filters` instead of the session's own filter state
    #[must_use]
    pub fn view_with(&self, filters: &FilterState) -> View<'_> {
        self.cache.view(&self.catalog, filters, &self.tried)
    }

    /// Number of saves still waiting for their debounce delay
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.writer.pending_count()
    }

    /// Write pending state now
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if any pending value could not be saved.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.writer.flush().map(|_| ())
    }

    fn persist_tried(&self) {
        self.schedule(TRIED_KEY, &self.tried);
    }

    fn persist_filters(&self) {
        self.schedule(FILTERS_KEY, &self.filters);
    }

    fn schedule<T: Serialize>(&self, key: &str, value: &T) {
        match storage::encode(value) {
            Ok(encoded) => self.writer.schedule(key, encoded),
            Err(e) => tracing::warn!(key, error = %e, "could not encode state"),
        }
    }
}
