//! Derivation of the visible item list
//!
//! `derive` is the pure filter over a catalog. `DeriveCache` memoizes the
//! matched positions per `FilterKey` so re-rendering with an unchanged filter
//! does not rescan the catalog.

use super::types::{FilterKey, FilterState};
use crate::catalog::{Catalog, Item};
use crate::tried::TriedState;
use moka::sync::Cache;
use std::sync::Arc;

/// Items of `catalog` that pass `filter`, in catalog order
#[must_use]
pub fn derive<'c>(catalog: &'c Catalog, filter: &FilterState) -> Vec<&'c Item> {
    let key = filter.key();
    catalog.items().iter().filter(|item| key.matches(item)).collect()
}

/// Number of matched items marked as tried
#[must_use]
pub fn tried_count(matched: &[&Item], tried: &TriedState) -> usize {
    matched.iter().filter(|item| tried.contains(&item.name)).count()
}

/// Number of matched items
#[must_use]
pub const fn total_count(matched: &[&Item]) -> usize {
    matched.len()
}

/// Derived view of the catalog under the active filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View<'c> {
    pub items: Vec<&'c Item>,
    pub tried_count: usize,
    pub total_count: usize,
}

impl<'c> View<'c> {
    /// Build a view from already-matched items
    #[must_use]
    pub fn new(items: Vec<&'c Item>, tried: &TriedState) -> Self {
        let tried_count = tried_count(&items, tried);
        let total_count = total_count(&items);
        Self {
            items,
            tried_count,
            total_count,
        }
    }
}

/// Memo of derivation results for a single catalog
///
/// Entries hold positions into the catalog, so a cache must only ever be used
/// with the catalog it was first queried with.
pub struct DeriveCache {
    cache: Cache<FilterKey, Arc<Vec<usize>>>,
}

impl DeriveCache {
    /// Create a cache holding up to `max_capacity` filter results
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_capacity).build(),
        }
    }

    /// Catalog positions matched by `filter`, computed at most once per key
    #[must_use]
    pub fn matched_indices(&self, catalog: &Catalog, filter: &FilterState) -> Arc<Vec<usize>> {
        let key = filter.key();
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }

        let indices: Arc<Vec<usize>> = Arc::new(
            catalog
                .items()
                .iter()
                .enumerate()
                .filter(|(_, item)| key.matches(item))
                .map(|(index, _)| index)
                .collect(),
        );
        tracing::trace!(matched = indices.len(), "derived filter result");
        self.cache.insert(key, Arc::clone(&indices));
        indices
    }

    /// Memoized equivalent of `derive`
    #[must_use]
    pub fn derive<'c>(&self, catalog: &'c Catalog, filter: &FilterState) -> Vec<&'c Item> {
        let items = catalog.items();
        self.matched_indices(catalog, filter)
            .iter()
            .filter_map(|&index| items.get(index))
            .collect()
    }

    /// Memoized view with tried and total counts
    #[must_use]
    pub fn view<'c>(&self, catalog: &'c Catalog, filter: &FilterState, tried: &TriedState) -> View<'c> {
        View::new(self.derive(catalog, filter), tried)
    }
}

impl Default for DeriveCache {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{Exclusion, FilterField};
    use crate::testing::{sample_catalog, two_item_catalog};

    fn names<'a>(items: &[&'a Item]) -> Vec<&'a str> {
        items.iter().map(|item| item.name.as_str()).collect()
    }

    fn is_subsequence(sub: &[&Item], catalog: &Catalog) -> bool {
        let mut rest = catalog.items().iter();
        sub.iter().all(|wanted| rest.any(|item| item == *wanted))
    }

    #[test]
    fn test_default_filter_returns_full_catalog_in_order() {
        let catalog = sample_catalog();
        let matched = derive(&catalog, &FilterState::default());
        assert_eq!(matched.len(), catalog.len());
        assert!(matched.iter().zip(catalog.items()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_exclude_diet_then_discontinued() {
        let catalog = two_item_catalog();
        let mut filter = FilterState::default();
        filter.set(FilterField::ExcludeDiet(true));
        assert_eq!(names(&derive(&catalog, &filter)), vec!["Voltage"]);

        filter.set(FilterField::ExcludeDiscontinued(true));
        assert!(derive(&catalog, &filter).is_empty());
    }

    #[test]
    fn test_discontinued_query_matches_every_discontinued_item() {
        let catalog = sample_catalog();
        let mut filter = FilterState::default();
        filter.set(FilterField::SearchQuery("discontinued".into()));
        let matched = derive(&catalog, &filter);
        let expected: Vec<&Item> = catalog.items().iter().filter(|i| i.discontinued).collect();
        assert_eq!(matched, expected);
    }

    #[test]
    fn test_results_preserve_catalog_order() {
        let catalog = sample_catalog();
        let mut configs = vec![FilterState::default()];
        for exclusion in Exclusion::ALL {
            let mut filter = FilterState::default();
            filter.toggle_exclusion(exclusion);
            configs.push(filter);
        }
        for query in ["a", "us", "dew", "zzz", "disc"] {
            let mut filter = FilterState::default();
            filter.set(FilterField::SearchQuery(query.into()));
            configs.push(filter);
        }
        let mut by_country = FilterState::default();
        by_country.toggle_country_include("Japan");
        configs.push(by_country);

        for filter in &configs {
            let matched = derive(&catalog, filter);
            assert!(is_subsequence(&matched, &catalog), "reordered for {filter:?}");
        }
    }

    #[test]
    fn test_empty_country_set_is_no_restriction() {
        let catalog = sample_catalog();
        let mut filter = FilterState::default();
        filter.set(FilterField::IncludedCountries(Default::default()));
        assert_eq!(derive(&catalog, &filter).len(), catalog.len());
    }

    #[test]
    fn test_country_filter() {
        let catalog = sample_catalog();
        let mut filter = FilterState::default();
        filter.toggle_country_include("Japan");
        assert_eq!(names(&derive(&catalog, &filter)), vec!["Pitch Black", "Mountain Dew Green Tea"]);
    }

    #[test]
    fn test_counts() {
        let catalog = two_item_catalog();
        let mut tried = TriedState::default();
        tried.toggle("Voltage");
        tried.toggle("Not In Catalog");

        let matched = derive(&catalog, &FilterState::default());
        assert_eq!(tried_count(&matched, &tried), 1);
        assert_eq!(total_count(&matched), 2);
        assert!(tried_count(&matched, &tried) <= total_count(&matched));
    }

    #[test]
    fn test_cache_agrees_with_derive() {
        let catalog = sample_catalog();
        let cache = DeriveCache::default();
        let mut filter = FilterState::default();
        filter.set(FilterField::SearchQuery("black".into()));

        let first = cache.derive(&catalog, &filter);
        let second = cache.derive(&catalog, &filter);
        assert_eq!(first, derive(&catalog, &filter));
        assert_eq!(first, second);
    }

    #[test]
    fn test_cache_returns_same_allocation_for_equal_keys() {
        let catalog = sample_catalog();
        let cache = DeriveCache::default();
        let mut a = FilterState::default();
        a.set(FilterField::SearchQuery("Dew".into()));
        let mut b = a.clone();
        b.set(FilterField::SearchQuery("DEW".into()));
        b.toggle_countries_expanded();

        let first = cache.matched_indices(&catalog, &a);
        let second = cache.matched_indices(&catalog, &b);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_view_counts() {
        let catalog = sample_catalog();
        let cache = DeriveCache::default();
        let mut tried = TriedState::default();
        tried.toggle("Voltage");
        tried.toggle("Diet Code Red");

        let mut filter = FilterState::default();
        filter.set(FilterField::ExcludeDiet(true));
        let view = cache.view(&catalog, &filter, &tried);
        assert_eq!(view.total_count, catalog.len() - 1);
        assert_eq!(view.tried_count, 1);
    }
}
