//! Tried-item tracking
//!
//! `TriedState` is the set of item names the user has checked off. Names are
//! not validated against the catalog; toggling an unknown name is allowed and
//! simply never shows up in a view.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Set of item names marked as tried
///
/// Serialized as a sorted list of names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TriedState {
    names: HashSet<String>,
}

impl TriedState {
    /// Create an empty tried set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `name`, returning whether it is now tried
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.names.remove(name) {
            false
        } else {
            self.names.insert(name.to_string());
            true
        }
    }

    /// Whether `name` is marked as tried
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of tried names
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Forget every tried name
    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Tried names in lexicographic order
    #[must_use]
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.iter().cloned().collect();
        names.sort();
        names
    }
}

impl From<Vec<String>> for TriedState {
    fn from(names: Vec<String>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }
}

impl From<TriedState> for Vec<String> {
    fn from(state: TriedState) -> Self {
        state.sorted_names()
    }
}

impl<S: Into<String>> FromIterator<S> for TriedState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
