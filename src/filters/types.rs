//! Filter data structures
//!
//! - `FilterState`: the persisted search/exclusion/inclusion configuration
//! - `FilterField`: a single-field replacement applied with `FilterState::set`
//! - `Exclusion`: the five exclusion toggles
//! - `FilterKey`: hashable canonical form used for memoizing derivations

use crate::catalog::Item;
use clap::ValueEnum;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Exclusion toggles offered by the filter panel
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exclusion {
    /// Hide items whose name contains "diet"
    Diet,
    /// Hide items whose name contains "kickstart"
    Kickstart,
    /// Hide items whose name contains "hard"
    Hard,
    /// Hide items whose name contains "game fuel"
    #[value(name = "game-fuel")]
    GameFuel,
    /// Hide discontinued items
    Discontinued,
}

impl Exclusion {
    /// Every exclusion, in display order
    pub const ALL: [Self; 5] = [
        Self::Diet,
        Self::Kickstart,
        Self::Hard,
        Self::GameFuel,
        Self::Discontinued,
    ];

    /// Lower-case name keyword this exclusion matches, if it is name-based
    #[must_use]
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Diet => Some("diet"),
            Self::Kickstart => Some("kickstart"),
            Self::Hard => Some("hard"),
            Self::GameFuel => Some("game fuel"),
            Self::Discontinued => None,
        }
    }

    /// Label shown in the filter panel
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Diet => "Diet",
            Self::Kickstart => "Kickstart",
            Self::Hard => "Hard",
            Self::GameFuel => "Game Fuel",
            Self::Discontinued => "Discontinued",
        }
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Replacement value for one field of `FilterState`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterField {
    SearchQuery(String),
    ExcludeDiet(bool),
    ExcludeKickstart(bool),
    ExcludeHard(bool),
    ExcludeGameFuel(bool),
    ExcludeDiscontinued(bool),
    IncludedCountries(HashSet<String>),
    CountriesExpanded(bool),
}

/// Current search, exclusion and country-inclusion configuration
///
/// Serialized with camelCase keys; `includedCountries` is written as a
/// sorted list. Missing keys fall back to their defaults when loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Free-text query, matched case-insensitively
    pub search_query: String,
    pub exclude_diet: bool,
    pub exclude_kickstart: bool,
    pub exclude_hard: bool,
    pub exclude_game_fuel: bool,
    pub exclude_discontinued: bool,
    /// Countries to restrict to; empty means no restriction
    #[serde(serialize_with = "serialize_sorted")]
    pub included_countries: HashSet<String>,
    /// Whether the country panel is open (display only)
    pub countries_expanded: bool,
}

fn serialize_sorted<S: Serializer>(set: &HashSet<String>, serializer: S) -> Result<S::Ok, S::Error> {
    let sorted: BTreeSet<&String> = set.iter().collect();
    serializer.collect_seq(sorted)
}

impl FilterState {
    /// Replace a single field
    pub fn set(&mut self, field: FilterField) {
        match field {
            FilterField::SearchQuery(query) => self.search_query = query,
            FilterField::ExcludeDiet(value) => self.exclude_diet = value,
            FilterField::ExcludeKickstart(value) => self.exclude_kickstart = value,
            FilterField::ExcludeHard(value) => self.exclude_hard = value,
            FilterField::ExcludeGameFuel(value) => self.exclude_game_fuel = value,
            FilterField::ExcludeDiscontinued(value) => self.exclude_discontinued = value,
            FilterField::IncludedCountries(countries) => self.included_countries = countries,
            FilterField::CountriesExpanded(value) => self.countries_expanded = value,
        }
    }

    /// Whether the given exclusion is enabled
    #[must_use]
    pub const fn is_excluded(&self, exclusion: Exclusion) -> bool {
        match exclusion {
            Exclusion::Diet => self.exclude_diet,
            Exclusion::Kickstart => self.exclude_kickstart,
            Exclusion::Hard => self.exclude_hard,
            Exclusion::GameFuel => self.exclude_game_fuel,
            Exclusion::Discontinued => self.exclude_discontinued,
        }
    }

    /// Flip an exclusion toggle, returning its new value
    pub fn toggle_exclusion(&mut self, exclusion: Exclusion) -> bool {
        let value = !self.is_excluded(exclusion);
        self.set(match exclusion {
            Exclusion::Diet => FilterField::ExcludeDiet(value),
            Exclusion::Kickstart => FilterField::ExcludeKickstart(value),
            Exclusion::Hard => FilterField::ExcludeHard(value),
            Exclusion::GameFuel => FilterField::ExcludeGameFuel(value),
            Exclusion::Discontinued => FilterField::ExcludeDiscontinued(value),
        });
        value
    }

    /// Flip membership of a country in the included set, returning whether it is now included
    pub fn toggle_country_include(&mut self, country: &str) -> bool {
        if self.included_countries.remove(country) {
            false
        } else {
            self.included_countries.insert(country.to_string());
            true
        }
    }

    /// Flip the country panel flag, returning its new value
    pub const fn toggle_countries_expanded(&mut self) -> bool {
        self.countries_expanded = !self.countries_expanded;
        self.countries_expanded
    }

    /// Number of included countries
    #[must_use]
    pub fn included_count(&self) -> usize {
        self.included_countries.len()
    }

    /// Enabled exclusions, in display order
    #[must_use]
    pub fn active_exclusions(&self) -> Vec<Exclusion> {
        Exclusion::ALL
            .into_iter()
            .filter(|e| self.is_excluded(*e))
            .collect()
    }

    /// Whether this configuration hides nothing
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.search_query.is_empty()
            && self.included_countries.is_empty()
            && self.active_exclusions().is_empty()
    }

    /// Test a single item against this configuration
    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        self.key().matches(item)
    }

    /// Canonical, hashable form of the filtering fields
    #[must_use]
    pub fn key(&self) -> FilterKey {
        let mut countries: Vec<String> = self.included_countries.iter().cloned().collect();
        countries.sort();
        FilterKey {
            query: self.search_query.to_lowercase(),
            excluded: Exclusion::ALL.map(|e| self.is_excluded(e)),
            countries,
        }
    }
}

/// Canonical form of the fields that affect filtering
///
/// The query is already case-folded and the countries sorted, so two filter
/// states that select the same items produce equal keys. `countries_expanded`
/// is not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterKey {
    query: String,
    excluded: [bool; 5],
    countries: Vec<String>,
}

impl FilterKey {
    const DISCONTINUED: &'static str = "discontinued";

    const fn excludes(&self, exclusion: Exclusion) -> bool {
        self.excluded[exclusion as usize]
    }

    fn matches_query(&self, item: &Item, name: &str) -> bool {
        if self.query.is_empty() {
            return true;
        }
        name.contains(&self.query)
            || item
                .countries
                .iter()
                .any(|c| c.to_lowercase().contains(&self.query))
            || (item.discontinued && Self::DISCONTINUED.contains(&self.query))
    }

    fn matches_countries(&self, item: &Item) -> bool {
        self.countries.is_empty()
            || item
                .countries
                .iter()
                .any(|c| self.countries.binary_search(c).is_ok())
    }

    /// Test a single item
    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        let name = item.name.to_lowercase();

        if !self.matches_query(item, &name) || !self.matches_countries(item) {
            return false;
        }

        Exclusion::ALL.into_iter().all(|exclusion| {
            if !self.excludes(exclusion) {
                return true;
            }
            match exclusion.keyword() {
                Some(keyword) => !name.contains(keyword),
                None => !item.discontinued,
            }
        })
    }
}
