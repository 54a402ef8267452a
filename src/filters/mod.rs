//! Filter engine
//!
//! This module holds the filter configuration and the pure derivation that
//! turns `(Catalog, FilterState)` into the visible list of items.
//!
//! # Matching rules
//!
//! An item is visible when every active rule passes:
//!
//! - **Search**: the case-folded query is a substring of the name, of any
//!   country, or (for discontinued items) of the word `"discontinued"`
//! - **Countries**: when the included set is non-empty, at least one of the
//!   item's countries is in it
//! - **Exclusions**: each enabled exclusion removes items whose lower-cased
//!   name contains its keyword (`diet`, `kickstart`, `hard`, `game fuel`) or,
//!   for `Discontinued`, items flagged as discontinued
//!
//! # Examples
//!
//! ```
//! use dewit::catalog::{Catalog, Item};
//! use dewit::filters::{derive, FilterState, Exclusion};
//!
//! let catalog = Catalog::new(vec![
//!     Item::new("Diet Code Red", &["US"], false),
//!     Item::new("Voltage", &["US", "CA"], true),
//! ]).unwrap();
//!
//! let mut filter = FilterState::default();
//! filter.toggle_exclusion(Exclusion::Diet);
//!
//! let visible = derive(&catalog, &filter);
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].name, "Voltage");
//! ```

pub mod types;
pub mod view;

pub use view::{DeriveCache, View, derive, total_count, tried_count};
pub use types::{Exclusion, FilterField, FilterKey, FilterState};
