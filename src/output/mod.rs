//! Output formatting for CLI display
//!
//! This module turns items, counts and filter state into printable lines.
//! In quiet mode only bare values are produced so output can be piped.

use crate::catalog::Item;
use crate::filters::{Exclusion, FilterState};
use colored::Colorize;

/// Format an item with its tried mark and availability
#[must_use]
pub fn item_line(item: &Item, tried: bool, quiet: bool) -> String {
    if quiet {
        return item.name.clone();
    }

    let mark = if tried { "[x]".green().bold() } else { "[ ]".dimmed() };
    let name = if tried { item.name.green() } else { item.name.normal() };
    let countries = format!("({})", item.countries.join(", ")).dimmed();

    if item.discontinued {
        format!("  {mark} {name} {countries} {}", "discontinued".red())
    } else {
        format!("  {mark} {name} {countries}")
    }
}

/// Format the progress counter, e.g. `3 / 41 tried`
#[must_use]
pub fn progress(tried_count: usize, total_count: usize, quiet: bool) -> String {
    if quiet {
        format!("{tried_count}/{total_count}")
    } else {
        format!(
            "{} / {} tried",
            tried_count.to_string().green().bold(),
            total_count
        )
    }
}

/// Format a country, marking it when included
#[must_use]
pub fn country_line(country: &str, included: bool, quiet: bool) -> String {
    if quiet {
        country.to_string()
    } else if included {
        format!("  {} {}", "*".green(), country.green())
    } else {
        format!("    {country}")
    }
}

/// Human-readable summary of a filter state
#[must_use]
pub fn filter_summary(filters: &FilterState) -> Vec<String> {
    let query = if filters.search_query.is_empty() {
        "(none)".to_string()
    } else {
        format!("\"{}\"", filters.search_query)
    };

    let exclusions: Vec<String> = Exclusion::ALL
        .into_iter()
        .map(|e| {
            if filters.is_excluded(e) {
                e.label().green().to_string()
            } else {
                e.label().dimmed().to_string()
            }
        })
        .collect();

    let mut countries: Vec<&str> = filters.included_countries.iter().map(String::as_str).collect();
    countries.sort_unstable();
    let countries_heading = if countries.is_empty() {
        "Include Countries".to_string()
    } else {
        format!("Include Countries ({})", filters.included_count())
    };
    let countries_value = if countries.is_empty() {
        "(all)".to_string()
    } else {
        countries.join(", ")
    };

    vec![
        format!("Search: {query}"),
        format!("Exclude: {}", exclusions.join(" ")),
        format!("{countries_heading}: {countries_value}"),
    ]
}
