//! Countries command - list every country in the catalog

use crate::{DewitError, output, session::Session};
use colored::Colorize;

type Result<T> = std::result::Result<T, DewitError>;

/// Execute the countries command
pub fn execute(session: &Session, quiet: bool) -> Result<()> {
    let included = &session.filters().included_countries;
    if !quiet {
        println!("Countries in catalog:");
    }
    for country in session.countries() {
        println!("{}", output::country_line(country, included.contains(country), quiet));
    }

    let unlisted = session.unlisted_included_countries();
    if !unlisted.is_empty() && !quiet {
        println!();
        println!("{}", "Included but not in catalog:".yellow());
    }
    for country in unlisted {
        println!("{}", output::country_line(country, true, quiet));
    }
    Ok(())
}
