//! Filter command - change the saved filter

use crate::{
    DewitError,
    cli::FilterCommands,
    filters::FilterField,
    output,
    session::Session,
};
use colored::Colorize;

type Result<T> = std::result::Result<T, DewitError>;

/// Execute a filter subcommand
pub fn execute(session: &mut Session, command: &FilterCommands, quiet: bool) -> Result<()> {
    match command {
        FilterCommands::Show => {
            show(session);
            return Ok(());
        }
        FilterCommands::Search { query } => {
            let query = query.clone().unwrap_or_default();
            session.set_filter_field(FilterField::SearchQuery(query));
        }
        FilterCommands::Exclude { kind } => {
            let enabled = session.toggle_exclusion(*kind);
            if !quiet {
                let state = if enabled { "on" } else { "off" };
                println!("Exclude {kind}: {state}");
            }
        }
        FilterCommands::Country { country } => {
            let listed = session.countries().contains(country);
            if !listed && !session.filters().included_countries.contains(country) {
                return Err(DewitError::InvalidInput(format!(
                    "Unknown country '{country}'. Run 'dewit countries' to see the list"
                )));
            }
            let included = session.toggle_country_include(country);
            if !quiet {
                let state = if included { "included" } else { "removed" };
                println!("{country}: {state}");
            }
        }
        FilterCommands::Expand => {
            session.toggle_countries_expanded();
        }
        FilterCommands::Reset => {
            session.reset_filters();
            if !quiet {
                println!("Filter reset");
            }
        }
    }

    if !quiet {
        let view = session.view();
        println!("{}", output::progress(view.tried_count, view.total_count, false));
    }
    Ok(())
}

fn show(session: &Session) {
    let filters = session.filters();
    for line in output::filter_summary(filters) {
        println!("{line}");
    }

    if filters.countries_expanded {
        for country in session.countries() {
            let included = filters.included_countries.contains(country);
            println!("{}", output::country_line(country, included, false));
        }
        for country in session.unlisted_included_countries() {
            println!("{} {}", output::country_line(country, true, false), "(not in catalog)".yellow());
        }
    } else {
        println!("{}", "(run 'dewit filter expand' to list countries)".dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Exclusion;
    use crate::storage::{FILTERS_KEY, KeyValueStore, MemoryStore};
    use crate::testing::sample_catalog;
    use std::sync::Arc;

    fn session() -> Session {
        Session::open(sample_catalog(), Arc::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn test_search_and_clear() {
        let mut session = session();
        let search = FilterCommands::Search { query: Some("dew".into()) };
        execute(&mut session, &search, true).unwrap();
        assert_eq!(session.filters().search_query, "dew");

        execute(&mut session, &FilterCommands::Search { query: None }, true).unwrap();
        assert!(session.filters().search_query.is_empty());
    }

    #[test]
    fn test_exclude_toggles() {
        let mut session = session();
        let exclude = FilterCommands::Exclude { kind: Exclusion::Kickstart };
        execute(&mut session, &exclude, true).unwrap();
        assert!(session.filters().exclude_kickstart);
        execute(&mut session, &exclude, true).unwrap();
        assert!(!session.filters().exclude_kickstart);
    }

    #[test]
    fn test_unknown_country_rejected() {
        let mut session = session();
        let result = execute(
            &mut session,
            &FilterCommands::Country { country: "Atlantis".into() },
            true,
        );
        assert!(matches!(result, Err(DewitError::InvalidInput(_))));
        assert!(session.filters().included_countries.is_empty());
    }

    #[test]
    fn test_unlisted_included_country_can_be_removed() {
        let store = Arc::new(MemoryStore::new());
        store
            .save(FILTERS_KEY, r#"{"includedCountries":["Atlantis"]}"#)
            .unwrap();
        let mut session = Session::open(sample_catalog(), store).unwrap();
        assert_eq!(session.view().total_count, 0);

        let command = FilterCommands::Country { country: "Atlantis".into() };
        execute(&mut session, &command, true).unwrap();
        assert!(session.filters().included_countries.is_empty());
        assert_eq!(session.view().total_count, session.catalog().len());

        let again = execute(&mut session, &command, true);
        assert!(matches!(again, Err(DewitError::InvalidInput(_))));
    }

    #[test]
    fn test_reset() {
        let mut session = session();
        execute(&mut session, &FilterCommands::Country { country: "Japan".into() }, true).unwrap();
        execute(&mut session, &FilterCommands::Expand, true).unwrap();
        execute(&mut session, &FilterCommands::Reset, true).unwrap();
        assert!(session.filters().is_unrestricted());
        assert!(!session.filters().countries_expanded);
    }
}
