//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for dewit using the `clap` crate.
//!
//! # Commands
//!
//! - **list**: Show the catalog under the saved filter (default)
//! - **toggle**: Mark or unmark items as tried
//! - **filter**: Change the saved search, exclusions and country set
//! - **countries**: List every country in the catalog
//! - **stats**: Show the tried/total counter
//! - **clear**: Forget every tried item
//! - **config**: Read and change settings
//!
//! # Design Features
//!
//! - Global `--quiet` flag for scripting-friendly output
//! - Command aliases (e.g., `ls` for `list`, `t` for `toggle`)
//! - Inline filter flags on `list` that apply to one invocation only

use crate::filters::{Exclusion, FilterField, FilterState};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "dewit")]
#[command(about = "Check off every Mountain Dew flavor you've tried", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Catalog JSON file to use instead of the configured one
    #[arg(long = "catalog", value_name = "FILE", global = true)]
    pub catalog: Option<PathBuf>,

    /// State database directory to use instead of the configured one
    #[arg(long = "db", value_name = "DIR", global = true)]
    pub db: Option<PathBuf>,
}

/// Inline filter overrides for a single `list` invocation
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilterArgs {
    /// Search query (replaces the saved query)
    #[arg(short = 's', long = "search", value_name = "QUERY")]
    pub search: Option<String>,

    /// Additionally exclude these groups
    #[arg(short = 'e', long = "exclude", value_name = "KIND", num_args = 1..)]
    pub exclude: Vec<Exclusion>,

    /// Additionally include these countries
    #[arg(short = 'c', long = "country", value_name = "COUNTRY", num_args = 1..)]
    pub countries: Vec<String>,

    /// Only show tried items
    #[arg(long = "tried", conflicts_with = "untried")]
    pub tried: bool,

    /// Only show items not yet tried
    #[arg(long = "untried", conflicts_with = "tried")]
    pub untried: bool,
}

impl ListFilterArgs {
    /// Whether any flag changes which items match
    #[must_use]
    pub fn overrides_filter(&self) -> bool {
        self.search.is_some() || !self.exclude.is_empty() || !self.countries.is_empty()
    }

    /// Saved filter state with these overrides applied on top
    #[must_use]
    pub fn apply(&self, saved: &FilterState) -> FilterState {
        let mut filters = saved.clone();
        if let Some(query) = &self.search {
            filters.set(FilterField::SearchQuery(query.clone()));
        }
        for exclusion in &self.exclude {
            if !filters.is_excluded(*exclusion) {
                filters.toggle_exclusion(*exclusion);
            }
        }
        filters
            .included_countries
            .extend(self.countries.iter().cloned());
        filters
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List items under the saved filter (default)
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        filter: ListFilterArgs,
    },

    /// Mark or unmark items as tried
    #[command(visible_alias = "t")]
    Toggle {
        /// Exact item names
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },

    /// Change the saved filter
    #[command(visible_alias = "f")]
    Filter {
        #[command(subcommand)]
        command: FilterCommands,
    },

    /// List every country in the catalog
    Countries,

    /// Show how many visible items have been tried
    Stats,

    /// Forget every tried item
    Clear,

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Saved filter subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum FilterCommands {
    /// Show the saved filter
    Show,

    /// Set the search query (omit to clear it)
    Search {
        #[arg(value_name = "QUERY")]
        query: Option<String>,
    },

    /// Toggle an exclusion
    Exclude {
        #[arg(value_name = "KIND")]
        kind: Exclusion,
    },

    /// Toggle inclusion of a country
    Country {
        #[arg(value_name = "COUNTRY")]
        country: String,
    },

    /// Toggle whether the country list is expanded in `filter show`
    Expand,

    /// Restore the default filter
    Reset,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print every setting
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., debounce_ms=200)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., quiet)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to List if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::List {
            filter: ListFilterArgs::default(),
        })
    }
}
