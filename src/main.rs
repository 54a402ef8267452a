//! Dewit CLI application entry point
//!
//! This is the main executable for the dewit flavor checklist. It loads the
//! catalog, restores saved state from the embedded database and runs one
//! command against it.
//!
//! # Usage
//!
//! ```bash
//! # List flavors under the saved filter (default command)
//! dewit
//! dewit ls --untried
//!
//! # Check off flavors
//! dewit toggle "Baja Blast" Voltage
//!
//! # Narrow the list
//! dewit filter search baja
//! dewit filter exclude diet
//! dewit filter country Japan
//!
//! # Progress
//! dewit stats
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/dewit/config.toml` on Linux) and created on first run.
//! Set `RUST_LOG` or pass `-v` for diagnostic logging.

use dewit::{
    DewitError,
    catalog::Catalog,
    cli::Cli,
    commands,
    config::DewitConfig,
    session::Session,
    storage::SledStore,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, DewitError>;

/// Install the tracing subscriber, logging to stderr
///
/// `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dewit={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the catalog from the CLI override, the configured path, or the bundled data
fn load_catalog(cli: &Cli, config: &DewitConfig) -> Result<Catalog> {
    let catalog = match cli.catalog.as_ref().or(config.catalog.as_ref()) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading catalog");
            Catalog::load(path)?
        }
        None => Catalog::bundled()?,
    };
    Ok(catalog)
}

/// Open the session against the state database
fn open_session(cli: &Cli, config: &DewitConfig) -> Result<Session> {
    let catalog = load_catalog(cli, config)?;
    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => config.database_path()?,
    };
    tracing::debug!(path = %db_path.display(), "opening state database");

    let store = SledStore::open(&db_path)?;
    Ok(Session::with_delay(catalog, Arc::new(store), config.debounce())?)
}

/// Main entry point for the dewit application
///
/// # Errors
///
/// Returns `DewitError` if configuration, catalog or state cannot be loaded,
/// or if the command fails.
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    let config = DewitConfig::load()?;
    let quiet = cli.quiet || config.quiet;
    let command = cli.get_command();

    commands::dispatch(&command, config, quiet, |config| open_session(&cli, config))
}
