//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation against the session. `dispatch` routes a parsed
//! command to its module.

pub mod clear;
pub mod config;
pub mod countries;
pub mod filter;
pub mod list;
pub mod stats;
pub mod toggle;

// Re-export execute functions for convenience
pub use clear::execute as clear;
pub use self::config::execute as config;
pub use countries::execute as countries;
pub use filter::execute as filter;
pub use list::execute as list;
pub use stats::execute as stats;
pub use toggle::execute as toggle;

use crate::{DewitError, cli::Commands, config::DewitConfig, session::Session};

type Result<T> = std::result::Result<T, DewitError>;

/// Open a session, run `run` against it, then write any pending state
fn with_session<O, R>(open_session: O, settings: &DewitConfig, run: R) -> Result<()>
where
    O: FnOnce(&DewitConfig) -> Result<Session>,
    R: FnOnce(&mut Session) -> Result<()>,
{
    let mut session = open_session(settings)?;
    run(&mut session)?;
    session.flush()?;
    Ok(())
}

/// Run `command`
///
/// `open_session` is only called for commands that work on saved state, so
/// `config` keeps working when the database or catalog cannot be opened.
///
/// # Errors
///
/// Returns `DewitError` if the session cannot be opened or the command fails.
pub fn dispatch<O>(command: &Commands, settings: DewitConfig, quiet: bool, open_session: O) -> Result<()>
where
    O: FnOnce(&DewitConfig) -> Result<Session>,
{
    match command {
        Commands::Config { command } => self::config::execute(settings, command, quiet),
        Commands::List { filter } => {
            with_session(open_session, &settings, |s| list::execute(s, filter, quiet))
        }
        Commands::Toggle { names } => {
            with_session(open_session, &settings, |s| toggle::execute(s, names, quiet))
        }
        Commands::Filter { command } => {
            with_session(open_session, &settings, |s| filter::execute(s, command, quiet))
        }
        Commands::Countries => {
            with_session(open_session, &settings, |s| countries::execute(s, quiet))
        }
        Commands::Stats => with_session(open_session, &settings, |s| stats::execute(s, quiet)),
        Commands::Clear => with_session(open_session, &settings, |s| clear::execute(s, quiet)),
    }
}
