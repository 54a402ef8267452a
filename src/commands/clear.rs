//! Clear command - forget every tried item

use crate::{DewitError, session::Session};
use std::io::{self, Write};

type Result<T> = std::result::Result<T, DewitError>;

/// Prompt user for yes/no confirmation
///
/// Returns `Ok(true)` without prompting in quiet mode.
///
/// # Errors
/// Returns `DewitError` if I/O operations fail.
fn confirm(prompt: &str, quiet: bool) -> Result<bool> {
    if quiet {
        return Ok(true);
    }

    print!("{prompt} [y/n]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let response = input.trim().to_lowercase();

    Ok(matches!(response.as_str(), "y" | "yes"))
}

/// Execute the clear command
pub fn execute(session: &mut Session, quiet: bool) -> Result<()> {
    let count = session.tried().len();
    if count == 0 {
        if !quiet {
            println!("Nothing to clear.");
        }
        return Ok(());
    }

    if !confirm(&format!("Forget {count} tried flavor(s)?"), quiet)? {
        println!("Cancelled.");
        return Ok(());
    }

    session.clear_tried();
    if !quiet {
        println!("Cleared {count} tried flavor(s).");
    }
    Ok(())
}
