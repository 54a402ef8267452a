//! Toggle command - mark or unmark items as tried

use crate::{DewitError, session::Session};
use colored::Colorize;

type Result<T> = std::result::Result<T, DewitError>;

/// Execute the toggle command
///
/// Names are matched exactly first, then case-insensitively. Names not in the
/// catalog are still toggled, with a warning.
pub fn execute(session: &mut Session, names: &[String], quiet: bool) -> Result<()> {
    for name in names {
        let resolved = resolve_name(session, name);
        if !session.catalog().contains(&resolved) {
            eprintln!("{} '{}' is not in the catalog", "warning:".yellow(), resolved);
        }

        let now_tried = session.toggle(&resolved);
        if !quiet {
            if now_tried {
                println!("{} {}", "Tried:".green(), resolved);
            } else {
                println!("{} {}", "Untried:".dimmed(), resolved);
            }
        }
    }
    Ok(())
}

fn resolve_name(session: &Session, name: &str) -> String {
    if session.catalog().contains(name) {
        return name.to_string();
    }
    let folded = name.to_lowercase();
    session
        .catalog()
        .items()
        .iter()
        .find(|item| item.name.to_lowercase() == folded)
        .map_or_else(|| name.to_string(), |item| item.name.clone())
}
