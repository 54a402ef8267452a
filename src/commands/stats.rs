//! Stats command - tried/total counter for the saved filter

use crate::{DewitError, output, session::Session};

type Result<T> = std::result::Result<T, DewitError>;

/// Execute the stats command
pub fn execute(session: &Session, quiet: bool) -> Result<()> {
    let view = session.view();
    println!("{}", output::progress(view.tried_count, view.total_count, quiet));

    if !quiet && !session.filters().is_unrestricted() {
        let all = session.view_with(&Default::default());
        println!("({} / {} across the whole catalog)", all.tried_count, all.total_count);
    }
    Ok(())
}
