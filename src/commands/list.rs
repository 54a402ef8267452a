//! List command - show the catalog under the active filter

use crate::{DewitError, cli::ListFilterArgs, filters::View, output, session::Session};

type Result<T> = std::result::Result<T, DewitError>;

/// Saved-filter view, or a one-off view when the flags change the filter
fn filtered_view<'s>(session: &'s Session, args: &ListFilterArgs) -> View<'s> {
    if args.overrides_filter() {
        session.view_with(&args.apply(session.filters()))
    } else {
        session.view()
    }
}

/// Execute the list command
pub fn execute(session: &Session, args: &ListFilterArgs, quiet: bool) -> Result<()> {
    let view = filtered_view(session, args);
    let tried = session.tried();

    let shown: Vec<_> = view
        .items
        .iter()
        .filter(|item| {
            let is_tried = tried.contains(&item.name);
            !((args.tried && !is_tried) || (args.untried && is_tried))
        })
        .collect();

    if shown.is_empty() {
        if !quiet {
            println!("No flavors match the current filter.");
        }
        return Ok(());
    }

    for item in shown {
        println!("{}", output::item_line(item, tried.contains(&item.name), quiet));
    }

    if !quiet {
        println!();
        println!("{}", output::progress(view.tried_count, view.total_count, false));
    }
    Ok(())
}
