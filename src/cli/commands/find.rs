//! `cpass find` — print entries whose id contains a substring.

use crate::cli::output;
use crate::cli::Context;
use crate::errors::Result;

/// Execute the `find` command.
pub fn execute(ctx: &Context, substring: &str) -> Result<()> {
    let store = ctx.open_store()?;
    let matches = store.entries()?.filter(substring);

    if matches.is_empty() {
        output::info(&format!("No entries match '{substring}'."));
        return Ok(());
    }

    output::print_entries(&matches);
    Ok(())
}
