//! `cpass ls` — print every entry in the store.

use crate::cli::output;
use crate::cli::Context;
use crate::errors::Result;

/// Execute the `ls` command.
pub fn execute(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let entries = store.entries()?;

    if entries.is_empty() {
        output::info(&format!("No entries in store '{}' yet.", store.name()));
        output::tip("Run `cpass save <user@site>` to add your first entry.");
        return Ok(());
    }

    output::print_entries(&entries);
    Ok(())
}
