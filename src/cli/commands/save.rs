//! `cpass save` — add a new entry to the store.

use crate::cli::output;
use crate::cli::Context;
use crate::errors::Result;

/// Execute the `save` command.
pub fn execute(ctx: &Context, id: &str, length: Option<usize>) -> Result<()> {
    let store = ctx.open_store()?;
    let length = length.unwrap_or(ctx.settings.default_length);

    let entry = store.add_entry(id, length)?;

    output::success(&format!("Saved {} to '{}'", entry.describe(), store.name()));
    output::tip(&format!("Run `cpass open {}` to get its password.", entry.identity()));

    Ok(())
}
