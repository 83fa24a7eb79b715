//! `cpass rm` — remove an entry from the store.

use crate::cli::output;
use crate::cli::{confirm, Context};
use crate::errors::{CpassError, Result};

/// Execute the `rm` command.
pub fn execute(ctx: &Context, id: &str, force: bool) -> Result<()> {
    let store = ctx.open_store()?;

    // Check first so we never ask about an entry that isn't there.
    if !store.entry_exists(id)? {
        return Err(CpassError::EntryNotFound(id.to_string()));
    }

    // Unless --force is set, ask for confirmation before removing.
    if !force && !confirm(&format!("Remove entry '{id}'?"))? {
        output::info("Cancelled.");
        return Ok(());
    }

    let removed = store.remove_entry(id)?;
    output::success(&format!("Removed {}", removed.describe()));

    Ok(())
}
