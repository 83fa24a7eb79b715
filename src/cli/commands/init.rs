//! `cpass init` — create a new, empty password store.

use crate::cli::output;
use crate::cli::Context;
use crate::errors::Result;
use crate::store::Store;

/// Execute the `init` command.
pub fn execute(ctx: &Context) -> Result<()> {
    let store = Store::init(&ctx.store_path)?;

    output::success(&format!(
        "Created store '{}' at {}",
        store.name(),
        store.path().display()
    ));
    output::tip("Run `cpass save <user@site>` to add an entry.");

    Ok(())
}
