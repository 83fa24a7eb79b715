//! `cpass open` — derive an entry's password and deliver it.

use std::time::Duration;

use crate::cli::output;
use crate::cli::{prompt_secret, Context};
use crate::clipboard;
use crate::errors::{CpassError, Result};

/// Execute the `open` command.
pub fn execute(ctx: &Context, id: &str, print: bool) -> Result<()> {
    let print = print || ctx.settings.print_password;
    if print {
        output::warning("Will print password to standard output.");
    }

    let store = ctx.open_store()?;
    let entries = store.entries()?;
    let entry = entries
        .get(id)
        .ok_or_else(|| CpassError::EntryNotFound(id.to_string()))?;

    // Only ask for the secret once we know the entry exists.
    let secret = prompt_secret()?;
    let password = entry.derive_password(&secret)?;

    if print {
        println!("{}", password.as_str());
        return Ok(());
    }

    let hold = Duration::from_secs(ctx.settings.clip_seconds);
    if clipboard::clears_on_exit() {
        // Blocks for `hold`, so announce before rather than after.
        output::info(&hold_notice(&entry.identity(), hold));
        clipboard::copy_to_clipboard(&password, hold)?;
        output::info("Clipboard released.");
    } else {
        clipboard::copy_to_clipboard(&password, hold)?;
        output::success(&format!("Copied {} to clipboard.", entry.identity()));
    }

    Ok(())
}

fn hold_notice(identity: &str, hold: Duration) -> String {
    format!(
        "Copying {identity} to clipboard, available for {}s (Ctrl-C to clear)...",
        hold.as_secs()
    )
}
