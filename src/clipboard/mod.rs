//! Clipboard delivery for derived passwords.
//!
//! - WSL: piped into Windows' `clip.exe`, since the Linux side usually has
//!   no display server to own a selection.
//! - Linux/BSD: `arboard`, holding the selection until `hold` elapses or
//!   another program takes it.  X11 and Wayland clipboards are served by
//!   the owning process, so the password disappears when cpass exits.
//! - macOS/Windows: `arboard`; the OS keeps the contents after exit.

use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Duration;

use crate::errors::{CpassError, Result};

/// `clip.exe` as seen from inside WSL.
const WSL_CLIP_PATH: &str = "/mnt/c/Windows/system32/clip.exe";

/// Kernel release string; contains "microsoft" under WSL.
const OS_RELEASE_PATH: &str = "/proc/sys/kernel/osrelease";

/// Copy `text` to the clipboard.
///
/// On platforms where the clipboard lives only as long as this process,
/// blocks for up to `hold` so the text can be pasted.
pub fn copy_to_clipboard(text: &str, hold: Duration) -> Result<()> {
    if is_wsl() {
        tracing::debug!("copying through clip.exe");
        return copy_with_clip_exe(text);
    }
    copy_with_arboard(text, hold)
}

/// Whether the clipboard is cleared once cpass exits.
pub fn clears_on_exit() -> bool {
    cfg!(all(unix, not(target_os = "macos"))) && !is_wsl()
}

fn is_wsl() -> bool {
    std::fs::read_to_string(OS_RELEASE_PATH)
        .map(|release| is_wsl_release(&release))
        .unwrap_or(false)
}

fn is_wsl_release(release: &str) -> bool {
    release.to_ascii_lowercase().contains("microsoft")
}

fn copy_with_clip_exe(text: &str) -> Result<()> {
    let mut child = Command::new(WSL_CLIP_PATH)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| CpassError::Clipboard(format!("failed to launch clip.exe: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| CpassError::Clipboard(format!("failed to write to clip.exe: {e}")))?;
    }

    let status = child
        .wait()
        .map_err(|e| CpassError::Clipboard(format!("clip.exe did not finish: {e}")))?;
    if !status.success() {
        return Err(CpassError::Clipboard(format!(
            "clip.exe exited with code {}",
            status.code().unwrap_or(-1)
        )));
    }
    Ok(())
}

#[cfg(all(unix, not(target_os = "macos")))]
fn copy_with_arboard(text: &str, hold: Duration) -> Result<()> {
    use arboard::SetExtLinux;
    use std::time::Instant;

    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| CpassError::Clipboard(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set()
        .wait_until(Instant::now() + hold)
        .text(text)
        .map_err(|e| CpassError::Clipboard(e.to_string()))
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn copy_with_arboard(text: &str, _hold: Duration) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| CpassError::Clipboard(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(text)
        .map_err(|e| CpassError::Clipboard(e.to_string()))
}
