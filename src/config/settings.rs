use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::derive::check_length;
use crate::errors::{CpassError, Result};

/// Directory under the user config dir that holds cpass files.
pub const APP_DIR: &str = "cpass";

/// File name of the default store.
pub const DEFAULT_STORE_FILE: &str = "bookmarks.json";

/// User-level configuration, loaded from `<config dir>/cpass/config.toml`.
///
/// Every field has a sensible default so cpass works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Store to use when `--store` is not given.
    #[serde(default)]
    pub store: Option<PathBuf>,

    /// Password length for `save` when `--length` is not given.
    #[serde(default = "default_length")]
    pub default_length: usize,

    /// Print passwords from `open` instead of copying them.
    #[serde(default)]
    pub print_password: bool,

    /// How long `open` keeps a copied password available, in seconds,
    /// where the clipboard is cleared when cpass exits.
    #[serde(default = "default_clip_seconds")]
    pub clip_seconds: u64,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_length() -> usize {
    16
}

fn default_clip_seconds() -> u64 {
    45
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: None,
            default_length: default_length(),
            print_password: false,
            clip_seconds: default_clip_seconds(),
        }
    }
}

impl Settings {
    /// Name of the config file inside the app directory.
    const FILE_NAME: &'static str = "config.toml";

    /// Load settings from `<app_dir>/config.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(app_dir: &Path) -> Result<Self> {
        let config_path = app_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            CpassError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        check_length(settings.default_length).map_err(|e| {
            CpassError::Config(format!("{}: default_length: {e}", config_path.display()))
        })?;

        // The clipboard is cleared on exit on X11/Wayland, so 0 means never pasteable.
        if settings.clip_seconds == 0 {
            return Err(CpassError::Config(format!(
                "{}: clip_seconds must be at least 1",
                config_path.display()
            )));
        }

        Ok(settings)
    }

    /// Pick the store path: explicit override, then `store` from the
    /// config file, then `<app_dir>/bookmarks.json`.
    pub fn store_path(&self, app_dir: &Path, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.store.clone())
            .unwrap_or_else(|| app_dir.join(DEFAULT_STORE_FILE))
    }
}

// ── Tests ────────────────────────────────────────────────────────────
