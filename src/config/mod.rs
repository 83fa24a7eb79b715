//! Configuration — user settings and config directory resolution.

pub mod settings;

use std::ffi::OsString;
use std::path::PathBuf;

use directories::BaseDirs;

use crate::errors::{CpassError, Result};

pub use settings::{Settings, APP_DIR, DEFAULT_STORE_FILE};

/// Environment variable that points cpass at a different app directory.
pub const CONFIG_DIR_ENV: &str = "CPASS_CONFIG_DIR";

/// The cpass app directory, e.g. `~/.config/cpass`.
///
/// `CPASS_CONFIG_DIR` wins when set; otherwise this is `cpass` under the
/// platform's user config directory.
pub fn app_dir() -> Result<PathBuf> {
    let user_config = BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf());
    resolve_app_dir(std::env::var_os(CONFIG_DIR_ENV), user_config)
}

/// Same as `app_dir`, with the override and the platform directory passed in.
pub fn resolve_app_dir(
    override_dir: Option<OsString>,
    user_config: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    user_config.map(|dir| dir.join(APP_DIR)).ok_or_else(|| {
        CpassError::Config("cannot locate a config directory — pass --store explicitly".into())
    })
}
