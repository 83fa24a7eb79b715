//! CLI module — Clap argument parser, prompts, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{self, Settings};
use crate::errors::{CpassError, Result};
use crate::store::Store;

/// Environment variable holding the master secret for non-interactive use.
pub const SECRET_ENV: &str = "CPASS_SECRET";

/// cpass: derive site passwords from one master secret.
#[derive(Parser)]
#[command(
    name = "cpass",
    about = "Deterministic password manager — stores metadata, derives passwords",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Password store file (default: <config dir>/cpass/bookmarks.json)
    #[arg(short, long, global = true, env = "CPASS_STORE")]
    pub store: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty password store
    Init,

    /// List all password entries
    #[command(visible_alias = "list")]
    Ls,

    /// Find entries whose id contains a substring
    Find {
        /// Text to look for in `user@site`
        substring: String,
    },

    /// Derive an entry's password and copy it to the clipboard
    Open {
        /// Entry id (user@site)
        id: String,
        /// Print the password to stdout instead of copying it
        #[arg(short, long)]
        print: bool,
    },

    /// Save a new password entry
    Save {
        /// Entry id (user@site)
        id: String,
        /// Password length, 1-44 (default: 16, or `default_length` from config)
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Remove a password entry
    #[command(visible_alias = "remove")]
    Rm {
        /// Entry id (user@site)
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Everything a command needs, resolved once per invocation.
#[derive(Debug, Clone)]
pub struct Context {
    /// User settings from `config.toml` (or defaults).
    pub settings: Settings,

    /// The store file this invocation works on.
    pub store_path: PathBuf,
}

impl Context {
    /// Load settings and resolve the store path for this invocation.
    ///
    /// With an explicit `--store`, a missing config directory is not an
    /// error; defaults are used instead.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let explicit = cli.store.as_deref();

        let ctx = match config::app_dir() {
            Ok(app_dir) => {
                let settings = Settings::load(&app_dir)?;
                let store_path = settings.store_path(&app_dir, explicit);
                Ok(Self {
                    settings,
                    store_path,
                })
            }
            Err(e) => match explicit {
                Some(path) => Ok(Self {
                    settings: Settings::default(),
                    store_path: path.to_path_buf(),
                }),
                None => Err(e),
            },
        }?;

        tracing::debug!(store = %ctx.store_path.display(), "resolved store path");
        Ok(ctx)
    }

    /// Open the store this invocation works on.
    pub fn open_store(&self) -> Result<Store> {
        Store::open(&self.store_path)
    }
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the master secret, trying in order:
/// 1. `CPASS_SECRET` env var (scripting)
/// 2. The first line of stdin, when stdin is piped
/// 3. Interactive prompt without echo
///
/// Returns `Zeroizing` bytes so the secret is wiped from memory on drop.
pub fn prompt_secret() -> Result<Zeroizing<Vec<u8>>> {
    if let Ok(secret) = std::env::var(SECRET_ENV) {
        if !secret.is_empty() {
            return Ok(Zeroizing::new(secret.into_bytes()));
        }
    }

    if !io::stdin().is_terminal() {
        let mut line = Zeroizing::new(String::new());
        io::stdin().lock().read_line(&mut line)?;
        let secret = line.trim_end_matches(['\r', '\n']);
        if secret.is_empty() {
            return Err(CpassError::CommandFailed(
                "no secret on standard input".into(),
            ));
        }
        return Ok(Zeroizing::new(secret.as_bytes().to_vec()));
    }

    let secret = dialoguer::Password::new()
        .with_prompt("Secret")
        .interact()
        .map_err(|e| CpassError::CommandFailed(format!("secret prompt: {e}")))?;
    Ok(Zeroizing::new(secret.into_bytes()))
}

/// Ask a yes/no question, defaulting to no.
pub fn confirm(question: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(question)
        .default(false)
        .interact()
        .map_err(|e| CpassError::CommandFailed(format!("confirm prompt: {e}")))
}
