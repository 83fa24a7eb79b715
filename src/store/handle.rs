//! High-level store operations used by CLI commands.
//!
//! `Store` is a handle on one store file.  It never caches entries:
//! every call reads the file, and every mutation rewrites it in full.

use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::{CpassError, Result};

use super::entry::{Entries, Entry};
use super::format;

/// Extension of a plaintext JSON store.
pub const PLAIN_EXT: &str = "json";

/// Extension of an encrypted store.  Recognized, not supported.
pub const ENCRYPTED_EXT: &str = "age";

/// Handle on a password store file.  Create one with `Store::open`
/// or `Store::init`.
#[derive(Debug, Clone)]
pub struct Store {
    /// Path to the store file on disk.
    path: PathBuf,

    /// File name without its recognized extension(s).
    name: String,

    /// Whether the extension marks the store as encrypted.
    encrypted: bool,
}

impl Store {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open an existing store file.
    ///
    /// The extension is checked before the filesystem is touched.  An
    /// `.age` store opens fine so its name can be shown, but every data
    /// operation on it fails with `EncryptionUnsupported`.
    pub fn open(path: &Path) -> Result<Self> {
        let (name, encrypted) = classify(path)?;

        let meta = fs::metadata(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CpassError::StoreNotFound(path.to_path_buf()),
            _ => CpassError::Io(e),
        })?;
        if meta.is_dir() {
            return Err(CpassError::StoreIsDirectory(path.to_path_buf()));
        }

        tracing::debug!(path = %path.display(), encrypted, "opened store");

        Ok(Self {
            path: path.to_path_buf(),
            name,
            encrypted,
        })
    }

    /// Create a new, empty plaintext store (and its parent directories).
    pub fn init(path: &Path) -> Result<Self> {
        let (name, encrypted) = classify(path)?;
        if encrypted {
            return Err(CpassError::EncryptionUnsupported);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        format::write_empty(path)?;

        tracing::info!(path = %path.display(), "created store");

        Ok(Self {
            path: path.to_path_buf(),
            name,
            encrypted,
        })
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Load every entry, in file order.
    pub fn entries(&self) -> Result<Entries> {
        Ok(self.snapshot()?.entries)
    }

    /// Add a new entry from a `username@site` id.
    ///
    /// Fails with `EntryAlreadyExists` if the id is taken; nothing is
    /// written in that case.
    pub fn add_entry(&self, identity: &str, length: usize) -> Result<Entry> {
        self.ensure_plaintext()?;
        let entry = Entry::parse(identity, length)?;

        let mut snap = self.snapshot()?;
        let id = entry.identity();
        if snap.entries.get(&id).is_some() {
            return Err(CpassError::EntryAlreadyExists(id));
        }

        snap.entries.push(entry.clone());
        format::write_snapshot(&self.path, &snap.digest, &snap.entries)?;

        tracing::info!(store = %self.name, entry = %id, length, "added entry");
        Ok(entry)
    }

    /// Remove the entry with the given id and return it.
    pub fn remove_entry(&self, identity: &str) -> Result<Entry> {
        let mut snap = self.snapshot()?;
        let index = snap
            .entries
            .position(identity)
            .ok_or_else(|| CpassError::EntryNotFound(identity.to_string()))?;

        let removed = snap.entries.remove(index);
        format::write_snapshot(&self.path, &snap.digest, &snap.entries)?;

        tracing::info!(store = %self.name, entry = %identity, "removed entry");
        Ok(removed)
    }

    /// Returns `true` if an entry with this id exists.
    pub fn entry_exists(&self, identity: &str) -> Result<bool> {
        Ok(self.entries()?.get(identity).is_some())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the store name (e.g. "bookmarks").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the store uses the encrypted extension.
    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn snapshot(&self) -> Result<format::Snapshot> {
        self.ensure_plaintext()?;
        let snap = format::read_snapshot(&self.path)?;
        tracing::debug!(store = %self.name, entries = snap.entries.len(), "loaded entries");
        Ok(snap)
    }

    fn ensure_plaintext(&self) -> Result<()> {
        if self.encrypted {
            return Err(CpassError::EncryptionUnsupported);
        }
        Ok(())
    }
}

/// Work out a store's name and encryption flag from its path alone.
///
/// `bookmarks.json` -> ("bookmarks", false)
/// `bookmarks.json.age` -> ("bookmarks", true)
fn classify(path: &Path) -> Result<(String, bool)> {
    let unrecognized = || CpassError::UnrecognizedExtension(path.to_path_buf());

    let encrypted = match path.extension().and_then(OsStr::to_str) {
        Some(PLAIN_EXT) => false,
        Some(ENCRYPTED_EXT) => true,
        _ => return Err(unrecognized()),
    };

    let mut stem = Path::new(path.file_stem().ok_or_else(unrecognized)?);
    if encrypted && stem.extension() == Some(OsStr::new(PLAIN_EXT)) {
        stem = Path::new(stem.file_stem().ok_or_else(unrecognized)?);
    }

    Ok((stem.to_string_lossy().into_owned(), encrypted))
}
