//! On-disk store format and the rewrite protocol.
//!
//! A store file is a plain JSON array:
//!
//! ```text
//! [
//!   {
//!     "url": "example.com",
//!     "username": "alice",
//!     "length": 16
//!   }
//! ]
//! ```
//!
//! Reads accept any JSON whitespace.  Writes always use two-space
//! indentation and go through a temp file + rename so a failed write
//! never leaves a truncated store behind.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::entry::Entries;
use crate::errors::{CpassError, Result};

/// SHA-256 of a store file's raw bytes.
pub type ContentDigest = [u8; 32];

/// Entries as they were read, plus the digest of the bytes they came from.
///
/// The digest is checked again right before a rewrite so that a store
/// changed by another process in the meantime is not silently clobbered.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub entries: Entries,
    pub digest: ContentDigest,
}

/// Read and decode a store file in one pass.
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let bytes = fs::read(path)?;
    let entries = decode_entries(&bytes)?;
    Ok(Snapshot {
        entries,
        digest: digest(&bytes),
    })
}

pub fn decode_entries(bytes: &[u8]) -> Result<Entries> {
    serde_json::from_slice(bytes).map_err(|e| CpassError::Decode(e.to_string()))
}

/// Serialize entries with two-space indentation and a trailing newline.
pub fn encode_entries(entries: &Entries) -> Result<Vec<u8>> {
    let mut buf = serde_json::to_vec_pretty(entries)
        .map_err(|e| CpassError::Serialization(format!("entries: {e}")))?;
    buf.push(b'\n');
    Ok(buf)
}

pub fn digest(bytes: &[u8]) -> ContentDigest {
    Sha256::digest(bytes).into()
}

/// Replace the store file at `path` with `entries`.
///
/// 1. Re-read the file and compare its digest with `expected`.
/// 2. Write the new content to a freshly created `.<name>.XXXXXX.tmp`
///    next to the store.
/// 3. Copy the store's permissions onto the temp file.
/// 4. Rename the temp file over the store.
///
/// The temp file gets a random name and is opened with `O_EXCL`, so a
/// leftover file or symlink at a predictable path is never written
/// through, and two writers never share one.  If anything fails the temp
/// file is removed and the store is left as it was.  There is no lock: a writer that lands between steps 1 and 4 can
/// still be overwritten.
pub fn write_snapshot(path: &Path, expected: &ContentDigest, entries: &Entries) -> Result<()> {
    let buf = encode_entries(entries)?;

    // Follow symlinks so the rename replaces the real file, not the link.
    let target = fs::canonicalize(path)?;

    let current = fs::read(&target)?;
    if digest(&current) != *expected {
        tracing::warn!(path = %path.display(), "store changed on disk, refusing to overwrite");
        return Err(CpassError::ConcurrentModification(path.to_path_buf()));
    }

    replace_with(&target, &buf)?;

    tracing::debug!(path = %path.display(), entries = entries.len(), "store rewritten");
    Ok(())
}

/// Create a brand-new store file containing an empty array.
///
/// Fails with `StoreAlreadyExists` instead of truncating an existing file.
pub fn write_empty(path: &Path) -> Result<()> {
    let buf = encode_entries(&Entries::new())?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => {
                CpassError::StoreAlreadyExists(path.to_path_buf())
            }
            _ => CpassError::Io(e),
        })?;
    file.write_all(&buf)?;
    file.sync_all()?;
    Ok(())
}

fn replace_with(target: &Path, buf: &[u8]) -> Result<()> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let name = target.file_name().unwrap_or_default().to_string_lossy();

    // Dropped (and deleted) on every early return below.
    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{name}."))
        .suffix(".tmp")
        .tempfile_in(parent)?;
    tmp.write_all(buf)?;
    tmp.as_file().sync_all()?;

    let perms = fs::metadata(target)?.permissions();
    tmp.as_file().set_permissions(perms)?;

    // Same directory, so the rename stays on one filesystem.
    tmp.persist(target).map_err(|e| CpassError::Io(e.error))?;
    Ok(())
}
