use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in cpass.
#[derive(Debug, Error)]
pub enum CpassError {
    // --- Store errors ---
    #[error("Store not found at {0}")]
    StoreNotFound(PathBuf),

    #[error("Store path {0} is a directory")]
    StoreIsDirectory(PathBuf),

    #[error("Store {0} has an unrecognized extension (expected .json or .age)")]
    UnrecognizedExtension(PathBuf),

    #[error("Store already exists at {0}")]
    StoreAlreadyExists(PathBuf),

    #[error("Encrypted stores are not supported yet")]
    EncryptionUnsupported,

    #[error("Store {0} changed on disk while this command was running — nothing was written")]
    ConcurrentModification(PathBuf),

    #[error("Invalid store data: {0}")]
    Decode(String),

    // --- Entry errors ---
    #[error("Entry '{0}' already exists")]
    EntryAlreadyExists(String),

    #[error("Entry '{0}' does not exist")]
    EntryNotFound(String),

    #[error("Invalid entry id '{0}' — expected <username>@<site>")]
    InvalidIdentity(String),

    #[error("Password length {length} is out of range (must be between 1 and {max})")]
    LengthOutOfRange { length: usize, max: usize },

    // --- Crypto errors ---
    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- Clipboard errors ---
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for cpass results.
pub type Result<T> = std::result::Result<T, CpassError>;
