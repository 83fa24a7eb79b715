//! Store module — file-backed password entry metadata.
//!
//! This module provides:
//! - `Entry` and `Entries` types (`entry`)
//! - The JSON file format and atomic rewrite protocol (`format`)
//! - The `Store` handle for loading and mutating a store file (`handle`)

pub mod entry;
pub mod format;
pub mod handle;

// Re-export the most commonly used items.
pub use entry::{Entries, Entry};
pub use handle::Store;
