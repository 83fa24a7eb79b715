//! `Entry` and `Entries` — the metadata records kept in a store.
//!
//! An entry never holds a password.  It holds the coordinates needed to
//! regenerate one: the username, the site and the number of characters
//! to keep.  `username@site` is both the entry's identity and its salt.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::crypto::derive::{check_length, derive_password};
use crate::errors::{CpassError, Result};

/// A single password entry as stored on disk.
///
/// Field order matches the JSON layout: `url`, `username`, `length`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The site the password is for (e.g. "example.com").
    pub url: String,

    /// The account name on that site.  May contain `@`.
    pub username: String,

    /// Number of derived characters to keep.
    pub length: usize,
}

impl Entry {
    pub fn new(username: impl Into<String>, url: impl Into<String>, length: usize) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            length,
        }
    }

    /// Build an entry from a `username@site` id.
    ///
    /// The id is split on the *last* `@`, so `me@mail.com@github.com`
    /// becomes username `me@mail.com` and site `github.com`.
    pub fn parse(identity: &str, length: usize) -> Result<Self> {
        let (username, url) = split_identity(identity)?;
        check_length(length)?;
        Ok(Self::new(username, url, length))
    }

    /// The `username@site` string that names this entry and salts its password.
    pub fn identity(&self) -> String {
        format!("{}@{}", self.username, self.url)
    }

    /// Human-readable line, e.g. `alice@example.com (16)`.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Regenerate this entry's password from the master secret.
    pub fn derive_password(&self, secret: &[u8]) -> Result<Zeroizing<String>> {
        derive_password(secret, self.identity().as_bytes(), self.length)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.username, self.url, self.length)
    }
}

/// Split `username@site` on the last `@`.
pub fn split_identity(identity: &str) -> Result<(&str, &str)> {
    let invalid = || CpassError::InvalidIdentity(identity.to_string());

    let (username, url) = identity.rsplit_once('@').ok_or_else(invalid)?;
    if username.is_empty() || url.is_empty() {
        return Err(invalid());
    }
    Ok((username, url))
}

/// An ordered list of entries.  Order is file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entries(Vec<Entry>);

impl Entries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the entry whose identity is exactly `identity`.
    pub fn get(&self, identity: &str) -> Option<&Entry> {
        self.position(identity).map(|i| &self.0[i])
    }

    /// Index of the entry whose identity is exactly `identity`.
    pub fn position(&self, identity: &str) -> Option<usize> {
        self.0.iter().position(|e| e.identity() == identity)
    }

    /// Entries whose identity contains `needle`, in their original order.
    ///
    /// Plain, case-sensitive substring match.
    pub fn filter(&self, needle: &str) -> Entries {
        self.0
            .iter()
            .filter(|e| e.identity().contains(needle))
            .cloned()
            .collect()
    }

    pub fn push(&mut self, entry: Entry) {
        self.0.push(entry);
    }

    /// Remove and return the entry at `index`, keeping the rest in order.
    pub fn remove(&mut self, index: usize) -> Entry {
        self.0.remove(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Entry>> for Entries {
    fn from(entries: Vec<Entry>) -> Self {
        Self(entries)
    }
}

impl FromIterator<Entry> for Entries {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Entries {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Entries {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One `describe()` line per entry.
impl fmt::Display for Entries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.0 {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Entries {
        Entries::from(vec![
            Entry::new("alice", "foo.com", 16),
            Entry::new("bob", "foo.org", 20),
            Entry::new("carol", "bar.net", 12),
        ])
    }

    #[test]
    fn identity_joins_username_and_site() {
        let e = Entry::new("alice", "example.com", 16);
        assert_eq!(e.identity(), "alice@example.com");
        assert_eq!(e.describe(), "alice@example.com (16)");
    }

    #[test]
    fn parse_splits_on_last_at() {
        let e = Entry::parse("me@mail.com@github.com", 20).unwrap();
        assert_eq!(e.username, "me@mail.com");
        assert_eq!(e.url, "github.com");
        assert_eq!(e.identity(), "me@mail.com@github.com");
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        for bad in ["example.com", "@example.com", "alice@", "@", ""] {
            assert!(
                matches!(Entry::parse(bad, 16), Err(CpassError::InvalidIdentity(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn parse_rejects_bad_length() {
        assert!(matches!(
            Entry::parse("alice@example.com", 0),
            Err(CpassError::LengthOutOfRange { .. })
        ));
        assert!(matches!(
            Entry::parse("alice@example.com", 45),
            Err(CpassError::LengthOutOfRange { .. })
        ));
    }

    #[test]
    fn derive_uses_identity_as_salt() {
        let e = Entry::new("alice", "example.com", 16);
        let pw = e.derive_password(b"hunter2").unwrap();
        assert_eq!(pw.as_str(), "455nNJFzr6txXNk9");
    }

    #[test]
    fn email_username_derives_with_full_identity() {
        let e = Entry::parse("alice@gmail.com@github.com", 20).unwrap();
        let pw = e.derive_password(b"correct horse").unwrap();
        assert_eq!(pw.as_str(), "c1yFIx0E7Ixkc2bDqySd");
    }

    #[test]
    fn get_finds_exact_identity_only() {
        let entries = sample();
        assert_eq!(entries.get("bob@foo.org").unwrap().length, 20);
        assert!(entries.get("bob@foo").is_none());
        assert!(entries.get("dave@foo.org").is_none());
    }

    #[test]
    fn filter_is_substring_and_keeps_order() {
        let entries = sample();

        let foo: Vec<String> = entries.filter("foo").iter().map(Entry::identity).collect();
        assert_eq!(foo, vec!["alice@foo.com", "bob@foo.org"]);

        assert!(entries.filter("baz").is_empty());
        assert_eq!(entries.filter("").len(), 3);
    }

    #[test]
    fn filter_is_case_sensitive() {
        assert!(sample().filter("FOO").is_empty());
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut entries = sample();
        let idx = entries.position("bob@foo.org").unwrap();
        let removed = entries.remove(idx);

        assert_eq!(removed.identity(), "bob@foo.org");
        let left: Vec<String> = entries.iter().map(Entry::identity).collect();
        assert_eq!(left, vec!["alice@foo.com", "carol@bar.net"]);
    }

    #[test]
    fn display_lists_one_line_per_entry() {
        assert_eq!(
            sample().to_string(),
            "alice@foo.com (16)\nbob@foo.org (20)\ncarol@bar.net (12)\n"
        );
    }

    #[test]
    fn deserializes_stored_layout() {
        let json = r#"[{"url": "example.com", "username": "alice", "length": 16}]"#;
        let entries: Entries = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get("alice@example.com").unwrap().length, 16);
    }
}
