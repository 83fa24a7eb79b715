//! Deterministic password derivation using PBKDF2-HMAC-SHA256.
//!
//! A password is the standard base64 encoding of a 32-byte PBKDF2 key,
//! cut down to the requested length.  Nothing here is random: the same
//! secret, salt and length always give the same password, which is what
//! lets the store keep only metadata.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::Hmac;
use sha2::Sha256;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{CpassError, Result};

/// PBKDF2 iteration count.  Changing this changes every password.
pub const ITERATIONS: u32 = 5000;

/// Length of the derived key in bytes.
pub const KEY_LEN: usize = 32;

/// Number of base64 characters produced for a `KEY_LEN`-byte key.
pub const MAX_PASSWORD_LEN: usize = KEY_LEN.div_ceil(3) * 4;

/// Check that `length` can be served by a single derived key.
pub fn check_length(length: usize) -> Result<()> {
    if length == 0 || length > MAX_PASSWORD_LEN {
        return Err(CpassError::LengthOutOfRange {
            length,
            max: MAX_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Derive a printable password of exactly `length` characters.
///
/// The returned string only contains `A-Z a-z 0-9 + / =`.  Lengths
/// outside `1..=MAX_PASSWORD_LEN` are rejected rather than clamped.
pub fn derive_password(secret: &[u8], salt: &[u8], length: usize) -> Result<Zeroizing<String>> {
    check_length(length)?;

    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(secret, salt, ITERATIONS, &mut key)
        .map_err(|e| CpassError::KeyDerivationFailed(format!("PBKDF2 failed: {e}")))?;

    let mut encoded = Zeroizing::new(STANDARD.encode(&key));
    key.zeroize();

    encoded.truncate(length);
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_length_matches_encoded_key() {
        assert_eq!(MAX_PASSWORD_LEN, 44);
    }

    #[test]
    fn known_vector() {
        let pw = derive_password(b"hunter2", b"alice@example.com", 16).unwrap();
        assert_eq!(pw.as_str(), "455nNJFzr6txXNk9");
    }

    #[test]
    fn full_length_keeps_padding() {
        let pw = derive_password(b"hunter2", b"alice@example.com", 44).unwrap();
        assert_eq!(pw.as_str(), "455nNJFzr6txXNk997oTl5Fx5eldtYX/7c3PC5lUlok=");
    }

    #[test]
    fn same_inputs_same_password() {
        let a = derive_password(b"secret", b"bob@example.org", 20).unwrap();
        let b = derive_password(b"secret", b"bob@example.org", 20).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn salt_changes_password() {
        let alice = derive_password(b"hunter2", b"alice@example.com", 16).unwrap();
        let bob = derive_password(b"hunter2", b"bob@example.com", 16).unwrap();
        let other_site = derive_password(b"hunter2", b"alice@example.org", 16).unwrap();

        assert_eq!(bob.as_str(), "JXGmlnovUzGKPrFj");
        assert_eq!(other_site.as_str(), "pySp6/HQB7L3VCtl");
        assert_ne!(alice, bob);
        assert_ne!(alice, other_site);
    }

    #[test]
    fn secret_changes_password() {
        let a = derive_password(b"hunter2", b"alice@example.com", 16).unwrap();
        let b = derive_password(b"hunter3", b"alice@example.com", 16).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn every_valid_length_is_exact() {
        for length in 1..=MAX_PASSWORD_LEN {
            let pw = derive_password(b"hunter2", b"alice@example.com", length).unwrap();
            assert_eq!(pw.len(), length);
            assert!(pw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'='));
        }
    }

    #[test]
    fn shorter_password_is_prefix_of_longer() {
        let short = derive_password(b"hunter2", b"alice@example.com", 8).unwrap();
        let long = derive_password(b"hunter2", b"alice@example.com", 32).unwrap();
        assert!(long.starts_with(short.as_str()));
    }

    #[test]
    fn rejects_zero_length() {
        let err = derive_password(b"hunter2", b"alice@example.com", 0).unwrap_err();
        assert!(matches!(
            err,
            CpassError::LengthOutOfRange { length: 0, max: 44 }
        ));
    }

    #[test]
    fn rejects_length_past_encoded_key() {
        let err = derive_password(b"hunter2", b"alice@example.com", 45).unwrap_err();
        assert!(matches!(
            err,
            CpassError::LengthOutOfRange { length: 45, .. }
        ));
    }

    #[test]
    fn empty_secret_still_derives() {
        let pw = derive_password(b"", b"alice@example.com", 12).unwrap();
        assert_eq!(pw.len(), 12);
    }
}
