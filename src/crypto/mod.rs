//! Cryptographic primitives for cpass.
//!
//! Only one primitive is needed: PBKDF2-HMAC-SHA256 password derivation
//! (`derive`).  There is no encryption — the store holds no secrets.

pub mod derive;

pub use derive::{derive_password, ITERATIONS, KEY_LEN, MAX_PASSWORD_LEN};
