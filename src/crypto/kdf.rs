//! # Key Derivation Functions
//!
//! Password hardening, multi-key expansion and secret-box key widening.
//!
//! ## Derivation Paths
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  password + salt ──► PBKDF2-HMAC-SHA256(100k) ──► derived key (hex)    │
//! │                                                                         │
//! │  key + salt ───────► PBKDF2-HMAC-SHA256(10k) ───► stream working key   │
//! │                                                                         │
//! │  master + salt‖i ──► PBKDF2-HMAC-SHA256(10k) ───► subkey i (hex)       │
//! │                                                                         │
//! │  key ──────────────► HKDF-SHA256(info) ─────────► secret-box key        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Aspect | Design Choice |
//! |--------|---------------|
//! | Password KDF | PBKDF2-HMAC-SHA256, tunable rounds |
//! | Output size | 256 bits |
//! | Box key widening | HKDF with a versioned `info` string |

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Size of derived keys in bytes (256 bits)
pub const DERIVED_KEY_SIZE: usize = 32;

/// Domain separation strings for HKDF
pub mod domain {
    /// Domain for the secret-box key
    pub const SECRETBOX_KEY: &[u8] = b"mailguard-secretbox-key-v1";
}

/// Derive a key from a password
///
/// Deterministic: the same `(password, salt, iterations)` always yields the
/// same 64-character hex key. An empty password is accepted.
///
/// ## Errors
///
/// `KeyDerivationFailed` if `iterations` is zero.
pub fn derive_key_from_password(password: &str, salt: &str, iterations: u32) -> Result<String> {
    let key = pbkdf2_sha256(password.as_bytes(), salt.as_bytes(), iterations)?;
    Ok(hex::encode(key.as_slice()))
}

/// Expand one master secret into `count` subkeys
///
/// Subkey `i` is PBKDF2 over `master_key` with salt `salt` followed by the
/// decimal index, so the result is reproducible and every entry differs.
pub fn derive_keys(
    master_key: &str,
    salt: &str,
    count: usize,
    iterations: u32,
) -> Result<Vec<String>> {
    tracing::trace!(count, iterations, "Deriving subkeys");

    (0..count)
        .map(|i| derive_key_from_password(master_key, &format!("{}{}", salt, i), iterations))
        .collect()
}

/// Raw PBKDF2-HMAC-SHA256 into a zeroizing 32-byte buffer
pub(crate) fn pbkdf2_sha256(
    secret: &[u8],
    salt: &[u8],
    iterations: u32,
) -> Result<Zeroizing<[u8; DERIVED_KEY_SIZE]>> {
    if iterations == 0 {
        return Err(Error::KeyDerivationFailed(
            "Iteration count must be non-zero".into(),
        ));
    }

    let mut key = Zeroizing::new([0u8; DERIVED_KEY_SIZE]);
    pbkdf2::pbkdf2_hmac::<Sha256>(secret, salt, iterations, key.as_mut_slice());
    Ok(key)
}

/// Widen arbitrary key text to a 32-byte secret-box key
pub(crate) fn widen_box_key(key: &[u8]) -> Result<Zeroizing<[u8; DERIVED_KEY_SIZE]>> {
    let hkdf = Hkdf::<Sha256>::new(None, key);

    let mut out = Zeroizing::new([0u8; DERIVED_KEY_SIZE]);
    hkdf.expand(domain::SECRETBOX_KEY, out.as_mut_slice())
        .map_err(|_| Error::KeyDerivationFailed("HKDF expansion failed".into()))?;

    Ok(out)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ROUNDS: u32 = 1_000;

    #[test]
    fn test_derive_key_deterministic() {
        let k1 = derive_key_from_password("hunter2", "salt", ROUNDS).unwrap();
        let k2 = derive_key_from_password("hunter2", "salt", ROUNDS).unwrap();

        assert_eq!(k1, k2);
        assert_eq!(k1.len(), DERIVED_KEY_SIZE * 2);
    }

    #[test]
    fn test_derive_key_input_sensitivity() {
        let base = derive_key_from_password("hunter2", "salt", ROUNDS).unwrap();

        assert_ne!(base, derive_key_from_password("hunter3", "salt", ROUNDS).unwrap());
        assert_ne!(base, derive_key_from_password("hunter2", "pepper", ROUNDS).unwrap());
        assert_ne!(base, derive_key_from_password("hunter2", "salt", ROUNDS + 1).unwrap());
    }

    #[test]
    fn test_empty_password_accepted() {
        let k1 = derive_key_from_password("", "salt", ROUNDS).unwrap();
        let k2 = derive_key_from_password("", "salt", ROUNDS).unwrap();
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let result = derive_key_from_password("pw", "salt", 0);
        assert!(matches!(result, Err(Error::KeyDerivationFailed(_))));
    }

    #[test]
    fn test_pbkdf2_known_vector() {
        // RFC 7914 section 11, PBKDF2-HMAC-SHA256 test vector (c = 1)
        let key = pbkdf2_sha256(b"passwd", b"salt", 1).unwrap();
        assert_eq!(
            hex::encode(key.as_slice()),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }

    #[test]
    fn test_derive_keys_distinct_and_reproducible() {
        let keys = derive_keys("master-secret", "salt", 5, ROUNDS).unwrap();
        assert_eq!(keys.len(), 5);

        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                assert_ne!(keys[i], keys[j]);
            }
        }

        let again = derive_keys("master-secret", "salt", 5, ROUNDS).unwrap();
        assert_eq!(keys, again);
    }

    #[test]
    fn test_derive_keys_zero_count() {
        assert!(derive_keys("master", "salt", 0, ROUNDS).unwrap().is_empty());
    }

    #[test]
    fn test_widen_box_key() {
        let a = widen_box_key(b"short").unwrap();
        let b = widen_box_key(b"short").unwrap();
        let c = widen_box_key(b"short ").unwrap();

        assert_eq!(*a, *b);
        assert_ne!(*a, *c);
    }
}
