//! # Key Material
//!
//! Key pair, salt and secret generation.
//!
//! ## Key Pair Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            KEY PAIR                                     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  privateKey: base64(seed)            32 random bytes from OsRng        │
//! │        │                                                                │
//! │        ├──► Ed25519 SigningKey ────► signatures                         │
//! │        └──► X25519 scalar ─────────► public-key box (sender/recipient)  │
//! │                                                                         │
//! │  publicKey:  base64(Ed25519 verifying key)                             │
//! │        │                                                                │
//! │        ├──► signature verification                                      │
//! │        └──► Montgomery form ───────► X25519 public key for the box     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both halves are produced together and only make sense together; the
//! core never stores or caches them.

use std::fmt;

use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::{decode_b64, encode_b64, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE};
use crate::error::{Error, Result};

/// Default length of generated salts and secrets in bytes
pub const DEFAULT_RANDOM_LENGTH: usize = 32;

/// Length of a key fingerprint in bytes (hex-encoded to 16 characters)
pub const FINGERPRINT_SIZE: usize = 8;

/// A linked public/private key pair
///
/// ## Security
///
/// - The private half is zeroized when this struct is dropped
/// - `Debug` never prints the private key
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    /// Base64 Ed25519 verifying key (32 bytes)
    pub public_key: String,
    /// Base64 Ed25519 seed (32 bytes)
    pub private_key: String,
}

impl KeyPair {
    /// Generate a fresh key pair from the operating system's CSPRNG
    pub fn generate() -> Result<Self> {
        let seed = Zeroizing::new(random_array::<SECRET_KEY_SIZE>()?);
        let signing = SigningKey::from_bytes(&seed);

        Ok(Self {
            public_key: encode_b64(signing.verifying_key().as_bytes()),
            private_key: encode_b64(seed.as_slice()),
        })
    }

    /// Short identifier of the public half, suitable as an envelope `keyId`
    pub fn fingerprint(&self) -> Result<String> {
        key_fingerprint(&self.public_key)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Generate a fresh key pair
pub fn generate_key_pair() -> Result<KeyPair> {
    KeyPair::generate()
}

/// Generate `byte_length` random bytes as base64 salt text
pub fn generate_salt(byte_length: usize) -> Result<String> {
    Ok(encode_b64(&random_bytes(byte_length)?))
}

/// Generate `byte_length` random bytes as base64 secret text
pub fn generate_secret_key(byte_length: usize) -> Result<String> {
    let bytes = Zeroizing::new(random_bytes(byte_length)?);
    Ok(encode_b64(&bytes))
}

/// Compute a short fingerprint of a public key
///
/// First 8 bytes of SHA-256 over the decoded key, hex-encoded.
pub fn key_fingerprint(public_key: &str) -> Result<String> {
    let bytes = decode_b64(public_key, "public key")?;
    let digest = Sha256::digest(&bytes);
    Ok(hex::encode(&digest[..FINGERPRINT_SIZE]))
}

/// Fill a buffer from OsRng, propagating a failing source
pub(crate) fn random_bytes(len: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; len];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|_| Error::RngFailed)?;
    Ok(bytes)
}

/// Fixed-size variant of [`random_bytes`]
pub(crate) fn random_array<const N: usize>() -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|_| Error::RngFailed)?;
    Ok(bytes)
}

/// Decode a base64 private key into an Ed25519 signing key
pub(crate) fn signing_key_from_text(private_key: &str) -> Result<SigningKey> {
    let bytes = Zeroizing::new(decode_b64(private_key, "private key")?);
    let seed: &[u8; SECRET_KEY_SIZE] = bytes.as_slice().try_into().map_err(|_| {
        Error::InvalidKey(format!(
            "Private key must be {} bytes, got {}",
            SECRET_KEY_SIZE,
            bytes.len()
        ))
    })?;
    Ok(SigningKey::from_bytes(seed))
}

/// Decode a base64 public key into an Ed25519 verifying key
pub(crate) fn verifying_key_from_text(public_key: &str) -> Result<VerifyingKey> {
    let bytes = decode_b64(public_key, "public key")?;
    let raw: [u8; PUBLIC_KEY_SIZE] = bytes.as_slice().try_into().map_err(|_| {
        Error::InvalidKey(format!(
            "Public key must be {} bytes, got {}",
            PUBLIC_KEY_SIZE,
            bytes.len()
        ))
    })?;
    VerifyingKey::from_bytes(&raw)
        .map_err(|e| Error::InvalidKey(format!("Invalid public key: {}", e)))
}

// ============================================================================
// TESTS
// ============================================================================
