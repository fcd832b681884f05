//! # Stream Engine
//!
//! Confidentiality-only encryption: AES-256 in counter mode under a
//! per-message key stretched from the caller's key and a fresh salt.
//!
//! ## Encryption Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  salt  = 32 random bytes                                               │
//! │  nonce = 16 random bytes (or caller-supplied)                          │
//! │                                                                         │
//! │  working_key = PBKDF2-HMAC-SHA256(key, salt, stream_iterations)        │
//! │  ciphertext  = plaintext ⊕ AES-256-CTR(working_key, nonce)             │
//! │                                                                         │
//! │  envelope = { encryptedData, algorithm, nonce, salt }                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Authentication
//!
//! Ciphertext length equals plaintext length and nothing detects tampering.
//! Decrypting a modified ciphertext, or decrypting with the wrong key,
//! returns garbage text without an error. Callers that need tamper
//! detection use the secret-box engine instead.
//!
//! A caller-supplied nonce must never be reused with the same key for two
//! different plaintexts.

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;

use super::kdf::pbkdf2_sha256;
use super::keys::{random_array, random_bytes};
use super::{decode_b64, encode_b64};
use crate::config::ProtectionConfig;
use crate::envelope::{Algorithm, EncryptionResult};
use crate::error::{Error, Result};

/// Size of the counter-mode nonce (initial counter block) in bytes
pub const STREAM_NONCE_SIZE: usize = 16;

type Aes256Ctr = Ctr128BE<Aes256>;

/// Encrypt text with the stream engine
///
/// `nonce` is optional base64 text that must decode to
/// [`STREAM_NONCE_SIZE`] bytes; a random one is drawn otherwise.
pub fn encrypt_stream(
    plaintext: &str,
    key: &str,
    nonce: Option<&str>,
    config: &ProtectionConfig,
) -> Result<EncryptionResult> {
    let salt = random_bytes(config.salt_length)?;
    let nonce = match nonce {
        Some(text) => decode_nonce(text)?,
        None => random_array::<STREAM_NONCE_SIZE>()?,
    };

    let mut buffer = plaintext.as_bytes().to_vec();
    apply_keystream(key, &salt, &nonce, config.stream_iterations, &mut buffer)?;

    tracing::trace!(bytes = buffer.len(), "Stream-encrypted payload");

    Ok(EncryptionResult {
        encrypted_data: encode_b64(&buffer),
        algorithm: Algorithm::Stream,
        nonce: Some(encode_b64(&nonce)),
        salt: Some(encode_b64(&salt)),
        key_id: None,
    })
}

/// Decrypt a stream envelope
///
/// ## Errors
///
/// - `MissingEnvelopeField` if `nonce` or `salt` is absent
/// - `DecodingFailure` if a field is not valid base64
///
/// A wrong key or tampered ciphertext is *not* an error.
pub fn decrypt_stream(
    envelope: &EncryptionResult,
    key: &str,
    config: &ProtectionConfig,
) -> Result<String> {
    let nonce = envelope
        .nonce
        .as_deref()
        .ok_or(Error::MissingEnvelopeField("nonce"))?;
    let salt = envelope
        .salt
        .as_deref()
        .ok_or(Error::MissingEnvelopeField("salt"))?;

    let nonce = decode_nonce(nonce)?;
    let salt = decode_b64(salt, "salt")?;
    let mut buffer = decode_b64(&envelope.encrypted_data, "encrypted data")?;

    apply_keystream(key, &salt, &nonce, config.stream_iterations, &mut buffer)?;

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn apply_keystream(
    key: &str,
    salt: &[u8],
    nonce: &[u8; STREAM_NONCE_SIZE],
    iterations: u32,
    buffer: &mut [u8],
) -> Result<()> {
    let working_key = pbkdf2_sha256(key.as_bytes(), salt, iterations)?;

    let mut cipher = Aes256Ctr::new_from_slices(working_key.as_slice(), nonce)
        .map_err(|e| Error::EncryptionFailed(format!("Invalid stream key: {}", e)))?;
    cipher.apply_keystream(buffer);

    Ok(())
}

fn decode_nonce(text: &str) -> Result<[u8; STREAM_NONCE_SIZE]> {
    let bytes = decode_b64(text, "nonce")?;
    bytes.as_slice().try_into().map_err(|_| {
        Error::DecodingFailure(format!(
            "nonce must be {} bytes, got {}",
            STREAM_NONCE_SIZE,
            bytes.len()
        ))
    })
}

// ============================================================================
// TESTS
// ============================================================================
