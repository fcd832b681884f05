//! # Digital Signatures Module
//!
//! Detached Ed25519 signatures over arbitrary content.
//!
//! ## Signature Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  sign(data, privateKey)                                                │
//! │     Ed25519(seed, data) ──► base64(64-byte signature)                  │
//! │                                                                         │
//! │  verify(data, signature, publicKey)                                    │
//! │     decode ──► Ed25519 verify ──► true / false                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Verification never errors. A malformed signature, a malformed key, a
//! wrong key and altered data all come back as `false`, because callers
//! branch on the answer rather than handle a failure.
//!
//! Ed25519 is deterministic: the same key and data always produce the same
//! signature.

use ed25519_dalek::{Signature, Signer, Verifier};

use super::keys::{signing_key_from_text, verifying_key_from_text};
use super::{decode_b64, encode_b64};
use crate::error::Result;

/// Size of an Ed25519 signature in bytes
pub const SIGNATURE_SIZE: usize = 64;

/// Sign text with a base64 private key
pub fn sign(data: &str, private_key: &str) -> Result<String> {
    sign_bytes(data.as_bytes(), private_key)
}

/// Sign raw bytes with a base64 private key
///
/// ## Errors
///
/// `DecodingFailure` or `InvalidKey` if the private key is malformed.
pub fn sign_bytes(data: &[u8], private_key: &str) -> Result<String> {
    let signing_key = signing_key_from_text(private_key)?;
    let signature = signing_key.sign(data);
    Ok(encode_b64(&signature.to_bytes()))
}

/// Verify a detached signature over text
pub fn verify(data: &str, signature: &str, public_key: &str) -> bool {
    verify_bytes(data.as_bytes(), signature, public_key)
}

/// Verify a detached signature over raw bytes
pub fn verify_bytes(data: &[u8], signature: &str, public_key: &str) -> bool {
    let Ok(verifying_key) = verifying_key_from_text(public_key) else {
        return false;
    };
    let Ok(sig_bytes) = decode_b64(signature, "signature") else {
        return false;
    };
    let Ok(sig) = Signature::from_slice(&sig_bytes) else {
        return false;
    };

    verifying_key.verify(data, &sig).is_ok()
}

// ============================================================================
// TESTS
// ============================================================================
