//! # Cryptography Module
//!
//! All primitives behind the content-protection facade.
//!
//! ## Engines
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CONTENT-PROTECTION ENGINES                         │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Stream engine (tag "AES-256-GCM")                                     │
//! │    PBKDF2(key, salt) → AES-256-CTR(nonce)                              │
//! │    Confidentiality only. Tampering yields garbage, not an error.       │
//! │                                                                         │
//! │  Secret-box engine (tag "ChaCha20-Poly1305")                           │
//! │    HKDF(key) → XSalsa20-Poly1305(nonce)                                │
//! │    Authenticated. Tampering fails with AuthenticationFailed.           │
//! │                                                                         │
//! │  Public-box engine (tag "RSA-OAEP")                                    │
//! │    X25519(sender private, recipient public) → XSalsa20-Poly1305        │
//! │    Authenticated in both directions.                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tags are storage identifiers kept for compatibility with stored
//! envelopes; they do not name the constructions actually used. See
//! [`crate::envelope::Algorithm`].
//!
//! ## Algorithm Choices
//!
//! | Algorithm | Purpose |
//! |-----------|---------|
//! | Ed25519 | Key pairs, detached signatures |
//! | X25519 + XSalsa20-Poly1305 | Public-key box |
//! | XSalsa20-Poly1305 | Secret-key box |
//! | AES-256-CTR | Stream encryption |
//! | PBKDF2-HMAC-SHA256 | Password hardening, subkeys |
//! | HKDF-SHA256 | Secret-box key widening |
//! | SHA-256 / SHA-512 | Digests |
//!
//! ## Security Considerations
//!
//! 1. **Secure Random**: `rand::rngs::OsRng`; a failing source is an error
//! 2. **Zeroization**: Working keys live in `Zeroizing` buffers
//! 3. **Fresh nonces**: Every encryption draws a new random nonce unless the
//!    caller supplies one for the stream engine

mod compare;
mod encryption;
mod hash;
mod kdf;
mod keys;
mod signing;
mod stream;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{Error, Result};

pub use compare::{secure_compare, secure_compare_bytes};
pub use encryption::{
    decrypt_asym, decrypt_box, encrypt_asym, encrypt_box, BOX_NONCE_SIZE, TAG_SIZE,
};
pub use hash::{hash, hash_bytes, HashVariant};
pub use kdf::{derive_key_from_password, derive_keys, DERIVED_KEY_SIZE};
pub use keys::{
    generate_key_pair, generate_salt, generate_secret_key, key_fingerprint, KeyPair,
    DEFAULT_RANDOM_LENGTH,
};
pub use signing::{sign, sign_bytes, verify, verify_bytes, SIGNATURE_SIZE};
pub use stream::{decrypt_stream, encrypt_stream, STREAM_NONCE_SIZE};

/// Size of private key seeds in bytes
pub const SECRET_KEY_SIZE: usize = 32;

/// Size of public keys in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Encode bytes as standard base64 text
pub(crate) fn encode_b64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode base64 text, naming the field in the error
pub(crate) fn decode_b64(text: &str, what: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| Error::DecodingFailure(format!("{}: {}", what, e)))
}
