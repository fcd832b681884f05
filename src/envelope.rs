//! # Envelope
//!
//! The self-describing result of an encryption call, plus the option
//! bundles the facade accepts.
//!
//! ## Wire Format
//!
//! ```text
//! {
//!   "encryptedData": "<base64>",
//!   "algorithm":     "AES-256-GCM" | "ChaCha20-Poly1305" | "RSA-OAEP",
//!   "nonce":         "<base64>",      // every algorithm
//!   "salt":          "<base64>",      // AES-256-GCM only
//!   "keyId":         "<short text>"   // optional
//! }
//! ```
//!
//! Absent optionals are omitted. The storage layer persists this JSON and
//! must hand it back unchanged; `encryptedData`, `nonce` and `salt` are
//! opaque.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Algorithm tag carried by every envelope
///
/// ## Label Mismatch
///
/// The tag strings are storage identifiers and do **not** name the
/// constructions behind them:
///
/// | Tag | Actual construction | Authenticated |
/// |-----|---------------------|---------------|
/// | `AES-256-GCM` | PBKDF2 + AES-256-CTR | no |
/// | `ChaCha20-Poly1305` | HKDF + XSalsa20-Poly1305 secret box | yes |
/// | `RSA-OAEP` | X25519 + XSalsa20-Poly1305 public box | yes |
///
/// Stored envelopes depend on the tag values, so they stay as they are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Stream engine, no tamper detection
    #[serde(rename = "AES-256-GCM")]
    Stream,
    /// Secret-key authenticated box
    #[serde(rename = "ChaCha20-Poly1305")]
    SecretBox,
    /// Public-key authenticated box
    #[serde(rename = "RSA-OAEP")]
    PublicBox,
}

impl Algorithm {
    /// All supported algorithms
    pub const ALL: [Algorithm; 3] = [Algorithm::Stream, Algorithm::SecretBox, Algorithm::PublicBox];

    /// Tag string stored in the envelope
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Stream => "AES-256-GCM",
            Algorithm::SecretBox => "ChaCha20-Poly1305",
            Algorithm::PublicBox => "RSA-OAEP",
        }
    }

    /// The construction actually used for this tag
    pub fn actual_construction(&self) -> &'static str {
        match self {
            Algorithm::Stream => "PBKDF2-HMAC-SHA256 + AES-256-CTR",
            Algorithm::SecretBox => "HKDF-SHA256 + XSalsa20-Poly1305",
            Algorithm::PublicBox => "X25519 + XSalsa20-Poly1305",
        }
    }

    /// Whether decryption detects tampering
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Algorithm::Stream)
    }

    /// Whether envelopes of this algorithm must carry a salt
    pub fn requires_salt(&self) -> bool {
        matches!(self, Algorithm::Stream)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| Error::UnsupportedAlgorithm(s.to_string()))
    }
}

/// Self-describing encryption result
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawEnvelope")]
pub struct EncryptionResult {
    /// Base64 ciphertext (with tag for authenticated algorithms)
    pub encrypted_data: String,
    /// Which engine produced this envelope
    pub algorithm: Algorithm,
    /// Base64 nonce
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Base64 salt (stream engine only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
    /// Caller-chosen key identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
}

/// Envelope as stored, before the algorithm tag is checked
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnvelope {
    encrypted_data: String,
    algorithm: String,
    #[serde(default)]
    nonce: Option<String>,
    #[serde(default)]
    salt: Option<String>,
    #[serde(default)]
    key_id: Option<String>,
}

impl TryFrom<RawEnvelope> for EncryptionResult {
    type Error = Error;

    fn try_from(raw: RawEnvelope) -> Result<Self> {
        Ok(Self {
            encrypted_data: raw.encrypted_data,
            algorithm: raw.algorithm.parse()?,
            nonce: raw.nonce,
            salt: raw.salt,
            key_id: raw.key_id,
        })
    }
}

impl EncryptionResult {
    /// Serialize for persistence
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a persisted envelope
    ///
    /// An unknown tag fails with `UnsupportedAlgorithm` rather than a
    /// generic parse error.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawEnvelope = serde_json::from_str(json)?;
        raw.try_into()
    }

    /// Check that the fields the algorithm needs are present
    pub fn check_fields(&self) -> Result<()> {
        if self.nonce.is_none() {
            return Err(Error::MissingEnvelopeField("nonce"));
        }
        if self.algorithm.requires_salt() && self.salt.is_none() {
            return Err(Error::MissingEnvelopeField("salt"));
        }
        Ok(())
    }
}

/// Extra inputs for [`crate::Protector::encrypt`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncryptOptions {
    /// Explicit base64 nonce for the stream engine
    ///
    /// Never reuse a nonce with the same key for two different plaintexts.
    pub nonce: Option<String>,
    /// Sender's private key, required by the public box
    pub sender_private_key: Option<String>,
    /// Identifier copied into the envelope
    pub key_id: Option<String>,
}

impl EncryptOptions {
    /// Options for the public box
    pub fn with_sender(sender_private_key: impl Into<String>) -> Self {
        Self {
            sender_private_key: Some(sender_private_key.into()),
            ..Default::default()
        }
    }
}

/// Credentials for [`crate::Protector::decrypt`]
///
/// Symmetric algorithms need `password`. The public box needs
/// `private_key` (recipient) and `public_key` (sender).
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptionOptions {
    /// Password or key for the symmetric engines
    pub password: Option<String>,
    /// Recipient's private key
    pub private_key: Option<String>,
    /// Sender's public key
    pub public_key: Option<String>,
    /// Key identifier (informational)
    pub key_id: Option<String>,
}

impl DecryptionOptions {
    /// Options for a symmetric envelope
    pub fn with_password(password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            ..Default::default()
        }
    }

    /// Options for a public-box envelope
    pub fn with_keys(recipient_private_key: impl Into<String>, sender_public_key: impl Into<String>) -> Self {
        Self {
            private_key: Some(recipient_private_key.into()),
            public_key: Some(sender_public_key.into()),
            ..Default::default()
        }
    }
}

impl fmt::Debug for DecryptionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |field: &Option<String>| field.as_ref().map(|_| "<redacted>");
        f.debug_struct("DecryptionOptions")
            .field("password", &redact(&self.password))
            .field("private_key", &redact(&self.private_key))
            .field("public_key", &self.public_key)
            .field("key_id", &self.key_id)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
