//! # Error Handling
//!
//! Error types for the content-protection core.
//!
//! ## Error Categories
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          ERROR CATEGORIES                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Envelope (100-199)     Stored envelope is incomplete or unreadable    │
//! │  Credentials (200-299)  Decrypt options lack the needed secret         │
//! │  Crypto (300-399)       Authentication, keys, derivation, randomness   │
//! │  Config (400-499)       Rejected cost parameters                       │
//! │  Internal (900-999)     Serialization                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is returned at the point of detection. Nothing in this
//! crate retries: there are no transient conditions in pure CPU-bound
//! cryptography.
//!
//! Signature verification is the one place where a cryptographic failure
//! is *not* an error: [`crate::crypto::verify`] returns `false`.

use thiserror::Error;

/// Result type alias for content-protection operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the content-protection core
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Envelope Errors (100-199)
    // ========================================================================

    /// The envelope lacks a field its algorithm requires
    #[error("Envelope is missing required field: {0}")]
    MissingEnvelopeField(&'static str),

    /// A base64/hex payload could not be decoded into bytes
    #[error("Failed to decode payload: {0}")]
    DecodingFailure(String),

    // ========================================================================
    // Credential Errors (200-299)
    // ========================================================================

    /// The options bundle lacks the secret the algorithm needs
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    // ========================================================================
    // Crypto Errors (300-399)
    // ========================================================================

    /// Authentication tag did not verify (tampered data, wrong key or nonce)
    #[error("Authentication failed: ciphertext was tampered with or the key is wrong")]
    AuthenticationFailed,

    /// Unknown algorithm tag or hash variant
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Invalid key format or length
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Key derivation failed
    #[error("Failed to derive key: {0}")]
    KeyDerivationFailed(String),

    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// The secure random source failed
    #[error("Random number generation failed")]
    RngFailed,

    // ========================================================================
    // Config Errors (400-499)
    // ========================================================================

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Internal Errors (900-999)
    // ========================================================================

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl Error {
    /// Get a stable numeric error code
    ///
    /// - 100-199: Envelope
    /// - 200-299: Credentials
    /// - 300-399: Crypto
    /// - 400-499: Config
    /// - 900-999: Internal
    pub fn code(&self) -> i32 {
        match self {
            Error::MissingEnvelopeField(_) => 100,
            Error::DecodingFailure(_) => 101,

            Error::MissingCredential(_) => 200,

            Error::AuthenticationFailed => 300,
            Error::UnsupportedAlgorithm(_) => 301,
            Error::InvalidKey(_) => 302,
            Error::KeyDerivationFailed(_) => 303,
            Error::EncryptionFailed(_) => 304,
            Error::RngFailed => 305,

            Error::InvalidConfig(_) => 400,

            Error::SerializationError(_) => 900,
        }
    }

    /// Message safe to show to the mailbox owner
    ///
    /// Never includes the internal cause: a wrong password and a tampered
    /// ciphertext look the same to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::AuthenticationFailed | Error::MissingCredential(_) | Error::InvalidKey(_) => {
                "Wrong password or key."
            }
            Error::UnsupportedAlgorithm(_) => "This encryption algorithm is not supported.",
            _ => "Unable to process protected content.",
        }
    }

    /// Whether the caller should ask the user for a different secret
    pub fn requires_user_action(&self) -> bool {
        matches!(
            self,
            Error::AuthenticationFailed | Error::MissingCredential(_) | Error::InvalidKey(_)
        )
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::DecodingFailure(err.to_string())
    }
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::DecodingFailure(err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::MissingEnvelopeField("nonce").code(), 100);
        assert_eq!(Error::MissingCredential("password").code(), 200);
        assert_eq!(Error::AuthenticationFailed.code(), 300);
        assert_eq!(Error::UnsupportedAlgorithm("DES".into()).code(), 301);
        assert_eq!(Error::InvalidConfig("test".into()).code(), 400);
        assert_eq!(Error::SerializationError("test".into()).code(), 900);
    }

    #[test]
    fn test_user_message_hides_cause() {
        let err = Error::DecodingFailure("Invalid byte 33, offset 4.".into());
        assert!(!err.user_message().contains("offset"));

        assert_eq!(
            Error::AuthenticationFailed.user_message(),
            Error::MissingCredential("password").user_message()
        );
    }

    #[test]
    fn test_requires_user_action() {
        assert!(Error::AuthenticationFailed.requires_user_action());
        assert!(!Error::RngFailed.requires_user_action());
        assert!(!Error::UnsupportedAlgorithm("x".into()).requires_user_action());
    }

    #[test]
    fn test_base64_error_conversion() {
        use base64::{engine::general_purpose::STANDARD, Engine as _};

        let err: Error = STANDARD.decode("not base64!").unwrap_err().into();
        assert!(matches!(err, Error::DecodingFailure(_)));
    }
}
