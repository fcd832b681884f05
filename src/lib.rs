//! # MailGuard Core
//!
//! Content-protection cryptography for the temporary mailbox service:
//! key generation, password hardening, three cipher engines behind one
//! encrypt/decrypt facade, signatures, hashing, key-strength scoring and
//! constant-time comparison.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      MAIL ROUTES (external)                             │
//! │          encrypt body ─┐                   ┌─ decrypt body              │
//! ├────────────────────────┼───────────────────┼────────────────────────────┤
//! │                        ▼                   ▼                            │
//! │                 ┌──────────────────────────────────┐                   │
//! │                 │           Protector              │                   │
//! │                 │  dispatch on Algorithm tag       │                   │
//! │                 └──────┬──────────┬──────────┬─────┘                   │
//! │                        ▼          ▼          ▼                          │
//! │                   ┌────────┐ ┌─────────┐ ┌──────────┐                  │
//! │                   │ Stream │ │ Secret  │ │ Public   │                  │
//! │                   │ engine │ │ box     │ │ box      │                  │
//! │                   └───┬────┘ └────┬────┘ └────┬─────┘                  │
//! │                       ▼           ▼           ▼                         │
//! │         ┌───────────────────────────────────────────────────┐          │
//! │         │  KDF · key material · signing · hashing · compare │          │
//! │         └───────────────────────────────────────────────────┘          │
//! │                                                                         │
//! │  EncryptionResult (envelope) ──► persisted by the storage layer        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`config`] - Cost parameters
//! - [`crypto`] - Primitives and the three engines
//! - [`envelope`] - Algorithm tags, the envelope and option bundles
//! - [`protector`] - The encrypt/decrypt facade
//! - [`strength`] - Key-strength scoring
//!
//! ## Concurrency
//!
//! Every operation is synchronous and stateless; the only shared resource
//! is the operating system's random source. Calls may run concurrently
//! from any number of threads.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod config;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod protector;
pub mod strength;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use config::ProtectionConfig;
pub use crypto::{
    derive_key_from_password, derive_keys, generate_key_pair, generate_salt,
    generate_secret_key, hash, secure_compare, sign, verify, HashVariant, KeyPair,
};
pub use envelope::{Algorithm, DecryptionOptions, EncryptOptions, EncryptionResult};
pub use error::{Error, Result};
pub use protector::{decrypt, encrypt, Protector};
pub use strength::{evaluate, StrengthReport};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of MailGuard Core
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
