//! # Configuration
//!
//! Cost parameters for the key-derivation steps.
//!
//! | Knob | Default | Used by |
//! |------|---------|---------|
//! | `password_iterations` | 100 000 | [`crate::crypto::derive_key_from_password`] |
//! | `stream_iterations` | 10 000 | Per-message key in the stream engine |
//! | `subkey_iterations` | 10 000 | [`crate::crypto::derive_keys`] |
//! | `salt_length` | 32 bytes | Stream engine salt |
//!
//! The per-message and per-subkey counts are lower than the password count
//! because they run once for every encrypted body.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default PBKDF2 iteration count for password derivation
pub const DEFAULT_PASSWORD_ITERATIONS: u32 = 100_000;

/// Default PBKDF2 iteration count for the per-message stream key
pub const DEFAULT_STREAM_ITERATIONS: u32 = 10_000;

/// Default PBKDF2 iteration count for each derived subkey
pub const DEFAULT_SUBKEY_ITERATIONS: u32 = 10_000;

/// Default salt length in bytes
pub const DEFAULT_SALT_LENGTH: usize = 32;

/// Shortest salt accepted by [`ProtectionConfig::validate`]
pub const MIN_SALT_LENGTH: usize = 16;

/// Cost parameters for the protection core
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProtectionConfig {
    /// PBKDF2 rounds for password-derived keys
    pub password_iterations: u32,
    /// PBKDF2 rounds for the stream engine's working key
    pub stream_iterations: u32,
    /// PBKDF2 rounds for each multi-key subkey
    pub subkey_iterations: u32,
    /// Random salt length in bytes
    pub salt_length: usize,
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            password_iterations: DEFAULT_PASSWORD_ITERATIONS,
            stream_iterations: DEFAULT_STREAM_ITERATIONS,
            subkey_iterations: DEFAULT_SUBKEY_ITERATIONS,
            salt_length: DEFAULT_SALT_LENGTH,
        }
    }
}

impl ProtectionConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameters that would make derivation meaningless
    pub fn validate(&self) -> Result<()> {
        let iterations = [
            ("passwordIterations", self.password_iterations),
            ("streamIterations", self.stream_iterations),
            ("subkeyIterations", self.subkey_iterations),
        ];
        for (name, value) in iterations {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{} must be non-zero", name)));
            }
        }

        if self.salt_length < MIN_SALT_LENGTH {
            return Err(Error::InvalidConfig(format!(
                "saltLength must be at least {} bytes, got {}",
                MIN_SALT_LENGTH, self.salt_length
            )));
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
