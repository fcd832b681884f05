//! SHA-2 digests rendered as lowercase hex.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

use crate::error::{Error, Result};

/// Digest strength
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashVariant {
    /// SHA-256, 64 hex characters
    #[serde(rename = "SHA256")]
    Sha256,
    /// SHA-512, 128 hex characters
    #[serde(rename = "SHA512")]
    Sha512,
}

impl HashVariant {
    /// Wire name of the variant
    pub fn as_str(&self) -> &'static str {
        match self {
            HashVariant::Sha256 => "SHA256",
            HashVariant::Sha512 => "SHA512",
        }
    }

    /// Length of the hex output
    pub fn hex_len(&self) -> usize {
        match self {
            HashVariant::Sha256 => 64,
            HashVariant::Sha512 => 128,
        }
    }
}

impl fmt::Display for HashVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SHA256" => Ok(HashVariant::Sha256),
            "SHA512" => Ok(HashVariant::Sha512),
            other => Err(Error::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Hash text
pub fn hash(data: &str, variant: HashVariant) -> String {
    hash_bytes(data.as_bytes(), variant)
}

/// Hash raw bytes
pub fn hash_bytes(data: &[u8], variant: HashVariant) -> String {
    match variant {
        HashVariant::Sha256 => hex::encode(Sha256::digest(data)),
        HashVariant::Sha512 => hex::encode(Sha512::digest(data)),
    }
}
