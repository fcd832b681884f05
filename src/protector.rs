//! # Protection Facade
//!
//! Single entry point the mail routes call to protect and recover email
//! bodies.
//!
//! ## Dispatch
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  encrypt(data, "AES-256-GCM", key)        ──► stream engine             │
//! │  encrypt(data, "ChaCha20-Poly1305", key)  ──► secret-box engine         │
//! │  encrypt(data, "RSA-OAEP", recipient_pk,                                │
//! │          sender_sk in options)            ──► public-box engine         │
//! │  encrypt(data, anything else, ..)         ──► UnsupportedAlgorithm      │
//! │                                                                         │
//! │  decrypt(envelope, options) dispatches on envelope.algorithm and        │
//! │  checks the credential before any cryptographic work.                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Protector` holds only cost parameters, so one instance can be shared
//! across threads freely.

use crate::config::ProtectionConfig;
use crate::crypto::{self, decrypt_asym, decrypt_box, decrypt_stream};
use crate::crypto::{encrypt_asym, encrypt_box, encrypt_stream};
use crate::envelope::{Algorithm, DecryptionOptions, EncryptOptions, EncryptionResult};
use crate::error::{Error, Result};

/// Encrypt/decrypt facade over the three engines
#[derive(Debug, Clone, Default)]
pub struct Protector {
    config: ProtectionConfig,
}

impl Protector {
    /// Create a facade with validated cost parameters
    pub fn new(config: ProtectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration
    pub fn config(&self) -> &ProtectionConfig {
        &self.config
    }

    /// Encrypt `data` under the algorithm named by `algorithm`
    ///
    /// For the public box, `key` is the recipient's public key and the
    /// sender's private key comes from `opts`.
    ///
    /// ## Errors
    ///
    /// `UnsupportedAlgorithm` for an unknown tag, before any key material
    /// is touched.
    pub fn encrypt(
        &self,
        data: &str,
        algorithm: &str,
        key: &str,
        opts: &EncryptOptions,
    ) -> Result<EncryptionResult> {
        let algorithm: Algorithm = algorithm.parse()?;
        self.encrypt_with(data, algorithm, key, opts)
    }

    /// Typed variant of [`Protector::encrypt`]
    pub fn encrypt_with(
        &self,
        data: &str,
        algorithm: Algorithm,
        key: &str,
        opts: &EncryptOptions,
    ) -> Result<EncryptionResult> {
        tracing::debug!(%algorithm, bytes = data.len(), "Encrypting content");

        let mut envelope = match algorithm {
            Algorithm::Stream => encrypt_stream(data, key, opts.nonce.as_deref(), &self.config)?,
            Algorithm::SecretBox => encrypt_box(data, key)?,
            Algorithm::PublicBox => {
                let sender_private_key = opts
                    .sender_private_key
                    .as_deref()
                    .ok_or(Error::MissingCredential("sender private key"))?;
                encrypt_asym(data, key, sender_private_key)?
            }
        };

        envelope.key_id = opts.key_id.clone();
        Ok(envelope)
    }

    /// Decrypt an envelope with the credential its algorithm requires
    ///
    /// ## Errors
    ///
    /// - `MissingCredential` if `opts` lacks the needed secret
    /// - `MissingEnvelopeField` if the envelope is incomplete, checked
    ///   before any field is decoded
    /// - `AuthenticationFailed` from the authenticated engines
    pub fn decrypt(&self, envelope: &EncryptionResult, opts: &DecryptionOptions) -> Result<String> {
        tracing::debug!(
            algorithm = %envelope.algorithm,
            key_id = envelope.key_id.as_deref().unwrap_or("-"),
            "Decrypting content"
        );

        let credential = Credential::select(envelope.algorithm, opts)?;
        envelope.check_fields()?;

        match credential {
            Credential::Password(password) if envelope.algorithm == Algorithm::Stream => {
                decrypt_stream(envelope, password, &self.config)
            }
            Credential::Password(password) => decrypt_box(envelope, password),
            Credential::KeyPair {
                private_key,
                public_key,
            } => decrypt_asym(envelope, public_key, private_key),
        }
    }

    /// Decrypt a persisted JSON envelope
    pub fn decrypt_json(&self, json: &str, opts: &DecryptionOptions) -> Result<String> {
        let envelope = EncryptionResult::from_json(json)?;
        self.decrypt(&envelope, opts)
    }

    /// Password derivation at the configured cost
    pub fn derive_key_from_password(&self, password: &str, salt: &str) -> Result<String> {
        crypto::derive_key_from_password(password, salt, self.config.password_iterations)
    }

    /// Multi-key expansion at the configured cost
    pub fn derive_keys(&self, master_key: &str, salt: &str, count: usize) -> Result<Vec<String>> {
        crypto::derive_keys(master_key, salt, count, self.config.subkey_iterations)
    }

    /// Random salt of the configured length
    pub fn generate_salt(&self) -> Result<String> {
        crypto::generate_salt(self.config.salt_length)
    }
}

/// The secret a decryption needs, pulled from the options
enum Credential<'a> {
    Password(&'a str),
    KeyPair {
        private_key: &'a str,
        public_key: &'a str,
    },
}

impl<'a> Credential<'a> {
    fn select(algorithm: Algorithm, opts: &'a DecryptionOptions) -> Result<Self> {
        match algorithm {
            Algorithm::Stream | Algorithm::SecretBox => {
                Ok(Credential::Password(required(&opts.password, "password")?))
            }
            Algorithm::PublicBox => Ok(Credential::KeyPair {
                private_key: required(&opts.private_key, "recipient private key")?,
                public_key: required(&opts.public_key, "sender public key")?,
            }),
        }
    }
}

fn required<'a>(field: &'a Option<String>, name: &'static str) -> Result<&'a str> {
    field.as_deref().ok_or(Error::MissingCredential(name))
}

/// Encrypt with the default configuration
pub fn encrypt(
    data: &str,
    algorithm: &str,
    key: &str,
    opts: &EncryptOptions,
) -> Result<EncryptionResult> {
    Protector::default().encrypt(data, algorithm, key, opts)
}

/// Decrypt with the default configuration
pub fn decrypt(envelope: &EncryptionResult, opts: &DecryptionOptions) -> Result<String> {
    Protector::default().decrypt(envelope, opts)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::generate_key_pair;

    fn protector() -> Protector {
        Protector::new(ProtectionConfig {
            password_iterations: 1_000,
            stream_iterations: 100,
            subkey_iterations: 100,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_symmetric_dispatch() {
        let p = protector();
        for tag in ["AES-256-GCM", "ChaCha20-Poly1305"] {
            let envelope = p
                .encrypt("body", tag, "pw", &EncryptOptions::default())
                .unwrap();
            assert_eq!(envelope.algorithm.as_str(), tag);

            let plaintext = p
                .decrypt(&envelope, &DecryptionOptions::with_password("pw"))
                .unwrap();
            assert_eq!(plaintext, "body");
        }
    }

    #[test]
    fn test_public_box_dispatch() {
        let p = protector();
        let sender = generate_key_pair().unwrap();
        let recipient = generate_key_pair().unwrap();

        let envelope = p
            .encrypt(
                "body",
                "RSA-OAEP",
                &recipient.public_key,
                &EncryptOptions::with_sender(sender.private_key.clone()),
            )
            .unwrap();

        let opts = DecryptionOptions::with_keys(recipient.private_key.clone(), sender.public_key.clone());
        assert_eq!(p.decrypt(&envelope, &opts).unwrap(), "body");
    }

    #[test]
    fn test_unsupported_algorithm() {
        let p = protector();
        let result = p.encrypt("body", "Blowfish", "pw", &EncryptOptions::default());

        assert!(matches!(result, Err(Error::UnsupportedAlgorithm(tag)) if tag == "Blowfish"));
    }

    #[test]
    fn test_unsupported_algorithm_checked_before_keys() {
        // A malformed key would fail decoding if any engine ran
        let p = protector();
        let result = p.encrypt("body", "RSA-2048", "%%%", &EncryptOptions::default());

        assert!(matches!(result, Err(Error::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn test_missing_sender_key() {
        let p = protector();
        let recipient = generate_key_pair().unwrap();
        let result = p.encrypt("body", "RSA-OAEP", &recipient.public_key, &EncryptOptions::default());

        assert!(matches!(result, Err(Error::MissingCredential(_))));
    }

    #[test]
    fn test_missing_password() {
        let p = protector();
        let envelope = p
            .encrypt("body", "ChaCha20-Poly1305", "pw", &EncryptOptions::default())
            .unwrap();

        let result = p.decrypt(&envelope, &DecryptionOptions::default());
        assert!(matches!(result, Err(Error::MissingCredential("password"))));
    }

    #[test]
    fn test_public_box_needs_both_keys() {
        let p = protector();
        let sender = generate_key_pair().unwrap();
        let recipient = generate_key_pair().unwrap();
        let envelope = p
            .encrypt(
                "body",
                "RSA-OAEP",
                &recipient.public_key,
                &EncryptOptions::with_sender(sender.private_key.clone()),
            )
            .unwrap();

        let only_private = DecryptionOptions {
            private_key: Some(recipient.private_key.clone()),
            ..Default::default()
        };
        assert!(matches!(
            p.decrypt(&envelope, &only_private),
            Err(Error::MissingCredential("sender public key"))
        ));

        let password_only = DecryptionOptions::with_password("pw");
        assert!(matches!(
            p.decrypt(&envelope, &password_only),
            Err(Error::MissingCredential("recipient private key"))
        ));
    }

    #[test]
    fn test_envelope_fields_checked_before_decoding() {
        let p = protector();
        let mut envelope = p
            .encrypt("body", "AES-256-GCM", "pw", &EncryptOptions::default())
            .unwrap();
        envelope.nonce = Some("%%%".into());
        envelope.salt = None;

        let result = p.decrypt(&envelope, &DecryptionOptions::with_password("pw"));
        assert!(matches!(result, Err(Error::MissingEnvelopeField("salt"))));
    }

    #[test]
    fn test_key_id_copied() {
        let p = protector();
        let opts = EncryptOptions {
            key_id: Some("mailbox-7".into()),
            ..Default::default()
        };
        let envelope = p.encrypt("body", "ChaCha20-Poly1305", "pw", &opts).unwrap();

        assert_eq!(envelope.key_id.as_deref(), Some("mailbox-7"));
    }

    #[test]
    fn test_decrypt_json() {
        let p = protector();
        let envelope = p
            .encrypt("stored body", "AES-256-GCM", "pw", &EncryptOptions::default())
            .unwrap();
        let json = envelope.to_json().unwrap();

        let plaintext = p
            .decrypt_json(&json, &DecryptionOptions::with_password("pw"))
            .unwrap();
        assert_eq!(plaintext, "stored body");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ProtectionConfig {
            stream_iterations: 0,
            ..Default::default()
        };
        assert!(matches!(Protector::new(config), Err(Error::InvalidConfig(_))));
    }
}
