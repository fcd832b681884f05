//! # Authenticated Encryption
//!
//! The two authenticated engines: a secret-key box and a public-key box,
//! both XSalsa20-Poly1305 underneath.
//!
//! ## Secret Box
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  box_key    = HKDF-SHA256(key, info = "mailguard-secretbox-key-v1")    │
//! │  nonce      = 24 random bytes                                          │
//! │  ciphertext = XSalsa20-Poly1305(box_key, nonce, plaintext)             │
//! │               (includes the 16-byte Poly1305 tag)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Public-Key Box
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SENDER                               RECIPIENT                         │
//! │  sender private × recipient public    recipient private × sender public │
//! │              └──────────► same X25519 shared secret ◄──────┘            │
//! │                                                                         │
//! │  ciphertext = SalsaBox(shared, nonce, plaintext)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Opening the box proves the sender held their private key, so the roles
//! mirror a two-party exchange: encrypting needs sender-private +
//! recipient-public, decrypting needs recipient-private + sender-public.
//!
//! ## Security Properties
//!
//! | Property | Guarantee |
//! |----------|-----------|
//! | Confidentiality | Only key holders can read the body |
//! | Integrity | Any modification fails with `AuthenticationFailed` |
//! | Authenticity | Public box binds the body to the sender's key |

use crypto_box::SalsaBox;
use crypto_secretbox::aead::{self, Aead, KeyInit};
use crypto_secretbox::XSalsa20Poly1305;
use zeroize::Zeroizing;

use super::kdf::widen_box_key;
use super::keys::{random_array, signing_key_from_text, verifying_key_from_text};
use super::{decode_b64, encode_b64};
use crate::envelope::{Algorithm, EncryptionResult};
use crate::error::{Error, Result};

/// Size of the XSalsa20 nonce in bytes (192 bits)
pub const BOX_NONCE_SIZE: usize = 24;

/// Size of the Poly1305 authentication tag in bytes
pub const TAG_SIZE: usize = 16;

// ============================================================================
// SECRET BOX
// ============================================================================

/// Encrypt text with the secret-box engine
pub fn encrypt_box(plaintext: &str, key: &str) -> Result<EncryptionResult> {
    let cipher = secretbox_cipher(key)?;
    let nonce = random_array::<BOX_NONCE_SIZE>()?;

    let ciphertext = cipher
        .encrypt(aead::Nonce::<XSalsa20Poly1305>::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|e| Error::EncryptionFailed(format!("Secret box seal failed: {}", e)))?;

    tracing::trace!(bytes = ciphertext.len(), "Sealed secret box");

    Ok(EncryptionResult {
        encrypted_data: encode_b64(&ciphertext),
        algorithm: Algorithm::SecretBox,
        nonce: Some(encode_b64(&nonce)),
        salt: None,
        key_id: None,
    })
}

/// Decrypt a secret-box envelope
///
/// ## Errors
///
/// - `MissingEnvelopeField` if `nonce` is absent
/// - `AuthenticationFailed` on a wrong key, wrong nonce or tampered data
pub fn decrypt_box(envelope: &EncryptionResult, key: &str) -> Result<String> {
    let nonce = required_nonce(envelope)?;
    let ciphertext = decode_b64(&envelope.encrypted_data, "encrypted data")?;
    let cipher = secretbox_cipher(key)?;

    let plaintext = cipher
        .decrypt(aead::Nonce::<XSalsa20Poly1305>::from_slice(&nonce), ciphertext.as_slice())
        .map_err(|_| {
            tracing::warn!("Secret box authentication failed");
            Error::AuthenticationFailed
        })?;

    into_text(plaintext)
}

fn secretbox_cipher(key: &str) -> Result<XSalsa20Poly1305> {
    let box_key = widen_box_key(key.as_bytes())?;
    XSalsa20Poly1305::new_from_slice(box_key.as_slice())
        .map_err(|e| Error::InvalidKey(format!("Invalid secret box key: {}", e)))
}

// ============================================================================
// PUBLIC-KEY BOX
// ============================================================================

/// Encrypt text from `sender_private_key` to `recipient_public_key`
pub fn encrypt_asym(
    plaintext: &str,
    recipient_public_key: &str,
    sender_private_key: &str,
) -> Result<EncryptionResult> {
    let salsa_box = public_box(recipient_public_key, sender_private_key)?;
    let nonce = random_array::<BOX_NONCE_SIZE>()?;

    let ciphertext = salsa_box
        .encrypt(crypto_box::Nonce::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|e| Error::EncryptionFailed(format!("Public box seal failed: {}", e)))?;

    tracing::trace!(bytes = ciphertext.len(), "Sealed public box");

    Ok(EncryptionResult {
        encrypted_data: encode_b64(&ciphertext),
        algorithm: Algorithm::PublicBox,
        nonce: Some(encode_b64(&nonce)),
        salt: None,
        key_id: None,
    })
}

/// Decrypt a public-box envelope sent by `sender_public_key`
///
/// ## Errors
///
/// - `MissingEnvelopeField` if `nonce` is absent
/// - `InvalidKey` if either key does not decode to a valid key
/// - `AuthenticationFailed` if the keys do not match the sealing pair or
///   the data was tampered with
pub fn decrypt_asym(
    envelope: &EncryptionResult,
    sender_public_key: &str,
    recipient_private_key: &str,
) -> Result<String> {
    let nonce = required_nonce(envelope)?;
    let ciphertext = decode_b64(&envelope.encrypted_data, "encrypted data")?;
    let salsa_box = public_box(sender_public_key, recipient_private_key)?;

    let plaintext = salsa_box
        .decrypt(crypto_box::Nonce::from_slice(&nonce), ciphertext.as_slice())
        .map_err(|_| {
            tracing::warn!("Public box authentication failed");
            Error::AuthenticationFailed
        })?;

    into_text(plaintext)
}

/// Build the box from the other party's public key and our private key
///
/// Ed25519 keys are mapped to their X25519 equivalents, so a single
/// [`super::KeyPair`] serves signing and the box.
fn public_box(their_public_key: &str, our_private_key: &str) -> Result<SalsaBox> {
    let their_public = verifying_key_from_text(their_public_key)?;
    let our_secret = signing_key_from_text(our_private_key)?;

    let their_x25519 = crypto_box::PublicKey::from(their_public.to_montgomery().to_bytes());
    let scalar = Zeroizing::new(our_secret.to_scalar_bytes());
    let our_x25519 = crypto_box::SecretKey::from(*scalar);

    Ok(SalsaBox::new(&their_x25519, &our_x25519))
}

// ============================================================================
// SHARED HELPERS
// ============================================================================

fn required_nonce(envelope: &EncryptionResult) -> Result<[u8; BOX_NONCE_SIZE]> {
    let text = envelope
        .nonce
        .as_deref()
        .ok_or(Error::MissingEnvelopeField("nonce"))?;
    let bytes = decode_b64(text, "nonce")?;

    bytes.as_slice().try_into().map_err(|_| {
        Error::DecodingFailure(format!(
            "nonce must be {} bytes, got {}",
            BOX_NONCE_SIZE,
            bytes.len()
        ))
    })
}

fn into_text(plaintext: Vec<u8>) -> Result<String> {
    String::from_utf8(plaintext)
        .map_err(|e| Error::DecodingFailure(format!("Plaintext is not UTF-8: {}", e)))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::generate_key_pair;

    fn flip_first_byte(envelope: &mut EncryptionResult) {
        let mut bytes = decode_b64(&envelope.encrypted_data, "data").unwrap();
        bytes[0] ^= 0xFF;
        envelope.encrypted_data = encode_b64(&bytes);
    }

    #[test]
    fn test_box_round_trip() {
        let envelope = encrypt_box("Hello, World!", "secret").unwrap();
        assert_eq!(decrypt_box(&envelope, "secret").unwrap(), "Hello, World!");

        assert_eq!(envelope.algorithm, Algorithm::SecretBox);
        assert!(envelope.salt.is_none());
    }

    #[test]
    fn test_box_empty_plaintext() {
        let envelope = encrypt_box("", "secret").unwrap();
        let ciphertext = decode_b64(&envelope.encrypted_data, "data").unwrap();

        assert_eq!(ciphertext.len(), TAG_SIZE);
        assert_eq!(decrypt_box(&envelope, "secret").unwrap(), "");
    }

    #[test]
    fn test_box_wrong_key_fails() {
        let envelope = encrypt_box("secret message", "key-one").unwrap();
        assert!(matches!(
            decrypt_box(&envelope, "key-two"),
            Err(Error::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_box_tampered_fails() {
        let mut envelope = encrypt_box("secret message", "secret").unwrap();
        flip_first_byte(&mut envelope);

        assert!(matches!(
            decrypt_box(&envelope, "secret"),
            Err(Error::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_box_wrong_nonce_fails() {
        let mut envelope = encrypt_box("secret message", "secret").unwrap();
        envelope.nonce = Some(encode_b64(&[0u8; BOX_NONCE_SIZE]));

        assert!(matches!(
            decrypt_box(&envelope, "secret"),
            Err(Error::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_box_missing_nonce() {
        let mut envelope = encrypt_box("secret message", "secret").unwrap();
        envelope.nonce = None;

        assert!(matches!(
            decrypt_box(&envelope, "secret"),
            Err(Error::MissingEnvelopeField("nonce"))
        ));
    }

    #[test]
    fn test_box_large_payload() {
        let plaintext = "0123456789abcdef".repeat(4096);
        let envelope = encrypt_box(&plaintext, "secret").unwrap();
        assert_eq!(decrypt_box(&envelope, "secret").unwrap(), plaintext);
    }

    #[test]
    fn test_asym_round_trip() {
        let alice = generate_key_pair().unwrap();
        let bob = generate_key_pair().unwrap();

        // Alice encrypts for Bob
        let envelope = encrypt_asym("Secret for Bob", &bob.public_key, &alice.private_key).unwrap();

        // Bob decrypts from Alice
        let decrypted = decrypt_asym(&envelope, &alice.public_key, &bob.private_key).unwrap();
        assert_eq!(decrypted, "Secret for Bob");
        assert_eq!(envelope.algorithm, Algorithm::PublicBox);
    }

    #[test]
    fn test_asym_wrong_recipient_fails() {
        let alice = generate_key_pair().unwrap();
        let bob = generate_key_pair().unwrap();
        let eve = generate_key_pair().unwrap();

        let envelope = encrypt_asym("Secret for Bob", &bob.public_key, &alice.private_key).unwrap();

        assert!(matches!(
            decrypt_asym(&envelope, &alice.public_key, &eve.private_key),
            Err(Error::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_asym_wrong_sender_fails() {
        let alice = generate_key_pair().unwrap();
        let bob = generate_key_pair().unwrap();
        let eve = generate_key_pair().unwrap();

        let envelope = encrypt_asym("Secret for Bob", &bob.public_key, &alice.private_key).unwrap();

        assert!(matches!(
            decrypt_asym(&envelope, &eve.public_key, &bob.private_key),
            Err(Error::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_asym_tampered_fails() {
        let alice = generate_key_pair().unwrap();
        let bob = generate_key_pair().unwrap();

        let mut envelope = encrypt_asym("Secret", &bob.public_key, &alice.private_key).unwrap();
        flip_first_byte(&mut envelope);

        assert!(matches!(
            decrypt_asym(&envelope, &alice.public_key, &bob.private_key),
            Err(Error::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_asym_malformed_key() {
        let alice = generate_key_pair().unwrap();
        let result = encrypt_asym("Secret", "not-a-key", &alice.private_key);

        assert!(matches!(result, Err(Error::DecodingFailure(_))));
    }
}
