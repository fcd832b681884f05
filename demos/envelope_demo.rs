//! # Envelope Demo
//!
//! Protects one email body with each engine, shows the stored envelope,
//! and demonstrates the tamper-detection difference between engines.
//!
//! ## Run
//!
//! ```bash
//! RUST_LOG=mailguard_core=debug cargo run --example envelope_demo
//! ```

use base64::{engine::general_purpose::STANDARD, Engine as _};
use mailguard_core::{
    evaluate, generate_key_pair, hash, sign, verify, Algorithm, DecryptionOptions,
    EncryptOptions, HashVariant, Protector,
};
use tracing_subscriber::EnvFilter;

fn main() -> mailguard_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== MailGuard Core: Envelope Demo ===\n");

    let protector = Protector::default();
    let body = "Your verification code is 493-118. It expires in 10 minutes.";

    // Step 1: Check the mailbox password
    println!("Step 1: Scoring the mailbox password...");
    let password = "Inbox!Temp#2026-qz";
    let report = evaluate(password);
    println!("  Score: {} (strong: {})", report.score, report.is_strong);
    for advice in &report.recommendations {
        println!("    - {}", advice);
    }
    println!();

    // Step 2: Symmetric engines
    println!("Step 2: Encrypting with the symmetric engines...");
    for algorithm in [Algorithm::Stream, Algorithm::SecretBox] {
        let envelope = protector.encrypt_with(body, algorithm, password, &EncryptOptions::default())?;
        println!("  {} ({})", algorithm, algorithm.actual_construction());
        println!("    Envelope: {}", envelope.to_json()?);

        let plaintext = protector.decrypt(&envelope, &DecryptionOptions::with_password(password))?;
        println!("    Round trip: {}", if plaintext == body { "[OK]" } else { "[FAILED]" });
    }
    println!();

    // Step 3: Public-key box between two mailboxes
    println!("Step 3: Encrypting between two key pairs...");
    let sender = generate_key_pair()?;
    let recipient = generate_key_pair()?;
    let opts = EncryptOptions {
        key_id: Some(recipient.fingerprint()?),
        ..EncryptOptions::with_sender(sender.private_key.clone())
    };
    let envelope = protector.encrypt("Hello from the sender", "RSA-OAEP", &recipient.public_key, &opts)?;
    println!("  Key id: {}", envelope.key_id.as_deref().unwrap_or("-"));

    let opened = protector.decrypt(
        &envelope,
        &DecryptionOptions::with_keys(recipient.private_key.clone(), sender.public_key.clone()),
    )?;
    println!("  Recipient reads: \"{}\"", opened);
    println!();

    // Step 4: Tampering
    println!("Step 4: Flipping one ciphertext byte...");
    for algorithm in [Algorithm::Stream, Algorithm::SecretBox] {
        let mut envelope = protector.encrypt_with(body, algorithm, password, &EncryptOptions::default())?;
        let mut bytes = STANDARD.decode(&envelope.encrypted_data)?;
        bytes[0] ^= 0x01;
        envelope.encrypted_data = STANDARD.encode(bytes);

        match protector.decrypt(&envelope, &DecryptionOptions::with_password(password)) {
            Ok(text) => println!("  {}: no error, plaintext now \"{}\"", algorithm, text),
            Err(e) => println!("  {}: rejected ({})", algorithm, e.user_message()),
        }
    }
    println!();

    // Step 5: Signature and digest
    println!("Step 5: Signing the body...");
    let signature = sign(body, &sender.private_key)?;
    println!("  Valid: {}", verify(body, &signature, &sender.public_key));
    println!("  Valid after edit: {}", verify("Your code is 000-000.", &signature, &sender.public_key));
    println!("  SHA256: {}", hash(body, HashVariant::Sha256));
    println!();

    println!("=== Example Complete ===");
    Ok(())
}
