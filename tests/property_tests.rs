//! Property-based checks of the facade and the pure helpers.

use mailguard_core::{
    evaluate, hash, secure_compare, Algorithm, DecryptionOptions, EncryptOptions, HashVariant,
    ProtectionConfig, Protector,
};
use proptest::prelude::*;

fn protector() -> Protector {
    Protector::new(ProtectionConfig {
        stream_iterations: 50,
        ..Default::default()
    })
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_symmetric_round_trip(body in "\\PC{0,256}", password in "\\PC{0,32}") {
        let p = protector();
        for algorithm in [Algorithm::Stream, Algorithm::SecretBox] {
            let envelope = p
                .encrypt_with(&body, algorithm, &password, &EncryptOptions::default())
                .unwrap();
            let plaintext = p
                .decrypt(&envelope, &DecryptionOptions::with_password(password.clone()))
                .unwrap();
            prop_assert_eq!(&plaintext, &body);
        }
    }

    #[test]
    fn prop_stream_preserves_length(body in "\\PC{0,256}") {
        use base64::{engine::general_purpose::STANDARD, Engine as _};

        let envelope = protector()
            .encrypt_with(&body, Algorithm::Stream, "pw", &EncryptOptions::default())
            .unwrap();
        let ciphertext = STANDARD.decode(&envelope.encrypted_data).unwrap();
        prop_assert_eq!(ciphertext.len(), body.len());
    }

    #[test]
    fn prop_score_bounded(candidate in "\\PC{0,64}") {
        let report = evaluate(&candidate);
        prop_assert!(report.score <= 100);
        prop_assert_eq!(report.is_strong, report.score >= 80);
        prop_assert!(report.recommendations.len() <= 6);
        prop_assert_eq!(report, evaluate(&candidate));
    }

    #[test]
    fn prop_compare_matches_equality(a in "[a-f0-9]{0,24}", b in "[a-f0-9]{0,24}") {
        prop_assert_eq!(secure_compare(&a, &b), a == b);
        prop_assert!(secure_compare(&a, &a));
    }

    #[test]
    fn prop_hash_lengths(data in any::<String>()) {
        prop_assert_eq!(hash(&data, HashVariant::Sha256).len(), 64);
        prop_assert_eq!(hash(&data, HashVariant::Sha512).len(), 128);
    }
}
