//! Timing-safe equality.
//!
//! The byte comparison accumulates over every position instead of stopping
//! at the first mismatch. Lengths are compared first and unequal lengths
//! return early, which leaks the length through timing. Lengths of the
//! compared values are not treated as secret.

use subtle::ConstantTimeEq;

/// Compare two strings without an early exit on the first differing byte
pub fn secure_compare(a: &str, b: &str) -> bool {
    secure_compare_bytes(a.as_bytes(), b.as_bytes())
}

/// Byte-level variant of [`secure_compare`]
pub fn secure_compare_bytes(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_strings() {
        assert!(secure_compare("token-123", "token-123"));
        assert!(secure_compare("", ""));
    }

    #[test]
    fn test_different_content() {
        assert!(!secure_compare("token-123", "token-124"));
        assert!(!secure_compare("Token-123", "token-123"));
    }

    #[test]
    fn test_different_length() {
        let a = "token-123";
        assert!(!secure_compare(a, &a[..a.len() - 1]));
        assert!(!secure_compare_bytes(b"abc", b"abcd"));
    }
}
