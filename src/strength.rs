//! # Key-Strength Evaluator
//!
//! Additive scoring of a candidate password or key.
//!
//! | Condition | Points | Recommendation when missing |
//! |-----------|--------|-----------------------------|
//! | Length ≥ 12 characters | 25 | lengthen |
//! | Lowercase letter | 10 | add lowercase |
//! | Uppercase letter | 10 | add uppercase |
//! | Digit | 10 | add digits |
//! | Special character | 15 | add special characters |
//! | Shannon entropy > 3.5 bits/char | 30 | diversify characters |
//!
//! Letter and digit classes are ASCII only. Any other character, including
//! spaces and non-ASCII letters, counts as special.
//!
//! A candidate is strong at 80 points or more. The evaluation is a pure
//! function of the input.

use std::collections::BTreeMap;

use serde::Serialize;

/// Minimum length for the length bonus
pub const MIN_LENGTH: usize = 12;

/// Entropy threshold in bits per character
pub const ENTROPY_THRESHOLD: f64 = 3.5;

/// Score at which a candidate counts as strong
pub const STRONG_SCORE: u8 = 80;

const LENGTH_POINTS: u8 = 25;
const LOWERCASE_POINTS: u8 = 10;
const UPPERCASE_POINTS: u8 = 10;
const DIGIT_POINTS: u8 = 10;
const SPECIAL_POINTS: u8 = 15;
const ENTROPY_POINTS: u8 = 30;

/// Outcome of [`evaluate`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthReport {
    /// `score >= 80`
    pub is_strong: bool,
    /// 0 to 100
    pub score: u8,
    /// One entry per unmet condition, in table order
    pub recommendations: Vec<String>,
    /// Shannon entropy of the character distribution, bits per character
    pub entropy: f64,
}

/// Score a candidate password or key
pub fn evaluate(candidate: &str) -> StrengthReport {
    let mut score = 0u8;
    let mut recommendations = Vec::new();

    let mut check = |met: bool, points: u8, advice: &str| {
        if met {
            score += points;
        } else {
            recommendations.push(advice.to_string());
        }
    };

    check(
        candidate.chars().count() >= MIN_LENGTH,
        LENGTH_POINTS,
        "Use at least 12 characters.",
    );
    check(
        candidate.chars().any(|c| c.is_ascii_lowercase()),
        LOWERCASE_POINTS,
        "Add lowercase letters.",
    );
    check(
        candidate.chars().any(|c| c.is_ascii_uppercase()),
        UPPERCASE_POINTS,
        "Add uppercase letters.",
    );
    check(
        candidate.chars().any(|c| c.is_ascii_digit()),
        DIGIT_POINTS,
        "Add numbers.",
    );
    check(
        candidate.chars().any(|c| !c.is_ascii_alphanumeric()),
        SPECIAL_POINTS,
        "Add special characters such as !@#$%.",
    );

    let entropy = shannon_entropy(candidate);
    check(
        entropy > ENTROPY_THRESHOLD,
        ENTROPY_POINTS,
        "Use a more diverse mix of characters.",
    );

    StrengthReport {
        is_strong: score >= STRONG_SCORE,
        score,
        recommendations,
        entropy,
    }
}

/// Shannon entropy over the character distribution, in bits per character
///
/// Terms are summed in character order so the result is bit-for-bit
/// reproducible.
pub fn shannon_entropy(text: &str) -> f64 {
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    let mut total = 0usize;
    for c in text.chars() {
        *counts.entry(c).or_insert(0) += 1;
        total += 1;
    }

    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    counts
        .values()
        .map(|&n| {
            let p = n as f64 / total;
            -p * p.log2()
        })
        .sum()
}

// ============================================================================
// TESTS
// ============================================================================
