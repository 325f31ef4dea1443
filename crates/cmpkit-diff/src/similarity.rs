//! Edit-distance similarity between two strings.
//!
//! The score is `1 - distance / max(len_a, len_b)`, where `distance` is the
//! Levenshtein distance over Unicode scalar values and lengths are counted in
//! the same unit. No case or whitespace normalization is applied.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DiffConfig;
use crate::table::AlignmentTable;

/// Similarity score together with the distance it was derived from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    /// Normalized score in `[0, 1]`; `1.0` only for equal strings.
    pub score: f64,
    /// Levenshtein distance between the two strings.
    pub distance: usize,
    /// Length of the longer string, in characters.
    pub max_len: usize,
}

/// Levenshtein distance between `a` and `b`, counted in characters.
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return a.len().max(b.len());
    }
    AlignmentTable::levenshtein(&a, &b).last()
}

/// Similarity of `a` and `b` in `[0, 1]`, rounded to four decimal places.
///
/// Equal strings (including two empty ones) score `1.0`; an empty string
/// against a non-empty one scores `0.0`.
pub fn similarity(a: &str, b: &str) -> f64 {
    report(a, b, DiffConfig::DEFAULT_PRECISION).score
}

/// [`similarity`] rounded to `config.similarity_precision` places.
pub fn similarity_with(a: &str, b: &str, config: &DiffConfig) -> f64 {
    report(a, b, config.similarity_precision).score
}

/// Score and raw distance of `a` against `b`.
pub fn similarity_report(a: &str, b: &str) -> SimilarityReport {
    report(a, b, DiffConfig::DEFAULT_PRECISION)
}

/// [`similarity_report`] with the score rounded to
/// `config.similarity_precision` places.
pub fn similarity_report_with(a: &str, b: &str, config: &DiffConfig) -> SimilarityReport {
    report(a, b, config.similarity_precision)
}

fn report(a: &str, b: &str, precision: u32) -> SimilarityReport {
    if a == b {
        return SimilarityReport {
            score: 1.0,
            distance: 0,
            max_len: a.chars().count(),
        };
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let max_len = a_chars.len().max(b_chars.len());

    if a_chars.is_empty() || b_chars.is_empty() {
        return SimilarityReport {
            score: 0.0,
            distance: max_len,
            max_len,
        };
    }

    let distance = AlignmentTable::levenshtein(&a_chars, &b_chars).last();
    let score = round_below_one(1.0 - distance as f64 / max_len as f64, precision);
    debug!(
        len_a = a_chars.len(),
        len_b = b_chars.len(),
        distance,
        score,
        "similarity computed"
    );

    SimilarityReport {
        score,
        distance,
        max_len,
    }
}

/// Round to `precision` places. Unequal strings must never round up to a
/// perfect score, so a result of `1.0` drops to the largest value below it.
///
/// Precision is clamped to `1..=MAX_PRECISION`: zero places leave no value
/// below one to drop to, and large exponents overflow the factor.
fn round_below_one(value: f64, precision: u32) -> f64 {
    let precision = precision.clamp(1, DiffConfig::MAX_PRECISION);
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    if rounded >= 1.0 {
        (factor - 1.0) / factor
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(similarity("hello", "hello"), 1.0);
    }

    #[test]
    fn two_empty_strings_are_identical() {
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn one_empty_string_scores_zero() {
        assert_eq!(similarity("", "abc"), 0.0);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn kitten_sitting() {
        let score = similarity("kitten", "sitting");
        assert!(score > 0.4 && score < 0.7, "score {score}");
        assert_eq!(score, 0.5714);
    }

    #[test]
    fn completely_different_strings_score_zero() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn case_is_significant() {
        assert_eq!(similarity("Rust", "rust"), 0.75);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(levenshtein("café", "cafe"), 1);
        assert_eq!(similarity("café", "cafe"), 0.75);
    }

    #[test]
    fn report_carries_distance() {
        let report = similarity_report("flaw", "lawn");
        assert_eq!(report.distance, 2);
        assert_eq!(report.max_len, 4);
        assert_eq!(report.score, 0.5);
    }

    #[test]
    fn precision_follows_config() {
        let config = DiffConfig {
            similarity_precision: 2,
            ..DiffConfig::default()
        };
        assert_eq!(similarity_with("kitten", "sitting", &config), 0.57);
    }

    #[test]
    fn rounding_never_reaches_one() {
        // 1 - 1/30001 would round to 1.0 at four places.
        assert_eq!(round_below_one(1.0 - 1.0 / 30_001.0, 4), 0.9999);
        assert_eq!(round_below_one(0.99996, 2), 0.99);
        assert_eq!(round_below_one(0.57142, 4), 0.5714);
    }

    #[test]
    fn zero_precision_keeps_near_matches_high() {
        let config = DiffConfig {
            similarity_precision: 0,
            ..DiffConfig::default()
        };
        assert_eq!(similarity_with("aaaaaaaaab", "aaaaaaaaac", &config), 0.9);
        assert_eq!(similarity_with("abc", "xyz", &config), 0.0);
    }

    #[test]
    fn oversized_precision_stays_in_range() {
        let config = DiffConfig {
            similarity_precision: 400,
            ..DiffConfig::default()
        };
        let score = similarity_with("kitten", "sitting", &config);
        assert!((0.0..=1.0).contains(&score), "score {score}");
        assert!((score - 4.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn report_with_uses_configured_precision() {
        let config = DiffConfig {
            similarity_precision: 2,
            ..DiffConfig::default()
        };
        let report = similarity_report_with("kitten", "sitting", &config);
        assert_eq!(report.score, 0.57);
        assert_eq!(report.distance, 3);
        assert_eq!(report.max_len, 7);
    }

    #[test]
    fn levenshtein_against_empty_is_length() {
        assert_eq!(levenshtein("", "abcd"), 4);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", ""), 0);
    }

    proptest! {
        #[test]
        fn similarity_is_symmetric(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
        }

        #[test]
        fn similarity_is_bounded(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            let score = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&score));
        }

        #[test]
        fn score_is_one_only_for_equal_strings(a in "[ab]{0,6}", b in "[ab]{0,6}") {
            prop_assert_eq!(similarity(&a, &b) == 1.0, a == b);
        }

        #[test]
        fn distance_bounded_by_longer_length(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            let d = levenshtein(&a, &b);
            prop_assert!(d <= a.chars().count().max(b.chars().count()));
        }
    }
}
