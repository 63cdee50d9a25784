// * Shingle generation over normalized text
// * Word k-grams for the fixed strategy, character k-grams with length-adaptive k for the dynamic one

use std::collections::HashSet;

use super::normalizer::word_count;
use crate::config::constants::{
    DYNAMIC_MAX_K, DYNAMIC_MEDIUM_WORDS, DYNAMIC_MIN_K, DYNAMIC_SHORT_WORDS,
};
use crate::config::ShingleStrategy;

/// Sliding window of `k` words, each shingle in its canonical space-joined form
///
/// Produces `max(0, word_count - k + 1)` shingles; documents shorter than `k` words yield none.
pub fn word_shingles(normalized: &str, k: usize) -> Vec<String> {
    if k == 0 {
        return Vec::new();
    }

    let words: Vec<&str> = normalized.split_whitespace().collect();
    if words.len() < k {
        return Vec::new();
    }

    words.windows(k).map(|window| window.join(" ")).collect()
}

/// Sliding window of `k` characters (spaces included)
pub fn char_shingles(normalized: &str, k: usize) -> Vec<String> {
    if k == 0 {
        return Vec::new();
    }

    let chars: Vec<char> = normalized.chars().collect();
    if chars.len() < k {
        return Vec::new();
    }

    chars.windows(k).map(|window| window.iter().collect()).collect()
}

/// Picks the shingle width from the document's word count
pub fn dynamic_shingle_size(normalized: &str) -> usize {
    let words = word_count(normalized);
    if words < DYNAMIC_SHORT_WORDS {
        DYNAMIC_MIN_K
    } else if words < DYNAMIC_MEDIUM_WORDS {
        DYNAMIC_MIN_K + 1
    } else {
        DYNAMIC_MAX_K
    }
}

impl ShingleStrategy {
    /// Ordered shingle sequence for already normalized text
    pub fn shingles(&self, normalized: &str) -> Vec<String> {
        match *self {
            ShingleStrategy::Words { k } => word_shingles(normalized, k),
            ShingleStrategy::DynamicChars => {
                char_shingles(normalized, dynamic_shingle_size(normalized))
            }
        }
    }

    /// Deduplicated shingle set, the ground-truth representation for Jaccard
    pub fn shingle_set(&self, normalized: &str) -> HashSet<String> {
        self.shingles(normalized).into_iter().collect()
    }
}
