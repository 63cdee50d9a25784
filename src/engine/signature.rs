// * MinHash Signature Generator
// * One seeded 128-bit digest per (shingle, permutation) pair, folded to u64, minimum kept per permutation

use rayon::prelude::*;
use xxhash_rust::xxh3::xxh3_128_with_seed;

use crate::config::constants::EMPTY_SHINGLE_HASH;
use crate::config::{LshConfig, ShingleStrategy};

/// Seeded hash primitive shared by every permutation
///
/// Hashes the canonical bytes `shingle || "_" || permutation` with xxh3-128 salted by `salt`,
/// then folds the two 64-bit halves together. Deterministic across processes.
pub fn seeded_hash(shingle: &str, permutation: u64, salt: u64) -> u64 {
    let suffix = permutation_suffix(permutation);
    let mut key = Vec::with_capacity(shingle.len() + suffix.len());
    key.extend_from_slice(shingle.as_bytes());
    key.extend_from_slice(suffix.as_bytes());
    fold_digest(&key, salt)
}

fn permutation_suffix(permutation: u64) -> String {
    format!("_{permutation}")
}

fn fold_digest(key: &[u8], salt: u64) -> u64 {
    let digest = xxh3_128_with_seed(key, salt);
    ((digest >> 64) as u64) ^ (digest as u64)
}

/// MinHash signature of one document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    values: Vec<u64>,
}

impl Signature {
    /// Wraps precomputed minimum hashes
    pub fn from_values(values: Vec<u64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when the signature came from an empty shingle set
    pub fn is_degenerate(&self) -> bool {
        self.values.iter().all(|&v| v == EMPTY_SHINGLE_HASH)
    }

    /// Fraction of positions that agree, an estimate of shingle-set Jaccard similarity
    pub fn estimated_similarity(&self, other: &Signature) -> f64 {
        if self.values.len() != other.values.len() || self.values.is_empty() {
            return 0.0;
        }

        let matches = self
            .values
            .iter()
            .zip(other.values.iter())
            .filter(|(a, b)| a == b)
            .count();

        matches as f64 / self.values.len() as f64
    }
}

/// Produces fixed-length signatures from shingle sequences
///
/// The `"_{permutation}"` key suffixes are rendered once up front; signing only
/// reuses a single key buffer per document.
#[derive(Debug, Clone)]
pub struct MinHasher {
    suffixes: Vec<String>,
    salt: u64,
}

impl MinHasher {
    pub fn new(num_permutations: usize, salt: u64) -> Self {
        Self {
            suffixes: (0..num_permutations as u64).map(permutation_suffix).collect(),
            salt,
        }
    }

    pub fn from_config(config: &LshConfig) -> Self {
        Self::new(config.num_permutations, config.hash_seed)
    }

    pub fn num_permutations(&self) -> usize {
        self.suffixes.len()
    }

    /// Signs a shingle sequence
    ///
    /// An empty sequence has no minimum; it gets `u64::MAX` in every position so the
    /// document still takes part in banding, grouped with other degenerate documents.
    pub fn sign(&self, shingles: &[String]) -> Signature {
        let mut values = vec![EMPTY_SHINGLE_HASH; self.suffixes.len()];
        let mut key = Vec::new();

        for shingle in shingles {
            key.clear();
            key.extend_from_slice(shingle.as_bytes());
            let stem = key.len();

            for (suffix, min_hash) in self.suffixes.iter().zip(values.iter_mut()) {
                key.truncate(stem);
                key.extend_from_slice(suffix.as_bytes());
                let hash = fold_digest(&key, self.salt);
                if hash < *min_hash {
                    *min_hash = hash;
                }
            }
        }

        Signature { values }
    }

    /// Shingles and signs already normalized text
    pub fn sign_text(&self, strategy: &ShingleStrategy, normalized: &str) -> Signature {
        self.sign(&strategy.shingles(normalized))
    }

    /// Signs many documents in parallel; output order matches input order
    pub fn sign_all<S: AsRef<str> + Sync>(
        &self,
        strategy: &ShingleStrategy,
        normalized_texts: &[S],
    ) -> Vec<Signature> {
        normalized_texts
            .par_iter()
            .map(|text| self.sign_text(strategy, text.as_ref()))
            .collect()
    }
}
