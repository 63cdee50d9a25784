// * LSH parameter set shared by both pipeline use cases
// * Validated eagerly so a bad configuration never silently truncates results

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::constants::{
    DEDUP_NUM_BANDS, DEDUP_NUM_PERMUTATIONS, DEDUP_ROWS_PER_BAND, DEFAULT_NUM_PROBES,
    DEFAULT_SHINGLE_SIZE, DEFAULT_SIMILARITY_THRESHOLD, QUERY_NUM_BANDS, QUERY_NUM_PERMUTATIONS,
    QUERY_ROWS_PER_BAND,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("num_permutations must be at least 1")]
    ZeroPermutations,

    #[error("num_bands and rows_per_band must be at least 1 (got {num_bands} x {rows_per_band})")]
    ZeroBanding {
        num_bands: usize,
        rows_per_band: usize,
    },

    #[error(
        "{num_bands} bands x {rows_per_band} rows needs {required} signature values, only {num_permutations} available"
    )]
    BandingExceedsSignature {
        num_bands: usize,
        rows_per_band: usize,
        required: usize,
        num_permutations: usize,
    },

    #[error("shingle size must be at least 1")]
    ZeroShingleSize,

    #[error("similarity threshold {0} is outside [0, 1]")]
    ThresholdOutOfRange(f64),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How normalized text is cut into shingles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShingleStrategy {
    /// Sliding window of `k` whitespace-separated words.
    Words { k: usize },
    /// Character shingles whose width follows the document's word count.
    DynamicChars,
}

impl Default for ShingleStrategy {
    fn default() -> Self {
        ShingleStrategy::Words {
            k: DEFAULT_SHINGLE_SIZE,
        }
    }
}

/// Bucket-assignment policy used during candidate generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BandingPolicy {
    /// Only exact `(band, hash)` matches share a bucket.
    Exact,
    /// Also probe `(band, hash + p)` for `p` in `1..=num_probes`.
    MultiProbe { num_probes: u64 },
}

impl Default for BandingPolicy {
    fn default() -> Self {
        BandingPolicy::Exact
    }
}

/// Full parameter set for one pipeline run
///
/// # Fields
/// - `num_permutations`: signature length
/// - `num_bands` / `rows_per_band`: banding layout, trailing values are dropped
/// - `shingles`: word or dynamic character shingling
/// - `banding`: exact or multi-probe buckets
/// - `hash_seed`: salts every seeded hash so independent trials get independent families
/// - `threshold`: Jaccard cut-off used only for ground-truth generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LshConfig {
    pub num_permutations: usize,
    pub num_bands: usize,
    pub rows_per_band: usize,
    pub shingles: ShingleStrategy,
    pub banding: BandingPolicy,
    pub hash_seed: u64,
    pub threshold: f64,
}

impl Default for LshConfig {
    fn default() -> Self {
        Self::deduplication()
    }
}

impl LshConfig {
    /// Collection deduplication preset: 100 permutations, 20 bands x 5 rows, 3-word shingles
    pub fn deduplication() -> Self {
        Self {
            num_permutations: DEDUP_NUM_PERMUTATIONS,
            num_bands: DEDUP_NUM_BANDS,
            rows_per_band: DEDUP_ROWS_PER_BAND,
            shingles: ShingleStrategy::default(),
            banding: BandingPolicy::Exact,
            hash_seed: 0,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    /// Deduplication with dynamic character shingles and two-probe buckets
    pub fn improved() -> Self {
        Self {
            shingles: ShingleStrategy::DynamicChars,
            banding: BandingPolicy::MultiProbe {
                num_probes: DEFAULT_NUM_PROBES,
            },
            ..Self::deduplication()
        }
    }

    /// Nearest-neighbour preset: 300 permutations, 50 bands x 2 rows
    pub fn nearest_neighbor() -> Self {
        Self {
            num_permutations: QUERY_NUM_PERMUTATIONS,
            num_bands: QUERY_NUM_BANDS,
            rows_per_band: QUERY_ROWS_PER_BAND,
            ..Self::deduplication()
        }
    }

    /// Loads and validates a configuration from a JSON file; missing fields take the
    /// deduplication preset
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::load_json_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration without validating it, for callers that still
    /// apply overrides and validate the final result themselves
    pub fn load_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Rejects parameter sets that would fail or silently truncate
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_permutations == 0 {
            return Err(ConfigError::ZeroPermutations);
        }

        if self.num_bands == 0 || self.rows_per_band == 0 {
            return Err(ConfigError::ZeroBanding {
                num_bands: self.num_bands,
                rows_per_band: self.rows_per_band,
            });
        }

        let required = self.num_bands.saturating_mul(self.rows_per_band);
        if required > self.num_permutations {
            return Err(ConfigError::BandingExceedsSignature {
                num_bands: self.num_bands,
                rows_per_band: self.rows_per_band,
                required,
                num_permutations: self.num_permutations,
            });
        }

        if let ShingleStrategy::Words { k: 0 } = self.shingles {
            return Err(ConfigError::ZeroShingleSize);
        }

        // * NaN fails the range check too
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.threshold));
        }

        Ok(())
    }

    /// Number of signature values actually consumed by banding
    pub fn banded_width(&self) -> usize {
        self.num_bands * self.rows_per_band
    }
}
