// * Configuration Constants
// * Central location for the documented default LSH parameters

// * Collection deduplication preset: 100 permutations split into 20 bands of 5 rows
pub const DEDUP_NUM_PERMUTATIONS: usize = 100;
pub const DEDUP_NUM_BANDS: usize = 20;
pub const DEDUP_ROWS_PER_BAND: usize = DEDUP_NUM_PERMUTATIONS / DEDUP_NUM_BANDS;

// * Nearest-neighbour preset: 300 permutations, 50 bands of 2 rows (100 values used)
pub const QUERY_NUM_PERMUTATIONS: usize = 300;
pub const QUERY_NUM_BANDS: usize = 50;
pub const QUERY_ROWS_PER_BAND: usize = 2;

// * Word shingle size used when dynamic sizing is off
pub const DEFAULT_SHINGLE_SIZE: usize = 3;

// * Dynamic-k bounds: k = 3 below 10 words, 4 below 100 words, 5 otherwise
pub const DYNAMIC_MIN_K: usize = 3;
pub const DYNAMIC_MAX_K: usize = 5;
pub const DYNAMIC_SHORT_WORDS: usize = 10;
pub const DYNAMIC_MEDIUM_WORDS: usize = 100;

// * Neighbouring buckets probed per band by the multi-probe policy
pub const DEFAULT_NUM_PROBES: u64 = 2;

// * Jaccard threshold for ground-truth pair generation
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

// * Sentinel minimum for documents whose shingle set is empty
pub const EMPTY_SHINGLE_HASH: u64 = u64::MAX;
