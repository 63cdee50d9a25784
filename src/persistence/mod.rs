// * Persistence edges: corpus input, exact-duplicate pre-filter, result output
// * All I/O happens here, outside the signing and clustering hot path

pub mod corpus;
pub mod exact;
pub mod sink;

// * Re-exports for convenient access
pub use corpus::{parse_corpus, read_corpus, CorpusError, CorpusStats, Document};
pub use exact::{remove_exact_duplicates, ExactDedupOutcome, ExactDuplicate};
pub use sink::{save_dedup_report, save_query_outcome, write_dedup_report, write_query_outcome};
