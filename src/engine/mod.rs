pub mod banding;
pub mod candidates;
pub mod errors;
pub mod pipeline;
pub mod signature;
pub mod similarity;
pub mod union_find;

pub use banding::{band, band_all, BandHash, BucketKey};
pub use candidates::{generate_candidates, CandidateGenerator, CandidatePair};
pub use errors::PipelineError;
pub use pipeline::{
    deduplicate, evaluate_layouts, nearest_neighbor, DedupReport, PairSimilarity, QueryOutcome,
    Stage,
};
pub use signature::{seeded_hash, MinHasher, Signature};
pub use similarity::{
    candidate_probability, evaluate, generate_ground_truth, jaccard, sweep, EvaluationScores,
    SweepPoint,
};
pub use union_find::DisjointSet;
