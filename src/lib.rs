//! Near-duplicate detection and approximate nearest-neighbour lookup for text
//! collections using MinHash signatures, LSH banding and union-find clustering.
//!
//! ```ignore
//! use lsh_dedup::{config::LshConfig, engine, persistence::Document};
//!
//! let docs = vec![Document::new("1", "the cat sat on the mat")];
//! let run = engine::deduplicate(docs, &LshConfig::deduplication())?;
//! println!("{} clusters in {:?}", run.result.clusters.len(), run.metrics.elapsed);
//! ```

pub mod config;
pub mod engine;
pub mod ops;
pub mod persistence;
pub mod refinery;
