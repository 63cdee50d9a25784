// * The Refinery: text preparation ahead of signing
// * Normalization and shingling, shared by stored documents and queries

pub mod normalizer;
pub mod shingles;

pub use normalizer::{normalize, word_count, word_set};
pub use shingles::{char_shingles, dynamic_shingle_size, word_shingles};
