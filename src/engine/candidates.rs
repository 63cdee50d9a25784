// * Candidate Generator
// * Files documents into (band, hash) buckets in arrival order and pairs each newcomer with prior occupants

use std::collections::{HashMap, HashSet};

use super::banding::{BandHash, BucketKey};
use crate::config::BandingPolicy;

/// Unordered document pair, always stored as `(min, max)`
pub type CandidatePair = (usize, usize);

/// Orders a pair as `(min, max)`
pub fn ordered_pair(a: usize, b: usize) -> CandidatePair {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Bucket map for one candidate-generation pass
///
/// Insertion must be serialized: each document only pairs with documents filed before it.
/// The final candidate set does not depend on insertion order for exact buckets.
#[derive(Debug)]
pub struct CandidateGenerator {
    policy: BandingPolicy,
    buckets: HashMap<BucketKey, Vec<usize>>,
    candidates: HashSet<CandidatePair>,
}

impl CandidateGenerator {
    pub fn new(policy: BandingPolicy) -> Self {
        Self {
            policy,
            buckets: HashMap::new(),
            candidates: HashSet::new(),
        }
    }

    /// Files one document's band hashes and records the pairs it forms
    pub fn insert(&mut self, doc: usize, band_hashes: &[BandHash]) {
        for (band, &hash) in band_hashes.iter().enumerate() {
            let key = BucketKey::new(band, hash);

            let occupants = self.buckets.entry(key).or_default();
            for &prior in occupants.iter() {
                if prior != doc {
                    self.candidates.insert(ordered_pair(prior, doc));
                }
            }
            occupants.push(doc);

            // * Probed buckets are read, never written
            if let BandingPolicy::MultiProbe { num_probes } = self.policy {
                for probe in key.probes(num_probes) {
                    if let Some(neighbours) = self.buckets.get(&probe) {
                        for &prior in neighbours {
                            if prior != doc {
                                self.candidates.insert(ordered_pair(prior, doc));
                            }
                        }
                    }
                }
            }
        }
    }

    /// Number of distinct buckets opened so far
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn candidates(&self) -> &HashSet<CandidatePair> {
        &self.candidates
    }

    pub fn into_candidates(self) -> HashSet<CandidatePair> {
        self.candidates
    }
}

/// One linear pass over all documents' band hashes, index = document position
pub fn generate_candidates(
    band_hashes: &[Vec<BandHash>],
    policy: BandingPolicy,
) -> HashSet<CandidatePair> {
    let mut generator = CandidateGenerator::new(policy);
    for (doc, hashes) in band_hashes.iter().enumerate() {
        generator.insert(doc, hashes);
    }

    tracing::debug!(
        documents = band_hashes.len(),
        buckets = generator.bucket_count(),
        candidates = generator.candidates().len(),
        "Candidate generation complete"
    );

    generator.into_candidates()
}
