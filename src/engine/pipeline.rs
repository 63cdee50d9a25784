// * Pipeline Orchestrator
// * Collection deduplication and nearest-neighbour query over the same stages:
// * ExactDedupe -> Normalize -> Signature -> Band -> Candidates -> Cluster -> Report

use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

use super::banding::band_all;
use super::candidates::generate_candidates;
use super::errors::PipelineError;
use super::signature::MinHasher;
use super::similarity::{generate_ground_truth, jaccard, sweep, SweepPoint};
use super::union_find::DisjointSet;
use crate::config::LshConfig;
use crate::ops::telemetry::{record_candidate_pairs, record_clusters, record_documents};
use crate::ops::{Instrumented, StageProfiler};
use crate::persistence::exact::{remove_exact_duplicates, ExactDuplicate};
use crate::persistence::Document;
use crate::refinery::{normalize, word_set};

/// Named pipeline stages, used for stage timings and metrics labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ExactDedupe,
    Normalize,
    Signature,
    Band,
    Candidates,
    Cluster,
    Report,
    GroundTruth,
    Sweep,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ExactDedupe => "exact_dedupe",
            Stage::Normalize => "normalize",
            Stage::Signature => "signature",
            Stage::Band => "band",
            Stage::Candidates => "candidates",
            Stage::Cluster => "cluster",
            Stage::Report => "report",
            Stage::GroundTruth => "ground_truth",
            Stage::Sweep => "sweep",
        }
    }
}

/// Exact Jaccard similarity of two cluster members
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairSimilarity {
    pub first_id: String,
    pub second_id: String,
    pub similarity: f64,
}

/// Near-duplicate clusters of one deduplication run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DedupReport {
    /// Member ids per cluster, clusters ordered by their first member
    pub clusters: Vec<Vec<String>>,
    /// Documents removed before LSH because their raw text repeated an earlier one
    pub exact_duplicates: Vec<ExactDuplicate>,
    /// Pairwise similarities inside every multi-member cluster
    pub similarities: Vec<PairSimilarity>,
    pub candidate_pairs: usize,
}

impl DedupReport {
    /// Clusters holding more than one document
    pub fn near_duplicate_groups(&self) -> impl Iterator<Item = &Vec<String>> {
        self.clusters.iter().filter(|cluster| cluster.len() > 1)
    }
}

/// Result of a nearest-neighbour query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum QueryOutcome {
    /// Best stored document in the query's cluster
    Match {
        id: String,
        /// Normalized text of the match
        text: String,
        /// Exact Jaccard similarity between the query and the match
        similarity: f64,
        /// Stored documents sharing the query's cluster
        cluster_size: usize,
    },
    /// The query shares no cluster with any stored document
    NoMatch,
}

impl QueryOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, QueryOutcome::Match { .. })
    }

    pub fn matched_id(&self) -> Option<&str> {
        match self {
            QueryOutcome::Match { id, .. } => Some(id),
            QueryOutcome::NoMatch => None,
        }
    }
}

/// Unique documents after the exact pre-filter and normalization
struct PreparedCorpus {
    ids: Vec<String>,
    normalized: Vec<String>,
    exact_duplicates: Vec<ExactDuplicate>,
}

fn prepare(documents: Vec<Document>, profiler: &mut StageProfiler) -> PreparedCorpus {
    let outcome = remove_exact_duplicates(documents);
    record_documents("unique", outcome.unique.len());
    record_documents("exact_duplicate", outcome.duplicates.len());
    profiler.finish_stage(Stage::ExactDedupe.as_str());

    let (ids, normalized): (Vec<String>, Vec<String>) = outcome
        .unique
        .into_iter()
        .map(|doc| {
            let text = normalize(&doc.text);
            (doc.id, text)
        })
        .unzip();
    profiler.finish_stage(Stage::Normalize.as_str());

    PreparedCorpus {
        ids,
        normalized,
        exact_duplicates: outcome.duplicates,
    }
}

/// Groups a collection into near-duplicate clusters
///
/// Exact repeats are removed first and reported separately; the rest are signed,
/// banded and clustered so that any two documents sharing a bucket end up together.
pub fn deduplicate(
    documents: Vec<Document>,
    config: &LshConfig,
) -> Result<Instrumented<DedupReport>, PipelineError> {
    config.validate()?;

    let mut profiler = StageProfiler::start("deduplicate");
    info!(
        documents = documents.len(),
        num_permutations = config.num_permutations,
        num_bands = config.num_bands,
        rows_per_band = config.rows_per_band,
        "Starting deduplication"
    );

    let corpus = prepare(documents, &mut profiler);

    let hasher = MinHasher::from_config(config);
    let signatures = hasher.sign_all(&config.shingles, &corpus.normalized);
    profiler.finish_stage(Stage::Signature.as_str());

    let band_hashes = band_all(&signatures, config.num_bands, config.rows_per_band);
    profiler.finish_stage(Stage::Band.as_str());

    let candidates = generate_candidates(&band_hashes, config.banding);
    record_candidate_pairs(candidates.len());
    info!(candidates = candidates.len(), "Found candidate pairs");
    profiler.finish_stage(Stage::Candidates.as_str());

    let mut forest = DisjointSet::from_pairs(corpus.ids.len(), candidates.iter().copied());
    let index_clusters = forest.clusters();
    record_clusters(index_clusters.len());
    info!(clusters = index_clusters.len(), "Formed clusters");
    profiler.finish_stage(Stage::Cluster.as_str());

    let similarities = cluster_similarities(&index_clusters, &corpus, config);
    let clusters = index_clusters
        .iter()
        .map(|members| members.iter().map(|&i| corpus.ids[i].clone()).collect())
        .collect();
    profiler.finish_stage(Stage::Report.as_str());

    let report = DedupReport {
        clusters,
        exact_duplicates: corpus.exact_duplicates,
        similarities,
        candidate_pairs: candidates.len(),
    };
    Ok(profiler.finish(report))
}

/// Pairwise exact similarity inside each multi-member cluster
fn cluster_similarities(
    index_clusters: &[Vec<usize>],
    corpus: &PreparedCorpus,
    config: &LshConfig,
) -> Vec<PairSimilarity> {
    let mut similarities = Vec::new();

    for members in index_clusters.iter().filter(|members| members.len() > 1) {
        let sets: Vec<HashSet<String>> = members
            .iter()
            .map(|&i| config.shingles.shingle_set(&corpus.normalized[i]))
            .collect();

        for a in 0..members.len() {
            for b in (a + 1)..members.len() {
                let similarity = jaccard(&sets[a], &sets[b]);
                let first_id = &corpus.ids[members[a]];
                let second_id = &corpus.ids[members[b]];
                debug!(
                    first = %first_id,
                    second = %second_id,
                    similarity = similarity,
                    "Cluster member similarity"
                );
                similarities.push(PairSimilarity {
                    first_id: first_id.clone(),
                    second_id: second_id.clone(),
                    similarity,
                });
            }
        }
    }

    similarities
}

/// Finds the stored document most similar to `query`
///
/// The query is normalized and signed like a stored document, appended with the
/// sentinel index `N = unique_count`, then banded and clustered with the collection.
/// Among stored documents sharing the sentinel's cluster the one with the highest
/// exact Jaccard similarity wins; ties go to the earliest document.
pub fn nearest_neighbor(
    documents: Vec<Document>,
    query: &str,
    config: &LshConfig,
) -> Result<Instrumented<QueryOutcome>, PipelineError> {
    config.validate()?;

    let mut profiler = StageProfiler::start("nearest_neighbor");
    let corpus = prepare(documents, &mut profiler);
    record_documents("query", 1);

    let hasher = MinHasher::from_config(config);
    let normalized_query = normalize(query);
    let mut signatures = hasher.sign_all(&config.shingles, &corpus.normalized);
    signatures.push(hasher.sign_text(&config.shingles, &normalized_query));
    profiler.finish_stage(Stage::Signature.as_str());

    let band_hashes = band_all(&signatures, config.num_bands, config.rows_per_band);
    profiler.finish_stage(Stage::Band.as_str());

    let sentinel = corpus.ids.len();
    let candidates = generate_candidates(&band_hashes, config.banding);
    record_candidate_pairs(candidates.len());
    debug!(candidates = candidates.len(), "Query candidates after LSH");
    profiler.finish_stage(Stage::Candidates.as_str());

    let mut forest = DisjointSet::from_pairs(sentinel + 1, candidates.iter().copied());
    let neighbours: Vec<usize> = forest
        .members_of(sentinel)
        .into_iter()
        .filter(|&i| i != sentinel)
        .collect();
    profiler.finish_stage(Stage::Cluster.as_str());

    let outcome = best_match(&neighbours, &normalized_query, &corpus, config);
    match &outcome {
        QueryOutcome::Match { id, similarity, .. } => {
            info!(best_match = %id, similarity = similarity, "Best match for the query");
        }
        QueryOutcome::NoMatch => info!("There is no similarity between query and documents"),
    }
    profiler.finish_stage(Stage::Report.as_str());

    Ok(profiler.finish(outcome))
}

fn best_match(
    neighbours: &[usize],
    normalized_query: &str,
    corpus: &PreparedCorpus,
    config: &LshConfig,
) -> QueryOutcome {
    let query_shingles = config.shingles.shingle_set(normalized_query);
    // * Queries too short to shingle share buckets with every degenerate document,
    // * so they are scored by word overlap instead
    let query_words = query_shingles.is_empty().then(|| word_set(normalized_query));

    let mut best: Option<(usize, f64)> = None;
    for &index in neighbours {
        let text = &corpus.normalized[index];
        let similarity = match &query_words {
            Some(words) => jaccard(words, &word_set(text)),
            None => jaccard(&query_shingles, &config.shingles.shingle_set(text)),
        };
        if best.map_or(true, |(_, top)| similarity > top) {
            best = Some((index, similarity));
        }
    }

    match best {
        Some((index, similarity)) if similarity > 0.0 => QueryOutcome::Match {
            id: corpus.ids[index].clone(),
            text: corpus.normalized[index].clone(),
            similarity,
            cluster_size: neighbours.len(),
        },
        Some(_) => {
            debug!(
                neighbours = neighbours.len(),
                "Query cluster shares no content with the query"
            );
            QueryOutcome::NoMatch
        }
        None => QueryOutcome::NoMatch,
    }
}

/// Ground-truth evaluation of several banding layouts over one collection
///
/// Ground truth is every unique-document pair whose exact shingle-set Jaccard
/// reaches `config.threshold`; signatures use `config.num_permutations`.
pub fn evaluate_layouts(
    documents: Vec<Document>,
    config: &LshConfig,
    layouts: &[(usize, usize)],
) -> Result<Instrumented<Vec<SweepPoint>>, PipelineError> {
    config.validate()?;

    let mut profiler = StageProfiler::start("evaluate_layouts");
    let corpus = prepare(documents, &mut profiler);

    let shingle_sets: Vec<HashSet<String>> = corpus
        .normalized
        .iter()
        .map(|text| config.shingles.shingle_set(text))
        .collect();
    let ground_truth = generate_ground_truth(&shingle_sets, config.threshold);
    info!(
        pairs = ground_truth.len(),
        threshold = config.threshold,
        "Generated ground truth"
    );
    profiler.finish_stage(Stage::GroundTruth.as_str());

    let hasher = MinHasher::from_config(config);
    let signatures = hasher.sign_all(&config.shingles, &corpus.normalized);
    profiler.finish_stage(Stage::Signature.as_str());

    let points = sweep(&signatures, &ground_truth, layouts);
    profiler.finish_stage(Stage::Sweep.as_str());

    Ok(profiler.finish(points))
}
