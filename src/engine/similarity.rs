// * Similarity Validator
// * Exact Jaccard over shingle sets, precision/recall/F1 scoring and (bands, rows) sweeps

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

use super::banding::band_all;
use super::candidates::{generate_candidates, ordered_pair, CandidatePair};
use super::signature::Signature;
use crate::config::BandingPolicy;

/// `|A ∩ B| / |A ∪ B|`, 0 when both sets are empty
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Precision, recall and F1 of a candidate set against ground truth
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationScores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Scores candidates against ground truth; both sides are normalized to `(min, max)` first
pub fn evaluate(
    candidates: &HashSet<CandidatePair>,
    ground_truth: &HashSet<CandidatePair>,
) -> EvaluationScores {
    let candidates: HashSet<CandidatePair> =
        candidates.iter().map(|&(a, b)| ordered_pair(a, b)).collect();
    let truth: HashSet<CandidatePair> =
        ground_truth.iter().map(|&(a, b)| ordered_pair(a, b)).collect();

    let tp = candidates.intersection(&truth).count() as f64;
    let fp = candidates.difference(&truth).count() as f64;
    let fn_ = truth.difference(&candidates).count() as f64;

    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    let f1 = ratio(2.0 * precision * recall, precision + recall);

    EvaluationScores {
        precision,
        recall,
        f1,
    }
}

/// Every index pair whose exact Jaccard similarity reaches `threshold`
///
/// Quadratic in the number of sets; meant for evaluation corpora, not production runs.
pub fn generate_ground_truth(
    shingle_sets: &[HashSet<String>],
    threshold: f64,
) -> HashSet<CandidatePair> {
    let mut truth = HashSet::new();
    for i in 0..shingle_sets.len() {
        for j in (i + 1)..shingle_sets.len() {
            if jaccard(&shingle_sets[i], &shingle_sets[j]) >= threshold {
                truth.insert((i, j));
            }
        }
    }
    truth
}

/// Probability that a pair with similarity `s` shares at least one band: `1 - (1 - s^r)^b`
pub fn candidate_probability(similarity: f64, num_bands: usize, rows_per_band: usize) -> f64 {
    let band_match = similarity.powi(rows_per_band as i32);
    1.0 - (1.0 - band_match).powi(num_bands as i32)
}

/// One evaluated banding layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub num_bands: usize,
    pub rows_per_band: usize,
    pub candidate_pairs: usize,
    pub scores: EvaluationScores,
}

/// Runs exact-bucket candidate generation for each `(bands, rows)` layout and scores it
///
/// Layouts wider than the signatures are skipped with a warning.
pub fn sweep(
    signatures: &[Signature],
    ground_truth: &HashSet<CandidatePair>,
    layouts: &[(usize, usize)],
) -> Vec<SweepPoint> {
    let width = signatures.first().map(Signature::len).unwrap_or(0);
    let mut points = Vec::with_capacity(layouts.len());

    for &(num_bands, rows_per_band) in layouts {
        if num_bands == 0 || rows_per_band == 0 || num_bands * rows_per_band > width {
            tracing::warn!(
                num_bands = num_bands,
                rows_per_band = rows_per_band,
                signature_len = width,
                "Skipping banding layout that does not fit the signature"
            );
            continue;
        }

        let band_hashes = band_all(signatures, num_bands, rows_per_band);
        let candidates = generate_candidates(&band_hashes, BandingPolicy::Exact);
        let scores = evaluate(&candidates, ground_truth);

        tracing::info!(
            num_bands = num_bands,
            rows_per_band = rows_per_band,
            candidates = candidates.len(),
            f1 = scores.f1,
            "Evaluated banding layout"
        );

        points.push(SweepPoint {
            num_bands,
            rows_per_band,
            candidate_pairs: candidates.len(),
            scores,
        });
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_jaccard_identical() {
        let a = set(&["a", "b", "c"]);
        assert!((jaccard(&a, &a) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_jaccard_empty_is_zero() {
        let empty: HashSet<String> = HashSet::new();
        assert_eq!(jaccard(&empty, &empty), 0.0);
    }

    #[test]
    fn test_jaccard_partial() {
        let a = set(&["a", "b", "c"]);
        let b = set(&["b", "c", "d"]);
        assert!((jaccard(&a, &b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_reference_case() {
        let candidates = HashSet::from([(0, 1)]);
        let truth = HashSet::from([(0, 1), (1, 2)]);
        let scores = evaluate(&candidates, &truth);
        assert!((scores.precision - 1.0).abs() < 1e-12);
        assert!((scores.recall - 0.5).abs() < 1e-12);
        assert!((scores.f1 - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_normalizes_pair_order() {
        let candidates = HashSet::from([(1, 0)]);
        let truth = HashSet::from([(0, 1)]);
        assert!((evaluate(&candidates, &truth).f1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_zero_denominators() {
        let empty = HashSet::new();
        assert_eq!(evaluate(&empty, &empty), EvaluationScores::default());

        let candidates = HashSet::from([(0, 1)]);
        let scores = evaluate(&candidates, &empty);
        assert_eq!(scores.precision, 0.0);
        assert_eq!(scores.recall, 0.0);
        assert_eq!(scores.f1, 0.0);
    }

    #[test]
    fn test_ground_truth_threshold() {
        let sets = vec![set(&["a", "b", "c"]), set(&["a", "b", "d"]), set(&["x", "y"])];
        assert_eq!(generate_ground_truth(&sets, 0.5), HashSet::from([(0, 1)]));
        assert!(generate_ground_truth(&sets, 0.9).is_empty());
    }

    #[test]
    fn test_candidate_probability_s_curve() {
        assert!(candidate_probability(0.9, 20, 5) > 0.99);
        assert!(candidate_probability(0.1, 20, 5) < 0.01);
        assert_eq!(candidate_probability(0.0, 20, 5), 0.0);
        assert!((candidate_probability(1.0, 20, 5) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sweep_skips_oversized_layouts() {
        let sigs = vec![
            Signature::from_values(vec![1, 2, 3, 4]),
            Signature::from_values(vec![1, 2, 9, 9]),
        ];
        let truth = HashSet::from([(0, 1)]);
        let points = sweep(&sigs, &truth, &[(2, 2), (3, 2), (0, 1)]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].candidate_pairs, 1);
        assert!((points[0].scores.f1 - 1.0).abs() < 1e-12);
    }
}
