use lsh_dedup::config::{BandingPolicy, ShingleStrategy};
use lsh_dedup::engine::{band, candidate_probability, generate_candidates, MinHasher};
use lsh_dedup::refinery::normalize;
use proptest::prelude::*;

// * Test Suite for signing and banding

const TWENTY_WORDS: &str = "the river bends past the mill where children gather every summer \
                            to watch the slow boats drift toward the harbour";

fn sign(text: &str, permutations: usize, seed: u64) -> lsh_dedup::engine::Signature {
    MinHasher::new(permutations, seed).sign_text(&ShingleStrategy::Words { k: 3 }, &normalize(text))
}

#[test]
fn test_signature_is_byte_for_byte_deterministic() {
    let a = sign(TWENTY_WORDS, 100, 0);
    let b = sign(TWENTY_WORDS, 100, 0);
    assert_eq!(a.values(), b.values());
}

#[test]
fn test_banding_is_deterministic() {
    let sig = sign(TWENTY_WORDS, 100, 0);
    assert_eq!(band(&sig, 20, 5), band(&sig.clone(), 20, 5));
}

#[test]
fn test_near_duplicate_pair_found_across_seeds() {
    // * Last word swapped: 17 of 19 distinct 3-word shingles shared, s ≈ 0.89
    let original = TWENTY_WORDS;
    let edited = TWENTY_WORDS.replace("harbour", "bay");
    assert!(candidate_probability(0.89, 20, 5) > 0.99);

    let trials = 20;
    let mut found = 0;
    for seed in 0..trials {
        let hashes = vec![
            band(&sign(original, 100, seed), 20, 5),
            band(&sign(&edited, 100, seed), 20, 5),
        ];
        if generate_candidates(&hashes, BandingPolicy::Exact).contains(&(0, 1)) {
            found += 1;
        }
    }
    assert!(found >= 18, "pair found in only {found} of {trials} trials");
}

#[test]
fn test_estimated_similarity_tracks_jaccard() {
    let edited = TWENTY_WORDS.replace("harbour", "bay");
    let a = sign(TWENTY_WORDS, 300, 7);
    let b = sign(&edited, 300, 7);
    let estimate = a.estimated_similarity(&b);
    assert!(estimate > 0.75 && estimate < 1.0, "estimate {estimate}");
}

#[test]
fn test_seeds_give_independent_families() {
    assert_ne!(sign(TWENTY_WORDS, 50, 1), sign(TWENTY_WORDS, 50, 2));
}

proptest! {
    #[test]
    fn prop_signature_length_matches_permutations(
        text in "[a-z]{1,6}( [a-z]{1,6}){2,20}",
        permutations in 1usize..64,
    ) {
        let sig = sign(&text, permutations, 0);
        prop_assert_eq!(sig.len(), permutations);
        prop_assert!(!sig.is_degenerate());
    }

    #[test]
    fn prop_signature_deterministic(text in "[a-zA-Z0-9 ,.!]{0,120}", seed in any::<u64>()) {
        prop_assert_eq!(sign(&text, 32, seed), sign(&text, 32, seed));
    }
}
