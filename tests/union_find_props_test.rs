use lsh_dedup::engine::DisjointSet;
use proptest::prelude::*;

// * Property tests: union-find roots agree exactly with graph connectivity

fn components(n: usize, pairs: &[(usize, usize)]) -> Vec<usize> {
    // * Naive label propagation until stable
    let mut label: Vec<usize> = (0..n).collect();
    let mut changed = true;
    while changed {
        changed = false;
        for &(a, b) in pairs {
            let min = label[a].min(label[b]);
            if label[a] != min || label[b] != min {
                label[a] = min;
                label[b] = min;
                changed = true;
            }
        }
    }
    label
}

fn forest_and_pairs() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..40).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..60)))
}

proptest! {
    #[test]
    fn prop_roots_match_connectivity((n, pairs) in forest_and_pairs()) {
        let mut forest = DisjointSet::from_pairs(n, pairs.iter().copied());
        let labels = components(n, &pairs);

        for x in 0..n {
            for y in 0..n {
                prop_assert_eq!(forest.connected(x, y), labels[x] == labels[y]);
            }
        }
    }

    #[test]
    fn prop_find_is_stable((n, pairs) in forest_and_pairs()) {
        let mut forest = DisjointSet::from_pairs(n, pairs.iter().copied());
        for x in 0..n {
            let first = forest.find(x);
            prop_assert_eq!(forest.find(x), first);
            prop_assert_eq!(forest.find(first), first);
        }
    }

    #[test]
    fn prop_union_order_does_not_change_partition((n, pairs) in forest_and_pairs()) {
        let mut forward = DisjointSet::from_pairs(n, pairs.iter().copied());
        let mut backward = DisjointSet::from_pairs(n, pairs.iter().rev().map(|&(a, b)| (b, a)));
        prop_assert_eq!(forward.clusters(), backward.clusters());
    }
}
