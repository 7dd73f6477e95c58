//! Property-based tests for the MinHash LSH pipeline.
//!
//! These tests verify invariants that should hold regardless of input:
//! - Jaccard similarity is symmetric, reflexive and bounded
//! - Generated hash families never hold duplicate functions
//! - Signatures are deterministic once the hash family is fixed
//! - Identical documents collide in every band

use ahash::AHashSet;
use proptest::prelude::*;

use minband::lsh::lsh;
use minband::minhash::{
    compute_minhash_similarity, jaccard, minhash_with_family, HashFamily,
};

prop_compose! {
    fn arb_shingles(max_len: usize)(set in prop::collection::vec("[a-e]{1,3}", 0..max_len)) -> Vec<String> {
        set
    }
}

prop_compose! {
    fn arb_non_empty_shingles(max_len: usize)(set in prop::collection::vec("[a-z]{2,6}", 1..max_len)) -> Vec<String> {
        set
    }
}

mod jaccard_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn jaccard_is_symmetric(a in arb_shingles(12), b in arb_shingles(12)) {
            prop_assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
        }

        #[test]
        fn jaccard_is_bounded(a in arb_shingles(12), b in arb_shingles(12)) {
            let similarity = jaccard(&a, &b);
            prop_assert!((0.0..=1.0).contains(&similarity), "out of range: {}", similarity);
        }

        #[test]
        fn jaccard_is_reflexive(a in arb_non_empty_shingles(12)) {
            prop_assert_eq!(jaccard(&a, &a), 1.0);
        }
    }
}

mod hash_family_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn generated_functions_are_unique(amount in 1usize..=200, seed in any::<u64>()) {
            let family = HashFamily::generate_with_seed(amount, seed);
            prop_assert_eq!(family.len(), amount);
            let canonical: AHashSet<String> = family.iter().map(|f| f.to_string()).collect();
            prop_assert_eq!(canonical.len(), amount);
        }

        #[test]
        fn hashes_stay_below_row_count(amount in 1usize..=60, num_rows in 1usize..500) {
            let family = HashFamily::generate(amount);
            for function in family.iter() {
                for x in [0, 1, num_rows / 2, num_rows - 1] {
                    prop_assert!(function.hash(x, num_rows) < num_rows as u64);
                }
            }
        }
    }
}

mod signature_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn minhash_is_deterministic(
            sets in prop::collection::vec(arb_shingles(10), 1..6),
            amount in 1usize..40,
        ) {
            let family = HashFamily::generate(amount);
            let first = minhash_with_family(&sets, &family).unwrap();
            let second = minhash_with_family(&sets, &family).unwrap();
            prop_assert_eq!(first.to_string(), second.to_string());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn minhash_similarity_is_bounded(
            a in arb_shingles(10),
            b in arb_shingles(10),
        ) {
            let signatures = minhash_with_family(&[a, b], &HashFamily::generate(30)).unwrap();
            let similarity = compute_minhash_similarity(&signatures.column(0), &signatures.column(1));
            prop_assert!((0.0..=1.0).contains(&similarity));
        }

        #[test]
        fn identical_documents_collide_in_every_band(
            document in arb_non_empty_shingles(15),
            other in arb_shingles(15),
            bands in 1usize..=20,
        ) {
            let sets = vec![document.clone(), other, document];
            let signatures = minhash_with_family(&sets, &HashFamily::generate(20)).unwrap();
            let pairs = lsh(&signatures, bands).unwrap().find_candidate_pairs();
            let pair = pairs.get(0, 2);
            prop_assert!(pair.is_some());
            prop_assert_eq!(pair.map(|pair| pair.elections), Some(bands));
        }
    }
}
