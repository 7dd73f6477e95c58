mod hash_family;
mod shingle_index;
mod signature;

pub use self::hash_family::{suggest_hash_count, HashFamily, HashFunction, DEFAULT_SEED};
pub use self::shingle_index::{ShingleIndex, ShingleMatrix};
pub use self::signature::{minhash, minhash_index, minhash_with_family, MinValue, SignatureMatrix};

use std::hash::Hash;
use std::iter::FromIterator;

use ahash::AHashSet;

/// Exact Jaccard similarity of two shingle sequences.
///
/// Duplicates are ignored. Two empty sequences are identical, so their
/// similarity is `1.0`.
///
/// # Examples
///
/// ```
/// use minband::minhash::jaccard;
///
/// assert_eq!(jaccard(&["a", "b"], &["a", "b"]), 1.0);
/// assert_eq!(jaccard(&["a", "b"], &["a"]), 0.5);
/// assert_eq!(jaccard::<&str>(&[], &[]), 1.0);
/// ```
pub fn jaccard<T: Hash + Eq>(a: &[T], b: &[T]) -> f64 {
    compute_jaccard_similarity(a.iter(), b.iter())
}

pub fn compute_jaccard_similarity<T, U>(iter_1: T, iter_2: T) -> f64
where
    T: Iterator<Item = U>,
    U: Hash + Eq,
{
    let h1 = AHashSet::<U>::from_iter(iter_1);
    let h2 = AHashSet::<U>::from_iter(iter_2);
    let intersection_len = h1.intersection(&h2).count();
    let union_len = h1.len() + h2.len() - intersection_len;
    if union_len == 0 {
        return 1.0;
    }
    intersection_len as f64 / union_len as f64
}

pub fn compute_jaccard_distance<T, U>(iter_1: T, iter_2: T) -> f64
where
    T: Iterator<Item = U>,
    U: Hash + Eq,
{
    1.0 - compute_jaccard_similarity(iter_1, iter_2)
}

/// Fraction of positions where two signature columns hold the same defined
/// minimum. This estimates the Jaccard similarity of the underlying sets.
///
/// # Examples
///
/// ```
/// use minband::minhash::{compute_minhash_similarity, MinValue};
///
/// let m1 = [1, 2, 3, 4, 5, 6].map(MinValue::Defined);
/// let m2 = [1, 2, 3, 7, 5, 8].map(MinValue::Defined);
/// assert!((compute_minhash_similarity(&m1, &m2) - 0.666) < 0.01);
/// ```
pub fn compute_minhash_similarity(min_hashes_1: &[MinValue], min_hashes_2: &[MinValue]) -> f64 {
    let num_hashes = min_hashes_1.len().max(min_hashes_2.len());
    if num_hashes == 0 {
        return 0.0;
    }
    let matches = min_hashes_1
        .iter()
        .zip(min_hashes_2.iter())
        .filter(|(a, b)| a.is_defined() && a == b)
        .count();
    matches as f64 / num_hashes as f64
}
