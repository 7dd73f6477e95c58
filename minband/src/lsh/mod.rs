//! Banded locality sensitive hashing over MinHash signatures.
//!
//! [`lsh`] buckets every band of a [`SignatureMatrix`](crate::minhash::SignatureMatrix);
//! documents sharing a bucket in at least one band become candidates.

mod band_buckets;
mod candidates;

pub use self::band_buckets::{lsh, BandBuckets, BucketAddress};
pub use self::candidates::{
    by_elections_desc, Candidate, CandidatePair, CandidatePairs, CandidateSink, Candidates,
};

/// Unordered candidate pairs of `buckets`.
pub fn find_candidate_pairs(buckets: &BandBuckets) -> CandidatePairs {
    buckets.find_candidate_pairs()
}

/// Symmetric candidate adjacency of `buckets`.
pub fn find_candidate_adjacency(buckets: &BandBuckets) -> Candidates {
    buckets.find_candidates()
}
