use std::ops::Range;

use itertools::Itertools;
use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::error::{rows_per_band, LshError, Result};
use crate::lsh::candidates::{CandidatePairs, CandidateSink, Candidates};
use crate::minhash::{MinValue, SignatureMatrix};

const MAX_INT32: i64 = 0x7fff_ffff;

/// A document placed in a bucket of some band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketAddress {
    pub band: usize,
    pub document: usize,
}

/// Bucket tables for every band of a signature matrix.
///
/// Each band has as many buckets as the signature matrix has rows. A bucket
/// lists documents in ascending order.
#[derive(Debug, Clone)]
pub struct BandBuckets {
    bands: Vec<Vec<Vec<BucketAddress>>>,
    rows_per_band: usize,
    num_buckets: usize,
}

impl BandBuckets {
    pub fn num_bands(&self) -> usize {
        self.bands.len()
    }

    pub fn rows_per_band(&self) -> usize {
        self.rows_per_band
    }

    /// Buckets per band.
    pub fn num_buckets(&self) -> usize {
        self.num_buckets
    }

    pub fn bucket(&self, band: usize, bucket: usize) -> &[BucketAddress] {
        self.bands
            .get(band)
            .and_then(|buckets| buckets.get(bucket))
            .map(|bucket| bucket.as_slice())
            .unwrap_or(&[])
    }

    /// Buckets of one band, empty ones included.
    pub fn band(&self, band: usize) -> &[Vec<BucketAddress>] {
        self.bands.get(band).map(|buckets| buckets.as_slice()).unwrap_or(&[])
    }

    /// Bucket holding `document` in `band`, if the document was bucketed.
    pub fn bucket_of(&self, band: usize, document: usize) -> Option<usize> {
        self.band(band)
            .iter()
            .position(|bucket| bucket.iter().any(|address| address.document == document))
    }

    /// Feeds every co-occurrence `(a, b)`, `a < b`, to `sink`, once per
    /// bucket the two documents share.
    pub fn collect_into<S: CandidateSink>(&self, sink: &mut S) {
        self.for_each_collision(|a, b| sink.put(a, b));
    }

    /// Unordered candidate pairs, elections count the bands that collided.
    pub fn find_candidate_pairs(&self) -> CandidatePairs {
        let mut pairs = CandidatePairs::new();
        self.collect_into(&mut pairs);
        debug!(pairs = pairs.len(), "found candidate pairs");
        pairs
    }

    /// Symmetric candidate adjacency.
    pub fn find_candidates(&self) -> Candidates {
        let mut candidates = Candidates::new();
        self.for_each_collision(|a, b| {
            candidates.put(a, b);
            candidates.put(b, a);
        });
        debug!(documents = candidates.len(), "found candidates");
        candidates
    }

    fn for_each_collision<F: FnMut(usize, usize)>(&self, mut f: F) {
        for buckets in &self.bands {
            for bucket in buckets.iter().filter(|bucket| bucket.len() > 1) {
                for (a, b) in bucket.iter().tuple_combinations::<(_, _)>() {
                    f(a.document, b.document);
                }
            }
        }
    }
}

/// Splits `signatures` into `bands` bands and hashes every document slice
/// into a bucket of its band.
///
/// Each band covers `num_hashes / bands` consecutive rows; rows left over
/// at the bottom are ignored. Slices with an undefined cell are not
/// bucketed. Bands are hashed in parallel.
///
/// # Examples
///
/// ```
/// use minband::lsh::lsh;
/// use minband::minhash::minhash;
///
/// let documents = vec![vec!["red", "green"], vec!["blue"], vec!["red", "green"]];
/// let signatures = minhash(&documents, 6).unwrap();
/// let buckets = lsh(&signatures, 3).unwrap();
/// let pairs = buckets.find_candidate_pairs();
/// assert_eq!(pairs.get(0, 2).map(|pair| pair.elections), Some(3));
/// ```
pub fn lsh(signatures: &SignatureMatrix, bands: usize) -> Result<BandBuckets> {
    let num_documents = signatures.num_documents();
    if num_documents == 0 {
        return Err(LshError::EmptyCorpus);
    }
    let num_hashes = signatures.num_hashes();
    let rows_per_band = rows_per_band(bands, num_hashes)?;
    let covered = bands * rows_per_band;
    if covered < num_hashes {
        warn!(
            bands,
            rows_per_band,
            dropped = num_hashes - covered,
            "trailing signature rows are not covered by any band"
        );
    }
    let num_buckets = num_hashes;

    let tables: Vec<Vec<Vec<BucketAddress>>> = (0..bands)
        .into_par_iter()
        .map(|band| {
            let rows = &signatures.rows()[band_range(band, rows_per_band)];
            let mut buckets = vec![Vec::new(); num_buckets];
            for document in 0..num_documents {
                let slice = rows.iter().map(|row| row[document]);
                if let Some(bucket) = hash_to_bucket(slice, num_buckets) {
                    buckets[bucket].push(BucketAddress { band, document });
                }
            }
            trace!(
                band,
                occupied = buckets.iter().filter(|bucket| !bucket.is_empty()).count(),
                "hashed band"
            );
            buckets
        })
        .collect();

    debug!(bands, rows_per_band, documents = num_documents, "built band buckets");
    Ok(BandBuckets {
        bands: tables,
        rows_per_band,
        num_buckets,
    })
}

#[inline]
fn band_range(band: usize, rows_per_band: usize) -> Range<usize> {
    band * rows_per_band..(band + 1) * rows_per_band
}

/// Polynomial fold of a band slice, `None` when any cell is undefined.
fn hash_to_bucket<I>(slice: I, num_buckets: usize) -> Option<usize>
where
    I: IntoIterator<Item = MinValue>,
{
    let mut h: i64 = 0;
    for cell in slice {
        let value = cell.value()?;
        h = h.wrapping_mul(31).wrapping_add(value as i64 & MAX_INT32);
    }
    Some((h % num_buckets as i64).unsigned_abs() as usize)
}
