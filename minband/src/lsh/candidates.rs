use std::cmp::Ordering;

use ahash::AHashMap;

/// Receives the documents of a bucket collision.
///
/// Implementations decide what a call means: [`CandidatePairs`] registers
/// the unordered pair, [`Candidates`] registers `b` as adjacent to `a` only.
pub trait CandidateSink {
    fn put(&mut self, a: usize, b: usize);
}

/// Two documents that shared a bucket, `a < b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePair {
    pub a: usize,
    pub b: usize,
    /// Number of bands in which the pair collided.
    pub elections: usize,
    signature: String,
}

impl CandidatePair {
    fn new(a: usize, b: usize) -> Self {
        let (a, b) = if a > b { (b, a) } else { (a, b) };
        CandidatePair {
            a,
            b,
            elections: 1,
            signature: pair_signature(a, b),
        }
    }

    /// Canonical `"a_b"` key of the pair.
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

fn pair_signature(a: usize, b: usize) -> String {
    let (a, b) = if a > b { (b, a) } else { (a, b) };
    format!("{}_{}", a, b)
}

/// De-duplicated candidate pairs keyed by their canonical signature.
#[derive(Debug, Clone, Default)]
pub struct CandidatePairs {
    index: AHashMap<String, CandidatePair>,
}

impl CandidateSink for CandidatePairs {
    fn put(&mut self, a: usize, b: usize) {
        let candidate = CandidatePair::new(a, b);
        match self.index.get_mut(&candidate.signature) {
            Some(existing) => existing.elections += 1,
            None => {
                self.index.insert(candidate.signature.clone(), candidate);
            }
        }
    }
}

impl CandidatePairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks a pair up in either order.
    pub fn get(&self, a: usize, b: usize) -> Option<&CandidatePair> {
        self.index.get(&pair_signature(a, b))
    }

    pub fn get_by_signature(&self, signature: &str) -> Option<&CandidatePair> {
        self.index.get(signature)
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.get(a, b).is_some()
    }

    /// Signatures of all pairs, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.index.keys().map(|key| key.as_str()).collect();
        keys.sort_unstable();
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidatePair> {
        self.index.values()
    }

    /// All pairs, most elected first, then by document indices.
    pub fn sorted(&self) -> Vec<&CandidatePair> {
        let mut pairs: Vec<&CandidatePair> = self.index.values().collect();
        pairs.sort_unstable_by(|x, y| {
            y.elections
                .cmp(&x.elections)
                .then(x.a.cmp(&y.a))
                .then(x.b.cmp(&y.b))
        });
        pairs
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// A document adjacent to some key document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub index: usize,
    /// Number of times the two documents shared a bucket.
    pub elections: usize,
}

/// Orders candidates by election count, highest first, ties by index.
pub fn by_elections_desc(x: &Candidate, y: &Candidate) -> Ordering {
    y.elections.cmp(&x.elections).then(x.index.cmp(&y.index))
}

/// Adjacency of candidates keyed by document index.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    index: AHashMap<usize, AHashMap<usize, Candidate>>,
}

impl CandidateSink for Candidates {
    /// Registers `b` as a candidate of `a`. Call again with swapped arguments
    /// to make the relation symmetric.
    fn put(&mut self, a: usize, b: usize) {
        self.index
            .entry(a)
            .or_default()
            .entry(b)
            .and_modify(|candidate| candidate.elections += 1)
            .or_insert(Candidate { index: b, elections: 1 });
    }
}

impl Candidates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidates adjacent to `key`, in no particular order.
    pub fn get_by_key(&self, key: usize) -> Vec<Candidate> {
        match self.index.get(&key) {
            Some(adjacent) => adjacent.values().copied().collect(),
            None => Vec::new(),
        }
    }

    /// Candidates adjacent to `key`, see [`by_elections_desc`].
    pub fn get_by_key_sorted(&self, key: usize) -> Vec<Candidate> {
        let mut candidates = self.get_by_key(key);
        candidates.sort_unstable_by(by_elections_desc);
        candidates
    }

    pub fn get(&self, a: usize, b: usize) -> Option<&Candidate> {
        self.index.get(&a).and_then(|adjacent| adjacent.get(&b))
    }

    /// Documents with at least one candidate, sorted.
    pub fn keys(&self) -> Vec<usize> {
        let mut keys: Vec<usize> = self.index.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_pairs_are_unordered() {
        let mut pairs = CandidatePairs::new();
        pairs.put(2, 0);
        pairs.put(0, 2);
        pairs.put(3, 1);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.keys(), vec!["0_2", "1_3"]);

        let pair = pairs.get(0, 2).unwrap();
        assert_eq!((pair.a, pair.b, pair.elections), (0, 2, 2));
        assert_eq!(pair.signature(), "0_2");
        assert_eq!(pairs.get(2, 0), Some(pair));
        assert_eq!(pairs.get_by_signature("1_3").map(|p| p.elections), Some(1));
        assert!(!pairs.contains(0, 1));

        let sorted: Vec<&str> = pairs.sorted().iter().map(|p| p.signature()).collect();
        assert_eq!(sorted, vec!["0_2", "1_3"]);
    }

    #[test]
    fn test_candidates_are_directed() {
        let mut candidates = Candidates::new();
        candidates.put(0, 1);
        candidates.put(0, 2);
        candidates.put(0, 2);
        candidates.put(0, 3);
        candidates.put(0, 3);
        candidates.put(0, 3);

        assert_eq!(candidates.keys(), vec![0]);
        assert!(candidates.get_by_key(1).is_empty());
        assert_eq!(candidates.get_by_key(0).len(), 3);
        assert_eq!(
            candidates.get_by_key_sorted(0),
            vec![
                Candidate { index: 3, elections: 3 },
                Candidate { index: 2, elections: 2 },
                Candidate { index: 1, elections: 1 },
            ]
        );

        candidates.put(1, 0);
        assert_eq!(candidates.get(1, 0), Some(&Candidate { index: 0, elections: 1 }));
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_by_elections_desc_breaks_ties_by_index() {
        let mut candidates = vec![
            Candidate { index: 7, elections: 1 },
            Candidate { index: 2, elections: 1 },
            Candidate { index: 5, elections: 4 },
        ];
        candidates.sort_by(by_elections_desc);
        let order: Vec<usize> = candidates.iter().map(|c| c.index).collect();
        assert_eq!(order, vec![5, 2, 7]);
    }
}
