use tracing::debug;

use crate::error::{rows_per_band, LshError, Result};
use crate::lsh::{lsh, Candidate, Candidates};
use crate::minhash::{minhash_index, HashFamily, ShingleIndex};
use crate::search::SearchConfig;
use crate::text::ShingleMode;

/// Incremental near-duplicate search over an accumulated corpus.
///
/// A query is appended as one extra document to a copy of the corpus, the
/// copy is signed and banded, and the documents sharing a bucket with the
/// query are returned. Queries take `&self` and never touch the stored
/// corpus; only [`insert`](SearchIndex::insert) changes it.
///
/// # Examples
///
/// ```
/// use minband::search::SearchIndex;
///
/// let mut index = SearchIndex::default();
/// index.insert("The Sudzo Corporation has revealed today that buying Sudzo products is good for people.").unwrap();
/// index.insert("There was a boy whos name was Jim. And all the friends were very good to him.").unwrap();
///
/// let found = index.find("The Sudzo Corporation has revealed today that buying Sudzo products is good for people.").unwrap();
/// assert_eq!(found[0].index, 0);
/// assert_eq!(found[0].elections, 20);
/// ```
#[derive(Debug, Clone)]
pub struct SearchIndex {
    family: HashFamily,
    num_bands: usize,
    shingling: ShingleMode,
    index: ShingleIndex,
}

impl Default for SearchIndex {
    /// 100 hash functions from the default seed in 20 bands, stop-word
    /// shingling and an empty corpus.
    fn default() -> Self {
        let config = SearchConfig::default();
        SearchIndex {
            family: HashFamily::generate_with_seed(config.num_hashes, config.seed),
            num_bands: config.num_bands,
            shingling: config.shingling,
            index: ShingleIndex::new(),
        }
    }
}

impl SearchIndex {
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let family = HashFamily::generate_with_seed(config.num_hashes, config.seed);
        let mut index = Self::with_hash_family(family, config.num_bands)?;
        index.shingling = config.shingling;
        Ok(index)
    }

    /// Uses a caller supplied hash family.
    pub fn with_hash_family(family: HashFamily, num_bands: usize) -> Result<Self> {
        if family.is_empty() {
            return Err(LshError::EmptyHashFamily);
        }
        rows_per_band(num_bands, family.len())?;
        Ok(SearchIndex {
            family,
            num_bands,
            shingling: ShingleMode::default(),
            index: ShingleIndex::new(),
        })
    }

    /// Replaces the corpus.
    pub fn with_index(mut self, index: ShingleIndex) -> Self {
        self.index = index;
        self
    }

    pub fn with_shingling(mut self, shingling: ShingleMode) -> Result<Self> {
        shingling.validate()?;
        self.shingling = shingling;
        Ok(self)
    }

    /// Shingles `text` and adds it to the corpus, returning its document index.
    pub fn insert(&mut self, text: &str) -> Result<usize> {
        let shingles = self.shingling.shingle(&[text])?;
        Ok(self.insert_shingles(&shingles))
    }

    pub fn insert_shingles<T: AsRef<str>>(&mut self, shingles: &[T]) -> usize {
        self.index.push_document(shingles)
    }

    /// Documents similar to `query`, most elected first.
    pub fn find(&self, query: &str) -> Result<Vec<Candidate>> {
        let shingles = self.shingling.shingle(&[query])?;
        self.find_shingles(&shingles)
    }

    pub fn find_shingles<T: AsRef<str>>(&self, shingles: &[T]) -> Result<Vec<Candidate>> {
        let candidates = self.search(shingles)?;
        Ok(candidates.get_by_key_sorted(self.query_column()))
    }

    /// Adjacency of every document in the corpus extended by `query`. The
    /// query is document [`len`](SearchIndex::len).
    pub fn find_all(&self, query: &str) -> Result<Candidates> {
        let shingles = self.shingling.shingle(&[query])?;
        self.search(&shingles)
    }

    fn search<T: AsRef<str>>(&self, shingles: &[T]) -> Result<Candidates> {
        let combined = self.index.extended_with(shingles);
        let signatures = minhash_index(&combined, &self.family)?;
        let candidates = lsh(&signatures, self.num_bands)?.find_candidates();
        debug!(
            query_shingles = shingles.len(),
            corpus = self.index.num_documents(),
            candidates = candidates.get_by_key(self.query_column()).len(),
            "searched index"
        );
        Ok(candidates)
    }

    #[inline]
    fn query_column(&self) -> usize {
        self.index.num_documents()
    }

    /// Number of documents in the corpus.
    pub fn len(&self) -> usize {
        self.index.num_documents()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &ShingleIndex {
        &self.index
    }

    pub fn hash_family(&self) -> &HashFamily {
        &self.family
    }

    pub fn num_bands(&self) -> usize {
        self.num_bands
    }

    pub fn shingling(&self) -> ShingleMode {
        self.shingling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minhash::HashFunction;
    use crate::text::shingle;

    const SUDZO_A: &str = "A spokesperson for the Sudzo Corporation revealed today that studies have shown it is good for people to buy Sudzo products.";
    const SUDZO_B: &str = "The Sudzo Corporation has revealed today that buying Sudzo products is good for people.";
    const JIM: &str = "There was a boy whos name was Jim. And all the friends were very good to him.";

    fn corpus() -> SearchIndex {
        let mut index = SearchIndex::default();
        for text in [SUDZO_A, JIM, SUDZO_B] {
            index.insert(text).unwrap();
        }
        index
    }

    #[test]
    fn test_find_identical_document() {
        let index = corpus();
        let found = index.find(SUDZO_A).unwrap();
        assert_eq!(found[0], Candidate { index: 0, elections: 20 });
        assert!(found.iter().all(|candidate| candidate.index < 3));
        for pair in found.windows(2) {
            assert!(pair[0].elections >= pair[1].elections);
        }
    }

    #[test]
    fn test_find_does_not_mutate_corpus() {
        let index = corpus();
        let before = index.index().clone();
        index.find(SUDZO_B).unwrap();
        index.find_all(JIM).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.index(), &before);
    }

    #[test]
    fn test_find_all_includes_query_column() {
        let index = corpus();
        let candidates = index.find_all(SUDZO_A).unwrap();
        assert_eq!(candidates.get(3, 0).map(|c| c.elections), Some(20));
        assert_eq!(candidates.get(0, 3).map(|c| c.elections), Some(20));
    }

    #[test]
    fn test_empty_corpus_and_empty_query() {
        let index = SearchIndex::default();
        assert!(index.is_empty());
        assert!(index.find(SUDZO_A).unwrap().is_empty());

        let index = corpus();
        assert!(index.find("").unwrap().is_empty());
    }

    #[test]
    fn test_insert_returns_document_index() {
        let mut index = SearchIndex::default();
        assert_eq!(index.insert(SUDZO_A).unwrap(), 0);
        assert_eq!(index.insert_shingles(&shingle(&[JIM])), 1);
        assert_eq!(index.len(), 2);
        assert!(index.index().contains("the Sudzo Corporation", 0));
    }

    #[test]
    fn test_new_from_config() {
        let config = SearchConfig::default()
            .with_num_hashes(40)
            .with_num_bands(8)
            .with_shingling(ShingleMode::Chars { k: 9 });
        let mut index = SearchIndex::new(config).unwrap();
        assert_eq!(index.hash_family().len(), 40);
        assert_eq!(index.num_bands(), 8);
        assert_eq!(index.shingling(), ShingleMode::Chars { k: 9 });

        index.insert(SUDZO_A).unwrap();
        index.insert(JIM).unwrap();
        let found = index.find(SUDZO_A).unwrap();
        assert_eq!(found[0], Candidate { index: 0, elections: 8 });

        assert_eq!(
            SearchIndex::new(SearchConfig::default().with_num_bands(101)).unwrap_err(),
            LshError::InvalidBandConfig { bands: 101, num_hashes: 100 }
        );
    }

    #[test]
    fn test_with_hash_family() {
        let family = HashFamily::from_functions(vec![
            HashFunction::Modulus,
            HashFunction::Pattern { multiplier: 3, coefficient: 1 },
        ]);
        let index = SearchIndex::with_hash_family(family.clone(), 2).unwrap();
        assert_eq!(index.hash_family(), &family);

        assert_eq!(
            SearchIndex::with_hash_family(family, 3).unwrap_err(),
            LshError::InvalidBandConfig { bands: 3, num_hashes: 2 }
        );
        assert_eq!(
            SearchIndex::with_hash_family(HashFamily::from_functions(Vec::new()), 1).unwrap_err(),
            LshError::EmptyHashFamily
        );
    }

    #[test]
    fn test_with_index() {
        let documents = vec![shingle(&[SUDZO_A]), shingle(&[SUDZO_B])];
        let index = SearchIndex::default().with_index(ShingleIndex::from_documents(&documents));
        assert_eq!(index.len(), 2);
        let found = index.find(SUDZO_B).unwrap();
        assert_eq!(found[0], Candidate { index: 1, elections: 20 });
    }

    #[test]
    fn test_with_shingling_validates() {
        assert_eq!(
            SearchIndex::default()
                .with_shingling(ShingleMode::Chars { k: 0 })
                .unwrap_err(),
            LshError::InvalidShingleSize { k: 0 }
        );
    }
}
