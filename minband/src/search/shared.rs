//! A [`SearchIndex`] shared between threads.
//!
//! Queries take a shared read lock and run concurrently. Inserts take the
//! exclusive write lock, so there is a single writer at a time and a query
//! never sees a half inserted document.
//!
//! Queries fan out over the rayon pool while holding the read lock, and a
//! rayon worker may pick up another query in the meantime. Queries therefore
//! lock with `read_recursive`, which does not wait behind a queued writer.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::error::Result;
use crate::lsh::{Candidate, Candidates};
use crate::search::{SearchConfig, SearchIndex};

/// Cloning shares the same underlying index.
#[derive(Debug, Clone, Default)]
pub struct SharedSearchIndex {
    inner: Arc<RwLock<SearchIndex>>,
}

impl SharedSearchIndex {
    pub fn new(config: SearchConfig) -> Result<Self> {
        Ok(Self::from_index(SearchIndex::new(config)?))
    }

    pub fn from_index(index: SearchIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// Acquires an exclusive write lock.
    pub fn insert(&self, text: &str) -> Result<usize> {
        self.inner.write().insert(text)
    }

    /// Acquires an exclusive write lock.
    pub fn insert_shingles<T: AsRef<str>>(&self, shingles: &[T]) -> usize {
        self.inner.write().insert_shingles(shingles)
    }

    /// Acquires a shared read lock.
    pub fn find(&self, query: &str) -> Result<Vec<Candidate>> {
        self.inner.read_recursive().find(query)
    }

    /// Acquires a shared read lock.
    pub fn find_all(&self, query: &str) -> Result<Candidates> {
        self.inner.read_recursive().find_all(query)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Holds the read lock until the guard is dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, SearchIndex> {
        self.inner.read()
    }
}
