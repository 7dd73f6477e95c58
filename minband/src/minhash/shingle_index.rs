use std::fmt;

use ahash::AHashMap;
use itertools::Itertools;
use tracing::debug;

/// Sparse mapping of shingle to per-document presence.
///
/// Every presence vector is exactly `num_documents` long. The only way to
/// grow the index is to append a whole document column, which extends every
/// vector by one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShingleIndex {
    rows: AHashMap<String, Vec<bool>>,
    num_documents: usize,
}

impl ShingleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index with one column per document, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use minband::minhash::ShingleIndex;
    ///
    /// let index = ShingleIndex::from_documents(&[vec!["a", "d"], vec!["c"], vec!["b", "d", "e"]]);
    /// assert_eq!(index.num_documents(), 3);
    /// assert_eq!(index.num_rows(), 5);
    /// assert!(index.contains("d", 2));
    /// assert!(!index.contains("d", 1));
    /// ```
    pub fn from_documents<D, T>(documents: &[D]) -> Self
    where
        D: AsRef<[T]>,
        T: AsRef<str>,
    {
        let num_documents = documents.len();
        let mut rows: AHashMap<String, Vec<bool>> = AHashMap::new();
        for (column, document) in documents.iter().enumerate() {
            for shingle in document.as_ref() {
                let shingle = shingle.as_ref();
                match rows.get_mut(shingle) {
                    Some(presence) => presence[column] = true,
                    None => {
                        let mut presence = vec![false; num_documents];
                        presence[column] = true;
                        rows.insert(shingle.to_string(), presence);
                    }
                }
            }
        }
        debug!(rows = rows.len(), documents = num_documents, "built shingle index");
        ShingleIndex { rows, num_documents }
    }

    /// Appends a document as a new last column and returns its column index.
    pub fn push_document<T: AsRef<str>>(&mut self, shingles: &[T]) -> usize {
        let column = self.num_documents;
        self.num_documents += 1;
        for presence in self.rows.values_mut() {
            presence.push(false);
        }
        for shingle in shingles {
            let shingle = shingle.as_ref();
            match self.rows.get_mut(shingle) {
                Some(presence) => presence[column] = true,
                None => {
                    let mut presence = vec![false; self.num_documents];
                    presence[column] = true;
                    self.rows.insert(shingle.to_string(), presence);
                }
            }
        }
        column
    }

    /// Copy of this index with `shingles` appended as a new last column.
    pub fn extended_with<T: AsRef<str>>(&self, shingles: &[T]) -> ShingleIndex {
        let mut extended = self.clone();
        extended.push_document(shingles);
        extended
    }

    pub fn num_documents(&self) -> usize {
        self.num_documents
    }

    /// Number of distinct shingles.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_documents == 0
    }

    pub fn contains(&self, shingle: &str, document: usize) -> bool {
        self.rows
            .get(shingle)
            .and_then(|presence| presence.get(document).copied())
            .unwrap_or(false)
    }

    pub fn presence(&self, shingle: &str) -> Option<&[bool]> {
        self.rows.get(shingle).map(|presence| presence.as_slice())
    }

    /// Dense presence matrix with rows in lexicographic shingle order.
    ///
    /// The row position is the value fed to the MinHash functions, so the
    /// order must not depend on hashing.
    pub fn to_matrix(&self) -> ShingleMatrix {
        let (shingles, rows) = self
            .rows
            .iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(shingle, presence)| (shingle.clone(), presence.clone()))
            .unzip();
        ShingleMatrix {
            shingles,
            rows,
            num_documents: self.num_documents,
        }
    }
}

/// Dense, sorted form of a [`ShingleIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShingleMatrix {
    shingles: Vec<String>,
    rows: Vec<Vec<bool>>,
    num_documents: usize,
}

impl ShingleMatrix {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_documents(&self) -> usize {
        self.num_documents
    }

    pub fn shingles(&self) -> &[String] {
        &self.shingles
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[bool]> {
        self.rows.get(index).map(|row| row.as_slice())
    }

    /// Columns holding each row's shingle.
    pub(crate) fn present_columns(&self) -> Vec<Vec<usize>> {
        self.rows
            .iter()
            .map(|row| row.iter().positions(|&present| present).collect())
            .collect()
    }
}

impl fmt::Display for ShingleMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line = row.iter().map(|&present| if present { "1" } else { "0" }).join(",");
            f.write_str(&line)?;
        }
        Ok(())
    }
}
