use std::fmt;

use itertools::Itertools;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{LshError, Result};
use crate::minhash::hash_family::HashFamily;
use crate::minhash::shingle_index::ShingleIndex;

/// One cell of a signature matrix.
///
/// A document without shingles has no minimum, its cells are `Undefined`.
/// Banding never buckets an undefined slice, so such documents never become
/// candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinValue {
    Defined(u64),
    Undefined,
}

impl MinValue {
    #[inline]
    pub fn value(self) -> Option<u64> {
        match self {
            MinValue::Defined(value) => Some(value),
            MinValue::Undefined => None,
        }
    }

    #[inline]
    pub fn is_defined(self) -> bool {
        matches!(self, MinValue::Defined(_))
    }

    #[inline]
    fn min_with(self, hash: u64) -> MinValue {
        match self {
            MinValue::Defined(current) if current <= hash => self,
            _ => MinValue::Defined(hash),
        }
    }
}

impl fmt::Display for MinValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinValue::Defined(value) => write!(f, "{}", value),
            MinValue::Undefined => f.write_str("-"),
        }
    }
}

/// Dense MinHash signatures, one row per hash function and one column per
/// document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureMatrix {
    rows: Vec<Vec<MinValue>>,
    num_documents: usize,
}

impl SignatureMatrix {
    /// Number of rows.
    pub fn num_hashes(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn num_documents(&self) -> usize {
        self.num_documents
    }

    pub fn rows(&self) -> &[Vec<MinValue>] {
        &self.rows
    }

    pub fn row(&self, hash_index: usize) -> Option<&[MinValue]> {
        self.rows.get(hash_index).map(|row| row.as_slice())
    }

    pub fn get(&self, hash_index: usize, document: usize) -> Option<MinValue> {
        self.rows.get(hash_index).and_then(|row| row.get(document)).copied()
    }

    /// Signature of one document, top to bottom.
    pub fn column(&self, document: usize) -> Vec<MinValue> {
        self.rows.iter().filter_map(|row| row.get(document).copied()).collect()
    }

    pub(crate) fn from_rows(rows: Vec<Vec<MinValue>>, num_documents: usize) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == num_documents));
        SignatureMatrix { rows, num_documents }
    }
}

impl fmt::Display for SignatureMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(&row.iter().join(","))?;
        }
        Ok(())
    }
}

/// MinHash of `shingle_sets` with `num_hashes` functions from [`HashFamily::generate`].
pub fn minhash<D, T>(shingle_sets: &[D], num_hashes: usize) -> Result<SignatureMatrix>
where
    D: AsRef<[T]>,
    T: AsRef<str>,
{
    minhash_with_family(shingle_sets, &HashFamily::generate(num_hashes))
}

/// MinHash of `shingle_sets` with a caller supplied hash family.
///
/// # Examples
///
/// ```
/// use minband::minhash::{minhash_with_family, HashFamily, HashFunction, MinValue};
///
/// let family = HashFamily::from_functions(vec![
///     HashFunction::Pattern { multiplier: 1, coefficient: 1 },
///     HashFunction::Pattern { multiplier: 3, coefficient: 1 },
/// ]);
/// let sets = [vec!["a", "d"], vec!["c"], vec!["b", "d", "e"], vec!["a", "c", "d"]];
/// let signatures = minhash_with_family(&sets, &family).unwrap();
/// assert_eq!(signatures.to_string(), "1,3,0,1\n0,2,0,0");
/// assert_eq!(signatures.get(0, 1), Some(MinValue::Defined(3)));
/// ```
pub fn minhash_with_family<D, T>(shingle_sets: &[D], family: &HashFamily) -> Result<SignatureMatrix>
where
    D: AsRef<[T]>,
    T: AsRef<str>,
{
    if shingle_sets.is_empty() {
        return Err(LshError::EmptyCorpus);
    }
    minhash_index(&ShingleIndex::from_documents(shingle_sets), family)
}

/// MinHash of every column of `index`.
///
/// Rows of the index are ordered lexicographically and the row position is
/// what each hash function sees. Each hash function fills its own signature
/// row, rows are computed in parallel.
pub fn minhash_index(index: &ShingleIndex, family: &HashFamily) -> Result<SignatureMatrix> {
    if index.is_empty() {
        return Err(LshError::EmptyCorpus);
    }
    if family.is_empty() {
        return Err(LshError::EmptyHashFamily);
    }
    let matrix = index.to_matrix();
    let num_rows = matrix.num_rows();
    let num_documents = matrix.num_documents();
    let present_columns = matrix.present_columns();

    let rows: Vec<Vec<MinValue>> = family
        .functions()
        .par_iter()
        .map(|function| {
            let mut minimums = vec![MinValue::Undefined; num_documents];
            for (row, columns) in present_columns.iter().enumerate() {
                if columns.is_empty() {
                    continue;
                }
                let hash = function.hash(row, num_rows);
                for &column in columns {
                    minimums[column] = minimums[column].min_with(hash);
                }
            }
            minimums
        })
        .collect();

    debug!(
        hashes = rows.len(),
        documents = num_documents,
        shingles = num_rows,
        "built signature matrix"
    );
    Ok(SignatureMatrix::from_rows(rows, num_documents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minhash::HashFunction;
    use crate::text::shingle;

    fn simple_shingles() -> Vec<Vec<&'static str>> {
        vec![vec!["a", "d"], vec!["c"], vec!["b", "d", "e"], vec!["a", "c", "d"]]
    }

    #[test]
    fn test_minhash_enforces_order() {
        // row | s1 | s2 | s3 | s4
        //  a  |  1 |  0 |  0 |  1
        //  b  |  0 |  0 |  1 |  0
        //  c  |  0 |  1 |  0 |  1
        //  d  |  1 |  0 |  1 |  1
        //  e  |  0 |  0 |  1 |  0
        let family = HashFamily::from_functions(vec![
            HashFunction::Pattern { multiplier: 1, coefficient: 1 },
            HashFunction::Pattern { multiplier: 3, coefficient: 1 },
        ]);
        let signatures = minhash_with_family(&simple_shingles(), &family).unwrap();

        //  h  | s1 | s2 | s3 | s4
        // h1  |  1 |  3 |  0 |  1
        // h2  |  0 |  2 |  0 |  0
        let defined = |values: &[u64]| values.iter().map(|&v| MinValue::Defined(v)).collect::<Vec<_>>();
        assert_eq!(signatures.num_hashes(), 2);
        assert_eq!(signatures.num_documents(), 4);
        assert_eq!(signatures.row(0).unwrap(), defined(&[1, 3, 0, 1]).as_slice());
        assert_eq!(signatures.row(1).unwrap(), defined(&[0, 2, 0, 0]).as_slice());
        assert_eq!(signatures.column(2), defined(&[0, 0]));
    }

    #[test]
    fn test_minhash_is_deterministic() {
        let sets = vec![
            shingle(&["A spokesperson for the Sudzo Corporation revealed today that studies have shown it is good for people to buy Sudzo products."]),
            shingle(&["The Sudzo Corporation has revealed today that buying Sudzo products is good for people."]),
        ];
        let family = HashFamily::generate(50);
        let first = minhash_with_family(&sets, &family).unwrap();
        let second = minhash_with_family(&sets, &family).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(minhash(&sets, 50).unwrap(), first);
    }

    #[test]
    fn test_empty_document_is_undefined() {
        let sets: Vec<Vec<&str>> = vec![vec!["a"], vec![], vec!["b"]];
        let signatures = minhash(&sets, 4).unwrap();
        assert!(signatures.column(1).iter().all(|cell| !cell.is_defined()));
        assert!(signatures.column(0).iter().all(|cell| cell.is_defined()));
        assert_eq!(signatures.row(0).unwrap()[1].to_string(), "-");
        assert_eq!(signatures.get(0, 1).and_then(MinValue::value), None);
    }

    #[test]
    fn test_minhash_errors() {
        let empty: Vec<Vec<&str>> = Vec::new();
        assert_eq!(minhash(&empty, 5), Err(LshError::EmptyCorpus));
        assert_eq!(minhash(&[vec!["a"]], 0), Err(LshError::EmptyHashFamily));
        assert_eq!(minhash_index(&ShingleIndex::new(), &HashFamily::generate(3)), Err(LshError::EmptyCorpus));
    }

    #[test]
    fn test_min_value() {
        assert_eq!(MinValue::Undefined.min_with(4), MinValue::Defined(4));
        assert_eq!(MinValue::Defined(2).min_with(4), MinValue::Defined(2));
        assert_eq!(MinValue::Defined(5).min_with(4), MinValue::Defined(4));
        assert_eq!(MinValue::Defined(7).value(), Some(7));
    }
}
