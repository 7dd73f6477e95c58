use thiserror::Error;

/// Errors returned by the shingling, MinHash and banding stages.
///
/// All of them are local and recoverable; nothing in this crate retries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LshError {
    /// MinHash or banding was asked to work on zero documents.
    #[error("empty corpus: at least one document is required")]
    EmptyCorpus,

    /// The band count does not fit the number of hash functions.
    #[error("invalid band configuration: {bands} band(s) over {num_hashes} hash function(s)")]
    InvalidBandConfig { bands: usize, num_hashes: usize },

    #[error("invalid shingle size: k must be >= 1 (got {k})")]
    InvalidShingleSize { k: usize },

    #[error("empty hash family: at least one hash function is required")]
    EmptyHashFamily,

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, LshError>;

/// Number of signature rows per band, failing when the bands can't be filled.
pub(crate) fn rows_per_band(bands: usize, num_hashes: usize) -> Result<usize> {
    if bands == 0 || bands > num_hashes {
        return Err(LshError::InvalidBandConfig { bands, num_hashes });
    }
    Ok(num_hashes / bands)
}
