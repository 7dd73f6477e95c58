use serde::{Deserialize, Serialize};

use crate::error::{rows_per_band, LshError, Result};
use crate::minhash::DEFAULT_SEED;
use crate::text::ShingleMode;

/// Parameters of a [`SearchIndex`](crate::search::SearchIndex).
///
/// Missing fields take their default when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of hash functions, i.e. signature rows.
    pub num_hashes: usize,
    /// Number of LSH bands. Must not exceed `num_hashes`.
    pub num_bands: usize,
    /// Seed of the generator drawing hash function signs.
    ///
    /// Two indexes built with the same seed and the same documents answer
    /// every query identically.
    pub seed: u64,
    /// How documents and queries are shingled.
    pub shingling: ShingleMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            num_hashes: 100,
            num_bands: 20,
            seed: DEFAULT_SEED,
            shingling: ShingleMode::StopWords,
        }
    }
}

impl SearchConfig {
    pub fn with_num_hashes(mut self, num_hashes: usize) -> Self {
        self.num_hashes = num_hashes;
        self
    }

    pub fn with_num_bands(mut self, num_bands: usize) -> Self {
        self.num_bands = num_bands;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_shingling(mut self, shingling: ShingleMode) -> Self {
        self.shingling = shingling;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_hashes == 0 {
            return Err(LshError::InvalidConfig(
                "num_hashes must be >= 1 (got 0)".to_string(),
            ));
        }
        rows_per_band(self.num_bands, self.num_hashes)?;
        self.shingling.validate()
    }
}
