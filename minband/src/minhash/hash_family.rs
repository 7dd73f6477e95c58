use std::fmt;
use std::slice::Iter;

use ahash::AHashSet;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use tracing::warn;

/// Seed of the generator used by [`HashFamily::generate`].
pub const DEFAULT_SEED: u64 = 3;

const MAX_INT32: i64 = i32::MAX as i64;
const BIT_SHIFT: u32 = 28;
const NUM_PATTERNS: usize = 3;

/// Upper bounds of average shingle-set size and the hash count suggested for them.
const SUGGESTED_HASH_COUNTS: [(usize, usize); 10] = [
    (100, 5),
    (150, 10),
    (300, 20),
    (400, 30),
    (550, 40),
    (700, 50),
    (800, 60),
    (900, 70),
    (1000, 80),
    (1200, 90),
];
const MAX_SUGGESTED_HASH_COUNT: usize = 100;

/// A MinHash projection `(row, num_rows) -> value in [0, num_rows)`.
///
/// The `Display` form is canonical: two functions with the same string
/// compute the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashFunction {
    /// `x mod m`
    Modulus,
    /// `(multiplier * x + coefficient) mod m`
    Pattern { multiplier: i64, coefficient: i64 },
    /// `|(multiplier * x + (x & i32::MAX)) mod m|`
    MaxInt { multiplier: i64 },
    /// `(((x * multiplier) >> 28) & ander) mod m`
    BitShift { multiplier: i64, ander: i64 },
}

impl HashFunction {
    #[inline]
    pub fn hash(&self, x: usize, num_rows: usize) -> u64 {
        if num_rows == 0 {
            return 0;
        }
        let x = x as i64;
        let m = num_rows as i64;
        let h = match *self {
            HashFunction::Modulus => x % m,
            HashFunction::Pattern { multiplier, coefficient } => multiplier
                .wrapping_mul(x)
                .wrapping_add(coefficient)
                .rem_euclid(m),
            HashFunction::MaxInt { multiplier } => {
                (multiplier.wrapping_mul(x).wrapping_add(x & MAX_INT32) % m).abs()
            }
            HashFunction::BitShift { multiplier, ander } => {
                ((x.wrapping_mul(multiplier) >> BIT_SHIFT) & ander) % m
            }
        };
        h as u64
    }
}

impl fmt::Display for HashFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashFunction::Modulus => write!(f, "x mod m"),
            HashFunction::Pattern { multiplier, coefficient } => {
                write!(f, "({} * x + {}) mod m", multiplier, coefficient)
            }
            HashFunction::MaxInt { multiplier } => {
                write!(f, "({} * x + x & {}) mod m", multiplier, MAX_INT32)
            }
            HashFunction::BitShift { multiplier, ander } => {
                write!(f, "(((x * {}) >> {}) & {}) mod m", multiplier, BIT_SHIFT, ander)
            }
        }
    }
}

/// Ordered list of hash functions used as MinHash rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashFamily {
    functions: Vec<HashFunction>,
}

impl HashFamily {
    /// Generates `amount` functions with a generator seeded by [`DEFAULT_SEED`].
    pub fn generate(amount: usize) -> Self {
        Self::generate_with_rng(amount, &mut Pcg64::seed_from_u64(DEFAULT_SEED))
    }

    pub fn generate_with_seed(amount: usize, seed: u64) -> Self {
        Self::generate_with_rng(amount, &mut Pcg64::seed_from_u64(seed))
    }

    /// Generates `amount` functions. The first one is [`HashFunction::Modulus`],
    /// the rest cycle through `Pattern`, `MaxInt` and `BitShift` with parameters
    /// derived from their position. `rng` only draws the sign of `Pattern`
    /// coefficients.
    ///
    /// A function whose canonical string was already generated is skipped, so
    /// the family may hold fewer than `amount` functions.
    pub fn generate_with_rng<R: Rng + ?Sized>(amount: usize, rng: &mut R) -> Self {
        let mut functions = Vec::with_capacity(amount);
        let mut seen = AHashSet::with_capacity(amount);
        for position in 0..amount {
            let function = if position == 0 {
                HashFunction::Modulus
            } else {
                next_function(position, rng)
            };
            if seen.insert(function.to_string()) {
                functions.push(function);
            } else {
                warn!(position, %function, "skipping duplicate hash function");
            }
        }
        HashFamily { functions }
    }

    /// Generates as many functions as [`suggest_hash_count`] recommends for the
    /// average size of `shingle_sets`.
    pub fn suggested_for<S: AsRef<[String]>>(shingle_sets: &[S]) -> Self {
        Self::suggested_for_with_rng(shingle_sets, &mut Pcg64::seed_from_u64(DEFAULT_SEED))
    }

    pub fn suggested_for_with_rng<S, R>(shingle_sets: &[S], rng: &mut R) -> Self
    where
        S: AsRef<[String]>,
        R: Rng + ?Sized,
    {
        let total: usize = shingle_sets.iter().map(|set| set.as_ref().len()).sum();
        let average = total.checked_div(shingle_sets.len()).unwrap_or(0);
        Self::generate_with_rng(suggest_hash_count(average), rng)
    }

    pub fn from_functions(functions: Vec<HashFunction>) -> Self {
        HashFamily { functions }
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HashFunction> {
        self.functions.get(index)
    }

    pub fn iter(&self) -> Iter<'_, HashFunction> {
        self.functions.iter()
    }

    pub fn functions(&self) -> &[HashFunction] {
        &self.functions
    }
}

impl<'a> IntoIterator for &'a HashFamily {
    type Item = &'a HashFunction;
    type IntoIter = Iter<'a, HashFunction>;

    fn into_iter(self) -> Self::IntoIter {
        self.functions.iter()
    }
}

fn next_function<R: Rng + ?Sized>(position: usize, rng: &mut R) -> HashFunction {
    // position 1 starts the first round, 2 and 3 follow with k == 1
    let k = (position - 1) / NUM_PATTERNS * NUM_PATTERNS + 1;
    match (position - 1) % NUM_PATTERNS {
        0 if position == 1 => HashFunction::Pattern { multiplier: 1, coefficient: 0 },
        0 => {
            let magnitude = (position / 2) as i64;
            let coefficient = if rng.gen::<bool>() { magnitude } else { -magnitude };
            HashFunction::Pattern { multiplier: to_odd(position), coefficient }
        }
        1 => HashFunction::MaxInt { multiplier: multiplier_for(k) },
        _ => HashFunction::BitShift { multiplier: multiplier_for(k), ander: (k / 2) as i64 },
    }
}

fn multiplier_for(k: usize) -> i64 {
    if k == 1 {
        1
    } else {
        to_odd(k)
    }
}

#[inline]
fn to_odd(k: usize) -> i64 {
    2 * k as i64 + 1
}

/// Recommended number of hash functions for documents whose shingle sets
/// hold `average_set_size` shingles on average.
///
/// # Examples
///
/// ```
/// use minband::minhash::suggest_hash_count;
///
/// assert_eq!(suggest_hash_count(80), 5);
/// assert_eq!(suggest_hash_count(301), 30);
/// assert_eq!(suggest_hash_count(5000), 100);
/// ```
pub fn suggest_hash_count(average_set_size: usize) -> usize {
    SUGGESTED_HASH_COUNTS
        .iter()
        .find(|(upper, _)| average_set_size <= *upper)
        .map(|(_, count)| *count)
        .unwrap_or(MAX_SUGGESTED_HASH_COUNT)
}
