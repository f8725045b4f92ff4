/////////////////////////////////////////////////////////////////////////////////////
//
// Epitools - epidemic model utilities
//
// sampling module
//
// random draw helpers used across the simulation
//
////////////////////////////////////////////////////////////////////////////////////

use rand::distributions::{Distribution, WeightedIndex};
use rand::prelude::*;
use rand::rngs::ThreadRng;
use std::error;
use std::fmt;

/// Single Bernoulli draw - true with probability p.
/// Consumes exactly one uniform draw. p outside [0, 1] is caller misuse
/// and is not checked here.
pub fn bool_bernoulli<R: Rng + ?Sized>(p: f64, rng: &mut R) -> bool {
    rng.gen::<f64>() < p
}

/// Draw n category indices from the probability vector pvals.
/// The weights need not sum to exactly 1 but must be usable - an empty,
/// all-zero or negative vector is rejected.
pub fn categorical<R: Rng + ?Sized>(
    pvals: &[f64],
    rng: &mut R,
    n: usize,
) -> Result<Vec<usize>, SampleError> {
    let wi = WeightedIndex::new(pvals)?;
    Ok((0..n).map(|_| wi.sample(rng)).collect())
}

/// Single-draw convenience over categorical.
pub fn categorical_one<R: Rng + ?Sized>(
    pvals: &[f64],
    rng: &mut R,
) -> Result<usize, SampleError> {
    let wi = WeightedIndex::new(pvals)?;
    Ok(wi.sample(rng))
}

/// Thread-local generator for ordinary runs.
pub fn default_rng() -> ThreadRng {
    rand::thread_rng()
}

/// Seeded generator for reproducible runs.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[derive(Debug, Clone, PartialEq)]
pub enum SampleError {
    InvalidDistribution(String),
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SampleError::InvalidDistribution(reason) => {
                write!(f, "unusable probability vector - {}", reason)
            }
        }
    }
}

impl error::Error for SampleError {}

impl From<rand::distributions::WeightedError> for SampleError {
    fn from(e: rand::distributions::WeightedError) -> SampleError {
        SampleError::InvalidDistribution(e.to_string())
    }
}
