//! Search-space bounds, run budgets, and the single-point searches.
//!
//! - [`RandomSearch`](random::RandomSearch) draws independent uniform
//!   candidates and keeps the cheapest.
//! - [`NeighbourhoodSearch`](neighbourhood::NeighbourhoodSearch) hill-climbs
//!   from a starting vector by perturbing one weight at a time.

pub mod neighbourhood;
pub mod random;

use core::time::Duration;
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use neighbourhood::NeighbourhoodSearch;
pub use random::RandomSearch;

/// Closed interval `[lower, upper]` for uniform weight draws.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    lower: f64,
    upper: f64,
}

impl Bounds {
    /// Creates validated bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if either bound is not finite or
    /// `lower > upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(Error::InvalidBounds {
                low: lower,
                high: upper,
            });
        }
        Ok(Self { lower, upper })
    }

    /// Bounds known to be valid at compile time.
    pub(crate) const fn from_const(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Symmetric bounds `[-half_width, half_width]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if `half_width` is negative or not finite.
    pub fn symmetric(half_width: f64) -> Result<Self> {
        Self::new(-half_width, half_width)
    }

    /// The lower bound.
    #[must_use]
    pub const fn lower(&self) -> f64 {
        self.lower
    }

    /// The upper bound.
    #[must_use]
    pub const fn upper(&self) -> f64 {
        self.upper
    }
}

impl Default for Bounds {
    /// `[-1, 1]`.
    fn default() -> Self {
        Self::from_const(-1.0, 1.0)
    }
}

/// How long a search may run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Budget {
    /// A fixed number of iterations (draws, or full swarm passes).
    Iterations(usize),
    /// A wall-clock limit. At least one iteration always completes.
    Duration(Duration),
}

impl Default for Budget {
    fn default() -> Self {
        Self::Iterations(100)
    }
}

/// The instant `limit` after `start`.
///
/// Returns `None` when that instant lies beyond what [`Instant`] can
/// represent, which callers treat as no deadline at all.
pub(crate) fn deadline_after(start: Instant, limit: Duration) -> Option<Instant> {
    start.checked_add(limit)
}

/// Whether `deadline` has passed. A missing deadline never expires.
pub(crate) fn expired(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|d| Instant::now() >= d)
}

/// The best weight vector a search found, with its cost.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchResult {
    /// The 13 weights.
    pub solution: Vec<f64>,
    /// Mean absolute error of `solution` over the dataset.
    pub cost: f64,
    /// Number of iterations the search completed.
    pub iterations: usize,
}

impl SearchResult {
    /// Splits the result into `(cost, solution)`.
    #[must_use]
    pub fn into_parts(self) -> (f64, Vec<f64>) {
        (self.cost, self.solution)
    }
}
