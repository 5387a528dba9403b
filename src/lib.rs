#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Weight-vector optimization for linear daily-demand estimation.
//!
//! A day's demand is estimated as a weighted sum of 13 measurement channels.
//! This crate scores weight vectors by their mean absolute error over a
//! labeled dataset and searches for cheap ones with random search, greedy
//! neighbourhood search, and particle swarm optimization.
//!
//! # Getting Started
//!
//! ```
//! use demand_optimizer::prelude::*;
//!
//! let dataset: Dataset = "10,1,1,1,1,1,1,1,1,1,1,1,1,1\n\
//!                         6,1,0,1,0,1,0,1,0,1,0,1,0,1"
//!     .parse()
//!     .unwrap();
//! let model = CostModel::with_seed(dataset, 42);
//!
//! let baseline = RandomSearch::new(&model).search(200, Bounds::default()).unwrap();
//!
//! let config = SwarmConfig::builder().swarm_size(20).build().unwrap();
//! let report = SwarmOptimizer::new(&model, config).unwrap().run().unwrap();
//!
//! println!("random: {:.4}, swarm: {:.4}", baseline.cost, report.best.cost);
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Dataset`] | Parsed CSV rows: demand followed by 13 measurements. |
//! | [`CostModel`] | Scores weight vectors and owns the run's random stream. |
//! | [`RandomSearch`](search::RandomSearch) | Independent uniform draws, keep the cheapest. |
//! | [`NeighbourhoodSearch`](search::NeighbourhoodSearch) | Greedy one-weight-at-a-time hill climbing. |
//! | [`SwarmOptimizer`](swarm::SwarmOptimizer) | Particle swarm with pluggable particle seeding. |
//!
//! # Reproducibility
//!
//! Every random draw in a run goes through the [`CostModel`]'s generator, in
//! program order. Build the model with [`CostModel::with_seed`] to replay a
//! run exactly.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on results, reports and settings | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at key search points | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod cost;
mod dataset;
mod error;
mod rng_util;
pub mod search;
pub mod swarm;

pub use cost::CostModel;
pub use dataset::{DataRecord, Dataset};
pub use error::{Error, Result};

/// Number of weights in a solution (one per measurement channel).
pub const N_WEIGHTS: usize = 13;

/// Number of fields in a dataset row: demand plus the measurements.
pub const RECORD_LEN: usize = N_WEIGHTS + 1;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use demand_optimizer::prelude::*;
/// ```
pub mod prelude {
    pub use crate::cost::CostModel;
    pub use crate::dataset::{DataRecord, Dataset};
    pub use crate::error::{Error, Result};
    pub use crate::search::{Bounds, Budget, NeighbourhoodSearch, RandomSearch, SearchResult};
    pub use crate::swarm::{
        Coefficients, LocalSearchSeeding, Particle, RandomSeeding, Seeding, SwarmConfig,
        SwarmOptimizer, SwarmReport,
    };
    pub use crate::{N_WEIGHTS, RECORD_LEN};
}
