//! Particle swarm optimization over weight vectors.
//!
//! # Algorithm overview
//!
//! Each particle carries a position, a velocity and the cheapest position it
//! has visited (its personal best). Every pass, each particle in index order:
//! 1. redraws its velocity as
//!    `v = w·v + c1·r1·(pbest − x) + c2·r2·(gbest − x)` with `r1, r2 ~ U[0, 1)`
//!    drawn per dimension,
//! 2. moves to `x + v` (no clamping),
//! 3. replaces its personal best if the new position is strictly cheaper,
//! 4. replaces the global best if the new position is strictly cheaper.
//!
//! # Update ordering
//!
//! Global-best updates are asynchronous: particle `k` sees any improvement
//! made by particles `0..k` earlier in the same pass. Together with a single
//! seeded random stream this makes a seeded run fully reproducible, and the
//! global-best cost is non-increasing from pass to pass.
//!
//! # Configuration
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `swarm_size` | 30 | Number of particles |
//! | `budget` | 100 iterations | Fixed pass count or wall-clock limit |
//! | `coefficients` | `w = 0.721`, `c1 = c2 = 1.1193` | Inertia, cognitive and social weights |
//! | `bounds` | `[-1, 1]` | Range for starting positions and the initial global best |
//! | `seeding` | [`RandomSeeding`] | How each particle's personal best and momentum start |
//!
//! # Examples
//!
//! ```
//! use demand_optimizer::swarm::{Budget, LocalSearchSeeding, SwarmConfig, SwarmOptimizer};
//! use demand_optimizer::{CostModel, Dataset};
//!
//! let dataset: Dataset = "10,1,1,1,1,1,1,1,1,1,1,1,1,1".parse().unwrap();
//! let model = CostModel::with_seed(dataset, 42);
//!
//! let config = SwarmConfig::builder()
//!     .swarm_size(10)
//!     .budget(Budget::Iterations(20))
//!     .seeding(LocalSearchSeeding::new())
//!     .build()
//!     .unwrap();
//!
//! let report = SwarmOptimizer::new(&model, config).unwrap().run().unwrap();
//! assert_eq!(report.best.solution.len(), 13);
//! assert_eq!(report.history.len(), 20);
//! ```

pub mod particle;

use core::fmt;
use core::time::Duration;
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cost::CostModel;
use crate::error::{Error, Result};
use crate::search::{Bounds, SearchResult, deadline_after, expired};

pub use crate::search::Budget;
pub use particle::{LocalSearchSeeding, Particle, RandomSeeding, Seed, Seeding};

/// Weights of the three velocity terms.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coefficients {
    /// Weight on the previous velocity (`w`).
    pub inertia: f64,
    /// Pull towards the particle's personal best (`c1`).
    pub cognitive: f64,
    /// Pull towards the swarm's global best (`c2`).
    pub social: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            inertia: 0.721,
            cognitive: 1.1193,
            social: 1.1193,
        }
    }
}

/// Settings for one swarm run. Build with [`SwarmConfig::builder`].
pub struct SwarmConfig {
    swarm_size: usize,
    budget: Budget,
    coefficients: Coefficients,
    bounds: Bounds,
    seeding: Box<dyn Seeding>,
}

impl SwarmConfig {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn builder() -> SwarmConfigBuilder {
        SwarmConfigBuilder::new()
    }

    /// Number of particles.
    #[must_use]
    pub fn swarm_size(&self) -> usize {
        self.swarm_size
    }

    /// Iteration or time budget.
    #[must_use]
    pub fn budget(&self) -> Budget {
        self.budget
    }

    /// Velocity-update coefficients.
    #[must_use]
    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }

    /// Range for starting positions.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Particle seeding strategy.
    #[must_use]
    pub fn seeding(&self) -> &dyn Seeding {
        self.seeding.as_ref()
    }
}

impl fmt::Debug for SwarmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwarmConfig")
            .field("swarm_size", &self.swarm_size)
            .field("budget", &self.budget)
            .field("coefficients", &self.coefficients)
            .field("bounds", &self.bounds)
            .field("seeding", &self.seeding.name())
            .finish()
    }
}

/// Builder for [`SwarmConfig`].
///
/// # Examples
///
/// ```
/// use core::time::Duration;
///
/// use demand_optimizer::search::Bounds;
/// use demand_optimizer::swarm::{Budget, Coefficients, SwarmConfig};
///
/// let config = SwarmConfig::builder()
///     .swarm_size(60)
///     .budget(Budget::Duration(Duration::from_secs(1)))
///     .coefficients(Coefficients { inertia: 0.7, cognitive: 1.5, social: 1.5 })
///     .bounds(Bounds::symmetric(2.0).unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(config.swarm_size(), 60);
/// ```
pub struct SwarmConfigBuilder {
    swarm_size: usize,
    budget: Budget,
    coefficients: Coefficients,
    bounds: Bounds,
    seeding: Box<dyn Seeding>,
}

impl Default for SwarmConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SwarmConfigBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            swarm_size: 30,
            budget: Budget::default(),
            coefficients: Coefficients::default(),
            bounds: Bounds::default(),
            seeding: Box::new(RandomSeeding::new()),
        }
    }

    /// Sets the number of particles.
    ///
    /// Default: 30.
    #[must_use]
    pub fn swarm_size(mut self, size: usize) -> Self {
        self.swarm_size = size;
        self
    }

    /// Sets the pass count or wall-clock limit.
    ///
    /// Default: 100 iterations.
    #[must_use]
    pub fn budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the inertia, cognitive and social coefficients.
    #[must_use]
    pub fn coefficients(mut self, coefficients: Coefficients) -> Self {
        self.coefficients = coefficients;
        self
    }

    /// Sets the range for starting positions and the initial global best.
    ///
    /// Default: `[-1, 1]`.
    #[must_use]
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sets the particle seeding strategy.
    ///
    /// Default: [`RandomSeeding`].
    #[must_use]
    pub fn seeding(mut self, seeding: impl Seeding + 'static) -> Self {
        self.seeding = Box::new(seeding);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSwarmSize`] for an empty swarm and
    /// [`Error::InvalidIterationCount`] for a zero-iteration budget.
    pub fn build(self) -> Result<SwarmConfig> {
        if self.swarm_size == 0 {
            return Err(Error::InvalidSwarmSize);
        }
        if self.budget == Budget::Iterations(0) {
            return Err(Error::InvalidIterationCount);
        }
        Ok(SwarmConfig {
            swarm_size: self.swarm_size,
            budget: self.budget,
            coefficients: self.coefficients,
            bounds: self.bounds,
            seeding: self.seeding,
        })
    }
}

/// Outcome of [`SwarmOptimizer::run`] plus the settings that produced it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SwarmReport {
    /// Global best found; `iterations` counts completed passes.
    pub best: SearchResult,
    /// Number of particles.
    pub swarm_size: usize,
    /// Budget the run was given.
    pub budget: Budget,
    /// Velocity-update coefficients.
    pub coefficients: Coefficients,
    /// Name of the seeding strategy.
    pub seeding: String,
    /// Global-best cost after each pass.
    ///
    /// One entry is pushed per completed pass, so under a
    /// [`Budget::Duration`] its length grows with the wall-clock limit and is
    /// not capped.
    pub history: Vec<f64>,
    /// Wall-clock time spent in the run.
    pub elapsed: Duration,
}

/// Drives a population of [`Particle`]s and tracks the global best.
pub struct SwarmOptimizer<'m> {
    model: &'m CostModel,
    config: SwarmConfig,
    particles: Vec<Particle>,
    global_best: Vec<f64>,
    global_best_cost: f64,
}

impl<'m> SwarmOptimizer<'m> {
    /// Builds the swarm.
    ///
    /// The initial global best is drawn uniformly from the configured bounds
    /// first; then each particle gets its own independent starting draw and
    /// is seeded in index order.
    ///
    /// # Errors
    ///
    /// Propagates errors from the seeding strategy.
    pub fn new(model: &'m CostModel, config: SwarmConfig) -> Result<Self> {
        let global_best = model.generate_random_solution(config.bounds);
        let global_best_cost = model.evaluate_cost(&global_best)?;

        let particles = (0..config.swarm_size)
            .map(|_| {
                let start = model.generate_random_solution(config.bounds);
                Particle::new(model, start, config.seeding.as_ref(), config.coefficients)
            })
            .collect::<Result<Vec<_>>>()?;

        trace_info!(
            swarm_size = config.swarm_size,
            seeding = config.seeding.name(),
            initial_cost = global_best_cost,
            "swarm initialised"
        );

        Ok(Self {
            model,
            config,
            particles,
            global_best,
            global_best_cost,
        })
    }

    /// Runs passes until the configured budget is spent.
    ///
    /// A duration budget checks the clock once per full pass, and at least one
    /// pass always completes. A limit too large to add to the current
    /// [`Instant`] means the run has no deadline. Calling `run` again continues from the current
    /// swarm state with a fresh budget.
    ///
    /// # Errors
    ///
    /// Propagates cost-evaluation errors.
    pub fn run(&mut self) -> Result<SwarmReport> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "swarm_run",
            swarm_size = self.particles.len(),
            budget = ?self.config.budget
        )
        .entered();

        let start = Instant::now();
        let mut history = Vec::new();

        match self.config.budget {
            Budget::Iterations(n) => self.run_until(&mut history, |passes| passes >= n)?,
            Budget::Duration(limit) => {
                let deadline = deadline_after(start, limit);
                self.run_until(&mut history, |_| expired(deadline))?;
            }
        }

        trace_info!(
            iterations = history.len(),
            best_cost = self.global_best_cost,
            "swarm finished"
        );

        Ok(SwarmReport {
            best: SearchResult {
                solution: self.global_best.clone(),
                cost: self.global_best_cost,
                iterations: history.len(),
            },
            swarm_size: self.particles.len(),
            budget: self.config.budget,
            coefficients: self.config.coefficients,
            seeding: self.config.seeding.name().to_string(),
            history,
            elapsed: start.elapsed(),
        })
    }

    /// Runs one pass, then keeps going until `done` holds for the number of
    /// passes recorded in `history`.
    fn run_until(
        &mut self,
        history: &mut Vec<f64>,
        mut done: impl FnMut(usize) -> bool,
    ) -> Result<()> {
        loop {
            history.push(self.step()?);
            if done(history.len()) {
                return Ok(());
            }
        }
    }

    /// Updates every particle once, in index order, and returns the global
    /// best cost afterwards.
    ///
    /// # Errors
    ///
    /// Propagates cost-evaluation errors.
    pub fn step(&mut self) -> Result<f64> {
        for particle in &mut self.particles {
            let (position, cost) = particle.update(self.model, &self.global_best)?;
            if cost < self.global_best_cost {
                trace_debug!(cost, previous = self.global_best_cost, "global best improved");
                self.global_best.copy_from_slice(position);
                self.global_best_cost = cost;
            }
        }
        Ok(self.global_best_cost)
    }

    /// The particles in update order.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Cheapest position seen by the swarm.
    #[must_use]
    pub fn global_best(&self) -> &[f64] {
        &self.global_best
    }

    /// Cost of [`SwarmOptimizer::global_best`].
    #[must_use]
    pub fn global_best_cost(&self) -> f64 {
        self.global_best_cost
    }

    /// The configuration the swarm was built with.
    #[must_use]
    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }
}
