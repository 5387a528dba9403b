//! A single PSO agent and the strategies that seed it.
//!
//! Every particle shares the same update rule. How its personal best and
//! initial momentum are chosen is delegated to a [`Seeding`] strategy:
//!
//! | Strategy | Personal best | Velocity reference |
//! |----------|---------------|--------------------|
//! | [`RandomSeeding`] | the starting position | a fresh uniform draw in `[-2, 2]` |
//! | [`LocalSearchSeeding`] | local search from the start (10 steps) | the local-search result |
//!
//! In both cases the initial velocity is `(reference - position) / 2`.

use crate::N_WEIGHTS;
use crate::cost::CostModel;
use crate::error::{Result, ensure_len};
use crate::search::{Bounds, NeighbourhoodSearch};
use crate::swarm::Coefficients;

/// Initial personal best and velocity reference for a new particle.
#[derive(Clone, Debug)]
pub struct Seed {
    /// Starting personal-best position.
    pub personal_best: Vec<f64>,
    /// Cost of `personal_best`.
    pub personal_best_cost: f64,
    /// Point the initial velocity points half-way towards.
    pub reference: Vec<f64>,
}

/// Chooses a particle's personal best and initial momentum.
pub trait Seeding: Send + Sync {
    /// Produces the seed for a particle starting at `position`.
    ///
    /// # Errors
    ///
    /// Propagates cost-evaluation errors.
    fn seed(&self, model: &CostModel, position: &[f64]) -> Result<Seed>;

    /// Short label recorded in run reports.
    fn name(&self) -> &'static str;
}

/// Personal best is the starting position; momentum points at a random draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomSeeding {
    reference_bounds: Bounds,
}

impl RandomSeeding {
    /// Draws velocity references from `[-2, 2]`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reference_bounds: Bounds::from_const(-2.0, 2.0),
        }
    }

    /// Sets the interval the velocity reference is drawn from.
    #[must_use]
    pub fn reference_bounds(mut self, bounds: Bounds) -> Self {
        self.reference_bounds = bounds;
        self
    }
}

impl Default for RandomSeeding {
    fn default() -> Self {
        Self::new()
    }
}

impl Seeding for RandomSeeding {
    fn seed(&self, model: &CostModel, position: &[f64]) -> Result<Seed> {
        let personal_best_cost = model.evaluate_cost(position)?;
        let reference = model.generate_random_solution(self.reference_bounds);
        Ok(Seed {
            personal_best: position.to_vec(),
            personal_best_cost,
            reference,
        })
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Personal best comes from a short neighbourhood search, and the initial
/// momentum points towards it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalSearchSeeding {
    iterations: usize,
}

impl LocalSearchSeeding {
    /// Runs 10 local-search steps per particle.
    #[must_use]
    pub fn new() -> Self {
        Self { iterations: 10 }
    }

    /// Sets the number of local-search steps per particle.
    #[must_use]
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
}

impl Default for LocalSearchSeeding {
    fn default() -> Self {
        Self::new()
    }
}

impl Seeding for LocalSearchSeeding {
    fn seed(&self, model: &CostModel, position: &[f64]) -> Result<Seed> {
        let found = NeighbourhoodSearch::new(model).local_search(position, self.iterations)?;
        Ok(Seed {
            reference: found.solution.clone(),
            personal_best: found.solution,
            personal_best_cost: found.cost,
        })
    }

    fn name(&self) -> &'static str {
        "local-search"
    }
}

/// One swarm member: position, velocity and personal best.
///
/// Neither velocity nor position is clamped, so weights may drift outside the
/// range they were drawn from.
#[derive(Clone, Debug)]
pub struct Particle {
    position: Vec<f64>,
    velocity: Vec<f64>,
    personal_best: Vec<f64>,
    personal_best_cost: f64,
    coefficients: Coefficients,
}

impl Particle {
    /// Creates a particle at `position`, seeded by `seeding`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dimension`](crate::Error::Dimension) if `position` or
    /// the seed's reference point does not hold 13 values.
    pub fn new(
        model: &CostModel,
        position: Vec<f64>,
        seeding: &dyn Seeding,
        coefficients: Coefficients,
    ) -> Result<Self> {
        ensure_len(&position, N_WEIGHTS)?;
        let seed = seeding.seed(model, &position)?;
        ensure_len(&seed.reference, N_WEIGHTS)?;
        ensure_len(&seed.personal_best, N_WEIGHTS)?;

        let velocity = seed
            .reference
            .iter()
            .zip(&position)
            .map(|(r, p)| (r - p) / 2.0)
            .collect();

        Ok(Self {
            position,
            velocity,
            personal_best: seed.personal_best,
            personal_best_cost: seed.personal_best_cost,
            coefficients,
        })
    }

    /// Moves the particle one step towards its personal best and `global_best`.
    ///
    /// Returns the new position and its cost. The personal best is replaced
    /// only on strict improvement.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dimension`](crate::Error::Dimension) if `global_best`
    /// does not hold 13 values.
    pub fn update(&mut self, model: &CostModel, global_best: &[f64]) -> Result<(&[f64], f64)> {
        ensure_len(global_best, N_WEIGHTS)?;
        let Coefficients {
            inertia,
            cognitive,
            social,
        } = self.coefficients;

        model.with_rng(|rng| {
            for i in 0..N_WEIGHTS {
                let r1 = rng.f64();
                let r2 = rng.f64();
                self.velocity[i] = inertia * self.velocity[i]
                    + cognitive * r1 * (self.personal_best[i] - self.position[i])
                    + social * r2 * (global_best[i] - self.position[i]);
            }
        });
        for (p, v) in self.position.iter_mut().zip(&self.velocity) {
            *p += v;
        }

        let cost = model.evaluate_cost(&self.position)?;
        if cost < self.personal_best_cost {
            self.personal_best.clone_from(&self.position);
            self.personal_best_cost = cost;
        }
        Ok((&self.position, cost))
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Current velocity.
    #[must_use]
    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    /// Cheapest position this particle has visited.
    #[must_use]
    pub fn personal_best(&self) -> &[f64] {
        &self.personal_best
    }

    /// Cost of [`Particle::personal_best`].
    #[must_use]
    pub fn personal_best_cost(&self) -> f64 {
        self.personal_best_cost
    }
}
