//! Greedy neighbourhood (hill-climbing) search.
//!
//! Each step probes 13 neighbours of the incumbent, one per weight. Neighbour
//! `i` is the incumbent with weight `i` redrawn from a normal distribution
//! centred on its current value. The cheapest neighbour replaces the incumbent
//! only if it is strictly cheaper, so the search can stall but never regresses.

use crate::N_WEIGHTS;
use crate::cost::CostModel;
use crate::error::{Error, Result, ensure_len};
use crate::rng_util;
use crate::search::SearchResult;

/// Default standard deviation of the per-weight perturbation.
pub const DEFAULT_STD_DEV: f64 = 2.0;

/// Single-dimension-perturbation hill climber.
///
/// # Examples
///
/// ```
/// use demand_optimizer::search::{Bounds, NeighbourhoodSearch};
/// use demand_optimizer::{CostModel, Dataset};
///
/// let dataset: Dataset = "10,1,1,1,1,1,1,1,1,1,1,1,1,1".parse().unwrap();
/// let model = CostModel::with_seed(dataset, 7);
///
/// let start = model.generate_random_solution(Bounds::default());
/// let start_cost = model.evaluate_cost(&start).unwrap();
///
/// let best = NeighbourhoodSearch::new(&model).local_search(&start, 25).unwrap();
/// assert!(best.cost <= start_cost);
/// ```
pub struct NeighbourhoodSearch<'m> {
    model: &'m CostModel,
    std_dev: f64,
}

impl<'m> NeighbourhoodSearch<'m> {
    /// Creates a search with the default perturbation width of 2.0.
    #[must_use]
    pub fn new(model: &'m CostModel) -> Self {
        Self {
            model,
            std_dev: DEFAULT_STD_DEV,
        }
    }

    /// Sets the standard deviation used when redrawing a weight.
    ///
    /// Zero is allowed and leaves every neighbour equal to the incumbent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStdDev`] if `std_dev` is negative, NaN or
    /// infinite.
    pub fn std_dev(mut self, std_dev: f64) -> Result<Self> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(Error::InvalidStdDev(std_dev));
        }
        self.std_dev = std_dev;
        Ok(self)
    }

    /// Produces the 13 single-weight perturbations of `solution`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dimension`] if `solution`
    /// does not hold 13 values.
    pub fn find_neighbours(&self, solution: &[f64]) -> Result<Vec<Vec<f64>>> {
        ensure_len(solution, N_WEIGHTS)?;
        let std_dev = self.std_dev;
        Ok(self.model.with_rng(|rng| {
            (0..N_WEIGHTS)
                .map(|i| {
                    let mut neighbour = solution.to_vec();
                    neighbour[i] = rng_util::normal(rng, solution[i], std_dev);
                    neighbour
                })
                .collect()
        }))
    }

    /// Hill-climbs from `initial` for exactly `iterations` steps.
    ///
    /// With zero iterations the initial solution is returned with its cost.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dimension`] if `initial`
    /// does not hold 13 values.
    pub fn local_search(&self, initial: &[f64], iterations: usize) -> Result<SearchResult> {
        let mut best = initial.to_vec();
        let mut best_cost = self.model.evaluate_cost(&best)?;

        for _ in 0..iterations {
            let mut step: Option<(Vec<f64>, f64)> = None;
            for neighbour in self.find_neighbours(&best)? {
                let cost = self.model.evaluate_cost(&neighbour)?;
                if step.as_ref().is_none_or(|(_, c)| cost < *c) {
                    step = Some((neighbour, cost));
                }
            }

            if let Some((neighbour, cost)) = step
                && cost < best_cost
            {
                trace_debug!(cost, previous = best_cost, "local search improved");
                best = neighbour;
                best_cost = cost;
            }
        }

        Ok(SearchResult {
            solution: best,
            cost: best_cost,
            iterations,
        })
    }
}
