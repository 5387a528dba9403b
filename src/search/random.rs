//! Uniform random search.

use core::time::Duration;
use std::time::Instant;

use crate::cost::CostModel;
use crate::error::{Error, Result};
use crate::search::{Bounds, SearchResult, deadline_after, expired};

/// Draws independent uniform candidates and keeps the cheapest.
///
/// No state is carried between draws. On exact cost ties the first candidate
/// seen is kept.
///
/// # Examples
///
/// ```
/// use demand_optimizer::search::{Bounds, RandomSearch};
/// use demand_optimizer::{CostModel, Dataset};
///
/// let dataset: Dataset = "10,1,1,1,1,1,1,1,1,1,1,1,1,1".parse().unwrap();
/// let model = CostModel::with_seed(dataset, 42);
///
/// let best = RandomSearch::new(&model).search(100, Bounds::default()).unwrap();
/// assert_eq!(best.solution.len(), 13);
/// assert_eq!(best.iterations, 100);
/// ```
pub struct RandomSearch<'m> {
    model: &'m CostModel,
}

impl<'m> RandomSearch<'m> {
    /// Creates a random search over `model`.
    #[must_use]
    pub fn new(model: &'m CostModel) -> Self {
        Self { model }
    }

    /// Evaluates `iterations` random candidates drawn from `bounds`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIterationCount`] if `iterations` is zero.
    pub fn search(&self, iterations: usize, bounds: Bounds) -> Result<SearchResult> {
        if iterations == 0 {
            return Err(Error::InvalidIterationCount);
        }

        let best = self.search_until(bounds, |best| best.iterations >= iterations)?;

        trace_info!(iterations, best_cost = best.cost, "random search finished");
        Ok(best)
    }

    /// Draws and evaluates candidates until `duration` has elapsed.
    ///
    /// The deadline is checked after each evaluation, so at least one candidate
    /// is always scored even when `duration` is zero. A `duration` too large
    /// to add to the current [`Instant`] leaves the search without a deadline.
    ///
    /// # Errors
    ///
    /// Propagates cost-evaluation errors; none occur for a well-formed model.
    pub fn search_for_duration(&self, duration: Duration, bounds: Bounds) -> Result<SearchResult> {
        let deadline = deadline_after(Instant::now(), duration);
        let best = self.search_until(bounds, |_| expired(deadline))?;

        trace_info!(
            iterations = best.iterations,
            best_cost = best.cost,
            "timed random search finished"
        );
        Ok(best)
    }

    /// Scores one draw, then keeps challenging it until `done` holds.
    fn search_until(
        &self,
        bounds: Bounds,
        mut done: impl FnMut(&SearchResult) -> bool,
    ) -> Result<SearchResult> {
        let mut best = self.draw(bounds)?;
        while !done(&best) {
            self.challenge(&mut best, bounds)?;
        }
        Ok(best)
    }

    fn draw(&self, bounds: Bounds) -> Result<SearchResult> {
        let solution = self.model.generate_random_solution(bounds);
        let cost = self.model.evaluate_cost(&solution)?;
        Ok(SearchResult {
            solution,
            cost,
            iterations: 1,
        })
    }

    /// Draws one more candidate and replaces `best` on strict improvement.
    fn challenge(&self, best: &mut SearchResult, bounds: Bounds) -> Result<()> {
        let candidate = self.model.generate_random_solution(bounds);
        let cost = self.model.evaluate_cost(&candidate)?;
        if cost < best.cost {
            best.solution = candidate;
            best.cost = cost;
        }
        best.iterations += 1;
        Ok(())
    }
}
