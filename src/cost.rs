//! Mean-absolute-error cost of a weight vector over a dataset.

use std::io::BufRead;
use std::path::Path;

use parking_lot::Mutex;

use crate::dataset::{DataRecord, Dataset};
use crate::error::{Error, Result, ensure_len};
use crate::search::Bounds;
use crate::{N_WEIGHTS, rng_util};

/// Scores weight vectors against a fixed dataset and owns the random stream
/// every optimizer draws from.
///
/// All randomness in a run (uniform candidates, neighbourhood perturbations,
/// PSO coefficients) comes from the single generator held here, so seeding the
/// model with [`CostModel::with_seed`] makes the whole run reproducible.
///
/// # Examples
///
/// ```
/// use demand_optimizer::{CostModel, Dataset};
///
/// let dataset: Dataset = "10,1,1,1,1,1,1,1,1,1,1,1,1,1".parse().unwrap();
/// let model = CostModel::with_seed(dataset, 42);
///
/// let mut weights = vec![0.0; 13];
/// weights[0] = 1.0;
/// assert_eq!(model.evaluate_cost(&weights).unwrap(), 9.0);
/// ```
#[derive(Debug)]
pub struct CostModel {
    dataset: Dataset,
    rng: Mutex<fastrand::Rng>,
}

impl CostModel {
    /// Creates a model with an entropy-seeded random stream.
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    /// Creates a model with a fixed seed for reproducibility.
    #[must_use]
    pub fn with_seed(dataset: Dataset, seed: u64) -> Self {
        Self {
            dataset,
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }

    /// Parses a dataset from `reader` and wraps it in an entropy-seeded model.
    ///
    /// # Errors
    ///
    /// See [`Dataset::load`].
    pub fn load<R: BufRead>(reader: R) -> Result<Self> {
        Dataset::load(reader).map(Self::new)
    }

    /// Parses the CSV file at `path` and wraps it in an entropy-seeded model.
    ///
    /// # Errors
    ///
    /// See [`Dataset::from_path`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Dataset::from_path(path).map(Self::new)
    }

    /// The dataset being scored against.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Absolute estimation error for a single record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dimension`] if `weights` does not hold 13 values.
    pub fn evaluate_record(record: &DataRecord, weights: &[f64]) -> Result<f64> {
        ensure_len(weights, N_WEIGHTS)?;
        Ok(record_error(record, weights))
    }

    /// Mean absolute estimation error over every record in the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dimension`] if `weights` does not hold 13 values.
    pub fn evaluate_cost(&self, weights: &[f64]) -> Result<f64> {
        mean_absolute_error(self.dataset.records(), weights)
    }

    /// Draws 13 independent uniform weights from `bounds`.
    #[must_use]
    pub fn generate_random_solution(&self, bounds: Bounds) -> Vec<f64> {
        let mut rng = self.rng.lock();
        (0..N_WEIGHTS)
            .map(|_| rng_util::f64_range(&mut rng, bounds.lower(), bounds.upper()))
            .collect()
    }

    /// Runs `f` with exclusive access to the shared random stream.
    ///
    /// Callers must not call back into the model from inside `f`.
    pub(crate) fn with_rng<T>(&self, f: impl FnOnce(&mut fastrand::Rng) -> T) -> T {
        let mut rng = self.rng.lock();
        f(&mut rng)
    }
}

#[inline]
fn record_error(record: &DataRecord, weights: &[f64]) -> f64 {
    let estimate: f64 = weights
        .iter()
        .zip(record.measurements())
        .map(|(w, m)| w * m)
        .sum();
    (estimate - record.demand()).abs()
}

#[allow(clippy::cast_precision_loss)]
fn mean_absolute_error(records: &[DataRecord], weights: &[f64]) -> Result<f64> {
    ensure_len(weights, N_WEIGHTS)?;
    if records.is_empty() {
        return Err(Error::EmptyDataset);
    }
    let total: f64 = records.iter().map(|r| record_error(r, weights)).sum();
    Ok(total / records.len() as f64)
}
