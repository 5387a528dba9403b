#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a dataset row does not parse to exactly 14 numeric fields.
    #[error("malformed row {line}: {reason}")]
    DataFormat {
        /// The 1-based line number of the offending row.
        line: usize,
        /// What was wrong with the row.
        reason: String,
    },

    /// Returned when a dataset has no records.
    #[error("dataset contains no records")]
    EmptyDataset,

    /// Returned when a weight, position or velocity vector has the wrong length.
    #[error("dimension mismatch: expected {expected} values but got {got}")]
    Dimension {
        /// The expected number of values.
        expected: usize,
        /// The actual number of values supplied.
        got: usize,
    },

    /// Returned when a fixed-iteration search is asked to run zero iterations.
    #[error("invalid iteration count: at least one iteration is required")]
    InvalidIterationCount,

    /// Returned when the lower bound is greater than the upper bound or either is not finite.
    #[error("invalid bounds: low ({low}) must be finite and less than or equal to high ({high})")]
    InvalidBounds {
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when a perturbation width is negative or not finite.
    #[error("invalid standard deviation: {0} must be finite and non-negative")]
    InvalidStdDev(f64),

    /// Returned when a swarm is configured with no particles.
    #[error("invalid swarm size: a swarm needs at least one particle")]
    InvalidSwarmSize,

    /// Returned when the dataset source cannot be read.
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;

/// Checks that `values` holds exactly `expected` entries.
pub(crate) fn ensure_len(values: &[f64], expected: usize) -> Result<()> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(Error::Dimension {
            expected,
            got: values.len(),
        })
    }
}
