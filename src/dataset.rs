//! Labeled demand observations and their CSV loader.
//!
//! Each row of the input is one day: the known demand followed by the 13
//! measurement channels, comma-separated, with no header row.
//!
//! ```
//! use demand_optimizer::Dataset;
//!
//! let dataset: Dataset = "10,1,1,1,1,1,1,1,1,1,1,1,1,1\n".parse().unwrap();
//! assert_eq!(dataset.len(), 1);
//! assert_eq!(dataset.records()[0].demand(), 10.0);
//! ```

use core::str::FromStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::{N_WEIGHTS, RECORD_LEN};

/// One labeled day: ground-truth demand at index 0, measurements at 1..=13.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataRecord {
    fields: [f64; RECORD_LEN],
}

impl DataRecord {
    /// Creates a record from its 14 raw fields.
    #[must_use]
    pub const fn new(fields: [f64; RECORD_LEN]) -> Self {
        Self { fields }
    }

    /// The known demand for this day.
    #[must_use]
    pub const fn demand(&self) -> f64 {
        self.fields[0]
    }

    /// The 13 measurement channels.
    #[must_use]
    pub fn measurements(&self) -> &[f64] {
        &self.fields[1..]
    }

    /// All 14 fields in file order.
    #[must_use]
    pub const fn fields(&self) -> &[f64; RECORD_LEN] {
        &self.fields
    }
}

impl TryFrom<&[f64]> for DataRecord {
    type Error = Error;

    fn try_from(values: &[f64]) -> Result<Self> {
        let fields: [f64; RECORD_LEN] = values.try_into().map_err(|_| Error::Dimension {
            expected: RECORD_LEN,
            got: values.len(),
        })?;
        Ok(Self::new(fields))
    }
}

/// A non-empty, immutable sequence of [`DataRecord`]s.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    records: Vec<DataRecord>,
}

impl Dataset {
    /// Wraps already-parsed records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDataset`] if `records` is empty.
    pub fn from_records(records: Vec<DataRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::EmptyDataset);
        }
        Ok(Self { records })
    }

    /// Parses comma-separated rows from `reader`.
    ///
    /// Blank lines are skipped. Any other row must hold exactly 14 numeric
    /// fields; the first bad row aborts the whole load.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataFormat`] for an unparseable or non-UTF-8 row,
    /// [`Error::EmptyDataset`] if no rows were read, and [`Error::Io`] if the
    /// reader fails.
    pub fn load<R: BufRead>(reader: R) -> Result<Self> {
        let mut records = Vec::new();
        for (idx, bytes) in reader.split(b'\n').enumerate() {
            let bytes = bytes?;
            let line = core::str::from_utf8(&bytes).map_err(|_| Error::DataFormat {
                line: idx + 1,
                reason: "row is not valid UTF-8".to_string(),
            })?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(parse_row(line, idx + 1)?);
        }

        trace_info!(records = records.len(), "dataset loaded");
        Self::from_records(records)
    }

    /// Opens and parses the CSV file at `path`.
    ///
    /// # Errors
    ///
    /// Same as [`Dataset::load`], plus [`Error::Io`] if the file cannot be opened.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::load(BufReader::new(file))
    }

    /// The records in file order.
    #[must_use]
    pub fn records(&self) -> &[DataRecord] {
        &self.records
    }

    /// Number of records. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromStr for Dataset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::load(s.as_bytes())
    }
}

fn parse_row(line: &str, line_no: usize) -> Result<DataRecord> {
    let mut fields = [0.0; RECORD_LEN];
    let mut count = 0;

    for raw in line.split(',') {
        if count == RECORD_LEN {
            count += 1;
            break;
        }
        let raw = raw.trim();
        fields[count] = raw.parse::<f64>().map_err(|_| Error::DataFormat {
            line: line_no,
            reason: format!("field {} ({raw:?}) is not a number", count + 1),
        })?;
        count += 1;
    }

    if count != RECORD_LEN {
        let found = line.split(',').count();
        return Err(Error::DataFormat {
            line: line_no,
            reason: format!("expected {RECORD_LEN} fields (demand + {N_WEIGHTS} measurements), found {found}"),
        });
    }

    Ok(DataRecord::new(fields))
}
