//! Error types for table loading and pension projection

use crate::input::Sex;
use thiserror::Error;

/// Hard failures raised by the projection engine.
///
/// Ordinary lookup gaps never end up here; they resolve through table
/// fallbacks. These variants cover data that makes any pension figure
/// meaningless.
#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    /// The annuity divisor table has no ages at all for this sex
    #[error("annuity divisor table has no entries for {0}")]
    MissingDivisors(Sex),

    /// Divisors are expected remaining months of life and must be positive
    #[error("annuity divisor for {sex} at age {age} is not positive: {divisor}")]
    InvalidDivisor { sex: Sex, age: u32, divisor: f64 },

    /// Without a CPI entry for the anchor year there is nothing to deflate against
    #[error("CPI table has no entry for the current year {0}")]
    MissingCpi(i32),

    /// CPI index must be positive to form a ratio
    #[error("CPI index for year {year} is not positive: {index}")]
    InvalidCpi { year: i32, index: f64 },
}

/// Failures while reading reference tables or user inputs from disk
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid number {value:?} in column {column}")]
    Parse { column: &'static str, value: String },

    #[error("unknown sex label {0:?}")]
    UnknownSex(String),

    #[error("invalid value in {table}: {message}")]
    Invalid { table: &'static str, message: String },
}
