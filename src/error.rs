//! Error handling for tank telemetry processing operations.
//!
//! Provides error types with context for file discovery, header parsing,
//! series alignment, and aggregation failures. Per-record failures (skipped
//! pressure samples, solver non-convergence) are not errors: they surface as
//! counted missing values in the output series.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TankError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("telemetry file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("malformed header in {path}: end of file before '# End of YAML header'")]
    MalformedHeader { path: PathBuf },

    #[error(
        "series misaligned: {decoded} decoded samples vs {pressures} pressure samples \
         ({skipped} recoverable parse skips)"
    )]
    SeriesMisaligned {
        decoded: usize,
        pressures: usize,
        skipped: usize,
    },

    #[error("insufficient data for {series}: {records} records cannot fill {days} daily buckets")]
    InsufficientData {
        series: String,
        records: usize,
        days: usize,
    },

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl TankError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TankError>;
