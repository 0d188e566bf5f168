//! Core data structures for tank telemetry processing.
//!
//! Defines the decoded record types, per-tank channel series, daily
//! aggregates, and processing statistics used throughout the library.

use std::path::PathBuf;

/// The two cold-gas fuel tanks on the spacecraft.
///
/// Tank identity is derived from record parity: long records strictly
/// alternate between the tanks starting with tank 1 at index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TankId {
    Tank1,
    Tank2,
}

impl TankId {
    /// Tank owning the record at `index` in the concatenated record stream.
    pub fn from_record_index(index: usize) -> Self {
        if index % 2 == 0 {
            TankId::Tank1
        } else {
            TankId::Tank2
        }
    }

    /// Human-readable label used in reports and output columns.
    pub fn label(&self) -> &'static str {
        match self {
            TankId::Tank1 => "tank1",
            TankId::Tank2 => "tank2",
        }
    }
}

/// One decoded long record: timestamp plus the zenith/nadir temperature pair.
///
/// Ordering within a `Vec<DecodedSample>` follows file/record order and is
/// load-bearing: the parity of the index determines tank assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedSample {
    /// Seconds since the telemetry epoch, from the record's first token.
    pub epoch_seconds: f64,
    /// (zenith, nadir) skin temperatures in Celsius, tokens 7 and 8.
    pub temperature_pair: (f64, f64),
}

/// Pressure pair lifted from the trailing two tokens of a lookback line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureSample {
    /// Internal tank pressure, bar (first of the trailing pair).
    pub internal: f64,
    /// Regulated outlet pressure, bar (second of the trailing pair).
    pub regulated: f64,
}

/// Per-tank channel series, index-aligned: index i across all five vectors
/// refers to the same record.
#[derive(Debug, Clone)]
pub struct TankChannelSeries {
    pub tank: TankId,
    pub internal_pressure: Vec<f64>,
    pub regulated_pressure: Vec<f64>,
    pub zenith_temp_celsius: Vec<f64>,
    pub nadir_temp_celsius: Vec<f64>,
    /// Mean of the zenith/nadir pair, converted to Kelvin.
    pub average_temp_kelvin: Vec<f64>,
}

impl TankChannelSeries {
    pub fn len(&self) -> usize {
        self.internal_pressure.len()
    }

    pub fn is_empty(&self) -> bool {
        self.internal_pressure.is_empty()
    }
}

/// One daily-averaged series for one tank and one quantity.
///
/// `values[d]` is `None` when every record in day `d`'s bucket was a missing
/// value (solver failure); aggregation never coerces missing to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    pub values: Vec<Option<f64>>,
    /// Fixed bucket size used for every day (floor division).
    pub records_per_day: usize,
    /// Trailing records excluded from the final bucket.
    pub dropped_records: usize,
    /// Missing per-record values encountered across all buckets.
    pub missing_records: usize,
}

/// Statistics accumulated over one processing run.
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub lines_read: usize,
    pub long_records: usize,
    /// Lookback pressure samples skipped because their trailing tokens were
    /// non-numeric or missing (one-lookback series).
    pub pressure_samples_skipped: usize,
    /// Records whose mass estimate is missing (solver gave up or its
    /// derivative vanished), per tank.
    pub solver_failures_tank1: usize,
    pub solver_failures_tank2: usize,
    /// Trailing records dropped by the daily bucketing, per tank.
    pub records_dropped_tank1: usize,
    pub records_dropped_tank2: usize,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}
