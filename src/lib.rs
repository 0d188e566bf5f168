//! GRACE-FO Tank Telemetry Processor Library
//!
//! A Rust library for estimating propellant mass in the GRACE-FO cold-gas
//! tanks from Level-1A TNK1A telemetry files.
//!
//! This library provides tools for:
//! - Stripping the variable-form file headers (tSDS one-liner or YAML block)
//! - Decoding long telemetry records and their lookback pressure pairs
//! - Splitting channel series between the two tanks by record parity
//! - Inverting a Van der Waals equation of state with Newton-Raphson
//! - Aggregating per-record estimates into daily means over a fixed window
//! - Writing daily mass/temperature series with explicit missing values

pub mod aggregate;
pub mod channels;
pub mod cli;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod header;
pub mod models;
pub mod processor;
pub mod solver;

// Re-export commonly used types
pub use config::{GasTankConfig, ProcessingWindow};
pub use error::{Result, TankError};
pub use models::{DailySeries, DecodedSample, PressureSample, TankChannelSeries, TankId};
pub use processor::{DiscoveryMode, TelemetryProcessor};
pub use solver::SolverOutcome;
