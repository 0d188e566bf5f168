//! Application constants for the tank telemetry processor
//!
//! This module contains the file-format markers, record layout offsets,
//! physical constants, and archive path patterns used throughout the
//! application.

// =============================================================================
// Telemetry File Format
// =============================================================================

/// Marker token opening the short, single-line header form.
///
/// Files produced by the tSDS toolchain carry a one-line preamble whose first
/// token starts with this string; everything after that line is data.
pub const SHORT_HEADER_MARKER: &str = "tSDS";

/// Exact terminator line of the multi-line YAML header form.
pub const YAML_HEADER_TERMINATOR: &str = "# End of YAML header";

/// A line with more than this many whitespace-separated tokens is a "long"
/// record carrying timestamp and temperature data.
pub const LONG_RECORD_TOKEN_THRESHOLD: usize = 9;

/// Zero-based token index of the epoch-seconds timestamp on every record.
pub const EPOCH_TOKEN_INDEX: usize = 0;

/// Zero-based token range holding the zenith/nadir temperature pair on a
/// long record.
pub const TEMPERATURE_TOKEN_RANGE: std::ops::Range<usize> = 7..9;

// =============================================================================
// Archive Layout
// =============================================================================

/// Daily file path relative to a month directory. `{date}` expands to the
/// ISO date of the file (e.g. `2020-02-03`).
pub const DAILY_FILE_TEMPLATE: &str = "gracefo_1A_{date}_RL04.ascii.noLRI/TNK1A_{date}_C_04.txt";

/// Filename prefix used when scanning a directory for telemetry files.
pub const TELEMETRY_FILE_PREFIX: &str = "TNK1A_";

// =============================================================================
// Physical Constants (N2 cold-gas tanks)
// =============================================================================

/// Internal volume of each fuel tank, litres.
pub const TANK_VOLUME_L: f64 = 52.0;

/// Van der Waals attraction constant for N2, bar·L²/mol².
pub const VDW_ATTRACTION_N2: f64 = 1.370;

/// Van der Waals repulsion (co-volume) constant for N2, L/mol.
pub const VDW_REPULSION_N2: f64 = 0.0387;

/// Universal gas constant, bar·L/(mol·K).
pub const GAS_CONSTANT: f64 = 0.08314;

/// Molar mass of N2, g/mol.
pub const MOLAR_MASS_N2: f64 = 28.006148008;

/// Offset from Celsius to Kelvin.
pub const KELVIN_OFFSET: f64 = 273.15;

// =============================================================================
// Solver Defaults
// =============================================================================

/// Initial Newton-Raphson guess for molar quantity, mol.
pub const DEFAULT_INITIAL_GUESS_MOL: f64 = 0.5;

/// Absolute convergence tolerance on the Newton step, mol.
pub const DEFAULT_SOLVER_TOLERANCE: f64 = 1e-8;

/// Maximum Newton-Raphson iterations before a record is declared
/// non-convergent.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
