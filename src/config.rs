//! Configuration management and validation.
//!
//! Physical tank/gas parameters and the processing calendar window are
//! explicit configuration records rather than ambient globals, so the solver
//! can be exercised with alternative gases and tank geometries.

use crate::constants::{
    DEFAULT_INITIAL_GUESS_MOL, DEFAULT_MAX_ITERATIONS, DEFAULT_SOLVER_TOLERANCE, GAS_CONSTANT,
    MOLAR_MASS_N2, TANK_VOLUME_L, VDW_ATTRACTION_N2, VDW_REPULSION_N2,
};
use crate::error::{Result, TankError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Physical constants of one gas tank plus the root-finder settings used to
/// invert the equation of state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GasTankConfig {
    /// Tank internal volume, litres.
    pub volume_l: f64,
    /// Van der Waals attraction constant, bar·L²/mol².
    pub vdw_attraction: f64,
    /// Van der Waals repulsion constant, L/mol.
    pub vdw_repulsion: f64,
    /// Gas constant, bar·L/(mol·K).
    pub gas_constant: f64,
    /// Molar mass of the propellant, g/mol.
    pub molar_mass_g_mol: f64,
    /// Initial Newton-Raphson guess, mol.
    pub initial_guess_mol: f64,
    /// Absolute convergence tolerance on the Newton step, mol.
    pub tolerance: f64,
    /// Iteration cap before a record is declared non-convergent.
    pub max_iterations: usize,
}

impl Default for GasTankConfig {
    /// N2 cold-gas tank parameters of the GRACE-FO attitude control system.
    fn default() -> Self {
        Self {
            volume_l: TANK_VOLUME_L,
            vdw_attraction: VDW_ATTRACTION_N2,
            vdw_repulsion: VDW_REPULSION_N2,
            gas_constant: GAS_CONSTANT,
            molar_mass_g_mol: MOLAR_MASS_N2,
            initial_guess_mol: DEFAULT_INITIAL_GUESS_MOL,
            tolerance: DEFAULT_SOLVER_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl GasTankConfig {
    /// Validate physical plausibility of the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.volume_l <= 0.0 {
            return Err(TankError::configuration(format!(
                "tank volume must be positive, got {}",
                self.volume_l
            )));
        }
        if self.gas_constant <= 0.0 {
            return Err(TankError::configuration(format!(
                "gas constant must be positive, got {}",
                self.gas_constant
            )));
        }
        if self.molar_mass_g_mol <= 0.0 {
            return Err(TankError::configuration(format!(
                "molar mass must be positive, got {}",
                self.molar_mass_g_mol
            )));
        }
        if self.tolerance <= 0.0 || !self.tolerance.is_finite() {
            return Err(TankError::configuration(format!(
                "solver tolerance must be a positive finite value, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(TankError::configuration(
                "solver iteration cap must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Calendar window the processor aggregates over.
///
/// The day count is fixed by this window, never derived from the amount of
/// input data (ragged input truncates against it instead).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProcessingWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ProcessingWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(TankError::configuration(format!(
                "window end {} precedes start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Number of calendar days in the window, both endpoints inclusive.
    pub fn num_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Iterate the dates of the window in chronological order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take(self.num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gas_config_is_valid() {
        let config = GasTankConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.volume_l, 52.0);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_invalid_gas_config_rejected() {
        let mut config = GasTankConfig::default();
        config.volume_l = 0.0;
        assert!(config.validate().is_err());

        let mut config = GasTankConfig::default();
        config.max_iterations = 0;
        assert!(config.validate().is_err());

        let mut config = GasTankConfig::default();
        config.tolerance = -1e-8;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_window_day_count() {
        let window = ProcessingWindow::new(
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 3, 31).unwrap(),
        )
        .unwrap();
        // 31 + 29 + 31 days for Jan-Mar 2020 (leap year).
        assert_eq!(window.num_days(), 91);

        let single = ProcessingWindow::new(
            NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
        )
        .unwrap();
        assert_eq!(single.num_days(), 1);
    }

    #[test]
    fn test_window_rejects_reversed_dates() {
        let result = ProcessingWindow::new(
            NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_window_dates_iteration() {
        let window = ProcessingWindow::new(
            NaiveDate::from_ymd_opt(2020, 2, 28).unwrap(),
            NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
        )
        .unwrap();
        let dates: Vec<_> = window.dates().collect();
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
    }
}
