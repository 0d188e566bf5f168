//! Real-gas equation-of-state inversion.
//!
//! Recovers the molar quantity of propellant from a pressure/temperature
//! pair by finding the root of a modified Van der Waals cubic with
//! Newton-Raphson. The solver is applied blindly to noisy measurements, so
//! its failure modes are first-class outcomes rather than panics: a
//! vanishing derivative and an exhausted iteration budget both map to a
//! missing value in the mass series.

use crate::config::GasTankConfig;
use tracing::debug;

/// Result of one equation-of-state inversion.
///
/// Only `Converged` carries a value; callers must treat the other variants
/// as missing, never substitute the last iterate or zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverOutcome {
    /// Newton step fell below tolerance.
    Converged { moles: f64, iterations: usize },
    /// The derivative was exactly zero at some iterate.
    DerivativeVanished { iteration: usize },
    /// Iteration cap reached without meeting tolerance.
    IterationsExhausted,
}

impl SolverOutcome {
    /// Converged molar quantity, if any.
    pub fn moles(&self) -> Option<f64> {
        match self {
            SolverOutcome::Converged { moles, .. } => Some(*moles),
            _ => None,
        }
    }
}

/// Counts of solver outcomes across one series.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SolverStats {
    pub converged: usize,
    pub derivative_vanished: usize,
    pub iterations_exhausted: usize,
}

impl SolverStats {
    pub fn failures(&self) -> usize {
        self.derivative_vanished + self.iterations_exhausted
    }
}

/// Van der Waals cubic f(n) whose root is the molar quantity in the tank.
///
/// f(n) = -(a·b/v²)·n³ + (a/v)·n² - (P·b + R·T)·n + P·v
fn eos(config: &GasTankConfig, n: f64, pressure: f64, temp_kelvin: f64) -> f64 {
    let v = config.volume_l;
    let a = config.vdw_attraction;
    let b = config.vdw_repulsion;
    let rt = config.gas_constant * temp_kelvin;

    -(a * b / (v * v)) * n.powi(3) + (a / v) * n.powi(2) - (pressure * b + rt) * n + pressure * v
}

/// Derivative of the cubic with respect to n.
fn eos_prime(config: &GasTankConfig, n: f64, pressure: f64, temp_kelvin: f64) -> f64 {
    let v = config.volume_l;
    let a = config.vdw_attraction;
    let b = config.vdw_repulsion;

    -(3.0 * a * b / (v * v)) * n.powi(2) + (2.0 * a / v) * n
        - pressure * b
        - config.gas_constant * temp_kelvin
}

/// Invert the equation of state for one pressure/temperature pair.
///
/// Pressure in bar, temperature in Kelvin; the returned molar quantity is in
/// mol.
pub fn solve_moles(config: &GasTankConfig, pressure: f64, temp_kelvin: f64) -> SolverOutcome {
    let mut n = config.initial_guess_mol;

    for iteration in 0..config.max_iterations {
        let f = eos(config, n, pressure, temp_kelvin);
        let fp = eos_prime(config, n, pressure, temp_kelvin);
        if fp == 0.0 {
            debug!(
                "derivative vanished at n={} (P={}, T={}), iteration {}",
                n, pressure, temp_kelvin, iteration
            );
            return SolverOutcome::DerivativeVanished { iteration };
        }

        let next = n - f / fp;
        if (next - n).abs() < config.tolerance {
            return SolverOutcome::Converged {
                moles: next,
                iterations: iteration + 1,
            };
        }
        n = next;
    }

    SolverOutcome::IterationsExhausted
}

/// Convert a molar quantity to propellant mass in kilograms.
pub fn moles_to_mass_kg(config: &GasTankConfig, moles: f64) -> f64 {
    moles * config.molar_mass_g_mol / 1000.0
}

/// Estimate the per-record mass series for one tank.
///
/// `pressures` and `temps_kelvin` are index-aligned; the output has the same
/// length, with `None` marking records whose inversion failed.
pub fn estimate_mass_series(
    config: &GasTankConfig,
    pressures: &[f64],
    temps_kelvin: &[f64],
) -> (Vec<Option<f64>>, SolverStats) {
    let mut stats = SolverStats::default();
    let masses = pressures
        .iter()
        .zip(temps_kelvin.iter())
        .map(|(&pressure, &temp)| match solve_moles(config, pressure, temp) {
            SolverOutcome::Converged { moles, .. } => {
                stats.converged += 1;
                Some(moles_to_mass_kg(config, moles))
            }
            SolverOutcome::DerivativeVanished { .. } => {
                stats.derivative_vanished += 1;
                None
            }
            SolverOutcome::IterationsExhausted => {
                stats.iterations_exhausted += 1;
                None
            }
        })
        .collect();

    (masses, stats)
}
