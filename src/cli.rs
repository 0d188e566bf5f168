//! Command-line interface components.

use crate::config::{GasTankConfig, ProcessingWindow};
use crate::error::Result;
use chrono::NaiveDate;
use clap::Parser;
use std::path::{Path, PathBuf};

/// CLI arguments for the tank telemetry processor
///
/// Estimates daily propellant mass for the two GRACE-FO cold-gas tanks from
/// Level-1A TNK1A telemetry files.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tank-processor",
    version,
    about = "Estimate GRACE-FO propellant tank mass from Level-1A tank telemetry",
    long_about = "Reads daily TNK1A telemetry files for a calendar window, extracts tank \
                  pressure and temperature channels, inverts a Van der Waals equation of \
                  state per record, and writes daily-averaged mass and temperature series \
                  for both tanks to a CSV report."
)]
pub struct Args {
    /// Base directory of the GRACE-FO telemetry archive
    #[arg(value_name = "ARCHIVE_PATH")]
    pub input_path: PathBuf,

    /// Output path for the daily report CSV
    ///
    /// Defaults to daily_tank_report_<start>_<end>.csv next to the archive.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// First day of the processing window (YYYY-MM-DD)
    #[arg(long, default_value = "2020-01-01")]
    pub start_date: NaiveDate,

    /// Last day of the processing window, inclusive (YYYY-MM-DD)
    #[arg(long, default_value = "2020-03-31")]
    pub end_date: NaiveDate,

    /// Scan the input directory for TNK1A files instead of assuming the
    /// month-per-directory archive layout
    #[arg(long)]
    pub scan: bool,

    /// Tank volume in litres
    #[arg(long, default_value_t = crate::constants::TANK_VOLUME_L)]
    pub tank_volume: f64,

    /// Propellant molar mass in g/mol
    #[arg(long, default_value_t = crate::constants::MOLAR_MASS_N2)]
    pub molar_mass: f64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Processing window from the date arguments.
    pub fn window(&self) -> Result<ProcessingWindow> {
        ProcessingWindow::new(self.start_date, self.end_date)
    }

    /// Gas/tank configuration with CLI overrides applied.
    pub fn gas_config(&self) -> GasTankConfig {
        GasTankConfig {
            volume_l: self.tank_volume,
            molar_mass_g_mol: self.molar_mass,
            ..GasTankConfig::default()
        }
    }

    /// Get the output path, defaulting to a report next to the archive.
    pub fn get_output_path(&self, input_path: &Path) -> PathBuf {
        match &self.output_path {
            Some(path) => path.clone(),
            None => input_path
                .parent()
                .unwrap_or(input_path)
                .join(format!(
                    "daily_tank_report_{}_{}.csv",
                    self.start_date, self.end_date
                )),
        }
    }
}
