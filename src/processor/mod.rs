//! Batch processing engine.
//!
//! Orchestrates the complete telemetry workflow: daily file discovery,
//! header stripping, record decoding, tank channel splitting, equation-of-
//! state inversion, daily aggregation, and results writing. The pipeline is
//! a single-threaded synchronous batch; every per-record computation is a
//! pure function of its own inputs, so output is independent of evaluation
//! order.

pub mod discovery;
pub mod writer;

use self::discovery::FileDiscovery;

use crate::aggregate::{daily_means, daily_means_complete};
use crate::channels::{align, split_tanks};
use crate::config::{GasTankConfig, ProcessingWindow};
use crate::decoder::decode_lines;
use crate::error::{Result, TankError};
use crate::header::read_data_lines;
use crate::models::{ProcessingStats, TankChannelSeries};
use crate::solver::estimate_mass_series;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// How daily input files are located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryMode {
    /// Enumerate the GRACE-FO archive layout for every day of the window.
    Archive,
    /// Recursively scan the input directory for TNK1A files.
    Scan,
}

/// Main processor for one calendar window of tank telemetry.
#[derive(Debug)]
pub struct TelemetryProcessor {
    input_dir: PathBuf,
    output_path: PathBuf,
    window: ProcessingWindow,
    gas: GasTankConfig,
    mode: DiscoveryMode,
}

impl TelemetryProcessor {
    /// Create a processor, validating the configuration up front.
    pub fn new(
        input_dir: PathBuf,
        output_path: PathBuf,
        window: ProcessingWindow,
        gas: GasTankConfig,
        mode: DiscoveryMode,
    ) -> Result<Self> {
        gas.validate()?;
        if !input_dir.is_dir() {
            return Err(TankError::configuration(format!(
                "input directory does not exist: {}",
                input_dir.display()
            )));
        }
        Ok(Self {
            input_dir,
            output_path,
            window,
            gas,
            mode,
        })
    }

    /// Run the full pipeline and write the daily report.
    pub fn run(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        println!("{}", "Starting tank telemetry processing".bright_green().bold());
        println!("  {} {}", "Archive:".bright_cyan(), self.input_dir.display());
        println!(
            "  {} {} to {} ({} days)",
            "Window:".bright_cyan(),
            self.window.start,
            self.window.end,
            self.window.num_days()
        );
        println!("  {} {}", "Output:".bright_cyan(), self.output_path.display());

        // Step 1: locate the daily files in strict chronological order.
        let files = self.discover_files()?;
        println!(
            "\n  {} {} telemetry files",
            "Found".bright_green(),
            files.len().to_string().bright_white().bold()
        );

        // Step 2: read and header-strip every file, concatenating the data
        // lines in path order. Order is load-bearing: record parity assigns
        // records to tanks.
        let pb = create_progress_bar(files.len() as u64);
        let mut all_lines = Vec::new();
        for path in &files {
            all_lines.extend(read_data_lines(path)?);
            pb.inc(1);
        }
        pb.finish_and_clear();
        info!("read {} data lines from {} files", all_lines.len(), files.len());

        // Step 3: decode the concatenated stream.
        let stream = decode_lines(all_lines.iter());
        debug!(
            "diagnostic epoch series covers {} of {} lines",
            stream.total_time.len(),
            stream.lines_read
        );
        debug!(
            "two-back pressure series: {} samples ({} skips); only the one-back series feeds the mass estimate",
            stream.pressures_two_back.len(),
            stream.skipped_pressures_two_back
        );

        // Step 4: pair pressures with temperature records and split by tank.
        let aligned = align(&stream.samples, &stream.pressures, stream.skipped_pressures)?;
        let (tank1, tank2) = split_tanks(&aligned);
        println!(
            "  {} {} records decoded ({} tank 1, {} tank 2)",
            "Decoded".bright_green(),
            aligned.samples.len().to_string().bright_white().bold(),
            tank1.len(),
            tank2.len()
        );

        // Step 5: invert the equation of state per record.
        let (mass1, solver1) = self.estimate_masses(&tank1);
        let (mass2, solver2) = self.estimate_masses(&tank2);
        if solver1.failures() + solver2.failures() > 0 {
            println!(
                "  {} {} records failed equation-of-state inversion",
                "Warning:".bright_yellow(),
                (solver1.failures() + solver2.failures()).to_string().bright_yellow()
            );
        }

        // Step 6: reduce to daily means over the fixed window.
        let num_days = self.window.num_days();
        let daily_mass1 = daily_means("tank1 mass", &mass1, num_days)?;
        let daily_mass2 = daily_means("tank2 mass", &mass2, num_days)?;
        let daily_temp1 =
            daily_means_complete("tank1 temperature", &tank1.average_temp_kelvin, num_days)?;
        let daily_temp2 =
            daily_means_complete("tank2 temperature", &tank2.average_temp_kelvin, num_days)?;

        // Step 7: persist the report.
        writer::write_daily_report(
            &self.output_path,
            &self.window,
            &daily_mass1,
            &daily_mass2,
            &daily_temp1,
            &daily_temp2,
        )?;

        let stats = ProcessingStats {
            files_processed: files.len(),
            lines_read: stream.lines_read,
            long_records: stream.samples.len(),
            pressure_samples_skipped: stream.skipped_pressures,
            solver_failures_tank1: solver1.failures(),
            solver_failures_tank2: solver2.failures(),
            records_dropped_tank1: daily_mass1.dropped_records,
            records_dropped_tank2: daily_mass2.dropped_records,
            output_path: self.output_path.clone(),
            processing_time_ms: start_time.elapsed().as_millis(),
        };
        self.print_summary(&stats);

        Ok(stats)
    }

    fn discover_files(&self) -> Result<Vec<PathBuf>> {
        let discovery = FileDiscovery::new(self.input_dir.clone());
        let files = match self.mode {
            DiscoveryMode::Archive => discovery.archive_files(&self.window)?,
            DiscoveryMode::Scan => discovery.scan_files()?,
        };
        if files.is_empty() {
            return Err(TankError::configuration(format!(
                "no telemetry files found under {}",
                self.input_dir.display()
            )));
        }
        Ok(files)
    }

    fn estimate_masses(
        &self,
        tank: &TankChannelSeries,
    ) -> (Vec<Option<f64>>, crate::solver::SolverStats) {
        estimate_mass_series(&self.gas, &tank.internal_pressure, &tank.average_temp_kelvin)
    }

    fn print_summary(&self, stats: &ProcessingStats) {
        println!("\n{}", "Processing Summary".bright_green().bold());
        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            stats.processing_time_ms.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Files processed:".bright_cyan(),
            stats.files_processed.to_string().bright_white()
        );
        println!(
            "  {} {} long records from {} lines",
            "Records:".bright_cyan(),
            stats.long_records.to_string().bright_white().bold(),
            stats.lines_read
        );
        if stats.pressure_samples_skipped > 0 {
            println!(
                "  {} {}",
                "Pressure samples skipped:".bright_yellow(),
                stats.pressure_samples_skipped.to_string().bright_yellow()
            );
        }
        let solver_failures = stats.solver_failures_tank1 + stats.solver_failures_tank2;
        if solver_failures > 0 {
            println!(
                "  {} {} (tank 1: {}, tank 2: {})",
                "Solver failures:".bright_red(),
                solver_failures.to_string().bright_red().bold(),
                stats.solver_failures_tank1,
                stats.solver_failures_tank2
            );
        }
        let dropped = stats.records_dropped_tank1 + stats.records_dropped_tank2;
        if dropped > 0 {
            println!(
                "  {} {} trailing records outside daily buckets",
                "Dropped:".bright_yellow(),
                dropped.to_string().bright_yellow()
            );
        }
        println!(
            "  {} {}",
            "Report:".bright_cyan(),
            stats.output_path.display().to_string().bright_white()
        );
    }
}

/// Progress bar over input files.
fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Reading telemetry files");
    pb
}
