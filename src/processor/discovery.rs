//! Daily telemetry file discovery.
//!
//! GRACE-FO Level-1A products live in a month-per-directory archive:
//!
//! ```text
//! archive/
//!   February_2020/
//!     gracefo_1A_2020-02-01_RL04.ascii.noLRI/
//!       TNK1A_2020-02-01_C_04.txt
//!     gracefo_1A_2020-02-02_RL04.ascii.noLRI/
//!       TNK1A_2020-02-02_C_04.txt
//! ```
//!
//! The primary mode enumerates one path per calendar day of the processing
//! window and fails on the first missing file: downstream tank assignment
//! depends on record parity across the whole concatenated input, so a
//! silently skipped day would corrupt every later record. A scan mode is
//! available for flat directories of telemetry files.

use crate::config::ProcessingWindow;
use crate::constants::{DAILY_FILE_TEMPLATE, TELEMETRY_FILE_PREFIX};
use crate::error::{Result, TankError};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// File discovery over a telemetry archive directory.
#[derive(Debug)]
pub struct FileDiscovery {
    base_dir: PathBuf,
}

impl FileDiscovery {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Archive path of the daily file for `date`.
    pub fn daily_path(&self, date: NaiveDate) -> PathBuf {
        let month_dir = date.format("%B_%Y").to_string();
        let relative = DAILY_FILE_TEMPLATE.replace("{date}", &date.format("%Y-%m-%d").to_string());
        self.base_dir.join(month_dir).join(relative)
    }

    /// Enumerate the daily files of a processing window in chronological
    /// order, verifying that every file exists.
    pub fn archive_files(&self, window: &ProcessingWindow) -> Result<Vec<PathBuf>> {
        let mut files = Vec::with_capacity(window.num_days());
        for date in window.dates() {
            let path = self.daily_path(date);
            if !path.is_file() {
                return Err(TankError::FileNotFound { path });
            }
            files.push(path);
        }
        debug!(
            "enumerated {} daily files under {}",
            files.len(),
            self.base_dir.display()
        );
        Ok(files)
    }

    /// Scan the base directory for telemetry files, sorted by file name.
    ///
    /// File names embed the ISO date, so lexicographic order is
    /// chronological order.
    pub fn scan_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.base_dir).follow_links(true) {
            let entry = entry.map_err(|e| {
                TankError::configuration(format!(
                    "failed to scan {}: {}",
                    self.base_dir.display(),
                    e
                ))
            })?;
            if entry.file_type().is_file() && is_telemetry_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
        files.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
        debug!(
            "scanned {} telemetry files under {}",
            files.len(),
            self.base_dir.display()
        );
        Ok(files)
    }
}

/// Check whether a path looks like a TNK1A telemetry file.
fn is_telemetry_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.starts_with(TELEMETRY_FILE_PREFIX) && name.ends_with(".txt"))
}
