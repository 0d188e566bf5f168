//! Daily results writer.
//!
//! Persists the four daily-mean series (mass and temperature per tank) to a
//! CSV file indexed by day-of-window. Missing days serialize as empty
//! fields, never as zero.

use crate::config::ProcessingWindow;
use crate::error::{Result, TankError};
use crate::models::DailySeries;
use std::path::Path;
use tracing::debug;

/// Write the daily-mean series to `path` as CSV.
///
/// All four series must span the window's day count.
pub fn write_daily_report(
    path: &Path,
    window: &ProcessingWindow,
    tank1_mass: &DailySeries,
    tank2_mass: &DailySeries,
    tank1_temp: &DailySeries,
    tank2_temp: &DailySeries,
) -> Result<()> {
    let num_days = window.num_days();
    for (name, series) in [
        ("tank1 mass", tank1_mass),
        ("tank2 mass", tank2_mass),
        ("tank1 temperature", tank1_temp),
        ("tank2 temperature", tank2_temp),
    ] {
        if series.values.len() != num_days {
            return Err(TankError::configuration(format!(
                "{} series has {} days, window has {}",
                name,
                series.values.len(),
                num_days
            )));
        }
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "day",
        "date",
        "tank1_mass_kg",
        "tank2_mass_kg",
        "tank1_temp_k",
        "tank2_temp_k",
    ])?;

    for (day, date) in window.dates().enumerate() {
        writer.write_record([
            (day + 1).to_string(),
            date.format("%Y-%m-%d").to_string(),
            format_value(tank1_mass.values[day]),
            format_value(tank2_mass.values[day]),
            format_value(tank1_temp.values[day]),
            format_value(tank2_temp.values[day]),
        ])?;
    }

    writer.flush()?;
    debug!("wrote {} daily rows to {}", num_days, path.display());
    Ok(())
}

/// Format a daily value, with missing values as an empty field.
fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.9}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn series(values: Vec<Option<f64>>) -> DailySeries {
        DailySeries {
            values,
            records_per_day: 1,
            dropped_records: 0,
            missing_records: 0,
        }
    }

    fn two_day_window() -> ProcessingWindow {
        ProcessingWindow::new(
            NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_write_report_with_missing_value() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out").join("daily.csv");
        let window = two_day_window();

        write_daily_report(
            &path,
            &window,
            &series(vec![Some(15.5), None]),
            &series(vec![Some(15.25), Some(15.125)]),
            &series(vec![Some(293.15), Some(294.15)]),
            &series(vec![Some(292.15), Some(293.65)]),
        )
        .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "day,date,tank1_mass_kg,tank2_mass_kg,tank1_temp_k,tank2_temp_k"
        );
        assert!(lines[1].starts_with("1,2020-02-01,15.500000000,"));
        // Missing tank1 mass on day 2 is an empty field, not zero.
        assert!(lines[2].starts_with("2,2020-02-02,,15.125000000,"));
    }

    #[test]
    fn test_series_length_mismatch_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("daily.csv");
        let window = two_day_window();
        let short = series(vec![Some(1.0)]);
        let full = series(vec![Some(1.0), Some(2.0)]);

        let err = write_daily_report(&path, &window, &short, &full, &full, &full).unwrap_err();
        assert!(matches!(err, TankError::Configuration { .. }));
    }
}
