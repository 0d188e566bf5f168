//! Daily aggregation of per-record series.
//!
//! Partitions a flat per-record series into fixed-size daily buckets and
//! reduces each bucket to a mean. The day count comes from the calendar
//! window, never from the data: bucket size is the floor of records per day,
//! and trailing remainder records are dropped. Both the drop and any missing
//! records inside a bucket are surfaced in the result.

use crate::error::{Result, TankError};
use crate::models::DailySeries;
use tracing::{debug, warn};

/// Reduce a per-record series to one mean per calendar day.
///
/// Missing records (`None`) are excluded from their bucket's mean and
/// counted; a bucket of only missing records yields a missing daily value.
/// Fails with [`TankError::InsufficientData`] when the series cannot fill
/// even one record per day.
pub fn daily_means(series: &str, values: &[Option<f64>], num_days: usize) -> Result<DailySeries> {
    if num_days == 0 {
        return Err(TankError::configuration(
            "daily aggregation requires at least one day",
        ));
    }

    let records_per_day = values.len() / num_days;
    if records_per_day == 0 {
        return Err(TankError::InsufficientData {
            series: series.to_string(),
            records: values.len(),
            days: num_days,
        });
    }

    let dropped_records = values.len() - records_per_day * num_days;
    if dropped_records > 0 {
        warn!(
            "{}: dropping {} trailing records that do not fill a day ({} records over {} days)",
            series,
            dropped_records,
            values.len(),
            num_days
        );
    }

    let mut daily = Vec::with_capacity(num_days);
    let mut missing_records = 0;

    for day in 0..num_days {
        let start = day * records_per_day;
        let bucket = &values[start..start + records_per_day];

        let present: Vec<f64> = bucket.iter().flatten().copied().collect();
        missing_records += bucket.len() - present.len();

        if present.is_empty() {
            daily.push(None);
        } else {
            daily.push(Some(present.iter().sum::<f64>() / present.len() as f64));
        }
    }

    debug!(
        "{}: {} days x {} records, {} dropped, {} missing",
        series, num_days, records_per_day, dropped_records, missing_records
    );

    Ok(DailySeries {
        values: daily,
        records_per_day,
        dropped_records,
        missing_records,
    })
}

/// Convenience wrapper for series with no missing values (temperatures).
pub fn daily_means_complete(series: &str, values: &[f64], num_days: usize) -> Result<DailySeries> {
    let wrapped: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    daily_means(series, &wrapped, num_days)
}
