//! Positional record decoding.
//!
//! Scans the concatenated, header-stripped line stream and classifies each
//! line by token count. Long records (more than 9 whitespace-separated
//! tokens) carry the timestamp and the zenith/nadir temperature pair; the
//! pressure pair for the same record rides on the trailing two tokens of the
//! line immediately preceding the long record. A second, independent series
//! is drawn from the line two back.
//!
//! The decoder maintains a two-line sliding window and never looks ahead, so
//! a single pass over the stream produces all output series.

use crate::constants::{EPOCH_TOKEN_INDEX, LONG_RECORD_TOKEN_THRESHOLD, TEMPERATURE_TOKEN_RANGE};
use crate::models::{DecodedSample, PressureSample};
use tracing::{debug, warn};

/// All series produced by one decoding pass.
///
/// `samples`, `pressures` and `pressures_two_back` are iteration-aligned but
/// may differ in length: the first one or two lines of the stream have no
/// lookback, and a lookback line with non-numeric trailing tokens skips that
/// single pressure sample. The channel splitter resolves the mismatch
/// against the counts recorded here.
#[derive(Debug, Default)]
pub struct DecodedStream {
    /// One entry per long record, in file/record order.
    pub samples: Vec<DecodedSample>,
    /// Pressure pairs from the line one before each long record.
    pub pressures: Vec<PressureSample>,
    /// Pressure pairs from the line two before each long record.
    pub pressures_two_back: Vec<PressureSample>,
    /// First token of every line, long or not (diagnostic epoch series).
    pub total_time: Vec<f64>,
    /// One-lookback pressure samples lost to missing lines or non-numeric
    /// trailing tokens.
    pub skipped_pressures: usize,
    /// Same, for the two-lookback series.
    pub skipped_pressures_two_back: usize,
    /// Total lines scanned.
    pub lines_read: usize,
}

/// Decode a header-stripped line stream into aligned record series.
///
/// `lines` must be in strict chronological, within-day tank-interleaved
/// order across all input files; record order is what assigns records to
/// tanks downstream.
pub fn decode_lines<I, S>(lines: I) -> DecodedStream
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stream = DecodedStream::default();
    let mut previous: Option<String> = None;
    let mut two_back: Option<String> = None;

    for line in lines {
        let line = line.as_ref();
        stream.lines_read += 1;

        let tokens: Vec<&str> = line.split_whitespace().collect();

        // Every line feeds the diagnostic epoch series when its first token
        // is numeric.
        if let Some(epoch) = tokens
            .get(EPOCH_TOKEN_INDEX)
            .and_then(|t| t.parse::<f64>().ok())
        {
            stream.total_time.push(epoch);
        }

        if tokens.len() > LONG_RECORD_TOKEN_THRESHOLD {
            if let Some(sample) = decode_long_record(&tokens) {
                match trailing_pressure_pair(previous.as_deref()) {
                    Some(pressure) => stream.pressures.push(pressure),
                    None => stream.skipped_pressures += 1,
                }
                match trailing_pressure_pair(two_back.as_deref()) {
                    Some(pressure) => stream.pressures_two_back.push(pressure),
                    None => stream.skipped_pressures_two_back += 1,
                }
                stream.samples.push(sample);
            } else {
                warn!(
                    "long record with unparseable timestamp or temperatures: {:?}",
                    line
                );
            }
        }

        two_back = previous.take();
        previous = Some(line.to_string());
    }

    debug!(
        "decoded {} long records from {} lines ({} pressure skips, {} two-back skips)",
        stream.samples.len(),
        stream.lines_read,
        stream.skipped_pressures,
        stream.skipped_pressures_two_back
    );

    stream
}

/// Extract timestamp and temperature pair from a tokenized long record.
fn decode_long_record(tokens: &[&str]) -> Option<DecodedSample> {
    let epoch_seconds = tokens[EPOCH_TOKEN_INDEX].parse::<f64>().ok()?;
    let zenith = tokens[TEMPERATURE_TOKEN_RANGE.start].parse::<f64>().ok()?;
    let nadir = tokens[TEMPERATURE_TOKEN_RANGE.start + 1].parse::<f64>().ok()?;
    Some(DecodedSample {
        epoch_seconds,
        temperature_pair: (zenith, nadir),
    })
}

/// Parse the trailing two tokens of a lookback line as a pressure pair.
///
/// Returns `None` when the line is absent (head of stream), has fewer than
/// two tokens, or either trailing token is non-numeric. The caller counts
/// the skip; it is never fatal.
fn trailing_pressure_pair(line: Option<&str>) -> Option<PressureSample> {
    let tokens: Vec<&str> = line?.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }
    let internal = tokens[tokens.len() - 2].parse::<f64>().ok()?;
    let regulated = tokens[tokens.len() - 1].parse::<f64>().ok()?;
    Some(PressureSample {
        internal,
        regulated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_RECORD: &str = "100.0 a b c d e f 300.0 310.0 g";

    #[test]
    fn test_two_record_scenario() {
        // One short lookback line followed by one long record.
        let lines = ["700.0 5.0 10.0", LONG_RECORD];
        let stream = decode_lines(lines);

        assert_eq!(stream.samples.len(), 1);
        assert_eq!(stream.samples[0].epoch_seconds, 100.0);
        assert_eq!(stream.samples[0].temperature_pair, (300.0, 310.0));

        assert_eq!(stream.pressures.len(), 1);
        assert_eq!(stream.pressures[0].internal, 5.0);
        assert_eq!(stream.pressures[0].regulated, 10.0);

        // No line exists two back from the long record.
        assert!(stream.pressures_two_back.is_empty());
        assert_eq!(stream.skipped_pressures_two_back, 1);
    }

    #[test]
    fn test_long_record_at_stream_head_has_no_lookback() {
        let stream = decode_lines([LONG_RECORD]);
        assert_eq!(stream.samples.len(), 1);
        assert!(stream.pressures.is_empty());
        assert_eq!(stream.skipped_pressures, 1);
        assert_eq!(stream.skipped_pressures_two_back, 1);
    }

    #[test]
    fn test_non_numeric_lookback_skips_single_sample() {
        let lines = [
            "700.0 5.0 10.0",
            LONG_RECORD,
            "710.0 bad tokens",
            LONG_RECORD,
            "720.0 6.0 11.0",
            LONG_RECORD,
        ];
        let stream = decode_lines(lines);

        assert_eq!(stream.samples.len(), 3);
        // The middle long record's lookback failed to parse.
        assert_eq!(stream.pressures.len(), 2);
        assert_eq!(stream.skipped_pressures, 1);
        assert_eq!(stream.pressures[1].internal, 6.0);
    }

    #[test]
    fn test_short_lookback_line_skipped() {
        let lines = ["lone", LONG_RECORD];
        let stream = decode_lines(lines);
        assert_eq!(stream.samples.len(), 1);
        assert!(stream.pressures.is_empty());
        assert_eq!(stream.skipped_pressures, 1);
    }

    #[test]
    fn test_two_back_series_independent_of_one_back() {
        let lines = [
            "700.0 5.0 10.0",
            "710.0 not numeric",
            LONG_RECORD,
        ];
        let stream = decode_lines(lines);
        // One-back fails, two-back succeeds.
        assert!(stream.pressures.is_empty());
        assert_eq!(stream.skipped_pressures, 1);
        assert_eq!(stream.pressures_two_back.len(), 1);
        assert_eq!(stream.pressures_two_back[0].internal, 5.0);
    }

    #[test]
    fn test_total_time_collects_every_numeric_first_token() {
        let lines = ["700.0 5.0 10.0", LONG_RECORD, "text only line"];
        let stream = decode_lines(lines);
        assert_eq!(stream.total_time, vec![700.0, 100.0]);
        assert_eq!(stream.lines_read, 3);
    }

    #[test]
    fn test_exactly_nine_tokens_is_not_a_long_record() {
        let stream = decode_lines(["1.0 2 3 4 5 6 7 8 9"]);
        assert!(stream.samples.is_empty());
        assert_eq!(stream.total_time, vec![1.0]);
    }

    #[test]
    fn test_temperatures_are_finite_for_valid_records() {
        let lines = ["0.0 1.0 2.0", LONG_RECORD, "0.0 1.0 2.0", LONG_RECORD];
        let stream = decode_lines(lines);
        for sample in &stream.samples {
            assert!(sample.epoch_seconds.is_finite());
            assert!(sample.temperature_pair.0.is_finite());
            assert!(sample.temperature_pair.1.is_finite());
        }
    }
}
