//! Channel splitting and tank re-association.
//!
//! Pairs the decoded temperature records with their lookback pressure
//! samples, partitions them between the two tanks by record parity, and
//! derives the per-record average temperature in Kelvin.

use crate::constants::KELVIN_OFFSET;
use crate::error::{Result, TankError};
use crate::models::{DecodedSample, PressureSample, TankChannelSeries, TankId};
use tracing::warn;

/// Decoded/pressure series truncated to a common length, ready for parity
/// splitting.
#[derive(Debug)]
pub struct AlignedSeries<'a> {
    pub samples: &'a [DecodedSample],
    pub pressures: &'a [PressureSample],
}

/// Pair the decoded samples with the one-lookback pressure series.
///
/// The two series may legitimately differ in length: a long record at the
/// very head of the stream has no lookback line, and each counted parse skip
/// removes one pressure sample. Within that explainable margin the series
/// are truncated to the shorter length; anything beyond it means the pairing
/// invariant is broken and the run must not continue (a silent zip here
/// would assign pressures to the wrong records, and therefore to the wrong
/// tanks).
pub fn align<'a>(
    samples: &'a [DecodedSample],
    pressures: &'a [PressureSample],
    skipped_pressures: usize,
) -> Result<AlignedSeries<'a>> {
    if pressures.len() > samples.len() {
        return Err(TankError::SeriesMisaligned {
            decoded: samples.len(),
            pressures: pressures.len(),
            skipped: skipped_pressures,
        });
    }

    // Every missing pressure sample must be accounted for by a counted skip
    // (head-of-stream lookbacks or non-numeric trailing tokens).
    let deficit = samples.len() - pressures.len();
    if deficit > skipped_pressures {
        return Err(TankError::SeriesMisaligned {
            decoded: samples.len(),
            pressures: pressures.len(),
            skipped: skipped_pressures,
        });
    }

    if deficit > 0 {
        warn!(
            "truncating {} decoded samples to {} paired pressure samples ({} skips)",
            samples.len(),
            pressures.len(),
            skipped_pressures
        );
    }

    let common = pressures.len();
    Ok(AlignedSeries {
        samples: &samples[..common],
        pressures: &pressures[..common],
    })
}

/// Split aligned series between the two tanks by record parity.
///
/// Even indices belong to tank 1, odd to tank 2 (zero-based, strict
/// alternation). Returns the tank 1 series first.
pub fn split_tanks(aligned: &AlignedSeries<'_>) -> (TankChannelSeries, TankChannelSeries) {
    let mut tanks = [empty_series(TankId::Tank1), empty_series(TankId::Tank2)];

    for (index, (sample, pressure)) in aligned
        .samples
        .iter()
        .zip(aligned.pressures.iter())
        .enumerate()
    {
        let series = &mut tanks[index % 2];
        series.internal_pressure.push(pressure.internal);
        series.regulated_pressure.push(pressure.regulated);

        let (zenith, nadir) = sample.temperature_pair;
        series.zenith_temp_celsius.push(zenith);
        series.nadir_temp_celsius.push(nadir);
        series
            .average_temp_kelvin
            .push(celsius_to_kelvin((zenith + nadir) / 2.0));
    }

    let [tank1, tank2] = tanks;
    (tank1, tank2)
}

/// Convert a Celsius reading to Kelvin.
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + KELVIN_OFFSET
}

fn empty_series(tank: TankId) -> TankChannelSeries {
    TankChannelSeries {
        tank,
        internal_pressure: Vec::new(),
        regulated_pressure: Vec::new(),
        zenith_temp_celsius: Vec::new(),
        nadir_temp_celsius: Vec::new(),
        average_temp_kelvin: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(epoch: f64, zenith: f64, nadir: f64) -> DecodedSample {
        DecodedSample {
            epoch_seconds: epoch,
            temperature_pair: (zenith, nadir),
        }
    }

    fn pressure(internal: f64, regulated: f64) -> PressureSample {
        PressureSample {
            internal,
            regulated,
        }
    }

    fn synthetic(n: usize) -> (Vec<DecodedSample>, Vec<PressureSample>) {
        let samples = (0..n)
            .map(|i| sample(i as f64, 20.0 + i as f64, 22.0 + i as f64))
            .collect();
        let pressures = (0..n).map(|i| pressure(i as f64, 100.0 + i as f64)).collect();
        (samples, pressures)
    }

    #[test]
    fn test_parity_split_counts() {
        // N records split ceil(N/2) to tank 1 and floor(N/2) to tank 2.
        for n in [1, 2, 5, 8] {
            let (samples, pressures) = synthetic(n);
            let aligned = align(&samples, &pressures, 0).unwrap();
            let (tank1, tank2) = split_tanks(&aligned);
            assert_eq!(tank1.len(), n.div_ceil(2));
            assert_eq!(tank2.len(), n / 2);
        }
    }

    #[test]
    fn test_split_preserves_record_order_and_fields() {
        let (samples, pressures) = synthetic(4);
        let aligned = align(&samples, &pressures, 0).unwrap();
        let (tank1, tank2) = split_tanks(&aligned);

        assert_eq!(tank1.internal_pressure, vec![0.0, 2.0]);
        assert_eq!(tank1.regulated_pressure, vec![100.0, 102.0]);
        assert_eq!(tank2.internal_pressure, vec![1.0, 3.0]);
        assert_eq!(tank1.zenith_temp_celsius, vec![20.0, 22.0]);
        assert_eq!(tank2.nadir_temp_celsius, vec![23.0, 25.0]);
    }

    #[test]
    fn test_average_temperature_in_kelvin() {
        let samples = vec![sample(0.0, 20.0, 22.0)];
        let pressures = vec![pressure(5.0, 10.0)];
        let aligned = align(&samples, &pressures, 0).unwrap();
        let (tank1, _) = split_tanks(&aligned);
        assert_eq!(tank1.average_temp_kelvin, vec![21.0 + 273.15]);
    }

    #[test]
    fn test_single_record_goes_to_tank1() {
        let samples = vec![sample(100.0, 300.0, 310.0)];
        let pressures = vec![pressure(5.0, 10.0)];
        let aligned = align(&samples, &pressures, 0).unwrap();
        let (tank1, tank2) = split_tanks(&aligned);
        assert_eq!(tank1.len(), 1);
        assert!(tank2.is_empty());
        assert_eq!(tank1.tank, TankId::Tank1);
    }

    #[test]
    fn test_align_truncates_within_explained_deficit() {
        let (samples, mut pressures) = synthetic(4);
        pressures.truncate(3);
        let aligned = align(&samples, &pressures, 1).unwrap();
        assert_eq!(aligned.samples.len(), 3);
        assert_eq!(aligned.pressures.len(), 3);
    }

    #[test]
    fn test_align_rejects_unexplained_deficit() {
        let (samples, mut pressures) = synthetic(6);
        pressures.truncate(3);
        let err = align(&samples, &pressures, 1).unwrap_err();
        assert!(matches!(err, TankError::SeriesMisaligned { .. }));
    }

    #[test]
    fn test_align_rejects_excess_pressures() {
        let (samples, pressures) = synthetic(3);
        let err = align(&samples[..2], &pressures, 0).unwrap_err();
        assert!(matches!(
            err,
            TankError::SeriesMisaligned {
                decoded: 2,
                pressures: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_tank_id_parity() {
        assert_eq!(TankId::from_record_index(0), TankId::Tank1);
        assert_eq!(TankId::from_record_index(1), TankId::Tank2);
        assert_eq!(TankId::from_record_index(2), TankId::Tank1);
    }
}
