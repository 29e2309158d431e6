//! Unit tests for centered window smoothing.

use chrono::{TimeZone, Utc};
use monark_processing::metrics::smoothing::{centered_mean, smooth, MeasurementKind};
use monark_processing::processing::batch::process_attempt;
use monark_processing::{ConfigError, RawAttemptRecord};

fn make_record(values: &[u32]) -> RawAttemptRecord {
    RawAttemptRecord {
        flywheel_log: values
            .iter()
            .map(|v| format!("{:08X}", v.swap_bytes()))
            .collect(),
        attempt: 5,
        created: Utc.timestamp_opt(1_650_000_000, 0).unwrap(),
        first_name: "Tom".to_string(),
        last_name: "Pidcock".to_string(),
        weight: 58.0,
        sampling_magnets: 10000.0 / 52.0,
        brake_weight: 2.5,
        duration: 30.0,
    }
}

/// Ticks of a sprint: gaps shrink, then grow again.
fn sprint_ticks(count: usize) -> Vec<u32> {
    let mut tick = 0u32;
    (0..count)
        .map(|i| {
            let phase = (i as f64 / count as f64 * std::f64::consts::PI).sin();
            tick += (1400.0 - 900.0 * phase) as u32;
            tick
        })
        .collect()
}

#[test]
fn test_centered_values_match_full_recomputation() {
    let series = process_attempt(0, &make_record(&sprint_ticks(600))).unwrap();

    for sample in &series.samples {
        let lower = sample.time_test - 0.5;
        let upper = sample.time_test + 0.5;
        let selected: Vec<_> = series
            .samples
            .iter()
            .filter(|s| s.time_test > lower && s.time_test < upper)
            .collect();
        let sum: f64 = selected
            .iter()
            .fold(0.0, |acc, s| acc + (s.power_brake + s.power_kinetic));
        let expected = ((sum / selected.len() as f64) * 100.0).round_ties_even() / 100.0;

        assert_eq!(sample.power_centered.to_bits(), expected.to_bits());
        assert_eq!(
            sample.power_centered.to_bits(),
            centered_mean(&series.samples, MeasurementKind::Power, sample.time_test).to_bits()
        );
        assert_eq!(
            sample.rpm_centered.to_bits(),
            centered_mean(&series.samples, MeasurementKind::Rpm, sample.time_test).to_bits()
        );
    }
}

#[test]
fn test_centered_values_are_finite_for_regular_ride() {
    let series = process_attempt(0, &make_record(&sprint_ticks(300))).unwrap();

    assert!(series.samples.iter().all(|s| s.power_centered.is_finite()));
    assert!(series.samples.iter().all(|s| s.rpm_centered.is_finite()));
}

#[test]
fn test_smooth_by_name() {
    let series = process_attempt(0, &make_record(&sprint_ticks(100))).unwrap();
    let center = series.samples[10].time_test;

    assert_eq!(
        smooth(&series.samples, "power", center).unwrap(),
        series.samples[10].power_centered
    );
    assert_eq!(
        smooth(&series.samples, "rpm", center).unwrap(),
        series.samples[10].rpm_centered
    );
    assert_eq!(
        smooth(&series.samples, "torque", center),
        Err(ConfigError::UnknownMeasurement("torque".to_string()))
    );
}
