//! Integration tests for batch processing.
//!
//! Runs whole input tables through decoding, kinematics and smoothing.

use monark_processing::export::{export_csv, ExportOptions};
use monark_processing::processing::progress::{NullProgress, Stage};
use monark_processing::storage::parse_records;
use monark_processing::{process_batch, ConfigError, ProcessingError, RawAttemptRecord};

/// Build one input row as the host would deliver it.
fn bout_json(attempt: i64, ticks: &[u32], sampling_magnets: f64) -> String {
    let log: String = ticks
        .iter()
        .map(|v| format!("{:08X}", v.swap_bytes()))
        .collect();
    format!(
        r#"{{
            "FlyWheelLog": "{log}",
            "BoutNumber": {attempt},
            "_time": 1700000000,
            "FirstName": "Greg",
            "LastName": "LeMond",
            "PersonWeight": 67.0,
            "SamplingMagnets": {sampling_magnets:?},
            "BrakeWeight": 2.0,
            "Duration": 5.0
        }}"#
    )
}

fn table(rows: &[String]) -> Vec<RawAttemptRecord> {
    parse_records(&format!("[{}]", rows.join(","))).unwrap()
}

fn spaced_ticks(count: u32, spacing: u32) -> Vec<u32> {
    (0..count).map(|i| i * spacing).collect()
}

#[test]
fn test_six_tick_scenario() {
    // 576 ticks = 0.01 s at 57600 Hz, Magnets = 14
    let records = table(&[bout_json(1, &spaced_ticks(6, 576), 10000.0 / 52.0)]);

    let dataset = process_batch(&records, &mut NullProgress).unwrap();

    assert_eq!(dataset.len(), 3);
    let rows: Vec<_> = dataset.rows().collect();
    assert!(rows
        .windows(2)
        .all(|pair| pair[0].sample.time_elapsed <= pair[1].sample.time_elapsed));
    for row in &rows {
        assert_eq!(row.meta.magnets, 14);
        assert!(row.sample.rpm.is_finite());
        assert!(row.sample.power_brake.is_finite());
        assert!(row.sample.power_kinetic.is_finite());
        assert!(row.sample.power_centered.is_finite());
        assert_eq!(row.sample.rpm_centered, 115.0);
    }
    assert_eq!(rows[0].sample.time_recorded, 4.98);
    assert_eq!(rows[2].sample.time_recorded, 5.0);
}

#[test]
fn test_sampling_magnets_10000_rounds_gearing_to_zero() {
    // 14 / (52 * 10000 / 10000) = 0.27, so the gearing constant is 0
    let records = table(&[bout_json(1, &[0, 500, 1100, 1800, 2600, 3500], 10000.0)]);

    let dataset = process_batch(&records, &mut NullProgress).unwrap();

    assert_eq!(dataset.len(), 3);
    assert!(dataset.rows().all(|row| row.meta.magnets == 0));
    assert!(dataset.rows().all(|row| row.sample.rpm.is_infinite()));
}

#[test]
fn test_row_count_sums_over_attempts() {
    let records = table(&[
        bout_json(1, &spaced_ticks(6, 576), 192.3),
        bout_json(2, &spaced_ticks(40, 700), 192.3),
        bout_json(3, &spaced_ticks(3, 700), 192.3),
        bout_json(4, &spaced_ticks(11, 650), 192.3),
    ]);

    let dataset = process_batch(&records, &mut NullProgress).unwrap();

    assert_eq!(dataset.len(), 3 + 37 + 0 + 8);
    let attempts: Vec<i64> = dataset.rows().map(|row| row.meta.attempt).collect();
    let mut sorted = attempts.clone();
    sorted.sort();
    assert_eq!(attempts, sorted);
}

#[test]
fn test_batch_is_idempotent() {
    let records = table(&[
        bout_json(1, &spaced_ticks(30, 576), 192.3),
        bout_json(2, &[0, 900, 1700, 2400, 3000, 3700, 4500, 5400], 192.3),
    ]);

    let first = process_batch(&records, &mut NullProgress).unwrap();
    let second = process_batch(&records, &mut NullProgress).unwrap();

    let options = ExportOptions::default();
    assert_eq!(
        export_csv(&first, &options).unwrap(),
        export_csv(&second, &options).unwrap()
    );
}

#[test]
fn test_zero_sampling_magnets_aborts_batch() {
    let records = table(&[
        bout_json(1, &spaced_ticks(10, 576), 192.3),
        bout_json(2, &spaced_ticks(10, 576), 0.0),
        bout_json(3, &spaced_ticks(10, 576), 192.3),
    ]);
    let mut events = Vec::new();
    let mut sink = |_: &str, stage: Option<Stage>| events.push(stage);

    let result = process_batch(&records, &mut sink);

    match result {
        Err(ProcessingError::Config {
            row,
            attempt,
            field,
            source,
        }) => {
            assert_eq!(row, 1);
            assert_eq!(attempt, 2);
            assert_eq!(field, "SamplingMagnets");
            assert_eq!(source, ConfigError::ZeroSamplingMagnets);
        }
        other => panic!("expected config error, got {:?}", other),
    }
    // Started but never completed
    assert_eq!(events, vec![None]);
}

#[test]
fn test_malformed_log_aborts_batch() {
    let mut bad = bout_json(7, &spaced_ticks(10, 576), 192.3);
    bad = bad.replacen("\"FlyWheelLog\": \"", "\"FlyWheelLog\": \"XY", 1);
    let records = table(&[bout_json(6, &spaced_ticks(10, 576), 192.3), bad]);

    let err = process_batch(&records, &mut NullProgress).unwrap_err();

    assert_eq!(err.attempt(), 7);
    assert_eq!(err.field(), "FlyWheelLog");
    assert!(err.to_string().contains("tick 0"));
}

#[test]
fn test_progress_reported_twice_on_success() {
    let records = table(&[bout_json(1, &spaced_ticks(8, 576), 192.3)]);
    let mut events = Vec::new();
    let mut sink = |message: &str, stage: Option<Stage>| events.push((message.to_string(), stage));

    process_batch(&records, &mut sink).unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].1, None);
    assert_eq!(events[1].1, Some(Stage::new(1, 1)));
}
