use glam::DVec3;

use super::*;

fn anchor_with_readings(timestamps: &[i64]) -> SensorAnchor {
  let mut anchor = SensorAnchor::new("s1", "desk", DVec3::ZERO);
  for (i, &ts) in timestamps.iter().enumerate() {
    anchor.push_reading(Reading::derive(ts, 20.0 + i as f64, 50.0));
  }
  anchor
}

#[test]
fn reading_at_picks_nearest() {
  let anchor = anchor_with_readings(&[0, 1000, 2000]);

  assert_eq!(anchor.reading_at(0).unwrap().timestamp_ms, 0);
  assert_eq!(anchor.reading_at(400).unwrap().timestamp_ms, 0);
  assert_eq!(anchor.reading_at(600).unwrap().timestamp_ms, 1000);
  assert_eq!(anchor.reading_at(99_999).unwrap().timestamp_ms, 2000);
}

#[test]
fn reading_at_empty_history() {
  let anchor = SensorAnchor::new("s1", "desk", DVec3::ZERO);
  assert!(anchor.reading_at(0).is_none());
}

#[test]
fn smoothed_averages_window() {
  let anchor = anchor_with_readings(&[0, 1000, 2000, 3000]);

  // Window [0, 2000] covers temperatures 20, 21, 22.
  let smoothed = anchor.reading_smoothed(1000, 2000).unwrap();
  assert!((smoothed.temperature_c - 21.0).abs() < 1e-12);
}

#[test]
fn smoothed_falls_back_to_nearest_outside_window() {
  let anchor = anchor_with_readings(&[0, 1000]);

  // Window around t=50_000 contains nothing; nearest is t=1000 (21 °C).
  let smoothed = anchor.reading_smoothed(50_000, 100).unwrap();
  assert!((smoothed.temperature_c - 21.0).abs() < 1e-12);
}

#[test]
fn zero_window_is_nearest() {
  let anchor = anchor_with_readings(&[0, 1000]);
  let r = anchor.reading_smoothed(900, 0).unwrap();
  assert_eq!(r.timestamp_ms, 1000);
}

#[test]
fn sample_metric_skips_empty_anchors() {
  let full = anchor_with_readings(&[0]);
  let empty = SensorAnchor::new("s2", "corner", DVec3::splat(1.0));

  let samples = sample_metric(&[full, empty], Metric::Temperature, 0, 0);
  assert_eq!(samples.len(), 1);
  assert!((samples[0].value - 20.0).abs() < 1e-12);
}

#[test]
fn derived_metrics_consistent() {
  let r = Reading::derive(0, 20.0, 100.0);
  // At saturation the dew point equals the air temperature.
  assert!((r.dew_point_c - 20.0).abs() < 1e-9);
  assert!(r.vpd_kpa.unwrap().abs() < 1e-12);
  assert_eq!(r.metric(Metric::AbsoluteHumidity), r.absolute_humidity);
}
