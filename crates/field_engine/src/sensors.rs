//! Sensor anchors and reading selection.
//!
//! Anchors are owned by the ingestion layer; the engine only borrows
//! positions and the reading selected around a query timestamp. Readings
//! are kept time-ascending so selection is a binary search.

use glam::DVec3;

use crate::physics;
use crate::types::Metric;

/// One timestamped measurement from a sensor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
  /// Unix milliseconds.
  pub timestamp_ms: i64,
  /// Air temperature in °C.
  pub temperature_c: f64,
  /// Relative humidity in percent.
  pub relative_humidity: f64,
  /// Vapor density in g/m³.
  pub absolute_humidity: f64,
  /// Dew point in °C.
  pub dew_point_c: f64,
  /// Vapor-pressure deficit in kPa. Older ingest formats omit it.
  pub vpd_kpa: Option<f64>,
}

impl Reading {
  /// Build a reading from the raw pair sensors actually report,
  /// deriving the psychrometric metrics.
  pub fn derive(timestamp_ms: i64, temperature_c: f64, relative_humidity: f64) -> Self {
    Self {
      timestamp_ms,
      temperature_c,
      relative_humidity,
      absolute_humidity: physics::absolute_humidity_g_m3(temperature_c, relative_humidity),
      dew_point_c: physics::dew_point_c(temperature_c, relative_humidity),
      vpd_kpa: Some(physics::vpd_kpa(temperature_c, relative_humidity)),
    }
  }

  /// Extract one metric. A missing VPD is derived on the fly.
  pub fn metric(&self, metric: Metric) -> f64 {
    match metric {
      Metric::Temperature => self.temperature_c,
      Metric::RelativeHumidity => self.relative_humidity,
      Metric::AbsoluteHumidity => self.absolute_humidity,
      Metric::DewPoint => self.dew_point_c,
      Metric::VaporPressureDeficit => self
        .vpd_kpa
        .unwrap_or_else(|| physics::vpd_kpa(self.temperature_c, self.relative_humidity)),
    }
  }
}

/// A fixed sensor position with its reading history.
#[derive(Clone, Debug)]
pub struct SensorAnchor {
  /// Stable identifier from ingestion.
  pub id: String,
  /// Display name.
  pub name: String,
  /// Position in room coordinates (meters).
  pub position: DVec3,
  /// Time-ascending reading sequence.
  pub readings: Vec<Reading>,
}

impl SensorAnchor {
  pub fn new(id: impl Into<String>, name: impl Into<String>, position: DVec3) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      position,
      readings: Vec::new(),
    }
  }

  /// Append a reading, keeping the sequence time-ascending.
  pub fn push_reading(&mut self, reading: Reading) {
    debug_assert!(
      self
        .readings
        .last()
        .is_none_or(|last| last.timestamp_ms <= reading.timestamp_ms),
      "readings must be appended in ascending timestamp order"
    );
    self.readings.push(reading);
  }

  /// The reading closest in time to `timestamp_ms`, or `None` when the
  /// anchor has no readings.
  pub fn reading_at(&self, timestamp_ms: i64) -> Option<&Reading> {
    if self.readings.is_empty() {
      return None;
    }
    let idx = self
      .readings
      .partition_point(|r| r.timestamp_ms < timestamp_ms);
    let after = self.readings.get(idx);
    let before = idx.checked_sub(1).and_then(|i| self.readings.get(i));
    match (before, after) {
      (Some(b), Some(a)) => {
        if (timestamp_ms - b.timestamp_ms) <= (a.timestamp_ms - timestamp_ms) {
          Some(b)
        } else {
          Some(a)
        }
      }
      (Some(b), None) => Some(b),
      (None, a) => a,
    }
  }

  /// Mean reading over a window centered on `timestamp_ms`.
  ///
  /// Falls back to the nearest reading when the window is empty, so a
  /// sparse history still produces a value.
  pub fn reading_smoothed(&self, timestamp_ms: i64, window_ms: i64) -> Option<Reading> {
    if window_ms <= 0 {
      return self.reading_at(timestamp_ms).copied();
    }
    let half = window_ms / 2;
    let lo = self
      .readings
      .partition_point(|r| r.timestamp_ms < timestamp_ms - half);
    let hi = self
      .readings
      .partition_point(|r| r.timestamp_ms <= timestamp_ms + half);
    let slice = &self.readings[lo..hi];
    if slice.is_empty() {
      return self.reading_at(timestamp_ms).copied();
    }

    let n = slice.len() as f64;
    let mut t = 0.0;
    let mut rh = 0.0;
    let mut ah = 0.0;
    let mut dp = 0.0;
    let mut vpd = 0.0;
    for r in slice {
      t += r.temperature_c;
      rh += r.relative_humidity;
      ah += r.absolute_humidity;
      dp += r.dew_point_c;
      vpd += r
        .vpd_kpa
        .unwrap_or_else(|| physics::vpd_kpa(r.temperature_c, r.relative_humidity));
    }
    Some(Reading {
      timestamp_ms,
      temperature_c: t / n,
      relative_humidity: rh / n,
      absolute_humidity: ah / n,
      dew_point_c: dp / n,
      vpd_kpa: Some(vpd / n),
    })
  }
}

/// Position/value pair the interpolators consume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorSample {
  pub position: DVec3,
  pub value: f64,
}

/// Snapshot one metric across all anchors at a timestamp.
///
/// Anchors with no usable reading are skipped; the result may therefore
/// be shorter than `anchors` (or empty; callers check).
pub fn sample_metric(
  anchors: &[SensorAnchor],
  metric: Metric,
  timestamp_ms: i64,
  window_ms: i64,
) -> Vec<AnchorSample> {
  anchors
    .iter()
    .filter_map(|anchor| {
      let reading = anchor.reading_smoothed(timestamp_ms, window_ms)?;
      Some(AnchorSample {
        position: anchor.position,
        value: reading.metric(metric),
      })
    })
    .collect()
}

#[cfg(test)]
#[path = "sensors_test.rs"]
mod sensors_test;
