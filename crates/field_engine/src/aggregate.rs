//! Volumetric aggregation of interpolated fields.
//!
//! Turns per-point interpolated values into the numbers the badges show:
//! value range, volumetric average, and the physical masses derived from
//! the exact mesh volume. Values are clamped into the range observed at
//! the anchors before averaging; interpolation overshoot outside the
//! anchors' convex hull is suppressed, a bounding decision rather than a
//! numerical accident.

use crate::physics;

/// Aggregated field statistics over the accepted lattice subset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSummary {
  /// Minimum value after clamping.
  pub min: f64,
  /// Maximum value after clamping.
  pub max: f64,
  /// Mean over accepted points; `None` when the accepted set is empty.
  pub volumetric_average: Option<f64>,
}

/// Clamp every value into the anchor-observed `[min, max]` range.
pub fn clamp_to_anchor_range(values: &mut [f64], anchor_min: f64, anchor_max: f64) {
  for v in values.iter_mut() {
    *v = v.clamp(anchor_min, anchor_max);
  }
}

/// Arithmetic mean; `None` for an empty slice.
pub fn volumetric_average(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    return None;
  }
  Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Clamp in place and summarize.
pub fn summarize(values: &mut [f64], anchor_min: f64, anchor_max: f64) -> FieldSummary {
  clamp_to_anchor_range(values, anchor_min, anchor_max);
  let average = volumetric_average(values);

  let mut min = f64::INFINITY;
  let mut max = f64::NEG_INFINITY;
  for &v in values.iter() {
    min = min.min(v);
    max = max.max(v);
  }
  if values.is_empty() {
    min = anchor_min;
    max = anchor_max;
  }

  FieldSummary {
    min,
    max,
    volumetric_average: average,
  }
}

/// Mass of the air filling the habitable volume, in kg.
///
/// `None` when the volumetric temperature/humidity averages are missing
/// (empty accepted set).
pub fn air_mass_kg(
  avg_temperature_c: Option<f64>,
  avg_relative_humidity: Option<f64>,
  volume_m3: f64,
) -> Option<f64> {
  let t = avg_temperature_c?;
  let rh = avg_relative_humidity?;
  let density = physics::moist_air_density(t, rh, physics::STANDARD_PRESSURE_PA);
  Some(density * volume_m3)
}

/// Mass of the water vapor held in the volume, in kg.
///
/// Vapor density (absolute humidity) is g/m³, hence the scale factor.
pub fn water_mass_kg(avg_absolute_humidity_g_m3: Option<f64>, volume_m3: f64) -> Option<f64> {
  let ah = avg_absolute_humidity_g_m3?;
  Some(ah * volume_m3 / 1000.0)
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod aggregate_test;
