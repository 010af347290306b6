//! Interior classification of lattice points.
//!
//! Six-direction parity vote: cast one ray along each axis direction
//! (±X, ±Y, ±Z); a direction votes "inside" when its crossing count is
//! odd. A point is accepted when at least `tolerance` directions agree.
//! Real room scans are rarely watertight: a duct opening or a
//! self-intersecting wall makes any single ray unreliable, which is what
//! the vote absorbs.
//!
//! Points that cannot be resolved (rays grazing edges and returning
//! nonsense counts) simply fail the vote and default to "not accepted".

use glam::DVec3;
use rayon::prelude::*;

use crate::constants::{AXIS_DIRECTIONS, MAX_TOLERANCE, MIN_TOLERANCE};
use crate::error::{FieldError, Result};
use crate::geometry::GeometryIndex;
use crate::types::VolumeMode;

/// Classifier parameters from the configuration surface.
#[derive(Clone, Copy, Debug)]
pub struct ClassifierConfig {
  /// Minimum number of agreeing directions out of 6.
  pub tolerance: u8,
  /// Accept the air volume or the solid complement.
  pub mode: VolumeMode,
}

impl Default for ClassifierConfig {
  fn default() -> Self {
    Self {
      tolerance: 4,
      mode: VolumeMode::HabitableAir,
    }
  }
}

impl ClassifierConfig {
  /// Validate the tolerance range.
  pub fn validate(&self) -> Result<()> {
    if !(MIN_TOLERANCE..=MAX_TOLERANCE).contains(&self.tolerance) {
      return Err(FieldError::ToleranceOutOfRange(self.tolerance));
    }
    Ok(())
  }
}

/// Result of classifying a full point buffer.
#[derive(Clone, Debug, Default)]
pub struct ClassificationOutcome {
  /// Flat xyz buffer of accepted points, in input order.
  pub interior_points: Vec<f32>,
  /// Points examined.
  pub total_processed: usize,
  /// Points accepted.
  pub total_inside: usize,
}

/// Count how many of the six axis directions vote "inside".
#[inline]
pub fn direction_votes(index: &GeometryIndex, point: DVec3) -> u8 {
  let mut votes = 0u8;
  for dir in AXIS_DIRECTIONS {
    if index.parity_inside(point, DVec3::from_array(dir)) {
      votes += 1;
    }
  }
  votes
}

/// Classify a single point.
///
/// With an empty mesh every direction reports zero crossings, so the
/// vote is 0 and air-volume mode rejects the point, so classification
/// degrades to "exterior" rather than erroring.
#[inline]
pub fn classify_point(index: &GeometryIndex, point: DVec3, config: &ClassifierConfig) -> bool {
  let inside = direction_votes(index, point) >= config.tolerance;
  match config.mode {
    VolumeMode::HabitableAir => inside,
    VolumeMode::SolidInterior => !inside,
  }
}

/// Classify a batch of points (flat xyz buffer) in parallel.
///
/// Returns one accept flag per point, in input order.
pub fn classify_batch(
  index: &GeometryIndex,
  points: &[f32],
  config: &ClassifierConfig,
) -> Vec<bool> {
  points
    .par_chunks_exact(3)
    .map(|p| {
      let point = DVec3::new(p[0] as f64, p[1] as f64, p[2] as f64);
      classify_point(index, point, config)
    })
    .collect()
}

/// Classify an entire lattice buffer, invoking `on_progress` after each
/// batch with `(processed, total)`. The worker layer wraps this with
/// message emission and throttling; callers running synchronously can
/// pass a no-op.
pub fn classify_points<F>(
  index: &GeometryIndex,
  points: &[f32],
  config: &ClassifierConfig,
  batch_size: usize,
  mut on_progress: F,
) -> ClassificationOutcome
where
  F: FnMut(usize, usize),
{
  let total = points.len() / 3;
  let mut outcome = ClassificationOutcome {
    interior_points: Vec::new(),
    total_processed: 0,
    total_inside: 0,
  };

  for batch in points.chunks(batch_size * 3) {
    let flags = classify_batch(index, batch, config);
    for (flag, p) in flags.iter().zip(batch.chunks_exact(3)) {
      if *flag {
        outcome.interior_points.extend_from_slice(p);
        outcome.total_inside += 1;
      }
    }
    outcome.total_processed += flags.len();
    on_progress(outcome.total_processed, total);
  }

  outcome
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod classify_test;
