//! Inverse distance weighting.
//!
//! `w_i = 1 / d(query, anchor_i)^p`, result `Σ(w_i·v_i) / Σ(w_i)`. A
//! convex combination of anchor values, so the estimate can never leave
//! `[min(values), max(values)]`. The coincidence rule returns an
//! anchor's value exactly when the query is within epsilon of it, which
//! both avoids the 1/0 weight and makes the interpolation exact at
//! sensor positions.

use glam::DVec3;

use crate::constants::COINCIDENT_EPSILON;
use crate::error::{FieldError, Result};
use crate::sensors::AnchorSample;

use super::FieldEstimator;

/// Fitted IDW estimator. "Fitting" is just holding the samples; all the
/// work happens per query.
#[derive(Clone, Debug)]
pub struct IdwEstimator {
  samples: Vec<AnchorSample>,
  power: f64,
}

impl IdwEstimator {
  /// Wrap anchor samples with the given distance exponent.
  pub fn new(samples: Vec<AnchorSample>, power: f64) -> Result<Self> {
    if samples.is_empty() {
      return Err(FieldError::NoAnchors);
    }
    Ok(Self { samples, power })
  }

  /// Number of anchor samples.
  pub fn len(&self) -> usize {
    self.samples.len()
  }

  pub fn is_empty(&self) -> bool {
    self.samples.is_empty()
  }
}

impl FieldEstimator for IdwEstimator {
  fn estimate(&self, query: DVec3) -> f64 {
    let mut weight_sum = 0.0;
    let mut value_sum = 0.0;
    for s in &self.samples {
      let d = query.distance(s.position);
      if d < COINCIDENT_EPSILON {
        return s.value;
      }
      let w = 1.0 / d.powf(self.power);
      weight_sum += w;
      value_sum += w * s.value;
    }
    value_sum / weight_sum
  }
}

#[cfg(test)]
#[path = "idw_test.rs"]
mod idw_test;
