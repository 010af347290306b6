//! Scalar field interpolation from sparse anchors.
//!
//! Two interchangeable estimators behind one seam:
//!
//! - [`idw::IdwEstimator`]: inverse distance weighting. No setup cost,
//!   always bounded by the anchor value range.
//! - [`rbf::RbfEstimator`]: radial basis functions. O(n³) weight solve
//!   up front, exact interpolant, can overshoot between anchors.
//!
//! Both guarantee exact values at anchor positions.

pub mod idw;
pub mod rbf;

use glam::DVec3;

use crate::error::Result;
use crate::sensors::AnchorSample;
use crate::types::{InterpolationMethod, RbfKernel};

pub use idw::IdwEstimator;
pub use rbf::RbfEstimator;

/// A fitted estimator: maps any query point to a scalar value.
pub trait FieldEstimator: Send + Sync {
  fn estimate(&self, query: DVec3) -> f64;
}

/// Estimator parameters from the configuration surface.
#[derive(Clone, Copy, Debug)]
pub struct EstimatorParams {
  pub method: InterpolationMethod,
  /// IDW distance exponent, typically 1–5.
  pub idw_power: f64,
  /// RBF kernel selection.
  pub rbf_kernel: RbfKernel,
}

impl Default for EstimatorParams {
  fn default() -> Self {
    Self {
      method: InterpolationMethod::Idw,
      idw_power: 2.0,
      rbf_kernel: RbfKernel::Gaussian,
    }
  }
}

/// Fit an estimator over the anchor samples.
///
/// Fails with [`crate::error::FieldError::NoAnchors`] on an empty sample
/// set and with [`crate::error::FieldError::SingularSystem`] when the
/// RBF system cannot be solved (duplicate or near-collinear anchors).
pub fn build_estimator(
  samples: &[AnchorSample],
  params: &EstimatorParams,
) -> Result<Box<dyn FieldEstimator>> {
  match params.method {
    InterpolationMethod::Idw => Ok(Box::new(IdwEstimator::new(
      samples.to_vec(),
      params.idw_power,
    )?)),
    InterpolationMethod::Rbf => Ok(Box::new(RbfEstimator::fit(
      samples.to_vec(),
      params.rbf_kernel,
    )?)),
  }
}

/// Value range across anchor samples.
///
/// The aggregator clamps lattice values into this range; overshoot
/// outside the anchors' convex hull is bounded on purpose.
pub fn sample_range(samples: &[AnchorSample]) -> Option<(f64, f64)> {
  if samples.is_empty() {
    return None;
  }
  let mut min = f64::INFINITY;
  let mut max = f64::NEG_INFINITY;
  for s in samples {
    min = min.min(s.value);
    max = max.max(s.value);
  }
  Some((min, max))
}
