//! Radial basis function interpolation.
//!
//! Fit: build the dense system `A_ij = φ(d(anchor_i, anchor_j))`, solve
//! `A·w = f` by Gaussian elimination with partial pivoting, O(n³) once
//! per job, fine for room-scale sensor counts. Evaluate:
//! `Σ w_i · φ(d(query, anchor_i))`, O(n) per query.
//!
//! Duplicate or near-collinear anchors make `A` singular. Rather than
//! letting a near-zero pivot divide through and spray NaN/Infinity into
//! the field buffer, the solve rejects the system with
//! [`FieldError::SingularSystem`] and the caller keeps the previous
//! field.

use glam::DVec3;

use crate::constants::SINGULAR_PIVOT_EPSILON;
use crate::error::{FieldError, Result};
use crate::sensors::AnchorSample;
use crate::types::RbfKernel;

use super::FieldEstimator;

/// Kernel shape parameter. Room-scale anchor spacing is on the order of
/// a meter, where a unit shape factor conditions all four kernels well.
const SHAPE: f64 = 1.0;

/// Evaluate kernel φ at distance `r`.
#[inline]
fn kernel_value(kernel: RbfKernel, r: f64) -> f64 {
  let e = SHAPE;
  match kernel {
    RbfKernel::Gaussian => (-(e * r) * (e * r)).exp(),
    RbfKernel::Multiquadric => (1.0 + (e * r) * (e * r)).sqrt(),
    RbfKernel::InverseMultiquadric => 1.0 / (1.0 + (e * r) * (e * r)).sqrt(),
    // r² ln r, continuously extended to 0 at r = 0.
    RbfKernel::ThinPlateSpline => {
      if r > 0.0 {
        r * r * r.ln()
      } else {
        0.0
      }
    }
  }
}

/// Fitted RBF estimator holding the solved weights.
#[derive(Clone, Debug)]
pub struct RbfEstimator {
  samples: Vec<AnchorSample>,
  weights: Vec<f64>,
  kernel: RbfKernel,
}

impl RbfEstimator {
  /// Build and solve the interpolation system.
  pub fn fit(samples: Vec<AnchorSample>, kernel: RbfKernel) -> Result<Self> {
    if samples.is_empty() {
      return Err(FieldError::NoAnchors);
    }
    let n = samples.len();

    // Row-major augmented matrix [A | f].
    let mut a = vec![0.0f64; n * n];
    for i in 0..n {
      for j in 0..n {
        let r = samples[i].position.distance(samples[j].position);
        a[i * n + j] = kernel_value(kernel, r);
      }
    }
    let f: Vec<f64> = samples.iter().map(|s| s.value).collect();

    let weights = solve_dense(a, f, n)?;
    Ok(Self {
      samples,
      weights,
      kernel,
    })
  }

  /// Number of anchor samples.
  pub fn len(&self) -> usize {
    self.samples.len()
  }

  pub fn is_empty(&self) -> bool {
    self.samples.is_empty()
  }
}

impl FieldEstimator for RbfEstimator {
  fn estimate(&self, query: DVec3) -> f64 {
    let mut sum = 0.0;
    for (s, w) in self.samples.iter().zip(&self.weights) {
      let r = query.distance(s.position);
      sum += w * kernel_value(self.kernel, r);
    }
    sum
  }
}

/// Gaussian elimination with partial pivoting on a row-major `n×n`
/// system. Consumes the matrix and right-hand side.
fn solve_dense(mut a: Vec<f64>, mut f: Vec<f64>, n: usize) -> Result<Vec<f64>> {
  for col in 0..n {
    // Partial pivot: largest magnitude in this column, at or below the
    // diagonal.
    let mut pivot_row = col;
    let mut pivot_mag = a[col * n + col].abs();
    for row in (col + 1)..n {
      let mag = a[row * n + col].abs();
      if mag > pivot_mag {
        pivot_mag = mag;
        pivot_row = row;
      }
    }
    if pivot_mag < SINGULAR_PIVOT_EPSILON {
      return Err(FieldError::SingularSystem { row: col });
    }
    if pivot_row != col {
      for k in 0..n {
        a.swap(col * n + k, pivot_row * n + k);
      }
      f.swap(col, pivot_row);
    }

    let pivot = a[col * n + col];
    for row in (col + 1)..n {
      let factor = a[row * n + col] / pivot;
      if factor == 0.0 {
        continue;
      }
      for k in col..n {
        a[row * n + k] -= factor * a[col * n + k];
      }
      f[row] -= factor * f[col];
    }
  }

  // Back substitution.
  let mut w = vec![0.0f64; n];
  for row in (0..n).rev() {
    let mut acc = f[row];
    for k in (row + 1)..n {
      acc -= a[row * n + k] * w[k];
    }
    w[row] = acc / a[row * n + row];
  }
  Ok(w)
}

#[cfg(test)]
#[path = "rbf_test.rs"]
mod rbf_test;
