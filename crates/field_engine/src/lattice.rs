//! Uniform sampling lattice over the room bounds.
//!
//! Candidate points for classification and interpolation. The buffer is
//! flat xyz f32 (3 components per point) so it can move into a worker
//! job without repacking; iteration order is row-major `(i, j, k)` and
//! deterministic, which downstream value buffers rely on to stay aligned.

use glam::DVec3;

use crate::types::Aabb;

/// Regular 3D grid of candidate sample points.
#[derive(Clone, Debug)]
pub struct Lattice {
  /// Box the lattice covers.
  pub bounds: Aabb,
  /// Requested spacing between adjacent points, world units.
  pub resolution: f64,
  /// Points per axis, each at least 2.
  pub steps: [usize; 3],
  /// Flat xyz buffer, `steps[0] * steps[1] * steps[2]` points.
  pub points: Vec<f32>,
}

impl Lattice {
  /// Generate the lattice.
  ///
  /// Per-axis step count is `max(2, ceil(size / resolution))`, so even a
  /// degenerate box yields the 8 corner points and every axis spans its
  /// full extent (first point on `min`, last on `max`).
  ///
  /// # Panics
  /// Panics when `resolution` is not a positive finite number or the
  /// bounds are malformed enough to produce a non-finite coordinate.
  /// Malformed bounds are a precondition violation by the caller, not a
  /// recoverable input.
  pub fn generate(bounds: Aabb, resolution: f64) -> Self {
    assert!(
      resolution.is_finite() && resolution > 0.0,
      "lattice resolution must be positive and finite, got {resolution}"
    );
    assert!(bounds.is_finite(), "lattice bounds must be finite");

    let size = bounds.size();
    let steps = [
      axis_steps(size.x, resolution),
      axis_steps(size.y, resolution),
      axis_steps(size.z, resolution),
    ];
    let step = DVec3::new(
      size.x / (steps[0] - 1) as f64,
      size.y / (steps[1] - 1) as f64,
      size.z / (steps[2] - 1) as f64,
    );

    let mut points = Vec::with_capacity(steps[0] * steps[1] * steps[2] * 3);
    for i in 0..steps[0] {
      for j in 0..steps[1] {
        for k in 0..steps[2] {
          let p = bounds.min
            + DVec3::new(
              step.x * i as f64,
              step.y * j as f64,
              step.z * k as f64,
            );
          assert!(
            p.is_finite(),
            "lattice produced non-finite point at ({i}, {j}, {k}): {p:?}"
          );
          points.push(p.x as f32);
          points.push(p.y as f32);
          points.push(p.z as f32);
        }
      }
    }

    Self {
      bounds,
      resolution,
      steps,
      points,
    }
  }

  /// Number of points.
  pub fn len(&self) -> usize {
    self.points.len() / 3
  }

  /// True when the lattice holds no points (never after `generate`).
  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  /// Fetch point `i` as a vector.
  #[inline]
  pub fn point(&self, i: usize) -> DVec3 {
    DVec3::new(
      self.points[i * 3] as f64,
      self.points[i * 3 + 1] as f64,
      self.points[i * 3 + 2] as f64,
    )
  }
}

#[inline]
fn axis_steps(size: f64, resolution: f64) -> usize {
  ((size / resolution).ceil() as usize).max(2)
}

#[cfg(test)]
#[path = "lattice_test.rs"]
mod lattice_test;
