//! Core data types shared across the reconstruction pipeline.

use glam::DVec3;

/// Double-precision axis-aligned bounding box.
///
/// Defines the region the sampling lattice covers. Rooms are meters-scale
/// so f64 keeps lattice coordinates exact enough that repeated
/// `min + step * i` accumulation stays well below sensor noise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
  /// Minimum corner (inclusive).
  pub min: DVec3,
  /// Maximum corner (inclusive).
  pub max: DVec3,
}

impl Aabb {
  /// Create a new AABB from min and max corners.
  ///
  /// # Panics
  /// Debug-asserts that min <= max on all axes.
  pub fn new(min: DVec3, max: DVec3) -> Self {
    debug_assert!(
      min.x <= max.x && min.y <= max.y && min.z <= max.z,
      "AABB min must be <= max on all axes"
    );
    Self { min, max }
  }

  /// Smallest AABB containing every point of a flat xyz buffer.
  ///
  /// Returns `None` for an empty buffer.
  pub fn from_flat_points(points: &[f32]) -> Option<Self> {
    if points.len() < 3 {
      return None;
    }
    let mut min = DVec3::splat(f64::INFINITY);
    let mut max = DVec3::splat(f64::NEG_INFINITY);
    for p in points.chunks_exact(3) {
      let v = DVec3::new(p[0] as f64, p[1] as f64, p[2] as f64);
      min = min.min(v);
      max = max.max(v);
    }
    Some(Self { min, max })
  }

  /// Get the size of the AABB (max - min).
  #[inline]
  pub fn size(&self) -> DVec3 {
    self.max - self.min
  }

  /// Get the center of the AABB.
  #[inline]
  pub fn center(&self) -> DVec3 {
    (self.min + self.max) * 0.5
  }

  /// Check if this AABB contains a point (boundary inclusive).
  #[inline]
  pub fn contains_point(&self, point: DVec3) -> bool {
    point.x >= self.min.x
      && point.x <= self.max.x
      && point.y >= self.min.y
      && point.y <= self.max.y
      && point.z >= self.min.z
      && point.z <= self.max.z
  }

  /// True when both corners hold finite coordinates.
  #[inline]
  pub fn is_finite(&self) -> bool {
    self.min.is_finite() && self.max.is_finite()
  }
}

/// Which environmental scalar the field reconstructs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
  /// Air temperature in °C.
  Temperature,
  /// Relative humidity in percent.
  RelativeHumidity,
  /// Absolute humidity (vapor density) in g/m³.
  AbsoluteHumidity,
  /// Dew point in °C.
  DewPoint,
  /// Vapor-pressure deficit in kPa.
  VaporPressureDeficit,
}

/// Spatial interpolation method for the scalar field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InterpolationMethod {
  /// Inverse distance weighting. Bounded, cheap, no setup cost.
  #[default]
  Idw,
  /// Radial basis functions. Exact interpolant, O(n³) setup.
  Rbf,
}

/// Kernel for RBF interpolation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RbfKernel {
  #[default]
  Gaussian,
  Multiquadric,
  InverseMultiquadric,
  ThinPlateSpline,
}

/// What the classifier treats as "accepted".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VolumeMode {
  /// Accept points inside the shell: the habitable air volume.
  #[default]
  HabitableAir,
  /// Invert the decision: accept points the parity test calls exterior.
  /// Used to probe solid structure rather than the air inside it.
  SolidInterior,
}

/// Reconstructed scalar field aligned to the accepted lattice points.
#[derive(Clone, Debug)]
pub struct ScalarField {
  /// Which metric the values represent.
  pub metric: Metric,
  /// One value per accepted lattice point, in lattice order.
  pub values: Vec<f64>,
  /// Minimum value after clamping.
  pub min: f64,
  /// Maximum value after clamping.
  pub max: f64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn aabb_from_flat_points() {
    let pts = [0.0f32, 0.0, 0.0, 2.0, -1.0, 3.0, 1.0, 5.0, -2.0];
    let aabb = Aabb::from_flat_points(&pts).unwrap();
    assert_eq!(aabb.min, DVec3::new(0.0, -1.0, -2.0));
    assert_eq!(aabb.max, DVec3::new(2.0, 5.0, 3.0));
  }

  #[test]
  fn aabb_from_empty_buffer() {
    assert!(Aabb::from_flat_points(&[]).is_none());
  }

  #[test]
  fn aabb_contains_boundary() {
    let aabb = Aabb::new(DVec3::ZERO, DVec3::splat(1.0));
    assert!(aabb.contains_point(DVec3::ZERO));
    assert!(aabb.contains_point(DVec3::splat(1.0)));
    assert!(!aabb.contains_point(DVec3::splat(1.001)));
  }

  #[test]
  fn aabb_size_and_center() {
    let aabb = Aabb::new(DVec3::new(-1.0, -2.0, -3.0), DVec3::new(1.0, 2.0, 3.0));
    assert_eq!(aabb.size(), DVec3::new(2.0, 4.0, 6.0));
    assert_eq!(aabb.center(), DVec3::ZERO);
  }
}
