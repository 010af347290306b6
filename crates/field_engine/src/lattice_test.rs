use glam::DVec3;

use super::*;

fn unit_bounds() -> Aabb {
  Aabb::new(DVec3::ZERO, DVec3::splat(1.0))
}

#[test]
fn point_count_matches_steps() {
  let lattice = Lattice::generate(unit_bounds(), 0.25);
  let [sx, sy, sz] = lattice.steps;
  assert_eq!(lattice.points.len() / 3, sx * sy * sz);
  assert_eq!(lattice.len(), sx * sy * sz);
}

#[test]
fn coarse_resolution_yields_corners() {
  // resolution = 2 on a unit box: ceil(1/2) = 1, clamped to 2 per axis.
  let lattice = Lattice::generate(unit_bounds(), 2.0);
  assert_eq!(lattice.steps, [2, 2, 2]);
  assert_eq!(lattice.len(), 8);

  let mut corners: Vec<[f32; 3]> = lattice
    .points
    .chunks_exact(3)
    .map(|c| [c[0], c[1], c[2]])
    .collect();
  corners.sort_by(|a, b| a.partial_cmp(b).unwrap());
  let mut expected = vec![
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 0.0, 0.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 1.0, 1.0],
  ];
  expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
  assert_eq!(corners, expected);
}

#[test]
fn all_coordinates_finite() {
  let bounds = Aabb::new(DVec3::new(-3.5, 0.0, 2.0), DVec3::new(4.5, 2.7, 6.0));
  let lattice = Lattice::generate(bounds, 0.31);
  assert!(lattice.points.iter().all(|c| c.is_finite()));
}

#[test]
fn spans_full_extent() {
  let bounds = Aabb::new(DVec3::new(1.0, 2.0, 3.0), DVec3::new(2.0, 4.0, 9.0));
  let lattice = Lattice::generate(bounds, 0.5);

  let first = lattice.point(0);
  let last = lattice.point(lattice.len() - 1);
  assert!((first - bounds.min).length() < 1e-6);
  assert!((last - bounds.max).length() < 1e-6);
}

#[test]
fn row_major_iteration_order() {
  let lattice = Lattice::generate(unit_bounds(), 2.0);
  // k (z) varies fastest, then j (y), then i (x).
  assert_eq!(lattice.point(0), DVec3::new(0.0, 0.0, 0.0));
  assert_eq!(lattice.point(1), DVec3::new(0.0, 0.0, 1.0));
  assert_eq!(lattice.point(2), DVec3::new(0.0, 1.0, 0.0));
  assert_eq!(lattice.point(4), DVec3::new(1.0, 0.0, 0.0));
}

#[test]
#[should_panic(expected = "resolution")]
fn zero_resolution_panics() {
  Lattice::generate(unit_bounds(), 0.0);
}

#[test]
#[should_panic]
fn non_finite_bounds_panic() {
  let bounds = Aabb {
    min: DVec3::ZERO,
    max: DVec3::new(f64::NAN, 1.0, 1.0),
  };
  Lattice::generate(bounds, 0.5);
}
