use glam::DVec3;

use super::*;
use crate::geometry::shapes;

#[test]
fn empty_mesh_yields_no_hits() {
  let mesh = BoundaryMesh::new(Vec::new(), None).unwrap();
  let index = GeometryIndex::build(&mesh);

  assert_eq!(index.triangle_count(), 0);
  let hits = index.ray_hits(DVec3::ZERO, DVec3::X);
  assert!(hits.is_empty());
}

#[test]
fn ray_through_cube_crosses_twice() {
  let index = GeometryIndex::build(&shapes::unit_cube());

  // From outside, straight through the middle.
  let hits = index.ray_hits(DVec3::new(-1.0, 0.5, 0.5), DVec3::X);
  assert_eq!(hits.len(), 2, "hits: {hits:?}");
  assert!((hits[0] - 1.0).abs() < 1e-9);
  assert!((hits[1] - 2.0).abs() < 1e-9);
}

#[test]
fn ray_from_inside_crosses_once() {
  let index = GeometryIndex::build(&shapes::unit_cube());

  let hits = index.ray_hits(DVec3::splat(0.5), DVec3::Y);
  assert_eq!(hits.len(), 1);
  assert!((hits[0] - 0.5).abs() < 1e-9);
}

#[test]
fn ray_missing_cube_has_no_hits() {
  let index = GeometryIndex::build(&shapes::unit_cube());

  let hits = index.ray_hits(DVec3::new(-1.0, 5.0, 5.0), DVec3::X);
  assert!(hits.is_empty());
}

#[test]
fn hits_are_sorted_ascending() {
  // Two nested boxes: a ray through both crosses four faces.
  let outer = shapes::box_shell([-2.0, -2.0, -2.0], [2.0, 2.0, 2.0]);
  let inner = shapes::unit_cube();
  let (mut positions, outer_idx) = outer.into_buffers();
  let (inner_pos, inner_idx) = inner.into_buffers();
  let offset = (positions.len() / 3) as u32;
  positions.extend_from_slice(&inner_pos);
  let mut indices = outer_idx.unwrap();
  indices.extend(inner_idx.unwrap().iter().map(|i| i + offset));
  let mesh = BoundaryMesh::new(positions, Some(indices)).unwrap();

  let index = GeometryIndex::build(&mesh);
  let hits = index.ray_hits(DVec3::new(-5.0, 0.5, 0.5), DVec3::X);
  assert_eq!(hits.len(), 4, "hits: {hits:?}");
  for pair in hits.windows(2) {
    assert!(pair[0] < pair[1]);
  }
}

#[test]
fn parity_inside_cube() {
  let index = GeometryIndex::build(&shapes::unit_cube());

  assert!(index.parity_inside(DVec3::splat(0.5), DVec3::X));
  assert!(!index.parity_inside(DVec3::new(2.0, 0.5, 0.5), DVec3::X));
}

#[test]
fn diagonal_ray_through_many_triangles() {
  let index = GeometryIndex::build(&shapes::unit_cube());

  let dir = DVec3::splat(1.0).normalize();
  let hits = index.ray_hits(DVec3::splat(-0.5), dir);
  // Enters and exits once each; corner grazing must not inflate parity.
  assert_eq!(hits.len() % 2, 0, "hits: {hits:?}");
}

#[test]
fn traversal_matches_brute_force() {
  use rand::{Rng, SeedableRng};

  let mesh = shapes::box_shell([-1.0, -0.5, 0.0], [1.5, 2.0, 3.0]);
  let index = GeometryIndex::build(&mesh);
  let mut rng = rand::rngs::StdRng::seed_from_u64(7);

  for _ in 0..200 {
    let origin = DVec3::new(
      rng.random_range(-3.0..4.0),
      rng.random_range(-3.0..4.0),
      rng.random_range(-2.0..5.0),
    );
    let direction = DVec3::new(
      rng.random_range(-1.0..1.0),
      rng.random_range(-1.0..1.0),
      rng.random_range(-1.0..1.0),
    );
    if direction.length() < 1e-3 {
      continue;
    }
    let direction = direction.normalize();

    let accelerated = index.ray_hits(origin, direction);

    let mut brute = RayHits::new();
    for t in 0..mesh.triangle_count() {
      if let Some(hit) = intersect_triangle(origin, direction, &mesh.triangle(t)) {
        brute.push(hit);
      }
    }
    brute.sort_by(|a, b| a.partial_cmp(b).unwrap());
    dedup_hits(&mut brute);

    assert_eq!(
      accelerated.len(),
      brute.len(),
      "origin {origin:?} dir {direction:?}"
    );
    for (a, b) in accelerated.iter().zip(brute.iter()) {
      assert!((a - b).abs() < 1e-9);
    }
  }
}

#[test]
fn open_mesh_still_queryable() {
  let index = GeometryIndex::build(&shapes::open_quad(2.0));

  let hits = index.ray_hits(DVec3::new(1.0, 1.0, -1.0), DVec3::Z);
  assert_eq!(hits.len(), 1);
}
