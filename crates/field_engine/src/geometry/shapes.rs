//! Simple boundary meshes for testing and debugging.
//!
//! Deterministic closed shells with known volumes. Used by the unit
//! tests and benches to exercise classification and volume computation
//! without loading real room scans.

use crate::geometry::mesh::BoundaryMesh;
use crate::types::Aabb;

/// Closed axis-aligned box shell from `min` to `max`.
///
/// 8 vertices, 12 triangles, consistently wound with outward normals.
pub fn box_shell(min: [f32; 3], max: [f32; 3]) -> BoundaryMesh {
  let [x0, y0, z0] = min;
  let [x1, y1, z1] = max;

  #[rustfmt::skip]
  let positions = vec![
    x0, y0, z0, // 0
    x1, y0, z0, // 1
    x1, y1, z0, // 2
    x0, y1, z0, // 3
    x0, y0, z1, // 4
    x1, y0, z1, // 5
    x1, y1, z1, // 6
    x0, y1, z1, // 7
  ];

  // Two triangles per face, counter-clockwise seen from outside.
  #[rustfmt::skip]
  let indices = vec![
    0, 2, 1, 0, 3, 2, // z = z0 (normal -Z)
    4, 5, 6, 4, 6, 7, // z = z1 (normal +Z)
    0, 1, 5, 0, 5, 4, // y = y0 (normal -Y)
    3, 6, 2, 3, 7, 6, // y = y1 (normal +Y)
    0, 7, 3, 0, 4, 7, // x = x0 (normal -X)
    1, 2, 6, 1, 6, 5, // x = x1 (normal +X)
  ];

  BoundaryMesh::new(positions, Some(indices)).expect("box shell buffers are well-formed")
}

/// Unit cube shell over `[0, 1]³`. Enclosed volume is exactly 1.
pub fn unit_cube() -> BoundaryMesh {
  box_shell([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])
}

/// A single open quad in the z = 0 plane, deliberately not watertight.
pub fn open_quad(size: f32) -> BoundaryMesh {
  let positions = vec![
    0.0, 0.0, 0.0, size, 0.0, 0.0, size, size, 0.0, 0.0, 0.0, 0.0, size, size, 0.0, 0.0, size, 0.0,
  ];
  BoundaryMesh::new(positions, None).expect("quad buffers are well-formed")
}

/// Bounding box helper for the shapes above.
pub fn shell_bounds(mesh: &BoundaryMesh) -> Aabb {
  mesh.aabb().expect("shape meshes are non-empty")
}
