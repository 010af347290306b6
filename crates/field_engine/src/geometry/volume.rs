//! Exact enclosed-volume computation.
//!
//! Signed-tetrahedron method: each triangle spans a tetrahedron with the
//! origin whose signed volume is `dot(v1, cross(v2, v3)) / 6`; the
//! magnitude of the sum is the enclosed volume. Runs independently of
//! lattice sampling, so mass calculations don't inherit lattice
//! discretization error.
//!
//! Only meaningful for a closed, consistently-wound mesh. An open or
//! un-indexed shell yields an arbitrary (typically understated) value,
//! a documented limitation, not an error.

use crate::geometry::mesh::BoundaryMesh;

/// Enclosed volume of the mesh in cubic world units.
///
/// Empty mesh reports 0.
pub fn enclosed_volume(mesh: &BoundaryMesh) -> f64 {
  let mut signed = 0.0;
  for t in 0..mesh.triangle_count() {
    let [v1, v2, v3] = mesh.triangle(t);
    signed += v1.dot(v2.cross(v3)) / 6.0;
  }
  signed.abs()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geometry::shapes;

  #[test]
  fn unit_cube_volume_is_one() {
    let v = enclosed_volume(&shapes::unit_cube());
    assert!((v - 1.0).abs() < 1e-9, "got {v}");
  }

  #[test]
  fn scaled_box_volume() {
    let mesh = shapes::box_shell([0.0, 0.0, 0.0], [2.0, 3.0, 4.0]);
    let v = enclosed_volume(&mesh);
    assert!((v - 24.0).abs() < 1e-6, "got {v}");
  }

  #[test]
  fn translation_invariant() {
    // The signed sum telescopes: translating a closed mesh must not
    // change the result even though every tetrahedron changes.
    let mesh = shapes::box_shell([10.0, -5.0, 3.0], [12.0, -2.0, 7.0]);
    let v = enclosed_volume(&mesh);
    assert!((v - 24.0).abs() < 1e-4, "got {v}");
  }

  #[test]
  fn empty_mesh_volume_is_zero() {
    let mesh = BoundaryMesh::new(Vec::new(), None).unwrap();
    assert_eq!(enclosed_volume(&mesh), 0.0);
  }

  #[test]
  fn open_mesh_understates() {
    // A single quad is not closed; the method produces *something*
    // (here 0 since all vertices lie in the z=0 plane through origin),
    // exercising the documented limitation rather than erroring.
    let v = enclosed_volume(&shapes::open_quad(1.0));
    assert!(v.abs() < 1e-9);
  }
}
