//! Boundary mesh buffers.
//!
//! The asset loader hands the engine a flat vertex-position buffer and an
//! optional triangle-index buffer. The mesh is immutable once built; any
//! change to the buffers means rebuilding `GeometryIndex` and recomputing
//! the enclosed volume (no incremental update path).

use glam::DVec3;

use crate::error::{FieldError, Result};
use crate::types::Aabb;

/// Triangulated shell of the room.
#[derive(Clone, Debug, Default)]
pub struct BoundaryMesh {
  /// Flat xyz vertex positions, 3 floats per vertex.
  positions: Vec<f32>,
  /// Optional triangle indices, 3 per triangle. When absent, every
  /// consecutive vertex triple forms a triangle.
  indices: Option<Vec<u32>>,
}

impl BoundaryMesh {
  /// Validate and wrap mesh buffers.
  ///
  /// An empty position buffer is a valid (empty) mesh: ray queries will
  /// simply report no intersections. Truncated buffers and out-of-bounds
  /// indices are rejected.
  pub fn new(positions: Vec<f32>, indices: Option<Vec<u32>>) -> Result<Self> {
    if positions.len() % 3 != 0 {
      return Err(FieldError::Geometry(format!(
        "position buffer length {} is not a multiple of 3",
        positions.len()
      )));
    }
    let vertex_count = (positions.len() / 3) as u32;
    if let Some(idx) = &indices {
      if idx.len() % 3 != 0 {
        return Err(FieldError::Geometry(format!(
          "index buffer length {} is not a multiple of 3",
          idx.len()
        )));
      }
      if let Some(&bad) = idx.iter().find(|&&i| i >= vertex_count) {
        return Err(FieldError::Geometry(format!(
          "index {bad} out of bounds for {vertex_count} vertices"
        )));
      }
    } else if vertex_count % 3 != 0 {
      return Err(FieldError::Geometry(format!(
        "un-indexed mesh with {vertex_count} vertices cannot form whole triangles"
      )));
    }
    Ok(Self { positions, indices })
  }

  /// True when the mesh has no triangles.
  pub fn is_empty(&self) -> bool {
    self.triangle_count() == 0
  }

  /// Number of triangles.
  pub fn triangle_count(&self) -> usize {
    match &self.indices {
      Some(idx) => idx.len() / 3,
      None => self.positions.len() / 9,
    }
  }

  /// Fetch one vertex.
  #[inline]
  pub fn vertex(&self, i: usize) -> DVec3 {
    DVec3::new(
      self.positions[i * 3] as f64,
      self.positions[i * 3 + 1] as f64,
      self.positions[i * 3 + 2] as f64,
    )
  }

  /// Fetch the three corners of triangle `t`.
  #[inline]
  pub fn triangle(&self, t: usize) -> [DVec3; 3] {
    match &self.indices {
      Some(idx) => [
        self.vertex(idx[t * 3] as usize),
        self.vertex(idx[t * 3 + 1] as usize),
        self.vertex(idx[t * 3 + 2] as usize),
      ],
      None => [
        self.vertex(t * 3),
        self.vertex(t * 3 + 1),
        self.vertex(t * 3 + 2),
      ],
    }
  }

  /// Bounding box of all vertices, `None` for an empty mesh.
  pub fn aabb(&self) -> Option<Aabb> {
    Aabb::from_flat_points(&self.positions)
  }

  /// True when an index buffer is present. Only indexed meshes can share
  /// vertices between triangles, which the volume computation relies on.
  pub fn is_indexed(&self) -> bool {
    self.indices.is_some()
  }

  /// Split the mesh back into its raw buffers (for shipping to a worker).
  pub fn into_buffers(self) -> (Vec<f32>, Option<Vec<u32>>) {
    (self.positions, self.indices)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_mesh_is_valid() {
    let mesh = BoundaryMesh::new(Vec::new(), None).unwrap();
    assert!(mesh.is_empty());
    assert!(mesh.aabb().is_none());
  }

  #[test]
  fn truncated_positions_rejected() {
    assert!(BoundaryMesh::new(vec![0.0, 1.0], None).is_err());
  }

  #[test]
  fn out_of_bounds_index_rejected() {
    let positions = vec![0.0; 9];
    assert!(BoundaryMesh::new(positions, Some(vec![0, 1, 3])).is_err());
  }

  #[test]
  fn unindexed_triangle_roundtrip() {
    let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let mesh = BoundaryMesh::new(positions, None).unwrap();
    assert_eq!(mesh.triangle_count(), 1);
    let [a, b, c] = mesh.triangle(0);
    assert_eq!(a, DVec3::ZERO);
    assert_eq!(b, DVec3::new(1.0, 0.0, 0.0));
    assert_eq!(c, DVec3::new(0.0, 1.0, 0.0));
  }
}
