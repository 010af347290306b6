//! Bounding-volume hierarchy over the boundary mesh.
//!
//! Built once per mesh (median split on the largest centroid extent) and
//! queried with "all crossings along a ray": the classifier needs every
//! intersection for parity counting, not just the nearest hit, so the
//! traversal never prunes by closest-t the way a ray tracer would.
//!
//! Rebuild is required whenever the mesh buffers change; there is no
//! incremental update.

use glam::DVec3;
use smallvec::SmallVec;

use crate::constants::{BVH_LEAF_SIZE, HIT_MERGE_EPSILON, MT_EPSILON, RAY_T_MIN};
use crate::geometry::mesh::BoundaryMesh;

/// Per-ray hit list. Room shells rarely produce more than a few
/// crossings per axis ray, so this normally stays on the stack.
pub type RayHits = SmallVec<[f64; 8]>;

/// Internal AABB for BVH nodes.
#[derive(Clone, Copy, Debug)]
struct NodeAabb {
  min: DVec3,
  max: DVec3,
}

impl NodeAabb {
  fn empty() -> Self {
    Self {
      min: DVec3::splat(f64::INFINITY),
      max: DVec3::splat(f64::NEG_INFINITY),
    }
  }

  fn from_triangle(tri: &[DVec3; 3]) -> Self {
    Self {
      min: tri[0].min(tri[1]).min(tri[2]),
      max: tri[0].max(tri[1]).max(tri[2]),
    }
  }

  fn union(self, other: Self) -> Self {
    Self {
      min: self.min.min(other.min),
      max: self.max.max(other.max),
    }
  }

  fn centroid(self) -> DVec3 {
    (self.min + self.max) * 0.5
  }

  /// Slab test. Unlike a closest-hit tracer there is no shrinking t_max;
  /// any overlap with the positive ray half-line counts.
  #[inline]
  fn intersected_by(&self, origin: DVec3, inv_dir: DVec3) -> bool {
    let t1 = (self.min - origin) * inv_dir;
    let t2 = (self.max - origin) * inv_dir;
    let t_near = t1.min(t2);
    let t_far = t1.max(t2);
    let near = t_near.x.max(t_near.y).max(t_near.z);
    let far = t_far.x.min(t_far.y).min(t_far.z);
    far >= near.max(0.0)
  }
}

#[derive(Clone, Debug)]
struct BvhNode {
  bounds: NodeAabb,
  /// Child node indices; negative marks a leaf.
  left: i32,
  right: i32,
  /// Leaf triangle range into `order`.
  start: u32,
  count: u32,
}

/// Accelerated ray-intersection index over a `BoundaryMesh`.
pub struct GeometryIndex {
  /// Triangle corners, flattened at build time so traversal never chases
  /// the index buffer.
  triangles: Vec<[DVec3; 3]>,
  /// Triangle visit order produced by the median splits.
  order: Vec<u32>,
  nodes: Vec<BvhNode>,
  root: usize,
}

impl GeometryIndex {
  /// Build the index. An empty mesh produces an index whose queries all
  /// report zero intersections.
  pub fn build(mesh: &BoundaryMesh) -> Self {
    let triangle_count = mesh.triangle_count();
    let mut triangles = Vec::with_capacity(triangle_count);
    let mut bounds = Vec::with_capacity(triangle_count);
    for t in 0..triangle_count {
      let tri = mesh.triangle(t);
      bounds.push(NodeAabb::from_triangle(&tri));
      triangles.push(tri);
    }

    let mut order: Vec<u32> = (0..triangle_count as u32).collect();
    let mut nodes = Vec::new();
    let root = if triangle_count == 0 {
      0
    } else {
      build_range(&mut nodes, &mut order, &bounds, 0, triangle_count)
    };

    Self {
      triangles,
      order,
      nodes,
      root,
    }
  }

  /// Number of indexed triangles.
  pub fn triangle_count(&self) -> usize {
    self.triangles.len()
  }

  /// All intersection distances along `origin + t * direction`, sorted
  /// ascending. Hits closer together than the merge epsilon collapse to
  /// one crossing so shared triangle edges don't double-count.
  pub fn ray_hits(&self, origin: DVec3, direction: DVec3) -> RayHits {
    let mut hits = RayHits::new();
    if self.nodes.is_empty() {
      return hits;
    }

    let inv_dir = direction.recip();
    let mut stack: [usize; 64] = [0; 64];
    let mut sp = 0;
    stack[sp] = self.root;
    sp += 1;

    while sp > 0 {
      sp -= 1;
      let node = &self.nodes[stack[sp]];
      if !node.bounds.intersected_by(origin, inv_dir) {
        continue;
      }
      if node.left < 0 {
        let start = node.start as usize;
        let end = start + node.count as usize;
        for &tri_idx in &self.order[start..end] {
          let tri = &self.triangles[tri_idx as usize];
          if let Some(t) = intersect_triangle(origin, direction, tri) {
            hits.push(t);
          }
        }
      } else {
        debug_assert!(sp + 2 <= stack.len());
        stack[sp] = node.left as usize;
        sp += 1;
        stack[sp] = node.right as usize;
        sp += 1;
      }
    }

    hits.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    dedup_hits(&mut hits);
    hits
  }

  /// Parity test along one direction: odd crossing count means the
  /// origin sits inside the shell as seen from this direction.
  #[inline]
  pub fn parity_inside(&self, origin: DVec3, direction: DVec3) -> bool {
    self.ray_hits(origin, direction).len() % 2 == 1
  }
}

/// Möller–Trumbore. Returns the ray parameter for hits past `RAY_T_MIN`.
#[inline]
fn intersect_triangle(origin: DVec3, direction: DVec3, tri: &[DVec3; 3]) -> Option<f64> {
  let e1 = tri[1] - tri[0];
  let e2 = tri[2] - tri[0];
  let pvec = direction.cross(e2);
  let det = e1.dot(pvec);
  if det.abs() < MT_EPSILON {
    return None;
  }
  let inv_det = 1.0 / det;
  let tvec = origin - tri[0];
  let u = tvec.dot(pvec) * inv_det;
  if !(0.0..=1.0).contains(&u) {
    return None;
  }
  let qvec = tvec.cross(e1);
  let v = direction.dot(qvec) * inv_det;
  if v < 0.0 || u + v > 1.0 {
    return None;
  }
  let t = e2.dot(qvec) * inv_det;
  if t < RAY_T_MIN {
    return None;
  }
  Some(t)
}

/// Collapse sorted hits closer together than the merge epsilon.
fn dedup_hits(hits: &mut RayHits) {
  let mut write = 0;
  for read in 0..hits.len() {
    if write == 0 || hits[read] - hits[write - 1] > HIT_MERGE_EPSILON {
      hits[write] = hits[read];
      write += 1;
    }
  }
  hits.truncate(write);
}

/// Median split on the largest centroid extent.
fn build_range(
  nodes: &mut Vec<BvhNode>,
  order: &mut [u32],
  bounds: &[NodeAabb],
  start: usize,
  end: usize,
) -> usize {
  let mut node_bounds = NodeAabb::empty();
  for &i in &order[start..end] {
    node_bounds = node_bounds.union(bounds[i as usize]);
  }

  let count = end - start;
  if count <= BVH_LEAF_SIZE {
    nodes.push(BvhNode {
      bounds: node_bounds,
      left: -1,
      right: -1,
      start: start as u32,
      count: count as u32,
    });
    return nodes.len() - 1;
  }

  let mut cmin = DVec3::splat(f64::INFINITY);
  let mut cmax = DVec3::splat(f64::NEG_INFINITY);
  for &i in &order[start..end] {
    let c = bounds[i as usize].centroid();
    cmin = cmin.min(c);
    cmax = cmax.max(c);
  }
  let extent = cmax - cmin;
  let axis = if extent.y > extent.x && extent.y >= extent.z {
    1
  } else if extent.z > extent.x {
    2
  } else {
    0
  };

  order[start..end].sort_by(|&a, &b| {
    let ka = bounds[a as usize].centroid()[axis];
    let kb = bounds[b as usize].centroid()[axis];
    ka.partial_cmp(&kb).unwrap_or(std::cmp::Ordering::Equal)
  });

  let mid = (start + end) / 2;
  let left = build_range(nodes, order, bounds, start, mid);
  let right = build_range(nodes, order, bounds, mid, end);
  nodes.push(BvhNode {
    bounds: node_bounds,
    left: left as i32,
    right: right as i32,
    start: start as u32,
    count: count as u32,
  });
  nodes.len() - 1
}

#[cfg(test)]
#[path = "bvh_test.rs"]
mod bvh_test;
