//! Tuning constants for field reconstruction.
//!
//! Values shared between the geometry index, the classifier, and the
//! interpolators live here so batch sizes and epsilons stay consistent
//! between the synchronous API and the worker protocol.

/// Ray parameter below which an intersection is ignored.
///
/// Keeps a ray origin sitting exactly on a triangle from registering a
/// self-intersection at t = 0.
pub const RAY_T_MIN: f64 = 1e-9;

/// Determinant threshold for Möller–Trumbore; smaller means the ray is
/// parallel to the triangle plane.
pub const MT_EPSILON: f64 = 1e-12;

/// Two hits along one ray closer than this are treated as the same
/// crossing (shared triangle edges report twice otherwise, breaking the
/// parity count).
pub const HIT_MERGE_EPSILON: f64 = 1e-9;

/// Maximum triangles per BVH leaf.
pub const BVH_LEAF_SIZE: usize = 4;

/// Anchor closer to a query than this returns its value exactly
/// (coincidence rule; also avoids the 1/d^p division blowing up).
pub const COINCIDENT_EPSILON: f64 = 1e-6;

/// Pivot magnitude below which the RBF system counts as singular.
pub const SINGULAR_PIVOT_EPSILON: f64 = 1e-12;

/// Points per classification batch inside a worker.
pub const CLASSIFY_BATCH_SIZE: usize = 2048;

/// Minimum interval between progress messages (final item always reports).
pub const PROGRESS_INTERVAL_MS: u64 = 100;

/// Valid range for the classifier direction-vote tolerance.
pub const MIN_TOLERANCE: u8 = 1;
pub const MAX_TOLERANCE: u8 = 6;

/// The six axis-aligned ray directions the classifier votes over.
pub const AXIS_DIRECTIONS: [[f64; 3]; 6] = [
  [1.0, 0.0, 0.0],
  [-1.0, 0.0, 0.0],
  [0.0, 1.0, 0.0],
  [0.0, -1.0, 0.0],
  [0.0, 0.0, 1.0],
  [0.0, 0.0, -1.0],
];
