//! Error types for field reconstruction.
//!
//! The engine recovers locally wherever it can (empty meshes degrade to
//! zero intersections, empty anchor sets produce empty fields), so the
//! variants here cover the cases that genuinely abort an operation.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, FieldError>;

/// Failure modes surfaced to callers.
#[derive(Error, Debug)]
pub enum FieldError {
  /// Malformed boundary mesh buffers (truncated positions, index out of
  /// bounds). Distinct from an *empty* mesh, which is valid and simply
  /// classifies everything as exterior.
  #[error("geometry error: {0}")]
  Geometry(String),

  /// The RBF system could not be solved: duplicate or near-collinear
  /// anchors produced a (near-)singular matrix.
  #[error("interpolation matrix is singular (pivot below threshold at row {row})")]
  SingularSystem { row: usize },

  /// Interpolation requested with zero sensor anchors.
  #[error("no sensor anchors configured")]
  NoAnchors,

  /// Classifier tolerance outside the 1..=6 direction-vote range.
  #[error("classification tolerance {0} outside 1..=6")]
  ToleranceOutOfRange(u8),

  /// Worker dispatch failed; only the affected job is lost.
  #[error("worker error: {0}")]
  Worker(String),
}
