//! Wire types for the worker protocol.
//!
//! Jobs carry everything the worker needs by value, geometry buffers
//! included, so a worker never shares state with the dispatching side.

use crate::classify::ClassifierConfig;
use crate::interp::EstimatorParams;
use crate::sensors::SensorAnchor;
use crate::types::Metric;

/// Job generation stamp. Strictly increases per dispatch; consumers keep
/// only the result carrying the greatest stamp they have dispatched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobTs(pub u64);

/// Raw mesh buffers shipped into a classification job.
#[derive(Clone, Debug, Default)]
pub struct MeshBuffers {
  /// Flat xyz vertex positions.
  pub positions: Vec<f32>,
  /// Optional triangle indices.
  pub indices: Option<Vec<u32>>,
}

/// Classify which of `points` lie inside the shell.
#[derive(Clone, Debug)]
pub struct ClassificationJob {
  /// Flat xyz candidate points (typically a freshly generated lattice).
  pub points: Vec<f32>,
  /// Boundary mesh buffers; the worker builds its own geometry index.
  pub geometry: MeshBuffers,
  /// Tolerance and air/solid mode.
  pub config: ClassifierConfig,
  pub job_ts: JobTs,
}

/// Throttled progress notification (classification only).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassificationProgress {
  pub processed: usize,
  pub total: usize,
  pub percentage: f32,
  pub job_ts: JobTs,
}

/// Terminal classification message; exactly one per job.
#[derive(Clone, Debug)]
pub struct ClassificationResult {
  /// Flat xyz buffer of accepted points.
  pub interior_points: Vec<f32>,
  pub total_processed: usize,
  pub total_inside: usize,
  /// Worker-side wall time.
  pub elapsed_us: u64,
  pub job_ts: JobTs,
}

/// Messages a classification worker emits, in order: zero or more
/// `Progress` with strictly increasing `processed`, then one `Result`.
#[derive(Clone, Debug)]
pub enum ClassifyMessage {
  Progress(ClassificationProgress),
  Result(ClassificationResult),
}

impl ClassifyMessage {
  pub fn job_ts(&self) -> JobTs {
    match self {
      ClassifyMessage::Progress(p) => p.job_ts,
      ClassifyMessage::Result(r) => r.job_ts,
    }
  }
}

/// Reconstruct the scalar field over the accepted points.
#[derive(Clone, Debug)]
pub struct InterpolationJob {
  /// Anchor snapshot (positions + reading history).
  pub anchors: Vec<SensorAnchor>,
  /// Playback timestamp the readings are selected around.
  pub timestamp_ms: i64,
  /// Smoothing window for reading selection, 0 for nearest-only.
  pub window_ms: i64,
  /// Which scalar to reconstruct.
  pub metric: Metric,
  /// Accepted lattice points from the latest classification.
  pub points: Vec<f32>,
  /// Interpolation method, IDW power, RBF kernel.
  pub params: EstimatorParams,
  /// Exact mesh volume for the mass calculations, m³.
  pub exact_volume_m3: f64,
  pub job_ts: JobTs,
}

/// Terminal interpolation message; exactly one per job.
#[derive(Clone, Debug)]
pub struct InterpolationResult {
  /// The accepted points, returned to the caller (ownership moves back).
  pub positions: Vec<f32>,
  /// One value per point, aligned to `positions` order, clamped into the
  /// anchor range.
  pub values: Vec<f64>,
  pub min_value: f64,
  pub max_value: f64,
  /// `None` when no points were interpolated.
  pub volumetric_average: Option<f64>,
  pub interpolation_point_count: usize,
  pub air_mass_kg: Option<f64>,
  pub water_mass_kg: Option<f64>,
  pub avg_temperature_c: Option<f64>,
  pub avg_relative_humidity: Option<f64>,
  pub avg_absolute_humidity: Option<f64>,
  /// Worker-side wall time.
  pub elapsed_us: u64,
  pub job_ts: JobTs,
}

/// Interpolation outcome. A degenerate configuration (no anchors) comes
/// back as an empty `Field`; a failed RBF solve comes back as `Failed`
/// so the caller can keep its previous field and surface the reason.
#[derive(Debug)]
pub enum InterpolationReply {
  Field(InterpolationResult),
  Failed {
    error: crate::error::FieldError,
    job_ts: JobTs,
  },
}

impl InterpolationReply {
  pub fn job_ts(&self) -> JobTs {
    match self {
      InterpolationReply::Field(r) => r.job_ts,
      InterpolationReply::Failed { job_ts, .. } => *job_ts,
    }
  }
}
