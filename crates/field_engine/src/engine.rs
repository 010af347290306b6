//! Engine facade: explicit state, explicit lifecycle.
//!
//! `FieldEngine` owns the boundary mesh, its geometry index and exact
//! volume, the anchor set, the configuration, and the worker endpoint.
//! Everything the reconstruction needs flows through this one object;
//! there is no ambient store and no lazily-created shared worker. Create
//! it, feed it, poll it, shut it down.
//!
//! Derived state (lattice, accepted points, field) is a pure function of
//! the inputs: changing the mesh or the resolution invalidates the
//! lattice and everything downstream, changing anchors or interpolation
//! parameters invalidates only the field.

use glam::DVec3;

use crate::classify::{self, ClassifierConfig};
use crate::error::{FieldError, Result};
use crate::geometry::{enclosed_volume, BoundaryMesh, GeometryIndex};
use crate::interp::EstimatorParams;
use crate::lattice::Lattice;
use crate::sensors::SensorAnchor;
use crate::types::{Aabb, Metric, ScalarField};
use crate::worker::{
  ClassificationJob, ClassifyMessage, FieldWorker, InterpolationJob, InterpolationReply, JobTs,
  MeshBuffers,
};

/// Full configuration surface of the reconstruction engine.
#[derive(Clone, Debug)]
pub struct EngineConfig {
  /// Lattice spacing in world units.
  pub resolution: f64,
  /// Classifier tolerance and air/solid mode.
  pub classifier: ClassifierConfig,
  /// Interpolation method, IDW power, RBF kernel.
  pub estimator: EstimatorParams,
  /// Metric the field reconstructs.
  pub metric: Metric,
  /// Smoothing window for reading selection, milliseconds.
  pub smoothing_window_ms: i64,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      resolution: 0.25,
      classifier: ClassifierConfig::default(),
      estimator: EstimatorParams::default(),
      metric: Metric::Temperature,
      smoothing_window_ms: 0,
    }
  }
}

impl EngineConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_resolution(mut self, resolution: f64) -> Self {
    self.resolution = resolution;
    self
  }

  pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
    self.classifier = classifier;
    self
  }

  pub fn with_estimator(mut self, estimator: EstimatorParams) -> Self {
    self.estimator = estimator;
    self
  }

  pub fn with_metric(mut self, metric: Metric) -> Self {
    self.metric = metric;
    self
  }

  pub fn with_smoothing_window_ms(mut self, window_ms: i64) -> Self {
    self.smoothing_window_ms = window_ms;
    self
  }
}

/// Events surfaced by [`FieldEngine::poll`].
#[derive(Debug)]
pub enum EngineEvent {
  /// Classification progress for the live job.
  ClassificationProgress {
    processed: usize,
    total: usize,
    percentage: f32,
  },
  /// The accepted lattice changed.
  AcceptedLatticeReady {
    total_processed: usize,
    total_inside: usize,
  },
  /// A new scalar field (and its aggregates) landed.
  FieldReady,
  /// The live interpolation job failed; the previous field is kept.
  FieldFailed(FieldError),
}

/// Aggregates from the latest field reconstruction.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldAggregates {
  pub volumetric_average: Option<f64>,
  pub air_mass_kg: Option<f64>,
  pub water_mass_kg: Option<f64>,
  pub avg_temperature_c: Option<f64>,
  pub avg_relative_humidity: Option<f64>,
  pub avg_absolute_humidity: Option<f64>,
}

/// Owns all reconstruction state and the worker endpoint.
pub struct FieldEngine {
  config: EngineConfig,
  worker: FieldWorker,

  mesh: Option<BoundaryMesh>,
  index: Option<GeometryIndex>,
  exact_volume_m3: f64,
  anchors: Vec<SensorAnchor>,

  lattice: Option<Lattice>,
  accepted_points: Option<Vec<f32>>,
  field: Option<ScalarField>,
  aggregates: FieldAggregates,
}

impl FieldEngine {
  /// Create an engine with its own worker endpoint.
  pub fn new(config: EngineConfig) -> Self {
    Self {
      config,
      worker: FieldWorker::new(),
      mesh: None,
      index: None,
      exact_volume_m3: 0.0,
      anchors: Vec::new(),
      lattice: None,
      accepted_points: None,
      field: None,
      aggregates: FieldAggregates::default(),
    }
  }

  /// Load (or replace) the boundary mesh. Rebuilds the geometry index
  /// and the exact volume, and invalidates all derived state.
  pub fn set_mesh(&mut self, positions: Vec<f32>, indices: Option<Vec<u32>>) -> Result<()> {
    let mesh = BoundaryMesh::new(positions, indices)?;
    self.exact_volume_m3 = enclosed_volume(&mesh);
    self.index = Some(GeometryIndex::build(&mesh));
    self.mesh = Some(mesh);
    self.invalidate_lattice();
    Ok(())
  }

  /// Replace the anchor set. Invalidates the field, not the lattice.
  pub fn set_anchors(&mut self, anchors: Vec<SensorAnchor>) {
    self.anchors = anchors;
    self.field = None;
    self.aggregates = FieldAggregates::default();
  }

  /// Update configuration. Resolution or classifier changes invalidate
  /// the lattice; estimator/metric changes invalidate only the field.
  pub fn set_config(&mut self, config: EngineConfig) {
    let lattice_changed = config.resolution != self.config.resolution
      || config.classifier.tolerance != self.config.classifier.tolerance
      || config.classifier.mode != self.config.classifier.mode;
    self.config = config;
    if lattice_changed {
      self.invalidate_lattice();
    } else {
      self.field = None;
      self.aggregates = FieldAggregates::default();
    }
  }

  fn invalidate_lattice(&mut self) {
    self.lattice = None;
    self.accepted_points = None;
    self.field = None;
    self.aggregates = FieldAggregates::default();
  }

  /// Generate the lattice over the mesh bounds and dispatch a
  /// classification job for it.
  ///
  /// Returns the job stamp. With no mesh loaded the lattice cannot be
  /// bounded and dispatch fails.
  pub fn request_classification(&mut self) -> Result<JobTs> {
    let mesh = self
      .mesh
      .as_ref()
      .ok_or_else(|| FieldError::Geometry("no boundary mesh loaded".into()))?;
    let bounds = mesh
      .aabb()
      .ok_or_else(|| FieldError::Geometry("boundary mesh is empty".into()))?;

    let lattice = Lattice::generate(bounds, self.config.resolution);
    let points = lattice.points.clone();
    self.lattice = Some(lattice);

    let (positions, indices) = mesh.clone().into_buffers();
    self.worker.dispatch_classification(ClassificationJob {
      points,
      geometry: MeshBuffers { positions, indices },
      config: self.config.classifier,
      job_ts: JobTs::default(),
    })
  }

  /// Dispatch an interpolation job over the accepted lattice at the
  /// given playback timestamp.
  pub fn request_field(&mut self, timestamp_ms: i64) -> Result<JobTs> {
    let points = self
      .accepted_points
      .clone()
      .ok_or_else(|| FieldError::Worker("no accepted lattice; classify first".into()))?;

    self.worker.dispatch_interpolation(InterpolationJob {
      anchors: self.anchors.clone(),
      timestamp_ms,
      window_ms: self.config.smoothing_window_ms,
      metric: self.config.metric,
      points,
      params: self.config.estimator,
      exact_volume_m3: self.exact_volume_m3,
      job_ts: JobTs::default(),
    })
  }

  /// Drain worker messages, fold current-generation results into engine
  /// state, and report what changed. Stale results never reach this
  /// point; the worker endpoint drops them.
  pub fn poll(&mut self) -> Vec<EngineEvent> {
    let mut events = Vec::new();

    for msg in self.worker.poll_classification() {
      match msg {
        ClassifyMessage::Progress(p) => events.push(EngineEvent::ClassificationProgress {
          processed: p.processed,
          total: p.total,
          percentage: p.percentage,
        }),
        ClassifyMessage::Result(r) => {
          self.accepted_points = Some(r.interior_points);
          self.field = None;
          self.aggregates = FieldAggregates::default();
          events.push(EngineEvent::AcceptedLatticeReady {
            total_processed: r.total_processed,
            total_inside: r.total_inside,
          });
        }
      }
    }

    for reply in self.worker.poll_interpolation() {
      match reply {
        InterpolationReply::Field(result) => {
          self.field = Some(ScalarField {
            metric: self.config.metric,
            values: result.values,
            min: result.min_value,
            max: result.max_value,
          });
          self.aggregates = FieldAggregates {
            volumetric_average: result.volumetric_average,
            air_mass_kg: result.air_mass_kg,
            water_mass_kg: result.water_mass_kg,
            avg_temperature_c: result.avg_temperature_c,
            avg_relative_humidity: result.avg_relative_humidity,
            avg_absolute_humidity: result.avg_absolute_humidity,
          };
          events.push(EngineEvent::FieldReady);
        }
        InterpolationReply::Failed { error, .. } => {
          events.push(EngineEvent::FieldFailed(error));
        }
      }
    }

    events
  }

  /// Synchronous point-in-volume query against the main-thread geometry
  /// index (picking, hover). `false` with no mesh loaded.
  pub fn is_inside(&self, position: DVec3) -> bool {
    match &self.index {
      Some(index) => classify::classify_point(index, position, &self.config.classifier),
      None => false,
    }
  }

  /// Probe the reconstructed metric at one point without a worker round
  /// trip (hover tooltips).
  pub fn probe(&self, position: DVec3, timestamp_ms: i64) -> Result<f64> {
    let estimator = crate::worker::runner::fit_estimator(
      &self.anchors,
      self.config.metric,
      timestamp_ms,
      self.config.smoothing_window_ms,
      &self.config.estimator,
    )?;
    Ok(estimator.estimate(position))
  }

  /// The full candidate lattice from the latest classification request.
  pub fn lattice(&self) -> Option<&Lattice> {
    self.lattice.as_ref()
  }

  /// Accepted lattice points from the latest classification, flat xyz.
  pub fn accepted_points(&self) -> Option<&[f32]> {
    self.accepted_points.as_deref()
  }

  /// Latest reconstructed field, aligned to `accepted_points` order.
  pub fn field(&self) -> Option<&ScalarField> {
    self.field.as_ref()
  }

  /// Aggregates from the latest field.
  pub fn aggregates(&self) -> &FieldAggregates {
    &self.aggregates
  }

  /// Exact mesh volume, m³ (0 with no mesh).
  pub fn exact_volume_m3(&self) -> f64 {
    self.exact_volume_m3
  }

  /// Bounds of the loaded mesh.
  pub fn mesh_bounds(&self) -> Option<Aabb> {
    self.mesh.as_ref().and_then(|m| m.aabb())
  }

  /// Current configuration.
  pub fn config(&self) -> &EngineConfig {
    &self.config
  }

  /// Tear down the worker endpoint. In-flight jobs finish and are
  /// discarded; the engine keeps its last computed state for reading.
  pub fn shutdown(&mut self) {
    self.worker.shutdown();
  }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;
