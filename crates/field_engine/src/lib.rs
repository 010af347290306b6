//! field_engine - Room-climate scalar field reconstruction
//!
//! This crate reconstructs a continuous environmental field (temperature,
//! humidity, derived psychrometrics) inside a bounded 3D room from sparse
//! point sensors, and classifies which points of a regular sampling
//! lattice lie inside the habitable volume bounded by a triangulated
//! shell.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────┐   ┌─────────┐   ┌──────────┐   ┌─────────────┐   ┌───────────┐
//! │ Geometry ├──►│ Lattice ├──►│ Interior ├──►│ Interpolate ├──►│ Aggregate │
//! │ Index    │   │         │   │ Classify │   │ (IDW / RBF) │   │           │
//! └──────────┘   └─────────┘   └──────────┘   └─────────────┘   └───────────┘
//!      ▲              worker job (progress + result)   worker job (result)
//!      │
//!  BoundaryMesh ──► enclosed_volume ─────────────────────► air/water mass
//! ```
//!
//! The classifier and interpolator run as jobs on worker threads; the
//! interactive side polls and only ever honors the newest job's result
//! (see [`worker`] for the supersession rules).
//!
//! # Example
//!
//! ```ignore
//! use field_engine::{EngineConfig, FieldEngine};
//!
//! let mut engine = FieldEngine::new(EngineConfig::default());
//! engine.set_mesh(positions, Some(indices))?;
//! engine.set_anchors(anchors);
//!
//! engine.request_classification()?;
//! // ...poll each frame...
//! for event in engine.poll() {
//!     // AcceptedLatticeReady -> engine.request_field(timestamp)
//!     // FieldReady -> engine.field(), engine.aggregates()
//! }
//! ```

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{FieldError, Result};
pub use types::{Aabb, InterpolationMethod, Metric, RbfKernel, ScalarField, VolumeMode};

// Psychrometrics and sensor data
pub mod physics;
pub mod sensors;
pub use sensors::{AnchorSample, Reading, SensorAnchor};

// Boundary mesh, ray index, exact volume
pub mod geometry;
pub use geometry::{enclosed_volume, BoundaryMesh, GeometryIndex};

// Sampling lattice
pub mod lattice;
pub use lattice::Lattice;

// Interior classification
pub mod classify;
pub use classify::{ClassificationOutcome, ClassifierConfig};

// Scalar field interpolation
pub mod interp;
pub use interp::{EstimatorParams, FieldEstimator, IdwEstimator, RbfEstimator};

// Volumetric aggregation
pub mod aggregate;
pub use aggregate::FieldSummary;

// Worker protocol (dispatch, progress, supersession)
pub mod worker;
pub use worker::{FieldWorker, JobTs};

// Engine facade
pub mod engine;
pub use engine::{EngineConfig, EngineEvent, FieldAggregates, FieldEngine};
