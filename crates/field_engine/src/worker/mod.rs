//! Worker offload for classification and interpolation jobs.
//!
//! ```text
//! ┌──────────────┐  dispatch(job, job_ts)   ┌─────────────────┐
//! │ interactive  ├─────────────────────────►│ rayon worker    │
//! │ side         │                          │ (runs to        │
//! │ (poll-based) │◄─────────────────────────┤ completion)     │
//! └──────────────┘  progress* , result×1    └─────────────────┘
//! ```
//!
//! Communication is message passing over crossbeam channels; buffers
//! move into jobs and move back in results (single-owner discipline,
//! enforced by the compiler). There is no hard cancellation: dispatching
//! a newer job supersedes the old one, whose result is discarded at
//! consumption time by comparing its `job_ts` against the greatest
//! dispatched stamp, an invariant that holds regardless of message
//! arrival order.

pub mod messages;
pub mod orchestrator;
pub mod runner;

pub use messages::{
  ClassificationJob, ClassificationProgress, ClassificationResult, ClassifyMessage,
  InterpolationJob, InterpolationReply, InterpolationResult, JobTs, MeshBuffers,
};
pub use orchestrator::FieldWorker;
