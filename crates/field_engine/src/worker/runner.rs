//! Job execution inside a worker.
//!
//! Each runner owns its job outright, runs the algorithm synchronously
//! to completion, and emits messages through the channel it was handed.
//! Send failures mean the orchestrator has shut down; the work is simply
//! discarded.

use crossbeam_channel::Sender;
use glam::DVec3;
use web_time::Instant;

use crate::aggregate;
use crate::classify;
use crate::constants::{CLASSIFY_BATCH_SIZE, PROGRESS_INTERVAL_MS};
use crate::geometry::{BoundaryMesh, GeometryIndex};
use crate::interp::{self, EstimatorParams};
use crate::sensors::{self, SensorAnchor};
use crate::types::Metric;

use super::messages::{
  ClassificationJob, ClassificationProgress, ClassificationResult, ClassifyMessage,
  InterpolationJob, InterpolationReply, InterpolationResult,
};

/// Run one classification job, emitting throttled progress and exactly
/// one result.
pub fn run_classification(job: ClassificationJob, tx: Sender<ClassifyMessage>) {
  let started = Instant::now();
  let job_ts = job.job_ts;

  // A malformed geometry buffer degrades to an empty mesh: every query
  // reports zero crossings and classification rejects everything.
  let mesh = BoundaryMesh::new(job.geometry.positions, job.geometry.indices).unwrap_or_else(|e| {
    tracing::warn!(?job_ts, error = %e, "classification geometry rejected, degrading to empty mesh");
    BoundaryMesh::default()
  });
  let index = GeometryIndex::build(&mesh);

  let mut last_report = Instant::now();
  let outcome = classify::classify_points(
    &index,
    &job.points,
    &job.config,
    CLASSIFY_BATCH_SIZE,
    |processed, total| {
      let now = Instant::now();
      let is_final = processed == total;
      if !is_final && now.duration_since(last_report).as_millis() < PROGRESS_INTERVAL_MS as u128 {
        return;
      }
      last_report = now;
      let _ = tx.send(ClassifyMessage::Progress(ClassificationProgress {
        processed,
        total,
        percentage: percentage(processed, total),
        job_ts,
      }));
    },
  );

  tracing::debug!(
    ?job_ts,
    processed = outcome.total_processed,
    inside = outcome.total_inside,
    "classification finished"
  );
  let _ = tx.send(ClassifyMessage::Result(ClassificationResult {
    interior_points: outcome.interior_points,
    total_processed: outcome.total_processed,
    total_inside: outcome.total_inside,
    elapsed_us: started.elapsed().as_micros() as u64,
    job_ts,
  }));
}

/// Run one interpolation job, emitting exactly one reply.
pub fn run_interpolation(job: InterpolationJob, tx: Sender<InterpolationReply>) {
  let started = Instant::now();
  let job_ts = job.job_ts;
  let reply = match interpolate_field(job) {
    Ok(mut result) => {
      result.elapsed_us = started.elapsed().as_micros() as u64;
      InterpolationReply::Field(result)
    }
    Err(error) => {
      tracing::warn!(?job_ts, %error, "interpolation job failed");
      InterpolationReply::Failed { error, job_ts }
    }
  };
  let _ = tx.send(reply);
}

fn interpolate_field(job: InterpolationJob) -> crate::error::Result<InterpolationResult> {
  let samples = sensors::sample_metric(&job.anchors, job.metric, job.timestamp_ms, job.window_ms);
  let Some((anchor_min, anchor_max)) = interp::sample_range(&samples) else {
    // Zero usable anchors: interpolation is undefined. Report an empty
    // field rather than an error; callers check before use.
    return Ok(empty_result(job));
  };

  let estimator = interp::build_estimator(&samples, &job.params)?;
  let mut values: Vec<f64> = job
    .points
    .chunks_exact(3)
    .map(|p| estimator.estimate(DVec3::new(p[0] as f64, p[1] as f64, p[2] as f64)))
    .collect();

  let summary = aggregate::summarize(&mut values, anchor_min, anchor_max);

  // Secondary averages feeding the mass calculations. An RBF refit per
  // metric is another O(n³) solve, but sensor counts are small enough
  // that it has not shown up in traces.
  let avg_temperature_c = if job.metric == Metric::Temperature {
    summary.volumetric_average
  } else {
    secondary_average(&job, Metric::Temperature, &job.params)?
  };
  let avg_relative_humidity = if job.metric == Metric::RelativeHumidity {
    summary.volumetric_average
  } else {
    secondary_average(&job, Metric::RelativeHumidity, &job.params)?
  };
  let avg_absolute_humidity = if job.metric == Metric::AbsoluteHumidity {
    summary.volumetric_average
  } else {
    secondary_average(&job, Metric::AbsoluteHumidity, &job.params)?
  };

  let air_mass_kg = aggregate::air_mass_kg(
    avg_temperature_c,
    avg_relative_humidity,
    job.exact_volume_m3,
  );
  let water_mass_kg = aggregate::water_mass_kg(avg_absolute_humidity, job.exact_volume_m3);

  Ok(InterpolationResult {
    interpolation_point_count: values.len(),
    min_value: summary.min,
    max_value: summary.max,
    volumetric_average: summary.volumetric_average,
    values,
    positions: job.points,
    air_mass_kg,
    water_mass_kg,
    avg_temperature_c,
    avg_relative_humidity,
    avg_absolute_humidity,
    elapsed_us: 0,
    job_ts: job.job_ts,
  })
}

/// Volumetric average of a secondary metric over the accepted points.
fn secondary_average(
  job: &InterpolationJob,
  metric: Metric,
  params: &EstimatorParams,
) -> crate::error::Result<Option<f64>> {
  let samples = sensors::sample_metric(&job.anchors, metric, job.timestamp_ms, job.window_ms);
  let Some((anchor_min, anchor_max)) = interp::sample_range(&samples) else {
    return Ok(None);
  };
  let estimator = interp::build_estimator(&samples, params)?;
  let mut values: Vec<f64> = job
    .points
    .chunks_exact(3)
    .map(|p| estimator.estimate(DVec3::new(p[0] as f64, p[1] as f64, p[2] as f64)))
    .collect();
  aggregate::clamp_to_anchor_range(&mut values, anchor_min, anchor_max);
  Ok(aggregate::volumetric_average(&values))
}

fn empty_result(job: InterpolationJob) -> InterpolationResult {
  InterpolationResult {
    positions: job.points,
    values: Vec::new(),
    min_value: 0.0,
    max_value: 0.0,
    volumetric_average: None,
    interpolation_point_count: 0,
    air_mass_kg: None,
    water_mass_kg: None,
    avg_temperature_c: None,
    avg_relative_humidity: None,
    avg_absolute_humidity: None,
    elapsed_us: 0,
    job_ts: job.job_ts,
  }
}

#[inline]
fn percentage(processed: usize, total: usize) -> f32 {
  if total == 0 {
    100.0
  } else {
    processed as f32 / total as f32 * 100.0
  }
}

/// Fit an estimator for synchronous callers that bypass the worker
/// (tests, benches, one-off probes at a single point).
pub fn fit_estimator(
  anchors: &[SensorAnchor],
  metric: Metric,
  timestamp_ms: i64,
  window_ms: i64,
  params: &EstimatorParams,
) -> crate::error::Result<Box<dyn interp::FieldEstimator>> {
  let samples = sensors::sample_metric(anchors, metric, timestamp_ms, window_ms);
  interp::build_estimator(&samples, params)
}
