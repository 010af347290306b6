//! Job dispatch and stale-result suppression.
//!
//! `FieldWorker` is an explicit resource with a declared lifecycle:
//! created once, owned by whoever drives the engine, torn down with
//! [`FieldWorker::shutdown`]. Dispatch stamps each job from an atomic
//! generation counter; poll compares every received message against the
//! greatest stamp dispatched for that job kind and drops the rest. An
//! in-flight job is never interrupted; superseding it just guarantees
//! its output is ignored.

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::error::{FieldError, Result};

use super::messages::{
  ClassificationJob, ClassifyMessage, InterpolationJob, InterpolationReply, JobTs,
};
use super::runner;

/// Dispatches jobs onto rayon's pool and filters their replies.
pub struct FieldWorker {
  classify_tx: Sender<ClassifyMessage>,
  classify_rx: Receiver<ClassifyMessage>,
  interp_tx: Sender<InterpolationReply>,
  interp_rx: Receiver<InterpolationReply>,
  /// Generation counter shared by both job kinds, so stamps are
  /// strictly increasing across the whole protocol.
  job_counter: AtomicU64,
  /// Greatest classification stamp dispatched.
  latest_classify: AtomicU64,
  /// Greatest interpolation stamp dispatched.
  latest_interp: AtomicU64,
  shut_down: bool,
}

impl FieldWorker {
  /// Create a worker endpoint. Rayon manages the actual thread pool;
  /// this owns only the channels and the generation counters.
  pub fn new() -> Self {
    let (classify_tx, classify_rx) = unbounded();
    let (interp_tx, interp_rx) = unbounded();
    Self {
      classify_tx,
      classify_rx,
      interp_tx,
      interp_rx,
      job_counter: AtomicU64::new(1),
      latest_classify: AtomicU64::new(0),
      latest_interp: AtomicU64::new(0),
      shut_down: false,
    }
  }

  fn next_stamp(&self) -> JobTs {
    JobTs(self.job_counter.fetch_add(1, Ordering::Relaxed))
  }

  /// Dispatch a classification job. Returns its stamp; any previously
  /// dispatched classification is superseded from this moment.
  pub fn dispatch_classification(&self, mut job: ClassificationJob) -> Result<JobTs> {
    if self.shut_down {
      return Err(FieldError::Worker("worker is shut down".into()));
    }
    job.config.validate()?;

    let stamp = self.next_stamp();
    job.job_ts = stamp;
    self.latest_classify.store(stamp.0, Ordering::Release);

    let tx = self.classify_tx.clone();
    rayon::spawn(move || runner::run_classification(job, tx));
    Ok(stamp)
  }

  /// Dispatch an interpolation job. Returns its stamp; any previously
  /// dispatched interpolation is superseded from this moment.
  pub fn dispatch_interpolation(&self, mut job: InterpolationJob) -> Result<JobTs> {
    if self.shut_down {
      return Err(FieldError::Worker("worker is shut down".into()));
    }

    let stamp = self.next_stamp();
    job.job_ts = stamp;
    self.latest_interp.store(stamp.0, Ordering::Release);

    let tx = self.interp_tx.clone();
    rayon::spawn(move || runner::run_interpolation(job, tx));
    Ok(stamp)
  }

  /// Drain classification messages, keeping only those stamped with the
  /// greatest dispatched generation. Stale messages (including results
  /// arriving *after* a newer job's result) are logged and dropped.
  pub fn poll_classification(&self) -> Vec<ClassifyMessage> {
    let current = JobTs(self.latest_classify.load(Ordering::Acquire));
    let mut kept = Vec::new();
    while let Ok(msg) = self.classify_rx.try_recv() {
      if msg.job_ts() == current {
        kept.push(msg);
      } else {
        tracing::debug!(stale = ?msg.job_ts(), ?current, "discarding stale classification message");
      }
    }
    kept
  }

  /// Drain interpolation replies, keeping only the current generation.
  pub fn poll_interpolation(&self) -> Vec<InterpolationReply> {
    let current = JobTs(self.latest_interp.load(Ordering::Acquire));
    let mut kept = Vec::new();
    while let Ok(reply) = self.interp_rx.try_recv() {
      if reply.job_ts() == current {
        kept.push(reply);
      } else {
        tracing::debug!(stale = ?reply.job_ts(), ?current, "discarding stale interpolation reply");
      }
    }
    kept
  }

  /// True when a dispatched stamp is still the live generation.
  pub fn is_current_classification(&self, stamp: JobTs) -> bool {
    JobTs(self.latest_classify.load(Ordering::Acquire)) == stamp
  }

  /// True when a dispatched stamp is still the live generation.
  pub fn is_current_interpolation(&self, stamp: JobTs) -> bool {
    JobTs(self.latest_interp.load(Ordering::Acquire)) == stamp
  }

  /// Tear down the endpoint. In-flight jobs run to completion on the
  /// pool; their sends fail silently and the work is discarded.
  pub fn shutdown(&mut self) {
    self.shut_down = true;
    // Future polls see an impossible generation, so everything still in
    // the channels is dropped on the next drain.
    self.latest_classify.store(0, Ordering::Release);
    self.latest_interp.store(0, Ordering::Release);
  }

  /// Whether `shutdown` has been called.
  pub fn is_shut_down(&self) -> bool {
    self.shut_down
  }
}

impl Default for FieldWorker {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod orchestrator_test;
