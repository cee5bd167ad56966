//! Async LOD Pipeline
//!
//! Moves one `generate_lods` call off the calling thread.
//!
//! # Usage
//!
//! ```ignore
//! let mut pipeline = AsyncLodPipeline::new();
//!
//! // Start (non-blocking)
//! pipeline.start(LodJob {
//!     asset_id,
//!     mesh: mesh.clone(),
//!     config: LodConfig::default(),
//! });
//!
//! // Poll each frame
//! if let Some(result) = pipeline.poll_results() {
//!     if let Ok(lods) = result.lods {
//!         assets.replace_lods(result.asset_id, lods);
//!     }
//! }
//! ```

use crossbeam_channel::{self as channel, Receiver, TryRecvError};
use web_time::Instant;

use crate::error::MeshResult;
use crate::simplify::{generate_lods_with_stats, LodConfig, LodGenerationStats};
use crate::types::Mesh;

/// Request to generate one LOD array asynchronously.
#[derive(Clone)]
pub struct LodJob {
  /// Caller-chosen key echoed in the result.
  pub asset_id: u64,
  /// Source mesh snapshot.
  pub mesh: Mesh,
  pub config: LodConfig,
}

/// Finished job, to be published as a whole.
#[derive(Debug)]
pub struct LodJobResult {
  pub asset_id: u64,
  /// Generated levels, coarsest first.
  pub lods: MeshResult<Vec<Mesh>>,
  /// Statistics; default when generation failed.
  pub stats: LodGenerationStats,
  /// Wall time on the worker in microseconds.
  pub elapsed_us: u64,
}

/// Non-blocking single-job LOD pipeline.
///
/// Runs generation on rayon's thread pool.
pub struct AsyncLodPipeline {
  /// Receiver for pending result.
  receiver: Option<Receiver<LodJobResult>>,
}

impl AsyncLodPipeline {
  pub fn new() -> Self {
    Self { receiver: None }
  }

  /// Check if a job is running.
  pub fn is_busy(&self) -> bool {
    self.receiver.is_some()
  }

  /// Start generation.
  ///
  /// Returns `true` if started, `false` if already busy.
  pub fn start(&mut self, job: LodJob) -> bool {
    if self.is_busy() {
      return false;
    }

    let (sender, receiver) = channel::bounded(1);
    self.receiver = Some(receiver);

    rayon::spawn(move || {
      let result = run_lod_job(job);
      // Receiver dropped = cancelled
      let _ = sender.send(result);
    });

    true
  }

  /// Poll for the result (non-blocking).
  ///
  /// Returns `Some(result)` once complete, `None` while running or idle.
  pub fn poll_results(&mut self) -> Option<LodJobResult> {
    let receiver = self.receiver.as_ref()?;

    match receiver.try_recv() {
      Ok(result) => {
        self.receiver = None;
        Some(result)
      }
      Err(TryRecvError::Empty) => None,
      Err(TryRecvError::Disconnected) => {
        self.receiver = None;
        None
      }
    }
  }

  /// Drop interest in the running job. Its result is discarded when it
  /// finishes.
  pub fn cancel(&mut self) {
    self.receiver = None;
  }
}

impl Default for AsyncLodPipeline {
  fn default() -> Self {
    Self::new()
  }
}

/// Run one job (called on a worker thread).
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "pipeline::run_lod_job"))]
fn run_lod_job(job: LodJob) -> LodJobResult {
  let LodJob {
    asset_id,
    mesh,
    config,
  } = job;

  let start = Instant::now();
  let (lods, stats) = match generate_lods_with_stats(&mesh, &config) {
    Ok((lods, stats)) => (Ok(lods), stats),
    Err(err) => (Err(err), LodGenerationStats::default()),
  };

  LodJobResult {
    asset_id,
    lods,
    stats,
    elapsed_us: start.elapsed().as_micros() as u64,
  }
}
