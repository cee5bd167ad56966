//! Task queue for batched LOD generation.
//!
//! Following the stage pattern: Enqueue → Tick → Completions
//!
//! Each request is a single-threaded generation call; a tick runs the
//! pending batch across the rayon pool. On WASM, requires
//! wasm-bindgen-rayon initialization before use.

use rayon::prelude::*;
use web_time::Instant;

use crate::error::MeshResult;
use crate::simplify::{generate_lods_with_stats, LodConfig, LodGenerationStats};
use crate::types::Mesh;

/// Request to generate the LOD array of one mesh.
#[derive(Clone)]
pub struct LodRequest {
  /// Unique identifier for this request
  pub id: u64,
  /// Source mesh (owned snapshot)
  pub mesh: Mesh,
  /// Generation settings
  pub config: LodConfig,
}

/// Completed LOD array.
pub struct LodCompletion {
  /// Request ID this completion corresponds to
  pub id: u64,
  /// Generated levels and their statistics
  pub output: MeshResult<(Vec<Mesh>, LodGenerationStats)>,
  /// Wall time in microseconds, including scheduling on the worker
  pub generate_time_us: u64,
}

impl LodCompletion {
  /// Generated levels, empty when the request failed.
  pub fn lods(&self) -> &[Mesh] {
    match &self.output {
      Ok((lods, _)) => lods,
      Err(_) => &[],
    }
  }
}

/// Stage that generates LOD arrays for many meshes in parallel.
pub struct LodStage {
  /// Pending requests waiting to be processed
  pending: Vec<LodRequest>,
  /// Completed results ready to be collected
  completed: Vec<LodCompletion>,
  /// Next request ID
  next_id: u64,
}

impl Default for LodStage {
  fn default() -> Self {
    Self::new()
  }
}

impl LodStage {
  pub fn new() -> Self {
    Self {
      pending: Vec::new(),
      completed: Vec::new(),
      next_id: 0,
    }
  }

  /// Enqueue a mesh, returning the assigned ID.
  pub fn enqueue(&mut self, mesh: Mesh, config: LodConfig) -> u64 {
    let id = self.next_id;
    self.next_id += 1;
    self.pending.push(LodRequest { id, mesh, config });
    id
  }

  /// Process pending requests in parallel and move completions to output.
  /// Returns the number of requests processed this tick.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "task_queue::tick"))]
  pub fn tick(&mut self) -> usize {
    if self.pending.is_empty() {
      return 0;
    }

    let requests = std::mem::take(&mut self.pending);
    let count = requests.len();

    let completions: Vec<LodCompletion> = requests
      .into_par_iter()
      .map(|req| {
        let start = Instant::now();
        let output = generate_lods_with_stats(&req.mesh, &req.config);
        let generate_time_us = start.elapsed().as_micros() as u64;

        #[cfg(feature = "tracing")]
        if let Err(err) = &output {
          tracing::debug!(id = req.id, %err, "lod request failed");
        }

        LodCompletion {
          id: req.id,
          output,
          generate_time_us,
        }
      })
      .collect();

    self.completed.extend(completions);
    count
  }

  /// Take all completed results, in request order.
  pub fn drain_completions(&mut self) -> Vec<LodCompletion> {
    std::mem::take(&mut self.completed)
  }

  pub fn pending_count(&self) -> usize {
    self.pending.len()
  }

  pub fn completed_count(&self) -> usize {
    self.completed.len()
  }

  /// True when no work remains.
  pub fn is_idle(&self) -> bool {
    self.pending.is_empty() && self.completed.is_empty()
  }
}

#[cfg(test)]
#[path = "task_queue_test.rs"]
mod task_queue_test;
