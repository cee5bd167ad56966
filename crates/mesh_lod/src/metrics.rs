//! Engine-agnostic metrics for LOD generation.
//!
//! Feature-gated and runtime-toggled so recording costs nothing when
//! disabled. Per-call statistics ([`LodGenerationStats`]) are always
//! produced; this module only aggregates them across calls.
//!
//! # Usage
//!
//! ```ignore
//! use mesh_lod::metrics::{LodMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! let (lods, stats) = generate_lods_with_stats(&mesh, &config)?;
//! metrics.record_generation(&stats);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

use crate::simplify::LodGenerationStats;

/// Output levels tracked individually; deeper ones share the last slot.
pub const TRACKED_LEVELS: usize = 16;

/// Runtime toggle for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// True when metrics are compiled in and enabled at runtime.
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Most recent timing samples in microseconds, oldest evicted first.
#[derive(Debug, Clone)]
pub struct TimingWindow {
  samples: VecDeque<u64>,
  capacity: usize,
}

impl TimingWindow {
  pub fn new(capacity: usize) -> Self {
    Self {
      samples: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  pub fn push(&mut self, us: u64) {
    if self.capacity == 0 {
      return;
    }
    if self.samples.len() == self.capacity {
      self.samples.pop_front();
    }
    self.samples.push_back(us);
  }

  pub fn len(&self) -> usize {
    self.samples.len()
  }

  pub fn is_empty(&self) -> bool {
    self.samples.is_empty()
  }

  pub fn clear(&mut self) {
    self.samples.clear();
  }

  /// Mean of the retained samples, 0 when empty.
  pub fn average_us(&self) -> f64 {
    if self.samples.is_empty() {
      return 0.0;
    }
    self.samples.iter().sum::<u64>() as f64 / self.samples.len() as f64
  }

  pub fn max_us(&self) -> Option<u64> {
    self.samples.iter().copied().max()
  }
}

/// Aggregated statistics over many generation calls.
#[derive(Debug, Clone)]
pub struct LodMetrics {
  /// Meshes produced at each output level (index = position in the array).
  pub meshes_per_level: [u64; TRACKED_LEVELS],
  /// Vertex count per output level.
  pub vertices_per_level: [u64; TRACKED_LEVELS],
  /// Index count per output level.
  pub indices_per_level: [u64; TRACKED_LEVELS],

  /// Calls that fell back to appending the source copy.
  pub source_appends: u64,
  /// Levels dropped for lack of triangles.
  pub skipped_levels: u64,

  /// Rolling window of whole-call times in microseconds.
  pub generation_timings: TimingWindow,
  /// Rolling window of per-level times in microseconds.
  pub level_timings: TimingWindow,

  pub last_generation_us: u64,
  /// Calls recorded this session.
  pub total_generations: u64,
}

impl Default for LodMetrics {
  fn default() -> Self {
    Self {
      meshes_per_level: [0; TRACKED_LEVELS],
      vertices_per_level: [0; TRACKED_LEVELS],
      indices_per_level: [0; TRACKED_LEVELS],
      source_appends: 0,
      skipped_levels: 0,
      generation_timings: TimingWindow::new(128),
      level_timings: TimingWindow::new(512),
      last_generation_us: 0,
      total_generations: 0,
    }
  }
}

impl LodMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Reset everything except the session total.
  pub fn reset(&mut self) {
    self.meshes_per_level.fill(0);
    self.vertices_per_level.fill(0);
    self.indices_per_level.fill(0);
    self.source_appends = 0;
    self.skipped_levels = 0;
    self.generation_timings.clear();
    self.level_timings.clear();
    self.last_generation_us = 0;
  }

  /// Fold one call's statistics in.
  pub fn record_generation(&mut self, stats: &LodGenerationStats) {
    if !is_enabled() {
      return;
    }

    for (index, level) in stats.levels.iter().enumerate() {
      let slot = index.min(TRACKED_LEVELS - 1);
      self.meshes_per_level[slot] += 1;
      self.vertices_per_level[slot] += level.vertex_count as u64;
      self.indices_per_level[slot] += level.index_count as u64;
      self.level_timings.push(level.time_us);
    }

    self.source_appends += stats.source_appended as u64;
    self.skipped_levels += stats.skipped_levels as u64;
    self.generation_timings.push(stats.total_us);
    self.last_generation_us = stats.total_us;
    self.total_generations += 1;
  }

  pub fn total_meshes(&self) -> u64 {
    self.meshes_per_level.iter().sum()
  }

  pub fn total_indices(&self) -> u64 {
    self.indices_per_level.iter().sum()
  }

  pub fn avg_generation_us(&self) -> f64 {
    self.generation_timings.average_us()
  }

  /// Slowest level among the retained level timings.
  pub fn slowest_level_us(&self) -> Option<u64> {
    self.level_timings.max_us()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_timing_window_evicts_oldest() {
    let mut window = TimingWindow::new(3);
    assert!(window.is_empty());
    assert_eq!(window.max_us(), None);
    assert_eq!(window.average_us(), 0.0);

    window.push(10);
    window.push(50);
    window.push(30);
    assert_eq!(window.average_us(), 30.0);

    window.push(40);
    assert_eq!(window.len(), 3);
    assert_eq!(window.average_us(), 40.0);
    assert_eq!(window.max_us(), Some(50));

    window.push(20);
    assert_eq!(window.max_us(), Some(40));
  }

  #[test]
  fn test_zero_capacity_window_stays_empty() {
    let mut window = TimingWindow::new(0);
    window.push(1u64);
    assert!(window.is_empty());
  }

  #[cfg(feature = "metrics")]
  #[test]
  fn test_record_generation() {
    use crate::simplify::LevelStats;

    let level = |vertex_count, index_count| LevelStats {
      octree_level: Some(1),
      cluster_count: vertex_count,
      vertex_count,
      index_count,
      time_us: 5,
    };
    let stats = LodGenerationStats {
      levels: vec![level(8, 36), level(24, 36)],
      octree_depth: 2,
      skipped_levels: 1,
      source_appended: true,
      total_us: 40,
    };

    let mut metrics = LodMetrics::new();
    metrics.record_generation(&stats);
    metrics.record_generation(&stats);

    assert_eq!(metrics.total_generations, 2);
    assert_eq!(metrics.meshes_per_level[0], 2);
    assert_eq!(metrics.vertices_per_level[1], 48);
    assert_eq!(metrics.total_indices(), 144);
    assert_eq!(metrics.source_appends, 2);
    assert_eq!(metrics.skipped_levels, 2);
    assert_eq!(metrics.avg_generation_us(), 40.0);
    assert_eq!(metrics.slowest_level_us(), Some(5));

    metrics.reset();
    assert_eq!(metrics.total_meshes(), 0);
    assert!(metrics.level_timings.is_empty());
    assert_eq!(metrics.total_generations, 2);
  }

  #[cfg(not(feature = "metrics"))]
  #[test]
  fn test_recording_disabled_without_feature() {
    let mut metrics = LodMetrics::new();
    metrics.record_generation(&LodGenerationStats::default());
    assert_eq!(metrics.total_generations, 0);
  }
}
