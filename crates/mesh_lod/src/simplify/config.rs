//! LOD generation settings.

use crate::constants::{DEFAULT_MAX_OCTREE_DEPTH, DEFAULT_PADDING_PERCENT, SAME_POSITION_EPSILON_SQ};

/// How a cluster of source vertices collapses into one output vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SimplificationMethod {
  /// Arithmetic mean of every member attribute.
  #[default]
  Clustering,
  /// Position minimizing the summed squared distance to the members'
  /// tangent planes; other attributes averaged.
  QuadricErrorMetrics,
}

/// Settings for [`generate_lods`](super::generate_lods).
#[derive(Clone, Debug, PartialEq)]
pub struct LodConfig {
  pub method: SimplificationMethod,

  /// Deepest octree level visited. Level `L` clusters into at most `8^L`
  /// cells, so this bounds the number of generated levels at `max + 1`.
  pub max_octree_depth: usize,

  /// Padding added on every side of the root box, as a percentage of the
  /// mesh's largest extent.
  pub padding_percent: f32,

  /// Squared distance under which two vertices count as the same position.
  pub same_position_epsilon_sq: f32,

  /// Derive geometry normals when the source has none. They only steer QEM
  /// planes and output winding; the output still carries no normals.
  pub recompute_missing_normals: bool,
}

impl Default for LodConfig {
  fn default() -> Self {
    Self {
      method: SimplificationMethod::default(),
      max_octree_depth: DEFAULT_MAX_OCTREE_DEPTH,
      padding_percent: DEFAULT_PADDING_PERCENT,
      same_position_epsilon_sq: SAME_POSITION_EPSILON_SQ,
      recompute_missing_normals: true,
    }
  }
}

impl LodConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_method(mut self, method: SimplificationMethod) -> Self {
    self.method = method;
    self
  }

  pub fn with_max_octree_depth(mut self, depth: usize) -> Self {
    self.max_octree_depth = depth;
    self
  }

  pub fn with_padding_percent(mut self, percent: f32) -> Self {
    self.padding_percent = percent;
    self
  }

  pub fn with_same_position_epsilon_sq(mut self, epsilon_sq: f32) -> Self {
    self.same_position_epsilon_sq = epsilon_sq;
    self
  }

  pub fn with_recompute_missing_normals(mut self, recompute: bool) -> Self {
    self.recompute_missing_normals = recompute;
    self
  }
}
