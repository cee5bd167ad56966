//! Octree module: generic spatial partition used as a clustering substrate.
//!
//! The tree is explicit and ephemeral: built in one [`Octree::fill`] call
//! from owned elements, queried by level, then dropped. It knows nothing
//! about its elements beyond what the injected [`Classifier`] answers.
//!
//! # Level Convention
//!
//! Level 0 = root (coarsest, one cell), higher level = finer.
//!
//! ```text
//! Level 0        Level 1              Level 2
//! ┌───────┐      ┌───┬───┐            ┌─┬─┬───┐
//! │       │      │   │   │            ├─┼─┤   │   ◄─ the right cells held
//! │   *   │ ──►  ├───┼───┤    ──►     ├─┴─┼───┤      ≤ 1 element and stopped
//! │       │      │   │   │            │   │   │      at level 1 ("early
//! └───────┘      └───┴───┘            └───┴───┘      pruned")
//! ```
//!
//! # Early Pruning
//!
//! A leaf that stopped subdividing above a requested level still surfaces
//! at that level when `include_early_pruned` is set, so regions that
//! collapsed early are never silently dropped from a level pass.
//!
//! # Module Structure
//!
//! - [`bounds`]: `Aabb` - boxes, padding, octant splits
//! - [`classifier`]: `Classifier<T>` - injected containment strategy
//! - [`node`]: `OctreeNode<T>` - leaf elements or eight children

pub mod bounds;
pub mod classifier;
pub mod node;

// Re-exports
pub use bounds::Aabb;
pub use classifier::{Classifier, PointClassifier};
pub use node::{NodeContent, OctreeNode};

/// Octree over elements of type `T`, classified by `C`.
#[derive(Clone, Debug)]
pub struct Octree<T, C> {
  root: OctreeNode<T>,
  classifier: C,
  depth: usize,
}

impl<T, C: Classifier<T>> Octree<T, C> {
  /// Create an empty octree with an empty (inverted) bounding box.
  pub fn new(classifier: C) -> Self {
    Self::with_bounds(Aabb::empty(), classifier)
  }

  /// Create an empty octree covering `bounds`.
  pub fn with_bounds(bounds: Aabb, classifier: C) -> Self {
    Self {
      root: OctreeNode::leaf(bounds, 0, Vec::new()),
      classifier,
      depth: 0,
    }
  }

  /// Replace the root box. Discards any previously filled elements.
  pub fn set_bounding_box(&mut self, bounds: Aabb) {
    self.root = OctreeNode::leaf(bounds, 0, Vec::new());
    self.depth = 0;
  }

  /// Distribute `elements` into the tree, subdividing up to `max_depth`.
  ///
  /// Elements the root box does not accept are dropped. Returns the deepest
  /// level actually reached, which is below `max_depth` when every cell
  /// emptied out or held a single element earlier.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "octree::fill"))]
  pub fn fill(&mut self, elements: Vec<T>, max_depth: usize) -> usize {
    let bounds = *self.root.bounds();
    let total = elements.len();
    let accepted: Vec<T> = elements
      .into_iter()
      .filter(|e| self.classifier.accepts(&bounds, e))
      .collect();

    if accepted.len() != total {
      #[cfg(feature = "tracing")]
      tracing::debug!(
        dropped = total - accepted.len(),
        "octree root rejected elements outside its bounding box"
      );
    }

    let (root, depth) = OctreeNode::build(bounds, 0, accepted, &self.classifier, max_depth);
    self.root = root;
    self.depth = depth;
    depth
  }

  /// Nodes present at `level`.
  ///
  /// With `include_early_pruned`, leaves that stopped above `level` are
  /// included in their place. Order is depth-first, octant order.
  pub fn children_at_level(&self, level: usize, include_early_pruned: bool) -> Vec<&OctreeNode<T>> {
    let mut out = Vec::new();
    self
      .root
      .collect_at_level(level, include_early_pruned, &mut out);
    out
  }
}

impl<T, C> Octree<T, C> {
  pub fn root(&self) -> &OctreeNode<T> {
    &self.root
  }

  pub fn bounds(&self) -> &Aabb {
    self.root.bounds()
  }

  pub fn classifier(&self) -> &C {
    &self.classifier
  }

  /// Deepest level reached by the last fill.
  pub fn depth(&self) -> usize {
    self.depth
  }

  /// Total number of nodes, root included.
  pub fn node_count(&self) -> usize {
    self.root.node_count()
  }

  /// Number of stored elements.
  pub fn len(&self) -> usize {
    self.root.element_count()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// All leaves, depth-first.
  pub fn leaves(&self) -> Vec<&OctreeNode<T>> {
    let mut out = Vec::new();
    self.root.collect_leaves(&mut out);
    out
  }
}
