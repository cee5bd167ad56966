//! OctreeNode - one cell of an explicit octree.
//!
//! A node is either a leaf holding elements, or a branch with exactly eight
//! children produced by a midpoint split of its box. Branches hold no
//! elements of their own; their elements are the union of their subtree.

use super::{Aabb, Classifier};

/// Node contents: leaf elements or eight children.
#[derive(Clone, Debug)]
pub enum NodeContent<T> {
  Leaf(Vec<T>),
  Branch(Box<[OctreeNode<T>; 8]>),
}

/// Octree cell.
#[derive(Clone, Debug)]
pub struct OctreeNode<T> {
  bounds: Aabb,
  /// Distance from the root (root = 0).
  depth: usize,
  content: NodeContent<T>,
}

impl<T> OctreeNode<T> {
  pub(crate) fn leaf(bounds: Aabb, depth: usize, elements: Vec<T>) -> Self {
    Self {
      bounds,
      depth,
      content: NodeContent::Leaf(elements),
    }
  }

  /// Build a subtree, subdividing until `max_depth` or until the node is
  /// homogeneous: at most one element, or every element the same cell as
  /// the first per [`Classifier::same_cell`].
  ///
  /// Returns the node and the deepest level reached inside it.
  pub(crate) fn build<C: Classifier<T>>(
    bounds: Aabb,
    depth: usize,
    elements: Vec<T>,
    classifier: &C,
    max_depth: usize,
  ) -> (Self, usize) {
    if depth >= max_depth || is_homogeneous(&elements, classifier) {
      return (Self::leaf(bounds, depth, elements), depth);
    }

    let child_bounds: [Aabb; 8] = std::array::from_fn(|o| bounds.octant(o as u8));
    let mut buckets: [Vec<T>; 8] = Default::default();

    for element in elements {
      // First accepting child wins so no element is clustered twice.
      match child_bounds
        .iter()
        .position(|cb| classifier.accepts(cb, &element))
      {
        Some(octant) => buckets[octant].push(element),
        None => {
          #[cfg(feature = "tracing")]
          tracing::debug!(depth, "octree element rejected by every child; dropped");
        }
      }
    }

    let mut reached = depth + 1;
    let children: [OctreeNode<T>; 8] = std::array::from_fn(|o| {
      let (child, child_depth) = Self::build(
        child_bounds[o],
        depth + 1,
        std::mem::take(&mut buckets[o]),
        classifier,
        max_depth,
      );
      reached = reached.max(child_depth);
      child
    });

    (
      Self {
        bounds,
        depth,
        content: NodeContent::Branch(Box::new(children)),
      },
      reached,
    )
  }

  pub fn bounds(&self) -> &Aabb {
    &self.bounds
  }

  pub fn depth(&self) -> usize {
    self.depth
  }

  pub fn content(&self) -> &NodeContent<T> {
    &self.content
  }

  pub fn is_leaf(&self) -> bool {
    matches!(self.content, NodeContent::Leaf(_))
  }

  /// Children of a branch, `None` for leaves.
  pub fn children(&self) -> Option<&[OctreeNode<T>; 8]> {
    match &self.content {
      NodeContent::Branch(children) => Some(&**children),
      NodeContent::Leaf(_) => None,
    }
  }

  /// Elements stored directly in this node (empty for branches).
  pub fn leaf_elements(&self) -> &[T] {
    match &self.content {
      NodeContent::Leaf(elements) => elements.as_slice(),
      NodeContent::Branch(_) => &[],
    }
  }

  /// Every element in this node's subtree.
  pub fn elements(&self) -> Vec<&T> {
    let mut out = Vec::new();
    self.collect_elements(&mut out);
    out
  }

  fn collect_elements<'a>(&'a self, out: &mut Vec<&'a T>) {
    match &self.content {
      NodeContent::Leaf(elements) => out.extend(elements.iter()),
      NodeContent::Branch(children) => {
        for child in children.iter() {
          child.collect_elements(out);
        }
      }
    }
  }

  /// Number of elements in this node's subtree.
  pub fn element_count(&self) -> usize {
    match &self.content {
      NodeContent::Leaf(elements) => elements.len(),
      NodeContent::Branch(children) => children.iter().map(|c| c.element_count()).sum(),
    }
  }

  /// Number of nodes in this subtree, including this one.
  pub fn node_count(&self) -> usize {
    1 + self
      .children()
      .map_or(0, |children| children.iter().map(|c| c.node_count()).sum())
  }

  /// Collect nodes for a level query.
  ///
  /// Nodes exactly at `level` are returned. With `include_early_pruned`,
  /// leaves that stopped subdividing above `level` are returned too, standing
  /// in for the cells they would have produced.
  pub(crate) fn collect_at_level<'a>(
    &'a self,
    level: usize,
    include_early_pruned: bool,
    out: &mut Vec<&'a OctreeNode<T>>,
  ) {
    if self.depth == level {
      out.push(self);
      return;
    }
    match &self.content {
      NodeContent::Leaf(_) => {
        if include_early_pruned && self.depth < level {
          out.push(self);
        }
      }
      NodeContent::Branch(children) => {
        for child in children.iter() {
          child.collect_at_level(level, include_early_pruned, out);
        }
      }
    }
  }

  pub(crate) fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a OctreeNode<T>>) {
    match &self.content {
      NodeContent::Leaf(_) => out.push(self),
      NodeContent::Branch(children) => {
        for child in children.iter() {
          child.collect_leaves(out);
        }
      }
    }
  }
}

fn is_homogeneous<T, C: Classifier<T>>(elements: &[T], classifier: &C) -> bool {
  match elements.split_first() {
    Some((first, rest)) => rest.iter().all(|e| classifier.same_cell(first, e)),
    None => true,
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
