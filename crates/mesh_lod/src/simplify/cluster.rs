//! Vertex clusters: the octree cells of one level, turned into groups of
//! source vertex ids that collapse into one output vertex.
//!
//! ```text
//!  cell with spread-out members        cell whose members all coincide
//!  ┌───────────────┐                   ┌───────────────┐
//!  │  3      9     │                   │               │
//!  │      12       │  ──► [3, 9, 12]   │    4/17/30    │  ──► [4] [17] [30]
//!  │           5   │      [.., 5]      │               │
//!  └───────────────┘                   └───────────────┘
//! ```
//!
//! Splitting coincident members keeps authored seams (hard edges, uv
//! islands) intact once subdivision can no longer separate them.

use glam::Vec3;
use smallvec::{smallvec, SmallVec};

use crate::octree::OctreeNode;
use crate::types::VertexId;

/// Source vertex ids that collapse into one output vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexCluster {
  pub members: SmallVec<[VertexId; 8]>,
}

impl VertexCluster {
  pub fn new(members: impl IntoIterator<Item = VertexId>) -> Self {
    Self {
      members: members.into_iter().collect(),
    }
  }

  pub fn len(&self) -> usize {
    self.members.len()
  }

  pub fn is_empty(&self) -> bool {
    self.members.is_empty()
  }
}

/// True when every position lies within `epsilon_sq` of the first.
fn all_coincident(elements: &[&(VertexId, Vec3)], epsilon_sq: f32) -> bool {
  match elements.split_first() {
    Some((first, rest)) => rest
      .iter()
      .all(|(_, p)| p.distance_squared(first.1) <= epsilon_sq),
    None => true,
  }
}

/// Clusters produced by one octree cell.
///
/// Empty cells yield nothing.
pub fn clusters_from_node(
  node: &OctreeNode<(VertexId, Vec3)>,
  epsilon_sq: f32,
) -> SmallVec<[VertexCluster; 1]> {
  let elements = node.elements();
  if elements.is_empty() {
    return SmallVec::new();
  }

  if elements.len() > 1 && all_coincident(&elements, epsilon_sq) {
    elements
      .iter()
      .map(|(id, _)| VertexCluster::new([*id]))
      .collect()
  } else {
    smallvec![VertexCluster::new(elements.iter().map(|(id, _)| *id))]
  }
}

/// Clusters for every cell of one level, in cell order.
pub fn build_clusters(
  nodes: &[&OctreeNode<(VertexId, Vec3)>],
  epsilon_sq: f32,
) -> Vec<VertexCluster> {
  nodes
    .iter()
    .flat_map(|node| clusters_from_node(node, epsilon_sq))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::octree::{Aabb, Octree, PointClassifier};

  fn tree(points: &[(VertexId, Vec3)], max_depth: usize) -> Octree<(VertexId, Vec3), PointClassifier> {
    let mut octree = Octree::with_bounds(Aabb::new(Vec3::ZERO, Vec3::ONE), PointClassifier::default());
    octree.fill(points.to_vec(), max_depth);
    octree
  }

  #[test]
  fn test_spread_members_form_one_cluster() {
    let octree = tree(
      &[(0, Vec3::splat(0.1)), (1, Vec3::splat(0.2)), (2, Vec3::splat(0.9))],
      0,
    );
    let clusters = build_clusters(&octree.children_at_level(0, true), 1e-5);
    assert_eq!(clusters, vec![VertexCluster::new([0, 1, 2])]);
  }

  #[test]
  fn test_coincident_members_split_per_id() {
    let p = Vec3::splat(0.25);
    let octree = tree(&[(4, p), (17, p), (30, p + Vec3::splat(1e-4))], 0);
    let clusters = build_clusters(&octree.children_at_level(0, true), 1e-5);
    assert_eq!(clusters.len(), 3);
    assert!(clusters.iter().all(|c| c.len() == 1));
  }

  #[test]
  fn test_empty_cells_are_skipped() {
    let octree = tree(&[(0, Vec3::splat(0.1)), (1, Vec3::splat(0.9))], 1);
    let nodes = octree.children_at_level(1, true);
    assert_eq!(nodes.len(), 8);
    let clusters = build_clusters(&nodes, 1e-5);
    assert_eq!(clusters.len(), 2);
    assert!(clusters.iter().all(|c| !c.is_empty()));
  }
}
