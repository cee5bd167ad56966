//! Triangle reconstruction from clusters.
//!
//! Every source triangle `(a, b, c)` records, for each of its vertices, the
//! pair of the other two:
//!
//! ```text
//!   a ─► (b, c)      b ─► (c, a)      c ─► (a, b)
//! ```
//!
//! At each level the pairs are translated through `vertex -> cluster`. A
//! cluster `c` with a pair mapping to clusters `(o0, o1)`, all three
//! distinct, names one output triangle. It is emitted once, from its lowest
//! cluster (`c < o0 < o1`), then wound to agree with the averaged normal of
//! its three representatives.

use std::collections::BTreeSet;

use glam::Vec3;
use smallvec::SmallVec;

use super::cluster::VertexCluster;
use crate::types::{VertexData, VertexId};

/// The other two vertices of every triangle touching one vertex.
pub type OppositePairs = SmallVec<[(VertexId, VertexId); 6]>;

/// Per-vertex opposite pairs, computed once per source mesh.
pub fn opposite_pairs(vertex_count: usize, triangle_vertex_ids: &[VertexId]) -> Vec<OppositePairs> {
  let mut pairs = vec![OppositePairs::new(); vertex_count];
  for tri in triangle_vertex_ids.chunks_exact(3) {
    let [a, b, c] = [tri[0], tri[1], tri[2]];
    pairs[a as usize].push((b, c));
    pairs[b as usize].push((c, a));
    pairs[c as usize].push((a, b));
  }
  pairs
}

/// Distinct cluster triples `[c, o0, o1]` with `c < o0 < o1`, in ascending
/// order.
///
/// `cluster_of` maps source vertex ids to cluster indices; vertices outside
/// every cluster are `None` and drop their triangles.
pub fn cluster_triangles(
  clusters: &[VertexCluster],
  cluster_of: &[Option<u32>],
  pairs: &[OppositePairs],
) -> BTreeSet<[u32; 3]> {
  let mut triples = BTreeSet::new();
  for (c, cluster) in clusters.iter().enumerate() {
    let c = c as u32;
    for &v in &cluster.members {
      for &(a, b) in &pairs[v as usize] {
        let (Some(o0), Some(o1)) = (cluster_of[a as usize], cluster_of[b as usize]) else {
          continue;
        };
        let (o0, o1) = if o0 < o1 { (o0, o1) } else { (o1, o0) };
        if c < o0 && o0 < o1 {
          triples.insert([c, o0, o1]);
        }
      }
    }
  }
  triples
}

/// Flat index list, each triple wound so its face normal agrees with the
/// summed unit directions of its representative normals. Each normal
/// counts by direction only.
pub fn wind_triangles(triples: &BTreeSet<[u32; 3]>, vertices: &[VertexData]) -> Vec<VertexId> {
  let mut ids = Vec::with_capacity(triples.len() * 3);
  for &[a, b, c] in triples {
    let [v0, v1, v2] = [a, b, c].map(|i| &vertices[i as usize]);
    let face = (v1.position - v0.position).cross(v2.position - v0.position);
    let normal = [v0, v1, v2]
      .iter()
      .fold(Vec3::ZERO, |sum, v| sum + v.normal.normalize_or_zero());
    if face.dot(normal) < 0.0 {
      ids.extend_from_slice(&[a, c, b]);
    } else {
      ids.extend_from_slice(&[a, b, c]);
    }
  }
  ids
}

#[cfg(test)]
mod tests {
  use glam::Vec3;

  use super::*;

  #[test]
  fn test_opposite_pairs() {
    let pairs = opposite_pairs(4, &[0, 1, 2, 0, 2, 3]);
    assert_eq!(pairs[0].as_slice(), &[(1, 2), (2, 3)]);
    assert_eq!(pairs[1].as_slice(), &[(2, 0)]);
    assert_eq!(pairs[2].as_slice(), &[(0, 1), (3, 0)]);
    assert_eq!(pairs[3].as_slice(), &[(0, 2)]);
  }

  #[test]
  fn test_singleton_clusters_reproduce_triangles() {
    let pairs = opposite_pairs(4, &[0, 1, 2, 0, 2, 3]);
    let clusters: Vec<VertexCluster> = (0..4).map(|v| VertexCluster::new([v])).collect();
    let cluster_of: Vec<Option<u32>> = (0..4).map(Some).collect();
    let triples = cluster_triangles(&clusters, &cluster_of, &pairs);
    assert_eq!(triples.into_iter().collect::<Vec<_>>(), vec![[0, 1, 2], [0, 2, 3]]);
  }

  #[test]
  fn test_collapsed_triangles_vanish() {
    let pairs = opposite_pairs(4, &[0, 1, 2, 0, 2, 3]);
    // Vertices 2 and 3 share a cluster: only triangle 0-1-2 survives.
    let clusters = vec![
      VertexCluster::new([0]),
      VertexCluster::new([1]),
      VertexCluster::new([2, 3]),
    ];
    let cluster_of = vec![Some(0), Some(1), Some(2), Some(2)];
    let triples = cluster_triangles(&clusters, &cluster_of, &pairs);
    assert_eq!(triples.len(), 1);
    assert!(triples.contains(&[0, 1, 2]));
  }

  #[test]
  fn test_unclustered_vertex_drops_triangle() {
    let pairs = opposite_pairs(3, &[0, 1, 2]);
    let clusters = vec![VertexCluster::new([0]), VertexCluster::new([1])];
    let cluster_of = vec![Some(0), Some(1), None];
    assert!(cluster_triangles(&clusters, &cluster_of, &pairs).is_empty());
  }

  #[test]
  fn test_winding_follows_normals() {
    let vertex = |position: Vec3, normal: Vec3| VertexData {
      position,
      normal,
      ..Default::default()
    };
    let triples = BTreeSet::from([[0, 1, 2]]);

    // Counter-clockwise seen from +Z.
    let up = [
      vertex(Vec3::ZERO, Vec3::Z),
      vertex(Vec3::X, Vec3::Z),
      vertex(Vec3::Y, Vec3::Z),
    ];
    assert_eq!(wind_triangles(&triples, &up), vec![0, 1, 2]);

    let down = up.map(|v| VertexData {
      normal: Vec3::NEG_Z,
      ..v
    });
    assert_eq!(wind_triangles(&triples, &down), vec![0, 2, 1]);
  }

  #[test]
  fn test_winding_weighs_normal_directions_equally() {
    let vertex = |position: Vec3, normal: Vec3| VertexData {
      position,
      normal,
      ..Default::default()
    };
    let triples = BTreeSet::from([[0, 1, 2]]);

    // Two short +Z normals outvote one long -Z normal.
    let mixed = [
      vertex(Vec3::ZERO, Vec3::Z * 0.1),
      vertex(Vec3::X, Vec3::Z * 0.1),
      vertex(Vec3::Y, Vec3::NEG_Z * 0.9),
    ];
    assert_eq!(wind_triangles(&triples, &mixed), vec![0, 1, 2]);
  }
}
