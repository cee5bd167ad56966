//! Position-based vertex identity.
//!
//! Ids whose positions lie within `sqrt(epsilon_sq)` of each other are joined
//! into one group; the group's canonical id is its smallest member. Grouping
//! is transitive, so the mapping is idempotent and any two ids within epsilon
//! always share a canonical id.
//!
//! ```text
//!   spatial hash (cell = sqrt(eps))        union-find (root = min id)
//!   ┌────┬────┬────┐
//!   │    │ 3  │    │                        7 ──► 3
//!   ├────┼────┼────┤   neighbours within    9 ──► 3
//!   │    │ 7 9│    │   the 27 cells  ──►    3 ──► 3
//!   └────┴────┴────┘
//! ```

use std::collections::HashMap;

use glam::Vec3;
use smallvec::SmallVec;

use crate::types::VertexId;

/// Canonical id per vertex plus the reverse member lists.
#[derive(Clone, Debug, Default)]
pub struct VertexIdentity {
  /// Canonical id for every vertex id.
  pub unique_ids: Vec<VertexId>,
  /// Members of each group, indexed by canonical id (empty for others).
  pub members: Vec<SmallVec<[VertexId; 4]>>,
}

impl VertexIdentity {
  /// Group vertex ids by position.
  pub fn from_positions(positions: &[Vec3], epsilon_sq: f32) -> Self {
    let unique_ids = if epsilon_sq > 0.0 {
      weld_within_epsilon(positions, epsilon_sq)
    } else {
      weld_exact(positions)
    };

    let mut members: Vec<SmallVec<[VertexId; 4]>> = vec![SmallVec::new(); positions.len()];
    for (id, &canonical) in unique_ids.iter().enumerate() {
      members[canonical as usize].push(id as VertexId);
    }

    Self {
      unique_ids,
      members,
    }
  }

  /// Number of distinct positions.
  pub fn unique_count(&self) -> usize {
    self
      .unique_ids
      .iter()
      .enumerate()
      .filter(|&(id, &canonical)| id as VertexId == canonical)
      .count()
  }
}

/// Exact position match on bit patterns (`-0.0` folded into `0.0`).
fn weld_exact(positions: &[Vec3]) -> Vec<VertexId> {
  let mut table: HashMap<[u32; 3], VertexId> = HashMap::with_capacity(positions.len());
  positions
    .iter()
    .enumerate()
    .map(|(id, p)| {
      let key = [bits(p.x), bits(p.y), bits(p.z)];
      *table.entry(key).or_insert(id as VertexId)
    })
    .collect()
}

#[inline]
fn bits(v: f32) -> u32 {
  // -0.0 + 0.0 == +0.0
  (v + 0.0).to_bits()
}

/// Epsilon match via a uniform grid and union-find.
fn weld_within_epsilon(positions: &[Vec3], epsilon_sq: f32) -> Vec<VertexId> {
  let cell_size = epsilon_sq.sqrt();
  let cell_of = |p: Vec3| -> [i64; 3] {
    let c = (p / cell_size).floor();
    [c.x as i64, c.y as i64, c.z as i64]
  };

  let mut parent: Vec<VertexId> = (0..positions.len() as VertexId).collect();
  let mut grid: HashMap<[i64; 3], SmallVec<[VertexId; 4]>> = HashMap::new();

  for (id, &p) in positions.iter().enumerate() {
    let id = id as VertexId;
    let [cx, cy, cz] = cell_of(p);

    for dx in -1..=1 {
      for dy in -1..=1 {
        for dz in -1..=1 {
          let key = [cx.saturating_add(dx), cy.saturating_add(dy), cz.saturating_add(dz)];
          let Some(bucket) = grid.get(&key) else {
            continue;
          };
          for &other in bucket {
            if positions[other as usize].distance_squared(p) <= epsilon_sq {
              union(&mut parent, id, other);
            }
          }
        }
      }
    }

    grid.entry([cx, cy, cz]).or_default().push(id);
  }

  (0..positions.len() as VertexId)
    .map(|id| find(&mut parent, id))
    .collect()
}

fn find(parent: &mut [VertexId], id: VertexId) -> VertexId {
  let mut root = id;
  while parent[root as usize] != root {
    root = parent[root as usize];
  }
  // Path compression
  let mut cur = id;
  while parent[cur as usize] != root {
    let next = parent[cur as usize];
    parent[cur as usize] = root;
    cur = next;
  }
  root
}

/// Join two groups; the smaller root always wins so roots stay minimal.
fn union(parent: &mut [VertexId], a: VertexId, b: VertexId) {
  let ra = find(parent, a);
  let rb = find(parent, b);
  if ra != rb {
    let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
    parent[hi as usize] = lo;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constants::SAME_POSITION_EPSILON_SQ;

  #[test]
  fn test_distinct_positions_are_their_own_ids() {
    let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
    let identity = VertexIdentity::from_positions(&positions, SAME_POSITION_EPSILON_SQ);
    assert_eq!(identity.unique_ids, vec![0, 1, 2]);
    assert_eq!(identity.unique_count(), 3);
  }

  #[test]
  fn test_duplicates_map_to_min_id() {
    let positions = [Vec3::X, Vec3::ZERO, Vec3::X, Vec3::ZERO, Vec3::X];
    let identity = VertexIdentity::from_positions(&positions, SAME_POSITION_EPSILON_SQ);
    assert_eq!(identity.unique_ids, vec![0, 1, 0, 1, 0]);
    assert_eq!(identity.members[0].as_slice(), &[0, 2, 4]);
    assert_eq!(identity.members[1].as_slice(), &[1, 3]);
    assert!(identity.members[2].is_empty());
  }

  #[test]
  fn test_within_epsilon_welds_across_cells() {
    // Straddles a grid cell boundary at the origin.
    let positions = [Vec3::new(0.001, 0.0, 0.0), Vec3::new(-0.001, 0.0, 0.0)];
    let identity = VertexIdentity::from_positions(&positions, SAME_POSITION_EPSILON_SQ);
    assert_eq!(identity.unique_ids, vec![0, 0]);
  }

  #[test]
  fn test_outside_epsilon_stays_apart() {
    let positions = [Vec3::ZERO, Vec3::new(0.01, 0.0, 0.0)];
    let identity = VertexIdentity::from_positions(&positions, SAME_POSITION_EPSILON_SQ);
    assert_eq!(identity.unique_ids, vec![0, 1]);
  }

  #[test]
  fn test_exact_mode_folds_negative_zero() {
    let positions = [Vec3::ZERO, Vec3::new(-0.0, 0.0, -0.0), Vec3::new(1e-7, 0.0, 0.0)];
    let identity = VertexIdentity::from_positions(&positions, 0.0);
    assert_eq!(identity.unique_ids, vec![0, 0, 2]);
  }

  #[test]
  fn test_canonical_is_idempotent() {
    let positions: Vec<Vec3> = (0..40)
      .map(|i| Vec3::new((i % 5) as f32, 0.0, 0.0))
      .collect();
    let identity = VertexIdentity::from_positions(&positions, SAME_POSITION_EPSILON_SQ);
    for &u in &identity.unique_ids {
      assert_eq!(identity.unique_ids[u as usize], u);
    }
    assert_eq!(identity.unique_count(), 5);
  }
}
