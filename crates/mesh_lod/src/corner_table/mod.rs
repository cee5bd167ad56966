//! Corner table: per-corner adjacency derived from a flat triangle list.
//!
//! # Corners
//!
//! A corner is one incidence of a vertex in one triangle:
//!
//! ```text
//!   corner = triangle * 3 + local        next(c) / prev(c) rotate inside
//!                                        the triangle and are always
//!              c2                        defined:
//!             ╱  ╲
//!            ╱    ╲                        next(3t+0) = 3t+1
//!           ╱  t   ╲                       next(3t+1) = 3t+2
//!         c0 ────── c1                     next(3t+2) = 3t+0
//! ```
//!
//! # Opposite Corners
//!
//! The edge facing corner `c` runs between `next(c)` and `prev(c)`. When a
//! second triangle shares that edge, its corner facing the same edge is
//! `opposite(c)`:
//!
//! ```text
//!          A
//!         ╱│╲
//!        ╱ │ ╲
//!     C ●  │  ● D        opposite(corner at C) = corner at D
//!        ╲ │ ╱           opposite(corner at D) = corner at C
//!         ╲│╱
//!          B
//! ```
//!
//! Edge keys are built from each endpoint's canonical (position-based) id,
//! so seam duplicates with different normals/uvs still connect.
//!
//! # Degradation
//!
//! | Edge visits | Result                                              |
//! |-------------|-----------------------------------------------------|
//! | 1           | boundary: `opposite` is `None`                      |
//! | 2           | mutual pairing                                      |
//! | 3+          | non-manifold: earlier pairing kept, extra corner `None` |

mod curvature;
pub mod unique;

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use glam::Vec3;
use smallvec::SmallVec;

pub use unique::VertexIdentity;

use crate::constants::SAME_POSITION_EPSILON_SQ;
use crate::error::{validate_triangles, MeshError, MeshResult};
use crate::normals::angle_between;
use crate::types::{CornerId, VertexId};

/// Edge bookkeeping during the build.
#[derive(Clone, Copy)]
enum EdgeVisit {
  /// Seen once, by this corner.
  Open(CornerId),
  /// Already paired.
  Paired,
}

/// Adjacency derived from a position pool and a triangle list.
#[derive(Clone, Debug, Default)]
pub struct CornerTable {
  positions: Vec<Vec3>,
  corner_vertices: Vec<VertexId>,
  opposite: Vec<Option<CornerId>>,
  vertex_corners: Vec<SmallVec<[CornerId; 6]>>,
  identity: VertexIdentity,
  non_manifold_edges: usize,
}

impl CornerTable {
  /// Build the table with the default same-position epsilon.
  pub fn build(positions: &[Vec3], triangle_vertex_ids: &[VertexId]) -> MeshResult<Self> {
    Self::build_with_epsilon(positions, triangle_vertex_ids, SAME_POSITION_EPSILON_SQ)
  }

  /// Build the table, welding positions within `epsilon_sq` squared distance.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "corner_table::build"))]
  pub fn build_with_epsilon(
    positions: &[Vec3],
    triangle_vertex_ids: &[VertexId],
    epsilon_sq: f32,
  ) -> MeshResult<Self> {
    validate_triangles(positions.len(), triangle_vertex_ids)?;

    let identity = VertexIdentity::from_positions(positions, epsilon_sq);
    let corner_count = triangle_vertex_ids.len();

    let mut vertex_corners: Vec<SmallVec<[CornerId; 6]>> = vec![SmallVec::new(); positions.len()];
    for (corner, &v) in triangle_vertex_ids.iter().enumerate() {
      vertex_corners[v as usize].push(corner as CornerId);
    }

    let mut opposite: Vec<Option<CornerId>> = vec![None; corner_count];
    let mut edges: HashMap<(VertexId, VertexId), EdgeVisit> = HashMap::with_capacity(corner_count);
    let mut non_manifold_edges = 0;

    for corner in 0..corner_count as CornerId {
      let a = identity.unique_ids[triangle_vertex_ids[Self::next(corner) as usize] as usize];
      let b = identity.unique_ids[triangle_vertex_ids[Self::previous(corner) as usize] as usize];
      let key = if a <= b { (a, b) } else { (b, a) };

      match edges.entry(key) {
        Entry::Vacant(slot) => {
          slot.insert(EdgeVisit::Open(corner));
        }
        Entry::Occupied(mut slot) => match *slot.get() {
          EdgeVisit::Open(first) => {
            opposite[corner as usize] = Some(first);
            opposite[first as usize] = Some(corner);
            slot.insert(EdgeVisit::Paired);
          }
          EdgeVisit::Paired => {
            non_manifold_edges += 1;
            #[cfg(feature = "tracing")]
            tracing::debug!(corner, edge = ?key, "non-manifold edge; corner left unpaired");
          }
        },
      }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(
      corners = corner_count,
      unique_vertices = identity.unique_count(),
      non_manifold_edges,
      "corner table built"
    );

    Ok(Self {
      positions: positions.to_vec(),
      corner_vertices: triangle_vertex_ids.to_vec(),
      opposite,
      vertex_corners,
      identity,
      non_manifold_edges,
    })
  }

  // ---------------------------------------------------------------------------
  // Triangle-local navigation
  // ---------------------------------------------------------------------------

  /// Next corner in the same triangle.
  #[inline]
  pub fn next(corner: CornerId) -> CornerId {
    if corner % 3 == 2 {
      corner - 2
    } else {
      corner + 1
    }
  }

  /// Previous corner in the same triangle.
  #[inline]
  pub fn previous(corner: CornerId) -> CornerId {
    if corner % 3 == 0 {
      corner + 2
    } else {
      corner - 1
    }
  }

  /// Triangle containing a corner.
  #[inline]
  pub fn triangle_of(corner: CornerId) -> usize {
    (corner / 3) as usize
  }

  // ---------------------------------------------------------------------------
  // Queries
  // ---------------------------------------------------------------------------

  pub fn corner_count(&self) -> usize {
    self.corner_vertices.len()
  }

  pub fn triangle_count(&self) -> usize {
    self.corner_vertices.len() / 3
  }

  pub fn vertex_count(&self) -> usize {
    self.positions.len()
  }

  /// Vertex at a corner.
  #[inline]
  pub fn vertex_of(&self, corner: CornerId) -> VertexId {
    self.corner_vertices[corner as usize]
  }

  /// Corner across the edge facing `corner`, `None` on boundary or
  /// non-manifold edges.
  ///
  /// # Panics
  /// Panics if `corner` is out of range; see [`CornerTable::checked_opposite`].
  #[inline]
  pub fn opposite(&self, corner: CornerId) -> Option<CornerId> {
    self.opposite[corner as usize]
  }

  /// Like [`CornerTable::opposite`], rejecting out-of-range corners.
  pub fn checked_opposite(&self, corner: CornerId) -> MeshResult<Option<CornerId>> {
    self
      .opposite
      .get(corner as usize)
      .copied()
      .ok_or(MeshError::CornerOutOfRange {
        corner,
        corner_count: self.corner_count(),
      })
  }

  /// True when the edge facing `corner` has no partner.
  pub fn is_boundary(&self, corner: CornerId) -> bool {
    self.opposite(corner).is_none()
  }

  /// Corners whose facing edge is a boundary or non-manifold edge.
  pub fn boundary_corners(&self) -> impl Iterator<Item = CornerId> + '_ {
    self
      .opposite
      .iter()
      .enumerate()
      .filter(|(_, o)| o.is_none())
      .map(|(c, _)| c as CornerId)
  }

  /// Number of edge visits beyond the second (non-manifold incidences).
  pub fn non_manifold_edge_count(&self) -> usize {
    self.non_manifold_edges
  }

  /// Every corner referencing exactly this vertex id.
  pub fn corners_of_vertex(&self, vertex: VertexId) -> &[CornerId] {
    &self.vertex_corners[vertex as usize]
  }

  /// Canonical id for the position of `vertex`.
  #[inline]
  pub fn unique_vertex_id(&self, vertex: VertexId) -> VertexId {
    self.identity.unique_ids[vertex as usize]
  }

  /// Like [`CornerTable::unique_vertex_id`], rejecting out-of-range ids.
  pub fn checked_unique_vertex_id(&self, vertex: VertexId) -> MeshResult<VertexId> {
    self
      .identity
      .unique_ids
      .get(vertex as usize)
      .copied()
      .ok_or(MeshError::VertexOutOfRange {
        vertex,
        vertex_count: self.vertex_count(),
      })
  }

  /// All ids sharing the position of `vertex`, ascending.
  pub fn vertex_ids_sharing_position(&self, vertex: VertexId) -> &[VertexId] {
    &self.identity.members[self.unique_vertex_id(vertex) as usize]
  }

  /// Every corner at the position of `vertex`, across seam duplicates.
  pub fn corners_of_unique_vertex(&self, vertex: VertexId) -> impl Iterator<Item = CornerId> + '_ {
    self
      .vertex_ids_sharing_position(vertex)
      .iter()
      .flat_map(move |&id| self.corners_of_vertex(id).iter().copied())
  }

  /// Number of distinct positions.
  pub fn unique_vertex_count(&self) -> usize {
    self.identity.unique_count()
  }

  pub fn identity(&self) -> &VertexIdentity {
    &self.identity
  }

  #[inline]
  pub fn corner_position(&self, corner: CornerId) -> Vec3 {
    self.positions[self.vertex_of(corner) as usize]
  }

  /// Interior angle of the triangle at `corner`, in radians.
  pub fn corner_angle(&self, corner: CornerId) -> f32 {
    let p = self.corner_position(corner);
    let to_next = self.corner_position(Self::next(corner)) - p;
    let to_prev = self.corner_position(Self::previous(corner)) - p;
    angle_between(to_next.into(), to_prev.into())
  }
}
