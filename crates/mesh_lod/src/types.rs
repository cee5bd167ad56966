//! Core mesh types: vertex/corner ids, per-vertex attributes and the mesh
//! container that owns its cached adjacency.

use glam::{Vec2, Vec3};

use crate::corner_table::CornerTable;
use crate::error::{validate_attribute, validate_triangles, MeshResult};
use crate::normals;
use crate::octree::Aabb;

/// Index into a mesh's vertex attribute pools.
pub type VertexId = u32;

/// Corner index: `triangle_id * 3 + local_index` with `local_index` in 0..3.
pub type CornerId = u32;

/// All attributes of one vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexData {
  pub position: Vec3,
  /// Surface normal (unit vector when meaningful).
  pub normal: Vec3,
  pub uv: Vec2,
  pub tangent: Vec3,
}

impl Default for VertexData {
  fn default() -> Self {
    Self {
      position: Vec3::ZERO,
      normal: Vec3::Y,
      uv: Vec2::ZERO,
      tangent: Vec3::X,
    }
  }
}

/// Cached adjacency of a mesh.
///
/// Topology setters move the state to `Stale`; [`Mesh::corner_table`] moves it
/// back to `Valid` through the pure [`CornerTable::build`].
#[derive(Clone, Debug, Default)]
pub enum AdjacencyState {
  #[default]
  Stale,
  Valid(CornerTable),
}

impl AdjacencyState {
  pub fn is_valid(&self) -> bool {
    matches!(self, AdjacencyState::Valid(_))
  }
}

/// Indexed triangle mesh with optional per-vertex attributes.
///
/// Buffers are validated on every mutation, so a `Mesh` always satisfies:
/// - `triangle_vertex_ids.len() % 3 == 0`
/// - every id `< positions.len()`
/// - every present attribute pool has `positions.len()` entries
#[derive(Clone, Debug, Default)]
pub struct Mesh {
  positions: Vec<Vec3>,
  normals: Option<Vec<Vec3>>,
  uvs: Option<Vec<Vec2>>,
  tangents: Option<Vec<Vec3>>,
  triangle_vertex_ids: Vec<VertexId>,
  adjacency: AdjacencyState,
}

impl Mesh {
  /// Create a mesh from a position pool and a flat triangle list.
  pub fn new(positions: Vec<Vec3>, triangle_vertex_ids: Vec<VertexId>) -> MeshResult<Self> {
    validate_triangles(positions.len(), &triangle_vertex_ids)?;
    Ok(Self {
      positions,
      triangle_vertex_ids,
      ..Default::default()
    })
  }

  /// Build from buffers that are consistent by construction.
  pub(crate) fn from_parts(
    positions: Vec<Vec3>,
    normals: Option<Vec<Vec3>>,
    uvs: Option<Vec<Vec2>>,
    tangents: Option<Vec<Vec3>>,
    triangle_vertex_ids: Vec<VertexId>,
  ) -> Self {
    debug_assert!(validate_triangles(positions.len(), &triangle_vertex_ids).is_ok());
    Self {
      positions,
      normals,
      uvs,
      tangents,
      triangle_vertex_ids,
      adjacency: AdjacencyState::Stale,
    }
  }

  pub fn with_normals(mut self, normals: Vec<Vec3>) -> MeshResult<Self> {
    self.set_normals(Some(normals))?;
    Ok(self)
  }

  pub fn with_uvs(mut self, uvs: Vec<Vec2>) -> MeshResult<Self> {
    self.set_uvs(Some(uvs))?;
    Ok(self)
  }

  pub fn with_tangents(mut self, tangents: Vec<Vec3>) -> MeshResult<Self> {
    self.set_tangents(Some(tangents))?;
    Ok(self)
  }

  // ---------------------------------------------------------------------------
  // Accessors
  // ---------------------------------------------------------------------------

  pub fn positions(&self) -> &[Vec3] {
    &self.positions
  }

  pub fn normals(&self) -> Option<&[Vec3]> {
    self.normals.as_deref()
  }

  pub fn uvs(&self) -> Option<&[Vec2]> {
    self.uvs.as_deref()
  }

  pub fn tangents(&self) -> Option<&[Vec3]> {
    self.tangents.as_deref()
  }

  pub fn triangle_vertex_ids(&self) -> &[VertexId] {
    &self.triangle_vertex_ids
  }

  /// Number of vertices in the attribute pools.
  pub fn vertex_count(&self) -> usize {
    self.positions.len()
  }

  /// Number of triangle indices (3 per triangle).
  pub fn index_count(&self) -> usize {
    self.triangle_vertex_ids.len()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.triangle_vertex_ids.len() / 3
  }

  /// Returns true if the mesh has no triangles to simplify.
  pub fn is_empty(&self) -> bool {
    self.triangle_vertex_ids.is_empty()
  }

  /// Vertex ids of one triangle.
  pub fn triangle(&self, triangle_id: usize) -> [VertexId; 3] {
    let base = triangle_id * 3;
    [
      self.triangle_vertex_ids[base],
      self.triangle_vertex_ids[base + 1],
      self.triangle_vertex_ids[base + 2],
    ]
  }

  /// Iterate triangles as vertex id triples.
  pub fn triangles(&self) -> impl Iterator<Item = [VertexId; 3]> + '_ {
    self
      .triangle_vertex_ids
      .chunks_exact(3)
      .map(|tri| [tri[0], tri[1], tri[2]])
  }

  /// Bounding box of all positions (inverted when the mesh has none).
  pub fn bounds(&self) -> Aabb {
    Aabb::from_points(self.positions.iter().copied())
  }

  /// Gather all attributes of one vertex, defaulting absent pools.
  pub fn vertex_data(&self, id: VertexId) -> VertexData {
    let i = id as usize;
    let defaults = VertexData::default();
    VertexData {
      position: self.positions[i],
      normal: self.normals.as_ref().map_or(defaults.normal, |n| n[i]),
      uv: self.uvs.as_ref().map_or(defaults.uv, |uv| uv[i]),
      tangent: self.tangents.as_ref().map_or(defaults.tangent, |t| t[i]),
    }
  }

  // ---------------------------------------------------------------------------
  // Topology setters (invalidate adjacency)
  // ---------------------------------------------------------------------------

  /// Replace the position pool.
  ///
  /// Present attribute pools must keep matching the new vertex count; call
  /// [`Mesh::clear_attributes`] first when the count changes.
  pub fn set_positions(&mut self, positions: Vec<Vec3>) -> MeshResult<()> {
    validate_triangles(positions.len(), &self.triangle_vertex_ids)?;
    let count = positions.len();
    if let Some(normals) = &self.normals {
      validate_attribute("normals", count, normals.len())?;
    }
    if let Some(uvs) = &self.uvs {
      validate_attribute("uvs", count, uvs.len())?;
    }
    if let Some(tangents) = &self.tangents {
      validate_attribute("tangents", count, tangents.len())?;
    }
    self.positions = positions;
    self.adjacency = AdjacencyState::Stale;
    Ok(())
  }

  /// Replace the flat triangle list.
  pub fn set_triangle_vertex_ids(&mut self, triangle_vertex_ids: Vec<VertexId>) -> MeshResult<()> {
    validate_triangles(self.positions.len(), &triangle_vertex_ids)?;
    self.triangle_vertex_ids = triangle_vertex_ids;
    self.adjacency = AdjacencyState::Stale;
    Ok(())
  }

  // ---------------------------------------------------------------------------
  // Attribute setters (adjacency unaffected)
  // ---------------------------------------------------------------------------

  pub fn set_normals(&mut self, normals: Option<Vec<Vec3>>) -> MeshResult<()> {
    if let Some(n) = &normals {
      validate_attribute("normals", self.positions.len(), n.len())?;
    }
    self.normals = normals;
    Ok(())
  }

  pub fn set_uvs(&mut self, uvs: Option<Vec<Vec2>>) -> MeshResult<()> {
    if let Some(uv) = &uvs {
      validate_attribute("uvs", self.positions.len(), uv.len())?;
    }
    self.uvs = uvs;
    Ok(())
  }

  pub fn set_tangents(&mut self, tangents: Option<Vec<Vec3>>) -> MeshResult<()> {
    if let Some(t) = &tangents {
      validate_attribute("tangents", self.positions.len(), t.len())?;
    }
    self.tangents = tangents;
    Ok(())
  }

  /// Drop normals, uvs and tangents.
  pub fn clear_attributes(&mut self) {
    self.normals = None;
    self.uvs = None;
    self.tangents = None;
  }

  /// Replace normals with angle-weighted geometry normals.
  pub fn recalculate_normals(&mut self) {
    self.normals = Some(normals::from_geometry(
      &self.positions,
      &self.triangle_vertex_ids,
    ));
  }

  // ---------------------------------------------------------------------------
  // Adjacency
  // ---------------------------------------------------------------------------

  pub fn adjacency_state(&self) -> &AdjacencyState {
    &self.adjacency
  }

  pub fn is_adjacency_valid(&self) -> bool {
    self.adjacency.is_valid()
  }

  /// Corner table for the current topology, rebuilt if stale.
  pub fn corner_table(&mut self) -> MeshResult<&CornerTable> {
    if !self.adjacency.is_valid() {
      let table = CornerTable::build(&self.positions, &self.triangle_vertex_ids)?;
      self.adjacency = AdjacencyState::Valid(table);
    }
    match &self.adjacency {
      AdjacencyState::Valid(table) => Ok(table),
      AdjacencyState::Stale => unreachable!("adjacency rebuilt above"),
    }
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
