//! LOD generation by octree vertex clustering.
//!
//! # Flow
//!
//! ```text
//!  source mesh
//!      │
//!      ▼
//!  ┌──────────────────────┐   (id, position) per vertex, root box padded
//!  │ octree fill          │   by padding_percent of the largest extent
//!  └──────────┬───────────┘
//!             │
//!  ┌──────────▼───────────┐   computed once, independent of level
//!  │ opposite pairs       │
//!  └──────────┬───────────┘
//!             │
//!             ▼   for level in 0..=max_octree_depth
//!  ┌──────────────────────┐
//!  │ cells at level       │   early-pruned leaves stand in for their cells
//!  │  → clusters          │   coincident members split per id
//!  │  → representatives   │   Clustering / QuadricErrorMetrics
//!  │  → cluster triples   │   c < o0 < o1, wound by averaged normal
//!  └──────────┬───────────┘
//!             │
//!             ▼
//!  append level (skipped when it has no triangles);
//!  stop once its index count equals the source's
//! ```
//!
//! Each level refines the clustering of the one before, so index counts
//! never decrease. If the deepest level still merges some vertices, a copy
//! of the source closes the array.

pub mod cluster;
pub mod config;
pub mod reconstruct;
pub mod resolve;

use std::borrow::Cow;

use glam::Vec3;
use web_time::Instant;

pub use cluster::VertexCluster;
pub use config::{LodConfig, SimplificationMethod};
pub use resolve::{resolve_representative, solve_quadric, QuadricSolution};

use crate::constants::MIN_PADDING;
use crate::error::{validate_triangles, MeshResult};
use crate::octree::{Octree, PointClassifier};
use crate::types::{Mesh, VertexData, VertexId};

/// Statistics for one generated level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LevelStats {
  /// Octree level the clusters came from; `None` for the appended source
  /// copy.
  pub octree_level: Option<usize>,
  pub cluster_count: usize,
  pub vertex_count: usize,
  pub index_count: usize,
  /// Time spent on this level in microseconds.
  pub time_us: u64,
}

/// Statistics for a whole generation call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LodGenerationStats {
  /// One entry per returned mesh, in order.
  pub levels: Vec<LevelStats>,
  /// Deepest octree level actually reached by the fill.
  pub octree_depth: usize,
  /// Levels dropped because their clusters formed no triangle.
  pub skipped_levels: usize,
  /// True when the source copy was appended as the last level.
  pub source_appended: bool,
  /// Total generation time in microseconds.
  pub total_us: u64,
}

/// Ordered LOD array for `source`, coarsest first.
///
/// A mesh without triangles yields an empty array.
pub fn generate_lods(source: &Mesh, config: &LodConfig) -> MeshResult<Vec<Mesh>> {
  generate_lods_with_stats(source, config).map(|(lods, _)| lods)
}

/// Convenience entry point: default settings with the given method.
///
/// `None` yields an empty array.
pub fn get_all_mesh_lods(source: Option<&Mesh>, method: SimplificationMethod) -> MeshResult<Vec<Mesh>> {
  match source {
    Some(mesh) => generate_lods(mesh, &LodConfig::new().with_method(method)),
    None => Ok(Vec::new()),
  }
}

/// [`generate_lods`] plus per-level statistics.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "simplify::generate_lods"))]
pub fn generate_lods_with_stats(
  source: &Mesh,
  config: &LodConfig,
) -> MeshResult<(Vec<Mesh>, LodGenerationStats)> {
  validate_triangles(source.vertex_count(), source.triangle_vertex_ids())?;

  let mut stats = LodGenerationStats::default();
  if source.is_empty() {
    return Ok((Vec::new(), stats));
  }

  let start = Instant::now();
  let working = working_mesh(source, config);

  // Stage 1: octree over every vertex
  let octree = {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("octree_fill").entered();
    let bounds = source.bounds();
    let padding = (bounds.size().max_element() * config.padding_percent / 100.0).max(MIN_PADDING);
    let mut octree = Octree::with_bounds(
      bounds.padded(padding),
      PointClassifier::new(config.same_position_epsilon_sq),
    );
    let elements: Vec<(VertexId, Vec3)> = source
      .positions()
      .iter()
      .enumerate()
      .map(|(id, &p)| (id as VertexId, p))
      .collect();
    stats.octree_depth = octree.fill(elements, config.max_octree_depth);
    octree
  };

  // Stage 2: opposite pairs per vertex
  let pairs = reconstruct::opposite_pairs(source.vertex_count(), source.triangle_vertex_ids());

  // Stage 3: one candidate mesh per level
  let mut lods = Vec::new();
  let mut cluster_of: Vec<Option<u32>> = vec![None; source.vertex_count()];
  let mut reached_source = false;

  // Past the reached depth every query returns the same leaves.
  for level in 0..=stats.octree_depth {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("lod_level", level).entered();
    let level_start = Instant::now();

    let nodes = octree.children_at_level(level, true);
    let clusters = cluster::build_clusters(&nodes, config.same_position_epsilon_sq);

    cluster_of.fill(None);
    let vertices: Vec<VertexData> = clusters
      .iter()
      .enumerate()
      .map(|(index, cluster)| {
        for &id in &cluster.members {
          cluster_of[id as usize] = Some(index as u32);
        }
        resolve_representative(cluster, &working, config.method)
      })
      .collect();

    let triples = reconstruct::cluster_triangles(&clusters, &cluster_of, &pairs);
    if triples.is_empty() {
      stats.skipped_levels += 1;
      #[cfg(feature = "tracing")]
      tracing::trace!(level, clusters = clusters.len(), "level has no triangles; skipped");
      continue;
    }

    let triangle_vertex_ids = reconstruct::wind_triangles(&triples, &vertices);
    let lod = assemble_level(&vertices, triangle_vertex_ids, source);

    stats.levels.push(LevelStats {
      octree_level: Some(level),
      cluster_count: clusters.len(),
      vertex_count: lod.vertex_count(),
      index_count: lod.index_count(),
      time_us: level_start.elapsed().as_micros() as u64,
    });

    #[cfg(feature = "tracing")]
    tracing::trace!(
      level,
      clusters = clusters.len(),
      indices = lod.index_count(),
      "level generated"
    );

    reached_source = lod.index_count() == source.index_count();
    lods.push(lod);
    if reached_source {
      break;
    }
  }

  if !reached_source {
    #[cfg(feature = "tracing")]
    tracing::debug!(
      max_octree_depth = config.max_octree_depth,
      "deepest level still merges vertices; appending source copy"
    );
    let copy = source_copy(source);
    stats.levels.push(LevelStats {
      octree_level: None,
      cluster_count: copy.vertex_count(),
      vertex_count: copy.vertex_count(),
      index_count: copy.index_count(),
      time_us: 0,
    });
    stats.source_appended = true;
    lods.push(copy);
  }

  stats.total_us = start.elapsed().as_micros() as u64;
  Ok((lods, stats))
}

/// Source with normals guaranteed when the config asks for them.
fn working_mesh<'a>(source: &'a Mesh, config: &LodConfig) -> Cow<'a, Mesh> {
  if source.normals().is_none() && config.recompute_missing_normals {
    let mut mesh = source.clone();
    mesh.recalculate_normals();
    Cow::Owned(mesh)
  } else {
    Cow::Borrowed(source)
  }
}

/// Output mesh carrying only the attribute pools the source has.
fn assemble_level(vertices: &[VertexData], triangle_vertex_ids: Vec<VertexId>, source: &Mesh) -> Mesh {
  let positions = vertices.iter().map(|v| v.position).collect();
  let normals = source
    .normals()
    .map(|_| vertices.iter().map(|v| v.normal).collect());
  let uvs = source.uvs().map(|_| vertices.iter().map(|v| v.uv).collect());
  let tangents = source
    .tangents()
    .map(|_| vertices.iter().map(|v| v.tangent).collect());
  Mesh::from_parts(positions, normals, uvs, tangents, triangle_vertex_ids)
}

/// Independent copy of the source buffers, without cached adjacency.
fn source_copy(source: &Mesh) -> Mesh {
  Mesh::from_parts(
    source.positions().to_vec(),
    source.normals().map(|n| n.to_vec()),
    source.uvs().map(|uv| uv.to_vec()),
    source.tangents().map(|t| t.to_vec()),
    source.triangle_vertex_ids().to_vec(),
  )
}
