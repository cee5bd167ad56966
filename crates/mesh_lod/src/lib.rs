//! mesh_lod - Framework/engine independent mesh adjacency and LOD generation
//!
//! This crate turns an indexed triangle mesh into an ordered array of
//! coarser meshes by octree vertex clustering, and answers adjacency and
//! curvature queries on the way.
//!
//! # Features
//!
//! - **Corner Table**: opposite/next/previous corners, position-welded
//!   vertex identity, corner angles, Gaussian and mean curvature
//! - **Octree**: generic over its elements, with an injected containment
//!   [`Classifier`]
//! - **LOD Generation**: per-level vertex clustering with seam-preserving
//!   splits, mean or quadric-error representatives, normal-guided winding
//! - **Batch / Async**: rayon-backed batch stage and a single-job pipeline
//!   that publishes each LOD array whole
//!
//! # Example
//!
//! ```ignore
//! use mesh_lod::{generate_lods, LodConfig, Mesh, SimplificationMethod};
//!
//! let mesh = Mesh::new(positions, triangle_vertex_ids)?.with_normals(normals)?;
//!
//! let config = LodConfig::new().with_method(SimplificationMethod::QuadricErrorMetrics);
//! let lods = generate_lods(&mesh, &config)?;
//!
//! for (level, lod) in lods.iter().enumerate() {
//!     println!("LOD {level}: {} triangles", lod.triangle_count());
//! }
//! ```

pub mod constants;
pub mod error;
pub mod normals;
pub mod types;

// Re-export commonly used items
pub use constants::{DEFAULT_MAX_OCTREE_DEPTH, DEFAULT_PADDING_PERCENT, SAME_POSITION_EPSILON_SQ};
pub use error::{MeshError, MeshResult};
pub use types::{AdjacencyState, CornerId, Mesh, VertexData, VertexId};

// Adjacency and curvature
pub mod corner_table;
pub use corner_table::{CornerTable, VertexIdentity};

// Generic octree with injected classification
pub mod octree;
pub use octree::{Aabb, Classifier, Octree, OctreeNode, PointClassifier};

// LOD generation
pub mod simplify;
pub use simplify::{
  generate_lods, generate_lods_with_stats, get_all_mesh_lods, LevelStats, LodConfig,
  LodGenerationStats, QuadricSolution, SimplificationMethod, VertexCluster,
};

// Task queue for parallel batches
pub mod task_queue;
pub use task_queue::{LodCompletion, LodRequest, LodStage};

// Off-thread single-job generation
pub mod pipeline;
pub use pipeline::{AsyncLodPipeline, LodJob, LodJobResult};

// Engine-agnostic metrics
pub mod metrics;

#[cfg(test)]
pub(crate) mod test_utils;
