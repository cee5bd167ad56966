//! Representative vertex for a cluster.
//!
//! # Clustering
//!
//! Arithmetic mean of every member attribute. Normals and tangents are
//! re-normalized after averaging.
//!
//! # Quadric Error Metrics
//!
//! Each member contributes the plane through its position with its normal:
//!
//! ```text
//!   plane = [n.x, n.y, n.z, -n·p]          Q = Σ plane · planeᵀ
//!
//!   Q = │ A   b │     error(x) = [x 1] Q [x 1]ᵀ
//!       │ bᵀ  c │     ∇ = 0  ⇔  A x + b = 0
//!
//!   │ A  b │ │x│   │0│
//!   │ 0  1 │ │1│ = │1│     ⇒  [x 1] = M⁻¹ · (0, 0, 0, 1)
//! ```
//!
//! When the members' planes do not pin a point (flat or cylindrical
//! clusters), `A` is singular and the clustering position is used instead.
//! Non-positional attributes always use the clustering mean.

use glam::{DMat3, DMat4, DVec4, Vec2, Vec3};

use super::cluster::VertexCluster;
use super::config::SimplificationMethod;
use crate::constants::QEM_SINGULAR_TOLERANCE;
use crate::types::{Mesh, VertexData};

/// Outcome of minimizing a quadric.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QuadricSolution {
  /// Unique minimizer.
  Position(Vec3),
  /// The 3×3 block is not invertible within tolerance.
  Singular,
}

/// Fundamental quadric of the plane through `position` with `normal`.
pub fn plane_quadric(position: Vec3, normal: Vec3) -> DMat4 {
  let n = normal.as_dvec3();
  let plane = n.extend(-n.dot(position.as_dvec3()));
  DMat4::from_cols(plane * plane.x, plane * plane.y, plane * plane.z, plane * plane.w)
}

/// Point minimizing `[x 1] Q [x 1]ᵀ`.
pub fn solve_quadric(quadric: &DMat4) -> QuadricSolution {
  let a = DMat3::from_mat4(*quadric);
  let scale = (a.x_axis.x + a.y_axis.y + a.z_axis.z) / 3.0;
  if scale <= f64::EPSILON || a.determinant() / (scale * scale * scale) <= QEM_SINGULAR_TOLERANCE {
    return QuadricSolution::Singular;
  }

  // Replace the last row with [0 0 0 1] (glam is column-major).
  let mut m = *quadric;
  m.x_axis.w = 0.0;
  m.y_axis.w = 0.0;
  m.z_axis.w = 0.0;
  m.w_axis.w = 1.0;

  let solution = m.inverse() * DVec4::W;
  if !solution.is_finite() {
    return QuadricSolution::Singular;
  }
  QuadricSolution::Position(solution.truncate().as_vec3())
}

/// Arithmetic mean of every member attribute.
///
/// Normals and tangents are averaged like any other attribute and are not
/// re-normalized, so opposing directions cancel.
pub fn cluster_mean(cluster: &VertexCluster, source: &Mesh) -> VertexData {
  if cluster.is_empty() {
    return VertexData::default();
  }

  let mut position = Vec3::ZERO;
  let mut normal = Vec3::ZERO;
  let mut uv = Vec2::ZERO;
  let mut tangent = Vec3::ZERO;
  for &id in &cluster.members {
    let v = source.vertex_data(id);
    position += v.position;
    normal += v.normal;
    uv += v.uv;
    tangent += v.tangent;
  }

  let inv = 1.0 / cluster.len() as f32;
  VertexData {
    position: position * inv,
    normal: normal * inv,
    uv: uv * inv,
    tangent: tangent * inv,
  }
}

/// Summed member plane quadrics.
pub fn cluster_quadric(cluster: &VertexCluster, source: &Mesh) -> DMat4 {
  cluster.members.iter().fold(DMat4::ZERO, |q, &id| {
    let v = source.vertex_data(id);
    q + plane_quadric(v.position, v.normal)
  })
}

/// Representative vertex of a cluster.
pub fn resolve_representative(
  cluster: &VertexCluster,
  source: &Mesh,
  method: SimplificationMethod,
) -> VertexData {
  let mut representative = cluster_mean(cluster, source);

  if method == SimplificationMethod::QuadricErrorMetrics && cluster.len() > 1 {
    match solve_quadric(&cluster_quadric(cluster, source)) {
      QuadricSolution::Position(position) => representative.position = position,
      QuadricSolution::Singular => {
        #[cfg(feature = "tracing")]
        tracing::debug!(
          members = cluster.len(),
          "singular quadric; using cluster mean position"
        );
      }
    }
  }

  representative
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod resolve_test;
