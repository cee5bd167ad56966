//! Geometry normals from triangle faces.
//!
//! Each triangle contributes its unit face normal to its three vertices,
//! weighted by the interior angle at that vertex. Weighting by angle keeps the
//! result independent of how a surface region happens to be triangulated.

use glam::{Vec3, Vec3A};

use crate::constants::DEGENERATE_LENGTH_SQ;
use crate::types::VertexId;

/// Compute angle-weighted vertex normals.
///
/// Vertices without any non-degenerate incident triangle fall back to +Y.
pub fn from_geometry(positions: &[Vec3], triangle_vertex_ids: &[VertexId]) -> Vec<Vec3> {
  let mut accum = vec![Vec3A::ZERO; positions.len()];

  for tri in triangle_vertex_ids.chunks_exact(3) {
    let i0 = tri[0] as usize;
    let i1 = tri[1] as usize;
    let i2 = tri[2] as usize;

    let p0 = Vec3A::from(positions[i0]);
    let p1 = Vec3A::from(positions[i1]);
    let p2 = Vec3A::from(positions[i2]);

    let e01 = p1 - p0;
    let e02 = p2 - p0;
    let e12 = p2 - p1;

    let face_normal = e01.cross(e02);
    let face_len_sq = face_normal.length_squared();

    // Skip degenerate triangles
    if face_len_sq < DEGENERATE_LENGTH_SQ {
      continue;
    }

    let face_normal_unit = face_normal * face_len_sq.sqrt().recip();

    accum[i0] += face_normal_unit * angle_between(e01, e02);
    accum[i1] += face_normal_unit * angle_between(-e01, e12);
    accum[i2] += face_normal_unit * angle_between(-e02, -e12);
  }

  accum
    .into_iter()
    .map(|n| {
      let len_sq = n.length_squared();
      if len_sq < DEGENERATE_LENGTH_SQ {
        Vec3::Y
      } else {
        Vec3::from(n * len_sq.sqrt().recip())
      }
    })
    .collect()
}

/// Angle between two edge vectors in radians, 0 for zero-length edges.
#[inline]
pub fn angle_between(e1: Vec3A, e2: Vec3A) -> f32 {
  let len1_sq = e1.length_squared();
  let len2_sq = e2.length_squared();

  if len1_sq < DEGENERATE_LENGTH_SQ || len2_sq < DEGENERATE_LENGTH_SQ {
    return 0.0;
  }

  let cos_angle = e1.dot(e2) / (len1_sq.sqrt() * len2_sq.sqrt());

  // Clamp to [-1, 1] to handle floating point errors
  cos_angle.clamp(-1.0, 1.0).acos()
}
