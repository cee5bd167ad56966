//! Test utilities: fixture meshes shared across module tests.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::types::{Mesh, VertexId};

// =============================================================================
// Fixture Meshes
// =============================================================================

/// Unit square on the XY plane facing +Z, split along the 0-2 diagonal.
///
/// ```text
///  3 ─── 2
///  │   ╱ │
///  │  ╱  │
///  │ ╱   │
///  0 ─── 1
/// ```
pub fn quad() -> Mesh {
  Mesh::new(
    vec![
      Vec3::new(0.0, 0.0, 0.0),
      Vec3::new(1.0, 0.0, 0.0),
      Vec3::new(1.0, 1.0, 0.0),
      Vec3::new(0.0, 1.0, 0.0),
    ],
    vec![0, 1, 2, 0, 2, 3],
  )
  .unwrap()
}

/// Unit cube with 8 shared vertices and 12 outward-facing triangles.
///
/// Vertex `i` sits at `(i & 1, (i >> 1) & 1, (i >> 2) & 1)`.
pub fn indexed_cube() -> Mesh {
  let positions = (0..8u32)
    .map(|i| Vec3::new((i & 1) as f32, ((i >> 1) & 1) as f32, ((i >> 2) & 1) as f32))
    .collect();
  let ids = vec![
    0, 2, 1, 1, 2, 3, // -Z
    4, 5, 6, 5, 7, 6, // +Z
    0, 1, 4, 1, 5, 4, // -Y
    2, 6, 3, 3, 6, 7, // +Y
    0, 4, 2, 2, 4, 6, // -X
    1, 3, 5, 3, 7, 5, // +X
  ];
  Mesh::new(positions, ids).unwrap()
}

/// Unit cube authored with hard edges: 4 vertices per face (24 total), each
/// carrying its face normal, a face-local uv and tangent.
pub fn seam_cube() -> Mesh {
  let faces = [
    (Vec3::X, Vec3::Y),
    (Vec3::NEG_X, Vec3::NEG_Y),
    (Vec3::Y, Vec3::Z),
    (Vec3::NEG_Y, Vec3::NEG_Z),
    (Vec3::Z, Vec3::X),
    (Vec3::NEG_Z, Vec3::NEG_X),
  ];
  let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

  let mut positions = Vec::new();
  let mut normals = Vec::new();
  let mut uvs = Vec::new();
  let mut tangents = Vec::new();
  let mut ids = Vec::new();

  for (normal, u) in faces {
    let v = normal.cross(u);
    let base = positions.len() as VertexId;
    for (su, sv) in corners {
      positions.push(Vec3::splat(0.5) + 0.5 * (normal + su * u + sv * v));
      normals.push(normal);
      uvs.push(Vec2::new((su + 1.0) * 0.5, (sv + 1.0) * 0.5));
      tangents.push(u);
    }
    ids.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
  }

  Mesh::new(positions, ids)
    .and_then(|m| m.with_normals(normals))
    .and_then(|m| m.with_uvs(uvs))
    .and_then(|m| m.with_tangents(tangents))
    .unwrap()
}

/// Regular tetrahedron centered at the origin, outward winding.
pub fn tetrahedron() -> Mesh {
  let positions = vec![
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
  ];
  let ids = orient_outward(&positions, &[0, 1, 2, 0, 3, 1, 0, 2, 3, 1, 3, 2], Vec3::ZERO);
  Mesh::new(positions, ids).unwrap()
}

/// Flat `n × n` cell grid on the XY plane facing +Z, unit cell size.
pub fn grid(n: u32) -> Mesh {
  let stride = n + 1;
  let positions = (0..stride * stride)
    .map(|i| Vec3::new((i % stride) as f32, (i / stride) as f32, 0.0))
    .collect();
  let mut ids = Vec::new();
  for y in 0..n {
    for x in 0..n {
      let a = y * stride + x;
      let b = a + 1;
      let c = a + stride + 1;
      let d = a + stride;
      ids.extend_from_slice(&[a, b, c, a, c, d]);
    }
  }
  Mesh::new(positions, ids).unwrap()
}

/// UV sphere with a duplicated seam column and duplicated pole rows, carrying
/// normals, uvs and tangents.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Mesh {
  let columns = segments + 1;
  let mut positions = Vec::new();
  let mut normals = Vec::new();
  let mut uvs = Vec::new();
  let mut tangents = Vec::new();

  for r in 0..=rings {
    let theta = PI * r as f32 / rings as f32;
    for s in 0..columns {
      let phi = TAU * (s % segments) as f32 / segments as f32;
      let n = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
      positions.push(n * radius);
      normals.push(n);
      uvs.push(Vec2::new(s as f32 / segments as f32, r as f32 / rings as f32));
      tangents.push(Vec3::new(-phi.sin(), 0.0, phi.cos()));
    }
  }

  let mut ids = Vec::new();
  for r in 0..rings {
    for s in 0..segments {
      let a = r * columns + s;
      let b = a + columns;
      if r != rings - 1 {
        ids.extend_from_slice(&[a, b, b + 1]);
      }
      if r != 0 {
        ids.extend_from_slice(&[a, b + 1, a + 1]);
      }
    }
  }
  let ids = orient_outward(&positions, &ids, Vec3::ZERO);

  Mesh::new(positions, ids)
    .and_then(|m| m.with_normals(normals))
    .and_then(|m| m.with_uvs(uvs))
    .and_then(|m| m.with_tangents(tangents))
    .unwrap()
}

/// Three triangles hinged on the edge 0-1.
pub fn non_manifold_fan() -> Mesh {
  Mesh::new(
    vec![
      Vec3::new(0.0, 0.0, 0.0),
      Vec3::new(1.0, 0.0, 0.0),
      Vec3::new(0.5, 1.0, 0.0),
      Vec3::new(0.5, -1.0, 0.0),
      Vec3::new(0.5, 0.0, 1.0),
    ],
    vec![0, 1, 2, 1, 0, 3, 0, 1, 4],
  )
  .unwrap()
}

/// Flip triangles whose face normal points toward `center`.
pub fn orient_outward(positions: &[Vec3], ids: &[VertexId], center: Vec3) -> Vec<VertexId> {
  ids
    .chunks_exact(3)
    .flat_map(|tri| {
      let [p0, p1, p2] = [0, 1, 2].map(|k| positions[tri[k] as usize]);
      let normal = (p1 - p0).cross(p2 - p0);
      let centroid = (p0 + p1 + p2) / 3.0;
      if normal.dot(centroid - center) < 0.0 {
        [tri[0], tri[2], tri[1]]
      } else {
        [tri[0], tri[1], tri[2]]
      }
    })
    .collect()
}

/// Face normal of one output triangle.
pub fn face_normal(mesh: &Mesh, triangle: usize) -> Vec3 {
  let [a, b, c] = mesh.triangle(triangle);
  let p = mesh.positions();
  (p[b as usize] - p[a as usize]).cross(p[c as usize] - p[a as usize])
}
