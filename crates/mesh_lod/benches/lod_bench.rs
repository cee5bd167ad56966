//! Benchmarks for corner-table construction and LOD generation on UV
//! spheres of increasing resolution.

use std::f32::consts::{PI, TAU};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Vec2, Vec3};
use mesh_lod::{generate_lods, CornerTable, LodConfig, Mesh, SimplificationMethod, VertexId};

/// UV sphere with a duplicated seam column, carrying normals and uvs.
fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Mesh {
  let columns = segments + 1;
  let mut positions = Vec::new();
  let mut normals = Vec::new();
  let mut uvs = Vec::new();

  for r in 0..=rings {
    let theta = PI * r as f32 / rings as f32;
    for s in 0..columns {
      let phi = TAU * (s % segments) as f32 / segments as f32;
      let n = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
      positions.push(n * radius);
      normals.push(n);
      uvs.push(Vec2::new(s as f32 / segments as f32, r as f32 / rings as f32));
    }
  }

  let mut ids: Vec<VertexId> = Vec::new();
  for r in 0..rings {
    for s in 0..segments {
      let a = r * columns + s;
      let b = a + columns;
      if r != rings - 1 {
        ids.extend_from_slice(&[a, b + 1, b]);
      }
      if r != 0 {
        ids.extend_from_slice(&[a, a + 1, b + 1]);
      }
    }
  }

  Mesh::new(positions, ids)
    .and_then(|m| m.with_normals(normals))
    .and_then(|m| m.with_uvs(uvs))
    .expect("sphere buffers are consistent")
}

fn bench_corner_table(c: &mut Criterion) {
  let mut group = c.benchmark_group("corner_table_build");

  for segments in [32u32, 64, 128] {
    let sphere = uv_sphere(1.0, segments, segments / 2);
    group.bench_with_input(
      BenchmarkId::new("uv_sphere", format!("{} tris", sphere.triangle_count())),
      &sphere,
      |b, mesh| {
        b.iter(|| {
          let table = CornerTable::build(black_box(mesh.positions()), black_box(mesh.triangle_vertex_ids()));
          black_box(table)
        })
      },
    );
  }

  group.finish();
}

fn bench_generate_lods(c: &mut Criterion) {
  let mut group = c.benchmark_group("generate_lods");
  group.sample_size(20);

  for segments in [32u32, 64] {
    let sphere = uv_sphere(1.0, segments, segments / 2);
    for method in [SimplificationMethod::Clustering, SimplificationMethod::QuadricErrorMetrics] {
      let config = LodConfig::new().with_method(method);
      group.bench_with_input(
        BenchmarkId::new(format!("{method:?}"), format!("{} tris", sphere.triangle_count())),
        &sphere,
        |b, mesh| {
          b.iter(|| {
            let lods = generate_lods(black_box(mesh), &config);
            black_box(lods)
          })
        },
      );
    }
  }

  group.finish();
}

criterion_group!(benches, bench_corner_table, bench_generate_lods);
criterion_main!(benches);
