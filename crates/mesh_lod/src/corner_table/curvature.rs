//! Discrete curvature per unique vertex.
//!
//! Every query gathers all corners at the vertex's position, across seam
//! duplicates, and works triangle by triangle around the corner `c` at `p`:
//!
//! ```text
//!            r = prev(c)
//!           ╱ ╲
//!          ╱   ╲        angle_c at p, angle_n at n, angle_r at r
//!         ╱     ╲
//!   p = c ─────── n = next(c)
//! ```
//!
//! - Mixed Voronoi area: Voronoi region for non-obtuse triangles,
//!   area/2 or area/4 for obtuse ones.
//! - Gaussian curvature: angle deficit over the mixed area. Boundary
//!   vertices use π instead of 2π.
//! - Mean curvature: half the length of the cotangent Laplacian.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;

use super::CornerTable;
use crate::constants::DEGENERATE_LENGTH_SQ;
use crate::types::{CornerId, VertexId};

/// Cotangent of the angle between two edge vectors, 0 when degenerate.
#[inline]
fn cotangent(a: Vec3, b: Vec3) -> f32 {
  let sin_scaled = a.cross(b).length();
  if sin_scaled * sin_scaled < DEGENERATE_LENGTH_SQ {
    return 0.0;
  }
  a.dot(b) / sin_scaled
}

impl CornerTable {
  /// Triangle geometry around one corner: (p, n, r).
  #[inline]
  fn corner_triangle(&self, corner: CornerId) -> (Vec3, Vec3, Vec3) {
    (
      self.corner_position(corner),
      self.corner_position(Self::next(corner)),
      self.corner_position(Self::previous(corner)),
    )
  }

  /// True when any edge touching the vertex's position lacks a partner.
  pub fn is_boundary_vertex(&self, vertex: VertexId) -> bool {
    self
      .corners_of_unique_vertex(vertex)
      .any(|c| self.is_boundary(Self::next(c)) || self.is_boundary(Self::previous(c)))
  }

  /// Mixed Voronoi area around the vertex's position.
  pub fn mixed_voronoi_area(&self, vertex: VertexId) -> f32 {
    self
      .corners_of_unique_vertex(vertex)
      .map(|c| {
        let (p, n, r) = self.corner_triangle(c);
        let area = 0.5 * (n - p).cross(r - p).length();
        if area * area < DEGENERATE_LENGTH_SQ {
          return 0.0;
        }

        let angle_c = self.corner_angle(c);
        let angle_n = self.corner_angle(Self::next(c));
        let angle_r = self.corner_angle(Self::previous(c));

        if angle_c > FRAC_PI_2 {
          area * 0.5
        } else if angle_n > FRAC_PI_2 || angle_r > FRAC_PI_2 {
          area * 0.25
        } else {
          let cot_n = cotangent(p - n, r - n);
          let cot_r = cotangent(p - r, n - r);
          (p.distance_squared(r) * cot_n + p.distance_squared(n) * cot_r) / 8.0
        }
      })
      .sum()
  }

  /// Gaussian curvature: angle deficit divided by mixed Voronoi area.
  ///
  /// Returns 0 for isolated or zero-area vertices.
  pub fn gaussian_curvature(&self, vertex: VertexId) -> f32 {
    let area = self.mixed_voronoi_area(vertex);
    if area <= f32::EPSILON {
      return 0.0;
    }
    let angle_sum: f32 = self
      .corners_of_unique_vertex(vertex)
      .map(|c| self.corner_angle(c))
      .sum();
    let full = if self.is_boundary_vertex(vertex) { PI } else { TAU };
    (full - angle_sum) / area
  }

  /// Mean curvature normal `Δp / 2` from the cotangent Laplacian.
  ///
  /// For a closed surface this points along the inward normal with length
  /// equal to the mean curvature.
  pub fn mean_curvature_normal(&self, vertex: VertexId) -> Vec3 {
    let area = self.mixed_voronoi_area(vertex);
    if area <= f32::EPSILON {
      return Vec3::ZERO;
    }
    let laplacian: Vec3 = self
      .corners_of_unique_vertex(vertex)
      .map(|c| {
        let (p, n, r) = self.corner_triangle(c);
        let cot_n = cotangent(p - n, r - n);
        let cot_r = cotangent(p - r, n - r);
        // Edge p-n faces r, edge p-r faces n.
        (n - p) * cot_r + (r - p) * cot_n
      })
      .sum();
    laplacian / (4.0 * area)
  }

  /// Mean curvature magnitude.
  pub fn mean_curvature(&self, vertex: VertexId) -> f32 {
    self.mean_curvature_normal(vertex).length()
  }
}

#[cfg(test)]
#[path = "curvature_test.rs"]
mod curvature_test;
