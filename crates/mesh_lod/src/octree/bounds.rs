//! Axis-aligned bounding box used for octree cells and mesh extents.

use glam::Vec3;

/// Single-precision axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
  /// Minimum corner (inclusive).
  pub min: Vec3,
  /// Maximum corner (inclusive).
  pub max: Vec3,
}

impl Aabb {
  /// Create a new AABB from min and max corners.
  ///
  /// # Panics
  /// Debug-asserts that min <= max on all axes.
  pub fn new(min: Vec3, max: Vec3) -> Self {
    debug_assert!(
      min.cmple(max).all(),
      "AABB min must be <= max on all axes"
    );
    Self { min, max }
  }

  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: Vec3::splat(f32::INFINITY),
      max: Vec3::splat(f32::NEG_INFINITY),
    }
  }

  /// Smallest box containing every point.
  pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
    let mut aabb = Self::empty();
    for p in points {
      aabb.encapsulate(p);
    }
    aabb
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: Vec3) {
    self.min = self.min.min(point);
    self.max = self.max.max(point);
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min.cmple(self.max).all()
  }

  /// Check if this AABB contains a point (boundary inclusive).
  #[inline]
  pub fn contains_point(&self, point: Vec3) -> bool {
    point.cmpge(self.min).all() && point.cmple(self.max).all()
  }

  /// Get the size of the AABB (max - min).
  #[inline]
  pub fn size(&self) -> Vec3 {
    self.max - self.min
  }

  /// Get the center of the AABB.
  #[inline]
  pub fn center(&self) -> Vec3 {
    (self.min + self.max) * 0.5
  }

  /// Grow every side by `amount`.
  pub fn padded(&self, amount: f32) -> Self {
    Self {
      min: self.min - Vec3::splat(amount),
      max: self.max + Vec3::splat(amount),
    }
  }

  /// Child box for one octant of a midpoint split.
  ///
  /// Octant: 0-7 where bits select the upper half of an axis:
  /// - bit 0: X
  /// - bit 1: Y
  /// - bit 2: Z
  ///
  /// Children share the parent's midpoint exactly, so the eight children
  /// tile the parent with no gaps.
  pub fn octant(&self, octant: u8) -> Self {
    let mid = self.center();
    let pick = |bit: u8, lo: f32, m: f32, hi: f32| {
      if octant & bit == 0 {
        (lo, m)
      } else {
        (m, hi)
      }
    };
    let (x0, x1) = pick(1, self.min.x, mid.x, self.max.x);
    let (y0, y1) = pick(2, self.min.y, mid.y, self.max.y);
    let (z0, z1) = pick(4, self.min.z, mid.z, self.max.z);
    Self {
      min: Vec3::new(x0, y0, z0),
      max: Vec3::new(x1, y1, z1),
    }
  }
}

impl Default for Aabb {
  fn default() -> Self {
    Self::empty()
  }
}
