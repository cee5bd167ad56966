//! Containment strategy injected into [`Octree`](super::Octree).
//!
//! The octree never inspects its elements; it only asks the classifier
//! whether a cell accepts one, and whether two elements are
//! indistinguishable so that splitting can stop.

use glam::Vec3;

use super::Aabb;
use crate::constants::SAME_POSITION_EPSILON_SQ;

/// Decides whether an element belongs in a cell.
pub trait Classifier<T> {
  fn accepts(&self, bounds: &Aabb, element: &T) -> bool;

  /// True when no further split can separate `a` from `b`.
  ///
  /// A node stops subdividing once every element is the same cell as its
  /// first one. The default never merges, so only `max_depth` and single
  /// elements stop a split.
  #[inline]
  fn same_cell(&self, _a: &T, _b: &T) -> bool {
    false
  }
}

impl<T, F> Classifier<T> for F
where
  F: Fn(&Aabb, &T) -> bool,
{
  #[inline]
  fn accepts(&self, bounds: &Aabb, element: &T) -> bool {
    self(bounds, element)
  }
}

/// Accepts `(id, position)` pairs whose position lies inside the cell.
///
/// Positions within `same_position_epsilon_sq` of each other are the same
/// cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointClassifier {
  pub same_position_epsilon_sq: f32,
}

impl PointClassifier {
  pub fn new(same_position_epsilon_sq: f32) -> Self {
    Self {
      same_position_epsilon_sq,
    }
  }
}

impl Default for PointClassifier {
  fn default() -> Self {
    Self::new(SAME_POSITION_EPSILON_SQ)
  }
}

impl<I> Classifier<(I, Vec3)> for PointClassifier {
  #[inline]
  fn accepts(&self, bounds: &Aabb, element: &(I, Vec3)) -> bool {
    bounds.contains_point(element.1)
  }

  #[inline]
  fn same_cell(&self, a: &(I, Vec3), b: &(I, Vec3)) -> bool {
    a.1.distance_squared(b.1) <= self.same_position_epsilon_sq
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_point_classifier() {
    let cell = Aabb::new(Vec3::ZERO, Vec3::ONE);
    let classifier = PointClassifier::default();
    assert!(classifier.accepts(&cell, &(0u32, Vec3::splat(0.5))));
    assert!(!classifier.accepts(&cell, &(0u32, Vec3::splat(1.5))));
  }

  #[test]
  fn test_point_classifier_same_cell() {
    let classifier = PointClassifier::new(1e-4);
    let a = (0u32, Vec3::splat(0.5));
    assert!(classifier.same_cell(&a, &(1u32, Vec3::splat(0.5))));
    assert!(classifier.same_cell(&a, &(2u32, Vec3::new(0.505, 0.5, 0.5))));
    assert!(!classifier.same_cell(&a, &(3u32, Vec3::new(0.52, 0.5, 0.5))));
  }

  #[test]
  fn test_closure_classifier_never_merges() {
    let in_x = |bounds: &Aabb, value: &f32| *value >= bounds.min.x && *value <= bounds.max.x;
    assert!(!in_x.same_cell(&0.5, &0.5));
  }

  #[test]
  fn test_closure_classifier() {
    let above_half = |bounds: &Aabb, value: &f32| *value >= bounds.min.x && *value <= bounds.max.x;
    let cell = Aabb::new(Vec3::splat(0.5), Vec3::ONE);
    assert!(above_half.accepts(&cell, &0.75));
    assert!(!above_half.accepts(&cell, &0.25));
  }
}
