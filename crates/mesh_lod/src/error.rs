//! Precondition violations for mesh input and adjacency queries.
//!
//! Only malformed input is an error. Boundary or non-manifold adjacency is a
//! `None` corner, and a singular quadric is a `QuadricSolution::Singular`
//! value; neither ever surfaces here.

use thiserror::Error;

use crate::types::{CornerId, VertexId};

/// Caller errors detected while validating mesh buffers or query ids.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
  /// Triangle index buffer does not hold whole triangles.
  #[error("triangle index count {len} is not a multiple of 3")]
  IndexCountNotMultipleOfThree { len: usize },

  /// A triangle references a vertex that does not exist.
  #[error("vertex id {id} is out of range for {vertex_count} vertices")]
  VertexIdOutOfRange { id: VertexId, vertex_count: usize },

  /// An optional attribute pool does not line up with `positions`.
  #[error("{attribute} has {actual} entries, expected {expected}")]
  AttributeLengthMismatch {
    attribute: &'static str,
    expected: usize,
    actual: usize,
  },

  /// A corner query used an id past the end of the table.
  #[error("corner id {corner} is out of range for {corner_count} corners")]
  CornerOutOfRange { corner: CornerId, corner_count: usize },

  /// A vertex query used an id past the end of the position pool.
  #[error("vertex {vertex} is out of range for {vertex_count} vertices")]
  VertexOutOfRange { vertex: VertexId, vertex_count: usize },
}

/// Result alias used throughout the crate.
pub type MeshResult<T> = Result<T, MeshError>;

/// Validate a position pool and flat triangle list together.
pub fn validate_triangles(vertex_count: usize, triangle_vertex_ids: &[VertexId]) -> MeshResult<()> {
  if triangle_vertex_ids.len() % 3 != 0 {
    return Err(MeshError::IndexCountNotMultipleOfThree {
      len: triangle_vertex_ids.len(),
    });
  }
  if let Some(&id) = triangle_vertex_ids
    .iter()
    .find(|&&id| id as usize >= vertex_count)
  {
    return Err(MeshError::VertexIdOutOfRange { id, vertex_count });
  }
  Ok(())
}

/// Validate that an attribute pool has one entry per vertex.
pub fn validate_attribute(
  attribute: &'static str,
  expected: usize,
  actual: usize,
) -> MeshResult<()> {
  if expected != actual {
    return Err(MeshError::AttributeLengthMismatch {
      attribute,
      expected,
      actual,
    });
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_valid_triangles() {
    assert_eq!(validate_triangles(3, &[0, 1, 2]), Ok(()));
    assert_eq!(validate_triangles(0, &[]), Ok(()));
  }

  #[test]
  fn test_partial_triangle_rejected() {
    assert_eq!(
      validate_triangles(3, &[0, 1]),
      Err(MeshError::IndexCountNotMultipleOfThree { len: 2 })
    );
  }

  #[test]
  fn test_out_of_range_rejected() {
    assert_eq!(
      validate_triangles(3, &[0, 1, 3]),
      Err(MeshError::VertexIdOutOfRange {
        id: 3,
        vertex_count: 3
      })
    );
  }

  #[test]
  fn test_error_messages() {
    let err = MeshError::AttributeLengthMismatch {
      attribute: "normals",
      expected: 8,
      actual: 7,
    };
    assert_eq!(err.to_string(), "normals has 7 entries, expected 8");
  }
}
