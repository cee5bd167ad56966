//! Numeric tunables shared by adjacency, clustering and simplification.
//!
//! # Position Identity
//!
//! ```text
//! Two vertex ids are the SAME topological point when
//!
//!   |p(a) - p(b)|² <= SAME_POSITION_EPSILON_SQ
//!
//! Authored seams duplicate a position with different normals/uvs:
//!
//!   id 3 ─┐
//!   id 7 ─┼──► (1.0, 0.0, 0.0) ──► unique id 3
//!   id 9 ─┘
//! ```
//!
//! # Octree Padding
//!
//! ```text
//!  ┌───────────────────────────┐  ◄─ padded root box
//!  │ pad                       │
//!  │   ┌───────────────────┐   │
//!  │   │   mesh bounds     │   │     pad = max_extent * padding_percent / 100
//!  │   │                   │   │
//!  │   └───────────────────┘   │
//!  │                           │
//!  └───────────────────────────┘
//! ```

/// Squared distance under which two positions are treated as identical.
pub const SAME_POSITION_EPSILON_SQ: f32 = 1e-5;

/// Default deepest octree level visited during LOD generation.
pub const DEFAULT_MAX_OCTREE_DEPTH: usize = 8;

/// Default root box padding, in percent of the largest mesh extent.
pub const DEFAULT_PADDING_PERCENT: f32 = 5.0;

/// Minimum absolute padding so flat or single-point meshes still get a box
/// with volume.
pub const MIN_PADDING: f32 = 1e-4;

/// Relative determinant threshold below which the 3×3 quadric block is
/// considered singular.
///
/// Compared against `det(A) / (trace(A) / 3)³`, which is scale-free for
/// quadrics built from unit normals.
pub const QEM_SINGULAR_TOLERANCE: f64 = 1e-6;

/// Squared length under which a vector is treated as zero.
pub const DEGENERATE_LENGTH_SQ: f32 = 1e-12;

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
