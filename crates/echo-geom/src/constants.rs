// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Numeric tolerances and fixed topology sizes shared by the geometry types.

/// Threshold on `|d1 × d2|` (and on the Gram determinant) below which two
/// lines are treated as parallel.
///
/// This is a degeneracy threshold in squared-length units, not a precision
/// guarantee: callers working at very small scales should rescale first.
pub const PARALLEL_EPSILON: f64 = 1e-12;

/// Magnitudes below this value still normalize, but emit a warning because
/// the resulting unit vector is numerically unstable.
pub const NORMALIZE_STABILITY_THRESHOLD: f64 = 1e-12;

/// Pairwise vertex distances at or below this value are treated as
/// coincident when inferring a cube's side length.
pub const VERTEX_COINCIDENCE_EPSILON: f64 = 1e-12;

/// Relative tolerance when checking a deserialized cube's stored center and
/// side against the values inferred from its vertices. Scaled by
/// `side + |center|`.
pub const CUBE_CONSISTENCY_TOLERANCE: f64 = 1e-9;

/// Number of vertices of a cube.
pub const CUBE_VERTEX_COUNT: usize = 8;

/// Number of edges of a cube.
pub const CUBE_EDGE_COUNT: usize = 12;
