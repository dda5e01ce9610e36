// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![doc = r"Geometry primitives for Echo.

This crate provides:
- An immutable 3D vector/point kernel (`Vec3`).
- Infinite lines with a closest-point solver for skew and parallel pairs
  (`Line`, `ClosestPoints`).
- Cubes that derive their topology from bit-pattern vertex indices, with
  rigid transforms about their own center (`Cube`).
- Axis-aligned bounds (`Aabb`).

Design notes:
- Values are immutable `Copy` types; every transform returns a new value.
- Constructors validate and return `Result<_, GeomError>`; stored components
  are always finite.
- Equality is exact (no epsilon); hashing agrees with equality.
- Diagnostics go through `tracing` only. See [`diag`] for routing them to a
  caller-supplied sink.
"]

/// Numeric tolerances and fixed topology sizes.
pub mod constants;
/// Diagnostics port and `tracing` bridge.
pub mod diag;
mod error;
/// Geometry value types.
pub mod types;

pub use error::{GeomError, Result};
pub use types::aabb::Aabb;
pub use types::cube::Cube;
pub use types::line::{ClosestPoints, ClosestPointsKind, Line};
pub use types::vec3::Vec3;
