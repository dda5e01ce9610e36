// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry value types.
//!
//! Numeric policy:
//! - `f64` throughout; every stored component is finite and `-0.0` is
//!   canonicalised to `+0.0`, so derived equality and hashing agree.
//! - Rotations pivot on the origin at the `Vec3` level. `Cube` rotates about
//!   its own center by moving vertices into center-relative coordinates.
//! - Bounds are inclusive on faces.

#[doc = "Axis-aligned bounding boxes."]
pub mod aabb;
#[doc = "Cubes with bit-pattern vertex indexing."]
pub mod cube;
#[doc = "Infinite lines and the closest-point solver."]
pub mod line;
#[doc = "The vector/point kernel."]
pub mod vec3;
