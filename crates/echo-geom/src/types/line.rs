// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

use tracing::{info, trace, warn};

use crate::constants::PARALLEL_EPSILON;
use crate::error::{GeomError, Result};
use crate::types::vec3::Vec3;

/// Infinite line through two defining points.
///
/// A line whose points coincide is *degenerate*: it may be held and compared,
/// but every query that needs a direction fails with
/// [`GeomError::DegenerateState`]. The parametrisation used throughout is
/// `P(t) = p1 + t * (p2 - p1)`, so `t` in `[0, 1]` covers the segment between
/// the defining points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    p1: Vec3,
    p2: Vec3,
}

/// How [`Line::closest_points_with`] arrived at its answer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ClosestPointsKind {
    /// The lines are not parallel; the pair is the unique minimiser.
    Unique,
    /// The Gram determinant was within [`PARALLEL_EPSILON`] of zero. The pair
    /// is one of infinitely many equally close pairs, found by projecting
    /// `p1` onto the other line and back.
    ParallelFallback,
}

/// Closest pair of points between two lines, with the solver parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClosestPoints {
    on_self: Vec3,
    on_other: Vec3,
    s: f64,
    t: f64,
    kind: ClosestPointsKind,
}

impl ClosestPoints {
    /// Point on the receiver line, `p1 + s * d1`.
    pub fn on_self(&self) -> Vec3 {
        self.on_self
    }

    /// Point on the argument line, `q1 + t * d2`.
    pub fn on_other(&self) -> Vec3 {
        self.on_other
    }

    /// Parameter along the receiver line.
    pub fn s(&self) -> f64 {
        self.s
    }

    /// Parameter along the argument line.
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Which branch of the solver produced the pair.
    pub fn kind(&self) -> ClosestPointsKind {
        self.kind
    }

    /// Distance between the two points.
    pub fn distance(&self) -> f64 {
        self.on_self.distance_to(&self.on_other)
    }

    /// Returns `(on_self, on_other)`.
    pub fn into_pair(self) -> (Vec3, Vec3) {
        (self.on_self, self.on_other)
    }
}

impl Line {
    /// Creates the line through `p1` and `p2`.
    ///
    /// Identical points are accepted; the resulting line is degenerate and a
    /// warning is emitted.
    pub fn new(p1: Vec3, p2: Vec3) -> Self {
        if p1 == p2 {
            warn!(
                op = "line.new",
                "creating a line through identical points {p1}; the line is degenerate"
            );
        } else {
            trace!(op = "line.new", "created line through {p1} and {p2}");
        }
        Self { p1, p2 }
    }

    /// Creates the line through `point` with the second defining point at
    /// `point + direction`.
    ///
    /// A direction too small to move `point` at its magnitude yields a
    /// degenerate line, with the same warning as [`Line::new`].
    ///
    /// # Errors
    /// - [`GeomError::DegenerateState`] if `direction` is the zero vector.
    /// - [`GeomError::InvalidArgument`] if `point + direction` overflows.
    pub fn from_point_and_direction(point: Vec3, direction: Vec3) -> Result<Self> {
        const OP: &str = "line.from_point_and_direction";
        if direction == Vec3::ZERO {
            return Err(GeomError::degenerate(OP, "direction must be non-zero"));
        }
        let second = point.add(&direction)?;
        trace!(op = OP, "created line from {point} along {direction}");
        // `point + direction` can round back to `point`; `new` reports that.
        Ok(Self::new(point, second))
    }

    /// First defining point.
    pub fn p1(&self) -> Vec3 {
        self.p1
    }

    /// Second defining point.
    pub fn p2(&self) -> Vec3 {
        self.p2
    }

    /// Returns `true` when the defining points coincide.
    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }

    /// Length of the segment between the defining points.
    ///
    /// Zero for a degenerate line; the line itself is infinite.
    pub fn length(&self) -> f64 {
        self.p1.distance_to(&self.p2)
    }

    /// Point at parameter `t`: `p1 + t * (p2 - p1)`.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if `t` is not finite or the
    /// point overflows.
    pub fn point_at(&self, t: f64) -> Result<Vec3> {
        if !t.is_finite() {
            return Err(GeomError::invalid("line.point_at", "t must be finite"));
        }
        let delta = self.p2.sub(&self.p1)?;
        self.p1.add(&delta.scale(t)?)
    }

    /// Unit direction from `p1` towards `p2`.
    ///
    /// # Errors
    /// Returns [`GeomError::DegenerateState`] if the line is degenerate.
    pub fn direction(&self) -> Result<Vec3> {
        if self.is_degenerate() {
            return Err(GeomError::degenerate(
                "line.direction",
                "line has zero direction",
            ));
        }
        self.p2.sub(&self.p1)?.normalize()
    }

    /// Perpendicular distance from `point` to the infinite line,
    /// `|d x (p1 - point)| / |d|` with `d = p2 - p1`.
    ///
    /// # Errors
    /// Returns [`GeomError::DegenerateState`] if the line is degenerate.
    pub fn distance_to_point(&self, point: &Vec3) -> Result<f64> {
        const OP: &str = "line.distance_to_point";
        if self.is_degenerate() {
            return Err(GeomError::degenerate(OP, "line has zero direction"));
        }
        let d = self.p2.sub(&self.p1)?;
        let r = self.p1.sub(point)?;
        let dist = d.cross(&r)?.magnitude() / d.magnitude();
        trace!(op = OP, distance = dist, "distance from {self} to {point}");
        Ok(dist)
    }

    /// Returns `true` if `|d1 x d2| <= PARALLEL_EPSILON`.
    ///
    /// A degenerate line has a zero direction and is therefore parallel to
    /// every line, itself included.
    pub fn is_parallel(&self, other: &Self) -> bool {
        let d1 = direction_components(self);
        let d2 = direction_components(other);
        let [x, y, z] = Vec3::cross_components_of(d1, d2);
        x.hypot(y).hypot(z) <= PARALLEL_EPSILON
    }

    /// Closest pair of points between this infinite line and `other`.
    ///
    /// Minimises `|P(s) - Q(t)|` for `P(s) = p1 + s * d1` and
    /// `Q(t) = q1 + t * d2` through the normal equations
    ///
    /// ```text
    /// a = d1.d1   b = d1.d2   c = d2.d2   d = d1.r   e = d2.r   (r = p1 - q1)
    /// s = (b e - c d) / (a c - b^2)
    /// t = (a e - b d) / (a c - b^2)
    /// ```
    ///
    /// When the Gram determinant `a c - b^2` is within [`PARALLEL_EPSILON`]
    /// of zero the system is ill-conditioned; `p1` is projected onto `other`
    /// and the result projected back instead, and a warning is emitted. The
    /// returned [`ClosestPoints::kind`] records which branch ran.
    ///
    /// # Errors
    /// - [`GeomError::DegenerateState`] if either line is degenerate.
    /// - [`GeomError::InvalidArgument`] if intermediate points overflow.
    #[allow(clippy::float_cmp)]
    pub fn closest_points_with(&self, other: &Self) -> Result<ClosestPoints> {
        const OP: &str = "line.closest_points_with";
        let d1 = self.p2.sub(&self.p1)?;
        let d2 = other.p2.sub(&other.p1)?;
        let a = d1.dot(&d1);
        let c = d2.dot(&d2);
        if a == 0.0 || c == 0.0 {
            return Err(GeomError::degenerate(OP, "one of the lines has zero direction"));
        }
        let r = self.p1.sub(&other.p1)?;
        let b = d1.dot(&d2);
        let d = d1.dot(&r);
        let e = d2.dot(&r);
        let denom = a * c - b * b;

        if denom.abs() <= PARALLEL_EPSILON {
            warn!(
                op = OP,
                gram_determinant = denom,
                "lines are nearly parallel; using projection fallback"
            );
            let t = e / c;
            let on_other = other.p1.add(&d2.scale(t)?)?;
            let s = d1.dot(&on_other.sub(&self.p1)?) / a;
            let on_self = self.p1.add(&d1.scale(s)?)?;
            info!(op = OP, s, t, "parallel fallback pair {on_self} / {on_other}");
            return Ok(ClosestPoints {
                on_self,
                on_other,
                s,
                t,
                kind: ClosestPointsKind::ParallelFallback,
            });
        }

        let s = (b * e - c * d) / denom;
        let t = (a * e - b * d) / denom;
        let on_self = self.p1.add(&d1.scale(s)?)?;
        let on_other = other.p1.add(&d2.scale(t)?)?;
        info!(op = OP, s, t, "closest pair {on_self} / {on_other}");
        Ok(ClosestPoints {
            on_self,
            on_other,
            s,
            t,
            kind: ClosestPointsKind::Unique,
        })
    }

    /// Shortest distance between this infinite line and `other`.
    ///
    /// # Errors
    /// Same as [`Line::closest_points_with`].
    pub fn shortest_distance_to(&self, other: &Self) -> Result<f64> {
        let dist = self.closest_points_with(other)?.distance();
        info!(
            op = "line.shortest_distance_to",
            distance = dist,
            "shortest distance between {self} and {other}"
        );
        Ok(dist)
    }

    /// Translates both defining points.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] for non-finite deltas or overflow.
    pub fn translate(&self, dx: f64, dy: f64, dz: f64) -> Result<Self> {
        Ok(Self {
            p1: self.p1.translate(dx, dy, dz)?,
            p2: self.p2.translate(dx, dy, dz)?,
        })
    }

    /// Rotates both defining points about the X axis through the origin.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if `radians` is not finite.
    pub fn rotate_x(&self, radians: f64) -> Result<Self> {
        self.map_points(|p| p.rotate_x(radians))
    }

    /// Rotates both defining points about the Y axis through the origin.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if `radians` is not finite.
    pub fn rotate_y(&self, radians: f64) -> Result<Self> {
        self.map_points(|p| p.rotate_y(radians))
    }

    /// Rotates both defining points about the Z axis through the origin.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if `radians` is not finite.
    pub fn rotate_z(&self, radians: f64) -> Result<Self> {
        self.map_points(|p| p.rotate_z(radians))
    }

    fn map_points(&self, f: impl Fn(&Vec3) -> Result<Vec3>) -> Result<Self> {
        Ok(Self {
            p1: f(&self.p1)?,
            p2: f(&self.p2)?,
        })
    }
}

/// `p2 - p1` without the finiteness check; only used for the parallel test,
/// where an overflowing direction simply reads as "not parallel".
fn direction_components(line: &Line) -> [f64; 3] {
    let a = line.p1.to_array();
    let b = line.p2.to_array();
    [b[0] - a[0], b[1] - a[1], b[2] - a[2]]
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line[{} -> {}]", self.p1, self.p2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3::new(x, y, z).unwrap()
    }

    #[test]
    fn intersecting_lines_meet_at_the_intersection() {
        let a = Line::new(v(-1.0, 0.0, 0.0), v(1.0, 0.0, 0.0));
        let b = Line::new(v(0.0, -1.0, 0.0), v(0.0, 1.0, 0.0));
        let cp = a.closest_points_with(&b).unwrap();
        assert_eq!(cp.kind(), ClosestPointsKind::Unique);
        assert_eq!(cp.on_self(), Vec3::ZERO);
        assert_eq!(cp.on_other(), Vec3::ZERO);
        assert_eq!((cp.s(), cp.t()), (0.5, 0.5));
    }

    #[test]
    fn degenerate_line_is_parallel_to_everything() {
        let p = v(1.0, 2.0, 3.0);
        let degenerate = Line::new(p, p);
        let other = Line::new(Vec3::ZERO, v(0.0, 1.0, 1.0));
        assert!(degenerate.is_parallel(&other));
        assert!(other.is_parallel(&degenerate));
        assert!(degenerate.is_parallel(&degenerate));
    }

    #[test]
    fn display_uses_six_decimals() {
        let l = Line::new(Vec3::ZERO, v(1.0, 0.5, -2.0));
        assert_eq!(
            l.to_string(),
            "Line[Vec3(0.000000, 0.000000, 0.000000) -> Vec3(1.000000, 0.500000, -2.000000)]"
        );
    }
}
