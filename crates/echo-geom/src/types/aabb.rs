// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

use crate::error::{GeomError, Result};
use crate::types::vec3::Vec3;

/// Axis-aligned bounding box given by its minimum and maximum corners.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Containment is inclusive on faces.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Constructs an AABB from its minimum and maximum corners.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if any component of `min` is
    /// greater than its counterpart in `max`.
    pub fn new(min: Vec3, max: Vec3) -> Result<Self> {
        let a = min.to_array();
        let b = max.to_array();
        if a[0] <= b[0] && a[1] <= b[1] && a[2] <= b[2] {
            Ok(Self { min, max })
        } else {
            Err(GeomError::invalid("aabb.new", "min corner must not exceed max corner"))
        }
    }

    /// Builds the minimal AABB that contains all `points`.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if `points` is empty.
    pub fn from_points(points: &[Vec3]) -> Result<Self> {
        match points.split_first() {
            Some((first, rest)) => Ok(Self::enclosing(*first, rest)),
            None => Err(GeomError::invalid(
                "aabb.from_points",
                "at least one point is required",
            )),
        }
    }

    pub(crate) fn enclosing(first: Vec3, rest: &[Vec3]) -> Self {
        rest.iter().fold(Self { min: first, max: first }, |acc, p| Self {
            min: acc.min.component_min(p),
            max: acc.max.component_max(p),
        })
    }

    /// Returns the minimum corner.
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Returns `(min, max)`.
    pub fn corners(&self) -> (Vec3, Vec3) {
        (self.min, self.max)
    }

    /// Center of the box.
    pub fn center(&self) -> Vec3 {
        self.min.midpoint(&self.max)
    }

    /// Edge lengths along x, y, z. May be infinite for boxes spanning more
    /// than `f64::MAX`.
    pub fn extent(&self) -> [f64; 3] {
        let a = self.min.to_array();
        let b = self.max.to_array();
        [b[0] - a[0], b[1] - a[1], b[2] - a[2]]
    }

    /// Returns `true` if `point` lies inside the box or on its boundary.
    pub fn contains(&self, point: &Vec3) -> bool {
        let p = point.to_array();
        let a = self.min.to_array();
        let b = self.max.to_array();
        (0..3).all(|i| a[i] <= p[i] && p[i] <= b[i])
    }
}

impl fmt::Display for Aabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Aabb[min={} max={}]", self.min, self.max)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Aabb {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            min: Vec3,
            max: Vec3,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.min, raw.max).map_err(serde::de::Error::custom)
    }
}
