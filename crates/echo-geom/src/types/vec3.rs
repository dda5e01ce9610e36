// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;
use core::hash::{Hash, Hasher};

use tracing::{trace, warn};

use crate::constants::NORMALIZE_STABILITY_THRESHOLD;
use crate::error::{GeomError, Result};

/// Immutable 3D vector used by every geometry type in the crate.
///
/// * Components may represent either points or free vectors depending on the
///   calling context.
/// * Every component is finite. The invariant is checked at every
///   construction point, including the results of arithmetic, so an
///   overflowing sum is reported instead of stored.
/// * `-0.0` is stored as `+0.0`, which keeps exact equality and hashing in
///   agreement.
///
/// Equality is exact component-wise comparison; apply your own epsilon when a
/// tolerance is needed.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "[f64; 3]", into = "[f64; 3]")
)]
pub struct Vec3 {
    data: [f64; 3],
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self::raw(0.0, 0.0, 0.0);

    /// Unit vector pointing along the positive X axis.
    pub const UNIT_X: Self = Self::raw(1.0, 0.0, 0.0);

    /// Unit vector pointing along the positive Y axis.
    pub const UNIT_Y: Self = Self::raw(0.0, 1.0, 0.0);

    /// Unit vector pointing along the positive Z axis.
    pub const UNIT_Z: Self = Self::raw(0.0, 0.0, 1.0);

    const fn raw(x: f64, y: f64, z: f64) -> Self {
        Self { data: [x, y, z] }
    }

    /// Builds a vector from components already known to be finite.
    fn canonical(x: f64, y: f64, z: f64) -> Self {
        Self::raw(x + 0.0, y + 0.0, z + 0.0)
    }

    fn checked(op: &'static str, reason: &'static str, x: f64, y: f64, z: f64) -> Result<Self> {
        if x.is_finite() && y.is_finite() && z.is_finite() {
            Ok(Self::canonical(x, y, z))
        } else {
            Err(GeomError::invalid(op, reason))
        }
    }

    fn finite_result(op: &'static str, x: f64, y: f64, z: f64) -> Result<Self> {
        Self::checked(op, "result is not finite", x, y, z)
    }

    /// Wraps components computed by another operation, reporting a
    /// non-finite result under that operation's name.
    pub(crate) fn from_result_components(op: &'static str, [x, y, z]: [f64; 3]) -> Result<Self> {
        Self::finite_result(op, x, y, z)
    }

    /// Creates a vector from components.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if any component is NaN or
    /// infinite.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        let v = Self::checked("vec3.new", "coordinates must be finite numbers", x, y, z)?;
        trace!(op = "vec3.new", "created {v}");
        Ok(v)
    }

    /// X component.
    pub fn x(&self) -> f64 {
        self.data[0]
    }

    /// Y component.
    pub fn y(&self) -> f64 {
        self.data[1]
    }

    /// Z component.
    pub fn z(&self) -> f64 {
        self.data[2]
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f64; 3] {
        self.data
    }

    /// Adds two vectors.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if the sum overflows.
    pub fn add(&self, other: &Self) -> Result<Self> {
        let [ax, ay, az] = self.data;
        let [bx, by, bz] = other.data;
        Self::finite_result("vec3.add", ax + bx, ay + by, az + bz)
    }

    /// Subtracts another vector.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if the difference overflows.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        let [ax, ay, az] = self.data;
        let [bx, by, bz] = other.data;
        Self::finite_result("vec3.sub", ax - bx, ay - by, az - bz)
    }

    /// Scales the vector by `factor`.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if `factor` is not finite or the
    /// product overflows.
    pub fn scale(&self, factor: f64) -> Result<Self> {
        if !factor.is_finite() {
            return Err(GeomError::invalid("vec3.scale", "factor must be finite"));
        }
        let [x, y, z] = self.data;
        Self::finite_result("vec3.scale", x * factor, y * factor, z * factor)
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> f64 {
        self.data[0] * other.data[0] + self.data[1] * other.data[1] + self.data[2] * other.data[2]
    }

    /// Unchecked cross product of raw component arrays.
    pub(crate) fn cross_components_of([ax, ay, az]: [f64; 3], [bx, by, bz]: [f64; 3]) -> [f64; 3] {
        [ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx]
    }

    /// Cross product with another vector (right-hand rule).
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if the product overflows.
    pub fn cross(&self, other: &Self) -> Result<Self> {
        let [x, y, z] = Self::cross_components_of(self.data, other.data);
        Self::finite_result("vec3.cross", x, y, z)
    }

    /// Euclidean length.
    ///
    /// Computed without intermediate squaring, so the result is zero only for
    /// the zero vector even when components are tiny.
    pub fn magnitude(&self) -> f64 {
        norm(self.data)
    }

    /// Squared length (`self · self`).
    pub fn magnitude_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Self) -> f64 {
        norm([
            other.data[0] - self.data[0],
            other.data[1] - self.data[1],
            other.data[2] - self.data[2],
        ])
    }

    /// Returns the unit vector pointing the same way.
    ///
    /// Magnitudes below [`NORMALIZE_STABILITY_THRESHOLD`] still normalize but
    /// emit a warning.
    ///
    /// # Errors
    /// Returns [`GeomError::DegenerateState`] for the zero vector.
    #[allow(clippy::float_cmp)]
    pub fn normalize(&self) -> Result<Self> {
        const OP: &str = "vec3.normalize";
        let mag = self.magnitude();
        if mag == 0.0 {
            return Err(GeomError::degenerate(OP, "cannot normalize a zero-length vector"));
        }
        if mag < NORMALIZE_STABILITY_THRESHOLD {
            warn!(
                op = OP,
                magnitude = mag,
                "normalizing a near-zero vector may be numerically unstable"
            );
        }
        let [x, y, z] = self.data;
        Self::finite_result(OP, x / mag, y / mag, z / mag)
    }

    /// Rotates about the X axis through the origin by `radians`.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if `radians` is not finite.
    pub fn rotate_x(&self, radians: f64) -> Result<Self> {
        const OP: &str = "vec3.rotate_x";
        let (sin, cos) = sin_cos(OP, radians)?;
        let [x, y, z] = self.data;
        Self::finite_result(OP, x, y * cos - z * sin, y * sin + z * cos)
    }

    /// Rotates about the Y axis through the origin by `radians`.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if `radians` is not finite.
    pub fn rotate_y(&self, radians: f64) -> Result<Self> {
        const OP: &str = "vec3.rotate_y";
        let (sin, cos) = sin_cos(OP, radians)?;
        let [x, y, z] = self.data;
        Self::finite_result(OP, x * cos + z * sin, y, -x * sin + z * cos)
    }

    /// Rotates about the Z axis through the origin by `radians`.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if `radians` is not finite.
    pub fn rotate_z(&self, radians: f64) -> Result<Self> {
        const OP: &str = "vec3.rotate_z";
        let (sin, cos) = sin_cos(OP, radians)?;
        let [x, y, z] = self.data;
        Self::finite_result(OP, x * cos - y * sin, x * sin + y * cos, z)
    }

    /// Adds `(dx, dy, dz)` component-wise.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if any delta is not finite or
    /// the result overflows.
    pub fn translate(&self, dx: f64, dy: f64, dz: f64) -> Result<Self> {
        const OP: &str = "vec3.translate";
        if !(dx.is_finite() && dy.is_finite() && dz.is_finite()) {
            return Err(GeomError::invalid(OP, "deltas must be finite"));
        }
        let [x, y, z] = self.data;
        Self::finite_result(OP, x + dx, y + dy, z + dz)
    }

    /// Component-wise minimum. Finite inputs give a finite result.
    pub(crate) fn component_min(&self, other: &Self) -> Self {
        Self::canonical(
            self.data[0].min(other.data[0]),
            self.data[1].min(other.data[1]),
            self.data[2].min(other.data[2]),
        )
    }

    /// Component-wise maximum. Finite inputs give a finite result.
    pub(crate) fn component_max(&self, other: &Self) -> Self {
        Self::canonical(
            self.data[0].max(other.data[0]),
            self.data[1].max(other.data[1]),
            self.data[2].max(other.data[2]),
        )
    }

    /// Midpoint of `self` and `other`; halves first so it cannot overflow.
    pub(crate) fn midpoint(&self, other: &Self) -> Self {
        Self::canonical(
            self.data[0] * 0.5 + other.data[0] * 0.5,
            self.data[1] * 0.5 + other.data[1] * 0.5,
            self.data[2] * 0.5 + other.data[2] * 0.5,
        )
    }
}

fn norm([x, y, z]: [f64; 3]) -> f64 {
    x.hypot(y).hypot(z)
}

fn sin_cos(op: &'static str, radians: f64) -> Result<(f64, f64)> {
    if radians.is_finite() {
        Ok(radians.sin_cos())
    } else {
        Err(GeomError::invalid(op, "radians must be finite"))
    }
}

// Components are finite and zero is canonical, so bitwise equality matches `==`.
impl Eq for Vec3 {}

impl Hash for Vec3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.data {
            c.to_bits().hash(state);
        }
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.data;
        write!(f, "Vec3({x:.6}, {y:.6}, {z:.6})")
    }
}

/// Converts `[x, y, z]` into a validated `Vec3`.
///
/// # Examples
/// ```
/// use echo_geom::Vec3;
/// let v = Vec3::try_from([1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
/// assert!(Vec3::try_from([f64::NAN, 0.0, 0.0]).is_err());
/// ```
impl TryFrom<[f64; 3]> for Vec3 {
    type Error = GeomError;

    fn try_from([x, y, z]: [f64; 3]) -> Result<Self> {
        Self::new(x, y, z)
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(value: Vec3) -> Self {
        value.data
    }
}
