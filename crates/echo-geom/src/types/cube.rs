// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;
use core::hash::{Hash, Hasher};

use tracing::info;

use crate::constants::{CUBE_EDGE_COUNT, CUBE_VERTEX_COUNT, VERTEX_COINCIDENCE_EPSILON};
use crate::error::{GeomError, Result};
use crate::types::aabb::Aabb;
use crate::types::line::Line;
use crate::types::vec3::Vec3;

/// Cube described by its center, side length, and eight vertices.
///
/// Vertex `i` sits at `center + (±h, ±h, ±h)` with `h = side / 2`; bit 0 of
/// `i` selects the x sign, bit 1 the y sign, bit 2 the z sign (set bit means
/// `+h`). Rotations keep the index-to-corner assignment, so after rotating
/// the vertices are no longer axis-aligned but edges still connect indices
/// that differ in exactly one bit.
///
/// Cubes built with [`Cube::from_vertices`] trust the caller: the center is
/// the centroid and the side the shortest non-degenerate pairwise distance,
/// whether or not the points really form a cube.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cube {
    center: Vec3,
    side: f64,
    vertices: [Vec3; CUBE_VERTEX_COUNT],
}

/// Vertex index pairs at Hamming distance one, `i < j`, in ascending `i`.
const fn edge_index_pairs() -> [(usize, usize); CUBE_EDGE_COUNT] {
    let mut pairs = [(0, 0); CUBE_EDGE_COUNT];
    let mut n = 0;
    let mut i = 0;
    while i < CUBE_VERTEX_COUNT {
        let mut bit = 0;
        while bit < 3 {
            let j = i ^ (1 << bit);
            if i < j {
                pairs[n] = (i, j);
                n += 1;
            }
            bit += 1;
        }
        i += 1;
    }
    pairs
}

fn corner_offset(index: usize, axis_bit: usize, half: f64) -> f64 {
    if index & axis_bit == 0 {
        -half
    } else {
        half
    }
}

impl Cube {
    /// The twelve edges as vertex index pairs.
    pub const EDGE_INDEX_PAIRS: [(usize, usize); CUBE_EDGE_COUNT] = edge_index_pairs();

    /// Builds the axis-aligned cube centred on `center`.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if `side` is not a positive
    /// finite number or a vertex coordinate overflows.
    pub fn from_center_and_side(center: Vec3, side: f64) -> Result<Self> {
        const OP: &str = "cube.from_center_and_side";
        if !side.is_finite() || side <= 0.0 {
            return Err(GeomError::invalid(OP, "side must be positive and finite"));
        }
        let h = side / 2.0;
        let mut vertices = [center; CUBE_VERTEX_COUNT];
        for (i, vertex) in vertices.iter_mut().enumerate() {
            *vertex = center.translate(
                corner_offset(i, 1, h),
                corner_offset(i, 2, h),
                corner_offset(i, 4, h),
            )?;
        }
        info!(op = OP, side, "created axis-aligned cube at {center}");
        Ok(Self {
            center,
            side,
            vertices,
        })
    }

    /// Builds a cube from exactly eight vertices in bit-pattern order.
    ///
    /// The center is the centroid. The side is the smallest of the 28
    /// pairwise distances that exceeds [`VERTEX_COINCIDENCE_EPSILON`]; on a
    /// true cube that is the edge length, since edges are shorter than face
    /// diagonals, which are shorter than space diagonals. Nothing checks
    /// that the points actually form a cube.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if `vertices` does not hold
    /// exactly eight points, or if every pair of points coincides.
    pub fn from_vertices(vertices: &[Vec3]) -> Result<Self> {
        const OP: &str = "cube.from_vertices";
        let vertices: [Vec3; CUBE_VERTEX_COUNT] = vertices
            .try_into()
            .map_err(|_| GeomError::invalid(OP, "exactly eight vertices are required"))?;

        let center = centroid(OP, &vertices)?;

        let mut side = f64::INFINITY;
        for (i, a) in vertices.iter().enumerate() {
            for b in &vertices[i + 1..] {
                let d = a.distance_to(b);
                if d > VERTEX_COINCIDENCE_EPSILON && d < side {
                    side = d;
                }
            }
        }
        if !side.is_finite() {
            return Err(GeomError::invalid(
                OP,
                "could not infer a valid side length from vertices",
            ));
        }

        info!(op = OP, side, "inferred cube centre {center}");
        Ok(Self {
            center,
            side,
            vertices,
        })
    }

    /// Center point.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Side length.
    pub fn side(&self) -> f64 {
        self.side
    }

    /// Copy of the eight vertices in bit-pattern order.
    pub fn vertices(&self) -> [Vec3; CUBE_VERTEX_COUNT] {
        self.vertices
    }

    /// Vertex `index`, or `None` when `index >= 8`.
    pub fn vertex(&self, index: usize) -> Option<Vec3> {
        self.vertices.get(index).copied()
    }

    /// The twelve edges, ordered as [`Cube::EDGE_INDEX_PAIRS`].
    ///
    /// Edges between coincident vertices (possible only for
    /// [`Cube::from_vertices`] input) are returned as degenerate lines.
    pub fn edges(&self) -> [Line; CUBE_EDGE_COUNT] {
        Self::EDGE_INDEX_PAIRS.map(|(i, j)| Line::new(self.vertices[i], self.vertices[j]))
    }

    /// Sum of the twelve edge lengths.
    ///
    /// Equal to `12 * side` for a true cube; summed from the actual edges so
    /// that vertex-derived cubes report what their vertices describe.
    pub fn perimeter_length(&self) -> f64 {
        let total: f64 = self.edges().iter().map(Line::length).sum();
        info!(op = "cube.perimeter_length", total, "perimeter of {self}");
        total
    }

    /// `side³`.
    pub fn volume(&self) -> f64 {
        self.side * self.side * self.side
    }

    /// `6 · side²`.
    pub fn surface_area(&self) -> f64 {
        6.0 * self.side * self.side
    }

    /// Translates the center and every vertex by `(dx, dy, dz)`.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] for non-finite deltas or overflow.
    pub fn translate(&self, dx: f64, dy: f64, dz: f64) -> Result<Self> {
        let center = self.center.translate(dx, dy, dz)?;
        let mut vertices = self.vertices;
        for vertex in &mut vertices {
            *vertex = vertex.translate(dx, dy, dz)?;
        }
        info!(op = "cube.translate", dx, dy, dz, "translated cube to {center}");
        Ok(Self {
            center,
            side: self.side,
            vertices,
        })
    }

    /// Rotates the cube about the X axis through its own center.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if `radians` is not finite.
    pub fn rotate_x(&self, radians: f64) -> Result<Self> {
        self.rotate_about_center("cube.rotate_x", radians, Vec3::rotate_x)
    }

    /// Rotates the cube about the Y axis through its own center.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if `radians` is not finite.
    pub fn rotate_y(&self, radians: f64) -> Result<Self> {
        self.rotate_about_center("cube.rotate_y", radians, Vec3::rotate_y)
    }

    /// Rotates the cube about the Z axis through its own center.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidArgument`] if `radians` is not finite.
    pub fn rotate_z(&self, radians: f64) -> Result<Self> {
        self.rotate_about_center("cube.rotate_z", radians, Vec3::rotate_z)
    }

    // Vec3 rotations pivot on the origin, so each vertex is moved into
    // center-relative coordinates, rotated, and moved back.
    fn rotate_about_center(
        &self,
        op: &'static str,
        radians: f64,
        rotate: fn(&Vec3, f64) -> Result<Vec3>,
    ) -> Result<Self> {
        if !radians.is_finite() {
            return Err(GeomError::invalid(op, "radians must be finite"));
        }
        let mut vertices = self.vertices;
        for vertex in &mut vertices {
            let relative = vertex.sub(&self.center)?;
            *vertex = self.center.add(&rotate(&relative, radians)?)?;
        }
        info!(op, radians, "rotated cube about {}", self.center);
        Ok(Self {
            center: self.center,
            side: self.side,
            vertices,
        })
    }

    /// Component-wise min/max over the eight vertices.
    pub fn axis_aligned_bounds(&self) -> Aabb {
        let [first, rest @ ..] = &self.vertices;
        let bounds = Aabb::enclosing(*first, rest);
        info!(op = "cube.axis_aligned_bounds", "bounds of {self}: {bounds}");
        bounds
    }
}

// Each coordinate is weighted before summing, so the mean of finite vertices
// stays finite even near `f64::MAX`.
fn centroid(op: &'static str, vertices: &[Vec3; CUBE_VERTEX_COUNT]) -> Result<Vec3> {
    #[allow(clippy::cast_precision_loss)]
    let weight = 1.0 / CUBE_VERTEX_COUNT as f64;
    let mut mean = [0.0_f64; 3];
    for v in vertices {
        for (acc, c) in mean.iter_mut().zip(v.to_array()) {
            *acc += c * weight;
        }
    }
    Vec3::from_result_components(op, mean)
}

// Side is positive and finite, and vertices are `Eq`.
impl Eq for Cube {}

impl Hash for Cube {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.center.hash(state);
        self.side.to_bits().hash(state);
        self.vertices.hash(state);
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cube[center={} side={:.6}]", self.center, self.side)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Cube {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use crate::constants::CUBE_CONSISTENCY_TOLERANCE;
        use serde::de::Error as _;

        #[derive(serde::Deserialize)]
        struct Raw {
            center: Vec3,
            side: f64,
            vertices: [Vec3; CUBE_VERTEX_COUNT],
        }
        let raw = Raw::deserialize(deserializer)?;
        if !raw.side.is_finite() || raw.side <= 0.0 {
            return Err(D::Error::custom("cube side must be positive and finite"));
        }
        let inferred = Self::from_vertices(&raw.vertices).map_err(D::Error::custom)?;
        // Stored center and side are kept as-is but must agree with the vertices.
        let tol = CUBE_CONSISTENCY_TOLERANCE * (raw.side + raw.center.magnitude());
        if inferred.center.distance_to(&raw.center) > tol {
            return Err(D::Error::custom("cube center does not match its vertices"));
        }
        if (inferred.side - raw.side).abs() > tol {
            return Err(D::Error::custom("cube side does not match its vertices"));
        }
        Ok(Self {
            center: raw.center,
            side: raw.side,
            vertices: raw.vertices,
        })
    }
}
