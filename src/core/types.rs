//! Point, cloud, and candidate types for congruent-set matching.

use serde::{Deserialize, Serialize};

use super::math::DEGENERATE_LENGTH;

/// A 3D point or direction vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    /// X coordinate in meters
    pub x: f32,
    /// Y coordinate in meters
    pub y: f32,
    /// Z coordinate in meters
    pub z: f32,
}

impl Point3D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(&self, other: &Point3D) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Squared length (avoids sqrt).
    #[inline]
    pub fn norm_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Euclidean length.
    #[inline]
    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Squared distance to another point (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &Point3D) -> f32 {
        (*self - *other).norm_squared()
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point3D) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Unit vector in this direction, or `None` for a near-zero vector.
    #[inline]
    pub fn normalized(&self) -> Option<Point3D> {
        let n = self.norm();
        if n < DEGENERATE_LENGTH {
            None
        } else {
            Some(Point3D::new(self.x / n, self.y / n, self.z / n))
        }
    }

    /// Affine combination `self + t * (other - self)`.
    #[inline]
    pub fn lerp(&self, other: &Point3D, t: f32) -> Point3D {
        *self + (*other - *self) * t
    }

    /// Coordinates as an array, for k-d tree queries.
    #[inline]
    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Default for Point3D {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}

impl std::ops::Add for Point3D {
    type Output = Point3D;
    #[inline]
    fn add(self, rhs: Point3D) -> Point3D {
        Point3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Point3D {
    type Output = Point3D;
    #[inline]
    fn sub(self, rhs: Point3D) -> Point3D {
        Point3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Point3D {
    type Output = Point3D;
    #[inline]
    fn mul(self, rhs: f32) -> Point3D {
        Point3D::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// A sampled surface point: position, unit normal, optional color.
///
/// Immutable once loaded; the matching core never mutates points and only
/// holds borrowed views of the owning cloud.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedPoint {
    /// Position in meters
    pub position: Point3D,
    /// Unit surface normal
    pub normal: Point3D,
    /// Optional RGB color, each channel in [0, 1]
    pub color: Option<[f32; 3]>,
}

impl OrientedPoint {
    /// Create a point with a normal and no color.
    #[inline]
    pub fn new(position: Point3D, normal: Point3D) -> Self {
        Self {
            position,
            normal,
            color: None,
        }
    }

    /// Attach a color.
    #[inline]
    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = Some(color);
        self
    }
}

/// An ordered 3D point cloud. Indices are stable identifiers used in all
/// pair and quadrilateral records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCloud3D {
    /// The points, in caller-defined order.
    pub points: Vec<OrientedPoint>,
}

impl PointCloud3D {
    /// Create an empty cloud.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create an empty cloud with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Append a point.
    #[inline]
    pub fn push(&mut self, point: OrientedPoint) {
        self.points.push(point);
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the cloud is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Position of the point at `index`.
    #[inline]
    pub fn position(&self, index: usize) -> Point3D {
        self.points[index].position
    }

    /// Chord distance between the normals of two points: `||n_i - n_j||`.
    ///
    /// This is the value the outer sampling loop passes as the target
    /// normal relationship of a base edge when extracting pairs.
    #[inline]
    pub fn normal_chord(&self, i: usize, j: usize) -> f32 {
        (self.points[i].normal - self.points[j].normal).norm()
    }
}

/// An ordered pair of distinct target-cloud indices.
///
/// A pair belongs to one family (first or second base edge). The same
/// index may appear in many pairs; orientation is significant because the
/// quadrilateral search matches pair directions against the base angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointPair {
    /// Index of the first point in the target cloud
    pub first: usize,
    /// Index of the second point in the target cloud
    pub second: usize,
}

impl PointPair {
    /// Create a new pair.
    #[inline]
    pub fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }
}

/// Four indices into the base cloud defining the shape to search for.
///
/// The two base edges are (0, 1) and (2, 3). The edges' diagonal crossing
/// fractions (invariant1, invariant2) are computed by the caller from the
/// base geometry and supplied per search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base {
    /// Indices into the base cloud
    pub indices: [usize; 4],
}

impl Base {
    /// Create a base from four indices.
    #[inline]
    pub fn new(indices: [usize; 4]) -> Self {
        Self { indices }
    }

    /// Indices of the first base edge (points 0 and 1).
    #[inline]
    pub fn edge1(&self) -> (usize, usize) {
        (self.indices[0], self.indices[1])
    }

    /// Indices of the second base edge (points 2 and 3).
    #[inline]
    pub fn edge2(&self) -> (usize, usize) {
        (self.indices[2], self.indices[3])
    }
}

/// A candidate congruent quadrilateral: four target-cloud indices.
///
/// Vertices 0 and 1 come from a first-family pair, vertices 2 and 3 from a
/// second-family pair. Created only by the quadrilateral search and never
/// mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CongruentQuad {
    /// Target-cloud indices (a, b, c, d)
    pub vertices: [usize; 4],
}

impl CongruentQuad {
    /// Create a quadrilateral from a first-family and a second-family pair.
    #[inline]
    pub fn from_pairs(first: PointPair, second: PointPair) -> Self {
        Self {
            vertices: [first.first, first.second, second.first, second.second],
        }
    }
}
