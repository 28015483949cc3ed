//! Shared test utilities for the matching pipeline.
//!
//! Contains helper functions for creating synthetic clouds and bases used
//! across multiple test suites.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{Base, OrientedPoint, Point3D, PointCloud3D};

/// Base cloud holding a unit square addressed by its diagonals.
///
/// The edges are the two diagonals of the square, so they cross at their
/// midpoints (invariants 0.5, 0.5) at a right angle (alpha = 0). Both
/// edges have length sqrt(2).
///
/// Returns the cloud, the base, and (invariant1, invariant2).
pub fn diagonal_square_base() -> (PointCloud3D, Base, (f32, f32)) {
    let n = Point3D::new(0.0, 0.0, 1.0);
    let mut cloud = PointCloud3D::with_capacity(4);
    cloud.push(OrientedPoint::new(Point3D::new(0.0, 0.0, 0.0), n));
    cloud.push(OrientedPoint::new(Point3D::new(1.0, 1.0, 0.0), n));
    cloud.push(OrientedPoint::new(Point3D::new(1.0, 0.0, 0.0), n));
    cloud.push(OrientedPoint::new(Point3D::new(0.0, 1.0, 0.0), n));
    (cloud, Base::new([0, 1, 2, 3]), (0.5, 0.5))
}

/// Uniform random cloud inside a cube of the given extent, with random
/// unit normals. Seeded for reproducible tests.
pub fn random_cloud(n: usize, extent: f32, seed: u64) -> PointCloud3D {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cloud = PointCloud3D::with_capacity(n);
    for _ in 0..n {
        let position = Point3D::new(
            rng.random_range(0.0..extent),
            rng.random_range(0.0..extent),
            rng.random_range(0.0..extent),
        );
        // Rejection-free random direction: sample until non-degenerate
        // (practically always the first draw).
        let normal = loop {
            let v = Point3D::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            );
            if let Some(unit) = v.normalized() {
                break unit;
            }
        };
        cloud.push(OrientedPoint::new(position, normal));
    }
    cloud
}

/// Append a rigidly transformed copy of the base points to `target`.
///
/// The copy is rotated by `angle` radians about the Z axis and then
/// translated. Returns the target indices of the four copies, in base
/// order.
pub fn embed_base_copy(
    target: &mut PointCloud3D,
    base_cloud: &PointCloud3D,
    base: &Base,
    angle: f32,
    translation: [f32; 3],
) -> [usize; 4] {
    let (sin_a, cos_a) = angle.sin_cos();
    let t = Point3D::new(translation[0], translation[1], translation[2]);
    let rotate = |p: &Point3D| {
        Point3D::new(
            p.x * cos_a - p.y * sin_a,
            p.x * sin_a + p.y * cos_a,
            p.z,
        )
    };

    let mut indices = [0usize; 4];
    for (slot, &base_index) in base.indices.iter().enumerate() {
        let point = &base_cloud.points[base_index];
        indices[slot] = target.len();
        target.push(OrientedPoint {
            position: rotate(&point.position) + t,
            normal: rotate(&point.normal),
            color: point.color,
        });
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_diagonal_square_base_geometry() {
        let (cloud, base, (inv1, inv2)) = diagonal_square_base();
        let (a, b) = base.edge1();
        let (c, d) = base.edge2();

        // Both diagonals cross at the square's center.
        let crossing1 = cloud.position(a).lerp(&cloud.position(b), inv1);
        let crossing2 = cloud.position(c).lerp(&cloud.position(d), inv2);
        assert_relative_eq!(crossing1.distance(&crossing2), 0.0, epsilon = 1e-6);

        // Diagonals are perpendicular.
        let dir1 = (cloud.position(b) - cloud.position(a)).normalized().unwrap();
        let dir2 = (cloud.position(d) - cloud.position(c)).normalized().unwrap();
        assert_relative_eq!(dir1.dot(&dir2), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_embed_preserves_distances() {
        let (base_cloud, base, _) = diagonal_square_base();
        let mut target = random_cloud(5, 2.0, 11);
        let indices = embed_base_copy(&mut target, &base_cloud, &base, 1.2, [4.0, -1.0, 2.0]);

        let original = base_cloud
            .position(base.indices[0])
            .distance(&base_cloud.position(base.indices[1]));
        let copied = target
            .position(indices[0])
            .distance(&target.position(indices[1]));
        assert_relative_eq!(original, copied, epsilon = 1e-5);
    }

    #[test]
    fn test_random_cloud_normals_are_unit() {
        let cloud = random_cloud(50, 1.0, 3);
        for point in &cloud.points {
            assert_relative_eq!(point.normal.norm(), 1.0, epsilon = 1e-5);
        }
    }
}
