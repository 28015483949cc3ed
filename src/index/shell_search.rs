//! Pair-distance shell search over a k-d tree.
//!
//! Enumerates index pairs whose distance falls inside a spherical shell
//! `radius ± epsilon`. This is the spatial pruning step behind pair
//! extraction: instead of testing all O(n²) pairs, each point queries the
//! tree for neighbors near the target edge length.

use kiddo::{KdTree, SquaredEuclidean};

use crate::core::Point3D;

/// Visit every pair `(i, j)` with `i > j` whose distance lies within
/// `radius ± epsilon`, up to `max_candidates` in-band candidates per
/// query point.
///
/// `points` and the distances are expected in the same (normalized) space
/// the tree was built from. Exact tolerance checks against original
/// coordinates are the caller's responsibility; this search is a
/// pre-filter.
///
/// The candidate cap is a deliberate completeness/performance trade-off:
/// in very dense regions it silently drops valid pairs rather than
/// degrading to quadratic behavior.
pub fn for_each_shell_pair<F>(
    tree: &KdTree<f32, 3>,
    points: &[Point3D],
    radius: f32,
    epsilon: f32,
    max_candidates: usize,
    mut visit: F,
) where
    F: FnMut(usize, usize),
{
    let outer = radius + epsilon;
    let outer_sq = outer * outer;
    let inner = (radius - epsilon).max(0.0);
    let inner_sq = inner * inner;

    for (i, point) in points.iter().enumerate() {
        let neighbors = tree.within_unsorted::<SquaredEuclidean>(&point.to_array(), outer_sq);

        let mut considered = 0usize;
        for neighbor in &neighbors {
            let j = neighbor.item as usize;
            // Each unordered pair is visited exactly once, from the
            // higher index. This also skips the query point itself.
            if j >= i {
                continue;
            }
            if neighbor.distance < inner_sq {
                continue;
            }
            if considered == max_candidates {
                break;
            }
            considered += 1;
            visit(i, j);
        }
    }
}

/// Build a k-d tree over a slice of points, with slice indices as items.
pub fn build_tree(points: &[Point3D]) -> KdTree<f32, 3> {
    let mut tree: KdTree<f32, 3> = KdTree::with_capacity(points.len());
    for (i, point) in points.iter().enumerate() {
        tree.add(&point.to_array(), i as u64);
    }
    tree
}
