//! Candidate pair extraction for one base edge.
//!
//! For a base edge of length `d`, finds all index pairs in the target
//! cloud whose distance lies within `d ± epsilon` and whose normals are
//! compatible with the edge's normal relationship. The shell search over
//! the normalized k-d tree does the spatial pruning; every candidate it
//! reports is re-verified here against original coordinates before the
//! pair filter decides which orientations to emit.

use super::config::MatchConfig;
use super::engine::TargetContext;
use crate::core::math::{color_distance_squared, half_angle_threshold};
use crate::core::{OrientedPoint, PointCloud3D, PointPair};
use crate::error::{MatchError, Result};
use crate::index::for_each_shell_pair;

/// Per-call parameters for pair extraction.
///
/// Passing these by value per call (rather than staging them in shared
/// mutable fields) means interleaved extractions can never observe each
/// other's configuration.
#[derive(Debug, Clone, Copy)]
pub struct PairParams {
    /// Target edge length to match, in original coordinates. Must be > 0.
    pub pair_distance: f32,
    /// Target chord distance between the pair's normals
    /// (`||n_a - n_b||` of the base edge). Only consulted when normal
    /// filtering is enabled.
    pub pair_normals_angle: f32,
    /// Absolute distance tolerance, in original coordinates. Must be > 0.
    pub pair_distance_epsilon: f32,
    /// Index of the first base point of this edge, into the base cloud.
    pub base_index1: usize,
    /// Index of the second base point of this edge, into the base cloud.
    pub base_index2: usize,
}

/// Orientation-aware filter applied to each in-band candidate pair.
struct PairFilter<'a> {
    config: &'a MatchConfig,
    base1: &'a OrientedPoint,
    base2: &'a OrientedPoint,
    norm_threshold: f32,
}

impl<'a> PairFilter<'a> {
    fn new(config: &'a MatchConfig, base1: &'a OrientedPoint, base2: &'a OrientedPoint) -> Self {
        Self {
            config,
            base1,
            base2,
            norm_threshold: half_angle_threshold(config.max_normal_difference),
        }
    }

    fn color_compatible(&self, point: &OrientedPoint, base: &OrientedPoint) -> bool {
        match (point.color, base.color) {
            (Some(pc), Some(bc)) => {
                let max = self.config.max_color_distance;
                color_distance_squared(&pc, &bc) <= max * max
            }
            // Missing colors cannot be filtered.
            _ => true,
        }
    }

    /// Decide which orientations of the candidate pair survive.
    ///
    /// `q` is the higher-indexed point: the forward orientation maps `q`
    /// to the edge's first base point and `p` to its second; the reverse
    /// orientation swaps the roles.
    fn test(&self, p: &OrientedPoint, q: &OrientedPoint, pair_normals_angle: f32) -> (bool, bool) {
        if self.config.filters_normals() {
            // Chord distance between unit normals, taken in whichever
            // sign convention lands closer to the requested value.
            let diff = (q.normal - p.normal).norm();
            let sum = (q.normal + p.normal).norm();
            let deviation = (diff - pair_normals_angle)
                .abs()
                .min((sum - pair_normals_angle).abs());
            if deviation > self.norm_threshold {
                return (false, false);
            }
        }

        if self.config.filters_colors() {
            let forward = self.color_compatible(q, self.base1) && self.color_compatible(p, self.base2);
            let reverse = self.color_compatible(p, self.base1) && self.color_compatible(q, self.base2);
            (forward, reverse)
        } else {
            (true, true)
        }
    }
}

/// Extract candidate pairs matching one base edge into `out`.
pub(crate) fn extract_pairs_into(
    config: &MatchConfig,
    context: &TargetContext,
    target: &PointCloud3D,
    base_cloud: &PointCloud3D,
    params: &PairParams,
    out: &mut Vec<PointPair>,
) -> Result<()> {
    if params.pair_distance <= 0.0 {
        return Err(MatchError::InvalidParameter(format!(
            "pair_distance must be positive, got {}",
            params.pair_distance
        )));
    }
    if params.pair_distance_epsilon <= 0.0 {
        return Err(MatchError::InvalidParameter(format!(
            "pair_distance_epsilon must be positive, got {}",
            params.pair_distance_epsilon
        )));
    }
    for index in [params.base_index1, params.base_index2] {
        if index >= base_cloud.len() {
            return Err(MatchError::BaseIndexOutOfBounds {
                index,
                len: base_cloud.len(),
            });
        }
    }

    out.clear();
    // Heuristic upper bound: dense sets produce many matches per scale.
    out.reserve(2 * target.len());

    let base1 = &base_cloud.points[params.base_index1];
    let base2 = &base_cloud.points[params.base_index2];
    let filter = PairFilter::new(config, base1, base2);

    let radius = context.normalized_length(params.pair_distance);
    let epsilon = context.normalized_epsilon(params.pair_distance_epsilon);

    log::trace!(
        "extracting pairs for base edge {}-{}: distance {:.5} (normalized radius {:.5}, eps {:.5})",
        params.base_index1,
        params.base_index2,
        params.pair_distance,
        radius,
        epsilon
    );

    for_each_shell_pair(
        context.tree(),
        context.normalized(),
        radius,
        epsilon,
        config.max_pair_candidates,
        |i, j| {
            let p = &target.points[j];
            let q = &target.points[i];

            // The shell search works on the rounded snapshot; the real
            // tolerance test happens on original coordinates.
            let distance = q.position.distance(&p.position);
            if (distance - params.pair_distance).abs() > params.pair_distance_epsilon {
                return;
            }

            let (forward, reverse) = filter.test(p, q, params.pair_normals_angle);
            if forward {
                out.push(PointPair::new(i, j));
            }
            if reverse {
                out.push(PointPair::new(j, i));
            }
        },
    );

    log::debug!(
        "base edge {}-{}: {} candidate pairs",
        params.base_index1,
        params.base_index2,
        out.len()
    );
    Ok(())
}
