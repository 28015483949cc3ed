//! Congruent quadrilateral search.
//!
//! Consumes the two pair families extracted for a base's edges. The
//! first family is projected to "where the base's first diagonal would
//! cross this edge" and indexed by that position plus the edge direction;
//! the second family queries the index with its own crossing point and
//! direction, using the base angle as the direction target. Index hits
//! are re-verified against original coordinates before emission.

use std::collections::BTreeSet;

use super::config::MatchConfig;
use super::engine::TargetContext;
use crate::core::{Base, CongruentQuad, PointCloud3D, PointPair};
use crate::error::{MatchError, Result};
use crate::index::IndexedPositionNormalSet;

/// Per-call parameters for the quadrilateral search.
#[derive(Debug, Clone, Copy)]
pub struct QuadParams {
    /// The base to search for; its edges are (0,1) and (2,3). The base
    /// angle alpha is recomputed from the current edge vectors on every
    /// call, never cached across bases.
    pub base: Base,
    /// Fraction along the first base edge where the base's diagonals
    /// cross, conceptually in [0, 1].
    pub invariant1: f32,
    /// Fraction along the second base edge where the base's diagonals
    /// cross, conceptually in [0, 1].
    pub invariant2: f32,
    /// Squared distance threshold for accepting a candidate crossing
    /// point, in original coordinates. Must be non-negative.
    pub distance_threshold_sq: f32,
}

/// Search both pair families for verified congruent quadrilaterals.
///
/// Pairs must reference valid indices of the target cloud used to build
/// `context` (they are produced by pair extraction against it).
#[allow(clippy::too_many_arguments)]
pub(crate) fn find_congruent_quads_into(
    config: &MatchConfig,
    context: &TargetContext,
    target: &PointCloud3D,
    base_cloud: &PointCloud3D,
    params: &QuadParams,
    first: &[PointPair],
    second: &[PointPair],
    out: &mut Vec<CongruentQuad>,
) -> Result<bool> {
    out.clear();

    if params.distance_threshold_sq < 0.0 {
        return Err(MatchError::InvalidParameter(format!(
            "distance_threshold_sq must be non-negative, got {}",
            params.distance_threshold_sq
        )));
    }
    for index in params.base.indices {
        if index >= base_cloud.len() {
            return Err(MatchError::BaseIndexOutOfBounds {
                index,
                len: base_cloud.len(),
            });
        }
    }

    // Angle formed by the two base edges, kept as a raw cosine. All
    // direction comparisons below are cosine similarities against it.
    let (e1a, e1b) = params.base.edge1();
    let (e2a, e2b) = params.base.edge2();
    let dir1 = (base_cloud.position(e1b) - base_cloud.position(e1a))
        .normalized()
        .ok_or(MatchError::DegenerateBase {
            first: e1a,
            second: e1b,
        })?;
    let dir2 = (base_cloud.position(e2b) - base_cloud.position(e2a))
        .normalized()
        .ok_or(MatchError::DegenerateBase {
            first: e2a,
            second: e2b,
        })?;
    let alpha = dir1.dot(&dir2);

    let eps = context.normalized_epsilon(params.distance_threshold_sq);
    let normalized = context.normalized();

    // 1. Index construction from the first family.
    let mut nset = IndexedPositionNormalSet::new(eps, config.direction_slack);
    for (id, pair) in first.iter().enumerate() {
        let p1 = normalized[pair.first];
        let p2 = normalized[pair.second];
        // Duplicate points cannot carry a direction; skip them.
        let Some(dir) = (p2 - p1).normalized() else {
            continue;
        };
        nset.add(p1.lerp(&p2, params.invariant1), dir, id);
    }

    log::trace!(
        "quad index built: {} of {} first-family pairs, alpha {:.4}",
        nset.len(),
        first.len(),
        alpha
    );

    // 2. Query with the second family; verify against original
    // coordinates; deduplicate combinations in an ordered set.
    let mut combinations: BTreeSet<(usize, usize)> = BTreeSet::new();
    let mut neighbors: Vec<usize> = Vec::new();

    for (i, pair) in second.iter().enumerate() {
        let p1 = normalized[pair.first];
        let p2 = normalized[pair.second];
        let Some(query_dir) = (p2 - p1).normalized() else {
            continue;
        };
        let query = p1.lerp(&p2, params.invariant2);

        // Exact crossing point straight from the original coordinates,
        // independent of the snapshot's rounding.
        let query_exact = target
            .position(pair.first)
            .lerp(&target.position(pair.second), params.invariant2);

        neighbors.clear();
        nset.query_into(&query, &query_dir, alpha, &mut neighbors);

        for &id in &neighbors {
            let candidate = &first[id];
            let crossing = target
                .position(candidate.first)
                .lerp(&target.position(candidate.second), params.invariant1);

            // The index is a bucketed pre-filter; this check is the
            // final arbiter.
            if query_exact.distance_squared(&crossing) <= params.distance_threshold_sq {
                combinations.insert((id, i));
            }
        }
    }

    for &(id, i) in &combinations {
        out.push(CongruentQuad::from_pairs(first[id], second[i]));
    }

    log::debug!(
        "congruent search: {} quadrilaterals from {} x {} pairs",
        out.len(),
        first.len(),
        second.len()
    );

    Ok(!out.is_empty())
}
