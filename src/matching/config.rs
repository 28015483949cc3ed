//! Matching configuration types.

use serde::{Deserialize, Serialize};

/// Configuration for the congruent-set matching engine.
///
/// These are the options fixed at engine construction. Per-base values
/// (pair distance, tolerances, diagonal invariants) are supplied with each
/// call instead, so interleaved extractions can never observe each other's
/// parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Maximum allowed normal-angle difference for candidate pairs,
    /// in degrees. Converted internally to a half-angle radian threshold.
    /// Zero or negative disables normal filtering entirely.
    #[serde(default = "default_max_normal_difference")]
    pub max_normal_difference: f32,

    /// Maximum allowed color distance between a candidate point and the
    /// base point it would correspond to. Negative disables color
    /// filtering. Only applied when both points carry a color.
    #[serde(default = "default_max_color_distance")]
    pub max_color_distance: f32,

    /// Maximum number of in-band candidates considered per query point
    /// during pair extraction.
    ///
    /// This is a soft completeness limiter, not an error condition: in
    /// very dense regions it drops valid pairs to keep extraction
    /// sub-quadratic. Raise it to trade speed for recall.
    #[serde(default = "default_max_pair_candidates")]
    pub max_pair_candidates: usize,

    /// Cosine slack of the quadrilateral index's direction pre-filter.
    ///
    /// Candidates whose pair direction deviates from the base angle by
    /// more than this (in cosine terms) are pruned before the exact
    /// distance check. Looser values cost query time, tighter values risk
    /// pruning true matches whose directions are noisy.
    #[serde(default = "default_direction_slack")]
    pub direction_slack: f32,
}

fn default_max_normal_difference() -> f32 {
    10.0 // degrees
}

fn default_max_color_distance() -> f32 {
    -1.0 // disabled
}

fn default_max_pair_candidates() -> usize {
    50
}

fn default_direction_slack() -> f32 {
    0.2
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_normal_difference: default_max_normal_difference(),
            max_color_distance: default_max_color_distance(),
            max_pair_candidates: default_max_pair_candidates(),
            direction_slack: default_direction_slack(),
        }
    }
}

impl MatchConfig {
    /// Configuration with normal and color filtering disabled.
    /// Pairs are matched on distance alone.
    pub fn distance_only() -> Self {
        Self {
            max_normal_difference: 0.0,
            max_color_distance: -1.0,
            ..Default::default()
        }
    }

    /// Check whether normal filtering is active.
    #[inline]
    pub fn filters_normals(&self) -> bool {
        self.max_normal_difference > 0.0
    }

    /// Check whether color filtering is active.
    #[inline]
    pub fn filters_colors(&self) -> bool {
        self.max_color_distance >= 0.0
    }
}
