//! Matching engine and its reusable target-cloud context.

use kiddo::KdTree;

use super::config::MatchConfig;
use super::pairs::{extract_pairs_into, PairParams};
use super::quads::{find_congruent_quads_into, QuadParams};
use crate::core::{CongruentQuad, Point3D, PointCloud3D, PointPair};
use crate::error::{MatchError, Result};
use crate::index::build_tree;

/// Smallest usable snapshot scale, for degenerate (single-point) clouds.
const MIN_SCALE: f32 = 1e-9;

/// Reusable working context over the target cloud.
///
/// Holds a snapshot of the target positions rescaled into the unit cube,
/// the rescale factor, and a k-d tree over the snapshot. Built once per
/// target cloud by [`MatchingEngine::initialize`] and shared by every
/// extraction and search call until the target changes.
pub struct TargetContext {
    normalized: Vec<Point3D>,
    scale: f32,
    tree: KdTree<f32, 3>,
}

impl std::fmt::Debug for TargetContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetContext")
            .field("points", &self.normalized.len())
            .field("scale", &self.scale)
            .finish()
    }
}

impl TargetContext {
    fn build(cloud: &PointCloud3D) -> Self {
        let mut min = Point3D::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3D::new(f32::MIN, f32::MIN, f32::MIN);
        for point in &cloud.points {
            let p = point.position;
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        let extent = max - min;
        let scale = extent.x.max(extent.y).max(extent.z).max(MIN_SCALE);
        let inv_scale = 1.0 / scale;

        let normalized: Vec<Point3D> = cloud
            .points
            .iter()
            .map(|point| (point.position - min) * inv_scale)
            .collect();

        let tree = build_tree(&normalized);

        Self {
            normalized,
            scale,
            tree,
        }
    }

    /// Target positions rescaled into the unit cube.
    #[inline]
    pub(crate) fn normalized(&self) -> &[Point3D] {
        &self.normalized
    }

    /// K-d tree over the normalized positions.
    #[inline]
    pub(crate) fn tree(&self) -> &KdTree<f32, 3> {
        &self.tree
    }

    /// Convert a length from original coordinates into snapshot units.
    #[inline]
    pub(crate) fn normalized_length(&self, len: f32) -> f32 {
        len / self.scale
    }

    /// A distance tolerance converted into the snapshot's unit scale.
    #[inline]
    pub(crate) fn normalized_epsilon(&self, epsilon: f32) -> f32 {
        self.normalized_length(epsilon)
    }
}

/// Congruent-set matching engine.
///
/// Borrows the target cloud Q and the base cloud P read-only; both are
/// owned by the caller and never mutated here. One engine instance serves
/// one thread; independent instances may run concurrently against the same
/// shared clouds.
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = MatchingEngine::new(&target, &base_cloud, MatchConfig::default());
/// engine.initialize();
///
/// let mut first = Vec::new();
/// let mut second = Vec::new();
/// engine.extract_pairs(&edge1_params, &mut first)?;
/// engine.extract_pairs(&edge2_params, &mut second)?;
///
/// let mut quads = Vec::new();
/// let found = engine.find_congruent_quads(&quad_params, &first, &second, &mut quads)?;
/// ```
#[derive(Debug)]
pub struct MatchingEngine<'a> {
    config: MatchConfig,
    target: &'a PointCloud3D,
    base_cloud: &'a PointCloud3D,
    context: Option<TargetContext>,
}

impl<'a> MatchingEngine<'a> {
    /// Create an engine bound to a target cloud Q and a base cloud P.
    pub fn new(
        target: &'a PointCloud3D,
        base_cloud: &'a PointCloud3D,
        config: MatchConfig,
    ) -> Self {
        Self {
            config,
            target,
            base_cloud,
            context: None,
        }
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Build the working context from the current target cloud.
    ///
    /// Must be called once before the first extraction or search. Calls
    /// for subsequent bases reuse the context; it only needs rebuilding
    /// when the target cloud contents change.
    pub fn initialize(&mut self) {
        let context = TargetContext::build(self.target);
        log::debug!(
            "target context initialized: {} points, scale {:.5}",
            context.normalized.len(),
            context.scale
        );
        self.context = Some(context);
    }

    /// Whether [`initialize`](Self::initialize) has been called.
    pub fn is_initialized(&self) -> bool {
        self.context.is_some()
    }

    fn context(&self) -> Result<&TargetContext> {
        self.context.as_ref().ok_or(MatchError::NotInitialized)
    }

    /// Extract candidate pairs in the target cloud matching one base edge.
    ///
    /// Clears `out`, then fills it with every pair whose distance lies
    /// within `pair_distance ± pair_distance_epsilon` and, when enabled,
    /// whose normals are compatible with the requested normal angle. Both
    /// orientations of a surviving pair may be emitted. Order follows the
    /// spatial index's iteration order and is not sorted.
    pub fn extract_pairs(&self, params: &PairParams, out: &mut Vec<PointPair>) -> Result<()> {
        let context = self.context()?;
        extract_pairs_into(
            &self.config,
            context,
            self.target,
            self.base_cloud,
            params,
            out,
        )
    }

    /// Find quadrilaterals in the target cloud congruent to the base.
    ///
    /// `first` and `second` must hold pairs extracted for the base's first
    /// and second edge against the current target cloud. Clears `out` and
    /// emits one quadrilateral per verified, deduplicated combination.
    /// Returns `Ok(true)` iff at least one quadrilateral was produced.
    pub fn find_congruent_quads(
        &self,
        params: &QuadParams,
        first: &[PointPair],
        second: &[PointPair],
        out: &mut Vec<CongruentQuad>,
    ) -> Result<bool> {
        let context = self.context()?;
        find_congruent_quads_into(
            &self.config,
            context,
            self.target,
            self.base_cloud,
            params,
            first,
            second,
            out,
        )
    }
}
