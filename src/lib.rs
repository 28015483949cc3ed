//! ChaturMatch - Congruent-set matching core for 4-point 3D registration
//!
//! Given a base of four points drawn from a source cloud P, finds all
//! combinations of points in a target cloud Q forming a quadrilateral
//! approximately congruent to the base, under distance and normal-angle
//! tolerances. This is the inner loop of a 4-point congruent set
//! registration pipeline; the outer base-sampling/RANSAC loop, transform
//! estimation, and point-cloud I/O live with the caller.
//!
//! # Architecture
//!
//! The crate is organized into 3 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   matching/                         │  ← Pipeline
//! │     (engine, pair extraction, quad search)          │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                    index/                           │  ← Spatial pruning
//! │        (shell search, position+normal set)          │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │                 (types, math)                       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! The engine borrows both clouds read-only; the caller owns them and
//! guarantees they outlive the engine. One engine instance per thread;
//! independent instances may share the same cloud buffers concurrently.
//!
//! ```rust,ignore
//! use chatur_match::{MatchConfig, MatchingEngine, PairParams, QuadParams};
//!
//! let mut engine = MatchingEngine::new(&target, &base_cloud, MatchConfig::default());
//! engine.initialize();
//!
//! // Once per candidate base: extract a pair family per base edge, then
//! // combine the families into verified congruent quadrilaterals.
//! engine.extract_pairs(&edge1_params, &mut first)?;
//! engine.extract_pairs(&edge2_params, &mut second)?;
//! let found = engine.find_congruent_quads(&quad_params, &first, &second, &mut quads)?;
//! ```

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;

// ============================================================================
// Layer 2: Spatial indexing (depends on core)
// ============================================================================
pub mod index;

// ============================================================================
// Layer 3: Matching pipeline (depends on core, index)
// ============================================================================
pub mod matching;

pub mod error;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

pub use crate::core::math;
pub use crate::core::types::{Base, CongruentQuad, OrientedPoint, Point3D, PointCloud3D, PointPair};

pub use error::{MatchError, Result};

pub use index::IndexedPositionNormalSet;

pub use matching::{MatchConfig, MatchingEngine, PairParams, QuadParams};
