//! Congruent-set matching pipeline.
//!
//! Finds all 4-point combinations in a target cloud Q that are
//! approximately congruent to a 4-point base drawn from a source cloud P.
//! This is the computational bottleneck of the enclosing registration
//! pipeline, so every stage prunes through spatial indexing rather than
//! enumerating the O(n²) pair space.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                 CONGRUENT-SET MATCHING PIPELINE                   │
//! │                                                                   │
//! │  Base edges (P) + target cloud (Q)                                │
//! │       │                                                           │
//! │       ▼                                                           │
//! │  ┌───────────────┐   ┌────────────────┐   ┌───────────────────┐  │
//! │  │ extract_pairs │──▶│ extract_pairs  │──▶│ find_congruent_   │  │
//! │  │ (edge 0-1)    │   │ (edge 2-3)     │   │ quads             │  │
//! │  └───────────────┘   └────────────────┘   └───────────────────┘  │
//! │         shell search        shell search      position+normal     │
//! │         over k-d tree       over k-d tree     index + exact check │
//! │                                                     │             │
//! │                                                     ▼             │
//! │                                            Vec<CongruentQuad>     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows strictly downstream: pairs → index → verified
//! quadrilaterals. The only cross-call state is the engine's target
//! context (normalized snapshot + k-d tree), built by
//! [`MatchingEngine::initialize`] and reused across bases while the
//! target cloud is unchanged.
//!
//! ## Example
//!
//! ```rust,ignore
//! use chatur_match::matching::{MatchConfig, MatchingEngine, PairParams, QuadParams};
//!
//! let mut engine = MatchingEngine::new(&target, &base_cloud, MatchConfig::default());
//! engine.initialize();
//!
//! let mut first = Vec::new();
//! engine.extract_pairs(&PairParams {
//!     pair_distance: edge1_length,
//!     pair_normals_angle: base_cloud.normal_chord(b0, b1),
//!     pair_distance_epsilon: 0.01,
//!     base_index1: b0,
//!     base_index2: b1,
//! }, &mut first)?;
//! // ... second edge, then:
//! let mut quads = Vec::new();
//! let found = engine.find_congruent_quads(&params, &first, &second, &mut quads)?;
//! ```

mod config;
mod engine;
mod pairs;
mod quads;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::MatchConfig;
pub use engine::{MatchingEngine, TargetContext};
pub use pairs::PairParams;
pub use quads::QuadParams;
