//! Error types for congruent-set matching.

use thiserror::Error;

/// Matching error type.
///
/// Every variant is a local, recoverable condition: the outer sampling loop
/// decides whether to skip the base, retry, or abort the registration
/// attempt. Nothing here is fatal, and an empty result set is always a
/// valid outcome.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    /// Pair extraction or quadrilateral search was invoked before
    /// [`initialize()`](crate::matching::MatchingEngine::initialize).
    #[error("engine not initialized: call initialize() before extracting pairs or searching")]
    NotInitialized,

    /// A base edge has near-zero length, so its direction (and the base
    /// angle alpha) is undefined.
    #[error("degenerate base: edge {first}-{second} has near-zero length")]
    DegenerateBase { first: usize, second: usize },

    /// A per-call parameter is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A base point index does not address the base cloud.
    #[error("base index {index} out of bounds for base cloud of {len} points")]
    BaseIndexOutOfBounds { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, MatchError>;
