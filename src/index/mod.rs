//! Spatial indexing collaborators used by the matching pipeline.
//!
//! Both indexes are pre-filters: they bound the candidate set cheaply and
//! leave exact tolerance verification to the matching layer.

pub mod normal_set;
pub mod shell_search;

pub use normal_set::IndexedPositionNormalSet;
pub use shell_search::{build_tree, for_each_shell_pair};
