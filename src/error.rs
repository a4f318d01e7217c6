//! Selection errors surfaced to callers of the response selector.

use thiserror::Error;

/// Failure modes of category selection.
///
/// Everything else the core does is total; panic, thought, and diagnostic picks
/// draw from fixed non-empty pools.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// The key names no configured pool, or a pool with no entries.
    #[error("invalid category: {0:?}")]
    InvalidCategory(String),
}
