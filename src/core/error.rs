// ============================================================================
// spark-array-state - Contract Violations
// Programmer errors surfaced by key derivation and the render adapter
// ============================================================================

use thiserror::Error;

/// A broken host contract.
///
/// These are never produced by the array operations themselves (those are
/// total and degrade to no-ops). They come from key derivation, where a
/// silently wrong key would corrupt the rendering layer's reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// An explicit key list whose length differs from the collection
    #[error("explicit key list has {keys} keys but the collection has {elements} elements")]
    KeyCountMismatch { keys: usize, elements: usize },

    /// An element that lacks the configured key field
    #[error("element at index {index} has no key field `{field}`")]
    MissingKeyField { field: String, index: usize },
}
