// ============================================================================
// spark-array-state - Options
// Configuration for ArrayState / ArrayMap
// ============================================================================

/// What `insert` does with an index past the end of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPolicy {
    /// Clamp to the collection length (append)
    #[default]
    Clamp,
    /// Leave the collection unchanged
    Ignore,
}

/// Options for creating an array state.
///
/// # Example
///
/// ```
/// use spark_array_state::{ArrayState, ArrayStateOptions, InsertPolicy};
///
/// let state: ArrayState<i32> = ArrayState::with_options(ArrayStateOptions {
///     insert_policy: InsertPolicy::Ignore,
/// });
/// assert_eq!(state.options().insert_policy, InsertPolicy::Ignore);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArrayStateOptions {
    pub insert_policy: InsertPolicy,
}
