// ============================================================================
// spark-array-state - Operations Module
// Pure array algorithms and the identity-stable OperationSet over them
// ============================================================================

pub mod options;
pub mod pure;
pub mod set;

pub use options::{ArrayStateOptions, InsertPolicy};
pub use set::{ArrayState, OperationSet, SpliceArgs};
