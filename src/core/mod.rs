// ============================================================================
// spark-array-state - Core Module
// The state mirror, the host-facing types and contract violations
// ============================================================================

pub mod error;
pub mod mirror;
pub mod types;

// Re-export commonly used items
pub use error::ContractViolation;
pub use mirror::StateMirror;
pub use types::{Collection, ReplaceChannel};
