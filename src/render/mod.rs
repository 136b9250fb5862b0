// ============================================================================
// spark-array-state - Render Module
// The list rendering adapter and a minimal host to drive it
// ============================================================================

pub mod array_map;
pub mod host;

pub use array_map::{ArrayMap, Rendered};
pub use host::Host;
