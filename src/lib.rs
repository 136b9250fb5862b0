// ============================================================================
// spark-array-state - Array State Operations for UI Rendering Layers
// ============================================================================
//
// Identity-stable add/set/remove/insert/splice handles over a host-owned
// collection, plus per-element bindings for list rendering.
//
//   StateMirror   - always-current register read by operations at call time
//   OperationSet  - pure immutable updates published through one channel
//   ElementBinder - position-scoped handles, memoized per child
//   ArrayMap      - the list rendering adapter tying it together
// ============================================================================

#[macro_use]
mod macros;

pub mod binding;
pub mod core;
pub mod operations;
pub mod render;

// Re-export core items at crate root for ergonomic access
pub use crate::core::error::ContractViolation;
pub use crate::core::mirror::StateMirror;
pub use crate::core::types::{Collection, ReplaceChannel};

pub use operations::options::{ArrayStateOptions, InsertPolicy};
pub use operations::set::{ArrayState, OperationSet, SpliceArgs};

pub use binding::element::{ElementBinder, ElementBinding};
pub use binding::keys::{FieldKey, KeyDerivation, RenderKey};

pub use render::array_map::{ArrayMap, Rendered};
pub use render::host::Host;

// =============================================================================
// TESTS
// =============================================================================
