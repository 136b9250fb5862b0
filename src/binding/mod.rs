// ============================================================================
// spark-array-state - Binding Module
// Per-element operation handles and render key derivation
// ============================================================================

pub mod element;
pub mod keys;

pub use element::{ElementBinder, ElementBinding};
pub use keys::{FieldKey, KeyDerivation, RenderKey};
