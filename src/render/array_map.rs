// ============================================================================
// spark-array-state - ArrayMap
// Projects every element of an array state into a bound child view
// ============================================================================
//
// One render pass:
//   1. sync the array state (observe + memoized OperationSet)
//   2. resolve render keys (contract violations abort before any callback)
//   3. bind and render every element, ascending index order, exactly once
//   4. sweep bindings of children that were not rendered
// ============================================================================

use std::collections::HashSet;
use std::rc::Rc;

use crate::binding::element::{ElementBinder, ElementBinding};
use crate::binding::keys::{KeyDerivation, RenderKey};
use crate::core::error::ContractViolation;
use crate::core::types::{Collection, ReplaceChannel};
use crate::operations::options::ArrayStateOptions;
use crate::operations::set::{ArrayState, OperationSet};

/// One rendered child: its reconciliation key and the host's view value.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered<V> {
    pub key: RenderKey,
    pub view: V,
}

/// Rendering adapter for an array state.
///
/// Keep one `ArrayMap` per mounted list and call [`render`](ArrayMap::render)
/// on every pass.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use spark_array_state::{ArrayMap, KeyDerivation, ReplaceChannel};
///
/// let list = ArrayMap::new();
/// let replace = ReplaceChannel::new(|_next: Vec<&str>| {});
///
/// let views = list
///     .render(&Rc::new(vec!["a", "b"]), &replace, KeyDerivation::index(), |value, _binding, index, _ops| {
///         format!("{index}:{value}")
///     })
///     .unwrap();
///
/// let labels: Vec<_> = views.into_iter().map(|r| r.view).collect();
/// assert_eq!(labels, vec!["0:a", "1:b"]);
/// ```
pub struct ArrayMap<T> {
    state: ArrayState<T>,
    binder: ElementBinder<T>,
}

impl<T: Clone + 'static> ArrayMap<T> {
    pub fn new() -> Self {
        Self::with_options(ArrayStateOptions::default())
    }

    pub fn with_options(options: ArrayStateOptions) -> Self {
        Self {
            state: ArrayState::with_options(options),
            binder: ElementBinder::new(),
        }
    }

    /// Run one render pass over `collection`.
    ///
    /// `f` receives `(element, binding, index, shared operations)` and is
    /// called once per element in ascending index order.
    ///
    /// # Errors
    ///
    /// Returns the [`ContractViolation`] from key resolution. Nothing is
    /// rendered and no binding is touched in that case.
    pub fn render<V>(
        &self,
        collection: &Collection<T>,
        replace: &ReplaceChannel<T>,
        keys: KeyDerivation<'_, T>,
        mut f: impl FnMut(&T, &Rc<ElementBinding<T>>, usize, &OperationSet<T>) -> V,
    ) -> Result<Vec<Rendered<V>>, ContractViolation> {
        let operations = self.state.sync(collection.clone(), replace);
        let render_keys = keys.resolve(collection)?;
        warn_duplicates(&render_keys, keys.kind());

        self.binder.begin_pass();
        let rendered: Vec<Rendered<V>> = collection
            .iter()
            .zip(render_keys)
            .enumerate()
            .map(|(index, (element, key))| {
                let binding = self.binder.bind(&key, index, &operations);
                let view = f(element, &binding, index, &operations);
                Rendered { key, view }
            })
            .collect();

        let dropped = self.binder.sweep();
        tracing::trace!(
            len = collection.len(),
            keys = keys.kind(),
            dropped,
            "array map rendered"
        );
        Ok(rendered)
    }

    /// The underlying array state.
    pub fn state(&self) -> &ArrayState<T> {
        &self.state
    }

    pub fn binder(&self) -> &ElementBinder<T> {
        &self.binder
    }
}

impl<T: Clone + 'static> Default for ArrayMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Duplicates share one binder slot; the slot is rebuilt whenever the
// duplicates' indices differ.
fn warn_duplicates(keys: &[RenderKey], kind: &str) {
    let mut seen = HashSet::with_capacity(keys.len());
    for key in keys {
        if !seen.insert(key) {
            tracing::warn!(%key, strategy = kind, "duplicate render key");
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
