// ============================================================================
// spark-array-state - Host
// A minimal single-threaded render/commit host for array states
// ============================================================================
//
// Owns the collection and one identity-stable replace channel. Operations
// publish into a pending cell; `commit` adopts the pending value as the new
// collection reference, the next `render` observes it. Within one pass the
// last published value wins.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::binding::element::ElementBinding;
use crate::binding::keys::KeyDerivation;
use crate::core::error::ContractViolation;
use crate::core::types::{Collection, ReplaceChannel};
use crate::operations::set::{ArrayState, OperationSet};

use super::array_map::{ArrayMap, Rendered};

/// Drives array states the way a UI runtime would.
///
/// # Example
///
/// ```
/// use spark_array_state::{ArrayMap, Host, KeyDerivation};
///
/// let host = Host::new(vec!["a", "b", "c"]);
/// let list = ArrayMap::new();
///
/// let bindings = host
///     .render(&list, KeyDerivation::index(), |_, binding, _, _| binding.clone())
///     .unwrap();
///
/// bindings[1].view.insert_before("x");
/// assert!(host.commit());
/// assert_eq!(*host.collection(), vec!["a", "x", "b", "c"]);
/// ```
pub struct Host<T> {
    collection: RefCell<Collection<T>>,
    pending: Rc<RefCell<Option<Vec<T>>>>,
    replace: ReplaceChannel<T>,
}

impl<T: Clone + 'static> Host<T> {
    pub fn new(initial: Vec<T>) -> Self {
        let pending: Rc<RefCell<Option<Vec<T>>>> = Rc::new(RefCell::new(None));
        let sink = pending.clone();
        Self {
            collection: RefCell::new(Rc::new(initial)),
            pending,
            replace: ReplaceChannel::new(move |next| *sink.borrow_mut() = Some(next)),
        }
    }

    /// The current committed collection.
    pub fn collection(&self) -> Collection<T> {
        self.collection.borrow().clone()
    }

    /// The host's replace channel. Its identity never changes.
    pub fn replace_channel(&self) -> &ReplaceChannel<T> {
        &self.replace
    }

    /// True if an operation published a value that has not been committed.
    pub fn has_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Adopt the pending value as the new collection reference.
    ///
    /// Returns false if nothing was published since the last commit.
    pub fn commit(&self) -> bool {
        let Some(next) = self.pending.borrow_mut().take() else {
            return false;
        };

        tracing::trace!(len = next.len(), "host committed collection");
        *self.collection.borrow_mut() = Rc::new(next);
        true
    }

    /// Sync a bare array state with the current collection.
    pub fn operations(&self, state: &ArrayState<T>) -> OperationSet<T> {
        state.sync(self.collection(), &self.replace)
    }

    /// Run one ArrayMap pass over the current collection.
    pub fn render<V>(
        &self,
        map: &ArrayMap<T>,
        keys: KeyDerivation<'_, T>,
        f: impl FnMut(&T, &Rc<ElementBinding<T>>, usize, &OperationSet<T>) -> V,
    ) -> Result<Vec<Rendered<V>>, ContractViolation> {
        map.render(&self.collection(), &self.replace, keys, f)
    }

    /// Commit pending changes, then render. One full render/commit cycle.
    pub fn update<V>(
        &self,
        map: &ArrayMap<T>,
        keys: KeyDerivation<'_, T>,
        f: impl FnMut(&T, &Rc<ElementBinding<T>>, usize, &OperationSet<T>) -> V,
    ) -> Result<Vec<Rendered<V>>, ContractViolation> {
        self.commit();
        self.render(map, keys, f)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Host<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("collection", &self.collection.borrow())
            .field("pending", &self.pending.borrow())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
