// ============================================================================
// spark-array-state - Element Bindings
// Position-scoped operation handles, memoized per child instance
// ============================================================================
//
// An ElementBinding closes over one index and the shared OperationSet.
// The binder keeps one slot per rendered child (identified by its render
// key) and hands back the same Rc while the slot's (operation set, index)
// pair is unchanged, so consumers comparing handles by identity can skip
// work.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::operations::set::{OperationSet, SpliceArgs};

use super::keys::RenderKey;

// =============================================================================
// ELEMENT BINDING
// =============================================================================

/// Operations scoped to one element position.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use spark_array_state::{ArrayState, ElementBinding, ReplaceChannel};
///
/// let published = Rc::new(RefCell::new(Vec::new()));
/// let replace = ReplaceChannel::new({
///     let published = published.clone();
///     move |next| *published.borrow_mut() = next
/// });
///
/// let state = ArrayState::new();
/// let ops = state.sync(Rc::new(vec!["a", "b", "c"]), &replace);
///
/// ElementBinding::new(1, ops).insert_before("x");
/// assert_eq!(*published.borrow(), vec!["a", "x", "b", "c"]);
/// ```
pub struct ElementBinding<T> {
    index: usize,
    operations: OperationSet<T>,
}

impl<T: Clone + 'static> ElementBinding<T> {
    pub fn new(index: usize, operations: OperationSet<T>) -> Self {
        Self { index, operations }
    }

    /// Replace this element with `value`.
    pub fn set(&self, value: T) {
        self.operations.set(self.index, value);
    }

    /// Remove this element.
    pub fn remove(&self) {
        self.operations.remove(self.index);
    }

    /// Insert `value` in front of this element.
    pub fn insert_before(&self, value: T) {
        self.operations.insert(self.index, value);
    }

    /// Insert `value` right after this element.
    pub fn insert_after(&self, value: T) {
        self.operations.insert(self.index + 1, value);
    }

    /// Replace this one element with zero or more values.
    ///
    /// Deletes exactly one element, so the length changes by
    /// `values.len() - 1`. If the collection no longer has an element at
    /// this index, nothing is published.
    pub fn replace(&self, values: impl IntoIterator<Item = T>) {
        let len = self.operations.mirror().len();
        if self.index >= len {
            tracing::debug!(index = self.index, len, "replace out of range, ignored");
            return;
        }
        self.operations
            .splice(SpliceArgs::at(self.index).delete(1).with(values));
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The shared operation set this binding delegates to.
    pub fn operations(&self) -> &OperationSet<T> {
        &self.operations
    }
}

impl<T> std::fmt::Debug for ElementBinding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementBinding")
            .field("index", &self.index)
            .field("operations", &self.operations)
            .finish()
    }
}

// =============================================================================
// ELEMENT BINDER
// =============================================================================

struct BinderSlot<T> {
    binding: Rc<ElementBinding<T>>,

    /// Last pass that bound this slot
    pass: u64,
}

/// Derives and memoizes element bindings across render passes.
///
/// Call [`begin_pass`](ElementBinder::begin_pass), bind every rendered
/// element, then [`sweep`](ElementBinder::sweep) to drop slots whose child
/// was not rendered.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use spark_array_state::{ArrayState, ElementBinder, ReplaceChannel};
///
/// let state = ArrayState::new();
/// let replace = ReplaceChannel::new(|_next: Vec<i32>| {});
/// let ops = state.sync(Rc::new(vec![1, 2, 3]), &replace);
///
/// let binder = ElementBinder::new();
/// let first = binder.bind_at(2, &ops);
/// let again = binder.bind_at(2, &ops);
/// assert!(Rc::ptr_eq(&first, &again));
/// ```
pub struct ElementBinder<T> {
    slots: RefCell<HashMap<RenderKey, BinderSlot<T>>>,
    pass: Cell<u64>,
}

impl<T: Clone + 'static> ElementBinder<T> {
    pub fn new() -> Self {
        Self {
            slots: RefCell::new(HashMap::new()),
            pass: Cell::new(0),
        }
    }

    /// Binding for the child `key`, currently at `index`.
    ///
    /// Returns the previous binding for `key` when it was produced for the
    /// same operation set and index; otherwise builds a new one.
    pub fn bind(
        &self,
        key: &RenderKey,
        index: usize,
        operations: &OperationSet<T>,
    ) -> Rc<ElementBinding<T>> {
        let pass = self.pass.get();
        let mut slots = self.slots.borrow_mut();

        if let Some(slot) = slots.get_mut(key) {
            slot.pass = pass;
            if slot.binding.index == index && slot.binding.operations.ptr_eq(operations) {
                return slot.binding.clone();
            }
            tracing::trace!(%key, from = slot.binding.index, to = index, "rebinding element");
            slot.binding = Rc::new(ElementBinding::new(index, operations.clone()));
            return slot.binding.clone();
        }

        let binding = Rc::new(ElementBinding::new(index, operations.clone()));
        slots.insert(
            key.clone(),
            BinderSlot {
                binding: binding.clone(),
                pass,
            },
        );
        binding
    }

    /// Binding for `index`, keyed by position.
    pub fn bind_at(&self, index: usize, operations: &OperationSet<T>) -> Rc<ElementBinding<T>> {
        self.bind(&RenderKey::index(index), index, operations)
    }

    /// Start a render pass.
    pub fn begin_pass(&self) {
        self.pass.set(self.pass.get() + 1);
    }

    /// Drop every slot not bound since the last `begin_pass`.
    ///
    /// Returns the number of slots dropped.
    pub fn sweep(&self) -> usize {
        let pass = self.pass.get();
        let mut slots = self.slots.borrow_mut();
        let before = slots.len();
        slots.retain(|_, slot| slot.pass == pass);
        before - slots.len()
    }

    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + 'static> Default for ElementBinder<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
