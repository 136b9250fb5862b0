// ============================================================================
// spark-array-state - State Mirror
// A single-cell, always-current register for the host's collection
// ============================================================================
//
// Operation handles are long-lived and identity-stable, so they cannot capture
// the collection they were created with. Instead they read the mirror at call
// time. The host writes the mirror (observe) during every render, before any
// later event can invoke a handle.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::types::Collection;

// =============================================================================
// MIRROR INNER
// =============================================================================

struct MirrorInner<T> {
    current: RefCell<Collection<T>>,

    /// Bumped every time a new collection reference is observed
    version: Cell<u64>,
}

// =============================================================================
// STATE MIRROR
// =============================================================================

/// Holds the most recently observed collection behind a stable reference.
///
/// Clones share the same cell, which is how operation handles see the value
/// the host observed most recently.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use spark_array_state::StateMirror;
///
/// let mirror = StateMirror::new(Rc::new(vec![1, 2]));
/// let reader = mirror.clone();
///
/// mirror.observe(Rc::new(vec![1, 2, 3]));
/// assert_eq!(*reader.current(), vec![1, 2, 3]);
/// assert_eq!(reader.version(), 1);
/// ```
pub struct StateMirror<T> {
    inner: Rc<MirrorInner<T>>,
}

impl<T> StateMirror<T> {
    /// Create a mirror holding an initial collection.
    pub fn new(initial: Collection<T>) -> Self {
        Self {
            inner: Rc::new(MirrorInner {
                current: RefCell::new(initial),
                version: Cell::new(0),
            }),
        }
    }

    /// Record the host's latest collection.
    ///
    /// Returns true if the reference changed. Observing the same `Rc` again
    /// leaves the mirror (and its version) untouched.
    pub fn observe(&self, collection: Collection<T>) -> bool {
        if Rc::ptr_eq(&*self.inner.current.borrow(), &collection) {
            return false;
        }

        let version = self.inner.version.get() + 1;
        tracing::trace!(version, len = collection.len(), "state mirror observed collection");

        *self.inner.current.borrow_mut() = collection;
        self.inner.version.set(version);
        true
    }

    /// The latest observed collection.
    pub fn current(&self) -> Collection<T> {
        self.inner.current.borrow().clone()
    }

    /// Read the latest collection without cloning the handle.
    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        let current = self.inner.current.borrow();
        f(current.as_slice())
    }

    /// Number of distinct collection references observed since creation.
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    pub fn len(&self) -> usize {
        self.inner.current.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if both handles share the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Default for StateMirror<T> {
    fn default() -> Self {
        Self::new(Rc::new(Vec::new()))
    }
}

impl<T> Clone for StateMirror<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for StateMirror<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMirror")
            .field("current", &self.inner.current.borrow())
            .field("version", &self.inner.version.get())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_starts_with_initial_value() {
        let mirror = StateMirror::new(Rc::new(vec!["a", "b"]));
        assert_eq!(*mirror.current(), vec!["a", "b"]);
        assert_eq!(mirror.version(), 0);
        assert_eq!(mirror.len(), 2);
    }

    #[test]
    fn observe_replaces_current_value() {
        let mirror = StateMirror::new(Rc::new(vec![1]));
        assert!(mirror.observe(Rc::new(vec![1, 2])));
        assert_eq!(*mirror.current(), vec![1, 2]);
        assert_eq!(mirror.version(), 1);
    }

    #[test]
    fn observe_same_reference_is_noop() {
        let collection = Rc::new(vec![1, 2, 3]);
        let mirror = StateMirror::new(collection.clone());

        assert!(!mirror.observe(collection.clone()));
        assert_eq!(mirror.version(), 0);

        // Equal contents, different reference: still a change
        assert!(mirror.observe(Rc::new(vec![1, 2, 3])));
        assert_eq!(mirror.version(), 1);
    }

    #[test]
    fn clones_read_latest_value() {
        let mirror = StateMirror::new(Rc::new(vec![0]));
        let captured = mirror.clone();

        mirror.observe(Rc::new(vec![5, 6, 7]));
        mirror.observe(Rc::new(vec![8]));

        assert!(captured.ptr_eq(&mirror));
        assert_eq!(*captured.current(), vec![8]);
        assert_eq!(captured.with(|c| c.len()), 1);
    }

    #[test]
    fn default_mirror_is_empty() {
        let mirror: StateMirror<String> = StateMirror::default();
        assert!(mirror.is_empty());
    }

    #[test]
    fn debug_shows_value() {
        let mirror = StateMirror::new(Rc::new(vec![42]));
        let debug_str = format!("{:?}", mirror);
        assert!(debug_str.contains("StateMirror"));
        assert!(debug_str.contains("42"));
    }
}
