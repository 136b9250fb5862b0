// ============================================================================
// spark-array-state - Type Definitions
// Shared collection handle and the host's replace channel
// ============================================================================

use std::fmt;
use std::rc::Rc;

// =============================================================================
// COLLECTION
// =============================================================================

/// The host-owned ordered collection.
///
/// A "collection change" is a change of `Rc` pointer: the core never mutates
/// the vector behind it, it always publishes a freshly built `Vec<T>`.
pub type Collection<T> = Rc<Vec<T>>;

// =============================================================================
// REPLACE CHANNEL
// =============================================================================

/// The single output channel through which every operation publishes the
/// next collection value ("replace whole collection").
///
/// Identity is the identity of the shared closure. Clones share identity,
/// two channels built from separate closures never do.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use spark_array_state::ReplaceChannel;
///
/// let published = Rc::new(RefCell::new(Vec::new()));
/// let sink = published.clone();
/// let replace = ReplaceChannel::new(move |next: Vec<i32>| *sink.borrow_mut() = next);
///
/// replace.publish(vec![1, 2, 3]);
/// assert_eq!(*published.borrow(), vec![1, 2, 3]);
///
/// let same = replace.clone();
/// assert!(same.ptr_eq(&replace));
/// ```
pub struct ReplaceChannel<T> {
    inner: Rc<dyn Fn(Vec<T>)>,
}

impl<T> ReplaceChannel<T> {
    /// Wrap a host callback as a replace channel.
    pub fn new(f: impl Fn(Vec<T>) + 'static) -> Self {
        Self { inner: Rc::new(f) }
    }

    /// Hand the next collection value to the host.
    pub fn publish(&self, next: Vec<T>) {
        (self.inner)(next)
    }

    /// True if both handles share the same underlying callback.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for ReplaceChannel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for ReplaceChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplaceChannel")
            .field("ptr", &Rc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
