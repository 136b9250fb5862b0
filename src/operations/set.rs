// ============================================================================
// spark-array-state - OperationSet / ArrayState
// Identity-stable array operations over a state mirror
// ============================================================================
//
// OperationSet is the five-operation handle (add, set, remove, insert,
// splice). Each call reads the mirror, computes the next collection with the
// pure algorithms and publishes it through the replace channel.
//
// ArrayState is the per-instance storage that keeps an OperationSet alive
// between renders. `sync` observes the collection and hands back the same
// OperationSet for as long as the replace channel keeps its identity.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::mirror::StateMirror;
use crate::core::types::{Collection, ReplaceChannel};

use super::options::{ArrayStateOptions, InsertPolicy};
use super::pure;

// =============================================================================
// SPLICE ARGS
// =============================================================================

/// Arguments for [`OperationSet::splice`] with explicit defaults:
/// `delete_count = 0`, `replacement = []`.
///
/// # Example
///
/// ```
/// use spark_array_state::SpliceArgs;
///
/// let args = SpliceArgs::at(2).with(vec!["x"]);
/// assert_eq!(args.delete_count, 0);
///
/// let args: SpliceArgs<&str> = SpliceArgs::at(1).delete(3);
/// assert!(args.replacement.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceArgs<T> {
    pub start: usize,
    pub delete_count: usize,
    pub replacement: Vec<T>,
}

impl<T> SpliceArgs<T> {
    /// Splice at `start`, deleting nothing and inserting nothing.
    pub fn at(start: usize) -> Self {
        Self {
            start,
            delete_count: 0,
            replacement: Vec::new(),
        }
    }

    /// Number of elements to delete from `start`.
    pub fn delete(mut self, count: usize) -> Self {
        self.delete_count = count;
        self
    }

    /// Values to insert at `start` after the deletion.
    pub fn with(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.replacement = values.into_iter().collect();
        self
    }
}

// =============================================================================
// OPERATION SET
// =============================================================================

struct OperationSetInner<T> {
    mirror: StateMirror<T>,
    replace: ReplaceChannel<T>,
    insert_policy: InsertPolicy,
}

/// The five array operations, bound to a mirror and a replace channel.
///
/// Cloning is cheap and preserves identity (`ptr_eq`). None of the
/// operations fail: out-of-range indices publish the unchanged collection.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use spark_array_state::{ArrayStateOptions, OperationSet, ReplaceChannel, StateMirror};
///
/// let mirror = StateMirror::new(Rc::new(vec!["a", "b"]));
/// let published = Rc::new(RefCell::new(Vec::new()));
/// let replace = ReplaceChannel::new({
///     let published = published.clone();
///     move |next| *published.borrow_mut() = next
/// });
///
/// let ops = OperationSet::new(mirror, replace, ArrayStateOptions::default());
/// ops.add("c");
/// assert_eq!(*published.borrow(), vec!["a", "b", "c"]);
/// ```
pub struct OperationSet<T> {
    inner: Rc<OperationSetInner<T>>,
}

impl<T: Clone + 'static> OperationSet<T> {
    pub fn new(
        mirror: StateMirror<T>,
        replace: ReplaceChannel<T>,
        options: ArrayStateOptions,
    ) -> Self {
        Self {
            inner: Rc::new(OperationSetInner {
                mirror,
                replace,
                insert_policy: options.insert_policy,
            }),
        }
    }

    /// Append `value` at the end.
    pub fn add(&self, value: T) {
        self.apply(|current| pure::add(current, value));
    }

    /// Replace the element at `index`.
    pub fn set(&self, index: usize, value: T) {
        self.apply(|current| pure::set(current, index, value));
    }

    /// Remove the element at `index`.
    pub fn remove(&self, index: usize) {
        self.apply(|current| pure::remove(current, index));
    }

    /// Insert `value` so it becomes the element at `index`.
    pub fn insert(&self, index: usize, value: T) {
        let policy = self.inner.insert_policy;
        self.apply(|current| pure::insert(current, index, value, policy));
    }

    /// Delete `args.delete_count` elements at `args.start`, then insert
    /// `args.replacement` there.
    pub fn splice(&self, args: SpliceArgs<T>) {
        let SpliceArgs {
            start,
            delete_count,
            replacement,
        } = args;
        self.apply(|current| pure::splice(current, start, delete_count, replacement));
    }

    /// The mirror this set reads from.
    pub fn mirror(&self) -> &StateMirror<T> {
        &self.inner.mirror
    }

    /// The channel this set publishes to.
    pub fn replace_channel(&self) -> &ReplaceChannel<T> {
        &self.inner.replace
    }

    /// True if both handles are the same operation set.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // Read at call time, never at creation time
    fn apply(&self, op: impl FnOnce(&[T]) -> Vec<T>) {
        let next = self.inner.mirror.with(op);
        self.inner.replace.publish(next);
    }
}

impl<T> Clone for OperationSet<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> PartialEq for OperationSet<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Eq for OperationSet<T> {}

impl<T> std::fmt::Debug for OperationSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationSet")
            .field("ptr", &Rc::as_ptr(&self.inner).cast::<()>())
            .field("insert_policy", &self.inner.insert_policy)
            .finish()
    }
}

// =============================================================================
// ARRAY STATE
// =============================================================================

/// Per-instance storage for one array state.
///
/// Call [`sync`](ArrayState::sync) on every render with the host's current
/// collection and replace channel. The returned [`OperationSet`] keeps its
/// identity across renders while the channel keeps its identity.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use spark_array_state::{ArrayState, ReplaceChannel};
///
/// let state = ArrayState::new();
/// let replace = ReplaceChannel::new(|_next: Vec<i32>| {});
///
/// let first = state.sync(Rc::new(vec![1]), &replace);
/// let second = state.sync(Rc::new(vec![1, 2]), &replace);
/// assert!(first.ptr_eq(&second));
/// ```
pub struct ArrayState<T> {
    mirror: StateMirror<T>,
    operations: RefCell<Option<OperationSet<T>>>,
    options: ArrayStateOptions,
}

impl<T: Clone + 'static> ArrayState<T> {
    pub fn new() -> Self {
        Self::with_options(ArrayStateOptions::default())
    }

    pub fn with_options(options: ArrayStateOptions) -> Self {
        Self {
            mirror: StateMirror::default(),
            operations: RefCell::new(None),
            options,
        }
    }

    /// Observe `collection` and return the operation set for `replace`.
    ///
    /// The operation set is rebuilt only when `replace` is a different
    /// channel from the one seen on the previous call.
    pub fn sync(&self, collection: Collection<T>, replace: &ReplaceChannel<T>) -> OperationSet<T> {
        self.mirror.observe(collection);

        let mut slot = self.operations.borrow_mut();
        if let Some(ops) = slot.as_ref() {
            if ops.replace_channel().ptr_eq(replace) {
                return ops.clone();
            }
        }

        tracing::trace!(rebuilt = slot.is_some(), "creating operation set");
        let ops = OperationSet::new(self.mirror.clone(), replace.clone(), self.options);
        *slot = Some(ops.clone());
        ops
    }

    pub fn mirror(&self) -> &StateMirror<T> {
        &self.mirror
    }

    pub fn options(&self) -> ArrayStateOptions {
        self.options
    }
}

impl<T: Clone + 'static> Default for ArrayState<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Replace channel that records what was published
    fn recording<T: 'static>() -> (ReplaceChannel<T>, Rc<RefCell<Vec<Vec<T>>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        (ReplaceChannel::new(move |next| sink.borrow_mut().push(next)), log)
    }

    fn ops_over<T: Clone + 'static>(
        initial: Vec<T>,
        options: ArrayStateOptions,
    ) -> (OperationSet<T>, Rc<RefCell<Vec<Vec<T>>>>) {
        let (replace, log) = recording();
        let mirror = StateMirror::new(Rc::new(initial));
        (OperationSet::new(mirror, replace, options), log)
    }

    #[test]
    fn each_operation_publishes_once() {
        let (ops, log) = ops_over(vec!["a", "b", "c"], ArrayStateOptions::default());

        ops.add("d");
        ops.set(0, "x");
        ops.remove(1);
        ops.insert(1, "y");
        ops.splice(SpliceArgs::at(2).delete(1).with(["p", "q"]));

        // Mirror never re-observed: every op computes from [a, b, c]
        assert_eq!(
            *log.borrow(),
            vec![
                vec!["a", "b", "c", "d"],
                vec!["x", "b", "c"],
                vec!["a", "c"],
                vec!["a", "y", "b", "c"],
                vec!["a", "b", "p", "q"],
            ]
        );
    }

    #[test]
    fn out_of_range_publishes_unchanged_collection() {
        let (ops, log) = ops_over(vec![1, 2], ArrayStateOptions::default());

        ops.set(2, 9);
        ops.remove(5);
        ops.splice(SpliceArgs::at(3).with([7]));

        assert_eq!(*log.borrow(), vec![vec![1, 2], vec![1, 2], vec![1, 2]]);
    }

    #[test]
    fn insert_policy_comes_from_options() {
        let (clamp, clamp_log) = ops_over(vec![1], ArrayStateOptions::default());
        clamp.insert(4, 2);
        assert_eq!(clamp_log.borrow()[0], vec![1, 2]);

        let (ignore, ignore_log) = ops_over(
            vec![1],
            ArrayStateOptions {
                insert_policy: InsertPolicy::Ignore,
            },
        );
        ignore.insert(4, 2);
        assert_eq!(ignore_log.borrow()[0], vec![1]);
    }

    #[test]
    fn operations_read_mirror_at_call_time() {
        let (replace, log) = recording();
        let mirror = StateMirror::new(Rc::new(vec![1]));
        let ops = OperationSet::new(mirror.clone(), replace, ArrayStateOptions::default());

        mirror.observe(Rc::new(vec![1, 2, 3]));
        ops.add(4);

        assert_eq!(log.borrow()[0], vec![1, 2, 3, 4]);
    }

    #[test]
    fn splice_args_defaults() {
        let args: SpliceArgs<i32> = SpliceArgs::at(3);
        assert_eq!(args.start, 3);
        assert_eq!(args.delete_count, 0);
        assert!(args.replacement.is_empty());
    }

    #[test]
    fn sync_keeps_identity_across_collection_changes() {
        let state = ArrayState::new();
        let (replace, _log) = recording::<i32>();

        let a = state.sync(Rc::new(vec![]), &replace);
        let b = state.sync(Rc::new(vec![1]), &replace);
        let c = state.sync(Rc::new(vec![1, 2]), &replace.clone());

        assert!(a.ptr_eq(&b));
        assert_eq!(b, c);
        assert_eq!(*state.mirror().current(), vec![1, 2]);
    }

    #[test]
    fn sync_rebuilds_on_new_channel() {
        let state = ArrayState::new();
        let (first_channel, first_log) = recording::<i32>();
        let (second_channel, second_log) = recording::<i32>();

        let a = state.sync(Rc::new(vec![1]), &first_channel);
        let b = state.sync(Rc::new(vec![1]), &second_channel);
        assert!(!a.ptr_eq(&b));

        // Old set still publishes to its own channel, through the shared mirror
        a.add(2);
        b.add(3);
        assert_eq!(first_log.borrow()[0], vec![1, 2]);
        assert_eq!(second_log.borrow()[0], vec![1, 3]);
    }

    #[test]
    fn debug_output() {
        let (ops, _log) = ops_over(vec![1], ArrayStateOptions::default());
        let debug_str = format!("{:?}", ops);
        assert!(debug_str.contains("OperationSet"));
        assert!(debug_str.contains("Clamp"));
    }
}
