// ============================================================================
// spark-array-state - Pure Array Operations
// Immutable-update algorithms behind every OperationSet handle
// ============================================================================
//
// Every function takes the current collection by slice and returns a freshly
// built Vec. The input is never modified. Out-of-range indices are total:
// they produce an unchanged copy instead of panicking.
// ============================================================================

use super::options::InsertPolicy;

// =============================================================================
// ADD
// =============================================================================

/// Append `value` at the end.
///
/// # Example
///
/// ```
/// use spark_array_state::operations::pure;
///
/// assert_eq!(pure::add(&[1, 2], 3), vec![1, 2, 3]);
/// ```
pub fn add<T: Clone>(current: &[T], value: T) -> Vec<T> {
    let mut next = Vec::with_capacity(current.len() + 1);
    next.extend_from_slice(current);
    next.push(value);
    next
}

// =============================================================================
// SET
// =============================================================================

/// Replace the element at `index`. Out of range leaves the collection as is.
///
/// # Example
///
/// ```
/// use spark_array_state::operations::pure;
///
/// assert_eq!(pure::set(&["a", "b"], 1, "z"), vec!["a", "z"]);
/// assert_eq!(pure::set(&["a", "b"], 2, "z"), vec!["a", "b"]);
/// ```
pub fn set<T: Clone>(current: &[T], index: usize, value: T) -> Vec<T> {
    let mut next = current.to_vec();
    match next.get_mut(index) {
        Some(slot) => *slot = value,
        None => tracing::debug!(index, len = current.len(), "set out of range, ignored"),
    }
    next
}

// =============================================================================
// REMOVE
// =============================================================================

/// Drop the element at `index`, shifting later elements left.
/// Out of range leaves the collection as is.
pub fn remove<T: Clone>(current: &[T], index: usize) -> Vec<T> {
    if index >= current.len() {
        tracing::debug!(index, len = current.len(), "remove out of range, ignored");
        return current.to_vec();
    }

    let mut next = Vec::with_capacity(current.len() - 1);
    next.extend_from_slice(&current[..index]);
    next.extend_from_slice(&current[index + 1..]);
    next
}

// =============================================================================
// INSERT
// =============================================================================

/// Insert `value` so it becomes the element at `index`.
///
/// `index == len` appends. Past the end, `policy` decides: `Clamp` appends,
/// `Ignore` leaves the collection as is.
///
/// # Example
///
/// ```
/// use spark_array_state::operations::pure;
/// use spark_array_state::InsertPolicy;
///
/// assert_eq!(pure::insert(&[1, 3], 1, 2, InsertPolicy::Clamp), vec![1, 2, 3]);
/// assert_eq!(pure::insert(&[1], 9, 2, InsertPolicy::Clamp), vec![1, 2]);
/// assert_eq!(pure::insert(&[1], 9, 2, InsertPolicy::Ignore), vec![1]);
/// ```
pub fn insert<T: Clone>(current: &[T], index: usize, value: T, policy: InsertPolicy) -> Vec<T> {
    let len = current.len();
    let at = if index <= len {
        index
    } else {
        match policy {
            InsertPolicy::Clamp => {
                tracing::debug!(index, len, "insert past end, clamped to len");
                len
            }
            InsertPolicy::Ignore => {
                tracing::debug!(index, len, "insert past end, ignored");
                return current.to_vec();
            }
        }
    };

    let mut next = Vec::with_capacity(len + 1);
    next.extend_from_slice(&current[..at]);
    next.push(value);
    next.extend_from_slice(&current[at..]);
    next
}

// =============================================================================
// SPLICE
// =============================================================================

/// Remove `delete_count` elements starting at `start`, then insert
/// `replacement` at `start`.
///
/// `delete_count` past the tail is clamped to the tail. `start == len`
/// appends the replacement; `start > len` leaves the collection as is.
///
/// # Example
///
/// ```
/// use spark_array_state::operations::pure;
///
/// assert_eq!(pure::splice(&[1, 2, 3, 4], 1, 2, vec![9]), vec![1, 9, 4]);
/// assert_eq!(pure::splice(&[1, 2], 1, 0, vec![7, 8]), vec![1, 7, 8, 2]);
/// assert_eq!(pure::splice(&[1, 2], 1, 99, Vec::new()), vec![1]);
/// ```
pub fn splice<T: Clone>(
    current: &[T],
    start: usize,
    delete_count: usize,
    replacement: Vec<T>,
) -> Vec<T> {
    let len = current.len();
    if start > len {
        tracing::debug!(start, len, "splice start out of range, ignored");
        return current.to_vec();
    }

    let end = start.saturating_add(delete_count).min(len);
    let mut next = Vec::with_capacity(len - (end - start) + replacement.len());
    next.extend_from_slice(&current[..start]);
    next.extend(replacement);
    next.extend_from_slice(&current[end..]);
    next
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ABC: [&str; 3] = ["a", "b", "c"];

    #[test]
    fn add_appends() {
        assert_eq!(add(&ABC, "d"), vec!["a", "b", "c", "d"]);
        assert_eq!(add(&[] as &[i32], 1), vec![1]);
    }

    #[test]
    fn set_replaces_in_place() {
        assert_eq!(set(&ABC, 0, "x"), vec!["x", "b", "c"]);
        assert_eq!(set(&ABC, 2, "x"), vec!["a", "b", "x"]);
    }

    #[test]
    fn set_out_of_range_is_noop() {
        assert_eq!(set(&ABC, 3, "x"), ABC.to_vec());
        assert_eq!(set(&[] as &[i32], 0, 1), Vec::<i32>::new());
    }

    #[test]
    fn remove_shifts_left() {
        assert_eq!(remove(&ABC, 0), vec!["b", "c"]);
        assert_eq!(remove(&ABC, 1), vec!["a", "c"]);
        assert_eq!(remove(&ABC, 2), vec!["a", "b"]);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        assert_eq!(remove(&ABC, 3), ABC.to_vec());
        assert_eq!(remove(&ABC, usize::MAX), ABC.to_vec());
        assert_eq!(remove(&[] as &[i32], 0), Vec::<i32>::new());
    }

    #[test]
    fn insert_places_value_at_index() {
        assert_eq!(insert(&ABC, 0, "x", InsertPolicy::Clamp), vec!["x", "a", "b", "c"]);
        assert_eq!(insert(&ABC, 1, "x", InsertPolicy::Clamp), vec!["a", "x", "b", "c"]);
        assert_eq!(insert(&ABC, 3, "x", InsertPolicy::Clamp), vec!["a", "b", "c", "x"]);
    }

    #[test]
    fn insert_at_len_appends_under_both_policies() {
        assert_eq!(insert(&ABC, 3, "x", InsertPolicy::Ignore), vec!["a", "b", "c", "x"]);
        assert_eq!(insert(&[] as &[i32], 0, 1, InsertPolicy::Ignore), vec![1]);
    }

    #[test]
    fn insert_past_end_follows_policy() {
        assert_eq!(insert(&ABC, 10, "x", InsertPolicy::Clamp), vec!["a", "b", "c", "x"]);
        assert_eq!(insert(&ABC, 10, "x", InsertPolicy::Ignore), ABC.to_vec());
    }

    #[test]
    fn splice_defaults_are_pure_insertion() {
        // delete_count 0 with a replacement is an insertion, not a replace-by-one
        assert_eq!(splice(&ABC, 1, 0, vec!["x"]), vec!["a", "x", "b", "c"]);
        // Empty replacement with zero deletes changes nothing
        assert_eq!(splice(&ABC, 1, 0, Vec::new()), ABC.to_vec());
    }

    #[test]
    fn splice_deletes_then_inserts() {
        assert_eq!(splice(&ABC, 0, 2, vec!["x"]), vec!["x", "c"]);
        assert_eq!(splice(&ABC, 2, 1, vec!["x", "y"]), vec!["a", "b", "x", "y"]);
        assert_eq!(splice(&ABC, 0, 3, Vec::new()), Vec::<&str>::new());
    }

    #[test]
    fn splice_clamps_delete_count_to_tail() {
        assert_eq!(splice(&ABC, 1, 10, vec!["x"]), vec!["a", "x"]);
        assert_eq!(splice(&ABC, 1, usize::MAX, Vec::new()), vec!["a"]);
    }

    #[test]
    fn splice_start_bounds() {
        assert_eq!(splice(&ABC, 3, 1, vec!["x"]), vec!["a", "b", "c", "x"]);
        assert_eq!(splice(&ABC, 4, 1, vec!["x"]), ABC.to_vec());
    }

    #[test]
    fn input_is_never_modified() {
        let original = vec![1, 2, 3];
        let _ = add(&original, 4);
        let _ = set(&original, 0, 9);
        let _ = remove(&original, 1);
        let _ = insert(&original, 1, 5, InsertPolicy::Clamp);
        let _ = splice(&original, 0, 2, vec![7]);
        assert_eq!(original, vec![1, 2, 3]);
    }

    #[test]
    fn remove_after_add_restores_original() {
        let original = vec![1, 2, 3];
        let grown = add(&original, 4);
        assert_eq!(remove(&grown, original.len()), original);
    }
}
