// ============================================================================
// spark-array-state - Key Derivation
// Stable render keys from explicit lists, named fields or positions
// ============================================================================
//
// Priority is fixed: explicit key list > named field > positional index.
// Positional keys do not follow elements: after removing element 0 every
// remaining child keeps its key but is handed its right neighbour's element,
// so the rendering layer re-renders everything after the removed position.
// That is the cost of rendering without keys, not a defect.
// ============================================================================

use std::fmt;

use crate::core::error::ContractViolation;

// =============================================================================
// RENDER KEY
// =============================================================================

/// Identifies an element for the rendering layer's reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderKey {
    Number(i64),
    Text(String),
}

impl RenderKey {
    /// The key a positional strategy assigns to `index`.
    pub fn index(index: usize) -> Self {
        // Collections never reach i64::MAX elements
        RenderKey::Number(index as i64)
    }
}

impl fmt::Display for RenderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderKey::Number(n) => write!(f, "{}", n),
            RenderKey::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RenderKey {
    fn from(value: &str) -> Self {
        RenderKey::Text(value.to_string())
    }
}

impl From<String> for RenderKey {
    fn from(value: String) -> Self {
        RenderKey::Text(value)
    }
}

macro_rules! impl_number_key {
    ($($t:ty),+) => {
        $(
            impl From<$t> for RenderKey {
                fn from(value: $t) -> Self {
                    RenderKey::Number(i64::from(value))
                }
            }
        )+
    };
}

impl_number_key!(i8, i16, i32, i64, u8, u16, u32);

// =============================================================================
// FIELD KEY
// =============================================================================

/// Structured records that expose named fields usable as render keys.
///
/// # Example
///
/// ```
/// use spark_array_state::{FieldKey, RenderKey};
///
/// struct Todo {
///     id: u32,
///     title: String,
/// }
///
/// impl FieldKey for Todo {
///     fn field_key(&self, field: &str) -> Option<RenderKey> {
///         match field {
///             "id" => Some(self.id.into()),
///             "title" => Some(self.title.clone().into()),
///             _ => None,
///         }
///     }
/// }
///
/// let todo = Todo { id: 7, title: "write docs".into() };
/// assert_eq!(todo.field_key("id"), Some(RenderKey::Number(7)));
/// assert_eq!(todo.field_key("owner"), None);
/// ```
pub trait FieldKey {
    /// The key stored under `field`, or `None` if the record has no such field.
    fn field_key(&self, field: &str) -> Option<RenderKey>;
}

// =============================================================================
// KEY DERIVATION
// =============================================================================

/// How render keys are chosen for one render pass.
pub enum KeyDerivation<'a, T> {
    /// One key per element, same order
    Explicit(&'a [RenderKey]),

    /// Read a named field off every element
    Field {
        name: &'a str,
        read: fn(&T, &str) -> Option<RenderKey>,
    },

    /// Positional index
    Index,
}

impl<'a, T> KeyDerivation<'a, T> {
    pub fn explicit(keys: &'a [RenderKey]) -> Self {
        KeyDerivation::Explicit(keys)
    }

    pub fn index() -> Self {
        KeyDerivation::Index
    }

    /// Resolve one key per element.
    ///
    /// # Errors
    ///
    /// - `KeyCountMismatch` if an explicit list's length differs from the
    ///   collection's
    /// - `MissingKeyField` for the first element lacking the named field
    ///
    /// # Example
    ///
    /// ```
    /// use spark_array_state::{KeyDerivation, RenderKey};
    ///
    /// let keys = KeyDerivation::<&str>::index().resolve(&["a", "b"]).unwrap();
    /// assert_eq!(keys, vec![RenderKey::Number(0), RenderKey::Number(1)]);
    ///
    /// let explicit = vec![RenderKey::from("only")];
    /// let err = KeyDerivation::explicit(&explicit).resolve(&["a", "b"]);
    /// assert!(err.is_err());
    /// ```
    pub fn resolve(&self, elements: &[T]) -> Result<Vec<RenderKey>, ContractViolation> {
        match self {
            KeyDerivation::Explicit(keys) => {
                if keys.len() != elements.len() {
                    return Err(ContractViolation::KeyCountMismatch {
                        keys: keys.len(),
                        elements: elements.len(),
                    });
                }
                Ok(keys.to_vec())
            }
            &KeyDerivation::Field { name, read } => elements
                .iter()
                .enumerate()
                .map(|(index, element)| {
                    read(element, name).ok_or_else(|| ContractViolation::MissingKeyField {
                        field: name.to_string(),
                        index,
                    })
                })
                .collect(),
            KeyDerivation::Index => Ok((0..elements.len()).map(RenderKey::index).collect()),
        }
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            KeyDerivation::Explicit(_) => "explicit",
            KeyDerivation::Field { .. } => "field",
            KeyDerivation::Index => "index",
        }
    }
}

impl<'a, T: FieldKey> KeyDerivation<'a, T> {
    /// Key every element by its `name` field.
    pub fn field(name: &'a str) -> Self {
        KeyDerivation::Field {
            name,
            read: T::field_key,
        }
    }

    /// Pick a strategy by priority: explicit list, then field, then index.
    ///
    /// # Example
    ///
    /// ```
    /// use spark_array_state::{FieldKey, KeyDerivation, RenderKey};
    ///
    /// struct Row(u32);
    /// impl FieldKey for Row {
    ///     fn field_key(&self, field: &str) -> Option<RenderKey> {
    ///         (field == "id").then(|| self.0.into())
    ///     }
    /// }
    ///
    /// let keys = vec![RenderKey::from("x")];
    /// assert_eq!(KeyDerivation::<Row>::prioritized(Some(&keys[..]), Some("id")).kind(), "explicit");
    /// assert_eq!(KeyDerivation::<Row>::prioritized(None, Some("id")).kind(), "field");
    /// assert_eq!(KeyDerivation::<Row>::prioritized(None, None).kind(), "index");
    /// ```
    pub fn prioritized(keys: Option<&'a [RenderKey]>, field: Option<&'a str>) -> Self {
        match (keys, field) {
            (Some(keys), _) => KeyDerivation::Explicit(keys),
            (None, Some(name)) => Self::field(name),
            (None, None) => KeyDerivation::Index,
        }
    }
}

impl<T> Clone for KeyDerivation<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for KeyDerivation<'_, T> {}

impl<T> fmt::Debug for KeyDerivation<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyDerivation::Explicit(keys) => f.debug_tuple("Explicit").field(keys).finish(),
            KeyDerivation::Field { name, .. } => f.debug_struct("Field").field("name", name).finish(),
            KeyDerivation::Index => f.write_str("Index"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Person {
        id: Option<u32>,
        name: &'static str,
    }

    impl FieldKey for Person {
        fn field_key(&self, field: &str) -> Option<RenderKey> {
            match field {
                "id" => self.id.map(RenderKey::from),
                "name" => Some(self.name.into()),
                _ => None,
            }
        }
    }

    fn people() -> Vec<Person> {
        vec![
            Person { id: Some(10), name: "ada" },
            Person { id: Some(20), name: "grace" },
        ]
    }

    #[test]
    fn index_keys_are_positions() {
        let keys = KeyDerivation::<Person>::index().resolve(&people()).unwrap();
        assert_eq!(keys, vec![RenderKey::Number(0), RenderKey::Number(1)]);
    }

    #[test]
    fn index_keys_on_empty_collection() {
        let keys = KeyDerivation::<Person>::index().resolve(&[]).unwrap();
        assert!(keys.is_empty());
    }

    #[test]
    fn explicit_keys_pass_through() {
        let explicit = render_keys!["first", 2];
        let keys = KeyDerivation::explicit(&explicit).resolve(&people()).unwrap();
        assert_eq!(keys, explicit);
    }

    #[test]
    fn explicit_length_mismatch_is_violation() {
        let explicit = render_keys!["only"];
        let err = KeyDerivation::explicit(&explicit).resolve(&people()).unwrap_err();
        assert_eq!(
            err,
            ContractViolation::KeyCountMismatch {
                keys: 1,
                elements: 2
            }
        );
    }

    #[test]
    fn field_keys_read_each_element() {
        let keys = KeyDerivation::field("id").resolve(&people()).unwrap();
        assert_eq!(keys, vec![RenderKey::Number(10), RenderKey::Number(20)]);

        let keys = KeyDerivation::field("name").resolve(&people()).unwrap();
        assert_eq!(keys, render_keys!["ada", "grace"]);
    }

    #[test]
    fn missing_field_reports_first_offender() {
        let mut rows = people();
        rows.push(Person { id: None, name: "linus" });
        rows.push(Person { id: None, name: "ken" });

        let err = KeyDerivation::field("id").resolve(&rows).unwrap_err();
        assert_eq!(
            err,
            ContractViolation::MissingKeyField {
                field: "id".to_string(),
                index: 2
            }
        );
    }

    #[test]
    fn prioritized_prefers_explicit_then_field() {
        let explicit = render_keys!["a", "b"];

        let keys = KeyDerivation::prioritized(Some(explicit.as_slice()), Some("id"))
            .resolve(&people())
            .unwrap();
        assert_eq!(keys, explicit);

        let keys = KeyDerivation::prioritized(None, Some("id")).resolve(&people()).unwrap();
        assert_eq!(keys[0], RenderKey::Number(10));

        let keys = KeyDerivation::<Person>::prioritized(None, None)
            .resolve(&people())
            .unwrap();
        assert_eq!(keys[1], RenderKey::Number(1));
    }

    #[test]
    fn positional_keys_shift_after_removal() {
        let before = KeyDerivation::<i32>::index().resolve(&[1, 2, 3]).unwrap();
        let after = KeyDerivation::<i32>::index().resolve(&[2, 3]).unwrap();

        // Element 2 was keyed 1, now keyed 0
        assert_eq!(before[1], RenderKey::Number(1));
        assert_eq!(after[0], RenderKey::Number(0));
    }

    #[test]
    fn render_key_display() {
        assert_eq!(RenderKey::Number(-3).to_string(), "-3");
        assert_eq!(RenderKey::from("row").to_string(), "row");
    }

    #[test]
    fn derivation_debug_hides_reader() {
        let derivation = KeyDerivation::<Person>::field("id");
        assert_eq!(format!("{:?}", derivation), "Field { name: \"id\" }");
    }
}
