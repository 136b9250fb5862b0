// ============================================================================
// spark-array-state - Ergonomic Macros
// ============================================================================

/// Build a `Vec<RenderKey>` from mixed string and integer literals.
///
/// # Usage
///
/// ```rust
/// use spark_array_state::{render_keys, RenderKey};
///
/// let keys = render_keys!["header", 1, 2];
/// assert_eq!(keys[0], RenderKey::Text("header".to_string()));
/// assert_eq!(keys[2], RenderKey::Number(2));
/// ```
#[macro_export]
macro_rules! render_keys {
    () => {
        ::std::vec::Vec::<$crate::RenderKey>::new()
    };
    ($($key:expr),+ $(,)?) => {
        ::std::vec![$($crate::RenderKey::from($key)),+]
    };
}

/// Capture element handlers for later events.
///
/// Expands to a block that clones each named binding or operation set and
/// then evaluates the expression, so a `move` closure built inside a render
/// callback owns its own handles.
///
/// # Usage
///
/// ```rust
/// use spark_array_state::{cloned, ArrayMap, Host, KeyDerivation};
///
/// let host = Host::new(vec!["draft", "sent"]);
/// let inbox = ArrayMap::new();
///
/// // One archive button per row, fired after the render returns
/// let archive_buttons = host
///     .render(&inbox, KeyDerivation::index(), |_, row, _, _| {
///         cloned!(row => move || row.set("archived"))
///     })
///     .unwrap();
///
/// (archive_buttons[0].view)();
/// host.commit();
/// assert_eq!(*host.collection(), vec!["archived", "sent"]);
/// ```
#[macro_export]
macro_rules! cloned {
    ($($n:ident),+ => $e:expr) => {
        {
            $( let $n = $n.clone(); )+
            $e
        }
    };
}
