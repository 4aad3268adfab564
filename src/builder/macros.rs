//! Macros for ergonomic action map construction.

/// Build an [`ActionMap`](crate::core::ActionMap) from `name => transition` pairs.
///
/// # Example
///
/// ```
/// use statehub::action_map;
/// use statehub::store::Store;
///
/// let actions = action_map! {
///     "add" => |total: &i32, amount: i32| total + amount,
///     "clear" => |_: &i32, _: i32| 0,
/// };
///
/// let store = Store::new(actions, 10);
/// store.dispatch("add", 5).unwrap();
/// assert_eq!(store.state(), 15);
/// ```
#[macro_export]
macro_rules! action_map {
    () => {
        $crate::core::ActionMap::new()
    };
    ($($name:expr => $transition:expr),+ $(,)?) => {
        $crate::core::ActionMap::new()
            $(.with($name, $transition))+
    };
}
