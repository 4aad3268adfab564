//! Loosely-typed stores over [`serde_json::Value`].
//!
//! When the state has no fixed shape, [`JsonStore`] keeps it as a JSON
//! value and starts from an empty object. A dispatch without a payload
//! passes [`Value::Null`].
//!
//! ```rust
//! use serde_json::{json, Value};
//! use statehub::json;
//!
//! let store = json::store(
//!     statehub::action_map! {
//!         "increment" => |state: &Value, payload: Value| {
//!             let count = state["count"].as_i64().unwrap_or(0);
//!             json!({ "count": count + payload.as_i64().unwrap_or(1) })
//!         },
//!     },
//! );
//!
//! store.dispatch("increment", Value::Null).unwrap();
//! store.dispatch("increment", json!(5)).unwrap();
//! assert_eq!(store.state(), json!({ "count": 6 }));
//! ```

use crate::builder::StoreBuilder;
use crate::core::ActionMap;
use crate::store::Store;
use serde_json::{Map, Value};

/// Store whose state and payloads are arbitrary JSON.
pub type JsonStore = Store<Value, Value>;

/// Initial state used when none is given: `{}`.
pub fn empty_state() -> Value {
    Value::Object(Map::new())
}

/// Create a store over `actions` starting from [`empty_state`].
pub fn store(actions: ActionMap<Value, Value>) -> JsonStore {
    Store::new(actions, empty_state())
}

/// Builder pre-seeded with [`empty_state`] as initial state.
pub fn builder() -> StoreBuilder<Value, Value> {
    StoreBuilder::new().initial(empty_state())
}
