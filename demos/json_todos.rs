//! JSON Todo List
//!
//! A loosely-typed store over `serde_json::Value`, starting from `{}`.
//! A scoped subscriber stops listening when its guard is dropped.
//!
//! Run with: cargo run --example json_todos

use serde_json::{json, Value};
use statehub::{action_map, json as json_store, StoreConfig, SubscriberPanicPolicy};

fn todos(state: &Value) -> Vec<Value> {
    state["todos"].as_array().cloned().unwrap_or_default()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    println!("=== JSON Todo Store Example ===\n");

    let config: StoreConfig = serde_json::from_str(
        r#"{ "label": "todos", "subscriber_panics": "isolate_and_log" }"#,
    )?;
    assert_eq!(config.subscriber_panics, SubscriberPanicPolicy::IsolateAndLog);

    let store = json_store::builder()
        .config(config)
        .actions(action_map! {
            "add" => |state: &Value, title: Value| {
                let mut items = todos(state);
                items.push(json!({ "title": title, "done": false }));
                json!({ "todos": items })
            },
            "complete" => |state: &Value, index: Value| {
                let mut items = todos(state);
                let index = index.as_u64().and_then(|i| usize::try_from(i).ok());
                if let Some(item) = index.and_then(|i| items.get_mut(i)) {
                    item["done"] = json!(true);
                }
                json!({ "todos": items })
            },
        })
        .build()?;

    {
        let _guard = store
            .subscribe(|state: &Value| println!("  {} todo(s)", todos(state).len()))
            .into_guard();

        store.dispatch("add", json!("write docs"))?;
        store.dispatch("add", json!("ship release"))?;
    }

    // Nobody is listening anymore
    store.dispatch("complete", json!(0))?;

    println!("\nFinal state: {}", serde_json::to_string_pretty(&store.state())?);
    println!("\n=== Example Complete ===");
    Ok(())
}
