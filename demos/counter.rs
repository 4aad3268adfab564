//! Counter Store
//!
//! This example demonstrates the basic store loop: subscribe, dispatch,
//! unsubscribe, and the rejected dispatch of an unknown action.
//!
//! Run with: RUST_LOG=statehub=debug cargo run --example counter

use statehub::builder::StoreBuilder;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, PartialEq)]
struct Counter {
    count: i64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("statehub=info".parse()?))
        .init();

    println!("=== Counter Store Example ===\n");

    let store = StoreBuilder::new()
        .initial(Counter { count: 0 })
        .label("counter")
        .action("increment", |s: &Counter, by: Option<i64>| Counter {
            count: s.count + by.unwrap_or(1),
        })
        .action("reset", |_: &Counter, _: Option<i64>| Counter { count: 0 })
        .build()?;

    // Replays the current state right away
    let subscription = store.subscribe(|s: &Counter| println!("  subscriber saw {}", s.count));

    println!("dispatch increment");
    store.dispatch("increment", None)?;

    println!("dispatch increment by 5");
    store.dispatch("increment", Some(5))?;

    println!("dispatch decrement (not defined)");
    if let Err(err) = store.dispatch("decrement", None) {
        println!("  rejected: {err}");
    }

    subscription.unsubscribe();
    println!("dispatch reset after unsubscribing");
    store.dispatch("reset", None)?;

    println!("\nFinal state: {:?}", store.state());
    println!("Metadata: {:?}", store.metadata());

    println!("\n=== Example Complete ===");
    Ok(())
}
