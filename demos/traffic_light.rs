//! Traffic Light State Machine
//!
//! This example drives a cyclic machine and a one-shot maintenance branch.
//!
//! Key concepts:
//! - One transition name ("next") moving differently from each state
//! - Listening to machine events and state enter/leave hooks
//! - Performing a low-level hop with `Transition::transition`
//! - Handling `InvalidTransition`
//!
//! Run with: RUST_LOG=monster=debug cargo run --example traffic_light

use monster::builder::{cycle, MonsterBuilder};
use monster::{shortcuts, MonsterEvent, State, Transition, Value};
use tracing_subscriber::EnvFilter;

shortcuts! {
    trait LightMoves {
        next,
        shut_down,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("monster=info")),
        )
        .init();

    println!("=== Traffic Light State Machine ===\n");

    let red = State::new("red");
    let green = State::new("green");
    let yellow = State::new("yellow");
    let dark = State::new("dark");

    red.on_enter(|args: &[Value]| println!("  (red lamp on, args: {args:?})"));
    red.on_leave(|_args: &[Value]| println!("  (red lamp off)"));

    let shut_down = Transition::new("shut_down", red.clone(), dark.clone());
    shut_down.on_transition(|event| {
        println!(
            "  hop {} -> {} with {:?}",
            event.from.name(),
            event.to.name(),
            event.args
        );
    });

    let mut light = MonsterBuilder::new()
        .initial(red.clone())
        .enter_args([Value::from("power on")])
        .transitions(cycle("next", &[red.clone(), green, yellow]))
        .add_transition(shut_down.clone())
        .strict(true)
        .history_limit(64)
        .build()?;

    light.on("transition", |event: &MonsterEvent| {
        if let MonsterEvent::Transition { from, to } = event {
            println!("{} -> {}", from.name(), to.name());
        }
    });
    light.on("final", |_event: &MonsterEvent| println!("Light is dark for good."));

    println!("\nCycling:");
    for _ in 0..3 {
        light.next(&[])?;
    }
    println!("Available from {}: {:?}", light.state().name(), light.available());

    println!("\nLow-level hop (does not move the machine):");
    shut_down.transition(&red, &dark, &[Value::from("maintenance")]);
    println!("Machine still at {}", light.state().name());

    println!("\nShutting down:");
    light.shut_down(&[])?;

    match light.next(&[]) {
        Ok(_) => println!("Unexpectedly moved on"),
        Err(err) => println!("Cannot continue: {err}"),
    }

    println!("\nPath: {}", light.history().path().join(" -> "));
    println!("\n=== Example Complete ===");
    Ok(())
}
