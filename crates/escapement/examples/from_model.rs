//! Example: Building a diagram from the structural model
//!
//! This example demonstrates how to build a state graph programmatically
//! using the model types directly, without parsing source text.

use escapement::graph::{State, StateGraph, SuperState, Transition};
use escapement::style::{MermaidStyle, UmlDotStyle};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building state graph from the model...\n");

    let mut builder = StateGraph::builder();
    builder.set_name("PhoneCall");

    // Plain states with entry/exit actions
    let off_hook = builder.add_state(State::new("OffHook"))?;
    let ringing = builder.add_state(State::new("Ringing").with_entry_action("playTone"))?;

    // A superstate whose children are its own states
    let connected = builder.add_super_state(
        SuperState::new("Connected")
            .with_entry_action("startBilling")
            .with_exit_action("stopBilling"),
    )?;
    let talking = builder.add_child_state(connected, State::new("Talking"))?;
    builder.add_child_state(connected, State::new("OnHold"))?;
    builder.set_last_active(connected, talking)?;

    // Transitions with triggers, actions, and guards
    builder.add_transition(Transition::new(off_hook, ringing).with_trigger("callDialed"))?;
    builder.add_transition(
        Transition::new(ringing, connected)
            .with_trigger("callConnected")
            .with_action("startTimer")
            .with_guard("calleeAnswered"),
    )?;
    builder.add_transition(
        Transition::new(connected, off_hook)
            .with_trigger("hungUp")
            .with_action("stopTimer"),
    )?;

    let graph = builder.build();

    println!("--- Graphviz DOT ---\n{}", graph.render(&UmlDotStyle));
    println!("--- Mermaid ---\n{}", graph.render(&MermaidStyle));

    Ok(())
}
