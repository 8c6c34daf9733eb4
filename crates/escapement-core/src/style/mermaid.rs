//! Mermaid `stateDiagram-v2` output.
//!
//! Mermaid composite states are addressable nodes in their own right and the
//! renderer clips edges at composite boundaries natively, so transitions
//! connect to a superstate's own name and no boundary side-channel is
//! emitted. Entry and exit actions become extra description lines, which
//! Mermaid stacks under the state's title.

use crate::{
    graph::{State, StateGraph, StateNode, SuperState},
    identifier::Id,
    style::{GraphStyle, transition_label},
};

/// Generates Mermaid state diagrams.
#[derive(Debug, Default, Clone, Copy)]
pub struct MermaidStyle;

impl MermaidStyle {
    fn description_lines(name: Id, state: &State) -> String {
        let mut text = String::new();
        for action in state.entry_actions() {
            text.push_str(&format!("\t{} : entry / {}\n", name, action));
        }
        for action in state.exit_actions() {
            text.push_str(&format!("\t{} : exit / {}\n", name, action));
        }
        text
    }
}

impl GraphStyle for MermaidStyle {
    fn prefix(&self) -> String {
        "stateDiagram-v2\n".to_string()
    }

    fn format_plain_state(&self, state: &State) -> String {
        let mut text = format!("\t{} : {}\n", state.node_name(), state.display_name());
        text.push_str(&Self::description_lines(state.node_name(), state));
        text
    }

    fn format_cluster(&self, graph: &StateGraph, superstate: &SuperState) -> String {
        let name = superstate.node_name();
        let display = superstate.state().display_name();

        let mut text = if name == *display {
            format!("\tstate {} {{\n", name)
        } else {
            format!("\tstate \"{}\" as {} {{\n", display, name)
        };
        for child in graph.child_nodes(superstate) {
            text.push_str(&self.format_state(graph, child));
        }
        text.push_str("\t}\n");
        text.push_str(&Self::description_lines(name, superstate.state()));
        text
    }

    fn format_transition(
        &self,
        source: &StateNode,
        trigger: Option<&str>,
        actions: &[String],
        target: &StateNode,
        guards: &[String],
    ) -> String {
        let label = transition_label(trigger, actions, guards);
        if label.is_empty() {
            format!("\t{} --> {}", source.node_name(), target.node_name())
        } else {
            format!(
                "\t{} --> {} : {}",
                source.node_name(),
                target.node_name(),
                label
            )
        }
    }

    fn format_decision_node(&self, name: Id, label: &str) -> String {
        let mut text = format!("\tstate {} <<choice>>\n", name);
        if !label.is_empty() && name != label {
            text.push_str(&format!("\t{} : {}\n", name, label));
        }
        text
    }
}
