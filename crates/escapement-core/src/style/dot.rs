//! Graphviz DOT output in basic UML style.
//!
//! States are `Mrecord` nodes whose second compartment lists entry and exit
//! actions; superstates are `subgraph cluster...` blocks; transitions are
//! solid edges labeled `trigger / actions [guard]`. Edges that start or end
//! at a superstate connect to the resolved child node and carry
//! `ltail`/`lhead` attributes so the drawing tool clips them at the cluster
//! frame.

use crate::{
    graph::{State, StateGraph, StateNode, SuperState},
    identifier::Id,
    style::{GraphStyle, resolve_endpoint, transition_label},
};

/// Generates DOT graphs in basic UML style.
#[derive(Debug, Default, Clone, Copy)]
pub struct UmlDotStyle;

impl GraphStyle for UmlDotStyle {
    fn prefix(&self) -> String {
        "digraph {\n\
         compound=true;\n\
         node [shape=Mrecord]\n\
         rankdir=\"LR\"\n"
            .to_string()
    }

    fn suffix(&self) -> String {
        "}\n".to_string()
    }

    fn format_plain_state(&self, state: &State) -> String {
        if !state.has_actions() {
            return format!(
                "{} [label=\"{}\"];\n",
                state.node_name(),
                state.display_name()
            );
        }

        let mut lines = Vec::new();
        lines.extend(state.entry_actions().iter().map(|act| format!("entry / {act}")));
        lines.extend(state.exit_actions().iter().map(|act| format!("exit / {act}")));

        format!(
            "{} [label=\"{}|{}\"];\n",
            state.node_name(),
            state.display_name(),
            lines.join("\\n")
        )
    }

    fn format_cluster(&self, graph: &StateGraph, superstate: &SuperState) -> String {
        let mut label = superstate.state().display_name().to_string();
        if superstate.state().has_actions() {
            label.push_str("\\n----------");
            for action in superstate.state().entry_actions() {
                label.push_str("\\nentry / ");
                label.push_str(action);
            }
            for action in superstate.state().exit_actions() {
                label.push_str("\\nexit / ");
                label.push_str(action);
            }
        }

        let mut text = format!(
            "\nsubgraph {}\n\t{{\n\tlabel = \"{}\"\n",
            superstate.cluster_name(),
            label
        );
        for child in graph.child_nodes(superstate) {
            text.push_str(&self.format_state(graph, child));
        }
        text.push_str("}\n");
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
        let tail = resolve_endpoint(source);
        let head = resolve_endpoint(target);

        let mut attributes = format!("style=\"solid\", label=\"{label}\"");
        if let Some(cluster) = tail.cluster {
            attributes.push_str(&format!(", ltail={cluster}"));
        }
        if let Some(cluster) = head.cluster {
            attributes.push_str(&format!(", lhead={cluster}"));
        }

        format!("{} -> {} [{}];", tail.node, head.node, attributes)
    }

    fn format_decision_node(&self, name: Id, label: &str) -> String {
        format!("{} [shape = \"diamond\", label = \"{}\"];\n", name, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DecisionNode, Transition};

    #[test]
    fn test_prefix_opens_digraph() {
        let prefix = UmlDotStyle.prefix();
        assert_eq!(
            prefix,
            "digraph {\ncompound=true;\nnode [shape=Mrecord]\nrankdir=\"LR\"\n"
        );
    }

    #[test]
    fn test_plain_state_without_actions() {
        let output = UmlDotStyle.format_plain_state(&State::new("Idle"));
        assert_eq!(output, "Idle [label=\"Idle\"];\n");
    }

    #[test]
    fn test_plain_state_without_actions_has_no_compartment() {
        let output = UmlDotStyle.format_plain_state(&State::new("Idle"));
        assert!(!output.contains('|'));
    }

    #[test]
    fn test_plain_state_with_entry_action() {
        let state = State::new("Open").with_entry_action("logOpen");
        let output = UmlDotStyle.format_plain_state(&state);
        assert_eq!(output, "Open [label=\"Open|entry / logOpen\"];\n");
    }

    #[test]
    fn test_plain_state_lists_entry_before_exit() {
        let state = State::new("Open")
            .with_entry_action("a")
            .with_exit_action("b")
            .with_entry_action("c");
        let output = UmlDotStyle.format_plain_state(&state);
        assert_eq!(
            output,
            "Open [label=\"Open|entry / a\\nentry / c\\nexit / b\"];\n"
        );
    }

    #[test]
    fn test_cluster_contains_children_in_order() {
        let mut builder = StateGraph::builder();
        let active = builder
            .add_super_state(SuperState::new("Active"))
            .unwrap();
        builder
            .add_child_state(active, State::new("Running"))
            .unwrap();
        builder
            .add_child_state(active, State::new("Paused"))
            .unwrap();
        let graph = builder.build();

        let Some(StateNode::Compound(superstate)) = graph.node(active) else {
            panic!("Active should be a superstate");
        };
        let output = UmlDotStyle.format_cluster(&graph, superstate);
        assert_eq!(
            output,
            "\nsubgraph clusterActive\n\t{\n\tlabel = \"Active\"\n\
             Running [label=\"Running\"];\n\
             Paused [label=\"Paused\"];\n\
             }\n"
        );
    }

    #[test]
    fn test_cluster_label_includes_separator_and_actions() {
        let mut builder = StateGraph::builder();
        let active = builder
            .add_super_state(SuperState::new("Active").with_entry_action("powerUp"))
            .unwrap();
        let graph = builder.build();

        let Some(StateNode::Compound(superstate)) = graph.node(active) else {
            panic!("Active should be a superstate");
        };
        let output = UmlDotStyle.format_cluster(&graph, superstate);
        assert!(output.contains("label = \"Active\\n----------\\nentry / powerUp\""));
    }

    #[test]
    fn test_clusters_nest() {
        let mut builder = StateGraph::builder();
        let outer = builder.add_super_state(SuperState::new("Outer")).unwrap();
        let inner = builder
            .add_child_super_state(outer, SuperState::new("Inner"))
            .unwrap();
        builder
            .add_child_state(inner, State::new("Leaf"))
            .unwrap();
        let graph = builder.build();

        let Some(StateNode::Compound(superstate)) = graph.node(outer) else {
            panic!("Outer should be a superstate");
        };
        let output = UmlDotStyle.format_cluster(&graph, superstate);
        let outer_at = output.find("subgraph clusterOuter").unwrap();
        let inner_at = output.find("subgraph clusterInner").unwrap();
        let leaf_at = output.find("Leaf [label=\"Leaf\"];").unwrap();
        assert!(outer_at < inner_at && inner_at < leaf_at);
    }

    #[test]
    fn test_transition_between_plain_states() {
        let idle = StateNode::Plain(State::new("Idle"));
        let running = StateNode::Plain(State::new("Running"));
        let output = UmlDotStyle.format_transition(&idle, Some("start"), &[], &running, &[]);
        assert_eq!(output, "Idle -> Running [style=\"solid\", label=\"start\"];");
    }

    #[test]
    fn test_transition_from_superstate_clips_at_cluster() {
        let mut builder = StateGraph::builder();
        let active = builder
            .add_super_state(SuperState::new("Active"))
            .unwrap();
        let running = builder
            .add_child_state(active, State::new("Running"))
            .unwrap();
        builder.set_last_active(active, running).unwrap();
        let stopped = builder.add_state(State::new("Stopped")).unwrap();
        builder
            .add_transition(Transition::new(active, stopped).with_trigger("stop"))
            .unwrap();
        let graph = builder.build();

        let source = graph.node(active).unwrap();
        let target = graph.node(stopped).unwrap();
        let output = UmlDotStyle.format_transition(source, Some("stop"), &[], target, &[]);
        assert_eq!(
            output,
            "Running -> Stopped [style=\"solid\", label=\"stop\", ltail=clusterActive];"
        );
    }

    #[test]
    fn test_transition_into_superstate_sets_lhead() {
        let mut builder = StateGraph::builder();
        let idle = builder.add_state(State::new("Idle")).unwrap();
        let active = builder
            .add_super_state(SuperState::new("Active"))
            .unwrap();
        let graph = builder.build();

        let source = graph.node(idle).unwrap();
        let target = graph.node(active).unwrap();
        let output = UmlDotStyle.format_transition(source, None, &[], target, &[]);
        assert_eq!(
            output,
            "Idle -> Active [style=\"solid\", label=\"\", lhead=clusterActive];"
        );
    }

    #[test]
    fn test_transition_label_full_composition() {
        let a = StateNode::Plain(State::new("A"));
        let b = StateNode::Plain(State::new("B"));
        let actions = vec!["m1".to_string(), "m2".to_string()];
        let guards = vec!["g1".to_string(), "g2".to_string()];
        let output = UmlDotStyle.format_transition(&a, Some("go"), &actions, &b, &guards);
        assert_eq!(
            output,
            "A -> B [style=\"solid\", label=\"go / m1, m2 [g1] [g2]\"];"
        );
    }

    #[test]
    fn test_decision_node_is_a_diamond() {
        let output = UmlDotStyle.format_decision_node(Id::new("Check"), "fuel ok?");
        assert_eq!(output, "Check [shape = \"diamond\", label = \"fuel ok?\"];\n");
    }
}
