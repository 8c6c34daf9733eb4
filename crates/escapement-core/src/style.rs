//! The rendering contract shared by every output dialect.
//!
//! A [`GraphStyle`] turns pieces of a [`StateGraph`] into ordered text
//! fragments: a preamble, one fragment per state or superstate (recursive),
//! one line per transition, and one fragment per decision node. Document
//! assembly concatenates the fragments (see
//! [`StateGraph::render`](crate::graph::StateGraph::render)).
//!
//! Two rules are fixed across dialects and live here rather than in any one
//! implementation:
//!
//! - [`transition_label`]: edge labels always read `trigger / actions
//!   [guard]`, matching the usual UML transition-label convention.
//! - [`resolve_endpoint`]: a transition may start or end at a superstate,
//!   but the underlying edge primitive only understands point nodes, so the
//!   edge connects to a representative child and reports the cluster it
//!   should be visually clipped at.

mod dot;
mod mermaid;

pub use dot::UmlDotStyle;
pub use mermaid::MermaidStyle;

use crate::{
    graph::{State, StateGraph, StateNode, SuperState},
    identifier::Id,
};

/// Where an edge attaches for one end of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// The point node the edge connects to.
    pub node: Id,
    /// The cluster the edge should be clipped at, when the endpoint is a
    /// superstate.
    pub cluster: Option<Id>,
}

/// Resolves the connection point for one end of a transition.
///
/// A superstate is drawn as a container, not a point node, so the edge
/// connects to its designated last-active child (or, when no child has been
/// designated, to the superstate's own identifier) and carries the cluster
/// name so the drawing tool clips the edge at the container's frame. Plain
/// states and decision nodes connect directly and report no cluster.
///
/// # Examples
///
/// ```
/// use escapement_core::graph::{State, StateNode};
/// use escapement_core::style::resolve_endpoint;
///
/// let idle = StateNode::Plain(State::new("Idle"));
/// let endpoint = resolve_endpoint(&idle);
/// assert_eq!(endpoint.node, "Idle");
/// assert!(endpoint.cluster.is_none());
/// ```
pub fn resolve_endpoint(node: &StateNode) -> Endpoint {
    match node {
        StateNode::Compound(superstate) => Endpoint {
            node: superstate.last_active().unwrap_or(superstate.node_name()),
            cluster: Some(superstate.cluster_name()),
        },
        StateNode::Plain(state) => Endpoint {
            node: state.node_name(),
            cluster: None,
        },
        StateNode::Decision(decision) => Endpoint {
            node: decision.node_name(),
            cluster: None,
        },
    }
}

/// Composes the label of a transition edge.
///
/// The label starts with the trigger (empty when absent), appends
/// `" / "` and the comma-joined actions when there are any, then appends
/// each guard as its own bracketed clause in input order, space-separated
/// from whatever precedes it. The ordering is fixed; dialects must not
/// rearrange it.
///
/// # Examples
///
/// ```
/// use escapement_core::style::transition_label;
///
/// let actions = vec!["startMotor".to_string()];
/// let guards = vec!["isReady".to_string(), "hasFuel".to_string()];
/// assert_eq!(
///     transition_label(Some("start"), &actions, &guards),
///     "start / startMotor [isReady] [hasFuel]"
/// );
/// ```
pub fn transition_label(trigger: Option<&str>, actions: &[String], guards: &[String]) -> String {
    let mut label = trigger.unwrap_or("").to_string();
    if !actions.is_empty() {
        label.push_str(" / ");
        label.push_str(&actions.join(", "));
    }
    for guard in guards {
        if !label.is_empty() {
            label.push(' ');
        }
        label.push('[');
        label.push_str(guard);
        label.push(']');
    }
    label
}

/// A concrete output dialect.
///
/// Every operation is a pure function of its inputs. Implementations format
/// text only; they never mutate the graph, so one style value can serve any
/// number of concurrent render passes.
pub trait GraphStyle {
    /// The document preamble, emitted exactly once and first.
    fn prefix(&self) -> String;

    /// The document closing fragment, emitted exactly once and last.
    ///
    /// Defaults to nothing; dialects whose preamble opens a block override
    /// this to close it.
    fn suffix(&self) -> String {
        String::new()
    }

    /// Formats any node by dispatching on its variant.
    fn format_state(&self, graph: &StateGraph, node: &StateNode) -> String {
        match node {
            StateNode::Plain(state) => self.format_plain_state(state),
            StateNode::Compound(superstate) => self.format_cluster(graph, superstate),
            StateNode::Decision(decision) => {
                self.format_decision_node(decision.node_name(), decision.label())
            }
        }
    }

    /// Formats the declaration of one plain state.
    ///
    /// With no actions the label is just the display name; otherwise the
    /// label gains a second compartment listing each entry action prefixed
    /// `entry / ` followed by each exit action prefixed `exit / `.
    fn format_plain_state(&self, state: &State) -> String;

    /// Formats one superstate as a named container holding its children.
    ///
    /// The children are formatted through [`GraphStyle::format_state`] in
    /// declaration order, so nested superstates nest their containers.
    fn format_cluster(&self, graph: &StateGraph, superstate: &SuperState) -> String;

    /// Formats one transition as a single line, without a trailing newline.
    fn format_transition(
        &self,
        source: &StateNode,
        trigger: Option<&str>,
        actions: &[String],
        target: &StateNode,
        guards: &[String],
    ) -> String;

    /// Formats the declaration of one decision node.
    fn format_decision_node(&self, name: Id, label: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DecisionNode, StateGraph, SuperState};

    fn superstate_with_child(last_active: bool) -> StateNode {
        let mut builder = StateGraph::builder();
        let active = builder
            .add_super_state(SuperState::new("Active"))
            .unwrap();
        let running = builder
            .add_child_state(active, State::new("Running"))
            .unwrap();
        if last_active {
            builder.set_last_active(active, running).unwrap();
        }
        let graph = builder.build();
        graph.node(active).unwrap().clone()
    }

    #[test]
    fn test_label_empty_when_nothing_given() {
        assert_eq!(transition_label(None, &[], &[]), "");
    }

    #[test]
    fn test_label_trigger_only() {
        assert_eq!(transition_label(Some("start"), &[], &[]), "start");
    }

    #[test]
    fn test_label_actions_without_trigger() {
        let actions = vec!["beep".to_string(), "log".to_string()];
        assert_eq!(transition_label(None, &actions, &[]), " / beep, log");
    }

    #[test]
    fn test_label_guard_without_anything_else() {
        let guards = vec!["isReady".to_string()];
        assert_eq!(transition_label(None, &[], &guards), "[isReady]");
    }

    #[test]
    fn test_label_guards_are_independent_clauses() {
        let guards = vec!["a".to_string(), "b".to_string()];
        assert_eq!(transition_label(Some("go"), &[], &guards), "go [a] [b]");
    }

    #[test]
    fn test_endpoint_of_superstate_uses_last_active() {
        let node = superstate_with_child(true);
        let endpoint = resolve_endpoint(&node);
        assert_eq!(endpoint.node, "Running");
        assert_eq!(endpoint.cluster, Some(Id::new("clusterActive")));
    }

    #[test]
    fn test_endpoint_of_superstate_falls_back_to_itself() {
        let node = superstate_with_child(false);
        let endpoint = resolve_endpoint(&node);
        assert_eq!(endpoint.node, "Active");
        assert_eq!(endpoint.cluster, Some(Id::new("clusterActive")));
    }

    #[test]
    fn test_endpoint_of_empty_superstate_is_its_own_identifier() {
        let superstate = SuperState::new("Hollow");
        let endpoint = resolve_endpoint(&StateNode::Compound(superstate));
        assert_eq!(endpoint.node, "Hollow");
        assert_eq!(endpoint.cluster, Some(Id::new("clusterHollow")));
    }

    #[test]
    fn test_endpoint_of_decision_has_no_cluster() {
        let node = StateNode::Decision(DecisionNode::new("Check", "ok?"));
        let endpoint = resolve_endpoint(&node);
        assert_eq!(endpoint.node, "Check");
        assert!(endpoint.cluster.is_none());
    }
}
