//! Structural model of a hierarchical state machine.
//!
//! A [`StateGraph`] owns every node of the machine (plain states,
//! superstates that contain other states, and decision nodes) together
//! with the list of labeled transitions between them. Superstates
//! reference their children by [`Id`], so containment is a tree layered over
//! a single flat arena and a child is never owned twice.
//!
//! The graph is assembled through [`GraphBuilder`], which validates the
//! model as it grows. Once built, the graph is read-only: rendering (see
//! [`StateGraph::render`]) never mutates it and may run any number of times
//! over the same graph.

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use crate::{identifier::Id, style::GraphStyle};

/// Errors raised while constructing a [`StateGraph`].
///
/// These are contract violations by whoever builds the model; a successfully
/// built graph renders without errors.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Two nodes resolved to the same graph identifier.
    #[error("duplicate state name `{0}`")]
    DuplicateState(String),

    /// A transition or child designation referenced a node that was never added.
    #[error("unknown state `{0}`")]
    UnknownState(String),

    /// A child or active-child designation targeted a node that has no children.
    #[error("`{0}` is not a superstate")]
    NotASuperState(String),

    /// The designated active child is not a member of the superstate.
    #[error("`{child}` is not a child of superstate `{parent}`")]
    ActiveChildNotMember { parent: String, child: String },

    /// The designated active child is itself a superstate.
    ///
    /// Edges are clipped at the parent's boundary but still need a point
    /// node to attach to, so the anchor must be a plain child.
    #[error("active child `{child}` of `{parent}` must be a plain state")]
    ActiveChildIsCompound { parent: String, child: String },
}

/// A plain state: a display name plus its entry and exit action labels.
///
/// The display name is free text shown in diagram labels; the node name is
/// the sanitized identifier used to reference the state in the output text.
#[derive(Debug, Clone)]
pub struct State {
    display_name: String,
    node_name: Id,
    entry_actions: Vec<String>,
    exit_actions: Vec<String>,
}

impl State {
    /// Creates a state from its display name.
    ///
    /// # Examples
    ///
    /// ```
    /// use escapement_core::graph::State;
    ///
    /// let state = State::new("Ringing")
    ///     .with_entry_action("startTone")
    ///     .with_exit_action("stopTone");
    /// assert_eq!(state.display_name(), "Ringing");
    /// assert_eq!(state.entry_actions(), ["startTone"]);
    /// ```
    pub fn new(display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        let node_name = Id::graph_safe(&display_name);
        Self {
            display_name,
            node_name,
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
        }
    }

    /// Appends an entry action label.
    pub fn with_entry_action(mut self, action: impl Into<String>) -> Self {
        self.entry_actions.push(action.into());
        self
    }

    /// Appends an exit action label.
    pub fn with_exit_action(mut self, action: impl Into<String>) -> Self {
        self.exit_actions.push(action.into());
        self
    }

    /// The human-readable name shown in labels.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The identifier-safe name used in the output text.
    pub fn node_name(&self) -> Id {
        self.node_name
    }

    /// Entry action labels, in declaration order.
    pub fn entry_actions(&self) -> &[String] {
        &self.entry_actions
    }

    /// Exit action labels, in declaration order.
    pub fn exit_actions(&self) -> &[String] {
        &self.exit_actions
    }

    /// Whether the state carries any entry or exit action.
    pub fn has_actions(&self) -> bool {
        !self.entry_actions.is_empty() || !self.exit_actions.is_empty()
    }
}

/// A state that contains other states.
///
/// Children are referenced by [`Id`] in declaration order; the nodes
/// themselves live in the owning [`StateGraph`]. `last_active` optionally
/// designates the plain-state child edges should anchor to when a transition
/// ends at this superstate's boundary.
#[derive(Debug, Clone)]
pub struct SuperState {
    state: State,
    children: Vec<Id>,
    last_active: Option<Id>,
}

impl SuperState {
    /// Creates an empty superstate from its display name.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            state: State::new(display_name),
            children: Vec::new(),
            last_active: None,
        }
    }

    /// Appends an entry action label.
    pub fn with_entry_action(mut self, action: impl Into<String>) -> Self {
        self.state = self.state.with_entry_action(action);
        self
    }

    /// Appends an exit action label.
    pub fn with_exit_action(mut self, action: impl Into<String>) -> Self {
        self.state = self.state.with_exit_action(action);
        self
    }

    /// The name and action labels of the superstate itself.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// The identifier-safe name used in the output text.
    pub fn node_name(&self) -> Id {
        self.state.node_name()
    }

    /// Child node identifiers, in declaration order.
    pub fn children(&self) -> &[Id] {
        &self.children
    }

    /// The designated last-active child, if any.
    pub fn last_active(&self) -> Option<Id> {
        self.last_active
    }

    /// The name of the visual container this superstate renders as.
    pub fn cluster_name(&self) -> Id {
        Id::new(&format!("cluster{}", self.state.node_name()))
    }
}

/// A branch point rendered as a diamond; not a real state.
#[derive(Debug, Clone)]
pub struct DecisionNode {
    node_name: Id,
    label: String,
}

impl DecisionNode {
    /// Creates a decision node from its name and display label.
    pub fn new(name: &str, label: impl Into<String>) -> Self {
        Self {
            node_name: Id::graph_safe(name),
            label: label.into(),
        }
    }

    /// The identifier-safe name used in the output text.
    pub fn node_name(&self) -> Id {
        self.node_name
    }

    /// The label shown inside the diamond.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A node of the structural model.
///
/// The set of variants is closed: every dispatch over nodes is an exhaustive
/// `match`, checked at compile time.
#[derive(Debug, Clone)]
pub enum StateNode {
    /// An ordinary state.
    Plain(State),
    /// A state containing other states, rendered as a cluster.
    Compound(SuperState),
    /// A branch point rendered as a diamond.
    Decision(DecisionNode),
}

impl StateNode {
    /// The identifier-safe name used in the output text.
    pub fn node_name(&self) -> Id {
        match self {
            StateNode::Plain(state) => state.node_name(),
            StateNode::Compound(superstate) => superstate.node_name(),
            StateNode::Decision(decision) => decision.node_name(),
        }
    }

    /// The human-readable name shown in labels.
    pub fn display_name(&self) -> &str {
        match self {
            StateNode::Plain(state) => state.display_name(),
            StateNode::Compound(superstate) => superstate.state().display_name(),
            StateNode::Decision(decision) => decision.label(),
        }
    }
}

/// A directed, labeled transition between two nodes.
///
/// Endpoints are node identities, resolved against the owning graph when the
/// transition is rendered. The trigger may be absent; actions and guards may
/// be empty. Ordering of actions and guards is display order.
#[derive(Debug, Clone)]
pub struct Transition {
    source: Id,
    target: Id,
    trigger: Option<String>,
    actions: Vec<String>,
    guards: Vec<String>,
}

impl Transition {
    /// Creates a transition between two node identities.
    pub fn new(source: Id, target: Id) -> Self {
        Self {
            source,
            target,
            trigger: None,
            actions: Vec::new(),
            guards: Vec::new(),
        }
    }

    /// Sets the trigger label.
    pub fn with_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    /// Appends an action label.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }

    /// Appends a guard description.
    pub fn with_guard(mut self, guard: impl Into<String>) -> Self {
        self.guards.push(guard.into());
        self
    }

    /// The source node identity.
    pub fn source(&self) -> Id {
        self.source
    }

    /// The target node identity.
    pub fn target(&self) -> Id {
        self.target
    }

    /// The trigger label, if any.
    pub fn trigger(&self) -> Option<&str> {
        self.trigger.as_deref()
    }

    /// Action labels, in display order.
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Guard descriptions, in display order.
    pub fn guards(&self) -> &[String] {
        &self.guards
    }
}

/// The complete structural model of one state machine.
///
/// Owns every node in a single insertion-ordered arena, the list of root
/// (top-level) nodes, and the transitions. Construct one through
/// [`StateGraph::builder`], then render it with any
/// [`GraphStyle`](crate::style::GraphStyle):
///
/// ```
/// use escapement_core::graph::{State, StateGraph, SuperState, Transition};
/// use escapement_core::style::UmlDotStyle;
///
/// let mut builder = StateGraph::builder();
/// let idle = builder.add_state(State::new("Idle"))?;
/// let active = builder.add_super_state(SuperState::new("Active"))?;
/// let running = builder.add_child_state(active, State::new("Running"))?;
/// builder.set_last_active(active, running)?;
/// builder.add_transition(Transition::new(idle, running).with_trigger("start"))?;
///
/// let graph = builder.build();
/// let document = graph.render(&UmlDotStyle);
/// assert!(document.starts_with("digraph {"));
/// # Ok::<(), escapement_core::graph::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StateGraph {
    name: Option<String>,
    nodes: IndexMap<Id, StateNode>,
    roots: Vec<Id>,
    transitions: Vec<Transition>,
}

impl StateGraph {
    /// Creates an empty [`GraphBuilder`].
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// The machine name, when one was declared.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Looks up a node by identity.
    pub fn node(&self, id: Id) -> Option<&StateNode> {
        self.nodes.get(&id)
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &StateNode> {
        self.nodes.values()
    }

    /// Top-level nodes, in insertion order.
    pub fn root_nodes(&self) -> impl Iterator<Item = &StateNode> {
        self.roots.iter().filter_map(|id| self.nodes.get(id))
    }

    /// The children of a superstate, in declaration order.
    pub fn child_nodes<'a>(
        &'a self,
        superstate: &'a SuperState,
    ) -> impl Iterator<Item = &'a StateNode> {
        superstate
            .children()
            .iter()
            .filter_map(|id| self.nodes.get(id))
    }

    /// All transitions, in insertion order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Number of nodes in the graph, nested children included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of transitions in the graph.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Renders the graph as one text document in the given style.
    ///
    /// The document is the style's preamble, one fragment per top-level node
    /// (superstates expand recursively), one line per transition, and the
    /// style's closing fragment. Rendering never mutates the graph; calling
    /// this twice produces byte-identical output.
    pub fn render(&self, style: &dyn GraphStyle) -> String {
        let mut document = style.prefix();
        for node in self.root_nodes() {
            document.push_str(&style.format_state(self, node));
        }
        for transition in &self.transitions {
            let (Some(source), Some(target)) = (
                self.node(transition.source()),
                self.node(transition.target()),
            ) else {
                continue;
            };
            document.push_str(&style.format_transition(
                source,
                transition.trigger(),
                transition.actions(),
                target,
                transition.guards(),
            ));
            document.push('\n');
        }
        document.push_str(&style.suffix());
        debug!(bytes = document.len(); "Rendered state graph");
        document
    }
}

/// Incremental, validating builder for [`StateGraph`].
///
/// Nodes must be added before the transitions that reference them. Children
/// are created under their parent (`add_child_*`), so containment is a tree
/// by construction.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    name: Option<String>,
    nodes: IndexMap<Id, StateNode>,
    roots: Vec<Id>,
    transitions: Vec<Transition>,
}

impl GraphBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the machine name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Adds a top-level plain state.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateState`] if a node with the same
    /// identifier already exists.
    pub fn add_state(&mut self, state: State) -> Result<Id, GraphError> {
        let id = state.node_name();
        self.insert_node(id, StateNode::Plain(state))?;
        self.roots.push(id);
        Ok(id)
    }

    /// Adds a top-level superstate.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateState`] if a node with the same
    /// identifier already exists.
    pub fn add_super_state(&mut self, superstate: SuperState) -> Result<Id, GraphError> {
        let id = superstate.node_name();
        self.insert_node(id, StateNode::Compound(superstate))?;
        self.roots.push(id);
        Ok(id)
    }

    /// Adds a decision node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateState`] if a node with the same
    /// identifier already exists.
    pub fn add_decision(&mut self, decision: DecisionNode) -> Result<Id, GraphError> {
        let id = decision.node_name();
        self.insert_node(id, StateNode::Decision(decision))?;
        self.roots.push(id);
        Ok(id)
    }

    /// Adds a plain state as the next child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownState`] or [`GraphError::NotASuperState`]
    /// if `parent` does not name a superstate, and
    /// [`GraphError::DuplicateState`] if the child's identifier is taken.
    pub fn add_child_state(&mut self, parent: Id, state: State) -> Result<Id, GraphError> {
        let id = state.node_name();
        self.ensure_super_state(parent)?;
        self.insert_node(id, StateNode::Plain(state))?;
        self.push_child(parent, id);
        Ok(id)
    }

    /// Adds a superstate as the next child of `parent`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GraphBuilder::add_child_state`].
    pub fn add_child_super_state(
        &mut self,
        parent: Id,
        superstate: SuperState,
    ) -> Result<Id, GraphError> {
        let id = superstate.node_name();
        self.ensure_super_state(parent)?;
        self.insert_node(id, StateNode::Compound(superstate))?;
        self.push_child(parent, id);
        Ok(id)
    }

    /// Designates the last-active child of a superstate.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ActiveChildNotMember`] if `child` is not one of
    /// the superstate's children and [`GraphError::ActiveChildIsCompound`]
    /// if it is itself a superstate.
    pub fn set_last_active(&mut self, parent: Id, child: Id) -> Result<(), GraphError> {
        self.ensure_super_state(parent)?;
        let is_member = match self.nodes.get(&parent) {
            Some(StateNode::Compound(superstate)) => superstate.children().contains(&child),
            _ => false,
        };
        if !is_member {
            return Err(GraphError::ActiveChildNotMember {
                parent: parent.to_string(),
                child: child.to_string(),
            });
        }
        if matches!(self.nodes.get(&child), Some(StateNode::Compound(_))) {
            return Err(GraphError::ActiveChildIsCompound {
                parent: parent.to_string(),
                child: child.to_string(),
            });
        }
        if let Some(StateNode::Compound(superstate)) = self.nodes.get_mut(&parent) {
            superstate.last_active = Some(child);
        }
        Ok(())
    }

    /// Adds a transition.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownState`] if either endpoint has not been
    /// added yet.
    pub fn add_transition(&mut self, transition: Transition) -> Result<(), GraphError> {
        for endpoint in [transition.source(), transition.target()] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(GraphError::UnknownState(endpoint.to_string()));
            }
        }
        self.transitions.push(transition);
        Ok(())
    }

    /// Finishes construction and returns the immutable graph.
    pub fn build(self) -> StateGraph {
        debug!(
            nodes = self.nodes.len(),
            transitions = self.transitions.len();
            "State graph built"
        );
        StateGraph {
            name: self.name,
            nodes: self.nodes,
            roots: self.roots,
            transitions: self.transitions,
        }
    }

    fn insert_node(&mut self, id: Id, node: StateNode) -> Result<(), GraphError> {
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateState(id.to_string()));
        }
        self.nodes.insert(id, node);
        Ok(())
    }

    fn ensure_super_state(&self, id: Id) -> Result<(), GraphError> {
        match self.nodes.get(&id) {
            Some(StateNode::Compound(_)) => Ok(()),
            Some(_) => Err(GraphError::NotASuperState(id.to_string())),
            None => Err(GraphError::UnknownState(id.to_string())),
        }
    }

    fn push_child(&mut self, parent: Id, child: Id) {
        if let Some(StateNode::Compound(superstate)) = self.nodes.get_mut(&parent) {
            superstate.children.push(child);
        }
    }
}
