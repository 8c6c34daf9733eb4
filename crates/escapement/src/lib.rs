//! Escapement - render hierarchical state machines as diagram descriptions.
//!
//! Escapement parses a textual description of a state machine (plain
//! states, nested superstates, decision nodes, and labeled transitions)
//! and renders its structure as a graph description for an external layout
//! tool: Graphviz DOT in UML style, or Mermaid.

pub mod config;

mod error;

pub use escapement_core::{graph, identifier, style};

pub use error::EscapementError;

use log::{debug, info};

use escapement_core::graph::StateGraph;

use config::AppConfig;

/// Pipeline for parsing and rendering machine descriptions.
///
/// # Examples
///
/// ```
/// use escapement::{Diagrammer, config::AppConfig};
///
/// let source = "state Idle; state Running; Idle -> Running : start;";
///
/// let diagrammer = Diagrammer::new(AppConfig::default());
///
/// // Parse source to the structural model
/// let graph = diagrammer.parse(source).expect("Failed to parse");
///
/// // Render the model to diagram text
/// let document = diagrammer.render(&graph);
/// assert!(document.starts_with("digraph {"));
/// ```
#[derive(Debug, Default)]
pub struct Diagrammer {
    config: AppConfig,
}

impl Diagrammer {
    /// Create a new diagrammer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a machine description into its structural model.
    ///
    /// # Errors
    ///
    /// Returns [`EscapementError::Parse`] carrying every diagnostic found in
    /// the source, together with the source text for labeled reporting.
    ///
    /// # Examples
    ///
    /// ```
    /// use escapement::{Diagrammer, config::AppConfig};
    ///
    /// let diagrammer = Diagrammer::new(AppConfig::default());
    /// let graph = diagrammer.parse("machine Motor; state Idle;")
    ///     .expect("Failed to parse");
    /// assert_eq!(graph.name(), Some("Motor"));
    /// ```
    pub fn parse(&self, source: &str) -> Result<StateGraph, EscapementError> {
        info!("Parsing machine description");

        let graph = escapement_parser::parse(source)
            .map_err(|err| EscapementError::new_parse_error(err, source))?;

        debug!(
            machine = graph.name().unwrap_or("unnamed"),
            states = graph.node_count(),
            transitions = graph.transition_count();
            "Machine description parsed"
        );

        Ok(graph)
    }

    /// Render a structural model to diagram text in the configured dialect.
    ///
    /// Rendering is infallible over a built graph and never mutates it, so
    /// the same graph may be rendered repeatedly (the output is
    /// byte-identical each time) or with different configurations.
    ///
    /// # Examples
    ///
    /// ```
    /// use escapement::{Diagrammer, config::{AppConfig, Dialect, RenderConfig}};
    ///
    /// let config = AppConfig::new(RenderConfig::new(Dialect::Mermaid));
    /// let diagrammer = Diagrammer::new(config);
    ///
    /// let graph = diagrammer.parse("state Idle;").expect("Failed to parse");
    /// let document = diagrammer.render(&graph);
    /// assert!(document.starts_with("stateDiagram-v2"));
    /// ```
    pub fn render(&self, graph: &StateGraph) -> String {
        let dialect = self.config.render().dialect();
        info!(dialect:? = dialect; "Rendering state graph");

        let style = dialect.style();
        graph.render(style.as_ref())
    }
}
