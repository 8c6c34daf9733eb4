//! Configuration types for Escapement rendering.
//!
//! This module provides the configuration structures that control which
//! output dialect a diagram is rendered in. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Example
//!
//! ```
//! # use escapement::config::{AppConfig, Dialect};
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.render().dialect(), Dialect::Dot);
//! ```

use std::str::FromStr;

use serde::Deserialize;

use escapement_core::style::{GraphStyle, MermaidStyle, UmlDotStyle};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Rendering configuration section.
    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified rendering configuration.
    pub fn new(render: RenderConfig) -> Self {
        Self { render }
    }

    /// Returns the rendering configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Replaces the output dialect.
    pub fn set_dialect(&mut self, dialect: Dialect) {
        self.render.dialect = dialect;
    }
}

/// Rendering configuration: which output dialect to produce.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    /// The output dialect.
    #[serde(default)]
    dialect: Dialect,
}

impl RenderConfig {
    /// Creates a new [`RenderConfig`] with the specified dialect.
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Returns the configured dialect.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }
}

/// The supported output dialects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Graphviz DOT in UML style.
    #[default]
    Dot,
    /// Mermaid `stateDiagram-v2`.
    Mermaid,
}

impl Dialect {
    /// Returns the style implementation for this dialect.
    pub fn style(&self) -> Box<dyn GraphStyle> {
        match self {
            Dialect::Dot => Box::new(UmlDotStyle),
            Dialect::Mermaid => Box::new(MermaidStyle),
        }
    }

    /// The conventional file extension for this dialect.
    pub fn file_extension(&self) -> &'static str {
        match self {
            Dialect::Dot => "dot",
            Dialect::Mermaid => "mmd",
        }
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "dot" => Ok(Dialect::Dot),
            "mermaid" => Ok(Dialect::Mermaid),
            other => Err(format!(
                "unknown dialect `{other}`; expected `dot` or `mermaid`"
            )),
        }
    }
}
