//! Parser for the Escapement machine description language.
//!
//! The language describes the structure of a hierarchical state machine:
//! plain states with entry/exit actions, superstates containing nested
//! states, decision nodes, and labeled transitions. Parsing and elaboration
//! produce a validated [`StateGraph`] ready for rendering.
//!
//! ```
//! let source = r#"
//!     machine Motor;
//!
//!     state Idle;
//!     superstate Active {
//!         state Running;
//!         active Running;
//!     }
//!
//!     Idle -> Running : start [isReady];
//! "#;
//!
//! let graph = escapement_parser::parse(source).expect("valid description");
//! assert_eq!(graph.name(), Some("Motor"));
//! assert_eq!(graph.transition_count(), 1);
//! ```

pub mod ast;
pub mod error;
pub mod span;

mod elaborate;
mod parser;

#[cfg(test)]
mod parser_tests;

use escapement_core::graph::StateGraph;
use log::debug;

use crate::error::ParseError;

/// Parses a machine description into a renderable state graph.
///
/// # Errors
///
/// Returns [`ParseError`] carrying one diagnostic per problem: a single
/// syntax diagnostic when the source does not parse, or every semantic
/// diagnostic found while elaborating the statements into a graph.
pub fn parse(source: &str) -> Result<StateGraph, ParseError> {
    let statements = parser::parse_statements(source)?;
    debug!(statements = statements.len(); "Parsed machine description");
    elaborate::elaborate(&statements)
}
