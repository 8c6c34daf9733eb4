//! Escapement Core Types and Renderers
//!
//! This crate provides the foundational types for describing the structure of
//! a hierarchical state machine and rendering it as a textual graph
//! description. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Graph**: The structural model of a state machine ([`graph`] module):
//!   plain states, superstates with nested children, decision nodes, and
//!   labeled transitions
//! - **Style**: The rendering contract and the built-in output dialects
//!   ([`style`] module): Graphviz DOT in UML style and Mermaid
//!
//! The model is built once (see [`graph::GraphBuilder`]) and treated as
//! read-only afterwards; rendering is a pure traversal that can be repeated
//! or run concurrently on the same graph.

pub mod graph;
pub mod identifier;
pub mod style;
