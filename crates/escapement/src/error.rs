//! Error types for Escapement operations.
//!
//! This module provides the main error type [`EscapementError`] which wraps
//! the error conditions that can occur while turning a machine description
//! into a rendered diagram.

use std::io;

use thiserror::Error;

use escapement_core::graph::GraphError;
use escapement_parser::error::ParseError;

/// The main error type for Escapement operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the original source text next to the structured
/// diagnostics so front ends can render labeled source snippets.
#[derive(Debug, Error)]
pub enum EscapementError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EscapementError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
