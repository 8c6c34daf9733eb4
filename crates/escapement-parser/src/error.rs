//! Diagnostic types for the parsing lifecycle.
//!
//! Parsing and elaboration report problems as [`Diagnostic`]s: a severity, a
//! stable [`ErrorCode`], a message, optional help text, and an optional
//! source span. A failed parse returns a [`ParseError`] wrapping every
//! error-severity diagnostic collected along the way.

use std::fmt;

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;

/// Error type for the parsing lifecycle.
///
/// Wraps one or more error diagnostics. Warnings never appear here; they are
/// logged and do not fail the parse.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    /// Creates a parse error from collected diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Every diagnostic carried by this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_single_diagnostic() {
        let err: ParseError = Diagnostic::error("unknown state `Foo`").into();
        assert_eq!(err.to_string(), "error: unknown state `Foo`");
    }

    #[test]
    fn test_display_counts_extra_diagnostics() {
        let err = ParseError::new(vec![
            Diagnostic::error("first"),
            Diagnostic::error("second"),
            Diagnostic::error("third"),
        ]);
        assert_eq!(err.to_string(), "error: first (+2 more)");
    }
}
