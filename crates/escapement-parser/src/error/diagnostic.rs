//! A single diagnostic message with severity, code, help, and span.

use std::fmt;

use crate::{error::ErrorCode, span::Span};

/// The severity level of a diagnostic.
///
/// Errors fail the parse; warnings are advisory and are logged instead of
/// being returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A fatal problem; the source cannot be elaborated into a graph.
    Error,
    /// An advisory note about suspicious but legal input.
    Warning,
}

impl Severity {
    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One problem found while parsing or elaborating a machine description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    help: Option<String>,
    span: Option<Span>,
}

impl Diagnostic {
    /// Creates an error-severity diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: None,
            message: message.into(),
            help: None,
            span: None,
        }
    }

    /// Creates a warning-severity diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(message)
        }
    }

    /// Attaches a stable error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attaches help text suggesting a fix.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Attaches the source span the diagnostic points at.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// The diagnostic's severity.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The stable error code, when one was attached.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Help text suggesting a fix, when present.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// The source span, when one was attached.
    pub fn span(&self) -> Option<Span> {
        self.span
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

impl std::error::Error for Diagnostic {}
