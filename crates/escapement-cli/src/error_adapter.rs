//! Error adapter for converting EscapementError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When an [`escapement_parser::error::ParseError`] contains multiple
//! diagnostics, each diagnostic is rendered independently with its own
//! source span.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity, SourceSpan};

use escapement::EscapementError;
use escapement_parser::error::{Diagnostic, Severity as ParseSeverity};

/// Adapter for a single parser diagnostic.
///
/// This adapter wraps a single [`Diagnostic`] and implements
/// [`MietteDiagnostic`] to enable rich error formatting in the CLI.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Source code for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|code| Box::new(code) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<Severity> {
        Some(match self.diag.severity() {
            ParseSeverity::Error => Severity::Error,
            ParseSeverity::Warning => Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|help| Box::new(help.to_string()) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.diag.span()?;
        let labeled =
            LabeledSpan::new_with_span(None, SourceSpan::from((span.start(), span.len())));
        Some(Box::new(std::iter::once(labeled)))
    }
}

/// A renderable diagnostic: either a parser diagnostic with source spans, or
/// a plain message for every other error kind.
pub enum Reportable<'a> {
    /// A parser diagnostic with source attached.
    Spanned(DiagnosticAdapter<'a>),
    /// A plain error message.
    Message(String),
}

impl fmt::Debug for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Spanned(adapter) => fmt::Debug::fmt(adapter, f),
            Reportable::Message(message) => write!(f, "Reportable::Message({message:?})"),
        }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Spanned(adapter) => fmt::Display::fmt(adapter, f),
            Reportable::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for Reportable<'_> {}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Spanned(adapter) => adapter.code(),
            Reportable::Message(_) => None,
        }
    }

    fn severity(&self) -> Option<Severity> {
        match self {
            Reportable::Spanned(adapter) => adapter.severity(),
            Reportable::Message(_) => Some(Severity::Error),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Spanned(adapter) => adapter.help(),
            Reportable::Message(_) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Spanned(adapter) => adapter.source_code(),
            Reportable::Message(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Spanned(adapter) => adapter.labels(),
            Reportable::Message(_) => None,
        }
    }
}

/// Expand an [`EscapementError`] into independently renderable diagnostics.
///
/// Parse errors expand into one [`Reportable`] per diagnostic so each gets
/// its own labeled source snippet; every other error becomes a single plain
/// message.
pub fn to_reportables(err: &EscapementError) -> Vec<Reportable<'_>> {
    match err {
        EscapementError::Parse { err, src } => err
            .diagnostics()
            .iter()
            .map(|diag| Reportable::Spanned(DiagnosticAdapter::new(diag, src)))
            .collect(),
        other => vec![Reportable::Message(other.to_string())],
    }
}
