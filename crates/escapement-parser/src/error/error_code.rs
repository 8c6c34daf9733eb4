//! Stable error codes for the diagnostic system.
//!
//! Codes are organized by phase:
//! - `E0xx` - lexical errors
//! - `E1xx` - syntax errors
//! - `E2xx` - semantic (elaboration) errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexical errors (E0xx)
    // =========================================================================
    /// Unterminated string literal.
    ///
    /// A quoted name was opened but never closed before the end of the line.
    E001,

    /// Invalid escape sequence.
    ///
    /// An unrecognized escape was used inside a quoted name. Valid escapes
    /// are `\"`, `\\`, `\n`, and `\t`.
    E002,

    // =========================================================================
    // Syntax errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    ///
    /// The parser encountered input it cannot interpret at this position.
    E100,

    /// Incomplete input.
    ///
    /// The source ended before a statement or block was finished.
    E101,

    /// Missing statement terminator.
    ///
    /// A statement must end with `;`.
    E102,

    // =========================================================================
    // Semantic errors (E2xx)
    // =========================================================================
    /// Unknown state reference.
    ///
    /// A transition or `active` designation names a state that was never
    /// declared.
    E200,

    /// Duplicate state name.
    ///
    /// Two declarations resolve to the same graph identifier.
    E201,

    /// Active child is not a member.
    ///
    /// An `active` designation names a state outside the superstate's body.
    E202,

    /// Active child is a superstate.
    ///
    /// Edge anchors must be plain states.
    E203,

    /// Misplaced `machine` header.
    ///
    /// The `machine` statement may only appear once, before anything else.
    E204,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_code_name() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E204.to_string(), "E204");
    }
}
