//! Identifier management using string interning for efficient storage and comparison.
//!
//! This module provides the [`Id`] type used for node identity throughout the
//! structural model. Interning makes identifiers `Copy` and makes equality a
//! symbol comparison rather than a string comparison.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner backing every [`Id`].
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> &'static Mutex<DefaultStringInterner> {
    INTERNER.get_or_init(|| Mutex::new(DefaultStringInterner::new()))
}

/// Efficient identifier type using string interning.
///
/// An `Id` names a node in the graph-description output, so it must only
/// contain characters that are legal in a graph identifier. Use
/// [`Id::graph_safe`] to derive an identifier from free-form display text,
/// or [`Id::new`] when the text is already known to be safe.
///
/// # Examples
///
/// ```
/// use escapement_core::identifier::Id;
///
/// let idle = Id::new("Idle");
/// assert_eq!(idle, "Idle");
///
/// // Display names may contain characters a graph identifier cannot.
/// let on_hold = Id::graph_safe("On Hold");
/// assert_eq!(on_hold, "On_Hold");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a string that is already identifier-safe.
    pub fn new(name: &str) -> Self {
        let mut interner = interner().lock().expect("Failed to acquire interner lock");
        Self(interner.get_or_intern(name))
    }

    /// Derives a graph-identifier-safe `Id` from a display name.
    ///
    /// Every character outside `[A-Za-z0-9_]` maps to `_`, and a leading
    /// digit gets a `_` prefix. A display name that is already safe produces
    /// an identifier with the same text.
    ///
    /// # Examples
    ///
    /// ```
    /// use escapement_core::identifier::Id;
    ///
    /// assert_eq!(Id::graph_safe("Ringing?"), "Ringing_");
    /// assert_eq!(Id::graph_safe("2nd Gear"), "_2nd_Gear");
    /// assert_eq!(Id::graph_safe("Idle"), "Idle");
    /// ```
    pub fn graph_safe(name: &str) -> Self {
        let mut safe = String::with_capacity(name.len());
        for c in name.chars() {
            if c.is_ascii_alphanumeric() || c == '_' {
                safe.push(c);
            } else {
                safe.push('_');
            }
        }
        if safe.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            safe.insert(0, '_');
        }
        Self::new(&safe)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{}", str_value)
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice.
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for Id {
    /// Allows direct comparison with string references: `id == name`
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
