//! Parsed statements of the machine description language.
//!
//! The AST is a flat list of statements in source order; nesting only occurs
//! inside superstate bodies. Names keep their source spans so elaboration
//! can attach semantic diagnostics to the right text.

use crate::span::Spanned;

/// One top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `machine Name;` names the machine; must be the first statement.
    Machine(Spanned<String>),
    /// `state Name;` or `state Name { entry a; exit b; }`
    State(StateDecl),
    /// `superstate Name { ... }`
    SuperState(SuperDecl),
    /// `decision Name "label";`
    Decision(DecisionDecl),
    /// `Source -> Target : trigger / actions [guards];`
    Transition(TransitionDecl),
}

/// A plain state declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDecl {
    pub name: Spanned<String>,
    pub entry_actions: Vec<Spanned<String>>,
    pub exit_actions: Vec<Spanned<String>>,
}

/// A superstate declaration with its body items in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperDecl {
    pub name: Spanned<String>,
    pub items: Vec<SuperItem>,
}

/// One item inside a superstate body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuperItem {
    /// A nested plain state.
    State(StateDecl),
    /// A nested superstate.
    SuperState(SuperDecl),
    /// `active Child;` designates the last-active child.
    Active(Spanned<String>),
    /// `entry action;`, an entry action of the superstate itself.
    EntryAction(Spanned<String>),
    /// `exit action;`, an exit action of the superstate itself.
    ExitAction(Spanned<String>),
}

/// A decision-node declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionDecl {
    pub name: Spanned<String>,
    /// The displayed label; defaults to the name when absent.
    pub label: Option<Spanned<String>>,
}

/// A transition declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionDecl {
    pub source: Spanned<String>,
    pub target: Spanned<String>,
    pub trigger: Option<Spanned<String>>,
    pub actions: Vec<Spanned<String>>,
    pub guards: Vec<Spanned<String>>,
}
