//! Turns parsed statements into a validated state graph.
//!
//! Elaboration walks the AST twice: declarations first, then transitions, so
//! a transition may appear anywhere relative to the states it connects.
//! Model violations reported by the graph builder are converted into
//! diagnostics carrying the span of the offending name; elaboration keeps
//! going after an error so one pass reports as many problems as possible.

use escapement_core::{
    graph::{DecisionNode, GraphBuilder, GraphError, State, StateGraph, SuperState, Transition},
    identifier::Id,
};
use log::warn;

use crate::{
    ast::{DecisionDecl, StateDecl, Stmt, SuperDecl, SuperItem, TransitionDecl},
    error::{Diagnostic, ErrorCode, ParseError},
    span::Span,
};

pub(crate) fn elaborate(statements: &[Stmt]) -> Result<StateGraph, ParseError> {
    let mut builder = GraphBuilder::new();
    let mut diagnostics = Vec::new();

    for (index, statement) in statements.iter().enumerate() {
        match statement {
            Stmt::Machine(machine_name) => {
                if index == 0 {
                    builder.set_name(machine_name.inner().clone());
                } else {
                    diagnostics.push(
                        Diagnostic::error("`machine` header must be the first statement")
                            .with_code(ErrorCode::E204)
                            .with_span(machine_name.span()),
                    );
                }
            }
            Stmt::State(decl) => add_state(&mut builder, None, decl, &mut diagnostics),
            Stmt::SuperState(decl) => add_super_state(&mut builder, None, decl, &mut diagnostics),
            Stmt::Decision(decl) => add_decision(&mut builder, decl, &mut diagnostics),
            Stmt::Transition(_) => {}
        }
    }

    for statement in statements {
        if let Stmt::Transition(decl) = statement {
            add_transition(&mut builder, decl, &mut diagnostics);
        }
    }

    if diagnostics.is_empty() {
        Ok(builder.build())
    } else {
        Err(ParseError::new(diagnostics))
    }
}

fn build_state(decl: &StateDecl) -> State {
    let mut state = State::new(decl.name.inner().clone());
    for action in &decl.entry_actions {
        state = state.with_entry_action(action.inner().clone());
    }
    for action in &decl.exit_actions {
        state = state.with_exit_action(action.inner().clone());
    }
    state
}

fn add_state(
    builder: &mut GraphBuilder,
    parent: Option<Id>,
    decl: &StateDecl,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let state = build_state(decl);
    let result = match parent {
        Some(parent) => builder.add_child_state(parent, state),
        None => builder.add_state(state),
    };
    if let Err(err) = result {
        diagnostics.push(diagnostic_for(&err, decl.name.span()));
    }
}

fn add_super_state(
    builder: &mut GraphBuilder,
    parent: Option<Id>,
    decl: &SuperDecl,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut superstate = SuperState::new(decl.name.inner().clone());
    for item in &decl.items {
        match item {
            SuperItem::EntryAction(action) => {
                superstate = superstate.with_entry_action(action.inner().clone());
            }
            SuperItem::ExitAction(action) => {
                superstate = superstate.with_exit_action(action.inner().clone());
            }
            SuperItem::State(_) | SuperItem::SuperState(_) | SuperItem::Active(_) => {}
        }
    }

    let result = match parent {
        Some(parent) => builder.add_child_super_state(parent, superstate),
        None => builder.add_super_state(superstate),
    };
    let id = match result {
        Ok(id) => id,
        Err(err) => {
            diagnostics.push(diagnostic_for(&err, decl.name.span()));
            return;
        }
    };

    let mut has_children = false;
    for item in &decl.items {
        match item {
            SuperItem::State(child) => {
                has_children = true;
                add_state(builder, Some(id), child, diagnostics);
            }
            SuperItem::SuperState(child) => {
                has_children = true;
                add_super_state(builder, Some(id), child, diagnostics);
            }
            SuperItem::Active(_) | SuperItem::EntryAction(_) | SuperItem::ExitAction(_) => {}
        }
    }

    // Applied after the children so a designation may precede the child it
    // names inside the body.
    for item in &decl.items {
        if let SuperItem::Active(child) = item {
            let child_id = Id::graph_safe(child.inner());
            if let Err(err) = builder.set_last_active(id, child_id) {
                diagnostics.push(diagnostic_for(&err, child.span()));
            }
        }
    }

    if !has_children {
        warn!(
            superstate = decl.name.inner().as_str();
            "superstate has no children; edges will attach to its own identifier"
        );
    }
}

fn add_decision(builder: &mut GraphBuilder, decl: &DecisionDecl, diagnostics: &mut Vec<Diagnostic>) {
    let label = decl.label.as_ref().unwrap_or(&decl.name).inner().clone();
    let decision = DecisionNode::new(decl.name.inner(), label);
    if let Err(err) = builder.add_decision(decision) {
        diagnostics.push(diagnostic_for(&err, decl.name.span()));
    }
}

fn add_transition(
    builder: &mut GraphBuilder,
    decl: &TransitionDecl,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut transition = Transition::new(
        Id::graph_safe(decl.source.inner()),
        Id::graph_safe(decl.target.inner()),
    );
    if let Some(trigger) = &decl.trigger {
        transition = transition.with_trigger(trigger.inner().clone());
    }
    for action in &decl.actions {
        transition = transition.with_action(action.inner().clone());
    }
    for guard in &decl.guards {
        transition = transition.with_guard(guard.inner().clone());
    }
    if let Err(err) = builder.add_transition(transition) {
        diagnostics.push(diagnostic_for(
            &err,
            decl.source.span().union(decl.target.span()),
        ));
    }
}

fn diagnostic_for(err: &GraphError, span: Span) -> Diagnostic {
    let code = match err {
        GraphError::DuplicateState(_) => ErrorCode::E201,
        GraphError::UnknownState(_) | GraphError::NotASuperState(_) => ErrorCode::E200,
        GraphError::ActiveChildNotMember { .. } => ErrorCode::E202,
        GraphError::ActiveChildIsCompound { .. } => ErrorCode::E203,
    };
    Diagnostic::error(err.to_string())
        .with_code(code)
        .with_span(span)
}
