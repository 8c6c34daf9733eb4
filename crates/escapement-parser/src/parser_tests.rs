//! Unit tests for the machine description parser and elaborator.
//!
//! These tests verify that every language construct parses, that the
//! elaborated graph has the right shape, and that malformed input produces
//! diagnostics with the right codes and spans.

use escapement_core::{
    graph::{StateGraph, StateNode},
    identifier::Id,
};

use crate::error::{ErrorCode, ParseError};

/// Helper to parse a source string into a graph.
fn parse_source(source: &str) -> Result<StateGraph, ParseError> {
    crate::parse(source)
}

/// Helper to parse a source string and assert success.
fn assert_parses_successfully(source: &str) -> StateGraph {
    match parse_source(source) {
        Ok(graph) => graph,
        Err(err) => panic!("Expected parsing to succeed, but got error: {}", err),
    }
}

/// Helper to parse a source string and assert failure, returning the error.
fn assert_parse_fails(source: &str) -> ParseError {
    match parse_source(source) {
        Ok(_) => panic!("Expected parsing to fail, but it succeeded"),
        Err(err) => err,
    }
}

/// Helper to fetch the code of the first diagnostic.
fn first_code(err: &ParseError) -> Option<ErrorCode> {
    err.diagnostics().first().and_then(|diag| diag.code())
}

// =========================================================================
// Accepted input
// =========================================================================

#[test]
fn test_empty_source() {
    let graph = assert_parses_successfully("");
    assert_eq!(graph.node_count(), 0);
}

#[test]
fn test_whitespace_and_comments_only() {
    let graph = assert_parses_successfully("  // nothing here\n\n  // or here\n");
    assert_eq!(graph.node_count(), 0);
}

#[test]
fn test_machine_header() {
    let graph = assert_parses_successfully("machine TrafficLight;");
    assert_eq!(graph.name(), Some("TrafficLight"));
}

#[test]
fn test_bare_state() {
    let graph = assert_parses_successfully("state Idle;");
    assert_eq!(graph.node_count(), 1);
    assert!(matches!(
        graph.node(Id::new("Idle")),
        Some(StateNode::Plain(_))
    ));
}

#[test]
fn test_state_with_actions() {
    let graph = assert_parses_successfully(
        "state Open {
            entry logOpen;
            exit logClose;
            entry beep;
        }",
    );
    let Some(StateNode::Plain(state)) = graph.node(Id::new("Open")) else {
        panic!("Open should be a plain state");
    };
    assert_eq!(state.entry_actions(), ["logOpen", "beep"]);
    assert_eq!(state.exit_actions(), ["logClose"]);
}

#[test]
fn test_quoted_state_name() {
    let graph = assert_parses_successfully(r#"state "On Hold";"#);
    let Some(StateNode::Plain(state)) = graph.node(Id::new("On_Hold")) else {
        panic!("quoted state should be registered under its sanitized name");
    };
    assert_eq!(state.display_name(), "On Hold");
}

#[test]
fn test_string_escapes() {
    let graph = assert_parses_successfully(r#"state "Say \"hi\"";"#);
    let state = graph.nodes().next().expect("one state");
    assert_eq!(state.display_name(), "Say \"hi\"");
}

#[test]
fn test_superstate_with_active_child() {
    let graph = assert_parses_successfully(
        "superstate Active {
            state Running;
            state Paused;
            active Running;
        }",
    );
    let Some(StateNode::Compound(superstate)) = graph.node(Id::new("Active")) else {
        panic!("Active should be a superstate");
    };
    assert_eq!(superstate.children(), [Id::new("Running"), Id::new("Paused")]);
    assert_eq!(superstate.last_active(), Some(Id::new("Running")));
}

#[test]
fn test_active_may_precede_its_child() {
    let graph = assert_parses_successfully(
        "superstate Active {
            active Running;
            state Running;
        }",
    );
    let Some(StateNode::Compound(superstate)) = graph.node(Id::new("Active")) else {
        panic!("Active should be a superstate");
    };
    assert_eq!(superstate.last_active(), Some(Id::new("Running")));
}

#[test]
fn test_superstate_own_actions() {
    let graph = assert_parses_successfully(
        "superstate Connected {
            entry startBilling;
            exit stopBilling;
            state Talking;
        }",
    );
    let Some(StateNode::Compound(superstate)) = graph.node(Id::new("Connected")) else {
        panic!("Connected should be a superstate");
    };
    assert_eq!(superstate.state().entry_actions(), ["startBilling"]);
    assert_eq!(superstate.state().exit_actions(), ["stopBilling"]);
}

#[test]
fn test_nested_superstates() {
    let graph = assert_parses_successfully(
        "superstate Outer {
            superstate Inner {
                state Leaf;
                active Leaf;
            }
        }",
    );
    assert_eq!(graph.node_count(), 3);
    let Some(StateNode::Compound(outer)) = graph.node(Id::new("Outer")) else {
        panic!("Outer should be a superstate");
    };
    assert_eq!(outer.children(), [Id::new("Inner")]);
}

#[test]
fn test_decision_with_label() {
    let graph = assert_parses_successfully(r#"decision CheckFuel "fuel ok?";"#);
    let Some(StateNode::Decision(decision)) = graph.node(Id::new("CheckFuel")) else {
        panic!("CheckFuel should be a decision node");
    };
    assert_eq!(decision.label(), "fuel ok?");
}

#[test]
fn test_decision_label_defaults_to_name() {
    let graph = assert_parses_successfully("decision CheckFuel;");
    let Some(StateNode::Decision(decision)) = graph.node(Id::new("CheckFuel")) else {
        panic!("CheckFuel should be a decision node");
    };
    assert_eq!(decision.label(), "CheckFuel");
}

#[test]
fn test_bare_transition() {
    let graph = assert_parses_successfully("state A; state B; A -> B;");
    assert_eq!(graph.transition_count(), 1);
    let transition = &graph.transitions()[0];
    assert_eq!(transition.trigger(), None);
    assert!(transition.actions().is_empty());
    assert!(transition.guards().is_empty());
}

#[test]
fn test_transition_with_full_label() {
    let graph = assert_parses_successfully(
        "state A; state B;
         A -> B : go / m1, m2 [g1] [g 2];",
    );
    let transition = &graph.transitions()[0];
    assert_eq!(transition.trigger(), Some("go"));
    assert_eq!(transition.actions(), ["m1", "m2"]);
    assert_eq!(transition.guards(), ["g1", "g 2"]);
}

#[test]
fn test_transition_actions_without_trigger() {
    let graph = assert_parses_successfully("state A; state B; A -> B : / beep;");
    let transition = &graph.transitions()[0];
    assert_eq!(transition.trigger(), None);
    assert_eq!(transition.actions(), ["beep"]);
}

#[test]
fn test_transition_guard_only() {
    let graph = assert_parses_successfully("state A; state B; A -> B : [armed];");
    let transition = &graph.transitions()[0];
    assert_eq!(transition.trigger(), None);
    assert_eq!(transition.guards(), ["armed"]);
}

#[test]
fn test_transition_may_precede_declarations() {
    let graph = assert_parses_successfully("A -> B : go; state A; state B;");
    assert_eq!(graph.transition_count(), 1);
}

#[test]
fn test_transition_endpoints_accept_quoted_names() {
    let graph = assert_parses_successfully(r#"state "On Hold"; state B; "On Hold" -> B;"#);
    let transition = &graph.transitions()[0];
    assert_eq!(transition.source(), Id::new("On_Hold"));
}

// =========================================================================
// Rejected input
// =========================================================================

#[test]
fn test_missing_semicolon() {
    let err = assert_parse_fails("machine Motor");
    assert_eq!(first_code(&err), Some(ErrorCode::E102));
}

#[test]
fn test_unterminated_string() {
    let err = assert_parse_fails(r#"state "Idle;"#);
    assert_eq!(first_code(&err), Some(ErrorCode::E001));
}

#[test]
fn test_invalid_escape() {
    let err = assert_parse_fails(r#"state "a\qb";"#);
    assert_eq!(first_code(&err), Some(ErrorCode::E002));
}

#[test]
fn test_unclosed_superstate_body() {
    let err = assert_parse_fails("superstate Active { state Running;");
    assert_eq!(first_code(&err), Some(ErrorCode::E101));
}

#[test]
fn test_garbage_input() {
    let err = assert_parse_fails("!!!");
    assert_eq!(first_code(&err), Some(ErrorCode::E100));
}

#[test]
fn test_unknown_transition_endpoint() {
    let err = assert_parse_fails("state A; A -> Missing;");
    assert_eq!(first_code(&err), Some(ErrorCode::E200));
}

#[test]
fn test_duplicate_state() {
    let err = assert_parse_fails("state Idle; state Idle;");
    assert_eq!(first_code(&err), Some(ErrorCode::E201));
}

#[test]
fn test_duplicate_after_sanitization() {
    let err = assert_parse_fails(r#"state "On Hold"; state On_Hold;"#);
    assert_eq!(first_code(&err), Some(ErrorCode::E201));
}

#[test]
fn test_active_child_not_member() {
    let err = assert_parse_fails(
        "state Outsider;
         superstate Active {
            state Running;
            active Outsider;
         }",
    );
    assert_eq!(first_code(&err), Some(ErrorCode::E202));
}

#[test]
fn test_active_child_is_superstate() {
    let err = assert_parse_fails(
        "superstate Active {
            superstate Inner { state Leaf; }
            active Inner;
         }",
    );
    assert_eq!(first_code(&err), Some(ErrorCode::E203));
}

#[test]
fn test_machine_header_not_first() {
    let err = assert_parse_fails("state Idle; machine Motor;");
    assert_eq!(first_code(&err), Some(ErrorCode::E204));
}

#[test]
fn test_semantic_errors_are_collected() {
    let err = assert_parse_fails("state Idle; state Idle; Idle -> Missing;");
    assert_eq!(err.diagnostics().len(), 2);
}

#[test]
fn test_diagnostics_carry_spans() {
    let source = "state A; A -> Missing;";
    let err = assert_parse_fails(source);
    let span = err.diagnostics()[0].span().expect("span should be present");
    assert!(span.start() < span.end());
    assert!(span.end() <= source.len());
}

#[test]
fn test_syntax_error_span_points_at_offending_text() {
    let source = "state Idle skip";
    let err = assert_parse_fails(source);
    let span = err.diagnostics()[0].span().expect("span should be present");
    assert_eq!(&source[span.start()..span.end()], "s");
}

// =========================================================================
// Properties
// =========================================================================

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn identifier_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-zA-Z0-9_]{0,10}"
    }

    /// Any single bare state declaration parses to a one-node graph.
    fn check_single_state_parses(state_name: String) -> Result<(), TestCaseError> {
        let source = format!("state {};", state_name);
        let graph = parse_source(&source)
            .map_err(|err| TestCaseError::fail(format!("parse failed: {err}")))?;
        prop_assert_eq!(graph.node_count(), 1);
        Ok(())
    }

    /// Words that open a statement and therefore cannot start a transition.
    const KEYWORDS: [&str; 7] = [
        "machine",
        "state",
        "superstate",
        "active",
        "entry",
        "exit",
        "decision",
    ];

    /// A declared pair of states can always be connected by a transition.
    fn check_transition_parses(
        source_name: String,
        target_name: String,
        trigger: String,
    ) -> Result<(), TestCaseError> {
        prop_assume!(source_name != target_name);
        prop_assume!(!KEYWORDS.contains(&source_name.as_str()));
        prop_assume!(!KEYWORDS.contains(&target_name.as_str()));
        let source = format!(
            "state {source_name}; state {target_name}; {source_name} -> {target_name} : {trigger};"
        );
        let graph = parse_source(&source)
            .map_err(|err| TestCaseError::fail(format!("parse failed: {err}")))?;
        prop_assert_eq!(graph.transition_count(), 1);
        Ok(())
    }

    proptest! {
        #[test]
        fn single_state_parses(state_name in identifier_strategy()) {
            check_single_state_parses(state_name)?;
        }

        #[test]
        fn transition_parses(
            source_name in identifier_strategy(),
            target_name in identifier_strategy(),
            trigger in identifier_strategy(),
        ) {
            check_transition_parses(source_name, target_name, trigger)?;
        }
    }
}
