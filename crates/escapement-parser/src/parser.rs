//! Parser for machine description source text.
//!
//! The grammar is statement-oriented: declarations and transitions end with
//! `;`, superstate and action bodies are `{ ... }` blocks, and `//` starts a
//! line comment. Parsing is a single winnow pass over the source with byte
//! spans preserved on every name; the public entry point is
//! [`parse_statements`].

use winnow::{
    Parser,
    ascii::multispace1,
    combinator::{alt, cut_err, delimited, eof, opt, preceded, repeat, separated, terminated},
    error::{ContextError, ModalResult},
    stream::LocatingSlice,
    token::{none_of, take_till, take_while},
};

use crate::{
    ast::{DecisionDecl, StateDecl, Stmt, SuperDecl, SuperItem, TransitionDecl},
    error::{Diagnostic, ErrorCode, ParseError},
    span::{Span, Spanned},
};

/// Rich diagnostic information attached to parser errors at commit points.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParseContext {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
}

type Input<'src> = LocatingSlice<&'src str>;
type IResult<O> = ModalResult<O, ContextError<ParseContext>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActionKind {
    Entry,
    Exit,
}

/// Parse a `//` comment up to the end of the line.
fn line_comment(input: &mut Input<'_>) -> IResult<()> {
    ("//", take_till(0.., ['\n', '\r'])).void().parse_next(input)
}

/// Parse one run of whitespace or one comment.
fn ws(input: &mut Input<'_>) -> IResult<()> {
    alt((multispace1.void(), line_comment)).parse_next(input)
}

/// Parse zero or more runs of whitespace/comments.
fn ws0(input: &mut Input<'_>) -> IResult<()> {
    repeat(0.., ws).parse_next(input)
}

/// Parse a bare identifier: `[A-Za-z_][A-Za-z0-9_]*`.
fn identifier<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_')
        .verify(|text: &str| !text.starts_with(|c: char| c.is_ascii_digit()))
        .parse_next(input)
}

/// Parse a specific bare word.
///
/// Built on [`identifier`] so that `statename` never matches the keyword
/// `state`.
fn keyword<'src>(word: &'static str) -> impl FnMut(&mut Input<'src>) -> IResult<()> {
    move |input: &mut Input<'src>| {
        identifier
            .verify(move |text: &str| text == word)
            .void()
            .parse_next(input)
    }
}

/// Parse one character inside a quoted name.
fn string_character(input: &mut Input<'_>) -> IResult<char> {
    alt((
        none_of(['"', '\\', '\n', '\r']),
        preceded(
            '\\',
            cut_err(
                alt((
                    '"'.value('"'),
                    '\\'.value('\\'),
                    'n'.value('\n'),
                    't'.value('\t'),
                ))
                .context(ParseContext {
                    code: ErrorCode::E002,
                    message: "invalid escape sequence",
                    help: Some(r#"valid escapes are \", \\, \n, and \t"#),
                }),
            ),
        ),
    ))
    .parse_next(input)
}

/// Parse a quoted name: `"..."` with a small set of escapes.
fn string_literal(input: &mut Input<'_>) -> IResult<String> {
    preceded(
        '"',
        cut_err(terminated(
            repeat(0.., string_character),
            '"'.context(ParseContext {
                code: ErrorCode::E001,
                message: "unterminated string literal",
                help: Some("close the name with `\"`"),
            }),
        )),
    )
    .parse_next(input)
}

/// Parse a name: a bare identifier or a quoted string, with its span.
fn name(input: &mut Input<'_>) -> IResult<Spanned<String>> {
    alt((string_literal, identifier.map(str::to_string)))
        .with_span()
        .map(|(value, range)| Spanned::new(value, Span::from(range)))
        .parse_next(input)
}

/// Parse a statement terminator, allowing whitespace before it.
fn semicolon(input: &mut Input<'_>) -> IResult<()> {
    preceded(ws0, ';')
        .void()
        .context(ParseContext {
            code: ErrorCode::E102,
            message: "expected `;`",
            help: Some("statements end with a semicolon"),
        })
        .parse_next(input)
}

/// Parse `machine Name;`.
fn machine_stmt(input: &mut Input<'_>) -> IResult<Stmt> {
    preceded((keyword("machine"), ws0), cut_err(terminated(name, semicolon)))
        .map(Stmt::Machine)
        .parse_next(input)
}

/// Parse `entry action;` or `exit action;`.
fn action_stmt(input: &mut Input<'_>) -> IResult<(ActionKind, Spanned<String>)> {
    let kind = alt((
        keyword("entry").value(ActionKind::Entry),
        keyword("exit").value(ActionKind::Exit),
    ))
    .parse_next(input)?;
    let action = cut_err(terminated(preceded(ws0, name), semicolon)).parse_next(input)?;
    Ok((kind, action))
}

/// Parse the `{ entry ...; exit ...; }` body of a plain state.
fn action_block(input: &mut Input<'_>) -> IResult<Vec<(ActionKind, Spanned<String>)>> {
    preceded(
        ('{', ws0),
        cut_err(terminated(
            repeat(0.., terminated(action_stmt, ws0)),
            '}'.context(ParseContext {
                code: ErrorCode::E101,
                message: "unclosed state body",
                help: Some("close the block with `}`"),
            }),
        )),
    )
    .parse_next(input)
}

/// Parse `state Name;` or `state Name { ... }`.
fn state_decl(input: &mut Input<'_>) -> IResult<StateDecl> {
    preceded((keyword("state"), ws0), cut_err(state_decl_tail)).parse_next(input)
}

fn state_decl_tail(input: &mut Input<'_>) -> IResult<StateDecl> {
    let state_name = name.parse_next(input)?;
    ws0.parse_next(input)?;
    let actions = alt((';'.value(Vec::new()), action_block))
        .context(ParseContext {
            code: ErrorCode::E100,
            message: "expected `;` or `{` after state name",
            help: None,
        })
        .parse_next(input)?;

    let mut decl = StateDecl {
        name: state_name,
        entry_actions: Vec::new(),
        exit_actions: Vec::new(),
    };
    for (kind, action) in actions {
        match kind {
            ActionKind::Entry => decl.entry_actions.push(action),
            ActionKind::Exit => decl.exit_actions.push(action),
        }
    }
    Ok(decl)
}

/// Parse `superstate Name { ... }`.
fn super_decl(input: &mut Input<'_>) -> IResult<SuperDecl> {
    preceded((keyword("superstate"), ws0), cut_err(super_decl_tail)).parse_next(input)
}

fn super_decl_tail(input: &mut Input<'_>) -> IResult<SuperDecl> {
    let super_name = name.parse_next(input)?;
    ws0.parse_next(input)?;
    let items = preceded(
        (
            '{'.context(ParseContext {
                code: ErrorCode::E100,
                message: "expected `{` after superstate name",
                help: Some("superstates always have a body"),
            }),
            ws0,
        ),
        terminated(
            repeat(0.., terminated(super_item, ws0)),
            '}'.context(ParseContext {
                code: ErrorCode::E101,
                message: "unclosed superstate body",
                help: Some("close the block with `}`"),
            }),
        ),
    )
    .parse_next(input)?;
    Ok(SuperDecl {
        name: super_name,
        items,
    })
}

/// Parse one item of a superstate body.
fn super_item(input: &mut Input<'_>) -> IResult<SuperItem> {
    alt((
        state_decl.map(SuperItem::State),
        super_decl.map(SuperItem::SuperState),
        preceded((keyword("active"), ws0), cut_err(terminated(name, semicolon)))
            .map(SuperItem::Active),
        action_stmt.map(|(kind, action)| match kind {
            ActionKind::Entry => SuperItem::EntryAction(action),
            ActionKind::Exit => SuperItem::ExitAction(action),
        }),
    ))
    .parse_next(input)
}

/// Parse `decision Name "label";`.
fn decision_stmt(input: &mut Input<'_>) -> IResult<Stmt> {
    preceded((keyword("decision"), ws0), cut_err(decision_tail)).parse_next(input)
}

fn decision_tail(input: &mut Input<'_>) -> IResult<Stmt> {
    let decision_name = name.parse_next(input)?;
    let label = opt(preceded(ws0, name)).parse_next(input)?;
    semicolon.parse_next(input)?;
    Ok(Stmt::Decision(DecisionDecl {
        name: decision_name,
        label,
    }))
}

/// Parse `[guard text]`.
fn guard(input: &mut Input<'_>) -> IResult<Spanned<String>> {
    delimited(
        '[',
        cut_err(
            take_while(1.., |c: char| !matches!(c, ']' | '\n' | '\r')).context(ParseContext {
                code: ErrorCode::E100,
                message: "empty guard clause",
                help: Some("write the guard condition between the brackets"),
            }),
        ),
        cut_err(']'.context(ParseContext {
            code: ErrorCode::E101,
            message: "unclosed guard clause",
            help: Some("close the guard with `]`"),
        })),
    )
    .map(|text: &str| text.trim().to_string())
    .with_span()
    .map(|(value, range)| Spanned::new(value, Span::from(range)))
    .parse_next(input)
}

type LabelParts = (
    Option<Spanned<String>>,
    Vec<Spanned<String>>,
    Vec<Spanned<String>>,
);

/// Parse the `trigger / actions [guards]` section of a transition label.
fn transition_label_parts(input: &mut Input<'_>) -> IResult<LabelParts> {
    let trigger = opt(name).parse_next(input)?;
    ws0.parse_next(input)?;
    let actions = opt(preceded(
        ('/', ws0),
        separated(1.., name, (ws0, ',', ws0)),
    ))
    .parse_next(input)?;
    ws0.parse_next(input)?;
    let guards = repeat(0.., terminated(guard, ws0)).parse_next(input)?;
    Ok((trigger, actions.unwrap_or_default(), guards))
}

/// Parse `Source -> Target : label;`.
fn transition_stmt(input: &mut Input<'_>) -> IResult<Stmt> {
    let source = terminated(name, (ws0, "->")).parse_next(input)?;
    let (target, label) = cut_err(|input: &mut Input<'_>| {
        ws0.parse_next(input)?;
        let target = name.parse_next(input)?;
        ws0.parse_next(input)?;
        let label = opt(preceded((':', ws0), transition_label_parts)).parse_next(input)?;
        semicolon.parse_next(input)?;
        Ok((target, label))
    })
    .parse_next(input)?;

    let (trigger, actions, guards) = label.unwrap_or_default();
    Ok(Stmt::Transition(TransitionDecl {
        source,
        target,
        trigger,
        actions,
        guards,
    }))
}

/// Parse one statement of any kind.
fn statement(input: &mut Input<'_>) -> IResult<Stmt> {
    alt((
        machine_stmt,
        state_decl.map(Stmt::State),
        super_decl.map(Stmt::SuperState),
        decision_stmt,
        transition_stmt,
    ))
    .parse_next(input)
}

/// Parse a whole source file.
fn statements(input: &mut Input<'_>) -> IResult<Vec<Stmt>> {
    delimited(ws0, repeat(0.., terminated(statement, ws0)), eof).parse_next(input)
}

/// Parses source text into statements, or one diagnostic describing the
/// first syntax problem.
pub(crate) fn parse_statements(source: &str) -> Result<Vec<Stmt>, ParseError> {
    match statements.parse(LocatingSlice::new(source)) {
        Ok(stmts) => Ok(stmts),
        Err(err) => {
            let offset = err.offset().min(source.len());
            let end = source[offset..]
                .chars()
                .next()
                .map(|c| offset + c.len_utf8())
                .unwrap_or(offset);
            let span = Span::new(offset, end);

            let context = err.inner().context().next().cloned();
            let diagnostic = match context {
                Some(ctx) => {
                    let mut diagnostic = Diagnostic::error(ctx.message)
                        .with_code(ctx.code)
                        .with_span(span);
                    if let Some(help) = ctx.help {
                        diagnostic = diagnostic.with_help(help);
                    }
                    diagnostic
                }
                None if offset >= source.len() => Diagnostic::error("unexpected end of input")
                    .with_code(ErrorCode::E101)
                    .with_span(span),
                None => Diagnostic::error("unexpected token")
                    .with_code(ErrorCode::E100)
                    .with_span(span),
            };
            Err(ParseError::from(diagnostic))
        }
    }
}
