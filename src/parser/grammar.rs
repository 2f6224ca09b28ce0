//! Parser implementation: a delimiter scanner for the template body and a
//! chumsky parser for the inside of each tag

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::ParseError;
use crate::parser::ast::*;
use crate::parser::lexer::{self, Token};

const LEFT_DELIM: &str = "{{";
const RIGHT_DELIM: &str = "}}";

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// `{{- ` trims whitespace before the tag
fn has_left_trim(after_delim: &str) -> bool {
    let b = after_delim.as_bytes();
    b.len() >= 2 && b[0] == b'-' && is_space(b[1])
}

/// ` -}}` trims whitespace after the tag
fn has_right_trim(before_delim: &str) -> bool {
    let b = before_delim.as_bytes();
    b.len() >= 2 && b[b.len() - 1] == b'-' && is_space(b[b.len() - 2])
}

fn is_comment(inner: &str) -> bool {
    inner.len() >= 4 && inner.starts_with("/*") && inner.ends_with("*/")
}

fn push_text(nodes: &mut Vec<Node>, text: &str, trim_start: bool, trim_end: bool) {
    let mut text = text;
    if trim_start {
        text = text.trim_start_matches([' ', '\t', '\r', '\n']);
    }
    if trim_end {
        text = text.trim_end_matches([' ', '\t', '\r', '\n']);
    }
    if !text.is_empty() {
        nodes.push(Node::Text(text.to_string()));
    }
}

/// Parse a builtin template body
///
/// Every tag is parsed even after an earlier one fails, so all syntax errors
/// in the body are reported together. An unclosed tag ends the scan.
pub fn parse(input: &str) -> Result<Template, Vec<ParseError>> {
    let mut nodes = Vec::new();
    let mut errors = Vec::new();
    let mut pos = 0;
    let mut trim_next = false;

    while pos < input.len() {
        let Some(rel_open) = input[pos..].find(LEFT_DELIM) else {
            push_text(&mut nodes, &input[pos..], trim_next, false);
            break;
        };
        let open = pos + rel_open;
        let mut inner_start = open + LEFT_DELIM.len();
        let trim_left = has_left_trim(&input[inner_start..]);
        if trim_left {
            inner_start += 2;
        }
        push_text(&mut nodes, &input[pos..open], trim_next, trim_left);

        let Some(rel_close) = input[inner_start..].find(RIGHT_DELIM) else {
            errors.push(ParseError::Unclosed {
                span: open..input.len(),
            });
            break;
        };
        let close = inner_start + rel_close;
        let trim_right = has_right_trim(&input[inner_start..close]);
        let inner_end = if trim_right { close - 2 } else { close };
        let tag_span = open..close + RIGHT_DELIM.len();

        let inner = &input[inner_start..inner_end];
        if !is_comment(inner) {
            match parse_action(inner, inner_start, tag_span.clone()) {
                Ok(action) => nodes.push(Node::Action(Spanned::new(action, tag_span))),
                Err(errs) => errors.extend(errs),
            }
        }

        trim_next = trim_right;
        pos = close + RIGHT_DELIM.len();
    }

    if errors.is_empty() {
        Ok(Template { nodes })
    } else {
        Err(errors)
    }
}

/// Parse the text between the delimiters of one tag
fn parse_action(inner: &str, offset: usize, tag_span: Span) -> Result<Action, Vec<ParseError>> {
    if inner.trim().is_empty() {
        return Err(vec![ParseError::Syntax {
            span: tag_span,
            message: "Empty tag".to_string(),
            expected: vec!["'.'".to_string(), "function name".to_string()],
        }]);
    }

    let len = inner.len();
    let token_iter = lexer::lex(inner).map(|(tok, span)| (tok, span.into()));

    let token_stream = Stream::from_iter(token_iter)
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    action_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| {
            errs.into_iter()
                .map(|e| ParseError::from(e).offset(offset))
                .collect()
        })
}

fn action_parser<'a, I>() -> impl Parser<'a, I, Action, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let identifier = select! {
        Token::Ident(s) => s,
    };

    let field = just(Token::Dot)
        .ignore_then(identifier.clone())
        .map(Action::Field);

    let call = identifier.map(Action::Call);

    choice((field, call)).then_ignore(end())
}
