//! Error types for builtin template parsing

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    #[error("Parse error at {span:?}: unclosed tag, expected '}}}}'")]
    Unclosed { span: Span },
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            ParseError::Syntax { span, .. } | ParseError::Unclosed { span } => span,
        }
    }

    /// Shift the error location by `by` bytes
    pub(crate) fn offset(self, by: usize) -> Self {
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => ParseError::Syntax {
                span: span.start + by..span.end + by,
                message,
                expected,
            },
            ParseError::Unclosed { span } => ParseError::Unclosed {
                span: span.start + by..span.end + by,
            },
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (message, note) = match self {
            ParseError::Syntax {
                message, expected, ..
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };
                (message.clone(), format!("{}{}", message, expected_str))
            }
            ParseError::Unclosed { .. } => (
                "unclosed tag".to_string(),
                "this tag is never closed with '}}'".to_string(),
            ),
        };

        // ariadne counts characters, spans here are bytes
        let span = char_span(source, self.span());

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(note)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{}: {}", filename, self),
        }
    }
}

fn char_span(source: &str, span: &Span) -> Span {
    let clamp = |at: usize| {
        let mut at = at.min(source.len());
        while !source.is_char_boundary(at) {
            at -= 1;
        }
        source[..at].chars().count()
    };
    clamp(span.start)..clamp(span.end)
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        let message = match err.found() {
            Some(tok) => format!("Unexpected {}", format_token(tok)),
            None => "Unexpected end of tag".to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("'}}'".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    match tok {
        Token::Dot => "'.'".to_string(),
        Token::Ident(s) => format!("identifier '{}'", s),
        Token::Invalid(s) => format!("character '{}'", s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_shifts_span() {
        let err = ParseError::Unclosed { span: 0..2 }.offset(10);
        assert_eq!(err.span(), &(10..12));
    }

    #[test]
    fn test_char_span_counts_characters() {
        let source = "饂饂{{ 1 }}";
        // "饂饂" is 6 bytes, 2 characters
        assert_eq!(char_span(source, &(6..12)), 2..8);
    }

    #[test]
    fn test_format_includes_filename_and_message() {
        let source = "sha={{ ink";
        let err = ParseError::Unclosed { span: 4..10 };
        let report = err.format(source, "template.txt.in");
        assert!(report.contains("template.txt.in"));
        assert!(report.contains("unclosed tag"));
    }
}
