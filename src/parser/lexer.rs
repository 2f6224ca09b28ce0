//! Lexer for the inside of `{{ ... }}` tags using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    #[token(".")]
    Dot,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // Any other single character. Kept as a token so the parser can point at it.
    #[regex(r"[^ \t\n\r.a-zA-Z_]", |lex| lex.slice().to_string())]
    Invalid(String),
}

/// Lex the text between tag delimiters into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input).spanned().map(move |(tok, span)| match tok {
        Ok(t) => (t, span),
        Err(()) => (Token::Invalid(input[span.clone()].to_string()), span),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_access() {
        let tokens: Vec<_> = lex(".One").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Dot, Token::Ident("One".to_string())]);
    }

    #[test]
    fn test_whitespace_skipped() {
        let tokens: Vec<_> = lex("  ink\t\n").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Ident("ink".to_string())]);
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let spans: Vec<_> = lex(" . Ten").map(|(_, s)| s).collect();
        assert_eq!(spans, vec![1..2, 3..6]);
    }

    #[test]
    fn test_unexpected_characters() {
        let tokens: Vec<_> = lex("1 {").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Invalid("1".to_string()),
                Token::Invalid("{".to_string())
            ]
        );
    }

    #[test]
    fn test_non_ascii_is_invalid() {
        let tokens: Vec<_> = lex("饂").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Invalid("饂".to_string())]);
    }
}
