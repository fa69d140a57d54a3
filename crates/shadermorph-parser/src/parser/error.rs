//! Parse error types.

use shadermorph_ast::Span;
use shadermorph_lexer::Token;
use std::fmt;

/// Parse error with source location and context.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Kind of parse error
    pub kind: ParseErrorKind,
    /// Source location where error occurred
    pub span: Span,
    /// Human-readable error message
    pub message: String,
}

/// Category of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A token other than the one the grammar requires here.
    ///
    /// Example: `int A[5;` (expected `]`, found `;`).
    UnexpectedToken,

    /// Input ended inside an unfinished construct.
    ///
    /// Example: `void main() { int x;` (missing `}`).
    UnexpectedEof,

    /// Tokens are well-formed but the construct is not.
    ///
    /// Example: `1 = x;` (assignment to a non-lvalue form).
    InvalidSyntax,

    /// Source text the lexer could not turn into a token.
    ///
    /// Example: a stray `@` or an out-of-range integer literal.
    Lexical,
}

impl ParseError {
    fn mismatch(found_token: bool, message: String, span: Span) -> Self {
        let kind = if found_token {
            ParseErrorKind::UnexpectedToken
        } else {
            ParseErrorKind::UnexpectedEof
        };
        Self { kind, span, message }
    }

    /// `expected ';', found '}'`
    pub fn expected_token(expected: Token, found: Option<Token>, span: Span) -> Self {
        let message = match &found {
            Some(token) => format!("expected '{expected}', found '{token}'"),
            None => format!("expected '{expected}', found end of input"),
        };
        Self::mismatch(found.is_some(), message, span)
    }

    /// `unexpected ')' in declaration`
    pub fn unexpected_token(found: Option<&Token>, context: &str, span: Span) -> Self {
        let message = match found {
            Some(token) => format!("unexpected '{token}' {context}"),
            None => format!("unexpected end of input {context}"),
        };
        Self::mismatch(found.is_some(), message, span)
    }

    /// Well-formed tokens that do not make a valid construct.
    pub fn invalid_syntax(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::InvalidSyntax,
            span,
            message: message.into(),
        }
    }

    /// Source text that is not a token.
    pub fn lexical(text: &str, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::Lexical,
            span,
            message: format!("unrecognized input '{text}'"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}..{}", self.message, self.span.start, self.span.end)
    }
}

impl std::error::Error for ParseError {}
