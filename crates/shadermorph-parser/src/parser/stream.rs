//! Token stream wrapper for the recursive descent parser.

use shadermorph_ast::{Expr, ExprIdGen, ExprKind, Span};
use shadermorph_lexer::Token;
use std::ops::Range;

use super::ParseError;

/// Token stream with lookahead, position tracking and expression id
/// allocation.
///
/// Each token is paired with its byte span from the source, so nodes and
/// errors point at real source locations.
pub struct TokenStream<'src> {
    tokens: &'src [(Token, Range<usize>)],
    pos: usize,
    file_id: u16,
    ids: ExprIdGen,
}

impl<'src> TokenStream<'src> {
    /// Create a new token stream from tokens with their byte spans.
    pub fn new(tokens: &'src [(Token, Range<usize>)], file_id: u16) -> Self {
        Self {
            tokens,
            pos: 0,
            file_id,
            ids: ExprIdGen::new(),
        }
    }

    /// Peek at the current token without consuming it.
    pub fn peek(&self) -> Option<&'src Token> {
        self.tokens.get(self.pos).map(|(tok, _)| tok)
    }

    /// Peek at the nth token ahead without consuming.
    pub fn peek_nth(&self, n: usize) -> Option<&'src Token> {
        self.tokens.get(self.pos + n).map(|(tok, _)| tok)
    }

    /// Advance to the next token and return the current one.
    pub fn advance(&mut self) -> Option<&'src Token> {
        let token = self.tokens.get(self.pos).map(|(tok, _)| tok);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Check if the current token matches the expected token.
    ///
    /// Only the variant is compared, not any payload.
    pub fn check(&self, expected: &Token) -> bool {
        matches!(self.peek(), Some(t) if std::mem::discriminant(t) == std::mem::discriminant(expected))
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Expect a specific token and advance if it matches.
    pub fn expect(&mut self, expected: Token) -> Result<Span, ParseError> {
        if self.check(&expected) {
            let start = self.pos;
            self.advance();
            Ok(self.span_from(start))
        } else {
            Err(ParseError::expected_token(
                expected,
                self.peek().cloned(),
                self.current_span(),
            ))
        }
    }

    /// Expect an identifier and return its name.
    pub fn expect_ident(&mut self, context: &str) -> Result<std::rc::Rc<str>, ParseError> {
        let span = self.current_span();
        match self.advance() {
            Some(Token::Ident(name)) => Ok(name.clone()),
            other => Err(ParseError::unexpected_token(other, context, span)),
        }
    }

    /// Check if we've reached the end of the token stream.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Get the current position in the token stream.
    pub fn current_pos(&self) -> usize {
        self.pos
    }

    /// Span from the token at `start` to the last consumed token.
    pub fn span_from(&self, start: usize) -> Span {
        let start_byte = match self.tokens.get(start) {
            Some((_, range)) => range.start,
            None => return self.current_span(),
        };
        let end_byte = match self.pos.checked_sub(1).and_then(|last| self.tokens.get(last)) {
            Some((_, range)) if self.pos > start => range.end,
            _ => start_byte,
        };
        Span::new(self.file_id, start_byte as u32, end_byte as u32)
    }

    /// Span of the current token, or an empty span at end of input.
    pub fn current_span(&self) -> Span {
        if let Some((_, range)) = self.tokens.get(self.pos) {
            Span::new(self.file_id, range.start as u32, range.end as u32)
        } else if let Some((_, range)) = self.tokens.last() {
            Span::new(self.file_id, range.end as u32, range.end as u32)
        } else {
            Span::zero(self.file_id)
        }
    }

    /// Build an expression node with a fresh id.
    pub fn make_expr(&mut self, kind: ExprKind, span: Span) -> Expr {
        Expr::new(self.ids.fresh(), kind, span)
    }

    /// Hand over the id allocator once parsing is done.
    pub fn into_ids(self) -> ExprIdGen {
        self.ids
    }

    /// Skip past the end of the current top-level construct for error
    /// recovery.
    ///
    /// Stops after a `;` or a `}` that closes the nesting opened since the
    /// error, or before a preprocessor directive.
    pub fn synchronize(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            match token {
                Token::Directive(_) if depth == 0 => break,
                Token::LBrace => depth += 1,
                Token::RBrace => {
                    self.advance();
                    if depth <= 1 {
                        return;
                    }
                    depth -= 1;
                    continue;
                }
                Token::Semicolon if depth == 0 => {
                    self.advance();
                    return;
                }
                _ => {}
            }
            self.advance();
        }
    }
}
