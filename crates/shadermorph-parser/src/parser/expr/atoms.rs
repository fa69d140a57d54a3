//! Atomic expressions - literals, identifiers, calls, parenthesized expressions.

use super::super::{ParseError, TokenStream};
use shadermorph_ast::{Expr, ExprKind, Literal};
use shadermorph_lexer::Token;

/// Parse atomic expressions.
pub(super) fn parse_atom(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();

    let kind = match stream.peek() {
        Some(Token::True) => ExprKind::BoolLiteral(true),
        Some(Token::False) => ExprKind::BoolLiteral(false),
        Some(Token::Integer(n)) => ExprKind::IntLiteral(Literal::spelled(n.value, n.text.clone())),
        Some(Token::Unsigned(n)) => ExprKind::UintLiteral(Literal::spelled(n.value, n.text.clone())),
        Some(Token::Float(text)) => ExprKind::FloatLiteral(text.clone()),
        Some(Token::Ident(_)) => return parse_identifier(stream),
        Some(Token::LParen) => return parse_parenthesized(stream),
        other => {
            return Err(ParseError::unexpected_token(
                other,
                "in expression",
                stream.current_span(),
            ));
        }
    };

    stream.advance();
    let span = stream.span_from(start);
    Ok(stream.make_expr(kind, span))
}

/// Parse a variable reference, or a function call / constructor when the
/// name is followed by `(`.
fn parse_identifier(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let name = stream.expect_ident("in expression")?;

    let kind = if stream.check(&Token::LParen) {
        ExprKind::Call {
            callee: name,
            args: parse_call_args(stream)?,
        }
    } else {
        ExprKind::Variable(name)
    };

    let span = stream.span_from(start);
    Ok(stream.make_expr(kind, span))
}

/// Parse function call arguments: `()`, `(void)` or `(a, b, ...)`.
fn parse_call_args(stream: &mut TokenStream) -> Result<Vec<Expr>, ParseError> {
    stream.expect(Token::LParen)?;

    let mut args = Vec::new();
    if stream.check(&Token::Void) && matches!(stream.peek_nth(1), Some(Token::RParen)) {
        stream.advance();
    }
    while !stream.check(&Token::RParen) {
        args.push(super::parse_assignment(stream)?);
        if !stream.check(&Token::RParen) {
            stream.expect(Token::Comma)?;
        }
    }

    stream.expect(Token::RParen)?;
    Ok(args)
}

/// Parse `( expression )`, kept as a `Paren` node.
fn parse_parenthesized(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::LParen)?;
    let inner = super::parse_expression(stream)?;
    stream.expect(Token::RParen)?;

    let span = stream.span_from(start);
    Ok(stream.make_expr(ExprKind::Paren(Box::new(inner)), span))
}
