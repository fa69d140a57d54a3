//! Expression parser using Pratt parsing (precedence climbing).
//!
//! ## Precedence Levels (lowest to highest)
//!
//! 1. `,` (sequence) - left associative
//! 2. `=`, `+=`, ... (assignment) - right associative
//! 3. `?:` (conditional) - right associative
//! 4. `||`, `^^`, `&&` - left associative
//! 5. `|`, `^`, `&` - left associative
//! 6. `==`, `!=`, then `<`, `<=`, `>`, `>=` - left associative
//! 7. `<<`, `>>`, then `+`, `-`, then `*`, `/`, `%` - left associative
//! 8. Prefix `+`, `-`, `!`, `~`, `++`, `--`
//! 9. Postfix: `[index]`, `.field`, `.length()`, `++`, `--`
//!
//! ## Module Organization
//!
//! - `pratt` - Pratt parser core (assignment, conditional, binary, unary, postfix)
//! - `atoms` - Atomic expressions (literals, identifiers, calls, parenthesized)

mod atoms;
mod pratt;

use super::{ParseError, TokenStream};
use shadermorph_ast::{BinaryOp, Expr, ExprKind};
use shadermorph_lexer::Token;

/// Parse a full expression, including the sequence operator.
pub(super) fn parse_expression(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let mut expr = pratt::parse_assignment(stream)?;

    while stream.eat(&Token::Comma) {
        let right = pratt::parse_assignment(stream)?;
        let span = stream.span_from(start);
        expr = stream.make_expr(
            ExprKind::Binary {
                op: BinaryOp::Comma,
                left: Box::new(expr),
                right: Box::new(right),
            },
            span,
        );
    }

    Ok(expr)
}

/// Parse an expression without a top-level comma.
///
/// Used for initializers, call arguments and array sizes, where `,`
/// separates items.
pub(super) fn parse_assignment(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    pratt::parse_assignment(stream)
}
