//! Pratt parser core - precedence climbing for binary and unary operators.

use super::super::{ParseError, TokenStream};
use super::atoms;
use shadermorph_ast::{AssignOp, BinaryOp, Expr, ExprKind, UnaryOp, precedence};
use shadermorph_lexer::Token;

/// Binary operator for a token.
///
/// Precedence comes from [`BinaryOp::precedence`], the table the printer
/// uses too. Every binary operator is left associative. The sequence comma
/// is handled by the caller.
fn binary_op(token: &Token) -> Option<BinaryOp> {
    match token {
        Token::PipePipe => Some(BinaryOp::LogicalOr),
        Token::CaretCaret => Some(BinaryOp::LogicalXor),
        Token::AmpAmp => Some(BinaryOp::LogicalAnd),
        Token::Pipe => Some(BinaryOp::BitOr),
        Token::Caret => Some(BinaryOp::BitXor),
        Token::Amp => Some(BinaryOp::BitAnd),
        Token::EqEq => Some(BinaryOp::Eq),
        Token::BangEq => Some(BinaryOp::Ne),
        Token::Lt => Some(BinaryOp::Lt),
        Token::LtEq => Some(BinaryOp::Le),
        Token::Gt => Some(BinaryOp::Gt),
        Token::GtEq => Some(BinaryOp::Ge),
        Token::Shl => Some(BinaryOp::Shl),
        Token::Shr => Some(BinaryOp::Shr),
        Token::Plus => Some(BinaryOp::Add),
        Token::Minus => Some(BinaryOp::Sub),
        Token::Star => Some(BinaryOp::Mul),
        Token::Slash => Some(BinaryOp::Div),
        Token::Percent => Some(BinaryOp::Mod),
        _ => None,
    }
}

fn assign_op(token: &Token) -> Option<AssignOp> {
    match token {
        Token::Eq => Some(AssignOp::Assign),
        Token::PlusEq => Some(AssignOp::Add),
        Token::MinusEq => Some(AssignOp::Sub),
        Token::StarEq => Some(AssignOp::Mul),
        Token::SlashEq => Some(AssignOp::Div),
        Token::PercentEq => Some(AssignOp::Mod),
        Token::ShlEq => Some(AssignOp::Shl),
        Token::ShrEq => Some(AssignOp::Shr),
        Token::AmpEq => Some(AssignOp::BitAnd),
        Token::CaretEq => Some(AssignOp::BitXor),
        Token::PipeEq => Some(AssignOp::BitOr),
        _ => None,
    }
}

/// Forms that may appear on the left of an assignment.
fn is_assignable(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Variable(_) | ExprKind::Index { .. } | ExprKind::Member { .. } => true,
        ExprKind::Paren(inner) => is_assignable(inner),
        _ => false,
    }
}

/// Parse an assignment or anything tighter.
pub(super) fn parse_assignment(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let target = parse_conditional(stream)?;

    let Some(op) = stream.peek().and_then(assign_op) else {
        return Ok(target);
    };
    if !is_assignable(&target) {
        return Err(ParseError::invalid_syntax(
            "invalid assignment target",
            target.span,
        ));
    }
    stream.advance();

    let value = parse_assignment(stream)?;
    let span = stream.span_from(start);
    Ok(stream.make_expr(
        ExprKind::Assign {
            op,
            target: Box::new(target),
            value: Box::new(value),
        },
        span,
    ))
}

/// Parse `condition ? then : else` or anything tighter.
fn parse_conditional(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let condition = parse_pratt(stream, precedence::LOGICAL_OR)?;

    if !stream.eat(&Token::Question) {
        return Ok(condition);
    }
    let then_expr = super::parse_expression(stream)?;
    stream.expect(Token::Colon)?;
    let else_expr = parse_assignment(stream)?;

    let span = stream.span_from(start);
    Ok(stream.make_expr(
        ExprKind::Ternary {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        },
        span,
    ))
}

/// Pratt parser - handles binary operators with precedence climbing.
fn parse_pratt(stream: &mut TokenStream, min_prec: u8) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let mut left = parse_prefix(stream)?;

    while let Some(op) = stream.peek().and_then(binary_op) {
        let prec = op.precedence();
        if prec < min_prec {
            break;
        }
        stream.advance();

        let right = parse_pratt(stream, prec + 1)?;
        let span = stream.span_from(start);
        left = stream.make_expr(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        );
    }

    Ok(left)
}

/// Parse prefix unary operators, then a postfix expression.
fn parse_prefix(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let op = match stream.peek() {
        Some(Token::Plus) => UnaryOp::Plus,
        Some(Token::Minus) => UnaryOp::Neg,
        Some(Token::Bang) => UnaryOp::Not,
        Some(Token::Tilde) => UnaryOp::BitNot,
        Some(Token::PlusPlus) => UnaryOp::PreInc,
        Some(Token::MinusMinus) => UnaryOp::PreDec,
        _ => return parse_postfix(stream),
    };

    let start = stream.current_pos();
    stream.advance();
    let operand = parse_prefix(stream)?;
    let span = stream.span_from(start);

    Ok(stream.make_expr(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        span,
    ))
}

/// Parse postfix expressions (indexing, field access, `.length()`, `++`, `--`).
fn parse_postfix(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let mut expr = atoms::parse_atom(stream)?;

    loop {
        let kind = match stream.peek() {
            Some(Token::LBracket) => {
                stream.advance();
                let index = super::parse_expression(stream)?;
                stream.expect(Token::RBracket)?;
                ExprKind::Index {
                    base: Box::new(expr),
                    index: Box::new(index),
                }
            }
            Some(Token::Dot) => {
                stream.advance();
                let member = stream.expect_ident("after '.'")?;
                let is_length_call = &*member == "length"
                    && stream.check(&Token::LParen)
                    && matches!(stream.peek_nth(1), Some(Token::RParen));
                if is_length_call {
                    stream.advance();
                    stream.advance();
                    ExprKind::Length(Box::new(expr))
                } else {
                    ExprKind::Member {
                        base: Box::new(expr),
                        member,
                    }
                }
            }
            Some(Token::PlusPlus) => {
                stream.advance();
                ExprKind::Unary {
                    op: UnaryOp::PostInc,
                    operand: Box::new(expr),
                }
            }
            Some(Token::MinusMinus) => {
                stream.advance();
                ExprKind::Unary {
                    op: UnaryOp::PostDec,
                    operand: Box::new(expr),
                }
            }
            _ => break,
        };
        let span = stream.span_from(start);
        expr = stream.make_expr(kind, span);
    }

    Ok(expr)
}
