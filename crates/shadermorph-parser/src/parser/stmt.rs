//! Statement parsers for function bodies.

use super::{ParseError, TokenStream, decl, expr, types};
use shadermorph_ast::{Block, Expr, Stmt};
use shadermorph_lexer::Token;

/// Parse `{ statements }`.
pub(super) fn parse_block(stream: &mut TokenStream) -> Result<Block, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::LBrace)?;

    let mut statements = Vec::new();
    while !stream.check(&Token::RBrace) {
        if stream.at_end() {
            return Err(ParseError::unexpected_token(
                None,
                "in block",
                stream.current_span(),
            ));
        }
        statements.push(parse_statement(stream)?);
    }
    stream.expect(Token::RBrace)?;

    Ok(Block {
        statements,
        span: stream.span_from(start),
    })
}

/// Check whether the upcoming tokens start a declaration rather than an
/// expression statement.
///
/// A declaration starts with a qualifier, `struct`, or a type name followed
/// by the declared name (`vec3 v`, `S s`, `int[4] a`).
fn starts_declaration(stream: &TokenStream) -> bool {
    match stream.peek() {
        Some(Token::Struct) => true,
        Some(token) if types::is_qualifier(token) => true,
        Some(Token::Ident(_)) => {
            let after_dims = skip_bracket_groups(stream, 1);
            matches!(stream.peek_nth(after_dims), Some(Token::Ident(_)))
        }
        _ => false,
    }
}

/// Lookahead offset just past any balanced `[...]` groups starting at `n`.
fn skip_bracket_groups(stream: &TokenStream, mut n: usize) -> usize {
    let mut depth = 0usize;
    loop {
        match stream.peek_nth(n) {
            Some(Token::LBracket) => depth += 1,
            Some(Token::RBracket) if depth > 0 => depth -= 1,
            Some(_) if depth > 0 => {}
            _ => return n,
        }
        n += 1;
    }
}

/// Parse one statement (keyword-dispatched).
fn parse_statement(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    match stream.peek() {
        Some(Token::LBrace) => Ok(Stmt::Block(parse_block(stream)?)),
        Some(Token::If) => parse_if(stream),
        Some(Token::For) => parse_for(stream),
        Some(Token::While) => parse_while(stream),
        Some(Token::Do) => parse_do_while(stream),
        Some(Token::Switch) => parse_switch(stream),
        Some(Token::Case) => {
            stream.advance();
            let value = expr::parse_expression(stream)?;
            stream.expect(Token::Colon)?;
            Ok(Stmt::Case(value))
        }
        Some(Token::Default) => {
            stream.advance();
            stream.expect(Token::Colon)?;
            Ok(Stmt::Default)
        }
        Some(Token::Return) => {
            stream.advance();
            if stream.eat(&Token::Semicolon) {
                return Ok(Stmt::Return(None));
            }
            let value = expr::parse_expression(stream)?;
            stream.expect(Token::Semicolon)?;
            Ok(Stmt::Return(Some(value)))
        }
        Some(Token::Break) => keyword_statement(stream, Stmt::Break),
        Some(Token::Continue) => keyword_statement(stream, Stmt::Continue),
        Some(Token::Discard) => keyword_statement(stream, Stmt::Discard),
        Some(Token::Semicolon) => {
            stream.advance();
            Ok(Stmt::Empty)
        }
        _ if starts_declaration(stream) => Ok(Stmt::Declaration(decl::parse_declaration(stream)?)),
        _ => parse_expression_statement(stream),
    }
}

/// `break;`, `continue;` or `discard;`.
fn keyword_statement(stream: &mut TokenStream, stmt: Stmt) -> Result<Stmt, ParseError> {
    stream.advance();
    stream.expect(Token::Semicolon)?;
    Ok(stmt)
}

fn parse_expression_statement(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    let value = expr::parse_expression(stream)?;
    stream.expect(Token::Semicolon)?;
    Ok(Stmt::Expr(value))
}

/// Parse `( expression )` around a condition or selector.
fn parse_condition(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    stream.expect(Token::LParen)?;
    let condition = expr::parse_expression(stream)?;
    stream.expect(Token::RParen)?;
    Ok(condition)
}

fn parse_if(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    stream.expect(Token::If)?;
    let condition = parse_condition(stream)?;
    let then_branch = Box::new(parse_statement(stream)?);
    let else_branch = if stream.eat(&Token::Else) {
        Some(Box::new(parse_statement(stream)?))
    } else {
        None
    };

    Ok(Stmt::If {
        condition,
        then_branch,
        else_branch,
    })
}

/// Parse `for (init; condition; step) body`.
fn parse_for(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    stream.expect(Token::For)?;
    stream.expect(Token::LParen)?;

    let init = if stream.eat(&Token::Semicolon) {
        Stmt::Empty
    } else if starts_declaration(stream) {
        Stmt::Declaration(decl::parse_declaration(stream)?)
    } else {
        parse_expression_statement(stream)?
    };

    let condition = if stream.check(&Token::Semicolon) {
        None
    } else {
        Some(expr::parse_expression(stream)?)
    };
    stream.expect(Token::Semicolon)?;

    let step = if stream.check(&Token::RParen) {
        None
    } else {
        Some(expr::parse_expression(stream)?)
    };
    stream.expect(Token::RParen)?;

    let body = parse_statement(stream)?;
    Ok(Stmt::For {
        init: Box::new(init),
        condition,
        step,
        body: Box::new(body),
    })
}

fn parse_while(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    stream.expect(Token::While)?;
    let condition = parse_condition(stream)?;
    let body = parse_statement(stream)?;
    Ok(Stmt::While {
        condition,
        body: Box::new(body),
    })
}

fn parse_do_while(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    stream.expect(Token::Do)?;
    let body = parse_statement(stream)?;
    stream.expect(Token::While)?;
    let condition = parse_condition(stream)?;
    stream.expect(Token::Semicolon)?;
    Ok(Stmt::DoWhile {
        body: Box::new(body),
        condition,
    })
}

fn parse_switch(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    stream.expect(Token::Switch)?;
    let selector = parse_condition(stream)?;
    let body = parse_block(stream)?;
    Ok(Stmt::Switch { selector, body })
}
