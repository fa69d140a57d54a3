//! External declaration parsers.
//!
//! A translation unit is a sequence of:
//! - preprocessor directives, kept verbatim
//! - `precision` statements
//! - qualifier-only declarations (`layout(local_size_x = 8) in;`)
//! - interface blocks (`uniform Block { ... } instance;`)
//! - function prototypes and definitions
//! - variable and struct declarations

use super::{ParseError, TokenStream, stmt, types};
use shadermorph_ast::{
    BlockInstance, Declaration, ExternalDecl, FullySpecifiedType, FunctionDef, FunctionPrototype,
    InterfaceBlock, ParamDecl, TypeQualifier,
};
use shadermorph_lexer::Token;

/// Parse all external declarations from a token stream.
pub fn parse_external_decls(stream: &mut TokenStream) -> Result<Vec<ExternalDecl>, Vec<ParseError>> {
    let mut decls = Vec::new();
    let mut errors = Vec::new();

    while !stream.at_end() {
        // Stray semicolons between declarations are legal and carry nothing
        if stream.eat(&Token::Semicolon) {
            continue;
        }
        match parse_external_decl(stream) {
            Ok(decl) => decls.push(decl),
            Err(e) => {
                errors.push(e);
                stream.synchronize(); // Skip to next declaration
            }
        }
    }

    if errors.is_empty() {
        Ok(decls)
    } else {
        Err(errors)
    }
}

/// Parse a single external declaration.
fn parse_external_decl(stream: &mut TokenStream) -> Result<ExternalDecl, ParseError> {
    let start = stream.current_pos();

    match stream.peek() {
        Some(Token::Directive(line)) => {
            stream.advance();
            return Ok(ExternalDecl::Directive(line.clone()));
        }
        Some(Token::Precision) => return parse_precision(stream),
        _ => {}
    }

    let qualifiers = types::parse_qualifiers(stream)?;
    if !qualifiers.is_empty() {
        if stream.eat(&Token::Semicolon) {
            return Ok(ExternalDecl::QualifierOnly(qualifiers));
        }
        let block_follows = matches!(stream.peek(), Some(Token::Ident(_)))
            && matches!(stream.peek_nth(1), Some(Token::LBrace));
        if block_follows {
            return parse_interface_block(stream, start, qualifiers)
                .map(ExternalDecl::InterfaceBlock);
        }
    }

    let specifier = types::parse_type_specifier(stream)?;
    let ty = FullySpecifiedType {
        qualifiers,
        specifier,
        array_dims: types::parse_array_dims(stream)?,
    };

    let function_follows = matches!(stream.peek(), Some(Token::Ident(_)))
        && matches!(stream.peek_nth(1), Some(Token::LParen));
    if function_follows {
        return parse_function(stream, start, ty);
    }

    parse_declaration_rest(stream, start, ty).map(ExternalDecl::Declaration)
}

/// Parse a local or global variable declaration including its `;`.
pub(super) fn parse_declaration(stream: &mut TokenStream) -> Result<Declaration, ParseError> {
    let start = stream.current_pos();
    let ty = types::parse_fully_specified_type(stream)?;
    parse_declaration_rest(stream, start, ty)
}

/// Parse the declarator list after the type, through the closing `;`.
fn parse_declaration_rest(
    stream: &mut TokenStream,
    start: usize,
    ty: FullySpecifiedType,
) -> Result<Declaration, ParseError> {
    let mut declarators = Vec::new();
    if !stream.check(&Token::Semicolon) {
        loop {
            declarators.push(types::parse_declarator(stream, true)?);
            if !stream.eat(&Token::Comma) {
                break;
            }
        }
    }
    stream.expect(Token::Semicolon)?;

    Ok(Declaration {
        ty,
        declarators,
        span: stream.span_from(start),
    })
}

/// Parse `precision mediump float;`.
fn parse_precision(stream: &mut TokenStream) -> Result<ExternalDecl, ParseError> {
    stream.expect(Token::Precision)?;

    let span = stream.current_span();
    let precision = stream
        .advance()
        .and_then(types::precision_of)
        .ok_or_else(|| {
            ParseError::invalid_syntax("expected 'highp', 'mediump' or 'lowp'", span)
        })?;
    let specifier = types::parse_type_specifier(stream)?;
    stream.expect(Token::Semicolon)?;

    Ok(ExternalDecl::Precision {
        precision,
        specifier,
    })
}

/// Parse `Block { members } [instance[dims]];` after its qualifiers.
fn parse_interface_block(
    stream: &mut TokenStream,
    start: usize,
    qualifiers: Vec<TypeQualifier>,
) -> Result<InterfaceBlock, ParseError> {
    let block_name = stream.expect_ident("as interface block name")?;
    let members = types::parse_member_list(stream)?;

    let instance = match stream.peek() {
        Some(Token::Ident(name)) => {
            stream.advance();
            Some(BlockInstance {
                name: name.clone(),
                array_dims: types::parse_array_dims(stream)?,
            })
        }
        _ => None,
    };
    stream.expect(Token::Semicolon)?;

    Ok(InterfaceBlock {
        qualifiers,
        block_name,
        members,
        instance,
        span: stream.span_from(start),
    })
}

/// Parse a function prototype, then either `;` or a body.
fn parse_function(
    stream: &mut TokenStream,
    start: usize,
    return_type: FullySpecifiedType,
) -> Result<ExternalDecl, ParseError> {
    let name = stream.expect_ident("as function name")?;
    let params = parse_params(stream)?;
    let prototype = FunctionPrototype {
        return_type,
        name,
        params,
        span: stream.span_from(start),
    };

    if stream.eat(&Token::Semicolon) {
        return Ok(ExternalDecl::Prototype(prototype));
    }
    let body = stmt::parse_block(stream)?;
    Ok(ExternalDecl::Function(FunctionDef { prototype, body }))
}

/// Parse `()`, `(void)` or `(param, ...)`.
fn parse_params(stream: &mut TokenStream) -> Result<Vec<ParamDecl>, ParseError> {
    stream.expect(Token::LParen)?;

    let mut params = Vec::new();
    if stream.check(&Token::Void) && matches!(stream.peek_nth(1), Some(Token::RParen)) {
        stream.advance();
    }
    while !stream.check(&Token::RParen) {
        let ty = types::parse_fully_specified_type(stream)?;
        let name = match stream.peek() {
            Some(Token::Ident(name)) => {
                stream.advance();
                Some(name.clone())
            }
            _ => None,
        };
        let array_dims = types::parse_array_dims(stream)?;
        params.push(ParamDecl {
            ty,
            name,
            array_dims,
        });

        if !stream.check(&Token::RParen) {
            stream.expect(Token::Comma)?;
        }
    }

    stream.expect(Token::RParen)?;
    Ok(params)
}
