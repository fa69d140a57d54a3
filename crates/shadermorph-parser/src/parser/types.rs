//! Type-level parsers: qualifiers, type specifiers, struct bodies and array
//! dimensions.

use super::{ParseError, TokenStream, expr};
use shadermorph_ast::foundation::is_opaque_type_name;
use shadermorph_ast::{
    ArraySize, BasicType, Declarator, FullySpecifiedType, LayoutId, Precision, StructDef,
    StructMember, TypeQualifier, TypeSpecifier,
};
use shadermorph_lexer::Token;

/// Check whether `token` starts a type qualifier.
pub(super) fn is_qualifier(token: &Token) -> bool {
    simple_qualifier(token).is_some() || matches!(token, Token::Layout)
}

/// Qualifiers that are a single keyword.
fn simple_qualifier(token: &Token) -> Option<TypeQualifier> {
    Some(match token {
        Token::Const => TypeQualifier::Const,
        Token::Uniform => TypeQualifier::Uniform,
        Token::Buffer => TypeQualifier::Buffer,
        Token::Shared => TypeQualifier::Shared,
        Token::In => TypeQualifier::In,
        Token::Out => TypeQualifier::Out,
        Token::InOut => TypeQualifier::InOut,
        Token::Attribute => TypeQualifier::Attribute,
        Token::Varying => TypeQualifier::Varying,
        Token::Centroid => TypeQualifier::Centroid,
        Token::Flat => TypeQualifier::Flat,
        Token::Smooth => TypeQualifier::Smooth,
        Token::Invariant => TypeQualifier::Invariant,
        Token::Coherent => TypeQualifier::Coherent,
        Token::Volatile => TypeQualifier::Volatile,
        Token::Restrict => TypeQualifier::Restrict,
        Token::ReadOnly => TypeQualifier::ReadOnly,
        Token::WriteOnly => TypeQualifier::WriteOnly,
        Token::HighP | Token::MediumP | Token::LowP => {
            TypeQualifier::Precision(precision_of(token)?)
        }
        _ => return None,
    })
}

/// Precision for `highp`, `mediump` or `lowp`.
pub(super) fn precision_of(token: &Token) -> Option<Precision> {
    match token {
        Token::HighP => Some(Precision::High),
        Token::MediumP => Some(Precision::Medium),
        Token::LowP => Some(Precision::Low),
        _ => None,
    }
}

/// Parse zero or more qualifiers.
pub(super) fn parse_qualifiers(stream: &mut TokenStream) -> Result<Vec<TypeQualifier>, ParseError> {
    let mut qualifiers = Vec::new();
    loop {
        match stream.peek() {
            Some(Token::Layout) => qualifiers.push(parse_layout(stream)?),
            Some(token) => match simple_qualifier(token) {
                Some(qualifier) => {
                    stream.advance();
                    qualifiers.push(qualifier);
                }
                None => break,
            },
            None => break,
        }
    }
    Ok(qualifiers)
}

/// Parse `layout(id, id = value, ...)`.
fn parse_layout(stream: &mut TokenStream) -> Result<TypeQualifier, ParseError> {
    stream.expect(Token::Layout)?;
    stream.expect(Token::LParen)?;

    let mut ids = Vec::new();
    loop {
        let span = stream.current_span();
        let name = match stream.advance() {
            Some(Token::Ident(name)) => name.clone(),
            // `layout(shared)` reuses the storage keyword
            Some(Token::Shared) => "shared".into(),
            other => return Err(ParseError::unexpected_token(other, "in layout qualifier", span)),
        };

        let value = if stream.eat(&Token::Eq) {
            let span = stream.current_span();
            match stream.advance() {
                Some(Token::Integer(n)) => Some(n.value),
                Some(Token::Unsigned(n)) => Some(i64::try_from(n.value).map_err(|_| {
                    ParseError::invalid_syntax("layout value out of range", span)
                })?),
                other => {
                    return Err(ParseError::unexpected_token(
                        other,
                        "as layout value",
                        span,
                    ));
                }
            }
        } else {
            None
        };
        ids.push(LayoutId { name, value });

        if !stream.eat(&Token::Comma) {
            break;
        }
    }

    stream.expect(Token::RParen)?;
    Ok(TypeQualifier::Layout(ids))
}

/// Parse a type specifier: `void`, a built-in or opaque type name, a struct
/// name or an inline struct definition.
pub(super) fn parse_type_specifier(stream: &mut TokenStream) -> Result<TypeSpecifier, ParseError> {
    match stream.peek() {
        Some(Token::Void) => {
            stream.advance();
            Ok(TypeSpecifier::Void)
        }
        Some(Token::Struct) => Ok(TypeSpecifier::Struct(parse_struct_def(stream)?)),
        Some(Token::Ident(name)) => {
            stream.advance();
            Ok(if let Some(basic) = BasicType::from_name(name) {
                TypeSpecifier::Basic(basic)
            } else if is_opaque_type_name(name) {
                TypeSpecifier::Opaque(name.clone())
            } else {
                TypeSpecifier::Named(name.clone())
            })
        }
        other => Err(ParseError::unexpected_token(
            other,
            "where a type was expected",
            stream.current_span(),
        )),
    }
}

/// Parse qualifiers followed by a type specifier and its `[size]` suffixes.
pub(super) fn parse_fully_specified_type(
    stream: &mut TokenStream,
) -> Result<FullySpecifiedType, ParseError> {
    let qualifiers = parse_qualifiers(stream)?;
    let specifier = parse_type_specifier(stream)?;
    let array_dims = parse_array_dims(stream)?;
    Ok(FullySpecifiedType {
        qualifiers,
        specifier,
        array_dims,
    })
}

/// Parse `struct [Name] { members }`.
fn parse_struct_def(stream: &mut TokenStream) -> Result<StructDef, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::Struct)?;

    let name = match stream.peek() {
        Some(Token::Ident(name)) => {
            stream.advance();
            Some(name.clone())
        }
        _ => None,
    };

    let members = parse_member_list(stream)?;
    Ok(StructDef {
        name,
        members,
        span: stream.span_from(start),
    })
}

/// Parse `{ type a, b[2]; ... }` shared by structs and interface blocks.
pub(super) fn parse_member_list(stream: &mut TokenStream) -> Result<Vec<StructMember>, ParseError> {
    stream.expect(Token::LBrace)?;

    let mut members = Vec::new();
    while !stream.check(&Token::RBrace) {
        if stream.at_end() {
            return Err(ParseError::unexpected_token(
                None,
                "in member list",
                stream.current_span(),
            ));
        }
        let ty = parse_fully_specified_type(stream)?;
        let mut declarators = Vec::new();
        loop {
            declarators.push(parse_declarator(stream, false)?);
            if !stream.eat(&Token::Comma) {
                break;
            }
        }
        stream.expect(Token::Semicolon)?;
        members.push(StructMember { ty, declarators });
    }

    stream.expect(Token::RBrace)?;
    Ok(members)
}

/// Parse zero or more `[size]` / `[]` suffixes.
pub(super) fn parse_array_dims(stream: &mut TokenStream) -> Result<Vec<ArraySize>, ParseError> {
    let mut dims = Vec::new();
    while stream.eat(&Token::LBracket) {
        if stream.eat(&Token::RBracket) {
            dims.push(ArraySize::Unsized);
        } else {
            let size = expr::parse_assignment(stream)?;
            stream.expect(Token::RBracket)?;
            dims.push(ArraySize::Sized(size));
        }
    }
    Ok(dims)
}

/// Parse `name [dims] [= initializer]`.
pub(super) fn parse_declarator(
    stream: &mut TokenStream,
    allow_initializer: bool,
) -> Result<Declarator, ParseError> {
    let start = stream.current_pos();
    let name = stream.expect_ident("in declaration")?;
    let array_dims = parse_array_dims(stream)?;

    let initializer = if allow_initializer && stream.eat(&Token::Eq) {
        Some(expr::parse_assignment(stream)?)
    } else {
        None
    };

    Ok(Declarator {
        name,
        array_dims,
        initializer,
        span: stream.span_from(start),
    })
}
