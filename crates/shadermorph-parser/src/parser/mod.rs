//! Hand-written recursive descent parser for GLSL.
//!
//! ## Architecture
//!
//! - `stream`: TokenStream wrapper with lookahead and id allocation
//! - `error`: ParseError and its kinds
//! - `expr`: Expression parser using Pratt parsing
//! - `types`: Qualifiers, type specifiers, struct bodies and array dimensions
//! - `decl`: External declarations (globals, blocks, functions)
//! - `stmt`: Statements inside function bodies
//!
//! ## Public API
//!
//! ```rust,ignore
//! pub fn parse_source(source: &str, file_id: u16) -> Result<TranslationUnit, Vec<ParseError>>
//! pub fn parse_translation_unit(tokens: &[Token], file_id: u16) -> Result<TranslationUnit, Vec<ParseError>>
//! pub fn parse_expr(tokens: &[Token], file_id: u16) -> Result<Expr, Vec<ParseError>>
//! ```

mod error;
mod stream;

pub use error::{ParseError, ParseErrorKind};
use stream::TokenStream;

mod decl;
mod expr;
mod stmt;
mod types;

use logos::Logos;
use shadermorph_ast::{Expr, Span, TranslationUnit};
use shadermorph_lexer::Token;
use std::ops::Range;

/// Pair tokens with fake byte spans.
///
/// Each token's index stands in for its byte offset, so spans in the result
/// point at token positions rather than source bytes. Use the `_with_spans`
/// or [`parse_source`] entry points for accurate locations.
fn tokens_with_fake_spans(tokens: &[Token]) -> Vec<(Token, Range<usize>)> {
    tokens
        .iter()
        .enumerate()
        .map(|(i, tok)| (tok.clone(), i..i + 1))
        .collect()
}

/// Lex and parse shader source text.
///
/// Lexical errors are reported together before any parsing happens.
pub fn parse_source(source: &str, file_id: u16) -> Result<TranslationUnit, Vec<ParseError>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    for (result, range) in Token::lexer(source).spanned() {
        match result {
            Ok(token) => tokens.push((token, range)),
            Err(()) => errors.push(ParseError::lexical(
                &source[range.clone()],
                Span::new(file_id, range.start as u32, range.end as u32),
            )),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    parse_translation_unit_with_spans(&tokens, file_id)
}

/// Parse a sequence of tokens into a translation unit.
///
/// # Note
/// This function creates fake byte spans. Use
/// [`parse_translation_unit_with_spans`] for accurate error locations.
pub fn parse_translation_unit(
    tokens: &[Token],
    file_id: u16,
) -> Result<TranslationUnit, Vec<ParseError>> {
    let tokens_with_spans = tokens_with_fake_spans(tokens);
    parse_translation_unit_with_spans(&tokens_with_spans, file_id)
}

/// Parse a sequence of tokens with byte spans into a translation unit.
///
/// Parsing continues after an error at the next declaration boundary, so
/// one call reports every independent syntax error.
pub fn parse_translation_unit_with_spans(
    tokens: &[(Token, Range<usize>)],
    file_id: u16,
) -> Result<TranslationUnit, Vec<ParseError>> {
    let mut stream = TokenStream::new(tokens, file_id);
    let decls = decl::parse_external_decls(&mut stream)?;
    Ok(TranslationUnit::new(decls, stream.into_ids()))
}

/// Parse a sequence of tokens into a single expression.
///
/// The whole input must be consumed.
pub fn parse_expr(tokens: &[Token], file_id: u16) -> Result<Expr, Vec<ParseError>> {
    let tokens_with_spans = tokens_with_fake_spans(tokens);
    let mut stream = TokenStream::new(&tokens_with_spans, file_id);
    let parsed = expr::parse_expression(&mut stream).map_err(|e| vec![e])?;
    if !stream.at_end() {
        return Err(vec![ParseError::unexpected_token(
            stream.peek(),
            "after expression",
            stream.current_span(),
        )]);
    }
    Ok(parsed)
}
