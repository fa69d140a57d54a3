// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Hand-written recursive descent parser for GLSL shader programs.
//!
//! Produces a [`TranslationUnit`](shadermorph_ast::TranslationUnit) whose
//! expression nodes carry unique ids, ready for typing and rewriting.

pub mod parser;

pub use parser::{
    ParseError, ParseErrorKind, parse_expr, parse_source, parse_translation_unit,
    parse_translation_unit_with_spans,
};

// Re-export lexer
pub use shadermorph_lexer::Token;
