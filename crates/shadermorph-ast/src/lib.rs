// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! AST types for GLSL shader programs
//!
//! This crate contains the AST node definitions, the static type model
//! consumed by passes through [`TypeOracle`], source spans, and the
//! pretty-printer that turns a tree back into shader text.

pub mod ast;
pub mod foundation;
pub mod printer;

pub use ast::*;
pub use foundation::{
    BasicType, ExprId, ExprIdGen, ScalarKind, SourceFile, SourceMap, Span, Type, TypeOracle,
};
pub use printer::{print_expr, print_translation_unit};
