//! Abstract syntax tree of a GLSL translation unit.
//!
//! - `expr` - expressions, operators and precedence levels
//! - `stmt` - statements and blocks
//! - `decl` - qualifiers, type specifiers and declarations
//! - `walk` - closure-based traversal helpers

mod decl;
mod expr;
mod stmt;
pub mod walk;

pub use decl::*;
pub use expr::*;
pub use stmt::*;

use crate::foundation::ExprIdGen;

/// A whole shader program as parsed from one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationUnit {
    pub decls: Vec<ExternalDecl>,
    /// Allocator that produced every id in `decls`; passes that insert new
    /// expressions draw from it so ids stay unique
    pub expr_ids: ExprIdGen,
}

impl TranslationUnit {
    pub fn new(decls: Vec<ExternalDecl>, expr_ids: ExprIdGen) -> Self {
        Self { decls, expr_ids }
    }

    /// Function definitions in source order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.decls.iter().filter_map(|decl| match decl {
            ExternalDecl::Function(function) => Some(function),
            _ => None,
        })
    }
}
