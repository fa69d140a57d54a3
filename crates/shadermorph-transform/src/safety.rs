//! Static safety of literal indices.
//!
//! Only a bare literal counts. `2 + 1`, `(3)` and `-1` are expressions and
//! always get a guard.

use shadermorph_ast::Expr;

/// An index written as an integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexLiteral {
    Int(i64),
    Uint(u64),
}

impl IndexLiteral {
    /// The literal `expr` is, if it is one.
    pub fn of(expr: &Expr) -> Option<Self> {
        expr.as_int_literal()
            .map(IndexLiteral::Int)
            .or_else(|| expr.as_uint_literal().map(IndexLiteral::Uint))
    }

    /// The literal's value if it lies in `[0, bound)`.
    pub fn within(self, bound: u32) -> Option<u64> {
        let value = match self {
            IndexLiteral::Int(value) => u64::try_from(value).ok()?,
            IndexLiteral::Uint(value) => value,
        };
        (value < u64::from(bound)).then_some(value)
    }
}
