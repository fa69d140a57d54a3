//! Typing errors

use shadermorph_ast::Span;
use thiserror::Error;

/// Reasons a program cannot be typed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypeError {
    #[error("undeclared identifier '{name}'")]
    UndeclaredIdentifier { name: String, span: Span },

    #[error("no function '{name}' accepts arguments ({args})")]
    UnknownFunction {
        name: String,
        args: String,
        span: Span,
    },

    #[error("unknown type '{name}'")]
    UnknownType { name: String, span: Span },

    #[error("a value of type '{ty}' cannot be indexed")]
    NotIndexable { ty: String, span: Span },

    #[error("type '{ty}' has no member or swizzle '{member}'")]
    UnknownMember {
        ty: String,
        member: String,
        span: Span,
    },

    #[error("array size is not a positive constant integer expression")]
    NonConstantArraySize { span: Span },

    #[error("operator '{op}' cannot combine '{left}' and '{right}'")]
    InvalidOperands {
        op: String,
        left: String,
        right: String,
        span: Span,
    },
}

impl TypeError {
    /// Source location the error refers to.
    pub fn span(&self) -> Span {
        match self {
            TypeError::UndeclaredIdentifier { span, .. }
            | TypeError::UnknownFunction { span, .. }
            | TypeError::UnknownType { span, .. }
            | TypeError::NotIndexable { span, .. }
            | TypeError::UnknownMember { span, .. }
            | TypeError::NonConstantArraySize { span }
            | TypeError::InvalidOperands { span, .. } => *span,
        }
    }
}
