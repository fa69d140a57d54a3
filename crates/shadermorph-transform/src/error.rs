//! Transform errors
//!
//! Both variants are precondition violations: the program handed to the pass
//! was not fully typed. Sites the pass merely cannot handle are reported as
//! skipped instead.

use shadermorph_ast::{ExprId, Span};
use thiserror::Error;

/// Reasons a pass refuses to run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("no static type recorded for expression {id}")]
    MissingType { id: ExprId, span: Span },

    #[error("array index has type '{ty}', expected 'int' or 'uint'")]
    NonIntegerIndex { ty: String, span: Span },
}

impl TransformError {
    /// Location of the offending expression.
    pub fn span(&self) -> Span {
        match self {
            TransformError::MissingType { span, .. } | TransformError::NonIntegerIndex { span, .. } => {
                *span
            }
        }
    }
}
