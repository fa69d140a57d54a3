//! Foundation types shared by every stage: spans, expression ids and the
//! static type model.

pub mod ids;
pub mod span;
pub mod types;

pub use ids::{ExprId, ExprIdGen};
pub use span::{SourceFile, SourceMap, Span};
pub use types::{BasicType, ScalarKind, Type, TypeOracle, is_opaque_type_name};
