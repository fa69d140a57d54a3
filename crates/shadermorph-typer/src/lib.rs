// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Static type inference for GLSL translation units.
//!
//! [`Typer::new`] walks a parsed program once, with lexical scopes, and
//! records the static type of every expression in a dense table keyed by
//! [`ExprId`](shadermorph_ast::ExprId). The result implements
//! [`TypeOracle`](shadermorph_ast::TypeOracle), which is all rewrite passes
//! need from it.
//!
//! # Example
//!
//! ```
//! use shadermorph_ast::{Type, TypeOracle, ExprKind, walk};
//! use shadermorph_typer::Typer;
//!
//! let tu = shadermorph_parser::parse_source("int A[5]; int x = A[1];", 0).unwrap();
//! let typer = Typer::new(&tu).unwrap();
//!
//! let mut index_types = Vec::new();
//! walk::for_each_root_expr(&tu.decls, &mut |root| {
//!     walk::walk_expr(root, &mut |e| {
//!         if let ExprKind::Index { base, .. } = &e.kind {
//!             index_types.push(typer.type_of(base.id).cloned());
//!         }
//!     });
//! });
//! assert_eq!(index_types, vec![Some(Type::array(Type::int(), Some(5)))]);
//! ```

pub mod builtins;
mod const_eval;
mod error;
mod expr_typing;
mod scope;
mod typer;

pub use const_eval::eval_const_int;
pub use error::TypeError;
pub use typer::Typer;
