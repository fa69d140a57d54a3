// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Type-directed AST rewrites for GLSL programs.
//!
//! The only pass so far is [`make_in_bounds`]: it finds every `base[index]`
//! whose base is an array, matrix or vector and replaces `index` with a
//! conditional that always selects an element that exists.
//!
//! # Pipeline Position
//!
//! ```text
//! Parse → Type (oracle) → make_in_bounds → Print
//!                         ^^^^^^^^^^^^^^
//! ```
//!
//! # Per-site lifecycle
//!
//! ```text
//! collected → classified (skip | bound N, signedness)
//!           → checked    (already safe | needs guard)
//!           → rewritten  | unchanged
//! ```
//!
//! Everything up to the final step reads the tree and the oracle only, so a
//! [`TransformError`] leaves the program untouched.
//!
//! # Example
//!
//! ```
//! use shadermorph_transform::make_in_bounds;
//!
//! let mut tu = shadermorph_parser::parse_source("int A[5]; int f(int x) { return A[x]; }", 0).unwrap();
//! let typer = shadermorph_typer::Typer::new(&tu).unwrap();
//! let report = make_in_bounds(&mut tu, &typer).unwrap();
//!
//! assert_eq!(report.guarded, 1);
//! assert!(shadermorph_ast::print_translation_unit(&tu).contains("A[(x) >= 0 && (x) < 5 ? x : 0]"));
//! ```

pub mod bounds;
pub mod clamp;
pub mod collect;
mod error;
pub mod report;
mod rewrite;
pub mod safety;

pub use bounds::{Bound, Container, Signedness};
pub use error::TransformError;
pub use report::{RewriteReport, SiteOutcome, SiteReport, SkipReason};
pub use rewrite::make_in_bounds;
