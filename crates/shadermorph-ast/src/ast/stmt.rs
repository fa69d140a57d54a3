//! Statement nodes.

use super::{Declaration, Expr};
use crate::foundation::Span;

/// `{ statements }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Declaration(Declaration),
    Expr(Expr),
    Block(Block),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    /// `for (init; condition; step) body`; `init` is a declaration,
    /// expression or empty statement
    For {
        init: Box<Stmt>,
        condition: Option<Expr>,
        step: Option<Expr>,
        body: Box<Stmt>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        condition: Expr,
    },
    Switch {
        selector: Expr,
        body: Block,
    },
    /// `case value:` label inside a switch body
    Case(Expr),
    /// `default:` label inside a switch body
    Default,
    Return(Option<Expr>),
    Break,
    Continue,
    Discard,
    /// Lone `;`
    Empty,
}
