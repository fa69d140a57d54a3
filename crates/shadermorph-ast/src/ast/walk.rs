//! Expression tree walking utilities.
//!
//! Provides shared traversal logic so that analysis and rewrite passes do not
//! duplicate recursive descent.
//!
//! # Design
//!
//! - **Closure visitors** - Caller provides `FnMut(&Expr)` / `FnMut(&mut Expr)`,
//!   not a trait hierarchy
//! - **Pre-order reads** - [`walk_expr`] visits a node before its children
//! - **Post-order writes** - [`walk_expr_post_mut`] visits children first, so a
//!   visitor that replaces parts of a node sees already-rewritten children
//! - **Roots** - [`for_each_root_expr`] finds every expression tree hanging off
//!   declarations and statements; array-size expressions are type-level and
//!   are not roots
//!
//! # Examples
//!
//! ```rust,ignore
//! use shadermorph_ast::walk::{for_each_root_expr, walk_expr};
//!
//! // Count indexing expressions in a program
//! let mut sites = 0;
//! for_each_root_expr(&tu.decls, &mut |root| {
//!     walk_expr(root, &mut |node| {
//!         if matches!(node.kind, ExprKind::Index { .. }) {
//!             sites += 1;
//!         }
//!     });
//! });
//! ```

use super::{Block, Declaration, Expr, ExprKind, ExternalDecl, Stmt};

/// Recursively walk an expression tree in pre-order, calling visitor for each node.
///
/// Children are visited left-to-right in source order.
pub fn walk_expr<V>(expr: &Expr, visitor: &mut V)
where
    V: FnMut(&Expr),
{
    visitor(expr);

    match &expr.kind {
        ExprKind::Call { args, .. } => {
            for arg in args {
                walk_expr(arg, visitor);
            }
        }

        ExprKind::Index { base, index } => {
            walk_expr(base, visitor);
            walk_expr(index, visitor);
        }

        ExprKind::Member { base, .. } | ExprKind::Length(base) => {
            walk_expr(base, visitor);
        }

        ExprKind::Unary { operand, .. } | ExprKind::Paren(operand) => {
            walk_expr(operand, visitor);
        }

        ExprKind::Binary { left, right, .. } => {
            walk_expr(left, visitor);
            walk_expr(right, visitor);
        }

        ExprKind::Assign { target, value, .. } => {
            walk_expr(target, visitor);
            walk_expr(value, visitor);
        }

        ExprKind::Ternary {
            condition,
            then_expr,
            else_expr,
        } => {
            walk_expr(condition, visitor);
            walk_expr(then_expr, visitor);
            walk_expr(else_expr, visitor);
        }

        // === Leaf nodes (no children to traverse) ===
        ExprKind::IntLiteral(_)
        | ExprKind::UintLiteral(_)
        | ExprKind::FloatLiteral(_)
        | ExprKind::BoolLiteral(_)
        | ExprKind::Variable(_) => {}
    }
}

/// Recursively walk an expression tree in post-order with mutable access.
///
/// The visitor sees every child before its parent. It may replace parts of
/// the node it is given; replaced parts are not walked again.
pub fn walk_expr_post_mut<V>(expr: &mut Expr, visitor: &mut V)
where
    V: FnMut(&mut Expr),
{
    match &mut expr.kind {
        ExprKind::Call { args, .. } => {
            for arg in args {
                walk_expr_post_mut(arg, visitor);
            }
        }

        ExprKind::Index { base, index } => {
            walk_expr_post_mut(base, visitor);
            walk_expr_post_mut(index, visitor);
        }

        ExprKind::Member { base, .. } | ExprKind::Length(base) => {
            walk_expr_post_mut(base, visitor);
        }

        ExprKind::Unary { operand, .. } | ExprKind::Paren(operand) => {
            walk_expr_post_mut(operand, visitor);
        }

        ExprKind::Binary { left, right, .. } => {
            walk_expr_post_mut(left, visitor);
            walk_expr_post_mut(right, visitor);
        }

        ExprKind::Assign { target, value, .. } => {
            walk_expr_post_mut(target, visitor);
            walk_expr_post_mut(value, visitor);
        }

        ExprKind::Ternary {
            condition,
            then_expr,
            else_expr,
        } => {
            walk_expr_post_mut(condition, visitor);
            walk_expr_post_mut(then_expr, visitor);
            walk_expr_post_mut(else_expr, visitor);
        }

        ExprKind::IntLiteral(_)
        | ExprKind::UintLiteral(_)
        | ExprKind::FloatLiteral(_)
        | ExprKind::BoolLiteral(_)
        | ExprKind::Variable(_) => {}
    }

    visitor(expr);
}

/// Call `visitor` on every root expression of a program, in source order.
///
/// Roots are variable initializers (global and local), expression
/// statements, conditions, loop steps, switch selectors, case labels and
/// return values.
pub fn for_each_root_expr<V>(decls: &[ExternalDecl], visitor: &mut V)
where
    V: FnMut(&Expr),
{
    for decl in decls {
        match decl {
            ExternalDecl::Declaration(declaration) => declaration_roots(declaration, visitor),
            ExternalDecl::Function(function) => block_roots(&function.body, visitor),
            ExternalDecl::Directive(_)
            | ExternalDecl::Precision { .. }
            | ExternalDecl::InterfaceBlock(_)
            | ExternalDecl::Prototype(_)
            | ExternalDecl::QualifierOnly(_) => {}
        }
    }
}

fn declaration_roots<V: FnMut(&Expr)>(declaration: &Declaration, visitor: &mut V) {
    for declarator in &declaration.declarators {
        if let Some(init) = &declarator.initializer {
            visitor(init);
        }
    }
}

fn block_roots<V: FnMut(&Expr)>(block: &Block, visitor: &mut V) {
    for stmt in &block.statements {
        stmt_roots(stmt, visitor);
    }
}

fn stmt_roots<V: FnMut(&Expr)>(stmt: &Stmt, visitor: &mut V) {
    match stmt {
        Stmt::Declaration(declaration) => declaration_roots(declaration, visitor),
        Stmt::Expr(expr) | Stmt::Case(expr) => visitor(expr),
        Stmt::Block(block) => block_roots(block, visitor),
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor(condition);
            stmt_roots(then_branch, visitor);
            if let Some(else_branch) = else_branch {
                stmt_roots(else_branch, visitor);
            }
        }
        Stmt::For {
            init,
            condition,
            step,
            body,
        } => {
            stmt_roots(init, visitor);
            if let Some(condition) = condition {
                visitor(condition);
            }
            if let Some(step) = step {
                visitor(step);
            }
            stmt_roots(body, visitor);
        }
        Stmt::While { condition, body } => {
            visitor(condition);
            stmt_roots(body, visitor);
        }
        Stmt::DoWhile { body, condition } => {
            stmt_roots(body, visitor);
            visitor(condition);
        }
        Stmt::Switch { selector, body } => {
            visitor(selector);
            block_roots(body, visitor);
        }
        Stmt::Return(value) => {
            if let Some(value) = value {
                visitor(value);
            }
        }
        Stmt::Default | Stmt::Break | Stmt::Continue | Stmt::Discard | Stmt::Empty => {}
    }
}

/// Mutable counterpart of [`for_each_root_expr`].
///
/// Takes the declaration list rather than the whole translation unit so the
/// caller can keep borrowing the unit's id generator while visiting.
pub fn for_each_root_expr_mut<V>(decls: &mut [ExternalDecl], visitor: &mut V)
where
    V: FnMut(&mut Expr),
{
    for decl in decls {
        match decl {
            ExternalDecl::Declaration(declaration) => declaration_roots_mut(declaration, visitor),
            ExternalDecl::Function(function) => block_roots_mut(&mut function.body, visitor),
            ExternalDecl::Directive(_)
            | ExternalDecl::Precision { .. }
            | ExternalDecl::InterfaceBlock(_)
            | ExternalDecl::Prototype(_)
            | ExternalDecl::QualifierOnly(_) => {}
        }
    }
}

fn declaration_roots_mut<V: FnMut(&mut Expr)>(declaration: &mut Declaration, visitor: &mut V) {
    for declarator in &mut declaration.declarators {
        if let Some(init) = &mut declarator.initializer {
            visitor(init);
        }
    }
}

fn block_roots_mut<V: FnMut(&mut Expr)>(block: &mut Block, visitor: &mut V) {
    for stmt in &mut block.statements {
        stmt_roots_mut(stmt, visitor);
    }
}

fn stmt_roots_mut<V: FnMut(&mut Expr)>(stmt: &mut Stmt, visitor: &mut V) {
    match stmt {
        Stmt::Declaration(declaration) => declaration_roots_mut(declaration, visitor),
        Stmt::Expr(expr) | Stmt::Case(expr) => visitor(expr),
        Stmt::Block(block) => block_roots_mut(block, visitor),
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor(condition);
            stmt_roots_mut(then_branch, visitor);
            if let Some(else_branch) = else_branch {
                stmt_roots_mut(else_branch, visitor);
            }
        }
        Stmt::For {
            init,
            condition,
            step,
            body,
        } => {
            stmt_roots_mut(init, visitor);
            if let Some(condition) = condition {
                visitor(condition);
            }
            if let Some(step) = step {
                visitor(step);
            }
            stmt_roots_mut(body, visitor);
        }
        Stmt::While { condition, body } => {
            visitor(condition);
            stmt_roots_mut(body, visitor);
        }
        Stmt::DoWhile { body, condition } => {
            stmt_roots_mut(body, visitor);
            visitor(condition);
        }
        Stmt::Switch { selector, body } => {
            visitor(selector);
            block_roots_mut(body, visitor);
        }
        Stmt::Return(value) => {
            if let Some(value) = value {
                visitor(value);
            }
        }
        Stmt::Default | Stmt::Break | Stmt::Continue | Stmt::Discard | Stmt::Empty => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        BinaryOp, Declarator, FullySpecifiedType, FunctionDef, FunctionPrototype, TypeSpecifier,
    };
    use crate::foundation::{ExprIdGen, Span};
    use std::rc::Rc;

    fn test_span() -> Span {
        Span::new(0, 10, 20)
    }

    fn var(ids: &mut ExprIdGen, name: &str) -> Expr {
        Expr::new(ids.fresh(), ExprKind::Variable(Rc::from(name)), test_span())
    }

    fn index(ids: &mut ExprIdGen, base: Expr, idx: Expr) -> Expr {
        Expr::new(
            ids.fresh(),
            ExprKind::Index {
                base: Box::new(base),
                index: Box::new(idx),
            },
            test_span(),
        )
    }

    /// `a[i][j]`
    fn chain(ids: &mut ExprIdGen) -> Expr {
        let a = var(ids, "a");
        let i = var(ids, "i");
        let inner = index(ids, a, i);
        let j = var(ids, "j");
        index(ids, inner, j)
    }

    fn names(expr: &Expr) -> Vec<String> {
        let mut out = Vec::new();
        walk_expr(expr, &mut |node| match &node.kind {
            ExprKind::Variable(name) => out.push(name.to_string()),
            ExprKind::Index { .. } => out.push("[]".to_string()),
            _ => {}
        });
        out
    }

    #[test]
    fn test_walk_leaf_node() {
        let mut ids = ExprIdGen::new();
        let expr = var(&mut ids, "x");

        let mut visit_count = 0;
        walk_expr(&expr, &mut |_| {
            visit_count += 1;
        });

        assert_eq!(visit_count, 1, "Leaf node should be visited exactly once");
    }

    #[test]
    fn test_walk_is_pre_order() {
        let mut ids = ExprIdGen::new();
        let expr = chain(&mut ids);
        assert_eq!(names(&expr), vec!["[]", "[]", "a", "i", "j"]);
    }

    #[test]
    fn test_walk_post_mut_visits_children_first() {
        let mut ids = ExprIdGen::new();
        let mut expr = chain(&mut ids);

        let mut order = Vec::new();
        walk_expr_post_mut(&mut expr, &mut |node| match &node.kind {
            ExprKind::Variable(name) => order.push(name.to_string()),
            ExprKind::Index { .. } => order.push("[]".to_string()),
            _ => {}
        });

        assert_eq!(order, vec!["a", "i", "[]", "j", "[]"]);
    }

    #[test]
    fn test_walk_post_mut_can_replace_children() {
        let mut ids = ExprIdGen::new();
        let mut expr = chain(&mut ids);

        walk_expr_post_mut(&mut expr, &mut |node| {
            if let ExprKind::Variable(name) = &mut node.kind {
                *name = Rc::from(name.to_uppercase());
            }
        });

        assert_eq!(names(&expr), vec!["[]", "[]", "A", "I", "J"]);
    }

    #[test]
    fn test_walk_binary_operands() {
        let mut ids = ExprIdGen::new();
        let left = var(&mut ids, "x");
        let right = var(&mut ids, "y");
        let expr = Expr::new(
            ids.fresh(),
            ExprKind::Binary {
                op: BinaryOp::Add,
                left: Box::new(left),
                right: Box::new(right),
            },
            test_span(),
        );

        let mut visit_count = 0;
        walk_expr(&expr, &mut |_| visit_count += 1);
        assert_eq!(visit_count, 3, "Should visit Binary + left + right");
    }

    #[test]
    fn test_roots_cover_initializers_and_statements() {
        let mut ids = ExprIdGen::new();
        let int_ty = FullySpecifiedType {
            qualifiers: Vec::new(),
            specifier: TypeSpecifier::Basic(crate::foundation::BasicType::Scalar(
                crate::foundation::ScalarKind::Int,
            )),
            array_dims: Vec::new(),
        };
        let global = Declaration {
            ty: int_ty.clone(),
            declarators: vec![Declarator {
                name: Rc::from("g"),
                array_dims: Vec::new(),
                initializer: Some(var(&mut ids, "init")),
                span: test_span(),
            }],
            span: test_span(),
        };
        let body = Block {
            statements: vec![
                Stmt::Expr(var(&mut ids, "stmt")),
                Stmt::If {
                    condition: var(&mut ids, "cond"),
                    then_branch: Box::new(Stmt::Return(Some(var(&mut ids, "ret")))),
                    else_branch: None,
                },
            ],
            span: test_span(),
        };
        let function = FunctionDef {
            prototype: FunctionPrototype {
                return_type: int_ty,
                name: Rc::from("f"),
                params: Vec::new(),
                span: test_span(),
            },
            body,
        };
        let mut decls = vec![
            ExternalDecl::Directive(Rc::from("#version 300 es")),
            ExternalDecl::Declaration(global),
            ExternalDecl::Function(function),
        ];

        let mut roots = Vec::new();
        for_each_root_expr(&decls, &mut |root| roots.extend(names(root)));
        assert_eq!(roots, vec!["init", "stmt", "cond", "ret"]);

        let mut mutable_roots = 0;
        for_each_root_expr_mut(&mut decls, &mut |_| mutable_roots += 1);
        assert_eq!(mutable_roots, 4);
    }
}
