//! Guard synthesis.
//!
//! ```text
//! signed:    (i) >= 0 && (i) < N ? i : 0
//! unsigned:  (i) < Nu ? i : 0u
//! ```
//!
//! The index appears verbatim in every position, so side effects in it run
//! once per occurrence. Only the branch copy keeps the original node ids.

use shadermorph_ast::{BinaryOp, Expr, ExprIdGen, ExprKind, Literal, Span};

use crate::bounds::Signedness;

/// Builds guard nodes with fresh ids, all located at the guarded index.
struct GuardBuilder<'a> {
    ids: &'a mut ExprIdGen,
    span: Span,
}

impl GuardBuilder<'_> {
    fn node(&mut self, kind: ExprKind) -> Expr {
        Expr::new(self.ids.fresh(), kind, self.span)
    }

    fn binary(&mut self, op: BinaryOp, left: Expr, right: Expr) -> Expr {
        self.node(ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// `(index)` as a fresh copy.
    fn parenthesized_copy(&mut self, index: &Expr) -> Expr {
        let copy = index.clone_with_fresh_ids(self.ids);
        self.node(ExprKind::Paren(Box::new(copy)))
    }

    fn literal(&mut self, value: u32, signedness: Signedness) -> Expr {
        match signedness {
            Signedness::Signed => self.node(ExprKind::IntLiteral(Literal::new(i64::from(value)))),
            Signedness::Unsigned => self.node(ExprKind::UintLiteral(Literal::new(u64::from(value)))),
        }
    }
}

/// Replace `index` with a conditional whose value always lies in `[0, bound)`.
///
/// The result has the same static type as `index`.
pub fn guard_index(index: Expr, bound: u32, signedness: Signedness, ids: &mut ExprIdGen) -> Expr {
    let mut builder = GuardBuilder {
        ids,
        span: index.span,
    };

    let upper = {
        let copy = builder.parenthesized_copy(&index);
        let limit = builder.literal(bound, signedness);
        builder.binary(BinaryOp::Lt, copy, limit)
    };
    let condition = match signedness {
        Signedness::Signed => {
            let copy = builder.parenthesized_copy(&index);
            let zero = builder.literal(0, signedness);
            let lower = builder.binary(BinaryOp::Ge, copy, zero);
            builder.binary(BinaryOp::LogicalAnd, lower, upper)
        }
        Signedness::Unsigned => upper,
    };

    let fallback = builder.literal(0, signedness);
    builder.node(ExprKind::Ternary {
        condition: Box::new(condition),
        then_expr: Box::new(index),
        else_expr: Box::new(fallback),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadermorph_ast::print_expr;
    use shadermorph_ast::walk::walk_expr;

    fn variable(ids: &mut ExprIdGen, name: &str) -> Expr {
        Expr::new(ids.fresh(), ExprKind::Variable(name.into()), Span::zero(0))
    }

    #[test]
    fn test_signed_guard() {
        let mut ids = ExprIdGen::new();
        let x = variable(&mut ids, "x");
        let guarded = guard_index(x, 5, Signedness::Signed, &mut ids);
        assert_eq!(print_expr(&guarded), "(x) >= 0 && (x) < 5 ? x : 0");
    }

    #[test]
    fn test_unsigned_guard() {
        let mut ids = ExprIdGen::new();
        let x = variable(&mut ids, "x");
        let guarded = guard_index(x, 16, Signedness::Unsigned, &mut ids);
        assert_eq!(print_expr(&guarded), "(x) < 16u ? x : 0u");
    }

    #[test]
    fn test_compound_index_is_copied_whole() {
        let mut ids = ExprIdGen::new();
        let i = variable(&mut ids, "i");
        let one = Expr::new(ids.fresh(), ExprKind::IntLiteral(Literal::new(1)), Span::zero(0));
        let sum = Expr::new(
            ids.fresh(),
            ExprKind::Binary {
                op: BinaryOp::Add,
                left: Box::new(i),
                right: Box::new(one),
            },
            Span::zero(0),
        );
        let guarded = guard_index(sum, 3, Signedness::Signed, &mut ids);
        assert_eq!(print_expr(&guarded), "(i + 1) >= 0 && (i + 1) < 3 ? i + 1 : 0");
    }

    #[test]
    fn test_original_ids_stay_in_branch_only() {
        let mut ids = ExprIdGen::new();
        let x = variable(&mut ids, "x");
        let original = x.id;
        let guarded = guard_index(x, 4, Signedness::Signed, &mut ids);

        let ExprKind::Ternary { then_expr, .. } = &guarded.kind else {
            panic!("guard is not a conditional");
        };
        assert_eq!(then_expr.id, original);

        let mut all = Vec::new();
        walk_expr(&guarded, &mut |e| all.push(e.id));
        assert_eq!(all.iter().filter(|id| **id == original).count(), 1);
        let mut unique = all.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), all.len());
    }
}
