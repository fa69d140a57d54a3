//! Constant-integer evaluation for array sizes.
//!
//! Covers what GLSL allows in a sized declaration: integer literals, `const`
//! integer variables, parentheses, unary and binary integer arithmetic and
//! the conditional operator. Anything else, including overflow and division
//! by zero, is "not constant".

use shadermorph_ast::{BinaryOp, Expr, ExprKind, UnaryOp};

/// Evaluate `expr` as a constant integer.
///
/// `lookup` returns the value of a `const` integer variable by name.
pub fn eval_const_int<F>(expr: &Expr, lookup: &F) -> Option<i64>
where
    F: Fn(&str) -> Option<i64>,
{
    match &expr.kind {
        ExprKind::IntLiteral(literal) => Some(literal.value),
        ExprKind::UintLiteral(literal) => i64::try_from(literal.value).ok(),
        ExprKind::Variable(name) => lookup(name.as_ref()),
        ExprKind::Paren(inner) => eval_const_int(inner, lookup),
        ExprKind::Unary { op, operand } => {
            let value = eval_const_int(operand, lookup)?;
            match op {
                UnaryOp::Plus => Some(value),
                UnaryOp::Neg => value.checked_neg(),
                UnaryOp::BitNot => Some(!value),
                _ => None,
            }
        }
        ExprKind::Binary { op, left, right } => {
            let l = eval_const_int(left, lookup)?;
            let r = eval_const_int(right, lookup)?;
            match op {
                BinaryOp::Add => l.checked_add(r),
                BinaryOp::Sub => l.checked_sub(r),
                BinaryOp::Mul => l.checked_mul(r),
                BinaryOp::Div => l.checked_div(r),
                BinaryOp::Mod => l.checked_rem(r),
                BinaryOp::Shl => l.checked_shl(u32::try_from(r).ok()?),
                BinaryOp::Shr => l.checked_shr(u32::try_from(r).ok()?),
                BinaryOp::BitAnd => Some(l & r),
                BinaryOp::BitOr => Some(l | r),
                BinaryOp::BitXor => Some(l ^ r),
                _ => None,
            }
        }
        ExprKind::Ternary {
            condition,
            then_expr,
            else_expr,
        } => {
            let branch = if eval_const_bool(condition, lookup)? {
                then_expr
            } else {
                else_expr
            };
            eval_const_int(branch, lookup)
        }
        _ => None,
    }
}

fn eval_const_bool<F>(expr: &Expr, lookup: &F) -> Option<bool>
where
    F: Fn(&str) -> Option<i64>,
{
    match &expr.kind {
        ExprKind::BoolLiteral(value) => Some(*value),
        ExprKind::Paren(inner) => eval_const_bool(inner, lookup),
        ExprKind::Unary {
            op: UnaryOp::Not,
            operand,
        } => eval_const_bool(operand, lookup).map(|value| !value),
        ExprKind::Binary { op, left, right } if op.is_comparison() => {
            let l = eval_const_int(left, lookup)?;
            let r = eval_const_int(right, lookup)?;
            Some(match op {
                BinaryOp::Lt => l < r,
                BinaryOp::Gt => l > r,
                BinaryOp::Le => l <= r,
                BinaryOp::Ge => l >= r,
                BinaryOp::Eq => l == r,
                _ => l != r,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Expr {
        let tu = shadermorph_parser::parse_source(&format!("int probe = {};", source), 0).unwrap();
        match &tu.decls[0] {
            shadermorph_ast::ExternalDecl::Declaration(decl) => {
                decl.declarators[0].initializer.clone().unwrap()
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    fn no_consts(_: &str) -> Option<i64> {
        None
    }

    #[test]
    fn test_literals_and_arithmetic() {
        assert_eq!(eval_const_int(&parse("4"), &no_consts), Some(4));
        assert_eq!(eval_const_int(&parse("3u"), &no_consts), Some(3));
        assert_eq!(eval_const_int(&parse("(2 + 3) * 4"), &no_consts), Some(20));
        assert_eq!(eval_const_int(&parse("1 << 3"), &no_consts), Some(8));
        assert_eq!(eval_const_int(&parse("-2 + 5"), &no_consts), Some(3));
    }

    #[test]
    fn test_const_variables() {
        let lookup = |name: &str| (name == "N").then_some(4);
        assert_eq!(eval_const_int(&parse("N * 2"), &lookup), Some(8));
        assert_eq!(eval_const_int(&parse("M"), &lookup), None);
    }

    #[test]
    fn test_conditional() {
        assert_eq!(eval_const_int(&parse("1 < 2 ? 7 : 9"), &no_consts), Some(7));
    }

    #[test]
    fn test_not_constant() {
        assert_eq!(eval_const_int(&parse("1 / 0"), &no_consts), None);
        assert_eq!(eval_const_int(&parse("f(2)"), &no_consts), None);
        assert_eq!(eval_const_int(&parse("1.0"), &no_consts), None);
    }
}
