//! Expression precedence and associativity tests.
//!
//! These tests verify the Pratt parser follows GLSL's operator table, and
//! that printing a parsed expression reproduces its grouping.

use logos::Logos;
use shadermorph_ast::{BinaryOp, Expr, ExprKind, UnaryOp, print_expr};
use shadermorph_lexer::Token;
use shadermorph_parser::parse_expr;

/// Helper to parse an expression from source.
fn parse(source: &str) -> Expr {
    let tokens: Vec<Token> = Token::lexer(source).filter_map(Result::ok).collect();
    parse_expr(&tokens, 0).expect("Parse failed")
}

/// Helper to get the operator and operands of a binary expression.
fn binary(expr: &Expr) -> (BinaryOp, &Expr, &Expr) {
    match &expr.kind {
        ExprKind::Binary { op, left, right } => (*op, left.as_ref(), right.as_ref()),
        other => panic!("expected binary expression, got {:?}", other),
    }
}

// =============================================================================
// Binary operators
// =============================================================================

#[test]
fn test_mul_binds_tighter_than_add() {
    let expr = parse("a + b * c");
    let (op, left, right) = binary(&expr);
    assert_eq!(op, BinaryOp::Add);
    assert!(matches!(left.kind, ExprKind::Variable(_)));
    assert_eq!(binary(right).0, BinaryOp::Mul);
}

#[test]
fn test_sub_left_associative() {
    // a - b - c should parse as: (a - b) - c
    let expr = parse("a - b - c");
    let (op, left, right) = binary(&expr);
    assert_eq!(op, BinaryOp::Sub);
    assert_eq!(binary(left).0, BinaryOp::Sub);
    assert!(matches!(right.kind, ExprKind::Variable(_)));
}

#[test]
fn test_relational_binds_tighter_than_logical_and() {
    let expr = parse("(x) >= 0 && (x) < 5");
    let (op, left, right) = binary(&expr);
    assert_eq!(op, BinaryOp::LogicalAnd);
    assert_eq!(binary(left).0, BinaryOp::Ge);
    assert_eq!(binary(right).0, BinaryOp::Lt);
}

#[test]
fn test_logical_operator_ladder() {
    // || < ^^ < && < | < ^ < & < ==
    let expr = parse("a || b ^^ c && d | e ^ f & g == h");
    let (op, _, rest) = binary(&expr);
    assert_eq!(op, BinaryOp::LogicalOr);
    let (op, _, rest) = binary(rest);
    assert_eq!(op, BinaryOp::LogicalXor);
    let (op, _, rest) = binary(rest);
    assert_eq!(op, BinaryOp::LogicalAnd);
    let (op, _, rest) = binary(rest);
    assert_eq!(op, BinaryOp::BitOr);
    let (op, _, rest) = binary(rest);
    assert_eq!(op, BinaryOp::BitXor);
    let (op, _, rest) = binary(rest);
    assert_eq!(op, BinaryOp::BitAnd);
    assert_eq!(binary(rest).0, BinaryOp::Eq);
}

#[test]
fn test_shift_between_relational_and_additive() {
    let expr = parse("a < b << c + d");
    let (op, _, rest) = binary(&expr);
    assert_eq!(op, BinaryOp::Lt);
    let (op, _, rest) = binary(rest);
    assert_eq!(op, BinaryOp::Shl);
    assert_eq!(binary(rest).0, BinaryOp::Add);
}

#[test]
fn test_comma_is_lowest() {
    let expr = parse("a = 1, b = 2");
    let (op, left, right) = binary(&expr);
    assert_eq!(op, BinaryOp::Comma);
    assert!(matches!(left.kind, ExprKind::Assign { .. }));
    assert!(matches!(right.kind, ExprKind::Assign { .. }));
}

// =============================================================================
// Conditional and assignment
// =============================================================================

#[test]
fn test_ternary_condition_and_branches() {
    let expr = parse("a < 5 ? a : 0");
    match &expr.kind {
        ExprKind::Ternary {
            condition,
            then_expr,
            else_expr,
        } => {
            assert_eq!(binary(condition).0, BinaryOp::Lt);
            assert!(matches!(then_expr.kind, ExprKind::Variable(_)));
            assert_eq!(else_expr.as_int_literal(), Some(0));
        }
        other => panic!("expected ternary, got {:?}", other),
    }
}

#[test]
fn test_ternary_right_associative() {
    let expr = parse("a ? b : c ? d : e");
    match &expr.kind {
        ExprKind::Ternary { else_expr, .. } => {
            assert!(matches!(else_expr.kind, ExprKind::Ternary { .. }));
        }
        other => panic!("expected ternary, got {:?}", other),
    }
}

#[test]
fn test_assignment_right_associative() {
    let expr = parse("a = b += c");
    match &expr.kind {
        ExprKind::Assign { value, .. } => {
            assert!(matches!(value.kind, ExprKind::Assign { .. }));
        }
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_indexed_assignment_target() {
    let expr = parse("A[i] = 2");
    match &expr.kind {
        ExprKind::Assign { target, .. } => {
            assert!(matches!(target.kind, ExprKind::Index { .. }));
        }
        other => panic!("expected assignment, got {:?}", other),
    }
}

// =============================================================================
// Unary and postfix
// =============================================================================

#[test]
fn test_unary_binds_tighter_than_binary() {
    let expr = parse("-a * b");
    let (op, left, _) = binary(&expr);
    assert_eq!(op, BinaryOp::Mul);
    assert!(matches!(
        left.kind,
        ExprKind::Unary {
            op: UnaryOp::Neg,
            ..
        }
    ));
}

#[test]
fn test_postfix_binds_tighter_than_prefix() {
    let expr = parse("-A[i]");
    match &expr.kind {
        ExprKind::Unary { op, operand } => {
            assert_eq!(*op, UnaryOp::Neg);
            assert!(matches!(operand.kind, ExprKind::Index { .. }));
        }
        other => panic!("expected unary, got {:?}", other),
    }
}

#[test]
fn test_chained_indexing_is_left_nested() {
    // m[1][2] indexes the column m[1]
    let expr = parse("m[1][2]");
    match &expr.kind {
        ExprKind::Index { base, index } => {
            assert!(matches!(base.kind, ExprKind::Index { .. }));
            assert_eq!(index.as_int_literal(), Some(2));
        }
        other => panic!("expected index, got {:?}", other),
    }
}

#[test]
fn test_member_length_and_swizzle() {
    assert!(matches!(parse("a.length()").kind, ExprKind::Length(_)));
    match parse("v.xy").kind {
        ExprKind::Member { member, .. } => assert_eq!(&*member, "xy"),
        other => panic!("expected member, got {:?}", other),
    }
}

#[test]
fn test_postfix_increment() {
    assert!(matches!(
        parse("i++").kind,
        ExprKind::Unary {
            op: UnaryOp::PostInc,
            ..
        }
    ));
    assert!(matches!(
        parse("--i").kind,
        ExprKind::Unary {
            op: UnaryOp::PreDec,
            ..
        }
    ));
}

#[test]
fn test_constructor_call_args() {
    match parse("vec3(1.0, x, 2u)").kind {
        ExprKind::Call { callee, args } => {
            assert_eq!(&*callee, "vec3");
            assert_eq!(args.len(), 3);
            assert_eq!(args[2].as_uint_literal(), Some(2));
        }
        other => panic!("expected call, got {:?}", other),
    }
}

// =============================================================================
// Printing
// =============================================================================

#[test]
fn test_print_preserves_explicit_parentheses() {
    for source in [
        "(a + b) * c",
        "a - (b - c)",
        "(x) >= 0 && (x) < 5 ? x : 0",
        "A[B[i]]",
        "m[(i) < 2u ? i : 0u][j]",
        "- -x",
        "f(a, (b, c))",
    ] {
        assert_eq!(print_expr(&parse(source)), source);
    }
}

#[test]
fn test_every_node_gets_a_distinct_id() {
    let expr = parse("A[i + 1] = B[j] * 2");
    let mut ids = Vec::new();
    shadermorph_ast::walk::walk_expr(&expr, &mut |e| ids.push(e.id));
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(ids.len(), unique.len());
}
