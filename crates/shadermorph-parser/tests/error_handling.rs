//! Error handling tests for the GLSL parser.

use logos::Logos;
use shadermorph_lexer::Token;
use shadermorph_parser::{ParseError, ParseErrorKind, parse_expr, parse_source};

/// Helper to verify that parsing fails with at least one error.
fn expect_error(source: &str) -> Vec<ParseError> {
    match parse_source(source, 0) {
        Ok(_) => panic!("Expected parse error, but parsing succeeded"),
        Err(errors) => {
            assert!(!errors.is_empty(), "Expected at least one error");
            errors
        }
    }
}

#[test]
fn test_unclosed_function_body() {
    let errors = expect_error("void main() { int x;");
    assert!(
        errors.iter().any(|e| e.kind == ParseErrorKind::UnexpectedEof),
        "Should report unexpected end of input, got: {:?}",
        errors
    );
}

#[test]
fn test_missing_bracket() {
    let errors = expect_error("void main() { A[1; }");
    assert!(errors.iter().any(|e| e.message.contains("expected")));
}

#[test]
fn test_invalid_assignment_target() {
    let errors = expect_error("void main() { 1 = x; }");
    assert_eq!(errors[0].kind, ParseErrorKind::InvalidSyntax);
}

#[test]
fn test_lexical_error_has_byte_span() {
    let errors = expect_error("void main() { int x = 1 @ 2; }");
    assert_eq!(errors[0].kind, ParseErrorKind::Lexical);
    assert_eq!(errors[0].span.start, 24);
    assert_eq!(errors[0].span.end, 25);
}

#[test]
fn test_recovers_and_reports_each_bad_declaration() {
    let errors = expect_error("int a = ; float b; int c = );");
    assert_eq!(errors.len(), 2, "got: {:?}", errors);
}

#[test]
fn test_trailing_tokens_after_expression() {
    let tokens: Vec<Token> = Token::lexer("a b").filter_map(Result::ok).collect();
    let errors = parse_expr(&tokens, 0).expect_err("trailing token");
    assert_eq!(errors[0].kind, ParseErrorKind::UnexpectedToken);
}

#[test]
fn test_error_span_points_at_offending_token() {
    let errors = expect_error("void main() { return 1 }");
    // `}` at byte 23 where `;` was expected
    assert_eq!(errors[0].span.start, 23);
}
