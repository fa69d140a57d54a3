//! Typing whole programs parsed from source.

use shadermorph_ast::{Expr, ExprKind, ScalarKind, Type, TypeOracle, walk};
use shadermorph_typer::{TypeError, Typer};

fn typed(source: &str) -> (shadermorph_ast::TranslationUnit, Typer) {
    let tu = shadermorph_parser::parse_source(source, 0).unwrap();
    let typer = Typer::new(&tu).unwrap();
    (tu, typer)
}

fn type_errors(source: &str) -> Vec<TypeError> {
    let tu = shadermorph_parser::parse_source(source, 0).unwrap();
    Typer::new(&tu).unwrap_err()
}

/// Types of every index base in source order (pre-order walk).
fn index_base_types(source: &str) -> Vec<Option<Type>> {
    let (tu, typer) = typed(source);
    let mut types = Vec::new();
    walk::for_each_root_expr(&tu.decls, &mut |root: &Expr| {
        walk::walk_expr(root, &mut |e| {
            if let ExprKind::Index { base, .. } = &e.kind {
                types.push(typer.type_of(base.id).cloned());
            }
        });
    });
    types
}

/// Types of every root expression of `main`'s expression statements.
fn root_types(source: &str) -> Vec<Option<Type>> {
    let (tu, typer) = typed(source);
    let mut types = Vec::new();
    walk::for_each_root_expr(&tu.decls, &mut |root: &Expr| {
        types.push(typer.type_of(root.id).cloned());
    });
    types
}

#[test]
fn test_chained_array_of_matrices() {
    let types = index_base_types(
        "void main() { mat4x2 As[5]; int x, y, z; As[x][y][z] = 1.0; }",
    );
    let mats = Type::array(Type::matrix(4, 2), Some(5));
    assert_eq!(
        types,
        vec![
            Some(Type::vector(ScalarKind::Float, 2)),
            Some(Type::matrix(4, 2)),
            Some(mats),
        ]
    );
}

#[test]
fn test_multidimensional_array_is_outermost_first() {
    let types = index_base_types("void main() { float G[3][7]; int i; G[i][i] = 0.0; }");
    assert_eq!(
        types,
        vec![
            Some(Type::array(Type::float(), Some(7))),
            Some(Type::array(Type::array(Type::float(), Some(7)), Some(3))),
        ]
    );
}

#[test]
fn test_type_dims_sit_inside_declarator_dims() {
    let types = index_base_types("void main() { int[4] A[3]; int i; A[i][i] = 0; }");
    let row = Type::array(Type::int(), Some(4));
    assert_eq!(
        types,
        vec![Some(row.clone()), Some(Type::array(row, Some(3)))]
    );
}

#[test]
fn test_constant_array_sizes() {
    let types = index_base_types(
        "const int N = 4; const uint M = 2u; float A[N * 2 + 1]; float B[M]; \
         void main() { A[0] = B[0]; }",
    );
    assert_eq!(
        types,
        vec![
            Some(Type::array(Type::float(), Some(9))),
            Some(Type::array(Type::float(), Some(2))),
        ]
    );
}

#[test]
fn test_interface_block_members() {
    let types = index_base_types(
        "uniform Lights { vec4 colors[8]; } lights; \
         buffer Data { uint values[]; }; \
         void main() { int i; lights.colors[i] = vec4(0.0); values[i] = 1u; }",
    );
    assert_eq!(
        types,
        vec![
            Some(Type::array(Type::vector(ScalarKind::Float, 4), Some(8))),
            Some(Type::array(Type::uint(), None)),
        ]
    );
}

#[test]
fn test_struct_fields() {
    let types = index_base_types(
        "struct S { ivec3 v; float w[2]; }; S s; void main() { s.w[s.v.x] = 1.0; }",
    );
    assert_eq!(types, vec![Some(Type::array(Type::float(), Some(2)))]);
}

#[test]
fn test_swizzles_and_builtins() {
    let types = root_types(
        "void main() { vec4 v; uint c; \
         v.xy; v.bgr; v.x; uaddCarry(1u, 2u, c); length(v); }",
    );
    assert_eq!(
        types,
        vec![
            Some(Type::vector(ScalarKind::Float, 2)),
            Some(Type::vector(ScalarKind::Float, 3)),
            Some(Type::float()),
            Some(Type::uint()),
            Some(Type::float()),
        ]
    );
}

#[test]
fn test_user_function_overloads() {
    let types = root_types(
        "int f(int a) { return a; } \
         uint f(uint a) { return a; } \
         void main() { f(1); f(1u); }",
    );
    // Roots: both return statements, then the two calls
    assert_eq!(
        types,
        vec![
            Some(Type::int()),
            Some(Type::uint()),
            Some(Type::int()),
            Some(Type::uint()),
        ]
    );
}

#[test]
fn test_prototype_then_call_before_definition() {
    let types = root_types("float g(); void main() { g(); } float g() { return 1.0; }");
    assert_eq!(types, vec![Some(Type::float()), Some(Type::float())]);
}

#[test]
fn test_scoping_shadows_and_restores() {
    let types = root_types("int x; void main() { { float x; x; } x; }");
    assert_eq!(types, vec![Some(Type::float()), Some(Type::int())]);
}

#[test]
fn test_for_loop_variable_is_scoped() {
    let errors = type_errors("void main() { for (int i = 0; i < 4; ++i) {} i; }");
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        TypeError::UndeclaredIdentifier { name, .. } if name == "i"
    ));
}

#[test]
fn test_independent_errors_are_collected() {
    let errors = type_errors(
        "void main() { undeclared; float f; f[0]; Missing m; int k = nope(1); }",
    );
    assert_eq!(errors.len(), 4);
    assert!(matches!(errors[0], TypeError::UndeclaredIdentifier { .. }));
    assert!(matches!(errors[1], TypeError::NotIndexable { .. }));
    assert!(matches!(errors[2], TypeError::UnknownType { .. }));
    assert!(matches!(errors[3], TypeError::UnknownFunction { .. }));
}

#[test]
fn test_non_constant_array_size() {
    let errors = type_errors("int n; float A[n];");
    assert!(matches!(errors[..], [TypeError::NonConstantArraySize { .. }]));
}

#[test]
fn test_error_messages() {
    let errors = type_errors("void main() { vec2 v; v.z; }");
    assert_eq!(
        errors[0].to_string(),
        "type 'vec2' has no member or swizzle 'z'"
    );
}

#[test]
fn test_every_parsed_expression_is_typed() {
    let source = "uniform sampler2D tex; out vec4 color; \
                  void main() { vec2 uv = gl_FragCoord.xy / 2.0; \
                  color = texture(tex, uv) * (uv.x > 0.5 ? 1.0 : 0.0); }";
    let (tu, typer) = typed(source);
    assert_eq!(typer.typed_count(), tu.expr_ids.allocated());
}
