//! Indexing-site collection.

use shadermorph_ast::walk::{for_each_root_expr, walk_expr};
use shadermorph_ast::{ExprId, ExprKind, ExternalDecl, Span};

use crate::safety::IndexLiteral;

/// One `base[index]` node, with what the later stages need to know about it.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSite {
    pub id: ExprId,
    pub span: Span,
    pub base: ExprId,
    pub base_span: Span,
    pub index: ExprId,
    pub index_span: Span,
    /// Set when the index is a bare integer literal
    pub literal: Option<IndexLiteral>,
}

/// Every indexing expression reachable from an initializer or a function
/// body, in pre-order.
///
/// Sites nested inside another site's base or index are included. Array
/// sizes in declarations are not expressions the walk reaches.
pub fn collect_sites(decls: &[ExternalDecl]) -> Vec<IndexSite> {
    let mut sites = Vec::new();
    for_each_root_expr(decls, &mut |root| {
        walk_expr(root, &mut |expr| {
            if let ExprKind::Index { base, index } = &expr.kind {
                sites.push(IndexSite {
                    id: expr.id,
                    span: expr.span,
                    base: base.id,
                    base_span: base.span,
                    index: index.id,
                    index_span: index.span,
                    literal: IndexLiteral::of(index),
                });
            }
        });
    });
    sites
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites(source: &str) -> Vec<IndexSite> {
        let tu = shadermorph_parser::parse_source(source, 0).unwrap();
        collect_sites(&tu.decls)
    }

    #[test]
    fn test_chain_is_collected_outermost_first() {
        let found = sites("void main() { a[i][j][k] = 1.0; }");
        assert_eq!(found.len(), 3);
        // Each site's base is the next site
        assert_eq!(found[0].base, found[1].id);
        assert_eq!(found[1].base, found[2].id);
        assert!(found.iter().all(|site| site.literal.is_none()));
    }

    #[test]
    fn test_sites_inside_index_expressions() {
        let found = sites("void main() { A[B[2u]] = 0; }");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].index, found[1].id);
        assert_eq!(found[1].literal, Some(IndexLiteral::Uint(2)));
    }

    #[test]
    fn test_roots_everywhere_but_array_sizes() {
        let found = sites(
            "float A[4]; float g = A[0]; \
             void main() { if (A[1] > 0.0) { return; } for (;; A[2]) {} float B[3]; }",
        );
        let literals: Vec<_> = found.iter().map(|site| site.literal).collect();
        assert_eq!(
            literals,
            vec![
                Some(IndexLiteral::Int(0)),
                Some(IndexLiteral::Int(1)),
                Some(IndexLiteral::Int(2)),
            ]
        );
    }

    #[test]
    fn test_unique_sites() {
        let found = sites("void main() { m[0][1] = v[m[1][0].x == 0.0 ? 1 : 2]; }");
        let mut ids: Vec<_> = found.iter().map(|site| site.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), found.len());
        assert_eq!(found.len(), 5);
    }
}
