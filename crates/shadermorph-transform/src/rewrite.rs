//! The `make_in_bounds` pass.
//!
//! Runs in two phases. Planning walks the untouched tree, asks the oracle
//! about every site and decides its outcome; this is the only phase that can
//! fail. Rewriting then walks the tree post-order and replaces the index of
//! every site planned for a guard. Inner sites are therefore rewritten before
//! the sites that contain them, and an index holding another site is copied
//! in its guarded form.

use std::collections::HashMap;

use shadermorph_ast::walk::{for_each_root_expr_mut, walk_expr_post_mut};
use shadermorph_ast::{ExprId, ExprKind, Span, TranslationUnit, Type, TypeOracle};
use tracing::{debug, info, instrument};

use crate::bounds::{Signedness, resolve_bound};
use crate::clamp::guard_index;
use crate::collect::{IndexSite, collect_sites};
use crate::report::{RewriteReport, SiteOutcome, SiteReport};
use crate::TransformError;

/// Bound every array, matrix and vector index in `tu`.
///
/// Each index whose value is not statically known to be in range is replaced
/// by a conditional that yields the original value when it is in range and
/// `0` otherwise. Literal indices already in range and bases that are not
/// sized arrays, matrices or vectors are left as they are.
///
/// Types come from `oracle`, computed for `tu` before the call. On error the
/// program is unchanged.
#[instrument(skip_all)]
pub fn make_in_bounds<O>(tu: &mut TranslationUnit, oracle: &O) -> Result<RewriteReport, TransformError>
where
    O: TypeOracle + ?Sized,
{
    let sites = collect_sites(&tu.decls);

    let mut report = RewriteReport::default();
    let mut guards: HashMap<ExprId, (u32, Signedness)> = HashMap::new();
    for site in &sites {
        let outcome = plan_site(site, oracle)?;
        debug!(site = %site.id, ?outcome, "index site");
        if let SiteOutcome::Guarded {
            bound, signedness, ..
        } = outcome
        {
            guards.insert(site.id, (bound, signedness));
        }
        report.push(SiteReport {
            site: site.id,
            span: site.span,
            outcome,
        });
    }

    if !guards.is_empty() {
        let ids = &mut tu.expr_ids;
        for_each_root_expr_mut(&mut tu.decls, &mut |root| {
            walk_expr_post_mut(root, &mut |expr| {
                let Some(&(bound, signedness)) = guards.get(&expr.id) else {
                    return;
                };
                if let ExprKind::Index { index, .. } = &mut expr.kind {
                    let original = (**index).clone();
                    **index = guard_index(original, bound, signedness, ids);
                }
            });
        });
    }

    info!(
        sites = report.sites.len(),
        guarded = report.guarded,
        already_safe = report.already_safe,
        skipped = report.skipped,
        "indices bounded"
    );
    Ok(report)
}

/// Decide what happens to one site.
fn plan_site<O>(site: &IndexSite, oracle: &O) -> Result<SiteOutcome, TransformError>
where
    O: TypeOracle + ?Sized,
{
    let base_ty = lookup(oracle, site.base, site.base_span)?;
    let index_ty = lookup(oracle, site.index, site.index_span)?;

    let bound = match resolve_bound(base_ty) {
        Ok(bound) => bound,
        Err(reason) => return Ok(SiteOutcome::Skipped { reason }),
    };
    let signedness = Signedness::of(index_ty).ok_or_else(|| TransformError::NonIntegerIndex {
        ty: index_ty.to_string(),
        span: site.index_span,
    })?;

    if let Some(value) = site.literal.and_then(|literal| literal.within(bound.length)) {
        return Ok(SiteOutcome::AlreadySafe { value });
    }
    Ok(SiteOutcome::Guarded {
        bound: bound.length,
        signedness,
        container: bound.container,
    })
}

fn lookup<O>(oracle: &O, id: ExprId, span: Span) -> Result<&Type, TransformError>
where
    O: TypeOracle + ?Sized,
{
    oracle
        .type_of(id)
        .ok_or(TransformError::MissingType { id, span })
}
