//! Per-site record of what a pass did.

use serde::{Deserialize, Serialize};
use shadermorph_ast::{ExprId, Span};

use crate::bounds::{Container, Signedness};

/// Why a site was left alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Base is not an array, matrix or vector
    NotIndexable { ty: String },
    /// Array whose length is only known at run time
    UnsizedArray,
}

/// Outcome of one indexing site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SiteOutcome {
    Guarded {
        bound: u32,
        signedness: Signedness,
        container: Container,
    },
    /// Literal index already inside the bound
    AlreadySafe { value: u64 },
    Skipped { reason: SkipReason },
}

/// One indexing site, identified by its `base[index]` node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteReport {
    pub site: ExprId,
    pub span: Span,
    pub outcome: SiteOutcome,
}

/// Every site a pass visited, in pre-order, with totals per outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteReport {
    pub sites: Vec<SiteReport>,
    pub guarded: usize,
    pub already_safe: usize,
    pub skipped: usize,
}

impl RewriteReport {
    pub fn push(&mut self, site: SiteReport) {
        match site.outcome {
            SiteOutcome::Guarded { .. } => self.guarded += 1,
            SiteOutcome::AlreadySafe { .. } => self.already_safe += 1,
            SiteOutcome::Skipped { .. } => self.skipped += 1,
        }
        self.sites.push(site);
    }

    /// Check whether the pass changed the program.
    pub fn changed(&self) -> bool {
        self.guarded > 0
    }
}
