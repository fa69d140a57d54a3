//! Stable expression identities.
//!
//! Every expression node carries an [`ExprId`]. Side tables such as the
//! typer's type table are keyed by it, so nodes never hold pointers into
//! analysis results and can be rewritten freely.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one expression node within a translation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExprId(pub u32);

impl ExprId {
    /// Position of this id in a dense side table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic allocator for [`ExprId`]s.
///
/// The parser hands the generator over to the translation unit so that later
/// passes allocate ids that never collide with parsed ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExprIdGen {
    next: u32,
}

impl ExprIdGen {
    /// Create a generator starting at id 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id.
    pub fn fresh(&mut self) -> ExprId {
        let id = ExprId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> usize {
        self.next as usize
    }
}
