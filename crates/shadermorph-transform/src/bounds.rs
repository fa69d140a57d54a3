//! Bound resolution for one indexing step.
//!
//! The bound depends only on the static type of the base being indexed:
//!
//! | base type         | container | bound   |
//! |-------------------|-----------|---------|
//! | `T[N]`            | array     | N       |
//! | `matCxR`          | matrix    | C       |
//! | `vecK` / `ivecK`… | vector    | K       |
//!
//! A matrix column is a vector, so `M[a][b]` resolves `a` against the matrix
//! (column count) and `b` against the column vector (row count).

use serde::{Deserialize, Serialize};
use shadermorph_ast::Type;
use std::fmt;

use crate::report::SkipReason;

/// Kind of value being indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    Array,
    Matrix,
    Vector,
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Container::Array => "array",
            Container::Matrix => "matrix",
            Container::Vector => "vector",
        };
        f.write_str(name)
    }
}

/// Exclusive upper bound for one indexing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bound {
    pub container: Container,
    pub length: u32,
}

/// Signedness of an index's static type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signedness {
    /// `int`: the guard checks both ends of the range
    Signed,
    /// `uint`: only the upper end can be violated
    Unsigned,
}

impl Signedness {
    /// Signedness of `int` or `uint`; `None` for any other type.
    pub fn of(ty: &Type) -> Option<Self> {
        if ty.is_signed_integer() {
            Some(Signedness::Signed)
        } else if ty.is_unsigned_integer() {
            Some(Signedness::Unsigned)
        } else {
            None
        }
    }
}

/// Classify the static type of an indexing base.
///
/// Returns why the site cannot be bounded when the type is not a sized
/// array, a matrix or a vector.
pub fn resolve_bound(base: &Type) -> Result<Bound, SkipReason> {
    if base.is_array() {
        return base
            .array_length()
            .map(|length| Bound {
                container: Container::Array,
                length,
            })
            .ok_or(SkipReason::UnsizedArray);
    }
    if let Some((columns, _rows)) = base.matrix_dims() {
        return Ok(Bound {
            container: Container::Matrix,
            length: u32::from(columns),
        });
    }
    if let Some(size) = base.vector_size() {
        return Ok(Bound {
            container: Container::Vector,
            length: u32::from(size),
        });
    }
    Err(SkipReason::NotIndexable {
        ty: base.to_string(),
    })
}
