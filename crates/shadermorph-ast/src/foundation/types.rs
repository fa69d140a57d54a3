//! Static types of GLSL expressions.
//!
//! The type system distinguishes:
//! - **Basic types** - scalars, vectors (`vecN`, `ivecN`, `uvecN`, `bvecN`)
//!   and float matrices (`matN`, `matCxR`)
//! - **Arrays** - element type plus a length that is known statically for
//!   every sized declaration
//! - **Structs** - user-defined and interface-block types, by name
//! - **Opaque** - samplers, images and atomic counters
//!
//! # Examples
//!
//! ```
//! # use shadermorph_ast::foundation::types::*;
//! let m = BasicType::from_name("mat4x2").unwrap();
//! assert_eq!(m, BasicType::Matrix { columns: 4, rows: 2 });
//!
//! let arr = Type::array(Type::Basic(m), Some(5));
//! assert_eq!(arr.array_length(), Some(5));
//! assert_eq!(arr.to_string(), "mat4x2[5]");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::ExprId;

/// Scalar component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    Bool,
    Int,
    Uint,
    Float,
}

impl ScalarKind {
    /// GLSL keyword for the scalar type.
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::Uint => "uint",
            ScalarKind::Float => "float",
        }
    }

    /// Prefix used by vector type names (`ivec3`, `bvec2`, ...).
    fn vector_prefix(self) -> &'static str {
        match self {
            ScalarKind::Bool => "b",
            ScalarKind::Int => "i",
            ScalarKind::Uint => "u",
            ScalarKind::Float => "",
        }
    }
}

/// Built-in non-opaque GLSL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicType {
    Scalar(ScalarKind),
    /// Vector with 2, 3 or 4 components
    Vector { scalar: ScalarKind, size: u8 },
    /// Float matrix with `columns` column vectors of `rows` components
    Matrix { columns: u8, rows: u8 },
}

impl BasicType {
    /// Look up a built-in type by its GLSL name.
    pub fn from_name(name: &str) -> Option<Self> {
        let scalar = match name {
            "bool" => Some(ScalarKind::Bool),
            "int" => Some(ScalarKind::Int),
            "uint" => Some(ScalarKind::Uint),
            "float" => Some(ScalarKind::Float),
            _ => None,
        };
        if let Some(kind) = scalar {
            return Some(BasicType::Scalar(kind));
        }

        if let Some(dims) = name.strip_prefix("mat") {
            return parse_matrix_dims(dims).map(|(columns, rows)| BasicType::Matrix { columns, rows });
        }

        let (scalar, rest) = match name.as_bytes().first() {
            Some(b'b') => (ScalarKind::Bool, &name[1..]),
            Some(b'i') => (ScalarKind::Int, &name[1..]),
            Some(b'u') => (ScalarKind::Uint, &name[1..]),
            _ => (ScalarKind::Float, name),
        };
        let size = parse_dim(rest.strip_prefix("vec")?)?;
        Some(BasicType::Vector { scalar, size })
    }

    /// Scalar kind of the components (`Float` for matrices).
    pub fn scalar_kind(&self) -> ScalarKind {
        match self {
            BasicType::Scalar(kind) => *kind,
            BasicType::Vector { scalar, .. } => *scalar,
            BasicType::Matrix { .. } => ScalarKind::Float,
        }
    }

    /// Same shape with a different component kind.
    ///
    /// Matrices only exist for floats, so they keep their kind.
    pub fn with_scalar(&self, kind: ScalarKind) -> BasicType {
        match self {
            BasicType::Scalar(_) => BasicType::Scalar(kind),
            BasicType::Vector { size, .. } => BasicType::Vector { scalar: kind, size: *size },
            BasicType::Matrix { .. } => *self,
        }
    }
}

fn parse_dim(text: &str) -> Option<u8> {
    match text {
        "2" => Some(2),
        "3" => Some(3),
        "4" => Some(4),
        _ => None,
    }
}

fn parse_matrix_dims(text: &str) -> Option<(u8, u8)> {
    match text.split_once('x') {
        Some((columns, rows)) => Some((parse_dim(columns)?, parse_dim(rows)?)),
        None => parse_dim(text).map(|n| (n, n)),
    }
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasicType::Scalar(kind) => write!(f, "{}", kind.name()),
            BasicType::Vector { scalar, size } => write!(f, "{}vec{}", scalar.vector_prefix(), size),
            BasicType::Matrix { columns, rows } if columns == rows => write!(f, "mat{}", columns),
            BasicType::Matrix { columns, rows } => write!(f, "mat{}x{}", columns, rows),
        }
    }
}

/// Static type of a GLSL expression or declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Void,
    Basic(BasicType),
    /// Array; `length` is `None` only for unsized (runtime-sized) arrays
    Array {
        element: Box<Type>,
        length: Option<u32>,
    },
    /// User struct or interface block, by name
    Struct(String),
    /// Sampler, image or atomic counter, by name
    Opaque(String),
}

impl Type {
    /// The `int` type.
    pub const fn int() -> Self {
        Type::Basic(BasicType::Scalar(ScalarKind::Int))
    }

    /// The `uint` type.
    pub const fn uint() -> Self {
        Type::Basic(BasicType::Scalar(ScalarKind::Uint))
    }

    /// The `float` type.
    pub const fn float() -> Self {
        Type::Basic(BasicType::Scalar(ScalarKind::Float))
    }

    /// The `bool` type.
    pub const fn boolean() -> Self {
        Type::Basic(BasicType::Scalar(ScalarKind::Bool))
    }

    /// Vector type with `size` components of `scalar`.
    pub const fn vector(scalar: ScalarKind, size: u8) -> Self {
        Type::Basic(BasicType::Vector { scalar, size })
    }

    /// Float matrix type.
    pub const fn matrix(columns: u8, rows: u8) -> Self {
        Type::Basic(BasicType::Matrix { columns, rows })
    }

    /// Array of `element`.
    pub fn array(element: Type, length: Option<u32>) -> Self {
        Type::Array {
            element: Box::new(element),
            length,
        }
    }

    /// Scalar type if `size` is 1, vector type otherwise.
    pub fn scalar_or_vector(scalar: ScalarKind, size: u8) -> Self {
        if size == 1 {
            Type::Basic(BasicType::Scalar(scalar))
        } else {
            Type::vector(scalar, size)
        }
    }

    /// Check if this is an array type.
    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array { .. })
    }

    /// Statically known length of an array type.
    pub fn array_length(&self) -> Option<u32> {
        match self {
            Type::Array { length, .. } => *length,
            _ => None,
        }
    }

    /// (columns, rows) of a matrix type.
    pub fn matrix_dims(&self) -> Option<(u8, u8)> {
        match self {
            Type::Basic(BasicType::Matrix { columns, rows }) => Some((*columns, *rows)),
            _ => None,
        }
    }

    /// Component count of a vector type.
    pub fn vector_size(&self) -> Option<u8> {
        match self {
            Type::Basic(BasicType::Vector { size, .. }) => Some(*size),
            _ => None,
        }
    }

    /// Check if this is the signed integer scalar `int`.
    pub fn is_signed_integer(&self) -> bool {
        matches!(self, Type::Basic(BasicType::Scalar(ScalarKind::Int)))
    }

    /// Check if this is the unsigned integer scalar `uint`.
    pub fn is_unsigned_integer(&self) -> bool {
        matches!(self, Type::Basic(BasicType::Scalar(ScalarKind::Uint)))
    }

    /// Basic type, if this is one.
    pub fn as_basic(&self) -> Option<&BasicType> {
        match self {
            Type::Basic(basic) => Some(basic),
            _ => None,
        }
    }

    /// Type produced by indexing a value of this type once.
    ///
    /// Arrays yield their element, vectors a scalar, and a `matCxR` its
    /// `vecR` column.
    pub fn element_type(&self) -> Option<Type> {
        match self {
            Type::Array { element, .. } => Some((**element).clone()),
            Type::Basic(BasicType::Vector { scalar, .. }) => {
                Some(Type::Basic(BasicType::Scalar(*scalar)))
            }
            Type::Basic(BasicType::Matrix { rows, .. }) => Some(Type::vector(ScalarKind::Float, *rows)),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Basic(basic) => write!(f, "{}", basic),
            Type::Array {
                element,
                length: Some(n),
            } => write!(f, "{}[{}]", element, n),
            Type::Array { element, length: None } => write!(f, "{}[]", element),
            Type::Struct(name) | Type::Opaque(name) => write!(f, "{}", name),
        }
    }
}

/// Check whether `name` denotes an opaque built-in type.
pub fn is_opaque_type_name(name: &str) -> bool {
    ["sampler", "isampler", "usampler", "image", "iimage", "uimage"]
        .iter()
        .any(|prefix| name.starts_with(prefix))
        || name == "atomic_uint"
}

/// Read-only source of static expression types.
///
/// Computed once before a pass runs and queried by expression id. Passes that
/// insert nodes never ask for the types of the nodes they created.
pub trait TypeOracle {
    /// Static type of the expression with the given id, if recorded.
    fn type_of(&self, id: ExprId) -> Option<&Type>;
}

impl TypeOracle for HashMap<ExprId, Type> {
    fn type_of(&self, id: ExprId) -> Option<&Type> {
        self.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_type_names_round_trip() {
        for name in [
            "bool", "int", "uint", "float", "vec2", "vec3", "vec4", "ivec2", "uvec3", "bvec4",
            "mat2", "mat3", "mat4", "mat2x3", "mat4x2", "mat3x4",
        ] {
            let ty = BasicType::from_name(name).unwrap();
            assert_eq!(ty.to_string(), name);
        }
    }

    #[test]
    fn test_square_matrix_alias() {
        assert_eq!(
            BasicType::from_name("mat3x3"),
            Some(BasicType::Matrix { columns: 3, rows: 3 })
        );
        assert_eq!(BasicType::from_name("mat3x3").unwrap().to_string(), "mat3");
    }

    #[test]
    fn test_non_type_names() {
        for name in ["vec5", "vec", "mat1", "mat2x5", "ivec", "foo", "uvec1", "dvec2"] {
            assert_eq!(BasicType::from_name(name), None, "{}", name);
        }
    }

    #[test]
    fn test_indexing_element_types() {
        let m = Type::matrix(4, 2);
        assert_eq!(m.element_type(), Some(Type::vector(ScalarKind::Float, 2)));
        assert_eq!(
            Type::vector(ScalarKind::Uint, 3).element_type(),
            Some(Type::uint())
        );
        let arr = Type::array(m.clone(), Some(5));
        assert_eq!(arr.element_type(), Some(m));
        assert_eq!(Type::float().element_type(), None);
    }

    #[test]
    fn test_integer_signedness() {
        assert!(Type::int().is_signed_integer());
        assert!(!Type::int().is_unsigned_integer());
        assert!(Type::uint().is_unsigned_integer());
        assert!(!Type::vector(ScalarKind::Int, 2).is_signed_integer());
    }

    #[test]
    fn test_opaque_names() {
        assert!(is_opaque_type_name("sampler2D"));
        assert!(is_opaque_type_name("usampler3D"));
        assert!(is_opaque_type_name("atomic_uint"));
        assert!(!is_opaque_type_name("vec3"));
    }
}
