//! Built-in variables and functions.
//!
//! Functions are grouped by how their result type follows from the argument
//! types, which is all the typer needs: it never checks argument validity
//! beyond arity and the shape the result is derived from.

use shadermorph_ast::{BasicType, ScalarKind, Type};

/// Type of a built-in `gl_*` variable.
pub fn variable_type(name: &str) -> Option<Type> {
    use ScalarKind::*;
    Some(match name {
        "gl_Position" | "gl_FragCoord" | "gl_FragColor" => Type::vector(Float, 4),
        "gl_PointCoord" => Type::vector(Float, 2),
        "gl_PointSize" | "gl_FragDepth" => Type::float(),
        "gl_FrontFacing" | "gl_HelperInvocation" => Type::boolean(),
        "gl_VertexID" | "gl_InstanceID" | "gl_PrimitiveID" | "gl_Layer" | "gl_ViewportIndex" => {
            Type::int()
        }
        "gl_GlobalInvocationID"
        | "gl_LocalInvocationID"
        | "gl_WorkGroupID"
        | "gl_NumWorkGroups"
        | "gl_WorkGroupSize" => Type::vector(Uint, 3),
        "gl_LocalInvocationIndex" => Type::uint(),
        "gl_MaxDrawBuffers" | "gl_MaxVertexAttribs" | "gl_MaxTextureImageUnits" => Type::int(),
        _ => return None,
    })
}

/// How a built-in function's result type is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// Same type as the first argument (`sin`, `clamp`, `uaddCarry`, ...)
    First,
    /// Same type as the last argument (`step`, `smoothstep`)
    Last,
    /// Fixed result
    Fixed(FixedResult),
    /// Component kind replaced, shape kept (`floatBitsToInt`, `isnan`, ...)
    Recast(ScalarKind),
    /// `bvecN` matching the first argument (`lessThan`, ...)
    BoolVector,
    /// Scalar of the first argument's component kind (`length`, `dot`)
    Component,
    Transpose,
    OuterProduct,
    /// Texel type selected by the sampler or image argument
    Texel,
    /// Size query of a sampler or image argument
    SizeQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FixedResult {
    Void,
    Bool,
    Int,
    Uint,
    Float,
    Vec2,
    Vec3,
    Vec4,
}

impl FixedResult {
    fn to_type(self) -> Type {
        use ScalarKind::Float;
        match self {
            FixedResult::Void => Type::Void,
            FixedResult::Bool => Type::boolean(),
            FixedResult::Int => Type::int(),
            FixedResult::Uint => Type::uint(),
            FixedResult::Float => Type::float(),
            FixedResult::Vec2 => Type::vector(Float, 2),
            FixedResult::Vec3 => Type::vector(Float, 3),
            FixedResult::Vec4 => Type::vector(Float, 4),
        }
    }
}

fn shape_of(name: &str) -> Option<Shape> {
    use FixedResult as R;
    Some(match name {
        // Angle, trigonometry, exponential and common functions
        "radians" | "degrees" | "sin" | "cos" | "tan" | "asin" | "acos" | "atan" | "sinh"
        | "cosh" | "tanh" | "asinh" | "acosh" | "atanh" | "pow" | "exp" | "log" | "exp2"
        | "log2" | "sqrt" | "inversesqrt" | "abs" | "sign" | "floor" | "trunc" | "round"
        | "roundEven" | "ceil" | "fract" | "mod" | "modf" | "min" | "max" | "clamp" | "mix"
        | "fma" | "frexp" | "ldexp" => Shape::First,
        "step" | "smoothstep" => Shape::Last,

        // Geometric
        "length" | "distance" | "dot" => Shape::Component,
        "cross" => Shape::Fixed(R::Vec3),
        "normalize" | "faceforward" | "reflect" | "refract" => Shape::First,

        // Derivatives
        "dFdx" | "dFdy" | "fwidth" | "dFdxFine" | "dFdyFine" | "dFdxCoarse" | "dFdyCoarse" => {
            Shape::First
        }

        // Matrix
        "matrixCompMult" | "inverse" => Shape::First,
        "transpose" => Shape::Transpose,
        "outerProduct" => Shape::OuterProduct,
        "determinant" => Shape::Fixed(R::Float),

        // Vector relational
        "lessThan" | "lessThanEqual" | "greaterThan" | "greaterThanEqual" | "equal"
        | "notEqual" => Shape::BoolVector,
        "any" | "all" => Shape::Fixed(R::Bool),
        "not" => Shape::First,
        "isnan" | "isinf" => Shape::Recast(ScalarKind::Bool),

        // Bit casts
        "floatBitsToInt" => Shape::Recast(ScalarKind::Int),
        "floatBitsToUint" => Shape::Recast(ScalarKind::Uint),
        "intBitsToFloat" | "uintBitsToFloat" => Shape::Recast(ScalarKind::Float),

        // Integer
        "uaddCarry" | "usubBorrow" | "bitfieldExtract" | "bitfieldInsert" | "bitfieldReverse" => {
            Shape::First
        }
        "umulExtended" | "imulExtended" => Shape::Fixed(R::Void),
        "bitCount" | "findLSB" | "findMSB" => Shape::Recast(ScalarKind::Int),

        // Packing
        "packUnorm2x16" | "packSnorm2x16" | "packHalf2x16" | "packUnorm4x8" | "packSnorm4x8" => {
            Shape::Fixed(R::Uint)
        }
        "unpackUnorm2x16" | "unpackSnorm2x16" | "unpackHalf2x16" => Shape::Fixed(R::Vec2),
        "unpackUnorm4x8" | "unpackSnorm4x8" => Shape::Fixed(R::Vec4),

        // Textures and images
        "texture" | "textureProj" | "textureLod" | "textureOffset" | "texelFetch"
        | "texelFetchOffset" | "textureProjOffset" | "textureLodOffset" | "textureProjLod"
        | "textureGrad" | "textureGradOffset" | "textureProjGrad" | "textureGather"
        | "textureGatherOffset" | "imageLoad" => Shape::Texel,
        "texture2D" | "texture2DProj" | "texture2DLod" | "textureCube" | "textureCubeLod" => {
            Shape::Fixed(R::Vec4)
        }
        "textureSize" | "imageSize" => Shape::SizeQuery,
        "textureQueryLevels" | "textureSamples" | "imageSamples" => Shape::Fixed(R::Int),
        "imageStore" => Shape::Fixed(R::Void),

        // Atomics
        "atomicAdd" | "atomicMin" | "atomicMax" | "atomicAnd" | "atomicOr" | "atomicXor"
        | "atomicExchange" | "atomicCompSwap" | "imageAtomicAdd" | "imageAtomicMin"
        | "imageAtomicMax" | "imageAtomicAnd" | "imageAtomicOr" | "imageAtomicXor"
        | "imageAtomicExchange" | "imageAtomicCompSwap" => Shape::Last,
        "atomicCounterIncrement" | "atomicCounterDecrement" | "atomicCounter" => {
            Shape::Fixed(R::Uint)
        }

        // Synchronization and geometry
        "barrier" | "memoryBarrier" | "memoryBarrierShared" | "memoryBarrierBuffer"
        | "memoryBarrierImage" | "memoryBarrierAtomicCounter" | "groupMemoryBarrier"
        | "EmitVertex" | "EndPrimitive" => Shape::Fixed(R::Void),

        _ => return None,
    })
}

/// Result type of calling built-in `name` with arguments of `args` types.
///
/// `None` when `name` is not a built-in or the arguments lack the shape the
/// result is derived from.
pub fn call_type(name: &str, args: &[Type]) -> Option<Type> {
    let shape = shape_of(name)?;
    match shape {
        Shape::Fixed(result) => Some(result.to_type()),
        Shape::First => args.first().cloned(),
        Shape::Last => args.last().cloned(),
        Shape::Recast(kind) => {
            let basic = args.first()?.as_basic()?;
            Some(Type::Basic(basic.with_scalar(kind)))
        }
        Shape::BoolVector => {
            let size = args.first()?.vector_size()?;
            Some(Type::vector(ScalarKind::Bool, size))
        }
        Shape::Component => {
            let kind = args.first()?.as_basic()?.scalar_kind();
            Some(Type::Basic(BasicType::Scalar(kind)))
        }
        Shape::Transpose => {
            let (columns, rows) = args.first()?.matrix_dims()?;
            Some(Type::matrix(rows, columns))
        }
        Shape::OuterProduct => {
            let rows = args.first()?.vector_size()?;
            let columns = args.get(1)?.vector_size()?;
            Some(Type::matrix(columns, rows))
        }
        Shape::Texel => Some(texel_type(opaque_name(args.first()?)?)),
        Shape::SizeQuery => Some(size_type(opaque_name(args.first()?)?)),
    }
}

/// Check whether `name` is a built-in function.
pub fn is_function(name: &str) -> bool {
    shape_of(name).is_some()
}

fn opaque_name(ty: &Type) -> Option<&str> {
    match ty {
        Type::Opaque(name) => Some(name),
        _ => None,
    }
}

/// `vec4`, `ivec4` or `uvec4` by sampler prefix; `float` for shadow samplers.
fn texel_type(sampler: &str) -> Type {
    if sampler.ends_with("Shadow") {
        return Type::float();
    }
    let kind = if sampler.starts_with("isampler") || sampler.starts_with("iimage") {
        ScalarKind::Int
    } else if sampler.starts_with("usampler") || sampler.starts_with("uimage") {
        ScalarKind::Uint
    } else {
        ScalarKind::Float
    };
    Type::vector(kind, 4)
}

/// Dimensionality of a sampler or image size query.
fn size_type(sampler: &str) -> Type {
    let is_array = sampler.contains("Array");
    let dims = if sampler.contains("1DArray") || (sampler.contains("2D") && !is_array) {
        2
    } else if sampler.contains("1D") || sampler.contains("Buffer") {
        1
    } else if sampler.contains("Cube") && !is_array {
        2
    } else {
        3
    };
    Type::scalar_or_vector(ScalarKind::Int, dims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen_type_functions_keep_argument_type() {
        let vec3 = Type::vector(ScalarKind::Float, 3);
        assert_eq!(call_type("clamp", &[vec3.clone(), Type::float(), Type::float()]), Some(vec3.clone()));
        assert_eq!(call_type("step", &[Type::float(), vec3.clone()]), Some(vec3));
    }

    #[test]
    fn test_uadd_carry_returns_uint() {
        let args = [Type::uint(), Type::uint(), Type::uint()];
        assert_eq!(call_type("uaddCarry", &args), Some(Type::uint()));
    }

    #[test]
    fn test_recast_and_relational() {
        let v = Type::vector(ScalarKind::Float, 2);
        assert_eq!(
            call_type("floatBitsToUint", std::slice::from_ref(&v)),
            Some(Type::vector(ScalarKind::Uint, 2))
        );
        assert_eq!(
            call_type("lessThan", &[v.clone(), v.clone()]),
            Some(Type::vector(ScalarKind::Bool, 2))
        );
        assert_eq!(call_type("dot", &[v.clone(), v]), Some(Type::float()));
    }

    #[test]
    fn test_matrix_functions() {
        assert_eq!(call_type("transpose", &[Type::matrix(4, 2)]), Some(Type::matrix(2, 4)));
        let c = Type::vector(ScalarKind::Float, 3);
        let r = Type::vector(ScalarKind::Float, 2);
        assert_eq!(call_type("outerProduct", &[c, r]), Some(Type::matrix(2, 3)));
    }

    #[test]
    fn test_texture_lookups() {
        let sampler = Type::Opaque("usampler2D".to_string());
        let coord = Type::vector(ScalarKind::Float, 2);
        assert_eq!(
            call_type("texture", &[sampler.clone(), coord]),
            Some(Type::vector(ScalarKind::Uint, 4))
        );
        assert_eq!(
            call_type("textureSize", &[sampler, Type::int()]),
            Some(Type::vector(ScalarKind::Int, 2))
        );
        let shadow = Type::Opaque("sampler2DShadow".to_string());
        assert_eq!(call_type("texture", &[shadow]), Some(Type::float()));
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(call_type("notABuiltin", &[]), None);
        assert!(!is_function("main"));
        assert_eq!(variable_type("gl_FragCoord"), Some(Type::vector(ScalarKind::Float, 4)));
        assert_eq!(variable_type("gl_Unknown"), None);
    }
}
