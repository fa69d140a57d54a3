//! Expression type inference.
//!
//! Types are synthesized bottom-up: every child is typed before its parent,
//! and each result is recorded in the dense table under the node's id.

use shadermorph_ast::{BasicType, BinaryOp, Expr, ExprKind, ScalarKind, Type, UnaryOp};
use tracing::trace;

use crate::TypeError;
use crate::builtins;
use crate::typer::TypingContext;

impl TypingContext {
    /// Infer, record and return the type of `expr` and all its sub-expressions.
    pub(crate) fn type_expr(&mut self, expr: &Expr) -> Result<Type, TypeError> {
        let span = expr.span;

        let ty = match &expr.kind {
            // === Literals ===
            ExprKind::IntLiteral(_) => Type::int(),
            ExprKind::UintLiteral(_) => Type::uint(),
            ExprKind::FloatLiteral(_) => Type::float(),
            ExprKind::BoolLiteral(_) => Type::boolean(),

            // === References ===
            ExprKind::Variable(name) => match self.scopes.lookup(name) {
                Some(binding) => binding.ty.clone(),
                None => builtins::variable_type(name).ok_or_else(|| {
                    TypeError::UndeclaredIdentifier {
                        name: name.to_string(),
                        span,
                    }
                })?,
            },

            ExprKind::Call { callee, args } => {
                let arg_types = args
                    .iter()
                    .map(|arg| self.type_expr(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                self.call_type(callee, &arg_types, expr)?
            }

            // === Access ===
            ExprKind::Index { base, index } => {
                let base_ty = self.type_expr(base)?;
                self.type_expr(index)?;
                base_ty.element_type().ok_or_else(|| TypeError::NotIndexable {
                    ty: base_ty.to_string(),
                    span,
                })?
            }

            ExprKind::Member { base, member } => {
                let base_ty = self.type_expr(base)?;
                self.member_type(&base_ty, member)
                    .ok_or_else(|| TypeError::UnknownMember {
                        ty: base_ty.to_string(),
                        member: member.to_string(),
                        span,
                    })?
            }

            ExprKind::Length(base) => {
                let base_ty = self.type_expr(base)?;
                let has_length = base_ty.is_array()
                    || base_ty.vector_size().is_some()
                    || base_ty.matrix_dims().is_some();
                if !has_length {
                    return Err(TypeError::UnknownMember {
                        ty: base_ty.to_string(),
                        member: "length".to_string(),
                        span,
                    });
                }
                Type::int()
            }

            // === Operators ===
            ExprKind::Unary { op, operand } => {
                let operand_ty = self.type_expr(operand)?;
                match op {
                    UnaryOp::Not => Type::boolean(),
                    _ => operand_ty,
                }
            }

            ExprKind::Binary { op, left, right } => {
                let left_ty = self.type_expr(left)?;
                let right_ty = self.type_expr(right)?;
                binary_type(*op, &left_ty, &right_ty).ok_or_else(|| {
                    TypeError::InvalidOperands {
                        op: op.symbol().to_string(),
                        left: left_ty.to_string(),
                        right: right_ty.to_string(),
                        span,
                    }
                })?
            }

            ExprKind::Assign { target, value, .. } => {
                let target_ty = self.type_expr(target)?;
                self.type_expr(value)?;
                target_ty
            }

            ExprKind::Ternary {
                condition,
                then_expr,
                else_expr,
            } => {
                self.type_expr(condition)?;
                let then_ty = self.type_expr(then_expr)?;
                self.type_expr(else_expr)?;
                then_ty
            }

            ExprKind::Paren(inner) => self.type_expr(inner)?,
        };

        self.record(expr, ty.clone());
        Ok(ty)
    }

    fn record(&mut self, expr: &Expr, ty: Type) {
        trace!(id = %expr.id, ty = %ty, "typed");
        let index = expr.id.index();
        if index >= self.types.len() {
            self.types.resize(index + 1, None);
        }
        self.types[index] = Some(ty);
    }

    /// Resolve a call: constructors first, then user functions, then
    /// built-ins.
    fn call_type(&self, callee: &str, args: &[Type], expr: &Expr) -> Result<Type, TypeError> {
        if let Some(basic) = BasicType::from_name(callee) {
            return Ok(Type::Basic(basic));
        }
        if self.structs.contains(callee) {
            return Ok(Type::Struct(callee.to_string()));
        }

        if let Some(overloads) = self.functions.get(callee) {
            let exact = overloads.iter().find(|sig| sig.params.as_slice() == args);
            let same_arity = overloads.iter().find(|sig| sig.params.len() == args.len());
            if let Some(sig) = exact.or(same_arity) {
                return Ok(sig.return_type.clone());
            }
        }

        builtins::call_type(callee, args).ok_or_else(|| TypeError::UnknownFunction {
            name: callee.to_string(),
            args: args
                .iter()
                .map(Type::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            span: expr.span,
        })
    }

    /// Struct field or vector swizzle.
    fn member_type(&self, base: &Type, member: &str) -> Option<Type> {
        match base {
            Type::Struct(name) => self.structs.get(name)?.get(member).cloned(),
            Type::Basic(basic) => swizzle_type(basic, member),
            _ => None,
        }
    }
}

/// Type of a swizzle such as `.xy` or `.bgra`.
///
/// All components must come from one naming set and exist in the vector.
fn swizzle_type(basic: &BasicType, swizzle: &str) -> Option<Type> {
    const SETS: [&str; 3] = ["xyzw", "rgba", "stpq"];

    let (kind, size) = match basic {
        BasicType::Scalar(kind) => (*kind, 1),
        BasicType::Vector { scalar, size } => (*scalar, *size),
        BasicType::Matrix { .. } => return None,
    };
    if swizzle.is_empty() || swizzle.len() > 4 {
        return None;
    }

    let set = SETS
        .iter()
        .find(|set| swizzle.chars().all(|c| set.contains(c)))?;
    let in_range = swizzle
        .chars()
        .all(|c| set.find(c).is_some_and(|position| position < size as usize));
    in_range.then(|| Type::scalar_or_vector(kind, swizzle.len() as u8))
}

/// Result type of a binary operator.
///
/// Component-wise arithmetic broadcasts a scalar operand to the other
/// operand's shape. `*` with a matrix operand is the linear-algebra product.
fn binary_type(op: BinaryOp, left: &Type, right: &Type) -> Option<Type> {
    if op == BinaryOp::Comma {
        return Some(right.clone());
    }
    if op.is_comparison() || op.is_logical() {
        return Some(Type::boolean());
    }

    let (l, r) = (left.as_basic()?, right.as_basic()?);
    let result = match (op, l, r) {
        (BinaryOp::Mul, BasicType::Matrix { rows, .. }, BasicType::Matrix { columns, .. }) => {
            BasicType::Matrix {
                columns: *columns,
                rows: *rows,
            }
        }
        (BinaryOp::Mul, BasicType::Matrix { rows, .. }, BasicType::Vector { .. }) => {
            BasicType::Vector {
                scalar: ScalarKind::Float,
                size: *rows,
            }
        }
        (BinaryOp::Mul, BasicType::Vector { .. }, BasicType::Matrix { columns, .. }) => {
            BasicType::Vector {
                scalar: ScalarKind::Float,
                size: *columns,
            }
        }
        (BinaryOp::Shl | BinaryOp::Shr, _, _) => *l,
        (_, BasicType::Scalar(_), _) => *r,
        _ => *l,
    };
    Some(Type::Basic(result))
}
