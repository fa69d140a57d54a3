//! Expression nodes.
//!
//! Expressions form a closed sum type. Every node owns its children, so a
//! tree stays a tree: when a pass needs the same sub-expression in two places
//! it deep-clones it with [`Expr::clone_with_fresh_ids`].

use std::rc::Rc;

use super::walk::walk_expr_post_mut;
use crate::foundation::{ExprId, ExprIdGen, Span};

/// Binding strength of expression forms, lowest to highest.
///
/// Shared by the parser (precedence climbing) and the printer (minimal
/// parenthesization) so the two never disagree.
pub mod precedence {
    pub const COMMA: u8 = 1;
    pub const ASSIGNMENT: u8 = 2;
    pub const CONDITIONAL: u8 = 3;
    pub const LOGICAL_OR: u8 = 4;
    pub const LOGICAL_XOR: u8 = 5;
    pub const LOGICAL_AND: u8 = 6;
    pub const BIT_OR: u8 = 7;
    pub const BIT_XOR: u8 = 8;
    pub const BIT_AND: u8 = 9;
    pub const EQUALITY: u8 = 10;
    pub const RELATIONAL: u8 = 11;
    pub const SHIFT: u8 = 12;
    pub const ADDITIVE: u8 = 13;
    pub const MULTIPLICATIVE: u8 = 14;
    pub const UNARY: u8 = 15;
    pub const POSTFIX: u8 = 16;
    pub const PRIMARY: u8 = 17;
}

/// Integer literal value, with its source spelling when it was parsed.
///
/// Parsed literals print as written (`0x10`, `017`); literals built by a
/// pass have no spelling and print in decimal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal<T> {
    pub value: T,
    pub spelling: Option<Rc<str>>,
}

impl<T> Literal<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            spelling: None,
        }
    }

    pub fn spelled(value: T, spelling: Rc<str>) -> Self {
        Self {
            value,
            spelling: Some(spelling),
        }
    }
}

/// An expression node with its identity and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// Key into side tables such as the typer's
    pub id: ExprId,
    pub kind: ExprKind,
    pub span: Span,
}

/// The expression forms of the language.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Signed integer literal `17`
    IntLiteral(Literal<i64>),
    /// Unsigned integer literal `17u`
    UintLiteral(Literal<u64>),
    /// Float literal, spelled as in the source
    FloatLiteral(Rc<str>),
    BoolLiteral(bool),
    /// Variable reference
    Variable(Rc<str>),
    /// Function call or constructor `vec3(1.0)`
    Call { callee: Rc<str>, args: Vec<Expr> },
    /// Indexing `base[index]` of an array, matrix or vector
    Index { base: Box<Expr>, index: Box<Expr> },
    /// Struct member access or vector swizzle `base.member`
    Member { base: Box<Expr>, member: Rc<str> },
    /// Array length query `base.length()`
    Length(Box<Expr>),
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    /// Conditional `condition ? then_expr : else_expr`
    Ternary {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    /// Explicit parentheses, kept so printing round-trips
    Paren(Box<Expr>),
}

/// Unary operators, prefix and postfix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
    BitNot,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::PreInc | UnaryOp::PostInc => "++",
            UnaryOp::PreDec | UnaryOp::PostDec => "--",
        }
    }

    pub fn is_postfix(self) -> bool {
        matches!(self, UnaryOp::PostInc | UnaryOp::PostDec)
    }
}

/// Binary operators, including the sequencing comma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Shl,
    Shr,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitXor,
    BitOr,
    LogicalAnd,
    LogicalXor,
    LogicalOr,
    Comma,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::BitOr => "|",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalXor => "^^",
            BinaryOp::LogicalOr => "||",
            BinaryOp::Comma => ",",
        }
    }

    /// Precedence level; all binary operators are left associative.
    pub fn precedence(self) -> u8 {
        use precedence::*;
        match self {
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => MULTIPLICATIVE,
            BinaryOp::Add | BinaryOp::Sub => ADDITIVE,
            BinaryOp::Shl | BinaryOp::Shr => SHIFT,
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => RELATIONAL,
            BinaryOp::Eq | BinaryOp::Ne => EQUALITY,
            BinaryOp::BitAnd => BIT_AND,
            BinaryOp::BitXor => BIT_XOR,
            BinaryOp::BitOr => BIT_OR,
            BinaryOp::LogicalAnd => LOGICAL_AND,
            BinaryOp::LogicalXor => LOGICAL_XOR,
            BinaryOp::LogicalOr => LOGICAL_OR,
            BinaryOp::Comma => COMMA,
        }
    }

    /// Comparison operators produce `bool` regardless of operand type.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge | BinaryOp::Eq | BinaryOp::Ne
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(
            self,
            BinaryOp::LogicalAnd | BinaryOp::LogicalXor | BinaryOp::LogicalOr
        )
    }
}

/// Plain and compound assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Shl,
    Shr,
    BitAnd,
    BitXor,
    BitOr,
}

impl AssignOp {
    pub fn symbol(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Mod => "%=",
            AssignOp::Shl => "<<=",
            AssignOp::Shr => ">>=",
            AssignOp::BitAnd => "&=",
            AssignOp::BitXor => "^=",
            AssignOp::BitOr => "|=",
        }
    }
}

impl Expr {
    pub fn new(id: ExprId, kind: ExprKind, span: Span) -> Self {
        Self { id, kind, span }
    }

    /// Binding strength of this node's outermost form.
    pub fn precedence(&self) -> u8 {
        use precedence::*;
        match &self.kind {
            ExprKind::Binary { op, .. } => op.precedence(),
            ExprKind::Assign { .. } => ASSIGNMENT,
            ExprKind::Ternary { .. } => CONDITIONAL,
            ExprKind::Unary { op, .. } if op.is_postfix() => POSTFIX,
            ExprKind::Unary { .. } => UNARY,
            ExprKind::Index { .. }
            | ExprKind::Member { .. }
            | ExprKind::Length(_)
            | ExprKind::Call { .. } => POSTFIX,
            ExprKind::IntLiteral(Literal {
                value,
                spelling: None,
            }) if *value < 0 => UNARY,
            _ => PRIMARY,
        }
    }

    /// Value of a signed integer literal node.
    pub fn as_int_literal(&self) -> Option<i64> {
        match &self.kind {
            ExprKind::IntLiteral(literal) => Some(literal.value),
            _ => None,
        }
    }

    /// Value of an unsigned integer literal node.
    pub fn as_uint_literal(&self) -> Option<u64> {
        match &self.kind {
            ExprKind::UintLiteral(literal) => Some(literal.value),
            _ => None,
        }
    }

    /// Deep copy of this sub-tree in which every node gets a new id.
    ///
    /// The copy shares no nodes with the original.
    pub fn clone_with_fresh_ids(&self, ids: &mut ExprIdGen) -> Expr {
        let mut copy = self.clone();
        walk_expr_post_mut(&mut copy, &mut |node: &mut Expr| {
            node.id = ids.fresh();
        });
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::walk::walk_expr;

    fn leaf(ids: &mut ExprIdGen, kind: ExprKind) -> Expr {
        Expr::new(ids.fresh(), kind, Span::zero(0))
    }

    #[test]
    fn test_clone_with_fresh_ids_renumbers_every_node() {
        let mut ids = ExprIdGen::new();
        let x = leaf(&mut ids, ExprKind::Variable(Rc::from("x")));
        let one = leaf(&mut ids, ExprKind::IntLiteral(Literal::new(1)));
        let sum = Expr::new(
            ids.fresh(),
            ExprKind::Binary {
                op: BinaryOp::Add,
                left: Box::new(x),
                right: Box::new(one),
            },
            Span::zero(0),
        );

        let copy = sum.clone_with_fresh_ids(&mut ids);

        let mut original_ids = Vec::new();
        walk_expr(&sum, &mut |e| original_ids.push(e.id));
        let mut copy_ids = Vec::new();
        walk_expr(&copy, &mut |e| copy_ids.push(e.id));

        assert_eq!(copy_ids.len(), 3);
        assert!(copy_ids.iter().all(|id| !original_ids.contains(id)));
        assert_eq!(copy.kind_without_ids(), sum.kind_without_ids());
    }

    #[test]
    fn test_literal_accessors() {
        let mut ids = ExprIdGen::new();
        let int = ExprKind::IntLiteral(Literal::new(3));
        let uint = ExprKind::UintLiteral(Literal::spelled(3, Rc::from("0x3u")));
        assert_eq!(leaf(&mut ids, int).as_int_literal(), Some(3));
        assert_eq!(leaf(&mut ids, uint.clone()).as_uint_literal(), Some(3));
        assert_eq!(leaf(&mut ids, uint).as_int_literal(), None);
    }

    #[test]
    fn test_operator_precedence_order() {
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::Lt.precedence() > BinaryOp::LogicalAnd.precedence());
        assert!(BinaryOp::LogicalAnd.precedence() > BinaryOp::LogicalOr.precedence());
        assert!(BinaryOp::LogicalOr.precedence() > precedence::CONDITIONAL);
    }

    impl Expr {
        /// Structural rendering that ignores ids, for comparing clones.
        fn kind_without_ids(&self) -> String {
            crate::printer::print_expr(self)
        }
    }
}
