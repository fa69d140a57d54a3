//! Declarations: qualifiers, type specifiers, variables, structs, interface
//! blocks and functions.

use std::rc::Rc;

use super::{Block, Expr};
use crate::foundation::{BasicType, Span};

/// Precision qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    High,
    Medium,
    Low,
}

impl Precision {
    pub fn keyword(self) -> &'static str {
        match self {
            Precision::High => "highp",
            Precision::Medium => "mediump",
            Precision::Low => "lowp",
        }
    }
}

/// One `name` or `name = value` entry of a `layout(...)` qualifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutId {
    pub name: Rc<str>,
    pub value: Option<i64>,
}

/// Any qualifier that may precede a type specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeQualifier {
    Const,
    Uniform,
    Buffer,
    Shared,
    In,
    Out,
    InOut,
    Attribute,
    Varying,
    Centroid,
    Flat,
    Smooth,
    Invariant,
    Coherent,
    Volatile,
    Restrict,
    ReadOnly,
    WriteOnly,
    Precision(Precision),
    Layout(Vec<LayoutId>),
}

impl TypeQualifier {
    /// Keyword for every qualifier except `layout(...)`.
    pub fn keyword(&self) -> Option<&'static str> {
        Some(match self {
            TypeQualifier::Const => "const",
            TypeQualifier::Uniform => "uniform",
            TypeQualifier::Buffer => "buffer",
            TypeQualifier::Shared => "shared",
            TypeQualifier::In => "in",
            TypeQualifier::Out => "out",
            TypeQualifier::InOut => "inout",
            TypeQualifier::Attribute => "attribute",
            TypeQualifier::Varying => "varying",
            TypeQualifier::Centroid => "centroid",
            TypeQualifier::Flat => "flat",
            TypeQualifier::Smooth => "smooth",
            TypeQualifier::Invariant => "invariant",
            TypeQualifier::Coherent => "coherent",
            TypeQualifier::Volatile => "volatile",
            TypeQualifier::Restrict => "restrict",
            TypeQualifier::ReadOnly => "readonly",
            TypeQualifier::WriteOnly => "writeonly",
            TypeQualifier::Precision(p) => p.keyword(),
            TypeQualifier::Layout(_) => return None,
        })
    }
}

/// The type part of a declaration, before any array dimensions.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpecifier {
    Void,
    Basic(BasicType),
    /// Sampler, image or atomic counter
    Opaque(Rc<str>),
    /// Inline struct definition
    Struct(StructDef),
    /// Reference to a previously defined struct
    Named(Rc<str>),
}

/// Qualifiers plus type specifier.
///
/// `int[4] a[3]` keeps `[4]` here; it applies inside the declarator's own
/// dimensions, so `a` is three arrays of four.
#[derive(Debug, Clone, PartialEq)]
pub struct FullySpecifiedType {
    pub qualifiers: Vec<TypeQualifier>,
    pub specifier: TypeSpecifier,
    pub array_dims: Vec<ArraySize>,
}

impl FullySpecifiedType {
    pub fn is_const(&self) -> bool {
        self.qualifiers.contains(&TypeQualifier::Const)
    }
}

/// One array dimension of a declarator.
#[derive(Debug, Clone, PartialEq)]
pub enum ArraySize {
    /// `[expr]` - a constant integer expression
    Sized(Expr),
    /// `[]`
    Unsized,
}

/// A declared name with optional array dimensions and initializer.
///
/// `float a[2][3]` has two dimensions, outermost first.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: Rc<str>,
    pub array_dims: Vec<ArraySize>,
    pub initializer: Option<Expr>,
    pub span: Span,
}

/// Variable declaration `qualifiers type a, b[2] = ...;`.
///
/// A struct definition without declarators (`struct S { ... };`) is a
/// declaration with an empty declarator list.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub ty: FullySpecifiedType,
    pub declarators: Vec<Declarator>,
    pub span: Span,
}

/// Members sharing one type inside a struct or interface block.
#[derive(Debug, Clone, PartialEq)]
pub struct StructMember {
    pub ty: FullySpecifiedType,
    pub declarators: Vec<Declarator>,
}

/// `struct Name { members }`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    pub name: Option<Rc<str>>,
    pub members: Vec<StructMember>,
    pub span: Span,
}

/// Instance name of an interface block, e.g. `buf` in `uniform B { ... } buf;`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockInstance {
    pub name: Rc<str>,
    pub array_dims: Vec<ArraySize>,
}

/// `layout(std140) uniform Block { members } instance;`.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceBlock {
    pub qualifiers: Vec<TypeQualifier>,
    pub block_name: Rc<str>,
    pub members: Vec<StructMember>,
    pub instance: Option<BlockInstance>,
    pub span: Span,
}

/// One function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub ty: FullySpecifiedType,
    pub name: Option<Rc<str>>,
    pub array_dims: Vec<ArraySize>,
}

/// Function signature.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionPrototype {
    pub return_type: FullySpecifiedType,
    pub name: Rc<str>,
    pub params: Vec<ParamDecl>,
    pub span: Span,
}

/// Function definition with body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub prototype: FunctionPrototype,
    pub body: Block,
}

/// Top-level item of a translation unit.
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalDecl {
    /// Preprocessor line kept verbatim (`#version 300 es`)
    Directive(Rc<str>),
    /// `precision mediump float;`
    Precision {
        precision: Precision,
        specifier: TypeSpecifier,
    },
    Declaration(Declaration),
    InterfaceBlock(InterfaceBlock),
    Prototype(FunctionPrototype),
    Function(FunctionDef),
    /// Qualifiers with no declared name, e.g. `layout(local_size_x = 8) in;`
    QualifierOnly(Vec<TypeQualifier>),
}
