//! Declaration and statement walk that drives expression typing.

use indexmap::IndexMap;
use shadermorph_ast::{
    ArraySize, Block, Declaration, Expr, ExprId, ExternalDecl, FullySpecifiedType, FunctionDef,
    FunctionPrototype, InterfaceBlock, Span, Stmt, StructDef, StructMember, TranslationUnit, Type,
    TypeOracle, TypeSpecifier,
};
use std::rc::Rc;
use tracing::{debug, instrument};

use crate::TypeError;
use crate::const_eval::eval_const_int;
use crate::scope::{Binding, Scopes, StructFields, StructRegistry};

/// Static types of every expression in one translation unit.
///
/// Built once by [`Typer::new`] and then only read, through
/// [`TypeOracle::type_of`].
#[derive(Debug, Clone)]
pub struct Typer {
    types: Vec<Option<Type>>,
}

impl Typer {
    /// Type every expression reachable from a declaration or statement.
    ///
    /// All independent errors are collected; the program is only considered
    /// typed if there are none.
    #[instrument(skip_all, name = "typer")]
    pub fn new(tu: &TranslationUnit) -> Result<Self, Vec<TypeError>> {
        let mut ctx = TypingContext::new(tu.expr_ids.allocated());
        for decl in &tu.decls {
            ctx.external(decl);
        }

        if ctx.errors.is_empty() {
            let typer = Typer { types: ctx.types };
            debug!(
                typed = typer.typed_count(),
                structs = ctx.structs.len(),
                functions = ctx.functions.len(),
                "program typed"
            );
            Ok(typer)
        } else {
            debug!(errors = ctx.errors.len(), "typing failed");
            Err(ctx.errors)
        }
    }

    /// Number of expressions with a recorded type.
    pub fn typed_count(&self) -> usize {
        self.types.iter().filter(|ty| ty.is_some()).count()
    }
}

impl TypeOracle for Typer {
    fn type_of(&self, id: ExprId) -> Option<&Type> {
        self.types.get(id.index()).and_then(Option::as_ref)
    }
}

/// Signature of a user-defined function.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Signature {
    pub params: Vec<Type>,
    pub return_type: Type,
}

/// Mutable state of one typing run.
pub(crate) struct TypingContext {
    pub scopes: Scopes,
    pub structs: StructRegistry,
    pub functions: IndexMap<Rc<str>, Vec<Signature>>,
    pub types: Vec<Option<Type>>,
    pub errors: Vec<TypeError>,
}

impl TypingContext {
    fn new(expr_count: usize) -> Self {
        Self {
            scopes: Scopes::new(),
            structs: StructRegistry::default(),
            functions: IndexMap::new(),
            types: vec![None; expr_count],
            errors: Vec::new(),
        }
    }

    /// Keep an error and carry on with the next independent construct.
    fn report<T>(&mut self, result: Result<T, TypeError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                debug!(%error, "type error");
                self.errors.push(error);
                None
            }
        }
    }

    fn external(&mut self, decl: &ExternalDecl) {
        let result = match decl {
            ExternalDecl::Declaration(declaration) => self.declaration(declaration),
            ExternalDecl::InterfaceBlock(block) => self.interface_block(block),
            ExternalDecl::Prototype(prototype) => self.register_function(prototype).map(|_| ()),
            ExternalDecl::Function(function) => self.function(function),
            ExternalDecl::Directive(_)
            | ExternalDecl::Precision { .. }
            | ExternalDecl::QualifierOnly(_) => Ok(()),
        };
        self.report(result);
    }

    // === Types of declarations ===

    /// Static type named by a specifier, registering inline struct
    /// definitions on the way.
    fn resolve_specifier(&mut self, specifier: &TypeSpecifier, span: Span) -> Result<Type, TypeError> {
        match specifier {
            TypeSpecifier::Void => Ok(Type::Void),
            TypeSpecifier::Basic(basic) => Ok(Type::Basic(*basic)),
            TypeSpecifier::Opaque(name) => Ok(Type::Opaque(name.to_string())),
            TypeSpecifier::Named(name) if self.structs.contains(name) => {
                Ok(Type::Struct(name.to_string()))
            }
            TypeSpecifier::Named(name) => Err(TypeError::UnknownType {
                name: name.to_string(),
                span,
            }),
            TypeSpecifier::Struct(def) => self.register_struct(def).map(Type::Struct),
        }
    }

    fn register_struct(&mut self, def: &StructDef) -> Result<String, TypeError> {
        let name = match &def.name {
            Some(name) => name.to_string(),
            None => format!("__anonymous_struct_{}", self.structs.len()),
        };
        let fields = self.member_fields(&def.members, def.span)?;
        self.structs.register(name.clone(), fields);
        Ok(name)
    }

    fn member_fields(
        &mut self,
        members: &[StructMember],
        span: Span,
    ) -> Result<StructFields, TypeError> {
        let mut fields = StructFields::new();
        for member in members {
            let base = self.full_type(&member.ty, span)?;
            for declarator in &member.declarators {
                let ty = self.apply_array_dims(base.clone(), &declarator.array_dims)?;
                fields.insert(declarator.name.clone(), ty);
            }
        }
        Ok(fields)
    }

    /// Wrap `base` in one array layer per dimension, outermost first.
    fn apply_array_dims(&self, base: Type, dims: &[ArraySize]) -> Result<Type, TypeError> {
        let lookup = |name: &str| self.scopes.lookup(name).and_then(|b| b.const_value);
        let mut ty = base;
        for dim in dims.iter().rev() {
            let length = match dim {
                ArraySize::Sized(size) => {
                    let value = eval_const_int(size, &lookup)
                        .filter(|value| *value > 0)
                        .and_then(|value| u32::try_from(value).ok())
                        .ok_or(TypeError::NonConstantArraySize { span: size.span })?;
                    Some(value)
                }
                ArraySize::Unsized => None,
            };
            ty = Type::array(ty, length);
        }
        Ok(ty)
    }

    /// Specifier plus any dimensions written on the type itself.
    fn full_type(&mut self, ty: &FullySpecifiedType, span: Span) -> Result<Type, TypeError> {
        let base = self.resolve_specifier(&ty.specifier, span)?;
        self.apply_array_dims(base, &ty.array_dims)
    }

    // === Declarations ===

    fn declaration(&mut self, declaration: &Declaration) -> Result<(), TypeError> {
        let base = self.full_type(&declaration.ty, declaration.span)?;
        let is_const = declaration.ty.is_const();

        for declarator in &declaration.declarators {
            let ty = self.apply_array_dims(base.clone(), &declarator.array_dims)?;

            let mut const_value = None;
            if let Some(init) = &declarator.initializer {
                self.type_expr(init)?;
                if is_const && (ty.is_signed_integer() || ty.is_unsigned_integer()) {
                    let lookup = |name: &str| self.scopes.lookup(name).and_then(|b| b.const_value);
                    const_value = eval_const_int(init, &lookup);
                }
            }

            self.scopes
                .declare(declarator.name.clone(), Binding { ty, const_value });
        }
        Ok(())
    }

    /// Register the block's member layout as a struct type. A named instance
    /// becomes a variable of that type; without one, the members are globals.
    fn interface_block(&mut self, block: &InterfaceBlock) -> Result<(), TypeError> {
        let fields = self.member_fields(&block.members, block.span)?;
        let name = block.block_name.to_string();

        match &block.instance {
            Some(instance) => {
                self.structs.register(name.clone(), fields);
                let ty = self.apply_array_dims(Type::Struct(name), &instance.array_dims)?;
                self.scopes.declare(
                    instance.name.clone(),
                    Binding {
                        ty,
                        const_value: None,
                    },
                );
            }
            None => {
                for (member, ty) in &fields {
                    self.scopes.declare(
                        member.clone(),
                        Binding {
                            ty: ty.clone(),
                            const_value: None,
                        },
                    );
                }
                self.structs.register(name, fields);
            }
        }
        Ok(())
    }

    // === Functions ===

    fn register_function(&mut self, prototype: &FunctionPrototype) -> Result<Vec<Type>, TypeError> {
        let return_type = self.full_type(&prototype.return_type, prototype.span)?;
        let mut params = Vec::with_capacity(prototype.params.len());
        for param in &prototype.params {
            let base = self.full_type(&param.ty, prototype.span)?;
            params.push(self.apply_array_dims(base, &param.array_dims)?);
        }

        let overloads = self.functions.entry(prototype.name.clone()).or_default();
        if !overloads.iter().any(|sig| sig.params == params) {
            debug!(name = %prototype.name, params = params.len(), "function registered");
            overloads.push(Signature {
                params: params.clone(),
                return_type,
            });
        }
        Ok(params)
    }

    fn function(&mut self, function: &FunctionDef) -> Result<(), TypeError> {
        let param_types = self.register_function(&function.prototype)?;

        self.scopes.push();
        for (param, ty) in function.prototype.params.iter().zip(param_types) {
            if let Some(name) = &param.name {
                self.scopes.declare(
                    name.clone(),
                    Binding {
                        ty,
                        const_value: None,
                    },
                );
            }
        }
        // Parameters and the body's top level share one scope
        self.statements(&function.body.statements);
        self.scopes.pop();
        Ok(())
    }

    // === Statements ===

    fn statements(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            self.stmt(stmt);
        }
    }

    fn scoped_block(&mut self, block: &Block) {
        self.scopes.push();
        self.statements(&block.statements);
        self.scopes.pop();
    }

    fn root(&mut self, expr: &Expr) {
        let result = self.type_expr(expr);
        self.report(result);
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Declaration(declaration) => {
                let result = self.declaration(declaration);
                self.report(result);
            }
            Stmt::Expr(expr) | Stmt::Case(expr) | Stmt::Return(Some(expr)) => self.root(expr),
            Stmt::Block(block) => self.scoped_block(block),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.root(condition);
                self.stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.stmt(else_branch);
                }
            }
            Stmt::For {
                init,
                condition,
                step,
                body,
            } => {
                self.scopes.push();
                self.stmt(init);
                if let Some(condition) = condition {
                    self.root(condition);
                }
                if let Some(step) = step {
                    self.root(step);
                }
                self.stmt(body);
                self.scopes.pop();
            }
            Stmt::While { condition, body } => {
                self.scopes.push();
                self.root(condition);
                self.stmt(body);
                self.scopes.pop();
            }
            Stmt::DoWhile { body, condition } => {
                self.stmt(body);
                self.root(condition);
            }
            Stmt::Switch { selector, body } => {
                self.root(selector);
                self.scoped_block(body);
            }
            Stmt::Return(None)
            | Stmt::Default
            | Stmt::Break
            | Stmt::Continue
            | Stmt::Discard
            | Stmt::Empty => {}
        }
    }
}
