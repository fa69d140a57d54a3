//! Pretty-printer from AST back to shader text.
//!
//! Output is deterministic: two trees print identically exactly when they are
//! structurally equal (ids and spans are ignored). Parentheses are emitted for
//! `Paren` nodes and, for trees assembled by passes, wherever operator
//! precedence would otherwise change the meaning. A parsed tree never needs
//! the latter because its parentheses are already explicit nodes.
//!
//! Layout: one statement per line, two-space indentation, braces on their
//! own lines.

use crate::ast::{
    ArraySize, BinaryOp, Block, Declaration, Declarator, Expr, ExprKind, ExternalDecl,
    FullySpecifiedType, FunctionPrototype, InterfaceBlock, ParamDecl, Stmt, StructDef,
    StructMember, TranslationUnit, TypeQualifier, TypeSpecifier, UnaryOp, precedence,
};

/// Print a whole translation unit.
pub fn print_translation_unit(tu: &TranslationUnit) -> String {
    let mut printer = Printer::default();
    for decl in &tu.decls {
        printer.external(decl);
    }
    printer.out
}

/// Print a single expression.
pub fn print_expr(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr, 0);
    out
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn external(&mut self, decl: &ExternalDecl) {
        match decl {
            ExternalDecl::Directive(text) => self.line(text),
            ExternalDecl::Precision {
                precision,
                specifier,
            } => self.line(&format!(
                "precision {} {};",
                precision.keyword(),
                specifier_text(specifier)
            )),
            ExternalDecl::Declaration(declaration) => {
                self.line(&format!("{};", declaration_text(declaration)))
            }
            ExternalDecl::InterfaceBlock(block) => {
                self.line(&format!("{};", interface_block_text(block)))
            }
            ExternalDecl::Prototype(prototype) => {
                self.line(&format!("{};", prototype_text(prototype)))
            }
            ExternalDecl::Function(function) => {
                self.line(&prototype_text(&function.prototype));
                self.block(&function.body);
            }
            ExternalDecl::QualifierOnly(qualifiers) => {
                self.line(&format!("{};", qualifiers_text(qualifiers)))
            }
        }
    }

    fn block(&mut self, block: &Block) {
        self.line("{");
        self.indent += 1;
        for stmt in &block.statements {
            self.stmt(stmt);
        }
        self.indent -= 1;
        self.line("}");
    }

    /// Body of a control statement: blocks at the same level, anything else
    /// indented one step.
    fn child(&mut self, stmt: &Stmt) {
        if let Stmt::Block(block) = stmt {
            self.block(block);
        } else {
            self.indent += 1;
            self.stmt(stmt);
            self.indent -= 1;
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(block) => self.block(block),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.line(&format!("if ({})", print_expr(condition)));
                self.child(then_branch);
                if let Some(else_branch) = else_branch {
                    self.line("else");
                    self.child(else_branch);
                }
            }
            Stmt::For {
                init,
                condition,
                step,
                body,
            } => {
                let mut header = format!("for ({}", simple_stmt_text(init));
                if let Some(condition) = condition {
                    header.push(' ');
                    header.push_str(&print_expr(condition));
                }
                header.push(';');
                if let Some(step) = step {
                    header.push(' ');
                    header.push_str(&print_expr(step));
                }
                header.push(')');
                self.line(&header);
                self.child(body);
            }
            Stmt::While { condition, body } => {
                self.line(&format!("while ({})", print_expr(condition)));
                self.child(body);
            }
            Stmt::DoWhile { body, condition } => {
                self.line("do");
                self.child(body);
                self.line(&format!("while ({});", print_expr(condition)));
            }
            Stmt::Switch { selector, body } => {
                self.line(&format!("switch ({})", print_expr(selector)));
                self.block(body);
            }
            Stmt::Case(value) => self.line(&format!("case {}:", print_expr(value))),
            Stmt::Default => self.line("default:"),
            other => self.line(&simple_stmt_text(other)),
        }
    }
}

/// Single-line statements, terminated by `;`.
fn simple_stmt_text(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Declaration(declaration) => format!("{};", declaration_text(declaration)),
        Stmt::Expr(expr) => format!("{};", print_expr(expr)),
        Stmt::Return(Some(value)) => format!("return {};", print_expr(value)),
        Stmt::Return(None) => "return;".to_string(),
        Stmt::Break => "break;".to_string(),
        Stmt::Continue => "continue;".to_string(),
        Stmt::Discard => "discard;".to_string(),
        _ => ";".to_string(),
    }
}

fn qualifiers_text(qualifiers: &[TypeQualifier]) -> String {
    qualifiers
        .iter()
        .map(|qualifier| match qualifier {
            TypeQualifier::Layout(ids) => {
                let ids: Vec<String> = ids
                    .iter()
                    .map(|id| match id.value {
                        Some(value) => format!("{} = {}", id.name, value),
                        None => id.name.to_string(),
                    })
                    .collect();
                format!("layout({})", ids.join(", "))
            }
            other => other.keyword().unwrap_or_default().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn specifier_text(specifier: &TypeSpecifier) -> String {
    match specifier {
        TypeSpecifier::Void => "void".to_string(),
        TypeSpecifier::Basic(basic) => basic.to_string(),
        TypeSpecifier::Opaque(name) | TypeSpecifier::Named(name) => name.to_string(),
        TypeSpecifier::Struct(def) => struct_text(def),
    }
}

fn full_type_text(ty: &FullySpecifiedType) -> String {
    let specifier = specifier_text(&ty.specifier) + &array_dims_text(&ty.array_dims);
    if ty.qualifiers.is_empty() {
        specifier
    } else {
        format!("{} {}", qualifiers_text(&ty.qualifiers), specifier)
    }
}

fn members_text(members: &[StructMember]) -> String {
    members
        .iter()
        .map(|member| {
            let declarators: Vec<String> =
                member.declarators.iter().map(declarator_text).collect();
            format!("{} {}; ", full_type_text(&member.ty), declarators.join(", "))
        })
        .collect()
}

fn struct_text(def: &StructDef) -> String {
    match &def.name {
        Some(name) => format!("struct {} {{ {}}}", name, members_text(&def.members)),
        None => format!("struct {{ {}}}", members_text(&def.members)),
    }
}

fn array_dims_text(dims: &[ArraySize]) -> String {
    dims.iter()
        .map(|dim| match dim {
            ArraySize::Sized(size) => format!("[{}]", print_expr(size)),
            ArraySize::Unsized => "[]".to_string(),
        })
        .collect()
}

fn declarator_text(declarator: &Declarator) -> String {
    let mut text = format!(
        "{}{}",
        declarator.name,
        array_dims_text(&declarator.array_dims)
    );
    if let Some(init) = &declarator.initializer {
        text.push_str(" = ");
        write_expr(&mut text, init, precedence::ASSIGNMENT);
    }
    text
}

fn declaration_text(declaration: &Declaration) -> String {
    let ty = full_type_text(&declaration.ty);
    if declaration.declarators.is_empty() {
        return ty;
    }
    let declarators: Vec<String> = declaration
        .declarators
        .iter()
        .map(declarator_text)
        .collect();
    format!("{} {}", ty, declarators.join(", "))
}

fn interface_block_text(block: &InterfaceBlock) -> String {
    let mut text = format!(
        "{} {} {{ {}}}",
        qualifiers_text(&block.qualifiers),
        block.block_name,
        members_text(&block.members)
    );
    if let Some(instance) = &block.instance {
        text.push(' ');
        text.push_str(&instance.name);
        text.push_str(&array_dims_text(&instance.array_dims));
    }
    text
}

fn param_text(param: &ParamDecl) -> String {
    let mut text = full_type_text(&param.ty);
    if let Some(name) = &param.name {
        text.push(' ');
        text.push_str(name);
    }
    text.push_str(&array_dims_text(&param.array_dims));
    text
}

fn prototype_text(prototype: &FunctionPrototype) -> String {
    let params: Vec<String> = prototype.params.iter().map(param_text).collect();
    format!(
        "{} {}({})",
        full_type_text(&prototype.return_type),
        prototype.name,
        params.join(", ")
    )
}

/// Write `expr`, parenthesizing it if it binds looser than `min_prec`.
fn write_expr(out: &mut String, expr: &Expr, min_prec: u8) {
    let needs_parens = expr.precedence() < min_prec;
    if needs_parens {
        out.push('(');
    }

    match &expr.kind {
        ExprKind::IntLiteral(literal) => match &literal.spelling {
            Some(text) => out.push_str(text),
            None => out.push_str(&literal.value.to_string()),
        },
        ExprKind::UintLiteral(literal) => match &literal.spelling {
            Some(text) => out.push_str(text),
            None => {
                out.push_str(&literal.value.to_string());
                out.push('u');
            }
        },
        ExprKind::FloatLiteral(text) => out.push_str(text),
        ExprKind::BoolLiteral(value) => out.push_str(if *value { "true" } else { "false" }),
        ExprKind::Variable(name) => out.push_str(name),
        ExprKind::Call { callee, args } => {
            out.push_str(callee);
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(out, arg, precedence::ASSIGNMENT);
            }
            out.push(')');
        }
        ExprKind::Index { base, index } => {
            write_expr(out, base, precedence::POSTFIX);
            out.push('[');
            write_expr(out, index, 0);
            out.push(']');
        }
        ExprKind::Member { base, member } => {
            write_expr(out, base, precedence::POSTFIX);
            out.push('.');
            out.push_str(member);
        }
        ExprKind::Length(base) => {
            write_expr(out, base, precedence::POSTFIX);
            out.push_str(".length()");
        }
        ExprKind::Unary { op, operand } if op.is_postfix() => {
            write_expr(out, operand, precedence::POSTFIX);
            out.push_str(op.symbol());
        }
        ExprKind::Unary { op, operand } => {
            let mut inner = String::new();
            write_expr(&mut inner, operand, precedence::UNARY);
            out.push_str(op.symbol());
            // `- -x` must not collapse into `--x`
            let sign_like = matches!(
                op,
                UnaryOp::Neg | UnaryOp::Plus | UnaryOp::PreDec | UnaryOp::PreInc
            );
            if sign_like && (inner.starts_with('-') || inner.starts_with('+')) {
                out.push(' ');
            }
            out.push_str(&inner);
        }
        ExprKind::Binary { op, left, right } => {
            let prec = op.precedence();
            write_expr(out, left, prec);
            if *op == BinaryOp::Comma {
                out.push_str(", ");
            } else {
                out.push(' ');
                out.push_str(op.symbol());
                out.push(' ');
            }
            write_expr(out, right, prec + 1);
        }
        ExprKind::Assign { op, target, value } => {
            write_expr(out, target, precedence::UNARY);
            out.push(' ');
            out.push_str(op.symbol());
            out.push(' ');
            write_expr(out, value, precedence::ASSIGNMENT);
        }
        ExprKind::Ternary {
            condition,
            then_expr,
            else_expr,
        } => {
            write_expr(out, condition, precedence::LOGICAL_OR);
            out.push_str(" ? ");
            write_expr(out, then_expr, precedence::COMMA);
            out.push_str(" : ");
            write_expr(out, else_expr, precedence::ASSIGNMENT);
        }
        ExprKind::Paren(inner) => {
            out.push('(');
            write_expr(out, inner, 0);
            out.push(')');
        }
    }

    if needs_parens {
        out.push(')');
    }
}
