//! Lexical scopes and the struct registry.

use indexmap::IndexMap;
use shadermorph_ast::Type;
use std::rc::Rc;
use tracing::debug;

/// A declared variable.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Binding {
    pub ty: Type,
    /// Value of a `const` integer scalar with a constant initializer
    pub const_value: Option<i64>,
}

/// Stack of lexical scopes, innermost last.
///
/// The outermost frame holds globals and is never popped.
#[derive(Debug)]
pub(crate) struct Scopes {
    frames: Vec<IndexMap<Rc<str>, Binding>>,
}

impl Scopes {
    pub fn new() -> Self {
        Self {
            frames: vec![IndexMap::new()],
        }
    }

    pub fn push(&mut self) {
        self.frames.push(IndexMap::new());
    }

    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Declare `name` in the innermost scope, shadowing outer declarations.
    pub fn declare(&mut self, name: Rc<str>, binding: Binding) {
        debug!(name = %name, ty = %binding.ty, depth = self.frames.len() - 1, "declared");
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name, binding);
        }
    }

    /// Innermost binding of `name`.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }
}

/// Members of a struct or interface block, in declaration order.
pub(crate) type StructFields = IndexMap<Rc<str>, Type>;

/// Struct and interface block definitions by name.
#[derive(Debug, Default)]
pub(crate) struct StructRegistry {
    structs: IndexMap<String, StructFields>,
}

impl StructRegistry {
    pub fn register(&mut self, name: String, fields: StructFields) {
        debug!(name = %name, fields = fields.len(), "struct registered");
        self.structs.insert(name, fields);
    }

    pub fn get(&self, name: &str) -> Option<&StructFields> {
        self.structs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.structs.contains_key(name)
    }

    /// Number of registered structs; used to name anonymous ones.
    pub fn len(&self) -> usize {
        self.structs.len()
    }
}
