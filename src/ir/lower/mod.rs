//! AST to typed IR lowering.
//!
//! The lowering context owns the module under construction plus the flat
//! symbol tables; one item lowers at a time, so globals and prototypes are
//! visible to every body that follows them.

mod decl;
mod expr;
mod stmt;

pub mod diagnostics;
pub mod scope;

pub use diagnostics::{LowerError, SemanticError, SemanticErrorKind, SemanticWarning};
pub use scope::ScopeStack;

use std::collections::HashMap;
use std::mem;

use crate::ir::module::{FunctionBuilder, Module};
use crate::ir::types::Type;
use crate::parser::ast::{Item, Program};

/// A function signature as tracked for call checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Declared return type.
    pub ret_type: Type,
    /// Parameter types in order.
    pub params: Vec<Type>,
    /// `true` once a body has been emitted for this name.
    pub defined: bool,
}

/// Stateful AST-to-IR lowering context.
pub struct Lowering {
    pub(crate) module: Module,
    pub(crate) globals: HashMap<String, Type>,
    pub(crate) functions: HashMap<String, Signature>,
    pub(crate) warnings: Vec<SemanticWarning>,
}

impl Lowering {
    /// Creates a lowering context around an empty module.
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module: Module::new(module_name),
            globals: HashMap::new(),
            functions: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Lowers one top-level item into the module.
    pub fn lower_item(&mut self, item: &Item) -> Result<(), LowerError> {
        match item {
            Item::Extern(proto) => decl::lower_prototype(self, proto),
            Item::Function { proto, body } => decl::lower_function(self, proto, body),
            Item::Global { ty, name, token } => decl::lower_global(self, *ty, name, token),
        }
    }

    /// Lowers a whole parsed program.
    pub fn lower_program(&mut self, program: &Program) -> Result<(), LowerError> {
        for item in &program.items {
            self.lower_item(item)?;
        }
        Ok(())
    }

    /// Drains warnings collected since the last call.
    pub fn take_warnings(&mut self) -> Vec<SemanticWarning> {
        mem::take(&mut self.warnings)
    }

    /// Returns the module built so far.
    pub fn module(&self) -> &Module {
        &self.module
    }

    /// Finalizes the context into its module.
    pub fn finish(self) -> Module {
        self.module
    }
}

/// Per-function emission state threaded through the expression and
/// statement lowerers.
pub(crate) struct FuncCx<'a> {
    /// Builder positioned at the current basic block.
    pub(crate) builder: &'a mut FunctionBuilder,
    /// Local scope stack; one scope per function body, `if` branch, and
    /// `while` body.
    pub(crate) scopes: ScopeStack,
    /// Flat global map.
    pub(crate) globals: &'a HashMap<String, Type>,
    /// Known function signatures, the current function included.
    pub(crate) functions: &'a HashMap<String, Signature>,
    /// Warning sink shared with the lowering context.
    pub(crate) warnings: &'a mut Vec<SemanticWarning>,
    /// Declared return type of the function being emitted.
    pub(crate) ret_type: Type,
}
