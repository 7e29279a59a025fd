//! Scope stack for local name resolution.

use std::collections::HashMap;

use crate::ir::ids::SlotId;

/// A stack of local-name maps mirroring the lexical block structure.
///
/// One scope is pushed for a function body and for each `if` branch and
/// `while` body, and popped on exit. Lookup walks innermost to outermost;
/// the flat global map is the lowering context's concern.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<HashMap<String, SlotId>>,
}

impl ScopeStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a fresh innermost scope.
    pub fn push(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pops the innermost scope.
    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    /// Returns `true` when `name` is already bound in the innermost scope.
    ///
    /// Shadowing an outer scope is legal; rebinding within one scope is not.
    pub fn declared_in_current(&self, name: &str) -> bool {
        self.scopes
            .last()
            .is_some_and(|scope| scope.contains_key(name))
    }

    /// Binds `name` to `slot` in the innermost scope.
    pub fn declare(&mut self, name: &str, slot: SlotId) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), slot);
        }
    }

    /// Resolves `name` against the stack, innermost first.
    pub fn lookup(&self, name: &str) -> Option<SlotId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }

    /// Returns the number of live scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}
