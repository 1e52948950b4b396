//! Symbol tables and the method scope stack used by the type checker.

use std::collections::HashMap;

use sharpcheck_syntax::types::Type;

/// One scope's mapping from variable name to declared type.
///
/// Names are unique within a table; iteration follows declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    types: HashMap<String, Type>,
    order: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name` with type `ty`.
    ///
    /// If the name is already bound in this table the table is left
    /// unchanged and the previously declared type is returned as the error.
    pub fn add(&mut self, name: &str, ty: Type) -> Result<(), Type> {
        if let Some(prev) = self.types.get(name) {
            return Err(*prev);
        }
        self.types.insert(name.to_string(), ty);
        self.order.push(name.to_string());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Type> {
        self.types.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Type)> + '_ {
        self.order
            .iter()
            .map(move |name| (name.as_str(), self.types[name.as_str()]))
    }
}

/// Method scopes stacked over a persistent global scope.
///
/// The global table is not part of the stack. Lookups only consult the
/// current table: the innermost method scope while one is open, otherwise
/// the global table. Class fields are therefore not visible inside methods.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    global: SymbolTable,
    locals: Vec<SymbolTable>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a fresh method scope.
    pub fn push(&mut self) {
        self.locals.push(SymbolTable::new());
    }

    /// Leaves the innermost method scope, returning it.
    pub fn pop(&mut self) -> Option<SymbolTable> {
        self.locals.pop()
    }

    /// Number of method scopes currently open.
    pub fn depth(&self) -> usize {
        self.locals.len()
    }

    /// The table new declarations go into: the innermost method scope, or
    /// the global table when no method is open.
    pub fn current_mut(&mut self) -> &mut SymbolTable {
        match self.locals.last_mut() {
            Some(table) => table,
            None => &mut self.global,
        }
    }

    pub fn declare(&mut self, name: &str, ty: Type) -> Result<(), Type> {
        self.current_mut().add(name, ty)
    }

    pub fn lookup(&self, name: &str) -> Option<Type> {
        match self.locals.last() {
            Some(table) => table.get(name),
            None => self.global.get(name),
        }
    }

    pub fn global(&self) -> &SymbolTable {
        &self.global
    }

    pub fn into_global(self) -> SymbolTable {
        self.global
    }
}
