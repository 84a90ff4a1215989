//! The translation unit's global scope

use crate::decl::Decl;
use crate::error::{DeclError, IndexedItem, ScopeError, checked, checked_mut};
use crate::node::StmtId;
use crate::symbol::{Binding, SymbolTable};
use fe_span::Location;
use fe_ty::QualType;

/// Top-level scope of a translation unit
///
/// Holds global variables, record and enum definitions, functions and any
/// top-level statements the language permits, each list in source order.
/// There is a single symbol table; globals never nest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalContext {
    decls: Vec<Decl>,
    stmts: Vec<StmtId>,
    table: SymbolTable,
}

impl GlobalContext {
    /// Creates an empty global scope
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a top-level declaration
    pub fn add_decl(&mut self, decl: impl Into<Decl>) {
        self.decls.push(decl.into());
    }

    /// Number of top-level declarations
    #[must_use]
    pub fn num_decls(&self) -> usize {
        self.decls.len()
    }

    /// Top-level declaration at `pos`
    ///
    /// # Errors
    ///
    /// Returns [`DeclError::IndexOutOfRange`] if `pos` is past the last declaration
    pub fn decl(&self, pos: usize) -> Result<&Decl, DeclError> {
        checked(&self.decls, pos, IndexedItem::Decl)
    }

    /// Mutable top-level declaration at `pos`
    ///
    /// # Errors
    ///
    /// Returns [`DeclError::IndexOutOfRange`] if `pos` is past the last declaration
    pub fn decl_mut(&mut self, pos: usize) -> Result<&mut Decl, DeclError> {
        checked_mut(&mut self.decls, pos, IndexedItem::Decl)
    }

    /// Top-level declarations in source order
    #[must_use]
    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    /// Appends a top-level statement
    pub fn add_stmt(&mut self, stmt: StmtId) {
        self.stmts.push(stmt);
    }

    /// Number of top-level statements
    #[must_use]
    pub fn num_stmts(&self) -> usize {
        self.stmts.len()
    }

    /// Top-level statement at `pos`
    ///
    /// # Errors
    ///
    /// Returns [`DeclError::IndexOutOfRange`] if `pos` is past the last statement
    pub fn stmt(&self, pos: usize) -> Result<StmtId, DeclError> {
        checked(&self.stmts, pos, IndexedItem::Stmt).copied()
    }

    /// Top-level statements in source order
    #[must_use]
    pub fn stmts(&self) -> &[StmtId] {
        &self.stmts
    }

    /// The global symbol table
    #[must_use]
    pub fn symbol_table(&self) -> &SymbolTable {
        &self.table
    }

    /// Binds a global name
    ///
    /// # Errors
    ///
    /// See [`GlobalContext::add_symbol_at`]
    pub fn add_symbol(&mut self, name: impl Into<String>, ty: QualType) -> Result<(), ScopeError> {
        self.bind(name.into(), Binding::new(ty))
    }

    /// Binds a global name declared at `location`
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::DuplicateDeclaration`] if the name is already
    /// bound; the original binding is kept
    pub fn add_symbol_at(
        &mut self,
        name: impl Into<String>,
        ty: QualType,
        location: Location,
    ) -> Result<(), ScopeError> {
        self.bind(name.into(), Binding::at(ty, location))
    }

    fn bind(&mut self, name: String, binding: Binding) -> Result<(), ScopeError> {
        if let Some(existing) = self.table.get(&name) {
            tracing::debug!(name = %name, "global symbol already declared");
            return Err(ScopeError::DuplicateDeclaration {
                first: existing.location,
                second: binding.location,
                name,
            });
        }
        tracing::debug!(name = %name, ty = %binding.ty, "added global symbol");
        self.table.insert(name, binding);
        Ok(())
    }

    /// Type bound to a global name
    #[must_use]
    pub fn check_symbol(&self, name: &str) -> Option<QualType> {
        self.check_binding(name).map(|binding| binding.ty)
    }

    /// Binding of a global name
    #[must_use]
    pub fn check_binding(&self, name: &str) -> Option<&Binding> {
        let binding = self.table.get(name);
        if binding.is_some() {
            tracing::trace!(name, "resolved global identifier");
        }
        binding
    }

    /// Unbinds one global name and returns what it was bound to
    pub fn remove_symbol(&mut self, name: &str) -> Option<Binding> {
        let removed = self.table.remove(name);
        if removed.is_some() {
            tracing::debug!(name, "removed global symbol");
        }
        removed
    }

    /// Drops every global binding
    pub fn clear_symbol_table(&mut self) {
        self.table.clear();
    }
}
