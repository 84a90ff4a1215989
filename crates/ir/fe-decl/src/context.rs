//! Block scopes owned by scope-introducing declarations

use crate::decl::Decl;
use crate::error::{DeclError, IndexedItem, ScopeError, checked, checked_mut};
use crate::symbol::{Binding, ShadowPolicy, SymbolTable};
use fe_span::Location;
use fe_ty::QualType;

/// A lexical scope with one symbol table per open block
///
/// The table stack starts empty. Entering a block pushes a table and leaving
/// it pops the table, strictly last in, first out. Lookups search from the
/// innermost table outwards, so an inner binding hides an outer one.
///
/// Declarations introduced directly in this scope are kept separately, in
/// declaration order, and are never removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclContext {
    decls: Vec<Decl>,
    tables: Vec<SymbolTable>,
    policy: ShadowPolicy,
}

impl DeclContext {
    /// Creates an empty context with the default redeclaration policy
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty context with the given redeclaration policy
    #[must_use]
    pub fn with_policy(policy: ShadowPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Redeclaration policy in force
    #[must_use]
    pub fn policy(&self) -> ShadowPolicy {
        self.policy
    }

    /// Changes the redeclaration policy for subsequent insertions
    pub fn set_policy(&mut self, policy: ShadowPolicy) {
        self.policy = policy;
    }

    /// Appends a declaration; duplicates are structurally allowed
    pub fn add_decl(&mut self, decl: impl Into<Decl>) {
        self.decls.push(decl.into());
    }

    /// Number of declarations
    #[must_use]
    pub fn num_decls(&self) -> usize {
        self.decls.len()
    }

    /// Declaration at `pos`
    ///
    /// # Errors
    ///
    /// Returns [`DeclError::IndexOutOfRange`] if `pos` is past the last declaration
    pub fn decl(&self, pos: usize) -> Result<&Decl, DeclError> {
        checked(&self.decls, pos, IndexedItem::Decl)
    }

    /// Mutable declaration at `pos`
    ///
    /// # Errors
    ///
    /// Returns [`DeclError::IndexOutOfRange`] if `pos` is past the last declaration
    pub fn decl_mut(&mut self, pos: usize) -> Result<&mut Decl, DeclError> {
        checked_mut(&mut self.decls, pos, IndexedItem::Decl)
    }

    /// Declarations in declaration order
    #[must_use]
    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    /// Opens a nested block
    pub fn push_symbol_table(&mut self) {
        self.tables.push(SymbolTable::new());
        tracing::trace!(depth = self.tables.len(), "entered block scope");
    }

    /// Closes the innermost block and returns its table
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::ScopeUnderflow`] if no block is open
    pub fn pop_current_symbol_table(&mut self) -> Result<SymbolTable, ScopeError> {
        let table = self.tables.pop().ok_or(ScopeError::ScopeUnderflow)?;
        tracing::trace!(depth = self.tables.len(), "left block scope");
        Ok(table)
    }

    /// Table of the innermost open block
    #[must_use]
    pub fn current_symbol_table(&self) -> Option<&SymbolTable> {
        self.tables.last()
    }

    /// Open block tables, outermost first
    #[must_use]
    pub fn symbol_tables(&self) -> &[SymbolTable] {
        &self.tables
    }

    /// Number of open blocks
    #[must_use]
    pub fn depth(&self) -> usize {
        self.tables.len()
    }

    /// Whether at least one block is open
    #[must_use]
    pub fn is_scoped(&self) -> bool {
        !self.tables.is_empty()
    }

    /// Closes every block at once
    pub fn clear_symbol_table(&mut self) {
        self.tables.clear();
    }

    /// Type of the nearest visible binding of `name`
    #[must_use]
    pub fn lookup_symbol(&self, name: &str) -> Option<QualType> {
        self.lookup_binding(name).map(|binding| binding.ty)
    }

    /// Nearest visible binding of `name`, searching inner blocks first
    #[must_use]
    pub fn lookup_binding(&self, name: &str) -> Option<&Binding> {
        let binding = self
            .tables
            .iter()
            .rev()
            .filter(|table| !table.is_empty())
            .find_map(|table| table.get(name));
        if binding.is_some() {
            tracing::trace!(name, "resolved identifier");
        }
        binding
    }

    /// Binds `name` in the innermost block
    ///
    /// # Errors
    ///
    /// See [`DeclContext::add_symbol_at`]
    pub fn add_symbol(&mut self, name: impl Into<String>, ty: QualType) -> Result<(), ScopeError> {
        self.bind(name.into(), Binding::new(ty))
    }

    /// Binds `name`, declared at `location`, in the innermost block
    ///
    /// Under [`ShadowPolicy::RejectIfVisible`] the name must not be visible
    /// from any open block; under [`ShadowPolicy::RejectInCurrentScope`] it
    /// must only be free in the innermost one. A rejected insertion leaves
    /// the existing binding untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::DuplicateDeclaration`] when the name collides and
    /// [`ScopeError::NoActiveScope`] when no block is open
    pub fn add_symbol_at(
        &mut self,
        name: impl Into<String>,
        ty: QualType,
        location: Location,
    ) -> Result<(), ScopeError> {
        self.bind(name.into(), Binding::at(ty, location))
    }

    fn bind(&mut self, name: String, binding: Binding) -> Result<(), ScopeError> {
        if let Some(existing) = self.conflicting_binding(&name) {
            tracing::debug!(name = %name, "symbol already declared");
            return Err(ScopeError::DuplicateDeclaration {
                name,
                first: existing.location,
                second: binding.location,
            });
        }

        let Some(table) = self.tables.last_mut() else {
            return Err(ScopeError::NoActiveScope { name });
        };
        tracing::debug!(name = %name, ty = %binding.ty, "added symbol");
        table.insert(name, binding);
        Ok(())
    }

    fn conflicting_binding(&self, name: &str) -> Option<Binding> {
        match self.policy {
            ShadowPolicy::RejectIfVisible => self.lookup_binding(name).copied(),
            ShadowPolicy::RejectInCurrentScope => self
                .tables
                .last()
                .and_then(|table| table.get(name))
                .copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{AsNamedDecl, VarDecl};
    use fe_arena::Arena;
    use fe_ty::TyIdInner;

    fn types() -> (QualType, QualType) {
        let mut types = Arena::new();
        let int = QualType::new(types.alloc(TyIdInner));
        let float = QualType::new(types.alloc(TyIdInner));
        (int, float)
    }

    #[test]
    fn test_add_then_lookup() {
        let (int, _) = types();
        let mut context = DeclContext::new();
        context.push_symbol_table();

        assert_eq!(context.add_symbol("y", int), Ok(()));
        assert_eq!(context.lookup_symbol("y"), Some(int));
        assert_eq!(context.lookup_symbol("z"), None);
    }

    #[test]
    fn test_lookup_crosses_into_outer_blocks() {
        let (int, _) = types();
        let mut context = DeclContext::new();
        context.push_symbol_table();
        assert_eq!(context.add_symbol("y", int), Ok(()));

        context.push_symbol_table();
        assert_eq!(context.lookup_symbol("y"), Some(int));
        assert!(context.pop_current_symbol_table().is_ok());
        assert_eq!(context.lookup_symbol("y"), Some(int));
    }

    #[test]
    fn test_popped_bindings_are_gone() {
        let (int, _) = types();
        let mut context = DeclContext::new();
        context.push_symbol_table();
        context.push_symbol_table();
        assert_eq!(context.add_symbol("tmp", int), Ok(()));

        let popped = context.pop_current_symbol_table().expect("one block open");
        assert!(popped.contains("tmp"));
        assert_eq!(context.lookup_symbol("tmp"), None);
        assert_eq!(context.depth(), 1);
    }

    #[test]
    fn test_redeclaring_visible_name_is_rejected_by_default() {
        let (int, float) = types();
        let mut context = DeclContext::new();
        context.push_symbol_table();
        assert_eq!(context.add_symbol_at("n", int, Location::new(1, 5)), Ok(()));
        context.push_symbol_table();

        assert_eq!(
            context.add_symbol_at("n", float, Location::new(3, 9)),
            Err(ScopeError::DuplicateDeclaration {
                name: "n".to_string(),
                first: Some(Location::new(1, 5)),
                second: Some(Location::new(3, 9)),
            })
        );
        assert_eq!(context.lookup_symbol("n"), Some(int));
        assert!(context.current_symbol_table().is_some_and(SymbolTable::is_empty));
    }

    #[test]
    fn test_shadowing_allowed_when_only_current_scope_is_checked() {
        let (int, float) = types();
        let mut context = DeclContext::with_policy(ShadowPolicy::RejectInCurrentScope);
        context.push_symbol_table();
        assert_eq!(context.add_symbol("n", int), Ok(()));

        context.push_symbol_table();
        assert_eq!(context.add_symbol("n", float), Ok(()));
        assert_eq!(context.lookup_symbol("n"), Some(float));
        assert!(context.add_symbol("n", int).is_err());

        assert!(context.pop_current_symbol_table().is_ok());
        assert_eq!(context.lookup_symbol("n"), Some(int));
    }

    #[test]
    fn test_empty_tables_do_not_change_search_order() {
        let (int, float) = types();
        let mut context = DeclContext::with_policy(ShadowPolicy::RejectInCurrentScope);
        context.push_symbol_table();
        assert_eq!(context.add_symbol("v", int), Ok(()));
        context.push_symbol_table();
        assert_eq!(context.add_symbol("v", float), Ok(()));
        context.push_symbol_table();
        context.push_symbol_table();

        assert_eq!(context.lookup_symbol("v"), Some(float));
    }

    #[test]
    fn test_scope_underflow_and_no_active_scope() {
        let (int, _) = types();
        let mut context = DeclContext::new();

        assert_eq!(
            context.pop_current_symbol_table(),
            Err(ScopeError::ScopeUnderflow)
        );
        assert_eq!(
            context.add_symbol("x", int),
            Err(ScopeError::NoActiveScope {
                name: "x".to_string()
            })
        );
        assert!(!context.is_scoped());
    }

    #[test]
    fn test_clear_closes_every_block() {
        let (int, _) = types();
        let mut context = DeclContext::new();
        for _ in 0..3 {
            context.push_symbol_table();
        }
        assert_eq!(context.add_symbol("x", int), Ok(()));

        context.clear_symbol_table();
        assert_eq!(context.depth(), 0);
        assert_eq!(context.lookup_symbol("x"), None);
    }

    #[test]
    fn test_decls_keep_order_and_allow_duplicates() {
        let (int, _) = types();
        let mut context = DeclContext::new();
        context.add_decl(VarDecl::new("a", int));
        context.add_decl(VarDecl::new("a", int));
        context.add_decl(VarDecl::new("b", int));

        assert_eq!(context.num_decls(), 3);
        assert_eq!(context.decl(2).ok().and_then(Decl::name), Some("b"));
        assert!(context.decl(3).is_err());

        if let Ok(decl) = context.decl_mut(0) {
            if let Some(var) = decl.as_var_mut() {
                var.set_name("renamed");
            }
        }
        assert_eq!(context.decls()[0].name(), Some("renamed"));
    }

    mod scope_properties {
        use super::super::*;
        use super::types;
        use proptest::prelude::*;

        const NAMES: [&str; 4] = ["a", "b", "c", "d"];

        #[derive(Debug, Clone, Copy)]
        enum Op {
            Push,
            Pop,
            Add { name: usize, float: bool },
            Lookup { name: usize },
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                Just(Op::Push),
                Just(Op::Pop),
                (0..NAMES.len(), any::<bool>()).prop_map(|(name, float)| Op::Add { name, float }),
                (0..NAMES.len()).prop_map(|name| Op::Lookup { name }),
            ]
        }

        fn policy_strategy() -> impl Strategy<Value = ShadowPolicy> {
            prop_oneof![
                Just(ShadowPolicy::RejectIfVisible),
                Just(ShadowPolicy::RejectInCurrentScope),
            ]
        }

        /// Stack of open blocks, each a list of (name, type) bindings
        #[derive(Default)]
        struct Model {
            blocks: Vec<Vec<(String, QualType)>>,
        }

        impl Model {
            fn lookup(&self, name: &str) -> Option<QualType> {
                self.blocks
                    .iter()
                    .rev()
                    .flatten()
                    .find(|(bound, _)| bound == name)
                    .map(|&(_, ty)| ty)
            }

            fn collides(&self, policy: ShadowPolicy, name: &str) -> bool {
                match policy {
                    ShadowPolicy::RejectIfVisible => self.lookup(name).is_some(),
                    ShadowPolicy::RejectInCurrentScope => self
                        .blocks
                        .last()
                        .is_some_and(|block| block.iter().any(|(bound, _)| bound == name)),
                }
            }
        }

        proptest! {
            #[test]
            fn scopes_match_block_stack_model(
                policy in policy_strategy(),
                ops in proptest::collection::vec(op_strategy(), 0..64),
            ) {
                let (int, float) = types();
                let mut context = DeclContext::with_policy(policy);
                let mut model = Model::default();

                for op in ops {
                    match op {
                        Op::Push => {
                            context.push_symbol_table();
                            model.blocks.push(Vec::new());
                        }
                        Op::Pop => {
                            let popped = context.pop_current_symbol_table();
                            match model.blocks.pop() {
                                Some(block) => {
                                    let table = popped.unwrap();
                                    prop_assert_eq!(table.len(), block.len());
                                }
                                None => prop_assert_eq!(popped, Err(ScopeError::ScopeUnderflow)),
                            }
                        }
                        Op::Add { name, float: is_float } => {
                            let name = NAMES[name];
                            let ty = if is_float { float } else { int };
                            let added = context.add_symbol(name, ty);
                            if model.blocks.is_empty() {
                                prop_assert_eq!(
                                    added,
                                    Err(ScopeError::NoActiveScope { name: name.to_string() })
                                );
                            } else if model.collides(policy, name) {
                                let rejected = matches!(
                                    added,
                                    Err(ScopeError::DuplicateDeclaration { .. })
                                );
                                prop_assert!(rejected);
                            } else {
                                prop_assert_eq!(added, Ok(()));
                                if let Some(block) = model.blocks.last_mut() {
                                    block.push((name.to_string(), ty));
                                }
                            }
                        }
                        Op::Lookup { name } => {
                            prop_assert_eq!(context.lookup_symbol(NAMES[name]), model.lookup(NAMES[name]));
                        }
                    }

                    prop_assert_eq!(context.depth(), model.blocks.len());
                    for name in NAMES {
                        prop_assert_eq!(context.lookup_symbol(name), model.lookup(name));
                    }
                }
            }

            #[test]
            fn added_name_resolves_until_its_block_closes(
                name in "[a-z_][a-z0-9_]{0,12}",
                opened in 1usize..8,
                closed in 0usize..8,
            ) {
                let (int, _) = types();
                let closed = closed.min(opened);
                let mut context = DeclContext::new();
                for _ in 0..opened {
                    context.push_symbol_table();
                }

                prop_assert_eq!(context.add_symbol(name.as_str(), int), Ok(()));
                prop_assert_eq!(context.lookup_symbol(&name), Some(int));

                for _ in 0..closed {
                    prop_assert!(context.pop_current_symbol_table().is_ok());
                }
                let expected = (closed == 0).then_some(int);
                prop_assert_eq!(context.lookup_symbol(&name), expected);
                prop_assert_eq!(context.depth(), opened - closed);
            }
        }
    }
}
