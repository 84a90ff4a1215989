//! Building a translation unit while tracking visible names

use crate::error::{BindError, compute_suggestions};
use crate::options::BindOptions;
use fe_decl::{
    AsNamedDecl, AsValueDecl, Decl, DeclKind, EnumDecl, FunctionDecl, RecordDecl, ScopeError,
    SymbolTable, TranslationUnitDecl, VarDecl,
};
use fe_span::Location;
use fe_ty::QualType;
use rustc_hash::FxHashMap;
use std::mem;

/// A `struct`, `union` or `enum` tag already declared in the unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TagEntry {
    kind: DeclKind,
    location: Option<Location>,
}

/// Result of binding one translation unit
#[derive(Debug, Clone, PartialEq)]
pub struct BindOutput {
    /// The finished unit, duplicates included
    pub unit: TranslationUnitDecl,
    /// Everything that went wrong, in the order it was found
    pub diagnostics: Vec<BindError>,
}

impl BindOutput {
    /// Whether any diagnostic was reported
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Owns the translation unit being lowered and the scopes that go with it
///
/// Errors in the source never stop binding: they are collected and handed
/// back by [`Binder::finish`], and the offending declaration is still kept
/// in the tree.
#[derive(Debug, Default)]
pub struct Binder {
    unit: TranslationUnitDecl,
    tags: FxHashMap<String, TagEntry>,
    options: BindOptions,
    diagnostics: Vec<BindError>,
}

impl Binder {
    /// Creates a binder with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a binder with the given options
    #[must_use]
    pub fn with_options(options: BindOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Options in force
    #[must_use]
    pub fn options(&self) -> &BindOptions {
        &self.options
    }

    /// The unit built so far
    #[must_use]
    pub fn unit(&self) -> &TranslationUnitDecl {
        &self.unit
    }

    /// Diagnostics reported so far
    #[must_use]
    pub fn diagnostics(&self) -> &[BindError] {
        &self.diagnostics
    }

    /// Kind of the tag declared as `name`, if any
    #[must_use]
    pub fn lookup_tag(&self, name: &str) -> Option<DeclKind> {
        self.tags.get(name).map(|tag| tag.kind)
    }

    /// Type of a global name
    #[must_use]
    pub fn lookup_global(&self, name: &str) -> Option<QualType> {
        self.unit.context().check_symbol(name)
    }

    /// Appends a top-level declaration and binds its name
    ///
    /// Value declarations go in the ordinary namespace; named records and
    /// enums go in the tag namespace, so `struct s` and a variable `s` can
    /// coexist. `location` overrides the location stored on the declaration.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn declare_global(&mut self, decl: impl Into<Decl>, location: Option<Location>) {
        let decl = decl.into();
        let location = location.or_else(|| decl.location());

        match decl.kind() {
            DeclKind::Record | DeclKind::Enum => {
                if let Some(name) = decl.name() {
                    self.declare_tag(name, decl.kind(), location);
                }
            }
            _ => {
                if let (Some(name), Some(ty)) = (decl.name(), decl.qual_type()) {
                    self.bind_global(name, ty, location);
                }
            }
        }
        self.unit.context_mut().add_decl(decl);
    }

    /// Appends a `struct` or `union` declaration
    pub fn declare_record(&mut self, record: RecordDecl) {
        let location = record.location();
        self.declare_global(record, location);
    }

    /// Appends an `enum` declaration
    pub fn declare_enum(&mut self, decl: EnumDecl) {
        let location = decl.location();
        self.declare_global(decl, location);
    }

    /// Starts binding a function body
    ///
    /// The function's name is bound globally first, so the body can call
    /// it. Its outermost block is opened and holds the parameters. If the
    /// returned binder is dropped without [`FunctionBinder::finish`], that
    /// global binding is undone.
    #[tracing::instrument(level = "debug", skip_all, fields(function = %function.name()))]
    pub fn begin_function(
        &mut self,
        mut function: FunctionDecl,
        location: Option<Location>,
    ) -> FunctionBinder<'_> {
        let location = location.or_else(|| function.location());
        let global = self
            .bind_global(function.name(), function.qual_type(), location)
            .then(|| function.name().to_string());

        let params: Vec<_> = function
            .params()
            .iter()
            .map(|param| {
                (
                    param.name().to_string(),
                    param.qual_type(),
                    param.location(),
                    param.as_var().has_initializer(),
                )
            })
            .collect();

        let scope = function.scope_mut();
        scope.set_policy(self.options.shadow_policy);
        scope.push_symbol_table();

        let mut binder = FunctionBinder {
            binder: self,
            function,
            global,
        };
        for (name, ty, param_location, initialized) in params {
            if initialized && !binder.binder.options.allow_param_initializers {
                binder.binder.report(BindError::InitializedParameter {
                    name: name.clone(),
                    location: param_location,
                });
            }
            binder.bind_local(&name, ty, param_location);
        }
        binder
    }

    /// Hands back the unit and every diagnostic
    #[must_use]
    pub fn finish(self) -> BindOutput {
        tracing::debug!(
            decls = self.unit.context().num_decls(),
            diagnostics = self.diagnostics.len(),
            "finished translation unit"
        );
        BindOutput {
            unit: self.unit,
            diagnostics: self.diagnostics,
        }
    }

    /// Returns whether `name` was newly bound
    fn bind_global(&mut self, name: &str, ty: QualType, location: Option<Location>) -> bool {
        if name.is_empty() {
            return false;
        }
        let context = self.unit.context_mut();
        let result = match location {
            Some(location) => context.add_symbol_at(name, ty, location),
            None => context.add_symbol(name, ty),
        };
        match result {
            Ok(()) => true,
            Err(error) => {
                self.report(error);
                false
            }
        }
    }

    fn declare_tag(&mut self, name: &str, kind: DeclKind, location: Option<Location>) {
        if name.is_empty() {
            return;
        }
        if let Some(existing) = self.tags.get(name) {
            let first = existing.location;
            self.report(ScopeError::DuplicateDeclaration {
                name: name.to_string(),
                first,
                second: location,
            });
            return;
        }
        tracing::debug!(name, %kind, "added tag");
        self.tags.insert(name.to_string(), TagEntry { kind, location });
    }

    fn report(&mut self, error: impl Into<BindError>) {
        let error = error.into();
        tracing::debug!(%error, "bind diagnostic");
        self.diagnostics.push(error);
    }
}

/// Binds names inside one function body
///
/// Dropping it without calling [`FunctionBinder::finish`] discards the
/// function and unbinds the global name [`Binder::begin_function`] bound.
/// Diagnostics already reported for the body are kept.
#[derive(Debug)]
#[must_use = "call `finish` to add the function to the unit"]
pub struct FunctionBinder<'binder> {
    binder: &'binder mut Binder,
    function: FunctionDecl,
    /// Global name bound for this function and not yet backed by a decl
    global: Option<String>,
}

impl FunctionBinder<'_> {
    /// The function being bound
    #[must_use]
    pub fn function(&self) -> &FunctionDecl {
        &self.function
    }

    /// Number of open blocks, the parameter block included
    #[must_use]
    pub fn depth(&self) -> usize {
        self.function.scope().depth()
    }

    /// Opens a nested block
    pub fn enter_block(&mut self) {
        self.function.scope_mut().push_symbol_table();
    }

    /// Closes the innermost block and returns its bindings
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::ScopeUnderflow`] if every block is already closed
    pub fn exit_block(&mut self) -> Result<SymbolTable, ScopeError> {
        self.function.scope_mut().pop_current_symbol_table()
    }

    /// Declares a variable in the innermost block
    ///
    /// The variable is appended to the function's declarations even when its
    /// name collides.
    pub fn declare_local(&mut self, var: VarDecl, location: Option<Location>) {
        let location = location.or_else(|| var.location());
        self.bind_local(var.name(), var.qual_type(), location);
        self.function.scope_mut().add_decl(var);
    }

    /// Type of the nearest visible declaration of `name`
    ///
    /// Blocks of the function are searched innermost first, then the
    /// globals. An unresolved name is reported along with the closest
    /// visible names.
    pub fn resolve(&mut self, name: &str, location: Option<Location>) -> Option<QualType> {
        let globals = self.binder.unit.context();
        let found = self
            .function
            .scope()
            .lookup_symbol(name)
            .or_else(|| globals.check_symbol(name));
        if found.is_some() {
            return found;
        }

        let visible = self
            .function
            .scope()
            .symbol_tables()
            .iter()
            .rev()
            .flat_map(SymbolTable::names)
            .chain(globals.symbol_table().names());
        let suggestions = compute_suggestions(name, visible, self.binder.options.max_suggestions);
        self.binder.report(BindError::undefined(name, location, suggestions));
        None
    }

    /// Closes every block and appends the function to the unit
    ///
    /// Returns the function's position among the unit's declarations.
    pub fn finish(mut self) -> usize {
        self.global = None;
        let placeholder = FunctionDecl::new("", self.function.qual_type());
        let mut function = mem::replace(&mut self.function, placeholder);
        function.scope_mut().clear_symbol_table();

        let context = self.binder.unit.context_mut();
        let position = context.num_decls();
        tracing::debug!(function = %function.name(), position, "finished function");
        context.add_decl(function);
        position
    }

    fn bind_local(&mut self, name: &str, ty: QualType, location: Option<Location>) {
        if name.is_empty() {
            return;
        }
        let scope = self.function.scope_mut();
        let result = match location {
            Some(location) => scope.add_symbol_at(name, ty, location),
            None => scope.add_symbol(name, ty),
        };
        if let Err(error) = result {
            self.binder.report(error);
        }
    }
}

impl Drop for FunctionBinder<'_> {
    fn drop(&mut self) {
        if let Some(name) = self.global.take() {
            tracing::debug!(function = %name, "abandoned function");
            self.binder.unit.context_mut().remove_symbol(&name);
        }
    }
}
