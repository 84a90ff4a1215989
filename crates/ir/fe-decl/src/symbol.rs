//! Symbol tables mapping names to qualified types

use fe_span::Location;
use fe_ty::QualType;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

/// What a name is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    /// Declared type
    pub ty: QualType,
    /// Where the declaration was written, when the lowering pass knew
    pub location: Option<Location>,
}

impl Binding {
    /// Creates a binding with no source location
    #[must_use]
    pub fn new(ty: QualType) -> Self {
        Self { ty, location: None }
    }

    /// Creates a binding declared at `location`
    #[must_use]
    pub fn at(ty: QualType, location: Location) -> Self {
        Self {
            ty,
            location: Some(location),
        }
    }
}

/// Which existing bindings make a new declaration of the same name an error
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShadowPolicy {
    /// Reject when the name is visible from any enclosing table
    ///
    /// An inner block cannot reuse a name already bound by an outer one.
    #[default]
    RejectIfVisible,
    /// Reject only when the innermost table already binds the name
    ///
    /// Inner declarations shadow outer ones.
    RejectInCurrentScope,
}

/// Names bound in one lexical block, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    bindings: IndexMap<String, Binding, FxBuildHasher>,
}

impl SymbolTable {
    /// Create a new empty symbol table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binding for `name`, if present
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Whether `name` is bound here
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Binds `name`, returning the binding it replaced
    ///
    /// Callers decide beforehand whether a collision is an error; see
    /// [`ShadowPolicy`].
    pub fn insert(&mut self, name: String, binding: Binding) -> Option<Binding> {
        self.bindings.insert(name, binding)
    }

    /// Unbinds `name`, keeping the order of the remaining names
    pub fn remove(&mut self, name: &str) -> Option<Binding> {
        self.bindings.shift_remove(name)
    }

    /// Number of bound names
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no name is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bound names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Bindings in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings
            .iter()
            .map(|(name, binding)| (name.as_str(), binding))
    }

    /// Removes every binding
    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}
