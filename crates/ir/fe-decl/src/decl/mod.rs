//! The declaration hierarchy
//!
//! Declaration kinds form layers: every named declaration has a name, every
//! value declaration adds a type, every variable adds an optional
//! initializer, and so on. Each layer is a struct that embeds the one below
//! it, and [`Decl`] is the closed set of concrete kinds. The kind of a
//! declaration is its enum variant, so it can never disagree with the data
//! the node actually carries.
//!
//! ```text
//! Decl
//! ├── TranslationUnitDecl            (owns the GlobalContext)
//! └── NamedDecl
//!     ├── TypeDecl
//!     │   ├── RecordDecl
//!     │   └── EnumDecl
//!     └── ValueDecl
//!         └── DeclaratorDecl
//!             ├── FunctionDecl       (owns a DeclContext)
//!             └── VarDecl
//!                 └── ParamVarDecl
//! ```

mod named;
mod unit;
mod value;

pub use named::{EnumDecl, Enumerator, NamedDecl, RecordDecl, TypeDecl};
pub use unit::TranslationUnitDecl;
pub use value::{DeclaratorDecl, FunctionDecl, ParamVarDecl, ValueDecl, VarDecl};

use crate::context::DeclContext;
use crate::global::GlobalContext;
use fe_span::Location;
use fe_ty::QualType;
use std::fmt;

/// AST node category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    /// Declaration
    Decl,
    /// Statement
    Stmt,
    /// Expression
    Expr,
}

/// Concrete declaration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// Root of a translation unit
    TranslationUnit,
    /// Named declaration with no further specialization
    Named,
    /// Type declaration with no further specialization
    Type,
    /// `struct` or `union`
    Record,
    /// `enum`
    Enum,
    /// Value declaration with no further specialization
    Value,
    /// Declarator with no further specialization
    Declarator,
    /// Function declaration or definition
    Function,
    /// Variable
    Var,
    /// Function parameter
    ParamVar,
}

impl DeclKind {
    /// Whether declarations of this kind carry a name
    #[must_use]
    pub fn is_named(self) -> bool {
        !matches!(self, Self::TranslationUnit)
    }

    /// Whether this kind declares a type
    #[must_use]
    pub fn is_type(self) -> bool {
        matches!(self, Self::Type | Self::Record | Self::Enum)
    }

    /// Whether this kind declares a typed value
    #[must_use]
    pub fn is_value(self) -> bool {
        matches!(
            self,
            Self::Value | Self::Declarator | Self::Function | Self::Var | Self::ParamVar
        )
    }

    /// Whether this kind comes from a declarator
    #[must_use]
    pub fn is_declarator(self) -> bool {
        matches!(
            self,
            Self::Declarator | Self::Function | Self::Var | Self::ParamVar
        )
    }

    /// Whether this kind is a variable (parameters included)
    #[must_use]
    pub fn is_var(self) -> bool {
        matches!(self, Self::Var | Self::ParamVar)
    }

    /// Whether declarations of this kind open a scope of their own
    #[must_use]
    pub fn introduces_scope(self) -> bool {
        matches!(self, Self::Function | Self::TranslationUnit)
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TranslationUnit => "TranslationUnitDecl",
            Self::Named => "NamedDecl",
            Self::Type => "TypeDecl",
            Self::Record => "RecordDecl",
            Self::Enum => "EnumDecl",
            Self::Value => "ValueDecl",
            Self::Declarator => "DeclaratorDecl",
            Self::Function => "FunctionDecl",
            Self::Var => "VarDecl",
            Self::ParamVar => "ParamVarDecl",
        };
        write!(formatter, "{name}")
    }
}

/// Access to the named layer of a declaration
pub trait AsNamedDecl {
    /// The named layer
    fn as_named(&self) -> &NamedDecl;

    /// The named layer, mutably
    fn as_named_mut(&mut self) -> &mut NamedDecl;

    /// Declared name, empty for anonymous declarations
    fn name(&self) -> &str {
        &self.as_named().name
    }

    /// Renames the declaration
    fn set_name(&mut self, name: impl Into<String>) {
        self.as_named_mut().name = name.into();
    }

    /// Where the declaration was written
    fn location(&self) -> Option<Location> {
        self.as_named().location
    }

    /// Records where the declaration was written
    fn set_location(&mut self, location: Location) {
        self.as_named_mut().location = Some(location);
    }
}

/// Access to the value layer of a declaration
pub trait AsValueDecl: AsNamedDecl {
    /// The value layer
    fn as_value(&self) -> &ValueDecl;

    /// The value layer, mutably
    fn as_value_mut(&mut self) -> &mut ValueDecl;

    /// Declared type
    fn qual_type(&self) -> QualType {
        self.as_value().ty
    }

    /// Replaces the declared type
    fn set_qual_type(&mut self, ty: QualType) {
        self.as_value_mut().ty = ty;
    }
}

/// A declaration of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    /// Root of a translation unit
    TranslationUnit(TranslationUnitDecl),
    /// Bare named declaration
    Named(NamedDecl),
    /// Bare type declaration
    Type(TypeDecl),
    /// `struct` / `union`
    Record(RecordDecl),
    /// `enum`
    Enum(EnumDecl),
    /// Bare value declaration
    Value(ValueDecl),
    /// Bare declarator
    Declarator(DeclaratorDecl),
    /// Function
    Function(FunctionDecl),
    /// Variable
    Var(VarDecl),
    /// Function parameter
    ParamVar(ParamVarDecl),
}

impl Decl {
    /// AST node category, always [`BasicKind::Decl`]
    #[must_use]
    pub fn basic_kind(&self) -> BasicKind {
        BasicKind::Decl
    }

    /// Concrete kind of this declaration
    #[must_use]
    pub fn kind(&self) -> DeclKind {
        match self {
            Self::TranslationUnit(_) => DeclKind::TranslationUnit,
            Self::Named(_) => DeclKind::Named,
            Self::Type(_) => DeclKind::Type,
            Self::Record(_) => DeclKind::Record,
            Self::Enum(_) => DeclKind::Enum,
            Self::Value(_) => DeclKind::Value,
            Self::Declarator(_) => DeclKind::Declarator,
            Self::Function(_) => DeclKind::Function,
            Self::Var(_) => DeclKind::Var,
            Self::ParamVar(_) => DeclKind::ParamVar,
        }
    }

    /// The named layer, for every kind but the translation unit
    #[must_use]
    pub fn as_named(&self) -> Option<&NamedDecl> {
        match self {
            Self::TranslationUnit(_) => None,
            Self::Named(decl) => Some(decl),
            Self::Type(decl) => Some(decl.as_named()),
            Self::Record(decl) => Some(decl.as_named()),
            Self::Enum(decl) => Some(decl.as_named()),
            Self::Value(decl) => Some(decl.as_named()),
            Self::Declarator(decl) => Some(decl.as_named()),
            Self::Function(decl) => Some(decl.as_named()),
            Self::Var(decl) => Some(decl.as_named()),
            Self::ParamVar(decl) => Some(decl.as_named()),
        }
    }

    /// The value layer, for value declarations
    #[must_use]
    pub fn as_value(&self) -> Option<&ValueDecl> {
        match self {
            Self::Value(decl) => Some(decl),
            Self::Declarator(decl) => Some(decl.as_value()),
            Self::Function(decl) => Some(decl.as_value()),
            Self::Var(decl) => Some(decl.as_value()),
            Self::ParamVar(decl) => Some(decl.as_value()),
            Self::TranslationUnit(_)
            | Self::Named(_)
            | Self::Type(_)
            | Self::Record(_)
            | Self::Enum(_) => None,
        }
    }

    /// Declared name, if the declaration has a name layer
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.as_named().map(|named| named.name.as_str())
    }

    /// Where the declaration was written
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        self.as_named().and_then(|named| named.location)
    }

    /// Declared type, for value declarations
    #[must_use]
    pub fn qual_type(&self) -> Option<QualType> {
        self.as_value().map(|value| value.ty)
    }

    /// Downcast to a record declaration
    #[must_use]
    pub fn as_record(&self) -> Option<&RecordDecl> {
        match self {
            Self::Record(decl) => Some(decl),
            _ => None,
        }
    }

    /// Mutable downcast to a record declaration
    pub fn as_record_mut(&mut self) -> Option<&mut RecordDecl> {
        match self {
            Self::Record(decl) => Some(decl),
            _ => None,
        }
    }

    /// Downcast to an enum declaration
    #[must_use]
    pub fn as_enum(&self) -> Option<&EnumDecl> {
        match self {
            Self::Enum(decl) => Some(decl),
            _ => None,
        }
    }

    /// Mutable downcast to an enum declaration
    pub fn as_enum_mut(&mut self) -> Option<&mut EnumDecl> {
        match self {
            Self::Enum(decl) => Some(decl),
            _ => None,
        }
    }

    /// Downcast to a function declaration
    #[must_use]
    pub fn as_function(&self) -> Option<&FunctionDecl> {
        match self {
            Self::Function(decl) => Some(decl),
            _ => None,
        }
    }

    /// Mutable downcast to a function declaration
    pub fn as_function_mut(&mut self) -> Option<&mut FunctionDecl> {
        match self {
            Self::Function(decl) => Some(decl),
            _ => None,
        }
    }

    /// The variable layer of a variable or parameter
    #[must_use]
    pub fn as_var(&self) -> Option<&VarDecl> {
        match self {
            Self::Var(decl) => Some(decl),
            Self::ParamVar(decl) => Some(decl.as_var()),
            _ => None,
        }
    }

    /// Mutable variable layer of a variable or parameter
    pub fn as_var_mut(&mut self) -> Option<&mut VarDecl> {
        match self {
            Self::Var(decl) => Some(decl),
            Self::ParamVar(decl) => Some(decl.as_var_mut()),
            _ => None,
        }
    }

    /// Downcast to a parameter declaration
    #[must_use]
    pub fn as_param(&self) -> Option<&ParamVarDecl> {
        match self {
            Self::ParamVar(decl) => Some(decl),
            _ => None,
        }
    }

    /// Downcast to a translation unit
    #[must_use]
    pub fn as_translation_unit(&self) -> Option<&TranslationUnitDecl> {
        match self {
            Self::TranslationUnit(decl) => Some(decl),
            _ => None,
        }
    }

    /// The block scope this declaration owns, if any
    #[must_use]
    pub fn scope(&self) -> Option<&DeclContext> {
        self.as_function().map(FunctionDecl::scope)
    }

    /// Mutable access to the block scope this declaration owns
    pub fn scope_mut(&mut self) -> Option<&mut DeclContext> {
        self.as_function_mut().map(FunctionDecl::scope_mut)
    }

    /// The global scope, for a translation unit
    #[must_use]
    pub fn global_context(&self) -> Option<&GlobalContext> {
        self.as_translation_unit()
            .map(TranslationUnitDecl::context)
    }

    /// Whether this declaration owns a scope of either flavour
    #[must_use]
    pub fn is_scope(&self) -> bool {
        self.scope().is_some() || self.global_context().is_some()
    }
}

macro_rules! impl_from_decl {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Decl {
                fn from(decl: $ty) -> Self {
                    Self::$variant(decl)
                }
            }
        )*
    };
}

impl_from_decl! {
    TranslationUnit(TranslationUnitDecl),
    Named(NamedDecl),
    Type(TypeDecl),
    Record(RecordDecl),
    Enum(EnumDecl),
    Value(ValueDecl),
    Declarator(DeclaratorDecl),
    Function(FunctionDecl),
    Var(VarDecl),
    ParamVar(ParamVarDecl),
}

#[cfg(test)]
mod tests {
    use super::*;
    use fe_arena::Arena;
    use fe_ty::TyIdInner;

    fn int_type() -> QualType {
        let mut types = Arena::new();
        QualType::new(types.alloc(TyIdInner))
    }

    #[test]
    fn test_kind_follows_variant() {
        let ty = int_type();
        let decls: Vec<Decl> = vec![
            TranslationUnitDecl::new().into(),
            NamedDecl::new("n").into(),
            TypeDecl::new("t").into(),
            RecordDecl::new("r").into(),
            EnumDecl::new("e").into(),
            ValueDecl::new("v", ty).into(),
            DeclaratorDecl::new("d", ty).into(),
            FunctionDecl::new("f", ty).into(),
            VarDecl::new("x", ty).into(),
            ParamVarDecl::new("p", ty).into(),
        ];
        let kinds: Vec<_> = decls.iter().map(Decl::kind).collect();

        assert_eq!(
            kinds,
            [
                DeclKind::TranslationUnit,
                DeclKind::Named,
                DeclKind::Type,
                DeclKind::Record,
                DeclKind::Enum,
                DeclKind::Value,
                DeclKind::Declarator,
                DeclKind::Function,
                DeclKind::Var,
                DeclKind::ParamVar,
            ]
        );
        assert!(decls.iter().all(|decl| decl.basic_kind() == BasicKind::Decl));
    }

    #[test]
    fn test_layer_queries_agree_with_kind() {
        let ty = int_type();
        let decls: Vec<Decl> = vec![
            TranslationUnitDecl::new().into(),
            RecordDecl::new("r").into(),
            EnumDecl::new("").into(),
            FunctionDecl::new("f", ty).into(),
            VarDecl::new("x", ty).into(),
            ParamVarDecl::new("p", ty).into(),
        ];

        for decl in &decls {
            let kind = decl.kind();
            assert_eq!(decl.as_named().is_some(), kind.is_named(), "{kind}");
            assert_eq!(decl.as_value().is_some(), kind.is_value(), "{kind}");
            assert_eq!(decl.qual_type().is_some(), kind.is_value(), "{kind}");
            assert_eq!(decl.as_var().is_some(), kind.is_var(), "{kind}");
            assert_eq!(decl.is_scope(), kind.introduces_scope(), "{kind}");
        }
    }

    #[test]
    fn test_param_is_a_var() {
        let ty = int_type();
        let decl = Decl::from(ParamVarDecl::new("argc", ty));

        assert_eq!(decl.as_var().map(AsNamedDecl::name), Some("argc"));
        assert!(decl.as_param().is_some());
        assert!(decl.as_function().is_none());
        assert_eq!(decl.qual_type(), Some(ty));
    }

    #[test]
    fn test_named_accessors_through_trait() {
        let ty = int_type();
        let mut var = VarDecl::new("x", ty);
        var.set_name("y");
        var.set_location(Location::new(7, 3));

        let decl = Decl::from(var);
        assert_eq!(decl.name(), Some("y"));
        assert_eq!(decl.location(), Some(Location::new(7, 3)));
        assert_eq!(decl.kind().to_string(), "VarDecl");
    }

    #[test]
    fn test_function_exposes_its_scope() {
        let ty = int_type();
        let mut decl = Decl::from(FunctionDecl::new("main", ty));

        let scope = decl.scope_mut().expect("functions own a scope");
        scope.push_symbol_table();
        assert_eq!(decl.scope().map(DeclContext::depth), Some(1));
        assert!(Decl::from(VarDecl::new("x", ty)).scope().is_none());
    }
}
