//! Declaration model for the C frontend
//!
//! This crate holds the nodes the lowering pass builds from the concrete
//! syntax tree: the declaration hierarchy ([`Decl`] and its layers), and the
//! two kinds of scope that track which names are visible while lowering.
//!
//! - [`GlobalContext`] is the translation unit's single flat scope
//! - [`DeclContext`] is a stack of block tables owned by each function
//!
//! Types are referenced through [`fe_ty::QualType`]; statements and
//! expressions through the opaque handles in [`StmtId`] and [`ExprId`].

mod context;
mod decl;
mod error;
mod global;
mod node;
mod symbol;

pub use context::DeclContext;
pub use decl::{
    AsNamedDecl, AsValueDecl, BasicKind, Decl, DeclKind, DeclaratorDecl, EnumDecl, Enumerator,
    FunctionDecl, NamedDecl, ParamVarDecl, RecordDecl, TranslationUnitDecl, TypeDecl, ValueDecl,
    VarDecl,
};
pub use error::{DeclError, IndexedItem, ScopeError};
pub use global::GlobalContext;
pub use node::{ExprId, ExprIdInner, StmtId, StmtIdInner};
pub use symbol::{Binding, ShadowPolicy, SymbolTable};
