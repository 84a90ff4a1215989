//! Name binding for the C frontend
//!
//! The lowering pass drives a [`Binder`] while it walks the syntax tree:
//! top-level declarations go through [`Binder::declare_global`] and friends,
//! function bodies through the [`FunctionBinder`] returned by
//! [`Binder::begin_function`]. Each binder owns one translation unit, so
//! separate compilations never share state.
//!
//! ```
//! use fe_arena::Arena;
//! use fe_bind::Binder;
//! use fe_decl::{FunctionDecl, ParamVarDecl, VarDecl};
//! use fe_ty::{QualType, TyIdInner};
//!
//! let mut types = Arena::new();
//! let int = QualType::new(types.alloc(TyIdInner));
//!
//! let mut binder = Binder::new();
//! binder.declare_global(VarDecl::new("limit", int), None);
//!
//! let mut main = FunctionDecl::new("main", int);
//! main.add_param(ParamVarDecl::new("argc", int));
//! let mut body = binder.begin_function(main, None);
//! assert_eq!(body.resolve("argc", None), Some(int));
//! assert_eq!(body.resolve("limit", None), Some(int));
//! body.finish();
//!
//! let output = binder.finish();
//! assert!(!output.has_errors());
//! assert_eq!(output.unit.context().num_decls(), 2);
//! ```

mod binder;
mod error;
mod options;

pub use binder::{BindOutput, Binder, FunctionBinder};
pub use error::{BindError, compute_suggestions};
pub use options::BindOptions;
