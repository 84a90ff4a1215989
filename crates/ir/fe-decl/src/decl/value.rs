//! Value declarations: declarators, functions, variables and parameters

use super::named::NamedDecl;
use super::{AsNamedDecl, AsValueDecl};
use crate::context::DeclContext;
use crate::error::{DeclError, IndexedItem, checked};
use crate::node::{ExprId, StmtId};
use fe_ty::QualType;

/// A named declaration with a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDecl {
    named: NamedDecl,
    pub(super) ty: QualType,
}

impl ValueDecl {
    /// Creates a value declaration
    #[must_use]
    pub fn new(name: impl Into<String>, ty: QualType) -> Self {
        Self {
            named: NamedDecl::new(name),
            ty,
        }
    }
}

impl AsNamedDecl for ValueDecl {
    fn as_named(&self) -> &NamedDecl {
        &self.named
    }

    fn as_named_mut(&mut self) -> &mut NamedDecl {
        &mut self.named
    }
}

impl AsValueDecl for ValueDecl {
    fn as_value(&self) -> &ValueDecl {
        self
    }

    fn as_value_mut(&mut self) -> &mut ValueDecl {
        self
    }
}

/// A value declaration written with a declarator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaratorDecl {
    value: ValueDecl,
}

impl DeclaratorDecl {
    /// Creates a declarator declaration
    #[must_use]
    pub fn new(name: impl Into<String>, ty: QualType) -> Self {
        Self {
            value: ValueDecl::new(name, ty),
        }
    }
}

/// Implements the named and value layers by delegating to a declarator field
macro_rules! impl_value_layers {
    ($ty:ty => $($field:ident).+) => {
        impl AsNamedDecl for $ty {
            fn as_named(&self) -> &NamedDecl {
                self.$($field).+.as_named()
            }

            fn as_named_mut(&mut self) -> &mut NamedDecl {
                self.$($field).+.as_named_mut()
            }
        }

        impl AsValueDecl for $ty {
            fn as_value(&self) -> &ValueDecl {
                self.$($field).+.as_value()
            }

            fn as_value_mut(&mut self) -> &mut ValueDecl {
                self.$($field).+.as_value_mut()
            }
        }
    };
}

impl_value_layers!(DeclaratorDecl => value);
impl_value_layers!(FunctionDecl => declarator);
impl_value_layers!(VarDecl => declarator);
impl_value_layers!(ParamVarDecl => var);

/// A function declaration or definition
///
/// The declared type is the function's return type. A function without a
/// body is a declaration only. Every function owns the scope its body's
/// blocks bind names in.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    declarator: DeclaratorDecl,
    params: Vec<ParamVarDecl>,
    body: Option<StmtId>,
    scope: DeclContext,
}

impl FunctionDecl {
    /// Creates a function with no parameters and no body
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: QualType) -> Self {
        Self {
            declarator: DeclaratorDecl::new(name, return_type),
            params: Vec::new(),
            body: None,
            scope: DeclContext::new(),
        }
    }

    /// Appends a parameter
    pub fn add_param(&mut self, param: ParamVarDecl) {
        self.params.push(param);
    }

    /// Replaces the whole parameter list
    pub fn set_params(&mut self, params: Vec<ParamVarDecl>) {
        self.params = params;
    }

    /// Number of parameters
    #[must_use]
    pub fn num_params(&self) -> usize {
        self.params.len()
    }

    /// Parameter at `pos`
    ///
    /// # Errors
    ///
    /// Returns [`DeclError::IndexOutOfRange`] if `pos` is past the last parameter
    pub fn param(&self, pos: usize) -> Result<&ParamVarDecl, DeclError> {
        checked(&self.params, pos, IndexedItem::Param)
    }

    /// Parameters in declaration order
    #[must_use]
    pub fn params(&self) -> &[ParamVarDecl] {
        &self.params
    }

    /// The compound statement forming the body, once parsed
    #[must_use]
    pub fn body(&self) -> Option<StmtId> {
        self.body
    }

    /// Attaches the body
    pub fn set_body(&mut self, body: StmtId) {
        self.body = Some(body);
    }

    /// Whether the function has a body
    #[must_use]
    pub fn is_definition(&self) -> bool {
        self.body.is_some()
    }

    /// The scope owned by this function
    #[must_use]
    pub fn scope(&self) -> &DeclContext {
        &self.scope
    }

    /// The scope owned by this function, mutably
    pub fn scope_mut(&mut self) -> &mut DeclContext {
        &mut self.scope
    }
}

/// A variable declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    declarator: DeclaratorDecl,
    initializer: Option<ExprId>,
}

impl VarDecl {
    /// Creates a variable with no initializer
    #[must_use]
    pub fn new(name: impl Into<String>, ty: QualType) -> Self {
        Self {
            declarator: DeclaratorDecl::new(name, ty),
            initializer: None,
        }
    }

    /// Whether an initializer is attached
    #[must_use]
    pub fn has_initializer(&self) -> bool {
        self.initializer.is_some()
    }

    /// The initializer expression
    #[must_use]
    pub fn initializer(&self) -> Option<ExprId> {
        self.initializer
    }

    /// Attaches an initializer expression
    pub fn set_initializer(&mut self, initializer: ExprId) {
        self.initializer = Some(initializer);
    }
}

/// A function parameter
///
/// Parameters are variables; nothing here stops an initializer from being
/// attached, callers that forbid default arguments must check for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamVarDecl {
    var: VarDecl,
}

impl ParamVarDecl {
    /// Creates a parameter
    #[must_use]
    pub fn new(name: impl Into<String>, ty: QualType) -> Self {
        Self {
            var: VarDecl::new(name, ty),
        }
    }

    /// The variable layer
    #[must_use]
    pub fn as_var(&self) -> &VarDecl {
        &self.var
    }

    /// The variable layer, mutably
    pub fn as_var_mut(&mut self) -> &mut VarDecl {
        &mut self.var
    }
}
