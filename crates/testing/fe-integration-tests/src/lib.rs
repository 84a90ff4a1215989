//! Integration test utilities for the frontend
//!
//! [`lower_unit`] is a small lowering pass that understands just enough
//! grammar symbols to drive a [`Binder`] from a hand-built syntax tree:
//!
//! - `translation_unit` holding `declaration`, `function_definition`,
//!   `struct_specifier`, `union_specifier` and `enum_specifier` children
//! - `declaration` and `parameter` as a `type_specifier` followed by an
//!   optional `identifier`
//! - `function_definition` as a `type_specifier`, an `identifier`, a
//!   `parameter_list` and a `compound_statement`
//! - inside bodies, nested `compound_statement`s open blocks and every
//!   `identifier` terminal is resolved

use anyhow::{Context, Result, bail};
use fe_arena::Arena;
use fe_bind::{Binder, FunctionBinder};
use fe_decl::{AsNamedDecl, EnumDecl, FunctionDecl, ParamVarDecl, RecordDecl, VarDecl};
use fe_span::Location;
use fe_syntax::{CstNode, LexUnit, TermKind};
use fe_ty::{QualType, TyIdInner};

/// The builtin types a test unit may name
#[derive(Debug, Clone, Copy)]
pub struct TypeFixture {
    /// `int`
    pub int: QualType,
    /// `float`
    pub float: QualType,
    /// `char`
    pub character: QualType,
    /// `void`
    pub void: QualType,
}

impl TypeFixture {
    /// Allocates one type id per builtin
    #[must_use]
    pub fn new() -> Self {
        let mut types = Arena::new();
        Self {
            int: QualType::new(types.alloc(TyIdInner)),
            float: QualType::new(types.alloc(TyIdInner)),
            character: QualType::new(types.alloc(TyIdInner)),
            void: QualType::new(types.alloc(TyIdInner)),
        }
    }

    /// Type named by a `type_specifier` lexeme
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<QualType> {
        match name {
            "int" => Some(self.int),
            "float" => Some(self.float),
            "char" => Some(self.character),
            "void" => Some(self.void),
            _ => None,
        }
    }
}

impl Default for TypeFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a terminal carrying a token at `row:col`
#[must_use]
pub fn token(symbol: &str, text: &str, row: u32, col: u32) -> CstNode {
    CstNode::leaf(LexUnit::new(text, symbol, row, col))
}

/// Creates a non-terminal whose children are numbered in order
#[must_use]
pub fn node(symbol: &str, children: impl IntoIterator<Item = CstNode>) -> CstNode {
    let mut parent = CstNode::new(TermKind::NonTerminal, "", symbol);
    for (position, mut child) in children.into_iter().enumerate() {
        child.set_family_pos(position as u32);
        parent.push_child(child);
    }
    parent
}

/// Lowers a `translation_unit` tree into `binder`
///
/// # Errors
///
/// Returns an error if the tree does not have the shape described in the
/// crate docs or names a type [`TypeFixture`] does not know. Errors in the
/// program itself are reported through the binder instead.
pub fn lower_unit(root: &CstNode, types: &TypeFixture, binder: &mut Binder) -> Result<()> {
    if root.symbol() != "translation_unit" {
        bail!("expected a translation_unit, found `{}`", root.symbol());
    }

    for child in root.children() {
        match child.symbol() {
            "declaration" => binder.declare_global(lower_var(child, types)?, None),
            "function_definition" => lower_function(child, types, binder)
                .with_context(|| format!("in function `{}`", identifier_text(child)))?,
            "struct_specifier" | "union_specifier" => {
                let mut record = RecordDecl::new(identifier_text(child));
                if child.symbol() == "union_specifier" {
                    record.set_union();
                }
                if let Some(location) = identifier_location(child) {
                    record.set_location(location);
                }
                binder.declare_record(record);
            }
            "enum_specifier" => {
                let mut decl = EnumDecl::new(identifier_text(child));
                if let Some(location) = identifier_location(child) {
                    decl.set_location(location);
                }
                for enumerator in child.children() {
                    if enumerator.symbol() == "enumerator" {
                        decl.add_enumerator(enumerator.id().unwrap_or_default(), None);
                    }
                }
                binder.declare_enum(decl);
            }
            other => bail!("unexpected top-level `{other}`"),
        }
    }
    Ok(())
}

fn identifier(node: &CstNode) -> Option<&CstNode> {
    node.children().iter().find(|child| child.symbol() == "identifier")
}

fn identifier_text(node: &CstNode) -> &str {
    identifier(node).and_then(CstNode::id).unwrap_or_default()
}

fn identifier_location(node: &CstNode) -> Option<Location> {
    identifier(node).and_then(CstNode::location)
}

fn specified_type(node: &CstNode, types: &TypeFixture) -> Result<QualType> {
    let specifier = node
        .children()
        .iter()
        .find(|child| child.symbol() == "type_specifier")
        .with_context(|| format!("`{}` has no type_specifier", node.symbol()))?;
    let name = specifier.id().unwrap_or_default();
    types
        .by_name(name)
        .with_context(|| format!("unknown type `{name}`"))
}

fn lower_var(node: &CstNode, types: &TypeFixture) -> Result<VarDecl> {
    let mut var = VarDecl::new(identifier_text(node), specified_type(node, types)?);
    if let Some(location) = identifier_location(node) {
        var.set_location(location);
    }
    Ok(var)
}

fn lower_function(node: &CstNode, types: &TypeFixture, binder: &mut Binder) -> Result<()> {
    let mut function = FunctionDecl::new(identifier_text(node), specified_type(node, types)?);
    if let Some(location) = identifier_location(node) {
        function.set_location(location);
    }

    let params = node
        .children()
        .iter()
        .filter(|child| child.symbol() == "parameter_list")
        .flat_map(CstNode::children);
    for param in params {
        let mut decl = ParamVarDecl::new(identifier_text(param), specified_type(param, types)?);
        if let Some(location) = identifier_location(param) {
            decl.set_location(location);
        }
        function.add_param(decl);
    }

    // The outermost block of the body shares the parameters' table.
    let mut body = binder.begin_function(function, None);
    for block in node
        .children()
        .iter()
        .filter(|child| child.symbol() == "compound_statement")
    {
        for item in block.children() {
            lower_statement(item, types, &mut body)?;
        }
    }
    body.finish();
    Ok(())
}

fn lower_statement(
    node: &CstNode,
    types: &TypeFixture,
    body: &mut FunctionBinder<'_>,
) -> Result<()> {
    match node.symbol() {
        "declaration" => body.declare_local(lower_var(node, types)?, None),
        "compound_statement" => {
            body.enter_block();
            for item in node.children() {
                lower_statement(item, types, body)?;
            }
            body.exit_block()?;
        }
        "identifier" => {
            if let Some(name) = node.id() {
                body.resolve(name, node.location());
            }
        }
        _ => {
            for child in node.children() {
                lower_statement(child, types, body)?;
            }
        }
    }
    Ok(())
}
