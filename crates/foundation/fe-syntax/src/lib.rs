//! Concrete syntax tree produced by the parser
//!
//! The tree is untyped: every node records whether it is a terminal, the
//! grammar symbol it was reduced from, the lexeme it matched (terminals only)
//! and the semantic action the grammar attached to it. Lowering walks this
//! tree and builds declarations from it.
//!
//! Nodes own their children outright. Releasing a tree consumes it, so a
//! subtree can never be released twice.

mod lex;

pub use lex::LexUnit;

use fe_span::Location;
use std::{fmt, mem};

/// Terminal / non-terminal marker of a parse node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// Leaf matched directly from a token
    Terminal,
    /// Interior node produced by a grammar reduction
    NonTerminal,
}

/// Semantic action tag attached to a node by the grammar
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SemanticAction {
    /// No action
    #[default]
    Pass,
    /// Named action dispatched by the lowering pass
    Named(String),
}

impl SemanticAction {
    /// Whether this is the no-op action
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for SemanticAction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(formatter, "Pass"),
            Self::Named(name) => write!(formatter, "{name}"),
        }
    }
}

/// A concrete syntax tree node
///
/// Cloning, comparing, formatting and dropping all walk the tree with an
/// explicit stack, so arbitrarily deep trees are handled.
pub struct CstNode {
    kind: TermKind,
    /// Matched lexeme, empty when the node has none
    id: String,
    /// Grammar symbol name
    symbol: String,
    /// Ordinal among siblings, assigned by the parser
    family_pos: u32,
    action: SemanticAction,
    token: Option<LexUnit>,
    children: Vec<CstNode>,
}

impl CstNode {
    /// Creates a childless node at family position 0 with the `Pass` action
    #[must_use]
    pub fn new(kind: TermKind, id: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            symbol: symbol.into(),
            family_pos: 0,
            action: SemanticAction::Pass,
            token: None,
            children: Vec::new(),
        }
    }

    /// Creates a node from a lexer token, keeping the token for its location
    #[must_use]
    pub fn from_token(kind: TermKind, token: LexUnit) -> Self {
        let mut node = Self::new(kind, token.id(), token.symbol());
        node.token = Some(token);
        node
    }

    /// Shorthand for a terminal built with [`CstNode::from_token`]
    #[must_use]
    pub fn leaf(token: LexUnit) -> Self {
        Self::from_token(TermKind::Terminal, token)
    }

    /// Terminal / non-terminal marker
    #[must_use]
    pub fn kind(&self) -> TermKind {
        self.kind
    }

    /// Whether this node is a terminal
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.kind == TermKind::Terminal
    }

    /// The matched lexeme, if any
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        (!self.id.is_empty()).then_some(self.id.as_str())
    }

    /// The grammar symbol name
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Ordinal among siblings
    #[must_use]
    pub fn family_pos(&self) -> u32 {
        self.family_pos
    }

    /// Sets the ordinal among siblings
    pub fn set_family_pos(&mut self, family_pos: u32) {
        self.family_pos = family_pos;
    }

    /// The semantic action tag
    #[must_use]
    pub fn action(&self) -> &SemanticAction {
        &self.action
    }

    /// Replaces the semantic action tag
    pub fn set_action(&mut self, action: SemanticAction) {
        self.action = action;
    }

    /// The token this node was built from, if it is a lexer leaf
    #[must_use]
    pub fn token(&self) -> Option<&LexUnit> {
        self.token.as_ref()
    }

    /// Source location of the originating token
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        self.token.as_ref().map(LexUnit::location)
    }

    /// Child nodes in source order
    #[must_use]
    pub fn children(&self) -> &[CstNode] {
        &self.children
    }

    /// Mutable access to a child
    pub fn child_mut(&mut self, index: usize) -> Option<&mut CstNode> {
        self.children.get_mut(index)
    }

    /// Appends an owned child
    pub fn push_child(&mut self, child: CstNode) {
        self.children.push(child);
    }

    /// Builder form of [`CstNode::push_child`]
    #[must_use]
    pub fn with_child(mut self, child: CstNode) -> Self {
        self.children.push(child);
        self
    }

    /// Iterates the subtree depth-first in pre-order, yielding each node with its depth
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            stack: vec![(0, self)],
        }
    }

    /// Number of nodes in the subtree, this node included
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.preorder().count()
    }

    /// Renders the subtree starting at depth 0
    #[must_use]
    pub fn dump(&self) -> String {
        self.to_string()
    }

    /// Copy of this node without its children
    fn shallow_clone(&self) -> Self {
        Self {
            kind: self.kind,
            id: self.id.clone(),
            symbol: self.symbol.clone(),
            family_pos: self.family_pos,
            action: self.action.clone(),
            token: self.token.clone(),
            children: Vec::new(),
        }
    }

    /// Equality of everything but the children themselves
    fn shallow_eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.id == other.id
            && self.symbol == other.symbol
            && self.family_pos == other.family_pos
            && self.action == other.action
            && self.token == other.token
            && self.children.len() == other.children.len()
    }
}

impl Clone for CstNode {
    fn clone(&self) -> Self {
        // Ancestors of the node being copied, root first.
        let mut open: Vec<Self> = Vec::new();
        for (depth, node) in self.preorder() {
            close_until(&mut open, depth);
            open.push(node.shallow_clone());
        }
        close_until(&mut open, 1);
        open.pop().unwrap_or_else(|| self.shallow_clone())
    }
}

/// Attaches finished nodes to their parents until `depth` ancestors remain
fn close_until(open: &mut Vec<CstNode>, depth: usize) {
    while open.len() > depth.max(1) {
        let Some(done) = open.pop() else { break };
        if let Some(parent) = open.last_mut() {
            parent.children.push(done);
        }
    }
}

impl PartialEq for CstNode {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.preorder();
        let mut right = other.preorder();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some((left_depth, left_node)), Some((right_depth, right_node)))
                    if left_depth == right_depth && left_node.shallow_eq(right_node) => {}
                _ => return false,
            }
        }
    }
}

impl Eq for CstNode {}

impl fmt::Debug for CstNode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_list()
            .entries(self.preorder().map(|(depth, node)| FlatNode { depth, node }))
            .finish()
    }
}

/// One pre-order entry of a tree's `Debug` output
struct FlatNode<'tree> {
    depth: usize,
    node: &'tree CstNode,
}

impl fmt::Debug for FlatNode<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CstNode")
            .field("depth", &self.depth)
            .field("kind", &self.node.kind)
            .field("id", &self.node.id)
            .field("symbol", &self.node.symbol)
            .field("family_pos", &self.node.family_pos)
            .field("action", &self.node.action)
            .field("token", &self.node.token)
            .field("children", &self.node.children.len())
            .finish()
    }
}

impl fmt::Display for CstNode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        print_cst(self, 0, formatter)
    }
}

// Iterative so that a long right-recursive chain cannot overflow the stack.
impl Drop for CstNode {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Pre-order iterator over a subtree
pub struct Preorder<'tree> {
    stack: Vec<(usize, &'tree CstNode)>,
}

impl<'tree> Iterator for Preorder<'tree> {
    type Item = (usize, &'tree CstNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// Writes one line per node in pre-order, indented by depth
///
/// Each line is `depth` spaces, a dash, the grammar symbol and, when the node
/// matched a lexeme, the lexeme in single quotes.
///
/// # Errors
///
/// Returns an error if the underlying writer fails
pub fn print_cst(node: &CstNode, depth: usize, out: &mut impl fmt::Write) -> fmt::Result {
    for (offset, current) in node.preorder() {
        let indent = depth + offset;
        write!(out, "{:indent$}-{}", "", current.symbol)?;
        if let Some(id) = current.id() {
            write!(out, " '{id}'")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Releases a tree post-order and returns how many nodes were released
///
/// Passing `None` is a no-op.
pub fn delete_cst(node: Option<CstNode>) -> usize {
    node.map_or(0, |root| release_with(root, |_| {}))
}

/// Releases a tree post-order, calling `visit` on each node just before it goes
///
/// Children are released in order and before their parent, so by the time
/// `visit` sees a node its children are already gone.
pub fn release_with(root: CstNode, mut visit: impl FnMut(&CstNode)) -> usize {
    let mut released = 0;
    let mut stack = vec![(root, false)];

    while let Some((mut node, expanded)) = stack.pop() {
        if expanded {
            tracing::trace!(symbol = %node.symbol, "releasing cst node");
            visit(&node);
            released += 1;
            continue;
        }
        let children = mem::take(&mut node.children);
        stack.push((node, true));
        stack.extend(children.into_iter().rev().map(|child| (child, false)));
    }

    released
}
