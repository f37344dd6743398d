use std::{collections::VecDeque, fmt};

use thiserror::Error;

use crate::interpreter::token::{Token, TokenKind};

/// Index of a node inside a [`SyntaxTree`] arena.
pub type NodeId = usize;

/// Result type of fallible tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Reasons a cursor movement or node access can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The tree is empty, so there is no current node.
    #[error("the tree has no current node")]
    NoCurrent,
    /// The requested child index does not exist.
    #[error("child {index} does not exist, node has {len} children")]
    ChildOutOfRange {
        /// Requested child index.
        index: usize,
        /// Number of children of the current node.
        len:   usize,
    },
    /// The cursor is on the root and cannot move to a parent.
    #[error("the current node has no parent")]
    AtRoot,
    /// `pop_cache` was called without a matching `push_cache`.
    #[error("no saved cursor position to restore")]
    EmptyCache,
    /// A node id that does not belong to this tree.
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),
}

#[derive(Debug, Clone)]
struct Node {
    token:    Token,
    parent:   Option<NodeId>,
    children: Vec<NodeId>,
}

/// A mutable, parent-linked tree of tokens with a single movable cursor.
///
/// Nodes live in an arena and refer to each other by [`NodeId`], so the
/// parent links never alias ownership. The parser grows the tree below the
/// cursor; the evaluator walks the same cursor down and folds nodes into
/// values in place with [`SyntaxTree::reduce`].
///
/// A stack of saved cursor positions ([`push_cache`](Self::push_cache) /
/// [`pop_cache`](Self::pop_cache)) lets a caller descend into a subtree and
/// later come back to the exact node it left.
///
/// # Example
/// ```
/// use clicalc::interpreter::{
///     token::{Token, TokenKind},
///     tree::SyntaxTree,
/// };
///
/// let mut tree = SyntaxTree::new();
/// tree.add_child(Token::expression());
/// tree.add_child(Token::new(TokenKind::Integer, "2"));
///
/// tree.push_cache();
/// tree.advance_forward(0).unwrap();
/// assert_eq!(tree.contents().unwrap().text, "2");
///
/// tree.pop_cache().unwrap();
/// assert!(tree.at_root());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SyntaxTree {
    nodes:   Vec<Node>,
    root:    Option<NodeId>,
    current: Option<NodeId>,
    cache:   Vec<Option<NodeId>>,
}

impl SyntaxTree {
    /// Creates an empty tree with no root and no cursor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no node has been added yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the id of the root node.
    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns the id of the node under the cursor.
    #[must_use]
    pub const fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Appends a token as the last child of the current node.
    ///
    /// On an empty tree the token becomes the root and the cursor moves onto
    /// it. Otherwise the cursor stays where it is.
    ///
    /// # Returns
    /// The id of the new node.
    pub fn add_child(&mut self, token: Token) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node { token,
                               parent: self.current,
                               children: Vec::new() });

        match self.current {
            Some(current) => self.nodes[current].children.push(id),
            None => {
                self.root = Some(id);
                self.current = Some(id);
            },
        }
        id
    }

    /// Moves the cursor to the child at `index`.
    pub fn advance_forward(&mut self, index: usize) -> TreeResult<()> {
        let node = self.current_node()?;
        let child = node.children
                        .get(index)
                        .copied()
                        .ok_or(TreeError::ChildOutOfRange { index,
                                                            len: node.children.len() })?;
        self.current = Some(child);
        Ok(())
    }

    /// Moves the cursor to the most recently added child.
    pub fn advance_last(&mut self) -> TreeResult<()> {
        let len = self.size()?;
        if len == 0 {
            return Err(TreeError::ChildOutOfRange { index: 0, len });
        }
        self.advance_forward(len - 1)
    }

    /// Moves the cursor to the parent of the current node.
    pub fn advance_back(&mut self) -> TreeResult<()> {
        let parent = self.current_node()?.parent.ok_or(TreeError::AtRoot)?;
        self.current = Some(parent);
        Ok(())
    }

    /// Moves the cursor to the root.
    ///
    /// Returns `false` if the cursor was already there.
    pub fn advance_root(&mut self) -> bool {
        if self.current == self.root {
            return false;
        }
        self.current = self.root;
        true
    }

    /// Returns `true` if the cursor is on the root.
    #[must_use]
    pub fn at_root(&self) -> bool {
        self.current == self.root
    }

    /// Saves the cursor position on the cache stack.
    pub fn push_cache(&mut self) {
        self.cache.push(self.current);
    }

    /// Restores the most recently saved cursor position.
    pub fn pop_cache(&mut self) -> TreeResult<()> {
        self.current = self.cache.pop().ok_or(TreeError::EmptyCache)?;
        Ok(())
    }

    /// Returns the token under the cursor.
    pub fn contents(&self) -> TreeResult<&Token> {
        Ok(&self.current_node()?.token)
    }

    /// Returns the kind of the token under the cursor.
    pub fn kind(&self) -> TreeResult<TokenKind> {
        Ok(self.contents()?.kind)
    }

    /// Returns the token of the root node.
    pub fn root_contents(&self) -> TreeResult<&Token> {
        let root = self.root.ok_or(TreeError::NoCurrent)?;
        Ok(&self.nodes[root].token)
    }

    /// Returns the token of the current node's child at `index`.
    pub fn child_contents(&self, index: usize) -> TreeResult<&Token> {
        let node = self.current_node()?;
        let child = node.children
                        .get(index)
                        .ok_or(TreeError::ChildOutOfRange { index,
                                                            len: node.children.len() })?;
        Ok(&self.nodes[*child].token)
    }

    /// Overwrites the kind and text of the current node.
    pub fn set_contents(&mut self, token: &Token) -> TreeResult<()> {
        let node = self.current_node_mut()?;
        node.token.kind = token.kind;
        node.token.text.clone_from(&token.text);
        Ok(())
    }

    /// Returns the number of children of the current node.
    pub fn size(&self) -> TreeResult<usize> {
        Ok(self.current_node()?.children.len())
    }

    /// Detaches the child at `index`, together with its whole subtree.
    pub fn remove_child(&mut self, index: usize) -> TreeResult<()> {
        let node = self.current_node_mut()?;
        if index >= node.children.len() {
            return Err(TreeError::ChildOutOfRange { index,
                                                    len: node.children.len() });
        }
        node.children.remove(index);
        Ok(())
    }

    /// Detaches every child of the current node.
    pub fn remove_children(&mut self) -> TreeResult<()> {
        self.current_node_mut()?.children.clear();
        Ok(())
    }

    /// Negates the numeric token under the cursor.
    ///
    /// Returns `Ok(false)` if the token is not an integer or float.
    pub fn negate(&mut self) -> TreeResult<bool> {
        Ok(self.current_node_mut()?.token.negate())
    }

    /// Folds node `id` into a terminal value.
    ///
    /// The node's payload is replaced by `token` and its children are
    /// detached. Detached nodes stay in the arena until the tree is dropped.
    pub fn reduce(&mut self, id: NodeId, token: Token) -> TreeResult<()> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownNode(id))?;
        node.token = token;
        node.children.clear();
        Ok(())
    }

    /// Folds the node under the cursor into a terminal value.
    pub fn reduce_current(&mut self, token: Token) -> TreeResult<()> {
        let id = self.current.ok_or(TreeError::NoCurrent)?;
        self.reduce(id, token)
    }

    fn current_node(&self) -> TreeResult<&Node> {
        let id = self.current.ok_or(TreeError::NoCurrent)?;
        self.nodes.get(id).ok_or(TreeError::UnknownNode(id))
    }

    fn current_node_mut(&mut self) -> TreeResult<&mut Node> {
        let id = self.current.ok_or(TreeError::NoCurrent)?;
        self.nodes.get_mut(id).ok_or(TreeError::UnknownNode(id))
    }
}

/// Renders the tree breadth-first, one `[KIND]: text (children)` line per
/// reachable node.
impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut queue = self.root.into_iter().collect::<VecDeque<_>>();
        while let Some(id) = queue.pop_front() {
            let node = &self.nodes[id];
            writeln!(f, "{} ({})", node.token, node.children.len())?;
            queue.extend(node.children.iter().copied());
        }
        Ok(())
    }
}
