//! The document tree and its traversal primitive.

use std::collections::HashSet;

use super::{Block, ElementAttrs, Node, NodeKey, NodeRef};
use crate::error::Result;

/// A rich-text document: an ordered list of blocks under a root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    attrs: ElementAttrs,
    pub(crate) children: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from blocks, rejecting non-block nodes.
    pub fn from_blocks(blocks: impl IntoIterator<Item = Node>) -> Result<Self> {
        let mut children = blocks
            .into_iter()
            .map(Node::into_block)
            .collect::<Result<Vec<_>>>()?;
        let mut taken = HashSet::new();
        for block in &mut children {
            block.claim_keys(&mut taken);
        }
        Ok(Self {
            attrs: ElementAttrs::default(),
            children,
        })
    }

    pub(crate) fn from_parts(attrs: ElementAttrs, children: Vec<Block>) -> Self {
        Self { attrs, children }
    }

    /// Root attributes.
    pub fn attrs(&self) -> ElementAttrs {
        self.attrs
    }

    /// Set root attributes.
    pub fn with_attrs(mut self, attrs: ElementAttrs) -> Self {
        self.attrs = attrs;
        self
    }

    /// Top-level blocks in reading order.
    pub fn blocks(&self) -> &[Block] {
        &self.children
    }

    /// Number of top-level blocks.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Walk every node depth-first, parents before children.
    ///
    /// The root is visited first. Order is document order and the walk keeps
    /// no state between calls.
    pub fn visit<'a, F>(&'a self, callback: F)
    where
        F: FnMut(NodeRef<'a>),
    {
        visit(NodeRef::Root(self), callback);
    }

    /// Walk every node with enter and leave events.
    pub fn walk<'a, F>(&'a self, callback: &mut F)
    where
        F: FnMut(Step<'a>) -> WalkControl,
    {
        walk(NodeRef::Root(self), callback);
    }

    /// Find a node by key.
    pub fn find(&self, key: NodeKey) -> Option<NodeRef<'_>> {
        let pos = self.position(key)?;
        let block = &self.children[pos.block];
        match pos.child {
            None => Some(NodeRef::from(block)),
            Some(i) => match block {
                Block::Heading(h) => h.children.get(i).map(NodeRef::from),
                Block::Paragraph(p) => p.children.get(i).map(NodeRef::Text),
            },
        }
    }

    /// Check if a node with this key is attached to the tree.
    pub fn contains(&self, key: NodeKey) -> bool {
        self.position(key).is_some()
    }

    /// Keys of every attached node.
    pub(crate) fn attached_keys(&self) -> HashSet<NodeKey> {
        let mut keys = HashSet::new();
        self.visit(|n| {
            if let Some(key) = n.key() {
                keys.insert(key);
            }
        });
        keys
    }

    /// Locate a node by key.
    pub fn position(&self, key: NodeKey) -> Option<Position> {
        for (block_index, block) in self.children.iter().enumerate() {
            if block.key() == key {
                return Some(Position {
                    block: block_index,
                    child: None,
                });
            }
            let child = match block {
                Block::Heading(h) => h.children.iter().position(|c| c.key() == key),
                Block::Paragraph(p) => p.children.iter().position(|c| c.key() == key),
            };
            if child.is_some() {
                return Some(Position {
                    block: block_index,
                    child,
                });
            }
        }
        None
    }

    /// Plain text of the document, blocks separated by blank lines.
    pub fn plain_text(&self) -> String {
        self.children
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Number of image nodes in the document.
    pub fn image_count(&self) -> usize {
        let mut count = 0;
        self.visit(|node| {
            if matches!(node, NodeRef::Image(_)) {
                count += 1;
            }
        });
        count
    }
}

/// Location of a node: the block index and, for inline nodes, the child index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub block: usize,
    pub child: Option<usize>,
}

/// Event produced by [`walk`].
#[derive(Debug, Clone, Copy)]
pub enum Step<'a> {
    /// Entering a node; its children follow.
    Enter(NodeRef<'a>),
    /// All children of the node have been walked.
    Leave(NodeRef<'a>),
}

/// Returned by a [`walk`] callback on enter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WalkControl {
    #[default]
    Continue,
    /// Do not descend into this node; no leave event is emitted for it.
    SkipChildren,
}

/// Depth-first, parent-before-children walk starting at `node`.
pub fn visit<'a, F>(node: NodeRef<'a>, mut callback: F)
where
    F: FnMut(NodeRef<'a>),
{
    walk(node, &mut |step| {
        if let Step::Enter(node) = step {
            callback(node);
        }
        WalkControl::Continue
    });
}

/// Depth-first walk with enter and leave events.
pub fn walk<'a, F>(node: NodeRef<'a>, callback: &mut F)
where
    F: FnMut(Step<'a>) -> WalkControl,
{
    if callback(Step::Enter(node)) == WalkControl::SkipChildren {
        return;
    }
    match node {
        NodeRef::Root(doc) => {
            for block in &doc.children {
                walk(NodeRef::from(block), callback);
            }
        }
        NodeRef::Heading(h) => {
            for child in &h.children {
                walk(NodeRef::from(child), callback);
            }
        }
        NodeRef::Paragraph(p) => {
            for child in &p.children {
                walk(NodeRef::Text(child), callback);
            }
        }
        NodeRef::Text(_) | NodeRef::Image(_) => {}
    }
    callback(Step::Leave(node));
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}
