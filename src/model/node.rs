//! Node identity, kinds and the type-erased node handles.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{Block, Document, Heading, ImageNode, Inline, Paragraph, TextNode};
use crate::error::{Error, Result};

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Identity of one node instance.
///
/// Keys are allocated from a process-wide generation counter and never reused.
/// They are not serialized and do not take part in structural equality; a
/// consumer that memoizes per node treats a new key at a known position as
/// "this subtree changed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(u64);

impl NodeKey {
    /// Allocate a fresh key.
    pub fn next() -> Self {
        Self(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of a node, used for nesting rules and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Document root
    Root,
    /// Heading block
    Heading,
    /// Paragraph block
    Paragraph,
    /// Text run
    Text,
    /// Image
    Image,
}

impl NodeKind {
    /// Wire discriminant for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Heading => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Text => "text",
            NodeKind::Image => "image",
        }
    }

    /// Child kinds this kind accepts.
    pub fn accepted_children(self) -> &'static [NodeKind] {
        match self {
            NodeKind::Root => &[NodeKind::Heading, NodeKind::Paragraph],
            NodeKind::Heading => &[NodeKind::Text, NodeKind::Image],
            NodeKind::Paragraph => &[NodeKind::Text],
            NodeKind::Text | NodeKind::Image => &[],
        }
    }

    /// Check whether `child` may be attached under this kind.
    pub fn accepts(self, child: NodeKind) -> bool {
        self.accepted_children().contains(&child)
    }

    /// Check if this is a block kind (allowed directly under the root).
    pub fn is_block(self) -> bool {
        matches!(self, NodeKind::Heading | NodeKind::Paragraph)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An owned node of any kind.
///
/// This is the currency of the structural editing operations: callers hand
/// over a `Node` and the receiving parent checks that it accepts the kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Heading block
    Heading(Heading),
    /// Paragraph block
    Paragraph(Paragraph),
    /// Text run
    Text(TextNode),
    /// Image
    Image(ImageNode),
}

impl Node {
    /// Kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Heading(_) => NodeKind::Heading,
            Node::Paragraph(_) => NodeKind::Paragraph,
            Node::Text(_) => NodeKind::Text,
            Node::Image(_) => NodeKind::Image,
        }
    }

    /// Identity of this node.
    pub fn key(&self) -> NodeKey {
        match self {
            Node::Heading(h) => h.key(),
            Node::Paragraph(p) => p.key(),
            Node::Text(t) => t.key(),
            Node::Image(i) => i.key(),
        }
    }

    /// Re-key every node of this subtree whose key is already in `taken`.
    ///
    /// A clone carries its original's keys; attaching it next to the
    /// original must not put one identity in two slots.
    pub(crate) fn claim_keys(&mut self, taken: &mut HashSet<NodeKey>) {
        match self {
            Node::Heading(h) => h.claim_keys(taken),
            Node::Paragraph(p) => p.claim_keys(taken),
            Node::Text(t) => t.claim_key(taken),
            Node::Image(i) => i.claim_key(taken),
        }
    }

    pub(crate) fn into_block(self) -> Result<Block> {
        match self {
            Node::Heading(h) => Ok(Block::Heading(h)),
            Node::Paragraph(p) => Ok(Block::Paragraph(p)),
            other => Err(rejected(NodeKind::Root, other.kind())),
        }
    }

    pub(crate) fn into_inline(self, parent: NodeKind) -> Result<Inline> {
        let kind = self.kind();
        if !parent.accepts(kind) {
            return Err(rejected(parent, kind));
        }
        match self {
            Node::Text(t) => Ok(Inline::Text(t)),
            Node::Image(i) => Ok(Inline::Image(i)),
            _ => Err(rejected(parent, kind)),
        }
    }

    pub(crate) fn into_text(self, parent: NodeKind) -> Result<TextNode> {
        match self {
            Node::Text(t) if parent.accepts(NodeKind::Text) => Ok(t),
            other => Err(rejected(parent, other.kind())),
        }
    }
}

pub(crate) fn rejected(parent: NodeKind, child: NodeKind) -> Error {
    Error::InvalidStructure { parent, child }
}

impl From<Heading> for Node {
    fn from(h: Heading) -> Self {
        Node::Heading(h)
    }
}

impl From<Paragraph> for Node {
    fn from(p: Paragraph) -> Self {
        Node::Paragraph(p)
    }
}

impl From<TextNode> for Node {
    fn from(t: TextNode) -> Self {
        Node::Text(t)
    }
}

impl From<ImageNode> for Node {
    fn from(i: ImageNode) -> Self {
        Node::Image(i)
    }
}

impl From<Block> for Node {
    fn from(b: Block) -> Self {
        match b {
            Block::Heading(h) => Node::Heading(h),
            Block::Paragraph(p) => Node::Paragraph(p),
        }
    }
}

impl From<Inline> for Node {
    fn from(i: Inline) -> Self {
        match i {
            Inline::Text(t) => Node::Text(t),
            Inline::Image(img) => Node::Image(img),
        }
    }
}

/// A borrowed view of any node in a document, including the root.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    /// Document root
    Root(&'a Document),
    /// Heading block
    Heading(&'a Heading),
    /// Paragraph block
    Paragraph(&'a Paragraph),
    /// Text run
    Text(&'a TextNode),
    /// Image
    Image(&'a ImageNode),
}

impl<'a> NodeRef<'a> {
    /// Kind of the referenced node.
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Root(_) => NodeKind::Root,
            NodeRef::Heading(_) => NodeKind::Heading,
            NodeRef::Paragraph(_) => NodeKind::Paragraph,
            NodeRef::Text(_) => NodeKind::Text,
            NodeRef::Image(_) => NodeKind::Image,
        }
    }

    /// Identity of the referenced node. The root has none.
    pub fn key(&self) -> Option<NodeKey> {
        match self {
            NodeRef::Root(_) => None,
            NodeRef::Heading(h) => Some(h.key()),
            NodeRef::Paragraph(p) => Some(p.key()),
            NodeRef::Text(t) => Some(t.key()),
            NodeRef::Image(i) => Some(i.key()),
        }
    }
}

impl<'a> From<&'a Block> for NodeRef<'a> {
    fn from(block: &'a Block) -> Self {
        match block {
            Block::Heading(h) => NodeRef::Heading(h),
            Block::Paragraph(p) => NodeRef::Paragraph(p),
        }
    }
}

impl<'a> From<&'a Inline> for NodeRef<'a> {
    fn from(inline: &'a Inline) -> Self {
        match inline {
            Inline::Text(t) => NodeRef::Text(t),
            Inline::Image(i) => NodeRef::Image(i),
        }
    }
}

impl<'a> From<&'a Node> for NodeRef<'a> {
    fn from(node: &'a Node) -> Self {
        match node {
            Node::Heading(h) => NodeRef::Heading(h),
            Node::Paragraph(p) => NodeRef::Paragraph(p),
            Node::Text(t) => NodeRef::Text(t),
            Node::Image(i) => NodeRef::Image(i),
        }
    }
}
