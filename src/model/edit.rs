//! Structural editing operations.
//!
//! A document is only ever changed through these operations. Nodes are never
//! mutated in place: an edit that changes what a node looks like installs a
//! new node (with a new [`NodeKey`]) in the same slot, so anything that caches
//! per node identity sees the change.
//!
//! Incoming nodes whose keys are already attached (clones, mostly) are
//! re-keyed on the way in, so a key always names exactly one slot.

use super::{Alignment, Block, BlockType, Document, Inline, Node, NodeKey, NodeKind, Position};
use crate::error::Result;

impl Document {
    /// Append a block at the end of the document.
    pub fn push_block(&mut self, node: impl Into<Node>) -> Result<NodeKey> {
        let block = self.adopt(node.into()).into_block()?;
        let key = block.key();
        self.children.push(block);
        Ok(key)
    }

    /// Insert a block at `index`; an index past the end appends.
    pub fn insert_block(&mut self, index: usize, node: impl Into<Node>) -> Result<NodeKey> {
        let block = self.adopt(node.into()).into_block()?;
        let key = block.key();
        let index = index.min(self.children.len());
        self.children.insert(index, block);
        Ok(key)
    }

    /// Insert an inline node into the block identified by `parent`.
    ///
    /// Returns `Ok(None)` if `parent` is not a block in this document.
    pub fn insert_child(
        &mut self,
        parent: NodeKey,
        index: usize,
        node: impl Into<Node>,
    ) -> Result<Option<NodeKey>> {
        let Some(block_index) = self.children.iter().position(|b| b.key() == parent) else {
            log::debug!("insert_child: parent {} is not attached", parent);
            return Ok(None);
        };
        let node = self.adopt(node.into());
        let key = node.key();
        match &mut self.children[block_index] {
            Block::Heading(h) => {
                let inline = node.into_inline(NodeKind::Heading)?;
                let index = index.min(h.children.len());
                h.children.insert(index, inline);
            }
            Block::Paragraph(p) => {
                let text = node.into_text(NodeKind::Paragraph)?;
                let index = index.min(p.children.len());
                p.children.insert(index, text);
            }
        }
        Ok(Some(key))
    }

    /// Replace the node identified by `key` with `node`, in the same slot.
    ///
    /// Returns `Ok(false)` without touching the tree when `key` is not
    /// attached. Fails with `InvalidStructure` if the slot's parent does not
    /// accept the new node's kind.
    pub fn replace_node(&mut self, key: NodeKey, node: impl Into<Node>) -> Result<bool> {
        let Some(pos) = self.position(key) else {
            log::debug!("replace_node: {} is not attached", key);
            return Ok(false);
        };
        let node = self.adopt(node.into());
        self.replace_at(pos, node)?;
        Ok(true)
    }

    fn adopt(&self, mut node: Node) -> Node {
        let mut taken = self.attached_keys();
        node.claim_keys(&mut taken);
        node
    }

    fn replace_at(&mut self, pos: Position, node: Node) -> Result<()> {
        let block = &mut self.children[pos.block];
        match pos.child {
            None => *block = node.into_block()?,
            Some(i) => match block {
                Block::Heading(h) => h.children[i] = node.into_inline(NodeKind::Heading)?,
                Block::Paragraph(p) => p.children[i] = node.into_text(NodeKind::Paragraph)?,
            },
        }
        Ok(())
    }

    /// Detach the node identified by `key` and hand it back.
    pub fn remove_node(&mut self, key: NodeKey) -> Option<Node> {
        let pos = self.position(key)?;
        match pos.child {
            None => Some(self.children.remove(pos.block).into()),
            Some(i) => match &mut self.children[pos.block] {
                Block::Heading(h) => Some(h.children.remove(i).into()),
                Block::Paragraph(p) => Some(Node::Text(p.children.remove(i))),
            },
        }
    }

    /// Turn the block identified by `key` into another block type.
    ///
    /// The children move to a new block with a new key. Returns `Ok(false)` if
    /// the block is missing or already has the requested type.
    pub fn set_block_type(&mut self, key: NodeKey, target: BlockType) -> Result<bool> {
        let Some(index) = self.children.iter().position(|b| b.key() == key) else {
            log::debug!("set_block_type: {} is not an attached block", key);
            return Ok(false);
        };
        if self.children[index].block_type() == target {
            return Ok(false);
        }
        if let (Block::Heading(h), BlockType::Paragraph) = (&self.children[index], target) {
            if let Some(img) = h.children.iter().find(|c| matches!(c, Inline::Image(_))) {
                return Err(super::node::rejected(NodeKind::Paragraph, img.kind()));
            }
        }
        let converted = self.children.remove(index).convert(target)?;
        self.children.insert(index, converted);
        Ok(true)
    }

    /// Change the alignment of the image identified by `key`.
    ///
    /// The image is replaced by a new node with the same source and alt text
    /// at the same parent and index, and the new key is returned. Setting the
    /// current alignment, or naming an image that is no longer attached, is a
    /// no-op returning `None`.
    pub fn set_image_alignment(&mut self, key: NodeKey, alignment: Alignment) -> Option<NodeKey> {
        let Some(pos) = self.position(key) else {
            log::debug!("set_image_alignment: {} is not attached", key);
            return None;
        };
        let child = pos.child?;
        let Block::Heading(h) = &mut self.children[pos.block] else {
            return None;
        };
        let Inline::Image(img) = &h.children[child] else {
            return None;
        };
        if img.alignment() == alignment {
            return None;
        }
        let replacement = img.with_alignment(alignment);
        let new_key = replacement.key();
        h.children[child] = Inline::Image(replacement);
        Some(new_key)
    }

    /// Remove every block.
    pub fn clear(&mut self) {
        self.children.clear();
    }
}
