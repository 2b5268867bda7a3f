//! Block-level nodes: headings and paragraphs.

use std::collections::HashSet;

use super::node::rejected;
use super::{ImageNode, Node, NodeKey, NodeKind, TextFormat, TextNode};
use crate::error::Result;

/// Heading level, 1 through 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const H1: HeadingLevel = HeadingLevel(1);
    pub const H2: HeadingLevel = HeadingLevel(2);
    pub const H3: HeadingLevel = HeadingLevel(3);

    /// Create a level, or `None` outside 1..=6.
    pub fn new(level: u8) -> Option<Self> {
        (1..=6).contains(&level).then_some(Self(level))
    }

    /// Create a level, clamping into 1..=6.
    pub fn clamped(level: u8) -> Self {
        Self(level.clamp(1, 6))
    }

    /// Parse an `h1`..`h6` tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let digit = tag.strip_prefix('h')?;
        digit.parse::<u8>().ok().and_then(Self::new)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// HTML tag name (`h1`..`h6`).
    pub fn tag(self) -> &'static str {
        match self.0 {
            1 => "h1",
            2 => "h2",
            3 => "h3",
            4 => "h4",
            5 => "h5",
            _ => "h6",
        }
    }
}

/// Text direction of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ltr" => Some(Direction::Ltr),
            "rtl" => Some(Direction::Rtl),
            _ => None,
        }
    }
}

/// Block text alignment, stored in the element `format` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ElementFormat {
    /// No explicit alignment (empty string on the wire)
    #[default]
    Unset,
    Left,
    Start,
    Center,
    Right,
    End,
    Justify,
}

impl ElementFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementFormat::Unset => "",
            ElementFormat::Left => "left",
            ElementFormat::Start => "start",
            ElementFormat::Center => "center",
            ElementFormat::Right => "right",
            ElementFormat::End => "end",
            ElementFormat::Justify => "justify",
        }
    }

    /// Parse the wire value; unknown values are treated as unset.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "left" => ElementFormat::Left,
            "start" => ElementFormat::Start,
            "center" => ElementFormat::Center,
            "right" => ElementFormat::Right,
            "end" => ElementFormat::End,
            "justify" => ElementFormat::Justify,
            _ => ElementFormat::Unset,
        }
    }
}

/// Attributes shared by the root and every block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ElementAttrs {
    pub direction: Option<Direction>,
    pub format: ElementFormat,
    pub indent: u32,
}

/// Inline child of a heading.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(TextNode),
    Image(ImageNode),
}

impl Inline {
    pub fn key(&self) -> NodeKey {
        match self {
            Inline::Text(t) => t.key(),
            Inline::Image(i) => i.key(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Inline::Text(_) => NodeKind::Text,
            Inline::Image(_) => NodeKind::Image,
        }
    }

    pub(crate) fn claim_keys(&mut self, taken: &mut HashSet<NodeKey>) {
        match self {
            Inline::Text(t) => t.claim_key(taken),
            Inline::Image(i) => i.claim_key(taken),
        }
    }
}

/// A heading block. Accepts text and image children.
#[derive(Debug, Clone)]
pub struct Heading {
    key: NodeKey,
    level: HeadingLevel,
    attrs: ElementAttrs,
    pub(crate) children: Vec<Inline>,
}

impl Heading {
    /// Child kinds a heading accepts.
    pub const ACCEPTS: &'static [NodeKind] = &[NodeKind::Text, NodeKind::Image];

    /// Create a heading, checking every child against [`Heading::ACCEPTS`].
    pub fn new(level: HeadingLevel, children: impl IntoIterator<Item = Node>) -> Result<Self> {
        let children = children
            .into_iter()
            .map(|child| child.into_inline(NodeKind::Heading))
            .collect::<Result<Vec<_>>>()?;
        let mut heading = Self {
            key: NodeKey::next(),
            level,
            attrs: ElementAttrs::default(),
            children,
        };
        heading.claim_keys(&mut HashSet::new());
        Ok(heading)
    }

    /// Create a heading holding one plain text run.
    pub fn with_text(level: HeadingLevel, text: impl Into<String>) -> Self {
        Self {
            key: NodeKey::next(),
            level,
            attrs: ElementAttrs::default(),
            children: vec![Inline::Text(TextNode::plain(text))],
        }
    }

    pub(crate) fn from_parts(level: HeadingLevel, attrs: ElementAttrs, children: Vec<Inline>) -> Self {
        Self {
            key: NodeKey::next(),
            level,
            attrs,
            children,
        }
    }

    /// Set block attributes.
    pub fn with_attrs(mut self, attrs: ElementAttrs) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// Re-key every node of this subtree whose key is already in `taken`.
    pub(crate) fn claim_keys(&mut self, taken: &mut HashSet<NodeKey>) {
        if !taken.insert(self.key) {
            self.key = NodeKey::next();
            taken.insert(self.key);
        }
        for child in &mut self.children {
            child.claim_keys(taken);
        }
    }

    pub fn level(&self) -> HeadingLevel {
        self.level
    }

    pub fn attrs(&self) -> ElementAttrs {
        self.attrs
    }

    pub fn children(&self) -> &[Inline] {
        &self.children
    }

    /// Concatenated text, images contributing their alt text.
    pub fn plain_text(&self) -> String {
        self.children
            .iter()
            .map(|c| match c {
                Inline::Text(t) => t.text(),
                Inline::Image(i) => i.alt_text(),
            })
            .collect()
    }
}

impl PartialEq for Heading {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level && self.attrs == other.attrs && self.children == other.children
    }
}

/// A paragraph block. Accepts text children only.
#[derive(Debug, Clone)]
pub struct Paragraph {
    key: NodeKey,
    attrs: ElementAttrs,
    text_format: TextFormat,
    text_style: String,
    pub(crate) children: Vec<TextNode>,
}

impl Paragraph {
    /// Child kinds a paragraph accepts.
    pub const ACCEPTS: &'static [NodeKind] = &[NodeKind::Text];

    /// Create a paragraph, rejecting anything that is not a text run.
    pub fn new(children: impl IntoIterator<Item = Node>) -> Result<Self> {
        let children = children
            .into_iter()
            .map(|child| child.into_text(NodeKind::Paragraph))
            .collect::<Result<Vec<_>>>()?;
        let mut paragraph = Self::from_parts(
            ElementAttrs::default(),
            TextFormat::empty(),
            String::new(),
            children,
        );
        paragraph.claim_keys(&mut HashSet::new());
        Ok(paragraph)
    }

    /// Create an empty paragraph.
    pub fn empty() -> Self {
        Self::from_parts(
            ElementAttrs::default(),
            TextFormat::empty(),
            String::new(),
            Vec::new(),
        )
    }

    /// Create a paragraph holding one plain text run.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::from_parts(
            ElementAttrs::default(),
            TextFormat::empty(),
            String::new(),
            vec![TextNode::plain(text)],
        )
    }

    pub(crate) fn from_parts(
        attrs: ElementAttrs,
        text_format: TextFormat,
        text_style: String,
        children: Vec<TextNode>,
    ) -> Self {
        Self {
            key: NodeKey::next(),
            attrs,
            text_format,
            text_style,
            children,
        }
    }

    /// Set block attributes.
    pub fn with_attrs(mut self, attrs: ElementAttrs) -> Self {
        self.attrs = attrs;
        self
    }

    /// Set the format applied to text typed into an empty paragraph.
    pub fn with_text_format(mut self, format: TextFormat, style: impl Into<String>) -> Self {
        self.text_format = format;
        self.text_style = style.into();
        self
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub(crate) fn claim_keys(&mut self, taken: &mut HashSet<NodeKey>) {
        if !taken.insert(self.key) {
            self.key = NodeKey::next();
            taken.insert(self.key);
        }
        for child in &mut self.children {
            child.claim_key(taken);
        }
    }

    pub fn attrs(&self) -> ElementAttrs {
        self.attrs
    }

    pub fn text_format(&self) -> TextFormat {
        self.text_format
    }

    pub fn text_style(&self) -> &str {
        &self.text_style
    }

    pub fn children(&self) -> &[TextNode] {
        &self.children
    }

    pub fn plain_text(&self) -> String {
        self.children.iter().map(TextNode::text).collect()
    }

    /// Check if the paragraph has no text at all.
    pub fn is_empty(&self) -> bool {
        self.children.iter().all(TextNode::is_empty)
    }
}

impl PartialEq for Paragraph {
    fn eq(&self, other: &Self) -> bool {
        self.attrs == other.attrs
            && self.text_format == other.text_format
            && self.text_style == other.text_style
            && self.children == other.children
    }
}

/// A top-level block.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
}

impl Block {
    pub fn key(&self) -> NodeKey {
        match self {
            Block::Heading(h) => h.key(),
            Block::Paragraph(p) => p.key(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Block::Heading(_) => NodeKind::Heading,
            Block::Paragraph(_) => NodeKind::Paragraph,
        }
    }

    pub(crate) fn claim_keys(&mut self, taken: &mut HashSet<NodeKey>) {
        match self {
            Block::Heading(h) => h.claim_keys(taken),
            Block::Paragraph(p) => p.claim_keys(taken),
        }
    }

    pub fn attrs(&self) -> ElementAttrs {
        match self {
            Block::Heading(h) => h.attrs(),
            Block::Paragraph(p) => p.attrs(),
        }
    }

    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading(h) => h.plain_text(),
            Block::Paragraph(p) => p.plain_text(),
        }
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        match self {
            Block::Heading(h) => h.children.len(),
            Block::Paragraph(p) => p.children.len(),
        }
    }

    /// Rebuild this block as another block type, keeping children and attributes.
    ///
    /// The new block gets a new key. A heading holding images cannot become a
    /// paragraph.
    pub(crate) fn convert(self, target: BlockType) -> Result<Block> {
        match (self, target) {
            (Block::Heading(h), BlockType::Heading(level)) => {
                Ok(Block::Heading(Heading::from_parts(level, h.attrs, h.children)))
            }
            (Block::Paragraph(p), BlockType::Heading(level)) => {
                let children = p.children.into_iter().map(Inline::Text).collect();
                Ok(Block::Heading(Heading::from_parts(level, p.attrs, children)))
            }
            (Block::Heading(h), BlockType::Paragraph) => {
                let children = h
                    .children
                    .into_iter()
                    .map(|c| match c {
                        Inline::Text(t) => Ok(t),
                        Inline::Image(_) => Err(rejected(NodeKind::Paragraph, NodeKind::Image)),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Block::Paragraph(Paragraph::from_parts(
                    h.attrs,
                    TextFormat::empty(),
                    String::new(),
                    children,
                )))
            }
            (Block::Paragraph(p), BlockType::Paragraph) => Ok(Block::Paragraph(
                Paragraph::from_parts(p.attrs, p.text_format, p.text_style, p.children),
            )),
        }
    }

    /// Current block type.
    pub fn block_type(&self) -> BlockType {
        match self {
            Block::Heading(h) => BlockType::Heading(h.level()),
            Block::Paragraph(_) => BlockType::Paragraph,
        }
    }
}

impl From<Heading> for Block {
    fn from(h: Heading) -> Self {
        Block::Heading(h)
    }
}

impl From<Paragraph> for Block {
    fn from(p: Paragraph) -> Self {
        Block::Paragraph(p)
    }
}

/// Target of a "set block type" edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Paragraph,
    Heading(HeadingLevel),
}
