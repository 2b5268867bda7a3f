//! Document model types for rich content.
//!
//! A [`Document`] is a root holding ordered [`Block`]s (headings and
//! paragraphs); blocks hold inline [`TextNode`]s and [`ImageNode`]s. Nesting
//! rules are enforced when nodes are constructed or attached, and the tree is
//! only changed through the operations in `edit`.
//!
//! [`Post`] and [`Project`] are the stored entries built around that content.

mod block;
mod document;
mod edit;
mod image;
mod node;
mod post;
mod project;
mod text;

pub use block::{
    Block, BlockType, Direction, ElementAttrs, ElementFormat, Heading, HeadingLevel, Inline,
    Paragraph,
};
pub use document::{visit, walk, Document, Position, Step, WalkControl};
pub use image::{Alignment, ImageNode};
pub use node::{Node, NodeKey, NodeKind, NodeRef};
pub use post::{parse_date, Post};
pub use project::Project;
pub use text::{TextFormat, TextMode, TextNode};

pub(crate) use image::file_name;
