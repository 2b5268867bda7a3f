//! Visitor pattern for customizing HTML rendering.
//!
//! The visitor pattern allows users to customize how different document
//! elements are rendered without modifying the core rendering logic.
//!
//! # Example
//!
//! ```
//! use richpost::render::visitor::{DocumentVisitor, VisitorAction};
//! use richpost::model::ImageNode;
//!
//! struct LazyImages;
//!
//! impl DocumentVisitor for LazyImages {
//!     fn visit_image(&mut self, image: &ImageNode) -> VisitorAction {
//!         VisitorAction::Replace(format!("<img loading=\"lazy\" src=\"{}\">", image.src()))
//!     }
//! }
//! ```

use crate::model::{Heading, ImageNode, Paragraph, TextNode};

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the element (and its children) with custom output.
    Replace(String),

    /// Skip this element entirely (produce no output).
    Skip,
}

/// Trait for visiting document elements during rendering.
///
/// All methods return `VisitorAction::Continue` by default. Replacement
/// output is inserted verbatim, so it must already be valid HTML; upload URL
/// rewriting still applies to it.
pub trait DocumentVisitor: Send + Sync {
    /// Called before rendering a heading.
    fn visit_heading(&mut self, heading: &Heading) -> VisitorAction {
        let _ = heading;
        VisitorAction::Continue
    }

    /// Called before rendering a paragraph.
    fn visit_paragraph(&mut self, para: &Paragraph) -> VisitorAction {
        let _ = para;
        VisitorAction::Continue
    }

    /// Called before rendering a text run.
    fn visit_text(&mut self, text: &TextNode) -> VisitorAction {
        let _ = text;
        VisitorAction::Continue
    }

    /// Called before rendering an image.
    fn visit_image(&mut self, image: &ImageNode) -> VisitorAction {
        let _ = image;
        VisitorAction::Continue
    }

    /// Called once before the first block.
    fn on_document_start(&mut self) {}

    /// Called once after the last block.
    fn on_document_end(&mut self) {}
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentVisitor for DefaultVisitor {}

/// Visitor that skips all images.
#[derive(Debug, Clone, Default)]
pub struct SkipImagesVisitor;

impl DocumentVisitor for SkipImagesVisitor {
    fn visit_image(&mut self, _image: &ImageNode) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Visitor that drops paragraphs with no visible text.
#[derive(Debug, Clone, Default)]
pub struct SkipEmptyParagraphsVisitor;

impl DocumentVisitor for SkipEmptyParagraphsVisitor {
    fn visit_paragraph(&mut self, para: &Paragraph) -> VisitorAction {
        if para.plain_text().trim().is_empty() {
            VisitorAction::Skip
        } else {
            VisitorAction::Continue
        }
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn DocumentVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: DocumentVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    fn first_action(
        &mut self,
        mut f: impl FnMut(&mut dyn DocumentVisitor) -> VisitorAction,
    ) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = f(visitor.as_mut());
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentVisitor for CompositeVisitor {
    fn visit_heading(&mut self, heading: &Heading) -> VisitorAction {
        self.first_action(|v| v.visit_heading(heading))
    }

    fn visit_paragraph(&mut self, para: &Paragraph) -> VisitorAction {
        self.first_action(|v| v.visit_paragraph(para))
    }

    fn visit_text(&mut self, text: &TextNode) -> VisitorAction {
        self.first_action(|v| v.visit_text(text))
    }

    fn visit_image(&mut self, image: &ImageNode) -> VisitorAction {
        self.first_action(|v| v.visit_image(image))
    }

    fn on_document_start(&mut self) {
        for visitor in &mut self.visitors {
            visitor.on_document_start();
        }
    }

    fn on_document_end(&mut self) {
        for visitor in &mut self.visitors {
            visitor.on_document_end();
        }
    }
}
