//! # richpost
//!
//! Rich-text document model, JSON wire codec and HTML renderer for blog and
//! portfolio content.
//!
//! Documents are trees of headings and paragraphs holding text runs and
//! images. They are stored as the editor's JSON state, optionally wrapped in a
//! post envelope, and rendered to HTML for display.
//!
//! ## Quick Start
//!
//! ```
//! use richpost::{parse_str, render};
//!
//! let json = r#"{"root":{"type":"root","children":[{"type":"heading","tag":"h1",
//!     "children":[{"type":"text","text":"Hi","format":0}]}]}}"#;
//!
//! let doc = parse_str(json)?;
//! assert_eq!(render::render(&doc), "<h1>Hi</h1>");
//! # Ok::<(), richpost::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Typed tree**: nesting rules are checked on every insert and decode
//! - **Stable identity**: every node carries a [`NodeKey`]; replacing a node issues a new one
//! - **Lossless wire format**: editor attributes round-trip unchanged
//! - **HTML rendering**: visitor hooks, upload URL rewriting, image bookkeeping
//! - **Drafts and retention**: local draft files and upload directory cleanup

pub mod detect;
pub mod error;
pub mod model;
pub mod render;
pub mod retention;
pub mod session;
pub mod store;
pub mod wire;

// Re-export commonly used types
pub use detect::{detect_payload, document_from_payload, post_from_payload, PayloadKind};
pub use error::{Error, Result};
pub use model::{
    Alignment, Block, BlockType, Direction, Document, ElementAttrs, ElementFormat, Heading,
    HeadingLevel, ImageNode, Inline, Node, NodeKey, NodeKind, NodeRef, Paragraph, Post, Project,
    TextFormat, TextMode, TextNode,
};
pub use render::{ImageClasses, RenderOptions, RenderResult};
pub use retention::{RetentionOptions, RetentionPlan, RetentionReport};
pub use session::{EditSession, PostMeta, PublishPayload};
pub use store::DraftStore;
pub use wire::{JsonFormat, SCHEMA_VERSION};

use std::fs;
use std::path::Path;

use serde_json::Value;

/// Parse a document from JSON text in any stored payload shape.
///
/// Accepts a bare editor state, a post envelope or a wrapped model.
///
/// # Example
///
/// ```
/// use richpost::parse_str;
///
/// let doc = parse_str(r#"{"content":{"root":{"type":"root","children":[]}}}"#).unwrap();
/// assert!(doc.is_empty());
/// ```
pub fn parse_str(json: &str) -> Result<Document> {
    let value: Value = serde_json::from_str(json)?;
    document_from_payload(&value)
}

/// Parse a post from JSON text in any stored payload shape.
pub fn parse_post_str(json: &str) -> Result<Post> {
    let value: Value = serde_json::from_str(json)?;
    post_from_payload(&value)
}

/// Load a document from a JSON file.
///
/// # Example
///
/// ```no_run
/// use richpost::load_file;
///
/// let doc = load_file("post.json").unwrap();
/// println!("Blocks: {}", doc.len());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let json = fs::read_to_string(path)?;
    parse_str(&json)
}

/// Load a post from a JSON file.
pub fn load_post_file<P: AsRef<Path>>(path: P) -> Result<Post> {
    let json = fs::read_to_string(path)?;
    parse_post_str(&json)
}

/// Render a JSON file to HTML with default options.
///
/// # Example
///
/// ```no_run
/// use richpost::render_file;
///
/// let html = render_file("post.json").unwrap();
/// std::fs::write("post.html", html).unwrap();
/// ```
pub fn render_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = load_file(path)?;
    render::to_html(&doc, &RenderOptions::default())
}

/// Render a JSON file to HTML with custom options.
pub fn render_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<String> {
    let doc = load_file(path)?;
    render::to_html(&doc, options)
}

/// Extract plain text from a JSON file.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = load_file(path)?;
    render::to_text(&doc)
}

/// Builder for loading and rendering stored documents.
///
/// # Example
///
/// ```no_run
/// use richpost::Richpost;
///
/// let html = Richpost::new()
///     .with_base_url("https://api.example.com")
///     .with_empty_placeholder("<p>No content available.</p>")
///     .lenient()
///     .load("post.json")?
///     .to_html()?;
/// # Ok::<(), richpost::Error>(())
/// ```
pub struct Richpost {
    render_options: RenderOptions,
    lenient: bool,
}

impl Richpost {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            render_options: RenderOptions::default(),
            lenient: false,
        }
    }

    /// Substitute an empty post when the content cannot be decoded.
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    /// Rewrite upload paths to absolute URLs under `base`.
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_asset_base_url(base);
        self
    }

    /// Enable or disable `crossorigin` on images.
    pub fn with_cross_origin(mut self, enabled: bool) -> Self {
        self.render_options = self.render_options.with_cross_origin(enabled);
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.render_options = self.render_options.with_max_heading(level);
        self
    }

    /// Set the HTML used when the document is empty.
    pub fn with_empty_placeholder(mut self, html: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_empty_placeholder(html);
        self
    }

    /// Set image CSS classes.
    pub fn with_image_classes(mut self, classes: ImageClasses) -> Self {
        self.render_options = self.render_options.with_image_classes(classes);
        self
    }

    /// Parse JSON text and return a result wrapper.
    pub fn parse_str(self, json: &str) -> Result<RichpostResult> {
        let post = match parse_post_str(json) {
            Ok(post) => post,
            Err(e) if self.lenient && e.is_decode_error() => {
                log::warn!("content failed to load, using an empty document: {}", e);
                Post::default()
            }
            Err(e) => return Err(e),
        };
        Ok(RichpostResult {
            post,
            render_options: self.render_options,
        })
    }

    /// Load a JSON file and return a result wrapper.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<RichpostResult> {
        let json = fs::read_to_string(path)?;
        self.parse_str(&json)
    }
}

impl Default for Richpost {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of loading a stored post.
pub struct RichpostResult {
    /// The loaded post; bare documents get empty metadata
    pub post: Post,
    /// Render options to use
    render_options: RenderOptions,
}

impl RichpostResult {
    /// Convert to HTML.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.post.content, &self.render_options)
    }

    /// Convert to HTML with image references and statistics.
    pub fn to_html_with_stats(&self) -> Result<RenderResult> {
        render::to_html_with_stats(&self.post.content, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.post.content)
    }

    /// Convert to normalized wire JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        wire::to_json(&self.post.content, format)
    }

    /// Build the publish body.
    pub fn publish_payload(&self) -> Result<PublishPayload> {
        self.post.publish_payload(&self.render_options)
    }

    /// File names of referenced images, in document order.
    pub fn image_names(&self) -> Vec<String> {
        render::extract_image_names(&self.post.content)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.post.content
    }
}
