//! Rendering module for converting documents to HTML and plain text.

mod html;
mod images;
mod options;
mod result;
mod rewrite;
mod text;
pub mod visitor;

pub use html::{render, to_html, to_html_with_stats, HtmlRenderer};
pub use images::{extract_image_names, extract_image_names_from_wire};
pub use options::{ImageClasses, RenderOptions};
pub use result::{RenderResult, RenderStats};
pub use rewrite::{rewrite_upload_urls, DEFAULT_UPLOAD_PREFIX};
pub use text::to_text;
pub use visitor::{
    CompositeVisitor, DefaultVisitor, DocumentVisitor, SkipEmptyParagraphsVisitor,
    SkipImagesVisitor, VisitorAction,
};
