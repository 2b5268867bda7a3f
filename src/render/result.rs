//! Rendering result with image references and statistics.

use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered HTML
    pub html: String,

    /// File names of referenced images, in document order
    pub image_names: Vec<String>,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(html: String, image_names: Vec<String>, stats: RenderStats) -> Self {
        Self {
            html,
            image_names,
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.html.len()
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of headings rendered
    pub heading_count: u32,

    /// Number of paragraphs rendered
    pub paragraph_count: u32,

    /// Number of text runs rendered
    pub text_run_count: u32,

    /// Number of images rendered
    pub image_count: u32,

    /// Number of nodes a visitor skipped or replaced
    pub customized_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    pub fn add_text_run(&mut self) {
        self.text_run_count += 1;
    }

    pub fn add_image(&mut self) {
        self.image_count += 1;
    }

    pub fn add_customized(&mut self) {
        self.customized_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}
