//! Rendering options and configuration.

use crate::model::Alignment;

use super::rewrite::DEFAULT_UPLOAD_PREFIX;

/// Options for rendering document content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Base URL prepended to upload paths in the post-pass (e.g., "https://cdn.example.com")
    pub asset_base_url: Option<String>,

    /// Path prefix that marks a locally uploaded image source
    pub upload_prefix: String,

    /// CSS classes applied to images
    pub image_classes: ImageClasses,

    /// Emit `crossorigin="anonymous"` on images
    pub cross_origin: bool,

    /// Maximum heading level (1-6); deeper headings are clamped
    pub max_heading_level: u8,

    /// HTML emitted for a document with no blocks
    pub empty_placeholder: Option<String>,

    /// Collect statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite upload paths to absolute URLs under `base`.
    pub fn with_asset_base_url(mut self, base: impl Into<String>) -> Self {
        self.asset_base_url = Some(base.into());
        self
    }

    /// Set the upload path prefix.
    pub fn with_upload_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.upload_prefix = prefix.into();
        self
    }

    /// Set image CSS classes.
    pub fn with_image_classes(mut self, classes: ImageClasses) -> Self {
        self.image_classes = classes;
        self
    }

    /// Enable or disable the `crossorigin` attribute on images.
    pub fn with_cross_origin(mut self, enabled: bool) -> Self {
        self.cross_origin = enabled;
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Set the HTML used for empty documents.
    pub fn with_empty_placeholder(mut self, html: impl Into<String>) -> Self {
        self.empty_placeholder = Some(html.into());
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            asset_base_url: None,
            upload_prefix: DEFAULT_UPLOAD_PREFIX.to_string(),
            image_classes: ImageClasses::default(),
            cross_origin: true,
            max_heading_level: 6,
            empty_placeholder: None,
            collect_stats: false,
        }
    }
}

/// CSS classes for rendered images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageClasses {
    /// Classes every image gets
    pub base: String,
    /// Float to the start
    pub left: String,
    /// Centered block
    pub center: String,
    /// Float to the end
    pub right: String,
}

impl ImageClasses {
    /// Full class attribute value for an alignment.
    pub fn class_for(&self, alignment: Alignment) -> String {
        let align = match alignment {
            Alignment::Left => &self.left,
            Alignment::Center => &self.center,
            Alignment::Right => &self.right,
        };
        match (self.base.is_empty(), align.is_empty()) {
            (true, _) => align.clone(),
            (false, true) => self.base.clone(),
            (false, false) => format!("{} {}", self.base, align),
        }
    }
}

impl Default for ImageClasses {
    fn default() -> Self {
        Self {
            base: "my-4 max-w-full rounded".to_string(),
            left: "float-left".to_string(),
            center: "mx-auto block".to_string(),
            right: "float-right".to_string(),
        }
    }
}
