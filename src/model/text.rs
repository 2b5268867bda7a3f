//! Text runs and their formatting flags.

use std::collections::HashSet;

use bitflags::bitflags;

use super::NodeKey;

bitflags! {
    /// Inline formatting as stored in the `format` field of a text node.
    ///
    /// Bit values match the editor's wire encoding. Unknown bits are kept so
    /// they survive a decode/encode cycle.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextFormat: u32 {
        const BOLD = 1;
        const ITALIC = 1 << 1;
        const STRIKETHROUGH = 1 << 2;
        const UNDERLINE = 1 << 3;
        const CODE = 1 << 4;
        const SUBSCRIPT = 1 << 5;
        const SUPERSCRIPT = 1 << 6;
        const HIGHLIGHT = 1 << 7;
    }
}

/// Editing mode of a text run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextMode {
    /// Ordinary editable text
    #[default]
    Normal,
    /// Atomic token, deleted as a whole
    Token,
    /// Deleted word by word
    Segmented,
}

impl TextMode {
    /// Wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            TextMode::Normal => "normal",
            TextMode::Token => "token",
            TextMode::Segmented => "segmented",
        }
    }

    /// Parse the wire spelling; anything unrecognized is treated as normal.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "token" => TextMode::Token,
            "segmented" => TextMode::Segmented,
            "normal" => TextMode::Normal,
            other => {
                log::debug!("unknown text mode {:?}, using normal", other);
                TextMode::Normal
            }
        }
    }
}

/// A run of text with uniform formatting.
#[derive(Debug, Clone)]
pub struct TextNode {
    key: NodeKey,
    text: String,
    format: TextFormat,
    style: String,
    detail: u32,
    mode: TextMode,
}

impl TextNode {
    /// Create a text run.
    pub fn new(text: impl Into<String>, format: TextFormat, style: impl Into<String>) -> Self {
        Self {
            key: NodeKey::next(),
            text: text.into(),
            format,
            style: style.into(),
            detail: 0,
            mode: TextMode::Normal,
        }
    }

    /// Create an unformatted text run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, TextFormat::empty(), "")
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text, TextFormat::BOLD, "")
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(text, TextFormat::ITALIC, "")
    }

    /// Set the `detail` bits.
    pub fn with_detail(mut self, detail: u32) -> Self {
        self.detail = detail;
        self
    }

    /// Set the editing mode.
    pub fn with_mode(mut self, mode: TextMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub(crate) fn claim_key(&mut self, taken: &mut HashSet<NodeKey>) {
        if !taken.insert(self.key) {
            self.key = NodeKey::next();
            taken.insert(self.key);
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn format(&self) -> TextFormat {
        self.format
    }

    /// Inline CSS carried by the run (may be empty).
    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn detail(&self) -> u32 {
        self.detail
    }

    pub fn mode(&self) -> TextMode {
        self.mode
    }

    /// Check if this run has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl PartialEq for TextNode {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.format == other.format
            && self.style == other.style
            && self.detail == other.detail
            && self.mode == other.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bits_match_wire() {
        assert_eq!(TextFormat::BOLD.bits(), 1);
        assert_eq!(TextFormat::ITALIC.bits(), 2);
        assert_eq!(TextFormat::UNDERLINE.bits(), 8);
        assert_eq!((TextFormat::BOLD | TextFormat::ITALIC).bits(), 3);
    }

    #[test]
    fn test_unknown_bits_retained() {
        let format = TextFormat::from_bits_retain(1 | 1024);
        assert!(format.contains(TextFormat::BOLD));
        assert_eq!(format.bits(), 1025);
    }

    #[test]
    fn test_equality_ignores_key() {
        let a = TextNode::bold("Hi");
        let b = TextNode::bold("Hi");
        assert_ne!(a.key(), b.key());
        assert_eq!(a, b);
        assert_ne!(a, TextNode::italic("Hi"));
    }

    #[test]
    fn test_text_mode_lenient() {
        assert_eq!(TextMode::from_wire("token"), TextMode::Token);
        assert_eq!(TextMode::from_wire("whatever"), TextMode::Normal);
    }
}
