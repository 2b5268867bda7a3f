//! Image nodes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::NodeKey;

/// Horizontal placement of an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Float to the start of the line
    Left,
    /// Centered block (default)
    #[default]
    Center,
    /// Float to the end of the line
    Right,
}

impl Alignment {
    /// Wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }

    /// Parse a wire value strictly.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            _ => None,
        }
    }

    /// Parse an optional wire value; missing or unrecognized values are center.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            None => Alignment::Center,
            Some(s) => Self::parse(s).unwrap_or_else(|| {
                log::debug!("unrecognized image alignment {:?}, using center", s);
                Alignment::Center
            }),
        }
    }
}

/// An image reference.
#[derive(Debug, Clone)]
pub struct ImageNode {
    key: NodeKey,
    src: String,
    alt_text: String,
    alignment: Alignment,
}

impl ImageNode {
    /// Create an image node.
    pub fn new(src: impl Into<String>, alt_text: impl Into<String>, alignment: Alignment) -> Self {
        Self {
            key: NodeKey::next(),
            src: src.into(),
            alt_text: alt_text.into(),
            alignment,
        }
    }

    /// Build the replacement node for an alignment change.
    ///
    /// The result always has a new key, even though only the alignment differs.
    pub fn with_alignment(&self, alignment: Alignment) -> Self {
        Self::new(self.src.clone(), self.alt_text.clone(), alignment)
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

    /// Source path or URL.
    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn alt_text(&self) -> &str {
        &self.alt_text
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Last path segment of the source.
    pub fn file_name(&self) -> &str {
        file_name(&self.src)
    }
}

impl PartialEq for ImageNode {
    fn eq(&self, other: &Self) -> bool {
        self.src == other.src && self.alt_text == other.alt_text && self.alignment == other.alignment
    }
}

/// Last `/`-separated segment of an image source.
pub(crate) fn file_name(src: &str) -> &str {
    src.rsplit('/').next().unwrap_or(src)
}
