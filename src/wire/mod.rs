//! JSON wire format for documents.
//!
//! The wire format is the editor's serialized state: a `root` object whose
//! `children` are blocks, each node tagged with `type` and `version`. Decoding
//! is strict about discriminants, versions and nesting, and lenient about
//! optional fields, which fall back to their defaults.
//!
//! # Example
//!
//! ```
//! use richpost::wire::{from_json, to_json, JsonFormat};
//!
//! let json = r#"{"root":{"type":"root","version":1,"children":[
//!     {"type":"paragraph","version":1,"children":[
//!         {"type":"text","version":1,"text":"Hello","format":0,"detail":0,"mode":"normal","style":""}
//!     ]}
//! ]}}"#;
//!
//! let doc = from_json(json)?;
//! let again = from_json(&to_json(&doc, JsonFormat::Compact)?)?;
//! assert_eq!(doc, again);
//! # Ok::<(), richpost::Error>(())
//! ```

mod decode;
mod encode;

pub use decode::from_wire;
pub use encode::to_wire;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::Document;

/// Highest node schema version this build reads and the version it writes.
pub const SCHEMA_VERSION: u32 = 1;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a document to JSON text.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let value = to_wire(doc);
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&value),
        JsonFormat::Compact => serde_json::to_string(&value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Parse a document from JSON text.
pub fn from_json(json: &str) -> Result<Document> {
    let value: Value = serde_json::from_str(json)?;
    from_wire(&value)
}

impl Document {
    /// Parse a document, falling back to an empty one if it cannot be loaded.
    pub fn from_json_or_empty(json: &str) -> Document {
        from_json(json).unwrap_or_else(|e| {
            log::warn!("content failed to load, using an empty document: {}", e);
            Document::new()
        })
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        to_wire(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        from_wire(&value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Heading, HeadingLevel, Paragraph};

    #[test]
    fn test_to_json_pretty() {
        let mut doc = Document::new();
        doc.push_block(Paragraph::with_text("Hello")).unwrap();

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"paragraph\""));
        assert!(json.contains("Hello"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let doc = Document::new();
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_from_json_or_empty() {
        assert!(Document::from_json_or_empty("garbage").is_empty());
        let doc = Document::from_json_or_empty(r#"{"root":{"type":"root","version":1,"children":[]}}"#);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_serde_impls() {
        let mut doc = Document::new();
        doc.push_block(Heading::with_text(HeadingLevel::H3, "Section"))
            .unwrap();
        let text = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&text).unwrap();
        assert_eq!(doc, back);
    }
}
