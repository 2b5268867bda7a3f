//! Error types for richpost library.

use std::io;
use thiserror::Error;

use crate::model::NodeKind;

/// Result type alias for richpost operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building, decoding or rendering documents.
#[derive(Error, Debug)]
pub enum Error {
    /// A node was attached to a parent that does not accept its kind.
    #[error("Invalid structure: {parent} cannot contain {child}")]
    InvalidStructure {
        /// Kind of the receiving parent
        parent: NodeKind,
        /// Kind of the rejected child
        child: NodeKind,
    },

    /// The `type` discriminant of a serialized node is not recognized.
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    /// The serialized node was written by a newer schema revision.
    #[error("Unsupported schema version {found} (highest supported is {supported})")]
    SchemaVersionMismatch {
        /// Version found on the wire
        found: u32,
        /// Highest version this build understands
        supported: u32,
    },

    /// A required field is absent from a serialized node.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field is present but its value cannot be used.
    #[error("Invalid value for {field}: {reason}")]
    InvalidField {
        /// Field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The payload is not a recognized document shape.
    #[error("Unknown payload format: not a document, post envelope or model wrapper")]
    UnknownFormat,

    /// Draft identifier contains characters that are not allowed in a file name.
    #[error("Invalid draft id: {0:?}")]
    InvalidId(String),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Malformed JSON text or a value that does not match a wire struct.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Check if this error came from decoding a serialized document.
    ///
    /// Callers use this to decide between showing a "content failed to load"
    /// placeholder and surfacing the error.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidStructure { .. }
                | Error::UnknownNodeType(_)
                | Error::SchemaVersionMismatch { .. }
                | Error::MissingField(_)
                | Error::InvalidField { .. }
                | Error::UnknownFormat
                | Error::Json(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidStructure {
            parent: NodeKind::Paragraph,
            child: NodeKind::Heading,
        };
        assert_eq!(
            err.to_string(),
            "Invalid structure: paragraph cannot contain heading"
        );

        let err = Error::SchemaVersionMismatch {
            found: 3,
            supported: 1,
        };
        assert_eq!(
            err.to_string(),
            "Unsupported schema version 3 (highest supported is 1)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_decode_error());
    }

    #[test]
    fn test_decode_errors() {
        assert!(Error::UnknownNodeType("quote".into()).is_decode_error());
        assert!(Error::MissingField("type").is_decode_error());
        assert!(!Error::Render("x".into()).is_decode_error());
    }
}
