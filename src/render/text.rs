//! Plain text rendering.

use crate::error::Result;
use crate::model::Document;

/// Convert a document to plain text.
///
/// Blocks are separated by a blank line. Images contribute their alt text.
pub fn to_text(doc: &Document) -> Result<String> {
    Ok(doc.plain_text().trim().to_string())
}
