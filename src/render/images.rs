//! Image reference extraction for upload bookkeeping.

use serde_json::Value;

use crate::model::{file_name, Document, NodeRef};

/// File names of every image the document references.
///
/// Names are the last path segment of each image source, in document order.
/// Duplicates are kept: each occurrence is a separate use of the file.
pub fn extract_image_names(doc: &Document) -> Vec<String> {
    let mut names = Vec::new();
    doc.visit(|node| {
        if let NodeRef::Image(img) = node {
            names.push(img.file_name().to_string());
        }
    });
    names
}

/// File names of images referenced by a raw wire value.
///
/// Walks any JSON shape without decoding it, so content the decoder would
/// reject still reports its images.
pub fn extract_image_names_from_wire(value: &Value) -> Vec<String> {
    fn traverse(value: &Value, names: &mut Vec<String>) {
        match value {
            Value::Object(obj) => {
                if obj.get("type").and_then(Value::as_str) == Some("image") {
                    if let Some(src) = obj.get("src").and_then(Value::as_str) {
                        names.push(file_name(src).to_string());
                    }
                }
                if let Some(root) = obj.get("root") {
                    traverse(root, names);
                }
                if let Some(children) = obj.get("children") {
                    traverse(children, names);
                }
            }
            Value::Array(items) => {
                for item in items {
                    traverse(item, names);
                }
            }
            _ => {}
        }
    }

    let mut names = Vec::new();
    traverse(value, &mut names);
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alignment, Heading, HeadingLevel, ImageNode, Node, Paragraph};
    use serde_json::json;

    #[test]
    fn test_extract_preserves_order_and_duplicates() {
        let h1 = Heading::new(
            HeadingLevel::H1,
            [
                Node::from(ImageNode::new("/upload/blog/a.png", "", Alignment::Center)),
                ImageNode::new("/upload/blog/b.png", "", Alignment::Left).into(),
            ],
        )
        .unwrap();
        let h2 = Heading::new(
            HeadingLevel::H2,
            [Node::from(ImageNode::new("a.png", "", Alignment::Right))],
        )
        .unwrap();
        let doc = Document::from_blocks([
            Node::from(h1),
            Paragraph::with_text("between").into(),
            h2.into(),
        ])
        .unwrap();

        assert_eq!(extract_image_names(&doc), vec!["a.png", "b.png", "a.png"]);
    }

    #[test]
    fn test_extract_from_empty() {
        assert!(extract_image_names(&Document::new()).is_empty());
    }

    #[test]
    fn test_extract_from_wire() {
        let value = json!({"root": {"type": "root", "children": [
            {"type": "heading", "tag": "h1", "children": [
                {"type": "image", "src": "/upload/blog/x.jpg"},
                {"type": "mystery", "children": [{"type": "image", "src": "y.gif"}]}
            ]}
        ]}});
        assert_eq!(extract_image_names_from_wire(&value), vec!["x.jpg", "y.gif"]);
    }
}
