//! Integration tests for the JSON wire format.

use richpost::model::NodeRef;
use richpost::wire::{from_json, from_wire, to_json, to_wire};
use richpost::{
    Alignment, Direction, Document, ElementAttrs, ElementFormat, Error, Heading, HeadingLevel,
    ImageNode, JsonFormat, Node, NodeKind, Paragraph, TextFormat, TextMode, TextNode,
    SCHEMA_VERSION,
};
use serde_json::json;

fn rich_document() -> Document {
    let heading = Heading::new(
        HeadingLevel::H2,
        [
            Node::from(TextNode::new("Bold ", TextFormat::BOLD, "")),
            ImageNode::new("/upload/blog/1700-cat.png", "cat", Alignment::Right).into(),
        ],
    )
    .unwrap()
    .with_attrs(ElementAttrs {
        direction: Some(Direction::Ltr),
        format: ElementFormat::Center,
        indent: 0,
    });

    let para = Paragraph::new([
        Node::from(TextNode::plain("plain ")),
        TextNode::new(
            "fancy",
            TextFormat::ITALIC | TextFormat::HIGHLIGHT,
            "color: #333",
        )
        .with_mode(TextMode::Token)
        .with_detail(1)
        .into(),
    ])
    .unwrap()
    .with_attrs(ElementAttrs {
        direction: Some(Direction::Rtl),
        format: ElementFormat::Justify,
        indent: 2,
    })
    .with_text_format(TextFormat::BOLD, "font-size: 12px");

    Document::from_blocks([Node::from(heading), para.into(), Paragraph::empty().into()]).unwrap()
}

fn first_image(doc: &Document) -> ImageNode {
    let mut found = None;
    doc.visit(|node| {
        if let NodeRef::Image(img) = node {
            if found.is_none() {
                found = Some(img.clone());
            }
        }
    });
    found.expect("document has an image")
}

#[test]
fn test_round_trip() {
    let doc = rich_document();
    let json = to_json(&doc, JsonFormat::Pretty).unwrap();
    let decoded = from_json(&json).unwrap();
    assert_eq!(decoded, doc);
}

#[test]
fn test_serialization_is_idempotent() {
    let doc = rich_document();
    let once = to_json(&doc, JsonFormat::Compact).unwrap();
    let twice = to_json(&from_json(&once).unwrap(), JsonFormat::Compact).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_every_node_carries_version() {
    let value = to_wire(&rich_document());
    let root = &value["root"];
    assert_eq!(root["version"], SCHEMA_VERSION);
    for block in root["children"].as_array().unwrap() {
        assert_eq!(block["version"], SCHEMA_VERSION);
        for child in block["children"].as_array().unwrap() {
            assert_eq!(child["version"], SCHEMA_VERSION);
        }
    }
}

#[test]
fn test_missing_alignment_defaults_to_center() {
    let value = json!({"root": {"type": "root", "children": [
        {"type": "heading", "tag": "h1", "children": [
            {"type": "image", "src": "/upload/blog/a.png"}
        ]}
    ]}});
    let doc = from_wire(&value).unwrap();
    let image = first_image(&doc);

    assert_eq!(image.alignment(), Alignment::Center);
    assert_eq!(image.alt_text(), "");
}

#[test]
fn test_unknown_alignment_defaults_to_center() {
    let value = json!({"root": {"type": "root", "children": [
        {"type": "heading", "tag": "h1", "children": [
            {"type": "image", "src": "a.png", "alignment": "diagonal"}
        ]}
    ]}});
    let image = first_image(&from_wire(&value).unwrap());
    assert_eq!(image.alignment(), Alignment::Center);
}

#[test]
fn test_unknown_node_type() {
    let value = json!({"root": {"type": "root", "children": [
        {"type": "paragraph", "children": [{"type": "linebreak"}]}
    ]}});
    assert!(matches!(
        from_wire(&value),
        Err(Error::UnknownNodeType(ty)) if ty == "linebreak"
    ));
}

#[test]
fn test_newer_schema_rejected() {
    let value = json!({"root": {"type": "root", "version": 1, "children": [
        {"type": "paragraph", "version": 2, "children": []}
    ]}});
    assert!(matches!(
        from_wire(&value),
        Err(Error::SchemaVersionMismatch {
            found: 2,
            supported: 1
        })
    ));
}

#[test]
fn test_nesting_violation_on_decode() {
    let value = json!({"root": {"type": "root", "children": [
        {"type": "paragraph", "children": [
            {"type": "heading", "tag": "h2", "children": []}
        ]}
    ]}});
    assert!(matches!(
        from_wire(&value),
        Err(Error::InvalidStructure { .. })
    ));
}

#[test]
fn test_missing_required_fields() {
    let no_tag = json!({"root": {"type": "root", "children": [
        {"type": "heading", "children": []}
    ]}});
    assert!(matches!(from_wire(&no_tag), Err(Error::MissingField("tag"))));

    let no_src = json!({"root": {"type": "root", "children": [
        {"type": "heading", "tag": "h1", "children": [{"type": "image"}]}
    ]}});
    assert!(matches!(from_wire(&no_src), Err(Error::MissingField("src"))));
}

#[test]
fn test_unknown_format_bits_survive() {
    let value = json!({"root": {"type": "root", "children": [
        {"type": "paragraph", "children": [
            {"type": "text", "text": "x", "format": 1 | 1024}
        ]}
    ]}});
    let doc = from_wire(&value).unwrap();
    let again = to_wire(&doc);
    assert_eq!(again["root"]["children"][0]["children"][0]["format"], 1025);
}

#[test]
fn test_malformed_json() {
    assert!(matches!(from_json("{\"root\": "), Err(Error::Json(_))));
    assert!(Document::from_json_or_empty("{\"root\": ").is_empty());
}

#[test]
fn test_document_serde_impls() {
    let doc = rich_document();
    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(value, to_wire(&doc));

    let back: Document = serde_json::from_value(value).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn test_stored_post_keeps_decode_error_kind() {
    use richpost::{parse_post_str, Richpost};

    let unknown = r#"{"title":"T","content":{"root":{"type":"root","children":[{"type":"video"}]}}}"#;
    assert!(matches!(
        parse_post_str(unknown),
        Err(Error::UnknownNodeType(ty)) if ty == "video"
    ));

    let newer = r#"{"title":"T","content":{"root":{"type":"root","version":2,"children":[]}}}"#;
    assert!(matches!(
        parse_post_str(newer),
        Err(Error::SchemaVersionMismatch { found: 2, .. })
    ));
    assert!(matches!(
        Richpost::new().parse_str(newer),
        Err(Error::SchemaVersionMismatch { found: 2, .. })
    ));

    let nested = r#"{"content":{"root":{"type":"root","children":[
        {"type":"paragraph","children":[{"type":"image","src":"a.png"}]}
    ]}}}"#;
    assert!(matches!(
        parse_post_str(nested),
        Err(Error::InvalidStructure {
            parent: NodeKind::Paragraph,
            child: NodeKind::Image
        })
    ));
}

#[test]
fn test_wrapped_model_keeps_decode_error_kind() {
    let envelope = json!({"content": {"root": {"type": "root", "children": [{"type": "video"}]}}});
    let wrapped = json!({"id": 5, "jsonModel": envelope.to_string()}).to_string();
    assert!(matches!(
        richpost::parse_post_str(&wrapped),
        Err(Error::UnknownNodeType(_))
    ));
}
