//! Wire value to document.

use serde_json::{Map, Value};

use super::SCHEMA_VERSION;
use crate::error::{Error, Result};
use crate::model::{
    Alignment, Block, Direction, Document, ElementAttrs, ElementFormat, Heading, HeadingLevel,
    ImageNode, Node, NodeKind, Paragraph, TextFormat, TextMode, TextNode,
};

type Object = Map<String, Value>;

/// Decode a document from its JSON wire value.
pub fn from_wire(value: &Value) -> Result<Document> {
    let obj = object(value, "document")?;
    let root = obj.get("root").ok_or(Error::MissingField("root"))?;
    decode_root(root)
}

fn decode_root(value: &Value) -> Result<Document> {
    let (kind, obj) = header(value)?;
    if kind != NodeKind::Root {
        return Err(Error::InvalidField {
            field: "root",
            reason: format!("expected a root node, found {}", kind),
        });
    }
    let children = children(obj)?
        .iter()
        .map(|child| decode_node(child, NodeKind::Root).and_then(Node::into_block))
        .collect::<Result<Vec<Block>>>()?;
    Ok(Document::from_parts(attrs(obj), children))
}

fn decode_node(value: &Value, parent: NodeKind) -> Result<Node> {
    let (kind, obj) = header(value)?;
    if !parent.accepts(kind) {
        return Err(Error::InvalidStructure {
            parent,
            child: kind,
        });
    }
    match kind {
        NodeKind::Heading => decode_heading(obj).map(Node::Heading),
        NodeKind::Paragraph => decode_paragraph(obj).map(Node::Paragraph),
        NodeKind::Text => Ok(Node::Text(decode_text(obj))),
        NodeKind::Image => decode_image(obj).map(Node::Image),
        NodeKind::Root => Err(Error::InvalidStructure {
            parent,
            child: kind,
        }),
    }
}

fn decode_heading(obj: &Object) -> Result<Heading> {
    let tag = str_field(obj, "tag").ok_or(Error::MissingField("tag"))?;
    let level = HeadingLevel::from_tag(tag).ok_or_else(|| Error::InvalidField {
        field: "tag",
        reason: format!("{:?} is not h1-h6", tag),
    })?;
    let children = children(obj)?
        .iter()
        .map(|child| decode_node(child, NodeKind::Heading))
        .collect::<Result<Vec<_>>>()?;
    Ok(Heading::new(level, children)?.with_attrs(attrs(obj)))
}

fn decode_paragraph(obj: &Object) -> Result<Paragraph> {
    let children = children(obj)?
        .iter()
        .map(|child| decode_node(child, NodeKind::Paragraph))
        .collect::<Result<Vec<_>>>()?;
    let text_format = TextFormat::from_bits_retain(u32_field(obj, "textFormat"));
    let text_style = str_field(obj, "textStyle").unwrap_or_default();
    Ok(Paragraph::new(children)?
        .with_attrs(attrs(obj))
        .with_text_format(text_format, text_style))
}

fn decode_text(obj: &Object) -> TextNode {
    let format = TextFormat::from_bits_retain(u32_field(obj, "format"));
    let mode = str_field(obj, "mode").map_or(TextMode::Normal, TextMode::from_wire);
    TextNode::new(
        str_field(obj, "text").unwrap_or_default(),
        format,
        str_field(obj, "style").unwrap_or_default(),
    )
    .with_detail(u32_field(obj, "detail"))
    .with_mode(mode)
}

fn decode_image(obj: &Object) -> Result<ImageNode> {
    let src = str_field(obj, "src").ok_or(Error::MissingField("src"))?;
    let alt_text = str_field(obj, "altText").unwrap_or_default();
    let alignment = Alignment::from_wire(str_field(obj, "alignment"));
    Ok(ImageNode::new(src, alt_text, alignment))
}

/// Read the `type` discriminant and enforce the schema version ceiling.
fn header(value: &Value) -> Result<(NodeKind, &Object)> {
    let obj = object(value, "node")?;
    let ty = match obj.get("type") {
        Some(Value::String(s)) => s.as_str(),
        Some(other) => {
            return Err(Error::InvalidField {
                field: "type",
                reason: format!("expected a string, found {}", other),
            })
        }
        None => return Err(Error::MissingField("type")),
    };
    let kind = kind_from_wire(ty)?;
    check_version(obj)?;
    Ok((kind, obj))
}

fn kind_from_wire(ty: &str) -> Result<NodeKind> {
    match ty {
        "root" => Ok(NodeKind::Root),
        "heading" => Ok(NodeKind::Heading),
        "paragraph" => Ok(NodeKind::Paragraph),
        "text" => Ok(NodeKind::Text),
        "image" => Ok(NodeKind::Image),
        other => Err(Error::UnknownNodeType(other.to_string())),
    }
}

fn check_version(obj: &Object) -> Result<()> {
    let found = match obj.get("version") {
        None | Some(Value::Null) => return Ok(()),
        Some(v) => v.as_u64().ok_or_else(|| Error::InvalidField {
            field: "version",
            reason: format!("expected a non-negative integer, found {}", v),
        })?,
    };
    if found > u64::from(SCHEMA_VERSION) {
        return Err(Error::SchemaVersionMismatch {
            found: u32::try_from(found).unwrap_or(u32::MAX),
            supported: SCHEMA_VERSION,
        });
    }
    Ok(())
}

fn object<'a>(value: &'a Value, what: &'static str) -> Result<&'a Object> {
    value.as_object().ok_or_else(|| Error::InvalidField {
        field: what,
        reason: "expected a JSON object".to_string(),
    })
}

fn children(obj: &Object) -> Result<&[Value]> {
    match obj.get("children") {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(Error::InvalidField {
            field: "children",
            reason: "expected an array".to_string(),
        }),
    }
}

fn attrs(obj: &Object) -> ElementAttrs {
    ElementAttrs {
        direction: str_field(obj, "direction").and_then(Direction::parse),
        format: str_field(obj, "format").map_or(ElementFormat::Unset, ElementFormat::from_wire),
        indent: u32_field(obj, "indent"),
    }
}

fn str_field<'a>(obj: &'a Object, name: &str) -> Option<&'a str> {
    obj.get(name).and_then(Value::as_str)
}

fn u32_field(obj: &Object, name: &str) -> u32 {
    obj.get(name)
        .and_then(Value::as_u64)
        .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX))
}
