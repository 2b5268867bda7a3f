//! Document to wire value.

use serde_json::{json, Map, Value};

use super::SCHEMA_VERSION;
use crate::model::{Block, Document, ElementAttrs, Heading, ImageNode, Inline, Paragraph, TextNode};

/// Convert a document to its JSON wire value.
pub fn to_wire(doc: &Document) -> Value {
    let mut root = element("root", doc.attrs());
    root.insert(
        "children".into(),
        Value::Array(doc.blocks().iter().map(block).collect()),
    );
    json!({ "root": Value::Object(root) })
}

fn element(kind: &str, attrs: ElementAttrs) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("type".into(), kind.into());
    obj.insert("version".into(), SCHEMA_VERSION.into());
    obj.insert(
        "direction".into(),
        attrs
            .direction
            .map_or(Value::Null, |d| Value::from(d.as_str())),
    );
    obj.insert("format".into(), attrs.format.as_str().into());
    obj.insert("indent".into(), attrs.indent.into());
    obj
}

fn block(block: &Block) -> Value {
    match block {
        Block::Heading(h) => heading(h),
        Block::Paragraph(p) => paragraph(p),
    }
}

fn heading(h: &Heading) -> Value {
    let mut obj = element("heading", h.attrs());
    obj.insert("tag".into(), h.level().tag().into());
    obj.insert(
        "children".into(),
        Value::Array(
            h.children()
                .iter()
                .map(|c| match c {
                    Inline::Text(t) => text(t),
                    Inline::Image(i) => image(i),
                })
                .collect(),
        ),
    );
    Value::Object(obj)
}

fn paragraph(p: &Paragraph) -> Value {
    let mut obj = element("paragraph", p.attrs());
    obj.insert("textFormat".into(), p.text_format().bits().into());
    obj.insert("textStyle".into(), p.text_style().into());
    obj.insert(
        "children".into(),
        Value::Array(p.children().iter().map(text).collect()),
    );
    Value::Object(obj)
}

fn text(t: &TextNode) -> Value {
    json!({
        "type": "text",
        "version": SCHEMA_VERSION,
        "detail": t.detail(),
        "format": t.format().bits(),
        "mode": t.mode().as_str(),
        "style": t.style(),
        "text": t.text(),
    })
}

fn image(i: &ImageNode) -> Value {
    json!({
        "type": "image",
        "version": SCHEMA_VERSION,
        "src": i.src(),
        "altText": i.alt_text(),
        "alignment": i.alignment().as_str(),
    })
}
