//! Stored payload detection and unwrapping.
//!
//! Documents are persisted in three shapes: a bare editor state (`{"root": ...}`),
//! a post envelope whose `content` holds the editor state, and a post record
//! whose `jsonModel` holds an envelope, either as an object or as a JSON string.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Document, Post};
use crate::wire::from_wire;

/// Shape of a stored payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Bare editor state: `{"root": {...}}`
    Document,
    /// Post envelope: `{"content": {"root": {...}}, ...}`
    Envelope,
    /// Post record wrapping an envelope: `{"jsonModel": ...}`
    WrappedModel,
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PayloadKind::Document => "document",
            PayloadKind::Envelope => "post envelope",
            PayloadKind::WrappedModel => "wrapped model",
        };
        f.write_str(name)
    }
}

/// Classify a payload.
///
/// # Returns
/// * `Ok(PayloadKind)` if the value has one of the known shapes
/// * `Err(Error::UnknownFormat)` otherwise
///
/// # Example
/// ```
/// use richpost::detect::{detect_payload, PayloadKind};
/// use serde_json::json;
///
/// let kind = detect_payload(&json!({"content": {"root": {"type": "root"}}})).unwrap();
/// assert_eq!(kind, PayloadKind::Envelope);
/// ```
pub fn detect_payload(value: &Value) -> Result<PayloadKind> {
    let obj = value.as_object().ok_or(Error::UnknownFormat)?;

    if obj.get("root").is_some_and(Value::is_object) {
        return Ok(PayloadKind::Document);
    }
    if obj.get("content").is_some_and(is_document) {
        return Ok(PayloadKind::Envelope);
    }
    match obj.get("jsonModel") {
        Some(Value::String(_)) | Some(Value::Object(_)) => Ok(PayloadKind::WrappedModel),
        _ => Err(Error::UnknownFormat),
    }
}

/// Unwrap any known payload shape to its document.
pub fn document_from_payload(value: &Value) -> Result<Document> {
    from_wire(&unwrap_payload(value)?)
}

/// Unwrap any known payload shape to a post.
///
/// A bare document yields a post with empty metadata. For wrapped models the
/// outer record supplies the id when the inner envelope has none.
pub fn post_from_payload(value: &Value) -> Result<Post> {
    match detect_payload(value)? {
        PayloadKind::Document => Ok(Post::default().with_content(from_wire(value)?)),
        PayloadKind::Envelope => Post::from_value(value),
        PayloadKind::WrappedModel => {
            let inner = inner_model(value)?;
            let mut post = post_from_payload(&inner)?;
            if post.id.is_empty() {
                if let Some(id) = value.get("id") {
                    post.id = match id {
                        Value::String(s) => s.clone(),
                        Value::Number(n) => n.to_string(),
                        _ => String::new(),
                    };
                }
            }
            Ok(post)
        }
    }
}

/// The editor state inside a payload, still in wire form.
pub fn unwrap_payload(value: &Value) -> Result<Value> {
    let kind = detect_payload(value)?;
    log::debug!("unwrapping {} payload", kind);
    match kind {
        PayloadKind::Document => Ok(value.clone()),
        PayloadKind::Envelope => value.get("content").cloned().ok_or(Error::UnknownFormat),
        PayloadKind::WrappedModel => unwrap_payload(&inner_model(value)?),
    }
}

/// The payload inside a `jsonModel` wrapper.
///
/// A model wrapping another model is not a shape anyone writes and is
/// rejected as `UnknownFormat`.
fn inner_model(value: &Value) -> Result<Value> {
    let inner: Value = match value.get("jsonModel") {
        Some(Value::String(s)) => serde_json::from_str(s)?,
        Some(inner @ Value::Object(_)) => inner.clone(),
        _ => return Err(Error::UnknownFormat),
    };
    match detect_payload(&inner)? {
        PayloadKind::WrappedModel => Err(Error::UnknownFormat),
        _ => Ok(inner),
    }
}

fn is_document(value: &Value) -> bool {
    value.get("root").is_some_and(Value::is_object)
}
