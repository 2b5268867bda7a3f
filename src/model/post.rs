//! Post envelope: the metadata stored alongside a document.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Document;
use crate::wire::from_wire;

/// A blog post or project entry: metadata plus rich content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Opaque identifier (numbers are accepted and stored as text)
    #[serde(default, deserialize_with = "id_from_any")]
    pub id: String,

    /// Title
    #[serde(default)]
    pub title: String,

    /// URL slug
    #[serde(default)]
    pub slug: String,

    /// Short summary
    #[serde(default)]
    pub excerpt: String,

    /// Publication date
    #[serde(default, with = "post_date")]
    pub date: Option<NaiveDate>,

    /// Cover image file name
    #[serde(default, alias = "image")]
    pub cover_image: String,

    /// Rich content
    #[serde(default)]
    pub content: Document,
}

impl Post {
    /// Create an empty post with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Set the excerpt.
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    /// Set the date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the cover image file name.
    pub fn with_cover_image(mut self, name: impl Into<String>) -> Self {
        self.cover_image = name.into();
        self
    }

    /// Set the content.
    pub fn with_content(mut self, content: Document) -> Self {
        self.content = content;
        self
    }

    /// Decode a post envelope.
    ///
    /// The metadata goes through serde; `content` is decoded separately so
    /// its errors keep their kind instead of collapsing into [`Error::Json`].
    ///
    /// [`Error::Json`]: crate::Error::Json
    pub fn from_value(value: &Value) -> crate::error::Result<Self> {
        let mut fields = value.clone();
        let content = fields.as_object_mut().and_then(|obj| obj.remove("content"));
        let mut post: Post = serde_json::from_value(fields)?;
        if let Some(content) = content.filter(|c| !c.is_null()) {
            post.content = from_wire(&content)?;
        }
        Ok(post)
    }

    /// Decode a post envelope from JSON text.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Date formatted as `YYYY-MM-DD`, or empty.
    pub fn date_string(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

pub(super) fn id_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number id, found {}",
            other
        ))),
    }
}

/// Parse a date written either as `YYYY-MM-DD` or as an RFC 3339 timestamp.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

mod post_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::parse_date(s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {:?}", s))),
        }
    }
}
