//! Portfolio project entry.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::file_name;
use super::post::id_from_any;

/// A portfolio project: description, media files and links.
///
/// Media lists are stored either as JSON arrays or, in older records, as a
/// string holding a JSON array; both forms are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Opaque identifier (numbers are accepted and stored as text)
    #[serde(default, deserialize_with = "id_from_any")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Main image file name
    #[serde(default)]
    pub main_image: String,

    /// Gallery image file names
    #[serde(default, deserialize_with = "file_list")]
    pub image_files: Vec<String>,

    /// Video file names
    #[serde(default, deserialize_with = "file_list")]
    pub video_files: Vec<String>,

    /// Free-form hashtag string, e.g. `"#rust #cli"`
    #[serde(default)]
    pub hashtags: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
}

impl Project {
    /// Create an empty project with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_main_image(mut self, name: impl Into<String>) -> Self {
        self.main_image = name.into();
        self
    }

    /// Append a gallery image.
    pub fn add_image(mut self, name: impl Into<String>) -> Self {
        self.image_files.push(name.into());
        self
    }

    /// Append a video.
    pub fn add_video(mut self, name: impl Into<String>) -> Self {
        self.video_files.push(name.into());
        self
    }

    pub fn with_hashtags(mut self, hashtags: impl Into<String>) -> Self {
        self.hashtags = hashtags.into();
        self
    }

    pub fn with_github_link(mut self, link: impl Into<String>) -> Self {
        self.github_link = Some(link.into());
        self
    }

    /// Individual tags without the leading `#`.
    ///
    /// Tags are separated by whitespace or commas.
    pub fn hashtag_list(&self) -> Vec<&str> {
        self.hashtags
            .split(|c: char| c.is_whitespace() || c == ',')
            .map(|tag| tag.trim_start_matches('#'))
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// File names of every uploaded file this project uses.
    ///
    /// Paths are reduced to their last segment so the result can be matched
    /// against an upload directory listing.
    pub fn media_files(&self) -> Vec<String> {
        std::iter::once(&self.main_image)
            .chain(&self.image_files)
            .chain(&self.video_files)
            .filter(|name| !name.is_empty())
            .map(|name| file_name(name).to_string())
            .collect()
    }

    /// Decode a project from JSON text.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn file_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    use serde::de::Error;

    let items = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        Value::String(s) if s.trim().is_empty() => return Ok(Vec::new()),
        Value::String(s) => match serde_json::from_str::<Value>(&s).map_err(D::Error::custom)? {
            Value::Array(items) => items,
            other => {
                return Err(D::Error::custom(format!(
                    "expected a file list, found {}",
                    other
                )))
            }
        },
        other => {
            return Err(D::Error::custom(format!(
                "expected a file list, found {}",
                other
            )))
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            other => Err(D::Error::custom(format!("expected a file name, found {}", other))),
        })
        .collect()
}
