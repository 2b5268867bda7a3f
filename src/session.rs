//! Editing session state.
//!
//! An [`EditSession`] owns the post being edited. The editing surface mutates
//! the document through it and asks it for the draft and publish bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::model::{Document, Post};
use crate::render::{to_html_with_stats, RenderOptions};
use crate::wire::{to_wire, JsonFormat};

/// Body submitted when a post is published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishPayload {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    /// `YYYY-MM-DD`, or empty
    pub date: String,
    /// Cover image file name
    pub image: String,
    /// Rendered HTML
    pub content: String,
    /// File names of images used in the content, in document order
    pub image_names: Vec<String>,
    /// The full post with its editor state, for later editing
    pub json_model: Value,
}

impl Post {
    /// Build the publish body: metadata, rendered HTML and referenced images.
    pub fn publish_payload(&self, options: &RenderOptions) -> Result<PublishPayload> {
        let rendered = to_html_with_stats(&self.content, options)?;
        Ok(PublishPayload {
            id: self.id.clone(),
            title: self.title.clone(),
            slug: self.slug.clone(),
            excerpt: self.excerpt.clone(),
            date: self.date_string(),
            image: self.cover_image.clone(),
            content: rendered.html,
            image_names: rendered.image_names,
            json_model: serde_json::to_value(self)?,
        })
    }
}

/// Post metadata the editor form sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostMeta {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub date: Option<NaiveDate>,
    pub cover_image: String,
}

/// State of one editing session.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    draft_id: String,
    post: Post,
}

impl EditSession {
    /// Start a session on an empty post.
    pub fn new(draft_id: impl Into<String>) -> Self {
        let draft_id = draft_id.into();
        Self {
            post: Post::new(draft_id.clone()),
            draft_id,
        }
    }

    /// Resume editing an existing post.
    pub fn from_post(post: Post) -> Self {
        Self {
            draft_id: post.id.clone(),
            post,
        }
    }

    pub fn draft_id(&self) -> &str {
        &self.draft_id
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn document(&self) -> &Document {
        &self.post.content
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.post.content
    }

    /// Replace the post metadata, keeping the content.
    pub fn set_meta(&mut self, meta: PostMeta) {
        self.post.title = meta.title;
        self.post.slug = meta.slug;
        self.post.excerpt = meta.excerpt;
        self.post.date = meta.date;
        self.post.cover_image = meta.cover_image;
    }

    /// Current metadata.
    pub fn meta(&self) -> PostMeta {
        PostMeta {
            title: self.post.title.clone(),
            slug: self.post.slug.clone(),
            excerpt: self.post.excerpt.clone(),
            date: self.post.date,
            cover_image: self.post.cover_image.clone(),
        }
    }

    /// The post as draft JSON.
    pub fn to_draft_json(&self, format: JsonFormat) -> Result<String> {
        let json = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(&self.post)?,
            JsonFormat::Compact => serde_json::to_string(&self.post)?,
        };
        Ok(json)
    }

    /// Editor state only, in wire form.
    pub fn content_wire(&self) -> Value {
        to_wire(&self.post.content)
    }

    /// Build the publish body for the current state.
    pub fn publish_payload(&self, options: &RenderOptions) -> Result<PublishPayload> {
        self.post.publish_payload(options)
    }

    /// Drop all content and metadata, keeping the draft id.
    pub fn clear(&mut self) {
        log::debug!("clearing session {}", self.draft_id);
        self.post = Post::new(self.draft_id.clone());
    }
}
