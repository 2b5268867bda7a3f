//! Local draft storage: one pretty-printed JSON file per post, with project
//! drafts kept in a `projects/` subdirectory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::{Post, Project};

/// Subdirectory holding project drafts.
pub const PROJECTS_DIR: &str = "projects";

/// Directory of draft files named `{id}.json`.
#[derive(Debug, Clone)]
pub struct DraftStore {
    dir: PathBuf,
}

impl DraftStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a draft id.
    ///
    /// Ids may only contain ASCII letters, digits, `-` and `_`.
    pub fn path_for(&self, id: &str) -> Result<PathBuf> {
        validate_id(id)?;
        Ok(self.dir.join(format!("{}.json", id)))
    }

    /// Write a post, replacing any previous draft with the same id.
    pub fn save(&self, post: &Post) -> Result<PathBuf> {
        let path = self.path_for(&post.id)?;
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(post)?;
        fs::write(&path, json)?;
        log::debug!("saved draft {} to {}", post.id, path.display());
        Ok(path)
    }

    /// Read a draft. Returns `Ok(None)` if none is stored under `id`.
    pub fn load(&self, id: &str) -> Result<Option<Post>> {
        let path = self.path_for(id)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(Post::from_json(&json)?))
    }

    /// Remove a draft. Returns whether a file was deleted.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let path = self.path_for(id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Ids of all stored drafts, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        list_ids(&self.dir)
    }

    /// File path for a project draft id.
    pub fn project_path_for(&self, id: &str) -> Result<PathBuf> {
        validate_id(id)?;
        Ok(self.dir.join(PROJECTS_DIR).join(format!("{}.json", id)))
    }

    /// Write a project draft, replacing any previous one with the same id.
    pub fn save_project(&self, project: &Project) -> Result<PathBuf> {
        let path = self.project_path_for(&project.id)?;
        fs::create_dir_all(self.dir.join(PROJECTS_DIR))?;
        let json = serde_json::to_string_pretty(project)?;
        fs::write(&path, json)?;
        log::debug!("saved project {} to {}", project.id, path.display());
        Ok(path)
    }

    /// Read a project draft. Returns `Ok(None)` if none is stored under `id`.
    pub fn load_project(&self, id: &str) -> Result<Option<Project>> {
        let path = self.project_path_for(id)?;
        match fs::read_to_string(&path) {
            Ok(json) => Ok(Some(Project::from_json(&json)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a project draft. Returns whether a file was deleted.
    pub fn delete_project(&self, id: &str) -> Result<bool> {
        let path = self.project_path_for(id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Ids of all stored project drafts, sorted.
    pub fn list_projects(&self) -> Result<Vec<String>> {
        list_ids(&self.dir.join(PROJECTS_DIR))
    }

    /// Async variant of [`save`](Self::save).
    #[cfg(feature = "async")]
    pub async fn save_async(&self, post: &Post) -> Result<PathBuf> {
        let path = self.path_for(&post.id)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(post)?;
        tokio::fs::write(&path, json).await?;
        Ok(path)
    }

    /// Async variant of [`load`](Self::load).
    #[cfg(feature = "async")]
    pub async fn load_async(&self, id: &str) -> Result<Option<Post>> {
        let path = self.path_for(id)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(json) => Ok(Some(Post::from_json(&json)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn list_ids(dir: &Path) -> Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut ids = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            if validate_id(stem).is_ok() {
                ids.push(stem.to_string());
            }
        }
    }
    ids.sort();
    Ok(ids)
}

fn validate_id(id: &str) -> Result<()> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidId(id.to_string()))
    }
}
