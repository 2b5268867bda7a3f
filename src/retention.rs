//! Upload directory retention.
//!
//! Uploaded images stay on disk until a cleanup pass removes the ones no
//! published content references. Planning and deleting are separate steps so
//! callers can show the plan first.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::Serialize;

use crate::error::Result;

/// File the upload directory keeps its post index in.
pub const INDEX_FILE_NAME: &str = "blog.json";

/// Options for a retention pass.
#[derive(Debug, Clone)]
pub struct RetentionOptions {
    /// Unreferenced files younger than this are kept
    pub max_age: Duration,

    /// File names that are never deleted
    pub protected: Vec<String>,
}

impl RetentionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep unreferenced files younger than `max_age`.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Never delete a file with this name.
    pub fn protect(mut self, name: impl Into<String>) -> Self {
        self.protected.push(name.into());
        self
    }
}

impl Default for RetentionOptions {
    fn default() -> Self {
        Self {
            max_age: Duration::ZERO,
            protected: vec![INDEX_FILE_NAME.to_string()],
        }
    }
}

/// Why a file survives a retention pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeepReason {
    Referenced,
    Protected,
    Recent,
}

/// Files of one upload directory, sorted into kept and expired.
#[derive(Debug, Clone)]
pub struct RetentionPlan {
    dir: PathBuf,
    keep: Vec<(String, KeepReason)>,
    delete: Vec<String>,
}

impl RetentionPlan {
    /// List `dir` and decide the fate of each regular file.
    ///
    /// `referenced` holds file names (not paths) still in use, as returned by
    /// [`extract_image_names`](crate::render::extract_image_names).
    pub fn scan(dir: impl AsRef<Path>, referenced: &[String], options: &RetentionOptions) -> Result<Self> {
        let dir = dir.as_ref();
        let referenced: HashSet<&str> = referenced.iter().map(String::as_str).collect();
        let protected: HashSet<&str> = options.protected.iter().map(String::as_str).collect();
        let now = SystemTime::now();

        let mut keep = Vec::new();
        let mut delete = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();

            if protected.contains(name.as_str()) {
                keep.push((name, KeepReason::Protected));
                continue;
            }
            if referenced.contains(name.as_str()) {
                keep.push((name, KeepReason::Referenced));
                continue;
            }

            // Clock skew can put mtime in the future; treat that as brand new
            let age = metadata
                .modified()
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .unwrap_or(Duration::ZERO);
            if age <= options.max_age {
                keep.push((name, KeepReason::Recent));
            } else {
                log::debug!("{} expired ({}s old)", name, age.as_secs());
                delete.push(name);
            }
        }

        keep.sort_by(|a, b| a.0.cmp(&b.0));
        delete.sort();

        Ok(Self {
            dir: dir.to_path_buf(),
            keep,
            delete,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files that survive, with the reason.
    pub fn kept(&self) -> &[(String, KeepReason)] {
        &self.keep
    }

    /// Files scheduled for deletion.
    pub fn to_delete(&self) -> &[String] {
        &self.delete
    }

    /// Delete the scheduled files.
    ///
    /// A file that cannot be removed is reported in
    /// [`RetentionReport::failed`] and does not stop the pass.
    pub fn apply(self) -> RetentionReport {
        let mut report = RetentionReport {
            kept: self.keep.len(),
            ..Default::default()
        };

        for name in self.delete {
            match fs::remove_file(self.dir.join(&name)) {
                Ok(()) => report.deleted.push(name),
                Err(e) => {
                    log::warn!("failed to delete {}: {}", name, e);
                    report.failed.push((name, e.to_string()));
                }
            }
        }

        report
    }
}

/// Outcome of [`RetentionPlan::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RetentionReport {
    /// Names of deleted files
    pub deleted: Vec<String>,
    /// Names that could not be deleted, with the error
    pub failed: Vec<(String, String)>,
    /// Number of files left in place
    pub kept: usize,
}

impl RetentionReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Replace characters outside `[A-Za-z0-9-_.]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Stored name for an upload: `{timestamp_ms}-{sanitized original}`.
///
/// A missing or empty original name becomes `image`.
pub fn upload_file_name(original: Option<&str>, timestamp_ms: u128) -> String {
    let base = match original {
        Some(name) if !name.is_empty() => sanitize_file_name(name),
        _ => "image".to_string(),
    };
    format!("{}-{}", timestamp_ms, base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn test_scan_keeps_referenced_and_protected() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.png");
        touch(dir.path(), "b.png");
        touch(dir.path(), "blog.json");
        fs::create_dir(dir.path().join("nested")).unwrap();

        let plan = RetentionPlan::scan(
            dir.path(),
            &["a.png".to_string()],
            &RetentionOptions::default(),
        )
        .unwrap();

        let pinned: Vec<_> = plan
            .kept()
            .iter()
            .filter(|(_, reason)| *reason != KeepReason::Recent)
            .cloned()
            .collect();
        assert_eq!(
            pinned,
            vec![
                ("a.png".to_string(), KeepReason::Referenced),
                ("blog.json".to_string(), KeepReason::Protected),
            ]
        );
        // b.png was written just now, so it may still count as recent
        assert_eq!(plan.to_delete().len() + plan.kept().len(), 3);
        assert!(!plan.to_delete().contains(&"a.png".to_string()));
    }

    #[test]
    fn test_recent_files_survive() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "fresh.png");

        let options = RetentionOptions::new().with_max_age(Duration::from_secs(3600));
        let plan = RetentionPlan::scan(dir.path(), &[], &options).unwrap();

        assert!(plan.to_delete().is_empty());
        assert_eq!(plan.kept()[0].1, KeepReason::Recent);
    }

    #[test]
    fn test_apply_deletes_scheduled() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "old.png");
        touch(dir.path(), "used.png");

        let plan = RetentionPlan {
            dir: dir.path().to_path_buf(),
            keep: vec![("used.png".to_string(), KeepReason::Referenced)],
            delete: vec!["old.png".to_string(), "gone.png".to_string()],
        };
        let report = plan.apply();

        assert_eq!(report.deleted, vec!["old.png"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.kept, 1);
        assert!(!report.is_clean());
        assert!(dir.path().join("used.png").exists());
        assert!(!dir.path().join("old.png").exists());
    }

    #[test]
    fn test_scan_missing_dir() {
        let dir = TempDir::new().unwrap();
        let result = RetentionPlan::scan(dir.path().join("nope"), &[], &RetentionOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("my photo (1).png"), "my_photo__1_.png");
        assert_eq!(sanitize_file_name("ok-name_2.jpg"), "ok-name_2.jpg");
        assert_eq!(sanitize_file_name("사진.png"), "__.png");
    }

    #[test]
    fn test_upload_file_name() {
        assert_eq!(upload_file_name(Some("a b.png"), 1700), "1700-a_b.png");
        assert_eq!(upload_file_name(None, 5), "5-image");
        assert_eq!(upload_file_name(Some(""), 5), "5-image");
    }
}
