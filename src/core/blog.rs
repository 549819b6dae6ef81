//! Blog index: a JSON manifest of post metadata plus one content file per post.
//!
//! The manifest is read lazily on first access and cached for the lifetime of
//! the [`BlogIndex`]. Post bodies are read from disk on every lookup.
//!
//! Nothing in here fails. A missing manifest is an empty blog, a malformed one
//! is logged and treated as empty, and a post whose content file is gone is
//! simply not found.

use crate::domain::model::{BlogPost, BlogPostMeta};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

pub const DEFAULT_BLOG_DIR: &str = "content/blog";
pub const MANIFEST_FILE: &str = "index.json";

static DEFAULT_INDEX: OnceLock<BlogIndex> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct IndexEntry {
    #[serde(flatten)]
    meta: BlogPostMeta,
    file: String,
}

#[derive(Debug, Default)]
struct IndexCache {
    entries: Vec<IndexEntry>,
    by_slug: HashMap<String, usize>,
}

impl IndexCache {
    fn new(entries: Vec<IndexEntry>) -> Self {
        // Later entries win on duplicate slugs.
        let by_slug = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.meta.slug.clone(), i))
            .collect();
        Self { entries, by_slug }
    }

    fn get(&self, slug: &str) -> Option<&IndexEntry> {
        self.by_slug.get(slug).map(|&i| &self.entries[i])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingReason {
    /// The referenced file does not exist.
    NotFound,
    /// The reference is absolute or escapes the blog directory.
    InvalidReference,
}

/// A manifest entry whose body cannot be served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingContent {
    pub slug: String,
    pub file: String,
    pub reason: MissingReason,
}

#[derive(Debug)]
pub struct BlogIndex {
    blog_dir: PathBuf,
    cache: OnceLock<IndexCache>,
}

impl BlogIndex {
    pub fn new(blog_dir: impl Into<PathBuf>) -> Self {
        Self {
            blog_dir: blog_dir.into(),
            cache: OnceLock::new(),
        }
    }

    pub fn blog_dir(&self) -> &Path {
        &self.blog_dir
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.blog_dir.join(MANIFEST_FILE)
    }

    fn index(&self) -> &IndexCache {
        self.cache
            .get_or_init(|| IndexCache::new(load_manifest(&self.manifest_path())))
    }

    /// Metadata for every post, in manifest order.
    pub fn all_posts(&self) -> Vec<BlogPostMeta> {
        self.index().entries.iter().map(|e| e.meta.clone()).collect()
    }

    pub fn post_by_slug(&self, slug: &str) -> Option<BlogPost> {
        let entry = self.index().get(slug)?;
        let path = self.content_path(&entry.file)?;

        match std::fs::read_to_string(&path) {
            Ok(html) => Some(BlogPost {
                meta: entry.meta.clone(),
                html,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Post '{}' has no content file at {}", slug, path.display());
                None
            }
            Err(e) => {
                tracing::warn!("Could not read content for post '{}' ({}): {}", slug, path.display(), e);
                None
            }
        }
    }

    /// Manifest entries whose content would not resolve.
    pub fn audit(&self) -> Vec<MissingContent> {
        self.index()
            .entries
            .iter()
            .filter_map(|entry| {
                let reason = match self.content_path(&entry.file) {
                    None => MissingReason::InvalidReference,
                    Some(path) if !path.is_file() => MissingReason::NotFound,
                    Some(_) => return None,
                };
                Some(MissingContent {
                    slug: entry.meta.slug.clone(),
                    file: entry.file.clone(),
                    reason,
                })
            })
            .collect()
    }

    /// Slugs that appear more than once in the manifest, in first-seen order.
    /// Only the last entry for each is reachable by slug.
    pub fn duplicate_slugs(&self) -> Vec<String> {
        let index = self.index();
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for entry in &index.entries {
            let slug = entry.meta.slug.as_str();
            if !seen.insert(slug) && !duplicates.iter().any(|d| d == slug) {
                duplicates.push(slug.to_string());
            }
        }
        duplicates
    }

    fn content_path(&self, file: &str) -> Option<PathBuf> {
        let relative = Path::new(file);
        if file.is_empty() || relative.is_absolute() {
            return None;
        }
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        plain.then(|| self.blog_dir.join(relative))
    }
}

fn load_manifest(path: &Path) -> Vec<IndexEntry> {
    match std::fs::read_to_string(path) {
        Ok(raw) => parse_manifest(&raw, path),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No blog manifest at {}, blog is empty", path.display());
            Vec::new()
        }
        Err(e) => {
            tracing::warn!("Could not read blog manifest {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn parse_manifest(raw: &str, path: &Path) -> Vec<IndexEntry> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Blog manifest {} is not valid JSON: {}", path.display(), e);
            return Vec::new();
        }
    };

    let serde_json::Value::Array(items) = value else {
        tracing::warn!("Blog manifest {} is not a list, ignoring it", path.display());
        return Vec::new();
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<IndexEntry>(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping blog manifest entry #{}: {}", i, e);
                None
            }
        })
        .collect()
}

/// The process-wide index rooted at `content/blog` under the working directory.
pub fn default_index() -> &'static BlogIndex {
    DEFAULT_INDEX.get_or_init(|| {
        let dir = std::env::current_dir()
            .map(|cwd| cwd.join(DEFAULT_BLOG_DIR))
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_BLOG_DIR));
        BlogIndex::new(dir)
    })
}

pub fn get_all_posts() -> Vec<BlogPostMeta> {
    default_index().all_posts()
}

pub fn get_post_by_slug(slug: &str) -> Option<BlogPost> {
    default_index().post_by_slug(slug)
}
