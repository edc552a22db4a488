//! # Domain Model: Pages, Snapshots and Path Derivation
//!
//! This module defines the core data structures for superpages: [`Page`],
//! [`Snapshot`], [`ContentFormat`] and the [`SearchDocument`] projection.
//! It also owns the two derivations every save depends on: slugs and paths.
//!
//! ## Slugs
//!
//! A slug is the URL-safe token of a single page. When a page is saved with an
//! empty slug, one is derived from the title by [`slugify`]:
//!
//! ```text
//! "My Test Page"        -> "my-test-page"
//! "  Hello,   World! "  -> "hello-world"
//! "Rust 2024 / Notes"   -> "rust-2024-notes"
//! ```
//!
//! Only ASCII letters and digits survive (lowercased). Every other run of
//! characters collapses to a single `-`, and separators at either end are
//! stripped. There is no transliteration: `"café"` becomes `"caf"`.
//!
//! ## Paths
//!
//! A path is the slash-joined address of a page within the hierarchy:
//!
//! ```text
//! my-test-page                      <- root page, path == slug
//! my-test-page/another-test-page    <- child, parent.path + "/" + slug
//! ```
//!
//! Paths are assigned once. After a page holds a non-empty path, neither a
//! title change, a slug change nor a move to another parent touches it, and
//! descendants keep their own paths too. Shared links rely on this.
//!
//! ## Snapshots
//!
//! A [`Snapshot`] is an immutable copy of a page's content fields taken at
//! save time, together with a message describing the change (think: commit
//! message). Snapshots point back to their page by id only; the page may be
//! gone later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Result, SuperpagesError};

/// Message recorded on a snapshot when the caller gives none.
pub const AUTO_SAVED: &str = "Auto-saved";

/// Template used to render a page without a custom template.
pub const DEFAULT_TEMPLATE: &str = "superflatpages/detail.html";

pub const TITLE_MAX_LEN: usize = 255;
pub const PATH_MAX_LEN: usize = 255;
pub const MESSAGE_MAX_LEN: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    /// Plain text
    Txt,
    /// reStructuredText
    #[default]
    Rst,
    /// Raw HTML
    Html,
}

impl ContentFormat {
    pub const ALL: [ContentFormat; 3] = [ContentFormat::Txt, ContentFormat::Rst, ContentFormat::Html];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentFormat::Txt => "txt",
            ContentFormat::Rst => "rst",
            ContentFormat::Html => "html",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentFormat::Txt => "Plain Text",
            ContentFormat::Rst => "ReStructured Text",
            ContentFormat::Html => "HTML",
        }
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentFormat {
    type Err = SuperpagesError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        ContentFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = ContentFormat::ALL.iter().map(|f| f.as_str()).collect();
                SuperpagesError::Validation(format!(
                    "unrecognized content format '{}' (expected one of {})",
                    wanted,
                    known.join(", ")
                ))
            })
    }
}

/// A live page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub path: String,
    /// Weak reference into the page arena. The parent may no longer exist.
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub extra_css: String,
    #[serde(default)]
    pub extra_js: String,
    #[serde(default)]
    pub content_format: ContentFormat,
    pub content: String,
    #[serde(default)]
    pub custom_template: Option<String>,
    pub last_modified_by: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Page {
    pub fn new(title: impl Into<String>, content: impl Into<String>, author: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            slug: String::new(),
            path: String::new(),
            parent_id: None,
            extra_css: String::new(),
            extra_js: String::new(),
            content_format: ContentFormat::default(),
            content: content.into(),
            custom_template: None,
            last_modified_by: author.into(),
            created: now,
            modified: now,
            is_active: true,
        }
    }

    pub fn with_format(mut self, format: ContentFormat) -> Self {
        self.content_format = format;
        self
    }

    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_custom_template(mut self, template: impl Into<String>) -> Self {
        self.custom_template = Some(template.into());
        self
    }

    /// Template candidates for rendering, most specific first.
    pub fn template_names(&self, default_template: &str) -> Vec<String> {
        let mut names = Vec::with_capacity(2);
        if let Some(custom) = self.custom_template.as_deref().filter(|t| !t.trim().is_empty()) {
            names.push(custom.to_string());
        }
        names.push(default_template.to_string());
        names
    }

    pub fn search_document(&self) -> SearchDocument {
        SearchDocument {
            id: self.id,
            text: format!("{}\n\n{}", self.title, self.content),
            title: self.title.clone(),
            author: self.last_modified_by.clone(),
            pub_date: self.created,
        }
    }
}

/// Immutable copy of a page's content at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: Uuid,
    /// The page this snapshot was taken from. May dangle.
    pub page_id: Uuid,
    pub message: String,
    pub snapped_on: DateTime<Utc>,
    pub title: String,
    pub slug: String,
    pub path: String,
    pub extra_css: String,
    pub extra_js: String,
    pub content_format: ContentFormat,
    pub content: String,
    pub custom_template: Option<String>,
    pub last_modified_by: String,
    pub is_active: bool,
}

impl Snapshot {
    pub fn of(page: &Page, message: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            page_id: page.id,
            message: message.unwrap_or(AUTO_SAVED).to_string(),
            snapped_on: Utc::now(),
            title: page.title.clone(),
            slug: page.slug.clone(),
            path: page.path.clone(),
            extra_css: page.extra_css.clone(),
            extra_js: page.extra_js.clone(),
            content_format: page.content_format,
            content: page.content.clone(),
            custom_template: page.custom_template.clone(),
            last_modified_by: page.last_modified_by.clone(),
            is_active: page.is_active,
        }
    }

    /// True when every copied content field equals the page's current value.
    pub fn matches(&self, page: &Page) -> bool {
        self.page_id == page.id
            && self.title == page.title
            && self.slug == page.slug
            && self.path == page.path
            && self.extra_css == page.extra_css
            && self.extra_js == page.extra_js
            && self.content_format == page.content_format
            && self.content == page.content
            && self.custom_template == page.custom_template
            && self.last_modified_by == page.last_modified_by
            && self.is_active == page.is_active
    }
}

/// What the search indexer sees of an active page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchDocument {
    pub id: Uuid,
    pub text: String,
    pub title: String,
    pub author: String,
    pub pub_date: DateTime<Utc>,
}

pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// `parent_path/slug`, or just `slug` for a root page.
pub fn derive_path(parent_path: Option<&str>, slug: &str) -> String {
    match parent_path {
        Some(parent) => format!("{}/{}", parent, slug),
        None => slug.to_string(),
    }
}

pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(SuperpagesError::Validation("title cannot be empty".into()));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(SuperpagesError::Validation(format!(
            "title is longer than {} characters",
            TITLE_MAX_LEN
        )));
    }
    Ok(())
}

/// A slug is a single URL-safe token: lowercase ASCII letters, digits, `-`
/// and `_`.
pub fn validate_slug(slug: &str) -> Result<()> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if !valid {
        return Err(SuperpagesError::Validation(format!(
            "invalid slug '{}': use lowercase letters, digits, '-' or '_'",
            slug
        )));
    }
    Ok(())
}

pub fn validate_path(path: &str) -> Result<()> {
    if path.chars().count() > PATH_MAX_LEN {
        return Err(SuperpagesError::Validation(format!(
            "path is longer than {} characters",
            PATH_MAX_LEN
        )));
    }
    Ok(())
}

pub fn validate_message(message: &str) -> Result<()> {
    if message.chars().count() > MESSAGE_MAX_LEN {
        return Err(SuperpagesError::Validation(format!(
            "message is longer than {} characters",
            MESSAGE_MAX_LEN
        )));
    }
    Ok(())
}
