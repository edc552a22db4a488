//! # Command Layer
//!
//! This module contains the business operations of superpages. Each command
//! lives in its own submodule and exposes a `run` function that operates on
//! a [`DataStore`](crate::store::DataStore) and returns a [`CmdResult`].
//!
//! Commands never print, prompt or exit. They return pages, snapshots and
//! structured messages; the UI layer decides how to render them.
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore` and check the returned `CmdResult`
//! together with the resulting store state (page and snapshot counts).
//!
//! ## Command Modules
//!
//! - [`create`]: Create a page from a [`PageDraft`]
//! - [`update`]: Apply a [`PageEdit`] to the page at a path
//! - [`status`]: Activate or retire a page
//! - [`get`]: List pages
//! - [`view`]: Resolve a path for rendering
//! - [`history`]: Browse a page's snapshots
//! - [`search_index`]: Build search documents for the indexer
//! - [`config`]: Manage configuration

use crate::config::SuperpagesConfig;
use crate::error::{Result, SuperpagesError};
use crate::model::{ContentFormat, Page, SearchDocument, Snapshot};
use crate::store::DataStore;
use serde::Serialize;

pub mod config;
pub mod create;
pub mod get;
pub mod history;
pub mod search_index;
pub mod status;
pub mod update;
pub mod view;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct CmdResult {
    /// Pages written by the command, as persisted
    pub affected_pages: Vec<Page>,
    /// Pages to display
    pub listed_pages: Vec<Page>,
    /// Snapshots to display, newest first
    pub snapshots: Vec<Snapshot>,
    /// Search documents (for `search_index`)
    pub documents: Vec<SearchDocument>,
    /// Render template candidates, most specific first (for `view`)
    pub template_names: Vec<String>,
    pub config: Option<SuperpagesConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_config(mut self, config: SuperpagesConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Everything needed to create a page. Unset options fall back to
/// derivation (slug, path) or defaults (format).
#[derive(Debug, Clone, Default)]
pub struct PageDraft {
    pub title: String,
    pub content: String,
    pub author: String,
    pub format: Option<ContentFormat>,
    pub slug: Option<String>,
    pub path: Option<String>,
    /// Path of the parent page, which must already exist
    pub parent: Option<String>,
    pub custom_template: Option<String>,
    pub extra_css: Option<String>,
    pub extra_js: Option<String>,
}

impl PageDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: author.into(),
            ..Default::default()
        }
    }
}

/// Changes to an existing page. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct PageEdit {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub format: Option<ContentFormat>,
    pub slug: Option<String>,
    /// Empty the slug so the next save derives it from the title again
    pub clear_slug: bool,
    /// Re-parent under the page at this path. The page's own path is kept.
    pub parent: Option<String>,
    /// Drop the parent link, e.g. after the parent was hard-deleted. The
    /// page's own path is kept.
    pub clear_parent: bool,
    /// An empty string removes the custom template
    pub custom_template: Option<String>,
    pub extra_css: Option<String>,
    pub extra_js: Option<String>,
}

impl PageEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.author.is_none()
            && self.format.is_none()
            && self.slug.is_none()
            && !self.clear_slug
            && self.parent.is_none()
            && !self.clear_parent
            && self.custom_template.is_none()
            && self.extra_css.is_none()
            && self.extra_js.is_none()
    }
}

/// Find the page at `path` to use as a parent, whether active or not.
pub(crate) fn parent_by_path<S: DataStore>(store: &S, path: &str) -> Result<Page> {
    store
        .find_by_path(path)?
        .ok_or_else(|| SuperpagesError::ParentPathNotFound(path.to_string()))
}

/// Find the page at `path` for editing, whether active or not.
pub(crate) fn page_by_path<S: DataStore>(store: &S, path: &str) -> Result<Page> {
    store
        .find_by_path(path)?
        .ok_or_else(|| SuperpagesError::PathNotFound(path.to_string()))
}
