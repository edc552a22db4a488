//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for clients: the bundled CLI, an editing UI, a page renderer
//! or a search indexer.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Applies configuration** (default format, default author, default template)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no I/O of its own besides what the store and config do, and never
//! formats output.
//!
//! ## Generic Over DataStore
//!
//! `SuperpagesApi<S: DataStore>` is generic over the storage backend:
//! - Production: `SuperpagesApi<FileStore>`
//! - Testing: `SuperpagesApi<InMemoryStore>`

use crate::commands::{self, CmdResult, PageDraft, PageEdit};
use crate::config::SuperpagesConfig;
use crate::error::{Result, SuperpagesError};
use crate::store::DataStore;
use std::path::PathBuf;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::get::PageFilter;
pub use crate::commands::{CmdMessage, MessageLevel};

/// The main API facade for superpages operations.
pub struct SuperpagesApi<S: DataStore> {
    store: S,
    config: SuperpagesConfig,
    config_dir: PathBuf,
}

impl<S: DataStore> SuperpagesApi<S> {
    pub fn new(store: S, config: SuperpagesConfig, config_dir: PathBuf) -> Self {
        Self {
            store,
            config,
            config_dir,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &SuperpagesConfig {
        &self.config
    }

    /// Fill the draft's unset format and author from configuration.
    pub fn create_page(&mut self, mut draft: PageDraft, message: Option<&str>) -> Result<CmdResult> {
        if draft.format.is_none() {
            draft.format = Some(self.config.default_format);
        }
        if draft.author.trim().is_empty() {
            draft.author = self.default_author()?;
        }
        commands::create::run(&mut self.store, draft, message)
    }

    pub fn edit_page(&mut self, path: &str, edit: PageEdit, message: Option<&str>) -> Result<CmdResult> {
        let mut edit = edit;
        if edit.author.is_none() {
            edit.author = self.config.default_author.clone();
        }
        commands::update::run(&mut self.store, path, edit, message)
    }

    pub fn set_active(&mut self, path: &str, active: bool, message: Option<&str>) -> Result<CmdResult> {
        commands::status::run(&mut self.store, path, active, message)
    }

    pub fn list_pages(&self, filter: PageFilter) -> Result<CmdResult> {
        commands::get::run(&self.store, filter)
    }

    pub fn view_page(&self, path: &str) -> Result<CmdResult> {
        commands::view::run(&self.store, path, &self.config.default_template)
    }

    pub fn history(&self, path: &str, limit: Option<usize>) -> Result<CmdResult> {
        commands::history::run(&self.store, path, limit)
    }

    pub fn search_documents(&self) -> Result<CmdResult> {
        commands::search_index::run(&self.store)
    }

    pub fn config_action(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.config_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    fn default_author(&self) -> Result<String> {
        self.config.default_author.clone().ok_or_else(|| {
            SuperpagesError::Validation(
                "no author given and no default-author configured".to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentFormat, DEFAULT_TEMPLATE};
    use crate::store::memory::InMemoryStore;

    fn make_api(config: SuperpagesConfig) -> (tempfile::TempDir, SuperpagesApi<InMemoryStore>) {
        let dir = tempfile::tempdir().unwrap();
        let api = SuperpagesApi::new(InMemoryStore::new(), config, dir.path().to_path_buf());
        (dir, api)
    }

    #[test]
    fn create_applies_config_defaults() {
        let config = SuperpagesConfig {
            default_format: ContentFormat::Html,
            default_author: Some("editor".into()),
            ..Default::default()
        };
        let (_dir, mut api) = make_api(config);

        let result = api.create_page(PageDraft::new("Home", "<p>hi</p>", ""), None).unwrap();
        let page = &result.affected_pages[0];
        assert_eq!(page.content_format, ContentFormat::Html);
        assert_eq!(page.last_modified_by, "editor");
    }

    #[test]
    fn create_without_any_author_fails() {
        let (_dir, mut api) = make_api(SuperpagesConfig::default());
        let result = api.create_page(PageDraft::new("Home", "", ""), None);
        assert!(matches!(result, Err(SuperpagesError::Validation(_))));
        assert_eq!(api.store().snapshot_count().unwrap(), 0);
    }

    #[test]
    fn explicit_values_beat_config() {
        let config = SuperpagesConfig {
            default_format: ContentFormat::Html,
            default_author: Some("editor".into()),
            ..Default::default()
        };
        let (_dir, mut api) = make_api(config);

        let mut draft = PageDraft::new("Home", "", "alice");
        draft.format = Some(ContentFormat::Txt);
        let page = api.create_page(draft, None).unwrap().affected_pages[0].clone();
        assert_eq!(page.content_format, ContentFormat::Txt);
        assert_eq!(page.last_modified_by, "alice");
    }

    #[test]
    fn dispatches_reads() {
        let (_dir, mut api) = make_api(SuperpagesConfig::default());
        api.create_page(PageDraft::new("Home", "Welcome", "alice"), None)
            .unwrap();
        api.edit_page(
            "home",
            PageEdit {
                content: Some("Welcome back".into()),
                ..Default::default()
            },
            Some("Reworded"),
        )
        .unwrap();

        let view = api.view_page("home").unwrap();
        assert_eq!(view.template_names, vec![DEFAULT_TEMPLATE]);
        assert_eq!(view.listed_pages[0].content, "Welcome back");

        assert_eq!(api.history("home", None).unwrap().snapshots.len(), 2);
        assert_eq!(api.list_pages(PageFilter::default()).unwrap().listed_pages.len(), 1);
        assert_eq!(api.search_documents().unwrap().documents.len(), 1);

        api.set_active("home", false, None).unwrap();
        assert!(api.view_page("home").is_err());
    }

    #[test]
    fn config_changes_apply_to_later_calls() {
        let (_dir, mut api) = make_api(SuperpagesConfig::default());
        api.config_action(ConfigAction::Set(
            "default-template".into(),
            "pages/base.html".into(),
        ))
        .unwrap();
        api.create_page(PageDraft::new("Home", "", "alice"), None)
            .unwrap();

        let view = api.view_page("home").unwrap();
        assert_eq!(view.template_names, vec!["pages/base.html"]);
    }
}
