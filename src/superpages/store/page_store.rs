use super::backend::StorageBackend;
use super::snapshots::{History, SnapshotStore};
use super::DataStore;
use crate::error::{Result, SuperpagesError};
use crate::model::{
    derive_path, slugify, validate_message, validate_path, validate_slug, validate_title, Page,
};
use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub struct PageStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> PageStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// The snapshot ledger sharing this store's backend.
    pub fn snapshots(&self) -> SnapshotStore<'_, B> {
        SnapshotStore::new(&self.backend)
    }

    /// Fill in slug and path where they are empty.
    ///
    /// The slug is re-derived on any save where it is empty. The path is only
    /// derived while empty, so once assigned it never follows later title,
    /// slug or parent changes.
    fn derive_fields(page: &mut Page, pages: &HashMap<Uuid, Page>) -> Result<()> {
        let parent = match page.parent_id {
            Some(parent_id) => Some(
                pages
                    .get(&parent_id)
                    .ok_or(SuperpagesError::ParentNotFound(parent_id))?,
            ),
            None => None,
        };

        if page.slug.is_empty() {
            page.slug = slugify(&page.title);
            if page.slug.is_empty() {
                return Err(SuperpagesError::Validation(format!(
                    "cannot derive a slug from title '{}'",
                    page.title
                )));
            }
            debug!(page = %page.id, slug = %page.slug, "derived slug from title");
        }
        validate_slug(&page.slug)?;

        if page.path.is_empty() {
            page.path = derive_path(parent.map(|p| p.path.as_str()), &page.slug);
            debug!(page = %page.id, path = %page.path, "derived path");
        }

        validate_path(&page.path)
    }

    fn ensure_unique_path(page: &Page, pages: &HashMap<Uuid, Page>) -> Result<()> {
        if pages.values().any(|p| p.path == page.path && p.id != page.id) {
            return Err(SuperpagesError::DuplicatePath(page.path.clone()));
        }
        Ok(())
    }

    /// Undo a page-table write after its snapshot failed.
    /// Returns whether the previous state was restored.
    fn roll_back(&self, pages: &mut HashMap<Uuid, Page>, id: Uuid, previous: Option<Page>) -> bool {
        match previous {
            Some(previous) => {
                pages.insert(id, previous);
            }
            None => {
                pages.remove(&id);
            }
        }

        match self.backend.save_pages(pages) {
            Ok(()) => {
                warn!(page = %id, "snapshot write failed, page write rolled back");
                true
            }
            Err(err) => {
                error!(
                    page = %id,
                    error = %err,
                    "snapshot write failed and the page write could not be rolled back"
                );
                false
            }
        }
    }
}

impl<B: StorageBackend> DataStore for PageStore<B> {
    fn save_page(&mut self, mut page: Page, message: Option<&str>) -> Result<Page> {
        validate_title(&page.title)?;
        if let Some(message) = message {
            validate_message(message)?;
        }

        let mut pages = self.backend.load_pages()?;
        Self::derive_fields(&mut page, &pages)?;
        Self::ensure_unique_path(&page, &pages)?;

        if let Some(existing) = pages.get(&page.id) {
            page.created = existing.created;
        }
        page.modified = Utc::now();

        // 1. Page write. A failure here leaves no snapshot behind.
        let previous = pages.insert(page.id, page.clone());
        let created = previous.is_none();
        self.backend.save_pages(&pages)?;

        // 2. Snapshot write, undoing step 1 if it fails.
        let snapshot = match self.snapshots().create_snapshot(&page, message) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                let rolled_back = self.roll_back(&mut pages, page.id, previous);
                return Err(SuperpagesError::SnapshotWrite {
                    page: page.id,
                    rolled_back,
                    reason: err.to_string(),
                });
            }
        };

        info!(
            page = %page.id,
            path = %page.path,
            snapshot = %snapshot.id,
            created,
            "page saved"
        );
        Ok(page)
    }

    fn get_page(&self, id: &Uuid) -> Result<Page> {
        let pages = self.backend.load_pages()?;
        pages
            .get(id)
            .cloned()
            .ok_or(SuperpagesError::PageNotFound(*id))
    }

    fn list_pages(&self) -> Result<Vec<Page>> {
        Ok(self.backend.load_pages()?.into_values().collect())
    }

    fn active_pages(&self) -> Result<Vec<Page>> {
        Ok(self
            .backend
            .load_pages()?
            .into_values()
            .filter(|p| p.is_active)
            .collect())
    }

    fn find_by_path(&self, path: &str) -> Result<Option<Page>> {
        Ok(self
            .backend
            .load_pages()?
            .into_values()
            .find(|p| p.path == path))
    }

    fn resolve(&self, path: &str) -> Result<Page> {
        self.backend
            .load_pages()?
            .into_values()
            .find(|p| p.is_active && p.path == path)
            .ok_or_else(|| SuperpagesError::PathNotFound(path.to_string()))
    }

    fn delete_page(&mut self, id: &Uuid) -> Result<()> {
        let mut pages = self.backend.load_pages()?;
        let removed = pages.remove(id).ok_or(SuperpagesError::PageNotFound(*id))?;
        self.backend.save_pages(&pages)?;
        info!(page = %id, path = %removed.path, "page deleted, snapshots kept");
        Ok(())
    }

    fn history_for(&self, id: &Uuid) -> Result<History> {
        self.snapshots().history_for(id)
    }

    fn snapshot_count(&self) -> Result<usize> {
        self.snapshots().count()
    }
}
