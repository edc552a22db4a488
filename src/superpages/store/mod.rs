//! # Storage Layer
//!
//! This module defines the storage abstraction for superpages. The [`DataStore`]
//! trait is what the command layer talks to; [`page_store::PageStore`] implements
//! it on top of any [`backend::StorageBackend`].
//!
//! ## Two Stores, One Write Unit
//!
//! - **PageStore** owns the live pages. On every save it validates the page,
//!   derives slug and path, and writes the page table.
//! - **SnapshotStore** ([`snapshots::SnapshotStore`]) owns the append-only
//!   ledger. PageStore calls it as the second half of every save.
//!
//! The two halves form a single unit of work:
//!
//! 1. **Page write fails**: the error is returned and no snapshot is written.
//! 2. **Snapshot write fails**: the page table is restored to its previous
//!    state and [`crate::error::SuperpagesError::SnapshotWrite`] is returned.
//!    A persisted save without its snapshot is never left behind silently.
//!
//! There is no locking. Two writers saving the same page race and the last
//! write wins; callers that need ordering serialize externally.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage in a data directory.
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data-dir>/
//! ├── pages.json              # Live pages, keyed by id
//! ├── config.json             # Configuration
//! └── snapshots/
//!     └── {page-uuid}.jsonl   # Append-only ledger, one snapshot per line
//! ```
//!
//! Snapshots reference their page by id only. Hard-deleting a page leaves its
//! ledger file (and any children's `parent_id`) pointing at nothing.

use crate::error::Result;
use crate::model::Page;
use snapshots::History;
use uuid::Uuid;

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod page_store;
pub mod snapshots;

/// Abstract interface for page storage.
///
/// Implementations must guarantee that every successful `save_page` is
/// matched by exactly one new snapshot.
pub trait DataStore {
    /// Create or update a page and record a snapshot of the result.
    fn save_page(&mut self, page: Page, message: Option<&str>) -> Result<Page>;

    /// Get a page by ID
    fn get_page(&self, id: &Uuid) -> Result<Page>;

    /// List all pages, active or not
    fn list_pages(&self) -> Result<Vec<Page>>;

    /// List pages with `is_active` set
    fn active_pages(&self) -> Result<Vec<Page>>;

    /// Find the page holding a path, regardless of its active flag
    fn find_by_path(&self, path: &str) -> Result<Option<Page>>;

    /// Look up the active page at a path
    fn resolve(&self, path: &str) -> Result<Page>;

    /// Delete a page permanently. Its snapshots are kept.
    fn delete_page(&mut self, id: &Uuid) -> Result<()>;

    /// Snapshots of a page, newest first
    fn history_for(&self, id: &Uuid) -> Result<History>;

    /// Number of snapshots across all pages
    fn snapshot_count(&self) -> Result<usize>;
}
