//! # Snapshot Ledger
//!
//! The [`SnapshotStore`] is the append-only history of every page save. It
//! is a leaf service: it borrows the storage backend, copies the public
//! fields of a page it is handed, and never reads back or rewrites earlier
//! entries when writing.
//!
//! Every call to [`SnapshotStore::create_snapshot`] produces a new row with
//! a new id, even when the content is identical to the previous one.

use super::backend::StorageBackend;
use crate::error::Result;
use crate::model::{validate_message, Page, Snapshot};
use tracing::debug;
use uuid::Uuid;

pub struct SnapshotStore<'a, B: StorageBackend> {
    backend: &'a B,
}

impl<'a, B: StorageBackend> SnapshotStore<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Record the page as it is right now.
    ///
    /// `message` defaults to [`crate::model::AUTO_SAVED`] and is otherwise
    /// stored verbatim.
    pub fn create_snapshot(&self, page: &Page, message: Option<&str>) -> Result<Snapshot> {
        if let Some(message) = message {
            validate_message(message)?;
        }
        let snapshot = Snapshot::of(page, message);
        self.backend.append_snapshot(&snapshot)?;
        debug!(snapshot = %snapshot.id, page = %page.id, message = %snapshot.message, "snapshot created");
        Ok(snapshot)
    }

    /// Snapshots of one page, newest first.
    pub fn history_for(&self, page_id: &Uuid) -> Result<History> {
        let mut snapshots = self.backend.load_snapshots(page_id)?;
        // Ledger order is oldest first; reversing before the stable sort makes
        // the later append win when two snapshots share a timestamp.
        snapshots.reverse();
        snapshots.sort_by(|a, b| b.snapped_on.cmp(&a.snapped_on));
        Ok(History {
            inner: snapshots.into_iter(),
        })
    }

    pub fn count(&self) -> Result<usize> {
        self.backend.count_snapshots()
    }
}

/// A page's snapshot history, newest first.
///
/// Each call to `history_for` returns a fresh `History`; iterating one does
/// not affect another.
#[derive(Debug)]
pub struct History {
    inner: std::vec::IntoIter<Snapshot>,
}

impl History {
    pub fn latest(mut self) -> Option<Snapshot> {
        self.inner.next()
    }
}

impl Iterator for History {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for History {}
