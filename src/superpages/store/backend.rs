use crate::error::Result;
use crate::model::{Page, Snapshot};
use std::collections::HashMap;
use uuid::Uuid;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while PageStore handles the "what" (derivation, validation, the write unit).
pub trait StorageBackend {
    // --- Page Operations ---

    /// Load every live page, keyed by id.
    fn load_pages(&self) -> Result<HashMap<Uuid, Page>>;

    /// Replace the page table.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_pages(&self, pages: &HashMap<Uuid, Page>) -> Result<()>;

    // --- Snapshot Ledger ---

    /// Append one snapshot to the ledger. Existing entries are never rewritten.
    fn append_snapshot(&self, snapshot: &Snapshot) -> Result<()>;

    /// All snapshots taken of a page, in append order (oldest first).
    /// Returns an empty Vec for pages that never had one.
    fn load_snapshots(&self, page_id: &Uuid) -> Result<Vec<Snapshot>>;

    /// Total number of snapshots in the ledger, across all pages.
    fn count_snapshots(&self) -> Result<usize>;
}
