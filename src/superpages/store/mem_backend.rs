use super::backend::StorageBackend;
use crate::error::{Result, SuperpagesError};
use crate::model::{Page, Snapshot};
use std::cell::RefCell;
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    pages: RefCell<HashMap<Uuid, Page>>,
    ledger: RefCell<Vec<Snapshot>>,
    simulate_page_write_error: RefCell<bool>,
    simulate_snapshot_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every page-table write fail, for testing error handling.
    pub fn set_simulate_page_write_error(&self, simulate: bool) {
        *self.simulate_page_write_error.borrow_mut() = simulate;
    }

    /// Make every snapshot append fail, for testing error handling.
    pub fn set_simulate_snapshot_write_error(&self, simulate: bool) {
        *self.simulate_snapshot_write_error.borrow_mut() = simulate;
    }
}

impl StorageBackend for MemBackend {
    fn load_pages(&self) -> Result<HashMap<Uuid, Page>> {
        Ok(self.pages.borrow().clone())
    }

    fn save_pages(&self, pages: &HashMap<Uuid, Page>) -> Result<()> {
        if *self.simulate_page_write_error.borrow() {
            return Err(SuperpagesError::Store("Simulated write error".to_string()));
        }
        *self.pages.borrow_mut() = pages.clone();
        Ok(())
    }

    fn append_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        if *self.simulate_snapshot_write_error.borrow() {
            return Err(SuperpagesError::Store("Simulated write error".to_string()));
        }
        self.ledger.borrow_mut().push(snapshot.clone());
        Ok(())
    }

    fn load_snapshots(&self, page_id: &Uuid) -> Result<Vec<Snapshot>> {
        Ok(self
            .ledger
            .borrow()
            .iter()
            .filter(|s| &s.page_id == page_id)
            .cloned()
            .collect())
    }

    fn count_snapshots(&self) -> Result<usize> {
        Ok(self.ledger.borrow().len())
    }
}
