use super::fs_backend::FsBackend;
use super::page_store::PageStore;
use std::path::{Path, PathBuf};

pub type FileStore = PageStore<FsBackend>;

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        PageStore::with_backend(FsBackend::new(root))
    }

    pub fn root(&self) -> &Path {
        self.backend.root()
    }
}
