use super::mem_backend::MemBackend;
use super::page_store::PageStore;

pub type InMemoryStore = PageStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        PageStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{ContentFormat, Page};
    use crate::store::DataStore;

    pub const TEST_AUTHOR: &str = "testy_mcpants";

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_pages(mut self, count: usize) -> Self {
            for i in 0..count {
                let title = format!("Test Page {}", i + 1);
                let content = format!("Content for page {}", i + 1);
                let page = Page::new(title, content, TEST_AUTHOR);
                self.store.save_page(page, None).unwrap();
            }
            self
        }

        pub fn with_page(mut self, title: &str) -> Self {
            let page = Page::new(title, "Some content", TEST_AUTHOR);
            self.store.save_page(page, None).unwrap();
            self
        }

        /// Adds a child under the page currently at `parent_path`.
        pub fn with_child(mut self, parent_path: &str, title: &str) -> Self {
            let parent = self.store.find_by_path(parent_path).unwrap().unwrap();
            let page = Page::new(title, "Child content", TEST_AUTHOR)
                .with_format(ContentFormat::Txt)
                .with_parent(parent.id);
            self.store.save_page(page, None).unwrap();
            self
        }

        pub fn with_inactive_page(mut self, title: &str) -> Self {
            let mut page = Page::new(title, "Retired content", TEST_AUTHOR);
            page.is_active = false;
            self.store.save_page(page, None).unwrap();
            self
        }
    }
}
