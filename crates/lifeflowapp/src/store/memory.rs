use super::{PageStore, SaveStamp, WriteLedger};
use crate::error::{LifeflowError, Result};
use crate::model::Page;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory page store for testing.
///
/// Uses `RefCell` for interior mutability since lifeflow is
/// single-threaded. This avoids the overhead of `RwLock` while keeping
/// read methods on `&self`.
pub struct InMemoryStore {
    pages: RefCell<HashMap<String, Page>>,
    ledger: WriteLedger,
    simulate_write_error: RefCell<bool>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            pages: RefCell::new(HashMap::new()),
            ledger: WriteLedger::new(),
            simulate_write_error: RefCell::new(false),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Save with an explicit stamp, for tests that drive write ordering.
    pub fn save_with_stamp(&mut self, page: &Page, stamp: SaveStamp) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(LifeflowError::Store("Simulated write error".to_string()));
        }
        if !self.ledger.admit(&page.id, stamp) {
            return Ok(());
        }
        self.pages.borrow_mut().insert(page.id.clone(), page.clone());
        Ok(())
    }
}

impl PageStore for InMemoryStore {
    fn list(&self) -> Result<Vec<Page>> {
        Ok(self.pages.borrow().values().cloned().collect())
    }

    fn get(&self, id: &str) -> Result<Page> {
        self.pages
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| LifeflowError::PageNotFound(id.to_string()))
    }

    fn save(&mut self, page: &Page) -> Result<()> {
        self.save_with_stamp(page, SaveStamp::next())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let removed = self.pages.borrow_mut().remove(id);
        if removed.is_none() {
            return Err(LifeflowError::PageNotFound(id.to_string()));
        }
        self.ledger.forget(id);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Page;
    use chrono::Utc;

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
                let page = Page::new(Some(format!("Test Page {}", i + 1)), None);
                self.store.save(&page).unwrap();
            }
            self
        }

        pub fn with_page(mut self, title: &str) -> Self {
            let page = Page::new(Some(title.to_string()), None);
            self.store.save(&page).unwrap();
            self
        }

        pub fn with_favorite_page(mut self, title: &str) -> Self {
            let mut page = Page::new(Some(title.to_string()), None);
            page.is_favorite = true;
            self.store.save(&page).unwrap();
            self
        }

        pub fn with_trashed_page(mut self, title: &str) -> Self {
            let mut page = Page::new(Some(title.to_string()), None);
            page.is_deleted = true;
            page.deleted_at = Some(Utc::now());
            self.store.save(&page).unwrap();
            self
        }

        pub fn with_child_page(mut self, title: &str, parent_id: &str) -> Self {
            let page = Page::new(Some(title.to_string()), Some(parent_id.to_string()));
            self.store.save(&page).unwrap();
            self
        }
    }
}
