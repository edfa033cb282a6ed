//! # Storage Layer
//!
//! This module defines the storage abstraction for lifeflow. The
//! [`PageStore`] trait allows the application to work with different
//! backends without the command layer knowing which one is in play.
//!
//! ## Write Ordering
//!
//! Pages are written whole, last-writer-wins. To keep a slow or re-entrant
//! save from clobbering a newer one, every save carries a [`SaveStamp`]
//! drawn from a process-wide monotonic counter, and each store keeps a
//! [`WriteLedger`] of the highest stamp it has applied per page id. A save
//! whose stamp is at or below the ledger entry is dropped silently: the
//! newer state is already persisted and the caller has nothing to do.
//!
//! Stamps order writes within one process only. The REST backend still
//! checks them locally before issuing a request, but cannot protect
//! against a concurrent writer on another machine.
//!
//! ## Deletion Lifecycle
//!
//! - **Trash**: Sets `is_deleted = true` on the page and saves it. The
//!   page remains in the store for restore.
//! - **Purge**: [`PageStore::delete`] removes the page permanently. This
//!   is the only path that drops data.
//!
//! ## Implementations
//!
//! - [`local::LocalStore`]: JSON collection file on disk, written
//!   atomically.
//! - [`rest::RestStore`]: HTTP client against the lifeflow page API.
//! - [`memory::InMemoryStore`]: For testing logic without I/O.

use crate::error::Result;
use crate::model::Page;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

pub mod local;
pub mod memory;
pub mod rest;

/// Process-wide counter behind [`SaveStamp::next`].
static STAMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A monotonic ticket ordering whole-page writes within this process.
///
/// Stamps are comparable across stores and threads; a larger stamp was
/// issued later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SaveStamp(u64);

impl SaveStamp {
    /// Issues the next stamp. Never returns the same value twice within a
    /// process.
    pub fn next() -> Self {
        SaveStamp(STAMP_COUNTER.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Per-store record of the newest stamp applied to each page id.
///
/// Uses `RefCell` for interior mutability since lifeflow stores are
/// single-threaded; this lets [`WriteLedger::admit`] take `&self` like the
/// rest of the store internals.
#[derive(Debug, Default)]
pub struct WriteLedger {
    applied: RefCell<HashMap<String, u64>>,
}

impl WriteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `stamp` for `page_id` if it is newer than anything seen so
    /// far. Returns false when the write is stale and must be dropped.
    pub fn admit(&self, page_id: &str, stamp: SaveStamp) -> bool {
        let mut applied = self.applied.borrow_mut();
        match applied.get(page_id) {
            Some(&newest) if stamp.value() <= newest => false,
            _ => {
                applied.insert(page_id.to_string(), stamp.value());
                true
            }
        }
    }

    /// Forgets a page id, typically after a permanent delete.
    pub fn forget(&self, page_id: &str) {
        self.applied.borrow_mut().remove(page_id);
    }
}

/// Abstract interface for page storage.
///
/// Implementations persist whole pages; partial updates are assembled by
/// the caller before saving. `save` is an upsert keyed on the page id.
pub trait PageStore {
    /// List every page, trashed included. Ordering is not guaranteed.
    fn list(&self) -> Result<Vec<Page>>;

    /// Get a page by id.
    fn get(&self, id: &str) -> Result<Page>;

    /// Save a page (create or update). Stale writes, as ordered by the
    /// store's ledger, are dropped without error.
    fn save(&mut self, page: &Page) -> Result<()>;

    /// Delete a page permanently. This is the only authoritative removal;
    /// trashing is a regular save with `is_deleted` set.
    fn delete(&mut self, id: &str) -> Result<()>;
}
