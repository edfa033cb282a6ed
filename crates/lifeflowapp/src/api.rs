//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as
//! the single entry point for all lifeflow operations, regardless of the
//! UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (e.g., converting display index strings to
//!   selectors)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! The API explicitly avoids:
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Selector Grammar
//!
//! - **Regular index path**: `N` or dotted (`1`, `2.1`, `1.3.2`)
//! - **Favorite index**: `fX` (e.g., `f1`)
//! - **Trashed index**: `tX` (e.g., `t2`)
//! - **Search fallback**: anything that does not parse as an index path
//!   becomes a title search term
//!
//! ### Special: Restore and Purge
//!
//! For commands on trashed pages, bare numbers auto-prefix with `t`:
//! `lifeflow restore 3` internally becomes `t3`. See
//! `parse_selectors_for_trashed`.
//!
//! ## Generic Over PageStore
//!
//! `LifeflowApi<S: PageStore>` is generic over the storage backend:
//! - Production: `LifeflowApi<LocalStore>` or `LifeflowApi<RestStore>`
//! - Testing: `LifeflowApi<InMemoryStore>`

use crate::commands;
use crate::error::Result;
use crate::feed::{FeedKind, FeedStore};
use crate::index::{parse_selector, PageSelector};
use crate::store::PageStore;
use std::collections::HashSet;

/// The main API facade for lifeflow page operations.
///
/// Generic over `PageStore` to allow different storage backends. All UI
/// clients should interact through this API.
pub struct LifeflowApi<S: PageStore> {
    store: S,
}

impl<S: PageStore> LifeflowApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn create_page(
        &mut self,
        title: Option<String>,
        parent: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let parent_selector = parent.map(parse_selector);
        commands::create::run(&mut self.store, title, parent_selector.as_ref())
    }

    pub fn get_pages(&self, filter: PageFilter) -> Result<commands::CmdResult> {
        commands::get::run(&self.store, filter)
    }

    pub fn view_pages<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(indexes);
        commands::view::run(&mut self.store, &selectors)
    }

    pub fn update_page(&mut self, index: &str, update: PageUpdate) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, &parse_selector(index), update)
    }

    pub fn edit_page(&mut self, index: &str, op: BlockOp) -> Result<commands::CmdResult> {
        commands::edit::run(&mut self.store, &parse_selector(index), op)
    }

    pub fn trash_pages<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(indexes);
        commands::trash::run(&mut self.store, &selectors)
    }

    pub fn restore_pages<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<commands::CmdResult> {
        // bare numbers are trash indexes here: "3" means "t3"
        let selectors = parse_selectors_for_trashed(indexes);
        commands::restore::run(&mut self.store, &selectors)
    }

    pub fn purge_preview<I: AsRef<str>>(&self, indexes: &[I]) -> Result<commands::purge::PurgePreview> {
        let selectors = parse_selectors_for_trashed(indexes);
        commands::purge::preview(&self.store, &selectors)
    }

    pub fn purge_pages<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors_for_trashed(indexes);
        commands::purge::run(&mut self.store, &selectors)
    }

    pub fn favorite_pages<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(indexes);
        commands::favorite::favorite(&mut self.store, &selectors)
    }

    pub fn unfavorite_pages<I: AsRef<str>>(
        &mut self,
        indexes: &[I],
    ) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(indexes);
        commands::favorite::unfavorite(&mut self.store, &selectors)
    }
}

/// Facade over a feed backend, mirroring [`LifeflowApi`] for the discover
/// feed operations.
pub struct FeedApi<F: FeedStore> {
    feed: F,
}

impl<F: FeedStore> FeedApi<F> {
    pub fn new(feed: F) -> Self {
        Self { feed }
    }

    pub fn list(&self) -> Result<commands::CmdResult> {
        commands::feed::list(&self.feed)
    }

    pub fn publish(
        &mut self,
        kind: FeedKind,
        title: String,
        description: Option<String>,
        author: Option<String>,
        tags: Vec<String>,
    ) -> Result<commands::CmdResult> {
        commands::feed::publish(&mut self.feed, kind, title, description, author, tags)
    }

    pub fn like(&mut self, position: usize) -> Result<commands::CmdResult> {
        commands::feed::like(&mut self.feed, position)
    }
}

/// Parses raw CLI arguments into selectors.
///
/// If every input parses as an index path, each becomes a `Path` selector
/// (deduplicated, order preserved). Otherwise the whole input is joined
/// into ONE title search term, so `lifeflow view meeting notes` searches
/// for "meeting notes".
fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Vec<PageSelector> {
    let mut paths = Vec::new();
    for input in inputs {
        match parse_selector(input.as_ref()) {
            PageSelector::Path(path) => paths.push(path),
            PageSelector::Title(_) => {
                let search_term = inputs
                    .iter()
                    .map(|s| s.as_ref())
                    .collect::<Vec<&str>>()
                    .join(" ");
                return vec![PageSelector::Title(search_term)];
            }
        }
    }

    let mut seen = HashSet::new();
    paths
        .into_iter()
        .filter(|p| seen.insert(p.clone()))
        .map(PageSelector::Path)
        .collect()
}

/// Parses selectors for commands that operate on trashed pages (restore,
/// purge). Bare numbers are treated as trash indexes: "3" -> "t3", while
/// "t3" and dotted paths stay as given.
fn parse_selectors_for_trashed<I: AsRef<str>>(inputs: &[I]) -> Vec<PageSelector> {
    let normalized: Vec<String> = inputs
        .iter()
        .map(|s| normalize_to_trashed_index(s.as_ref()))
        .collect();
    parse_selectors(&normalized)
}

/// "3" -> "t3", "t3" -> "t3", "f1" -> "f1", "1.2" -> "1.2"
fn normalize_to_trashed_index(s: &str) -> String {
    if s.chars().all(|c| c.is_ascii_digit()) && !s.is_empty() {
        format!("t{}", s)
    } else {
        s.to_string()
    }
}

pub use commands::edit::BlockOp;
pub use commands::get::{PageFilter, PageStatusFilter};
pub use commands::update::PageUpdate;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
