//! # Page Identifiers: UUID vs Display Index
//!
//! Pages are keyed by UUID internally, but UUIDs are hopeless to type at a
//! prompt. The CLI exposes a stable integer index instead, generated from
//! a canonical ordering of the full page list.
//!
//! ## Canonical Ordering
//!
//! Indexes are assigned over the complete, unfiltered sidebar, so that
//! `lifeflow trash 2` targets the same page no matter which filtered view
//! the user last printed.
//!
//! **Ordering logic**:
//! - All pages sorted by `created_at` descending (newest = 1)
//! - Favorites get an additional `f1`, `f2`... index (they appear in both
//!   the favorite and regular lists)
//! - Trashed pages get a separate bucket `t1`, `t2`...
//!
//! ## Favorites Have Two Indexes
//!
//! A favorite page appears **twice** in the indexed list, once as `f1` and
//! once with its canonical regular index. Unfavoriting therefore never
//! shifts the page's regular index.
//!
//! ## Nesting
//!
//! The same bucketing applies recursively per parent: children of page 1
//! are `1.f1`, `1.1`, `1.2`, `1.t1`, and so on down the tree.
//!
//! For input resolution (mapping indexes to page ids), see [`crate::api`].

use crate::model::Page;
use std::collections::HashMap;
use std::str::FromStr;

/// A user-facing index for a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DisplayIndex {
    Favorite(usize),
    Regular(usize),
    Trashed(usize),
}

impl std::fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayIndex::Favorite(i) => write!(f, "f{}", i),
            DisplayIndex::Regular(i) => write!(f, "{}", i),
            DisplayIndex::Trashed(i) => write!(f, "t{}", i),
        }
    }
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix('f') {
            if let Ok(n) = rest.parse() {
                return Ok(DisplayIndex::Favorite(n));
            }
        }
        if let Some(rest) = s.strip_prefix('t') {
            if let Ok(n) = rest.parse() {
                return Ok(DisplayIndex::Trashed(n));
            }
        }
        if let Ok(n) = s.parse() {
            return Ok(DisplayIndex::Regular(n));
        }
        Err(format!("Invalid index format: {}", s))
    }
}

/// A user input to select a page, either by a dotted index path or a
/// search term for its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSelector {
    Path(Vec<DisplayIndex>),
    Title(String),
}

impl std::fmt::Display for PageSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageSelector::Path(path) => {
                let s: Vec<String> = path.iter().map(|idx| idx.to_string()).collect();
                write!(f, "{}", s.join("."))
            }
            PageSelector::Title(t) => write!(f, "\"{}\"", t),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplayPage {
    pub page: Page,
    pub index: DisplayIndex,
    pub children: Vec<DisplayPage>,
}

/// Assigns canonical display indexes to a list of pages, building a tree.
///
/// **Per-parent bucketing**: the favorite/regular/trashed passes are
/// applied recursively at each nesting level. Each parent maintains its
/// own index namespace.
///
/// **Dual indexing**: favorites appear twice at each level, once with a
/// `Favorite` index and once with a `Regular` index.
///
/// The returned list is ordered: favorite entries first, then regular,
/// then trashed. Each entry's `children` follow the same ordering
/// recursively.
pub fn index_pages(pages: Vec<Page>) -> Vec<DisplayPage> {
    let mut parent_map: HashMap<Option<String>, Vec<Page>> = HashMap::new();
    for page in pages {
        parent_map
            .entry(page.parent_id.clone())
            .or_default()
            .push(page);
    }

    let root_pages = parent_map.remove(&None).unwrap_or_default();
    index_level(root_pages, &parent_map)
}

/// Indexes one level of the tree (siblings with the same parent).
///
/// Three passes over the siblings, newest first:
/// 1. **Favorite pass**: `Favorite(1)`, `Favorite(2)`... for favorite
///    non-trashed pages
/// 2. **Regular pass**: `Regular(1)`, `Regular(2)`... for ALL non-trashed
///    pages (favorites included, dual indexing)
/// 3. **Trashed pass**: `Trashed(1)`, `Trashed(2)`...
fn index_level(
    mut pages: Vec<Page>,
    parent_map: &HashMap<Option<String>, Vec<Page>>,
) -> Vec<DisplayPage> {
    pages.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut results = Vec::new();

    let mut add_page = |page: Page, index: DisplayIndex| {
        let children = parent_map
            .get(&Some(page.id.clone()))
            .cloned()
            .unwrap_or_default();
        let indexed_children = index_level(children, parent_map);

        results.push(DisplayPage {
            page,
            index,
            children: indexed_children,
        });
    };

    let mut favorite_idx = 1;
    for page in &pages {
        if page.is_favorite && !page.is_deleted {
            add_page(page.clone(), DisplayIndex::Favorite(favorite_idx));
            favorite_idx += 1;
        }
    }

    let mut regular_idx = 1;
    for page in &pages {
        if !page.is_deleted {
            add_page(page.clone(), DisplayIndex::Regular(regular_idx));
            regular_idx += 1;
        }
    }

    let mut trashed_idx = 1;
    for page in &pages {
        if page.is_deleted {
            add_page(page.clone(), DisplayIndex::Trashed(trashed_idx));
            trashed_idx += 1;
        }
    }

    results
}

/// Parses a dot-separated path string into a vector of DisplayIndex.
/// e.g. "1.2" -> [Regular(1), Regular(2)], "f1" -> [Favorite(1)]
pub fn parse_path(s: &str) -> Result<Vec<DisplayIndex>, String> {
    s.split('.').map(DisplayIndex::from_str).collect()
}

/// Parses one selector argument: an index path when it parses as one,
/// otherwise a title search term.
pub fn parse_selector(s: &str) -> PageSelector {
    match parse_path(s) {
        Ok(path) => PageSelector::Path(path),
        Err(_) => PageSelector::Title(s.to_string()),
    }
}
