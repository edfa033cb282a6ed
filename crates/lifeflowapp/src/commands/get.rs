use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::{DisplayIndex, DisplayPage};
use crate::store::PageStore;

use super::helpers::indexed_pages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatusFilter {
    All,
    Active,
    Trashed,
    Favorites,
}

#[derive(Debug, Clone)]
pub struct PageFilter {
    pub status: PageStatusFilter,
    pub search_term: Option<String>,
}

impl Default for PageFilter {
    fn default() -> Self {
        Self {
            status: PageStatusFilter::Active,
            search_term: None,
        }
    }
}

/// Lists pages as an indexed tree, filtered by status and search term.
pub fn run<S: PageStore>(store: &S, filter: PageFilter) -> Result<CmdResult> {
    let indexed = indexed_pages(store)?;
    let mut pages = filter_tree(indexed, filter.status);

    if let Some(term) = &filter.search_term {
        let term_lower = term.to_lowercase();
        pages = search_tree(pages, &term_lower);
    }

    Ok(CmdResult::default().with_listed_pages(pages))
}

/// Recursively filters the tree based on status.
///
/// Filtering rules:
/// - **Active**: Non-trashed entries, favorites shown only once (under
///   their regular index). Children filtered recursively.
/// - **Favorites**: Only the `Favorite` entries, children filtered for
///   favorites too.
/// - **Trashed**: Trashed entries with ALL their children; children keep
///   living under their trashed parent.
/// - **All**: Everything, including the duplicate favorite entries.
fn filter_tree(pages: Vec<DisplayPage>, status: PageStatusFilter) -> Vec<DisplayPage> {
    pages
        .into_iter()
        .filter_map(|dp| filter_page_recursive(dp, status))
        .collect()
}

fn filter_page_recursive(mut dp: DisplayPage, status: PageStatusFilter) -> Option<DisplayPage> {
    if !matches_status(&dp.index, status) {
        return None;
    }

    // Trashed parents keep their whole subtree visible
    if status != PageStatusFilter::Trashed {
        dp.children = filter_tree(dp.children, status);
    }
    Some(dp)
}

fn matches_status(index: &DisplayIndex, status: PageStatusFilter) -> bool {
    match status {
        PageStatusFilter::All => true,
        PageStatusFilter::Active => matches!(index, DisplayIndex::Regular(_)),
        PageStatusFilter::Trashed => matches!(index, DisplayIndex::Trashed(_)),
        PageStatusFilter::Favorites => matches!(index, DisplayIndex::Favorite(_)),
    }
}

/// Keeps subtrees containing a title match. A matching parent keeps all
/// its children; a matching descendant keeps its ancestors as context.
fn search_tree(pages: Vec<DisplayPage>, term_lower: &str) -> Vec<DisplayPage> {
    pages
        .into_iter()
        .filter_map(|mut dp| {
            if dp.page.title.to_lowercase().contains(term_lower) {
                return Some(dp);
            }
            dp.children = search_tree(dp.children, term_lower);
            if dp.children.is_empty() {
                None
            } else {
                Some(dp)
            }
        })
        .collect()
}
