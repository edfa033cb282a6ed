use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{DisplayIndex, DisplayPage, PageSelector};
use crate::store::PageStore;

use super::helpers::{fmt_path, indexed_pages, resolve_selectors};

/// Brings trashed pages back. `created_at` is untouched so the page
/// reappears at its original position in the sidebar.
pub fn run<S: PageStore>(store: &mut S, selectors: &[PageSelector]) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    let mut restored_ids: Vec<String> = Vec::new();
    for (path, id) in resolved {
        let mut page = store.get(&id)?;
        page.is_deleted = false;
        page.deleted_at = None;
        store.save(&page)?;

        result.add_message(CmdMessage::success(format!(
            "Page restored ({}): {}",
            fmt_path(&path),
            page.title
        )));
        restored_ids.push(id);
    }

    // Re-index to report the new regular indexes
    let indexed = indexed_pages(store)?;
    for id in restored_ids {
        if let Some(dp) = super::helpers::find_page_by_id(&indexed, &id, |idx| {
            matches!(idx, DisplayIndex::Regular(_))
        }) {
            result.affected_pages.push(DisplayPage {
                page: dp.page.clone(),
                index: dp.index.clone(),
                children: Vec::new(),
            });
        }
    }

    Ok(result)
}
