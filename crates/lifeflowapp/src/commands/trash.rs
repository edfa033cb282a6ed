use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{DisplayPage, PageSelector};
use crate::store::PageStore;
use chrono::Utc;

use super::helpers::{fmt_path, resolve_selectors};

/// Moves pages to the trash. The pages keep their content and children;
/// only the deleted flag and timestamp change, so `updated_at` stays as a
/// record of the last real edit.
pub fn run<S: PageStore>(store: &mut S, selectors: &[PageSelector]) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for (path, id) in resolved {
        let mut page = store.get(&id)?;
        page.is_deleted = true;
        page.deleted_at = Some(Utc::now());
        store.save(&page)?;

        result.add_message(CmdMessage::success(format!(
            "Page trashed ({}): {}",
            fmt_path(&path),
            page.title
        )));
        result.affected_pages.push(DisplayPage {
            page,
            index: path
                .last()
                .cloned()
                .unwrap_or(crate::index::DisplayIndex::Regular(0)),
            children: Vec::new(),
        });
    }

    Ok(result)
}
