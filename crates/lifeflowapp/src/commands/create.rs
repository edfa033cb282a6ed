use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{DisplayIndex, DisplayPage, PageSelector};
use crate::model::Page;
use crate::store::PageStore;

use super::helpers::resolve_selectors;

/// Creates a new page, optionally nested under a parent. The page starts
/// with one empty text block.
pub fn run<S: PageStore>(
    store: &mut S,
    title: Option<String>,
    parent: Option<&PageSelector>,
) -> Result<CmdResult> {
    let parent_id = match parent {
        Some(selector) => {
            let resolved = resolve_selectors(store, std::slice::from_ref(selector))?;
            resolved.into_iter().next().map(|(_, id)| id)
        }
        None => None,
    };

    let page = Page::new(title, parent_id);
    store.save(&page)?;

    let mut result = CmdResult::default();
    // New page is always the newest among its siblings, so index 1
    result.affected_pages.push(DisplayPage {
        page: page.clone(),
        index: DisplayIndex::Regular(1),
        children: Vec::new(),
    });
    result.add_message(CmdMessage::success(format!("Page created: {}", page.title)));
    Ok(result)
}
