use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{DisplayPage, PageSelector};
use crate::model;
use crate::store::PageStore;

use super::helpers::{fmt_path, resolve_selectors};

/// Partial update of page metadata. `None` fields are left alone; an empty
/// string clears the icon (back to the default) or the cover image.
#[derive(Debug, Default, Clone)]
pub struct PageUpdate {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub cover_image: Option<String>,
}

impl PageUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.icon.is_none() && self.cover_image.is_none()
    }
}

pub fn run<S: PageStore>(
    store: &mut S,
    selector: &PageSelector,
    update: PageUpdate,
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, std::slice::from_ref(selector))?;
    let mut result = CmdResult::default();

    for (path, id) in resolved {
        let mut page = store.get(&id)?;

        if let Some(title) = update.title.clone() {
            page.title = model::normalize_title(Some(title));
        }
        if let Some(icon) = update.icon.clone() {
            page.icon = if icon.is_empty() {
                model::DEFAULT_ICON.to_string()
            } else {
                icon
            };
        }
        if let Some(cover) = update.cover_image.clone() {
            page.cover_image = if cover.is_empty() { None } else { Some(cover) };
        }
        page.touch();
        store.save(&page)?;

        result.add_message(CmdMessage::success(format!(
            "Page updated ({}): {}",
            fmt_path(&path),
            page.title
        )));
        let index = path.last().cloned().unwrap_or(crate::index::DisplayIndex::Regular(0));
        result.affected_pages.push(DisplayPage {
            page,
            index,
            children: Vec::new(),
        });
    }

    Ok(result)
}
