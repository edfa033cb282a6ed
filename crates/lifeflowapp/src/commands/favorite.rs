use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{DisplayIndex, DisplayPage, PageSelector};
use crate::store::PageStore;

use super::helpers::{indexed_pages, resolve_selectors};

pub fn favorite<S: PageStore>(store: &mut S, selectors: &[PageSelector]) -> Result<CmdResult> {
    set_favorite(store, selectors, true)
}

pub fn unfavorite<S: PageStore>(store: &mut S, selectors: &[PageSelector]) -> Result<CmdResult> {
    set_favorite(store, selectors, false)
}

fn set_favorite<S: PageStore>(
    store: &mut S,
    selectors: &[PageSelector],
    is_favorite: bool,
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    let mut affected_ids: Vec<String> = Vec::new();
    for (display_index, id) in resolved {
        let mut page = store.get(&id)?;
        page.is_favorite = is_favorite;
        store.save(&page)?;

        let verb = if is_favorite { "favorited" } else { "unfavorited" };
        result.add_message(CmdMessage::success(format!(
            "Page {} ({}): {}",
            verb,
            super::helpers::fmt_path(&display_index),
            page.title
        )));
        affected_ids.push(id);
    }

    // Re-index: favorited pages are reported under their fN index,
    // unfavorited under their regular one
    let indexed = indexed_pages(store)?;
    for id in affected_ids {
        let wanted = |idx: &DisplayIndex| {
            if is_favorite {
                matches!(idx, DisplayIndex::Favorite(_))
            } else {
                matches!(idx, DisplayIndex::Regular(_))
            }
        };
        if let Some(dp) = super::helpers::find_page_by_id(&indexed, &id, wanted) {
            result.affected_pages.push(DisplayPage {
                page: dp.page.clone(),
                index: dp.index.clone(),
                children: Vec::new(),
            });
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, get};
    use crate::store::memory::InMemoryStore;

    fn regular(n: usize) -> PageSelector {
        PageSelector::Path(vec![DisplayIndex::Regular(n)])
    }

    #[test]
    fn favoriting_assigns_f_index() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, Some("A".into()), None).unwrap();
        create::run(&mut store, Some("B".into()), None).unwrap();

        let result = favorite(&mut store, &[regular(1)]).unwrap();
        assert_eq!(result.affected_pages.len(), 1);
        assert_eq!(result.affected_pages[0].index, DisplayIndex::Favorite(1));
        assert!(result.affected_pages[0].page.is_favorite);
    }

    #[test]
    fn unfavoriting_keeps_regular_index() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, Some("A".into()), None).unwrap();
        create::run(&mut store, Some("B".into()), None).unwrap();

        favorite(&mut store, &[regular(2)]).unwrap();
        let result = unfavorite(&mut store, &[regular(2)]).unwrap();

        // the regular index never moved
        assert_eq!(result.affected_pages[0].index, DisplayIndex::Regular(2));
        assert!(!result.affected_pages[0].page.is_favorite);
    }

    #[test]
    fn favoriting_keeps_updated_at() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, Some("A".into()), None).unwrap();
        let before = store.list().unwrap()[0].updated_at;

        favorite(&mut store, &[regular(1)]).unwrap();
        assert_eq!(store.list().unwrap()[0].updated_at, before);
    }

    #[test]
    fn favorite_appears_in_favorites_view() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, Some("Starred".into()), None).unwrap();
        favorite(&mut store, &[regular(1)]).unwrap();

        let listed = get::run(
            &store,
            get::PageFilter {
                status: get::PageStatusFilter::Favorites,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(listed.listed_pages.len(), 1);
        assert_eq!(listed.listed_pages[0].page.title, "Starred");
    }
}
