use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LifeflowError, Result};
use crate::index::{DisplayIndex, DisplayPage, PageSelector};
use crate::store::PageStore;

use super::helpers::{get_descendant_ids, indexed_pages, resolve_selectors};

/// Preview of what a purge would delete. The CLI shows this for
/// confirmation before calling [`run`].
#[derive(Debug)]
pub struct PurgePreview {
    pub targets: Vec<DisplayPage>,
    pub descendant_count: usize,
}

/// Returns what would be purged, without deleting anything.
///
/// - With empty `selectors`, targets every trashed page.
/// - Targets that are not in the trash are rejected; purge never skips
///   the trash stage.
pub fn preview<S: PageStore>(store: &S, selectors: &[PageSelector]) -> Result<PurgePreview> {
    let targets = if selectors.is_empty() {
        indexed_pages(store)?
            .into_iter()
            .filter(|dp| matches!(dp.index, DisplayIndex::Trashed(_)))
            .collect()
    } else {
        let resolved = resolve_selectors(store, selectors)?;
        let mut targets = Vec::new();
        for (path, id) in resolved {
            let page = store.get(&id)?;
            if !page.is_deleted {
                return Err(LifeflowError::Api(format!(
                    "Page \"{}\" is not in the trash. Trash it first.",
                    page.title
                )));
            }
            targets.push(DisplayPage {
                page,
                index: path
                    .last()
                    .cloned()
                    .unwrap_or(DisplayIndex::Trashed(0)),
                children: Vec::new(),
            });
        }
        targets
    };

    let target_ids: Vec<String> = targets.iter().map(|dp| dp.page.id.clone()).collect();
    let descendants = get_descendant_ids(store, &target_ids)?;

    Ok(PurgePreview {
        targets,
        descendant_count: descendants.len(),
    })
}

/// Permanently removes trashed pages and their descendants.
///
/// **Important**: This function does NOT prompt for confirmation. The CLI
/// layer should call [`preview`] first, confirm with the user, and then
/// call this function.
pub fn run<S: PageStore>(store: &mut S, selectors: &[PageSelector]) -> Result<CmdResult> {
    let preview = preview(store, selectors)?;

    if preview.targets.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("Trash is empty."));
        return Ok(res);
    }

    let target_ids: Vec<String> = preview.targets.iter().map(|dp| dp.page.id.clone()).collect();
    let descendants = get_descendant_ids(store, &target_ids)?;

    let mut all_ids = target_ids;
    all_ids.extend(descendants.clone());
    all_ids.sort();
    all_ids.dedup();

    let mut result = CmdResult::default();
    for id in all_ids {
        if store.get(&id).is_ok() {
            store.delete(&id)?;
        }
    }

    for dp in preview.targets {
        result.add_message(CmdMessage::success(format!(
            "Purged: {} {}",
            dp.index, dp.page.title
        )));
    }
    if !descendants.is_empty() {
        result.add_message(CmdMessage::success(format!(
            "And purged {} nested page(s)",
            descendants.len()
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, trash};
    use crate::model::Page;
    use crate::store::memory::InMemoryStore;

    fn regular(n: usize) -> PageSelector {
        PageSelector::Path(vec![DisplayIndex::Regular(n)])
    }

    fn trashed(n: usize) -> PageSelector {
        PageSelector::Path(vec![DisplayIndex::Trashed(n)])
    }

    #[test]
    fn purges_trashed_page_permanently() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, Some("Gone".into()), None).unwrap();
        trash::run(&mut store, &[regular(1)]).unwrap();

        run(&mut store, &[trashed(1)]).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn purge_refuses_active_page() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, Some("Alive".into()), None).unwrap();

        match run(&mut store, &[regular(1)]) {
            Err(LifeflowError::Api(msg)) => assert!(msg.contains("not in the trash")),
            _ => panic!("Expected Api error"),
        }
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn empty_selectors_purge_all_trash() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, Some("Keep".into()), None).unwrap();
        create::run(&mut store, Some("Drop 1".into()), None).unwrap();
        create::run(&mut store, Some("Drop 2".into()), None).unwrap();
        trash::run(&mut store, &[regular(1), regular(2)]).unwrap();

        run(&mut store, &[]).unwrap();

        let remaining = store.list().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "Keep");
    }

    #[test]
    fn purge_removes_descendants() {
        let mut store = InMemoryStore::new();
        let parent = Page::new(Some("Parent".into()), None);
        let child = Page::new(Some("Child".into()), Some(parent.id.clone()));
        store.save(&parent).unwrap();
        store.save(&child).unwrap();

        trash::run(&mut store, &[regular(1)]).unwrap();
        let result = run(&mut store, &[trashed(1)]).unwrap();

        assert!(store.list().unwrap().is_empty());
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.contains("1 nested page")));
    }

    #[test]
    fn purge_on_empty_trash_reports_info() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, &[]).unwrap();
        assert!(result.messages[0].content.contains("Trash is empty"));
    }
}
