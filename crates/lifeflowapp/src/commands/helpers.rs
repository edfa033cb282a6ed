use crate::error::{LifeflowError, Result};
use crate::index::{index_pages, DisplayIndex, DisplayPage, PageSelector};
use crate::store::PageStore;

pub fn indexed_pages<S: PageStore>(store: &S) -> Result<Vec<DisplayPage>> {
    let pages = store.list()?;
    Ok(index_pages(pages))
}

/// Resolves user selectors (index paths or title terms) to page ids.
///
/// Title terms match case-insensitively against page titles; the term must
/// match exactly one page or the resolution fails with an `Api` error that
/// asks the user to be more specific.
pub fn resolve_selectors<S: PageStore>(
    store: &S,
    selectors: &[PageSelector],
) -> Result<Vec<(Vec<DisplayIndex>, String)>> {
    let root_pages = indexed_pages(store)?;
    let linearized = linearize_tree(&root_pages);

    let mut results = Vec::new();

    for selector in selectors {
        match selector {
            PageSelector::Path(path) => {
                if let Some((_, dp)) = find_in_linearized(&linearized, path) {
                    results.push((path.clone(), dp.page.id.clone()));
                } else {
                    return Err(LifeflowError::Api(format!(
                        "Index {} not found",
                        fmt_path(path)
                    )));
                }
            }
            PageSelector::Title(term) => {
                let term_lower = term.to_lowercase();
                // favorites are indexed twice; keep one entry per page id
                let mut seen_ids = std::collections::HashSet::new();
                let matches: Vec<&(Vec<DisplayIndex>, &DisplayPage)> = linearized
                    .iter()
                    .filter(|(_, dp)| dp.page.title.to_lowercase().contains(&term_lower))
                    .filter(|(_, dp)| seen_ids.insert(dp.page.id.clone()))
                    .collect();

                match matches.len() {
                    0 => {
                        return Err(LifeflowError::Api(format!(
                            "No page found matching \"{}\"",
                            term
                        )))
                    }
                    1 => {
                        let (path, dp) = matches[0];
                        results.push((path.clone(), dp.page.id.clone()));
                    }
                    n => {
                        return Err(LifeflowError::Api(format!(
                            "Term \"{}\" matches {} pages. Please be more specific.",
                            term, n
                        )))
                    }
                }
            }
        }
    }

    Ok(results)
}

fn linearize_tree(roots: &[DisplayPage]) -> Vec<(Vec<DisplayIndex>, &DisplayPage)> {
    let mut result = Vec::new();
    for page in roots {
        linearize_recursive(page, Vec::new(), &mut result);
    }
    result
}

fn linearize_recursive<'a>(
    page: &'a DisplayPage,
    parent_path: Vec<DisplayIndex>,
    result: &mut Vec<(Vec<DisplayIndex>, &'a DisplayPage)>,
) {
    let mut current_path = parent_path;
    current_path.push(page.index.clone());

    result.push((current_path.clone(), page));

    for child in &page.children {
        linearize_recursive(child, current_path.clone(), result);
    }
}

fn find_in_linearized<'a>(
    linearized: &'a [(Vec<DisplayIndex>, &'a DisplayPage)],
    path: &[DisplayIndex],
) -> Option<&'a (Vec<DisplayIndex>, &'a DisplayPage)> {
    linearized.iter().find(|(p, _)| p == path)
}

pub fn fmt_path(path: &[DisplayIndex]) -> String {
    let s: Vec<String> = path.iter().map(|idx| idx.to_string()).collect();
    s.join(".")
}

/// Collects the ids of every descendant of the target pages, depth first.
pub fn get_descendant_ids<S: PageStore>(store: &S, target_ids: &[String]) -> Result<Vec<String>> {
    let all_pages = store.list()?;
    let roots = index_pages(all_pages);
    let mut descendants = Vec::new();

    for target in target_ids {
        if let Some(node) = find_node_by_id(&roots, target) {
            collect_subtree_ids(node, &mut descendants);
        }
    }
    Ok(descendants)
}

fn find_node_by_id<'a>(pages: &'a [DisplayPage], id: &str) -> Option<&'a DisplayPage> {
    for dp in pages {
        if dp.page.id == id {
            return Some(dp);
        }
        if let Some(found) = find_node_by_id(&dp.children, id) {
            return Some(found);
        }
    }
    None
}

fn collect_subtree_ids(dp: &DisplayPage, ids: &mut Vec<String>) {
    for child in &dp.children {
        ids.push(child.page.id.clone());
        collect_subtree_ids(child, ids);
    }
}

/// Finds a page in the tree by id, filtered by index type.
///
/// Common patterns:
/// - `|_| true` - find any entry with a matching id
/// - `|idx| matches!(idx, DisplayIndex::Regular(_))` - skip the duplicate
///   favorite entry
pub fn find_page_by_id<'a, F>(
    pages: &'a [DisplayPage],
    id: &str,
    index_filter: F,
) -> Option<&'a DisplayPage>
where
    F: Fn(&DisplayIndex) -> bool + Copy,
{
    for dp in pages {
        if dp.page.id == id && index_filter(&dp.index) {
            return Some(dp);
        }
        if let Some(found) = find_page_by_id(&dp.children, id, index_filter) {
            return Some(found);
        }
    }
    None
}
