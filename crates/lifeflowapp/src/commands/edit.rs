use crate::commands::{CmdMessage, CmdResult};
use crate::editor::{self, BlockPatch};
use crate::error::{LifeflowError, Result};
use crate::index::{DisplayPage, PageSelector};
use crate::model::BlockKind;
use crate::store::PageStore;

use super::helpers::{fmt_path, resolve_selectors};

/// One block operation, addressed by 1-based position within the page.
///
/// The CLI works with positions rather than block ids; positions are
/// resolved to ids against the page as loaded, then the id-based editor
/// functions do the work. This keeps multi-step semantics (self-heal,
/// insert-after, reorder) in one place.
#[derive(Debug, Clone)]
pub enum BlockOp {
    /// Replace the content of the block at `position`.
    Set { position: usize, content: String },
    /// Tick or untick the todo at `position`.
    Check { position: usize, checked: bool },
    /// Convert the block at `position` to another kind, keeping content.
    Convert { position: usize, kind: BlockKind },
    /// Insert a new block right after `position`.
    Insert {
        position: usize,
        kind: BlockKind,
        content: Option<String>,
    },
    /// Add a new block at the end of the page.
    Append {
        kind: BlockKind,
        content: Option<String>,
    },
    /// Remove the block at `position`.
    Delete { position: usize },
    /// Move the block at `from` to `to`.
    Move { from: usize, to: usize },
}

pub fn run<S: PageStore>(
    store: &mut S,
    selector: &PageSelector,
    op: BlockOp,
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, std::slice::from_ref(selector))?;
    let mut result = CmdResult::default();

    for (path, id) in resolved {
        let page = store.get(&id)?;
        // repair before addressing positions, so position 1 always exists
        let page = editor::ensure_non_empty(&page);

        let updated = apply(&page, &op)?;
        store.save(&updated)?;

        result.add_message(CmdMessage::success(format!(
            "Page edited ({}): {}",
            fmt_path(&path),
            updated.title
        )));
        let index = path.last().cloned().unwrap_or(crate::index::DisplayIndex::Regular(0));
        result.affected_pages.push(DisplayPage {
            page: updated,
            index,
            children: Vec::new(),
        });
    }

    Ok(result)
}

fn apply(page: &crate::model::Page, op: &BlockOp) -> Result<crate::model::Page> {
    match op {
        BlockOp::Set { position, content } => {
            let id = block_id_at(page, *position)?;
            Ok(editor::update_block(page, &id, BlockPatch::content(content.clone())))
        }
        BlockOp::Check { position, checked } => {
            let id = block_id_at(page, *position)?;
            let block = page.block(&id).ok_or_else(|| {
                LifeflowError::Api(format!("No block at position {}", position))
            })?;
            if block.kind() != BlockKind::Todo {
                return Err(LifeflowError::Api(format!(
                    "Block {} is a {} block, not a todo",
                    position,
                    block.kind()
                )));
            }
            Ok(editor::update_block(page, &id, BlockPatch::checked(*checked)))
        }
        BlockOp::Convert { position, kind } => {
            let id = block_id_at(page, *position)?;
            Ok(editor::set_block_kind(page, &id, *kind))
        }
        BlockOp::Insert {
            position,
            kind,
            content,
        } => {
            let anchor = block_id_at(page, *position)?;
            let inserted = editor::insert_after(page, &anchor, *kind);
            fill_new_block(inserted, *position, content.as_deref())
        }
        BlockOp::Append { kind, content } => {
            let position = page.blocks.len();
            let anchor = block_id_at(page, position)?;
            let inserted = editor::insert_after(page, &anchor, *kind);
            fill_new_block(inserted, position, content.as_deref())
        }
        BlockOp::Delete { position } => {
            let id = block_id_at(page, *position)?;
            Ok(editor::delete_block(page, &id))
        }
        BlockOp::Move { from, to } => {
            // validate both endpoints so typos fail loudly
            block_id_at(page, *from)?;
            block_id_at(page, *to)?;
            Ok(editor::reorder(page, from - 1, Some(to - 1)))
        }
    }
}

/// Fills content into the block just inserted after `anchor_position`.
fn fill_new_block(
    page: crate::model::Page,
    anchor_position: usize,
    content: Option<&str>,
) -> Result<crate::model::Page> {
    let Some(content) = content else {
        return Ok(page);
    };
    let new_id = block_id_at(&page, anchor_position + 1)?;
    Ok(editor::update_block(
        &page,
        &new_id,
        BlockPatch::content(content),
    ))
}

fn block_id_at(page: &crate::model::Page, position: usize) -> Result<String> {
    if position == 0 || position > page.blocks.len() {
        return Err(LifeflowError::Api(format!(
            "No block at position {} (page has {})",
            position,
            page.blocks.len()
        )));
    }
    Ok(page.blocks[position - 1].id.clone())
}
