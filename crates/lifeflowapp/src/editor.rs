//! # Block List Manager
//!
//! The editing core: every operation here is a pure function from a
//! [`Page`] to a new `Page` value — the input is never mutated, and the
//! caller hands the result onward to a [`crate::store::PageStore`]. No
//! operation returns an error: reference-not-found is a silent no-op (the
//! UI only ever offers ids it just rendered) and malformed block lists are
//! normalized at deserialization time.
//!
//! Invariants maintained:
//! - the block sequence is never empty in steady state
//!   ([`ensure_non_empty`] is the only transition out of the empty state);
//! - block ids are stable across edits and unique within a page;
//! - `updated_at` is refreshed by every operation that changes the blocks.

use crate::model::{Block, BlockKind, Page};

/// A partial update for one block. `None` fields are left untouched.
///
/// `checked` only takes effect on todo blocks (after `kind` is applied,
/// when both are present).
#[derive(Debug, Default, Clone)]
pub struct BlockPatch {
    pub kind: Option<BlockKind>,
    pub content: Option<String>,
    pub checked: Option<bool>,
}

impl BlockPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn checked(checked: bool) -> Self {
        Self {
            checked: Some(checked),
            ..Self::default()
        }
    }

    pub fn kind(kind: BlockKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }
}

/// Invariant repair: a page with zero blocks gets one fresh empty text
/// block. Idempotent — a non-empty page passes through unchanged, so this
/// can run on every load without looping.
pub fn ensure_non_empty(page: &Page) -> Page {
    if !page.blocks.is_empty() {
        return page.clone();
    }
    let mut next = page.clone();
    next.blocks.push(Block::new(BlockKind::Text));
    next.touch();
    next
}

/// Merges `patch` into the block with the matching id, leaving every other
/// block and the order untouched. A missing id leaves the blocks as-is
/// (the timestamp is still refreshed, matching the tolerance of the UI
/// layer this models).
pub fn update_block(page: &Page, block_id: &str, patch: BlockPatch) -> Page {
    let mut next = page.clone();
    if let Some(block) = next.blocks.iter_mut().find(|b| b.id == block_id) {
        if let Some(kind) = patch.kind {
            *block = block.converted(kind);
        }
        if let Some(content) = patch.content {
            block.set_content(content);
        }
        if let Some(checked) = patch.checked {
            if block.kind() == BlockKind::Todo {
                *block = Block {
                    id: block.id.clone(),
                    body: crate::model::BlockBody::Todo {
                        content: block.content().to_string(),
                        checked,
                    },
                };
            }
        }
    }
    next.touch();
    next
}

/// Changes only the discriminant of one block; content is preserved as-is
/// (no transformation between kinds is performed).
pub fn set_block_kind(page: &Page, block_id: &str, kind: BlockKind) -> Page {
    update_block(page, block_id, BlockPatch::kind(kind))
}

/// Removes the block with the matching id, preserving the relative order
/// of the rest. If removal empties the sequence, [`ensure_non_empty`]
/// heals it before the result is returned. A missing id is a no-op.
pub fn delete_block(page: &Page, block_id: &str) -> Page {
    let mut next = page.clone();
    next.blocks.retain(|b| b.id != block_id);
    if next.blocks.is_empty() {
        next.blocks.push(Block::new(BlockKind::Text));
    }
    next.touch();
    next
}

/// Splices a fresh empty block of `kind` immediately after the anchor
/// block, shifting the rest one position later. A missing anchor is a
/// strict no-op — inserting at an undefined position would corrupt the
/// document order.
pub fn insert_after(page: &Page, anchor_id: &str, kind: BlockKind) -> Page {
    let Some(index) = page.blocks.iter().position(|b| b.id == anchor_id) else {
        return page.clone();
    };
    let mut next = page.clone();
    next.blocks.insert(index + 1, Block::new(kind));
    next.touch();
    next
}

/// Moves the block at `source` to `destination` (a single-element list
/// move, not a swap). No-op when the destination is `None` (a cancelled
/// drag) or equal to the source. Indices outside the block range are
/// clamped — callers derive them from the same sequence being reordered,
/// so clamping never changes a well-behaved caller's result, and this
/// operation must not panic.
pub fn reorder(page: &Page, source: usize, destination: Option<usize>) -> Page {
    let Some(destination) = destination else {
        return page.clone();
    };
    if page.blocks.is_empty() {
        return page.clone();
    }
    let last = page.blocks.len() - 1;
    let source = source.min(last);
    let destination = destination.min(last);
    if source == destination {
        return page.clone();
    }

    let mut next = page.clone();
    let moved = next.blocks.remove(source);
    next.blocks.insert(destination, moved);
    next.touch();
    next
}
