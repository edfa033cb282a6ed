//! # Domain Model: Pages and Blocks
//!
//! A [`Page`] is a document: metadata (title, icon, cover, hierarchy link)
//! plus an ordered sequence of [`Block`]s. The block order *is* the document
//! order.
//!
//! ## Blocks as tagged variants
//!
//! Block content is heterogeneous: plain text, headings, list items, todos,
//! quotes, images. The wire format is a flat object with a `type`
//! discriminant:
//!
//! ```json
//! { "id": "…", "type": "todo", "content": "Ship it", "checked": false }
//! ```
//!
//! Internally that maps to [`BlockBody`], an enum where `checked` exists
//! only on the `todo` variant — a heading with a checkbox state is simply
//! unrepresentable. [`BlockKind`] is the fieldless mirror of the
//! discriminant, used for type-change operations and CLI parsing.
//!
//! ## Normalization on load
//!
//! Storage may hand us malformed pages: a missing or `null` `blocks` field,
//! an empty title, absent flags. `Page`'s hand-written `Deserialize`
//! normalizes all of that silently (empty block list, `"Untitled"`,
//! `false`) rather than surfacing an error — the editor's
//! ensure-non-empty repair handles the rest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;

/// Title used whenever a page is created or renamed without one.
pub const UNTITLED: &str = "Untitled";

/// Icon assigned to freshly created pages.
pub const DEFAULT_ICON: &str = "📄";

/// The closed set of block discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    Text,
    Heading1,
    Heading2,
    BulletList,
    Todo,
    Quote,
    Image,
}

impl BlockKind {
    /// The wire name of the discriminant (`"bulletList"`, `"todo"`, …).
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Heading1 => "heading1",
            BlockKind::Heading2 => "heading2",
            BlockKind::BulletList => "bulletList",
            BlockKind::Todo => "todo",
            BlockKind::Quote => "quote",
            BlockKind::Image => "image",
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The typed payload of a block. `content` is interpreted per variant
/// (plain text for most, an URL for `image`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockBody {
    Text {
        content: String,
    },
    Heading1 {
        content: String,
    },
    Heading2 {
        content: String,
    },
    BulletList {
        content: String,
    },
    Todo {
        content: String,
        #[serde(default)]
        checked: bool,
    },
    Quote {
        content: String,
    },
    Image {
        content: String,
    },
}

impl BlockBody {
    fn build(kind: BlockKind, content: String, checked: bool) -> Self {
        match kind {
            BlockKind::Text => BlockBody::Text { content },
            BlockKind::Heading1 => BlockBody::Heading1 { content },
            BlockKind::Heading2 => BlockBody::Heading2 { content },
            BlockKind::BulletList => BlockBody::BulletList { content },
            BlockKind::Todo => BlockBody::Todo { content, checked },
            BlockKind::Quote => BlockBody::Quote { content },
            BlockKind::Image => BlockBody::Image { content },
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            BlockBody::Text { .. } => BlockKind::Text,
            BlockBody::Heading1 { .. } => BlockKind::Heading1,
            BlockBody::Heading2 { .. } => BlockKind::Heading2,
            BlockBody::BulletList { .. } => BlockKind::BulletList,
            BlockBody::Todo { .. } => BlockKind::Todo,
            BlockBody::Quote { .. } => BlockKind::Quote,
            BlockBody::Image { .. } => BlockKind::Image,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            BlockBody::Text { content }
            | BlockBody::Heading1 { content }
            | BlockBody::Heading2 { content }
            | BlockBody::BulletList { content }
            | BlockBody::Todo { content, .. }
            | BlockBody::Quote { content }
            | BlockBody::Image { content } => content,
        }
    }
}

/// One atomic content unit within a page.
///
/// The id is assigned at creation and stable for the block's lifetime;
/// every editing operation that "changes" a block produces a new value
/// with the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(flatten)]
    pub body: BlockBody,
}

impl Block {
    /// A fresh, empty block of the given kind with a newly generated id.
    pub fn new(kind: BlockKind) -> Self {
        Self::with_content(kind, String::new())
    }

    pub fn with_content(kind: BlockKind, content: String) -> Self {
        Self {
            id: ids::generate(),
            body: BlockBody::build(kind, content, false),
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.body.kind()
    }

    pub fn content(&self) -> &str {
        self.body.content()
    }

    pub fn set_content(&mut self, content: String) {
        self.body = BlockBody::build(self.kind(), content, self.checked().unwrap_or(false));
    }

    /// `Some(flag)` for todo blocks, `None` for every other kind.
    pub fn checked(&self) -> Option<bool> {
        match &self.body {
            BlockBody::Todo { checked, .. } => Some(*checked),
            _ => None,
        }
    }

    /// Replaces the discriminant, keeping the id and the content.
    ///
    /// The `checked` flag survives only a todo→todo conversion; in every
    /// other variant the flag has no home and is dropped. Converting back
    /// to todo starts unchecked.
    pub fn converted(&self, kind: BlockKind) -> Block {
        let checked = if self.kind() == BlockKind::Todo && kind == BlockKind::Todo {
            self.checked().unwrap_or(false)
        } else {
            false
        };
        Block {
            id: self.id.clone(),
            body: BlockBody::build(kind, self.content().to_string(), checked),
        }
    }
}

/// A document: an ordered block sequence plus metadata.
///
/// A page exclusively owns its blocks. `parent_id` is a weak relation used
/// for sidebar nesting only — deleting a parent does not cascade.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub blocks: Vec<Block>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub is_favorite: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

// Hand-written deserializer so malformed pages from storage are normalized
// instead of rejected: absent/null blocks become an empty sequence, an
// empty title becomes "Untitled", missing flags default to false and
// missing timestamps to now.
impl<'de> Deserialize<'de> for Page {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = PageHelper::deserialize(deserializer)?;
        let now = Utc::now();

        Ok(Page {
            id: helper.id,
            title: normalize_title(helper.title),
            icon: helper.icon.unwrap_or_default(),
            cover_image: helper.cover_image,
            blocks: helper.blocks.unwrap_or_default(),
            parent_id: helper.parent_id,
            is_favorite: helper.is_favorite,
            is_deleted: helper.is_deleted,
            created_at: helper.created_at.unwrap_or(now),
            updated_at: helper.updated_at.unwrap_or(now),
            deleted_at: helper.deleted_at,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageHelper {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    cover_image: Option<String>,
    #[serde(default)]
    blocks: Option<Vec<Block>>,
    #[serde(default)]
    parent_id: Option<String>,
    #[serde(default)]
    is_favorite: bool,
    #[serde(default)]
    is_deleted: bool,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    deleted_at: Option<DateTime<Utc>>,
}

/// Empty or whitespace-only titles collapse to [`UNTITLED`].
pub fn normalize_title(title: Option<String>) -> String {
    match title {
        Some(t) if !t.trim().is_empty() => t,
        _ => UNTITLED.to_string(),
    }
}

impl Page {
    /// A new page with one seed empty text block, so the editor never
    /// opens on an empty document.
    pub fn new(title: Option<String>, parent_id: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ids::generate(),
            title: normalize_title(title),
            icon: DEFAULT_ICON.to_string(),
            cover_image: None,
            blocks: vec![Block::new(BlockKind::Text)],
            parent_id,
            is_favorite: false,
            is_deleted: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Refreshes `updated_at`. Called by every mutation that changes the
    /// title, icon, cover, or blocks.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Looks up a block by id.
    pub fn block(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == block_id)
    }
}
