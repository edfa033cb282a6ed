//! # Command Layer
//!
//! This module contains the **core business logic** of lifeflow. Each
//! command lives in its own submodule and implements pure Rust functions
//! that operate on data types.
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Implement the actual logic for each operation
//! - Operate on `Page`, `Block`, and the other domain types
//! - Return structured `CmdResult` with affected pages and messages
//! - Are completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! Commands explicitly avoid:
//! - **Any I/O**: No stdout, stderr, formatting, or terminal concerns
//! - **Argument parsing**: That's the CLI layer's job
//! - **Exit codes**: Return `Result`, let the caller decide
//! - **User interaction**: No prompts or confirmations (return data, the
//!   UI decides)
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings. This struct carries:
//! - `affected_pages`: Pages that were modified (as `DisplayPage` with
//!   post-operation index)
//! - `listed_pages`: Pages to display (as `DisplayPage` with current index)
//! - `feed_items`: Feed items to display (for the feed commands)
//! - `messages`: Structured messages with levels (info, success, warning,
//!   error)
//!
//! The UI layer (CLI, web, etc.) then decides how to render this data.
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.**
//!
//! Command tests should:
//! - Use `InMemoryStore` to avoid network and filesystem dependencies
//! - Test all logic branches and edge cases
//! - Verify correct `CmdResult` contents
//! - Test error conditions
//!
//! ## Command Modules
//!
//! - [`create`]: Create new pages
//! - [`get`]: List and filter pages
//! - [`view`]: Retrieve full pages with their blocks
//! - [`update`]: Modify page title, icon, and cover image
//! - [`edit`]: Block operations inside a page
//! - [`trash`]: Move pages to the trash
//! - [`restore`]: Bring trashed pages back
//! - [`purge`]: Permanently remove trashed pages
//! - [`favorite`]: Star/unstar pages
//! - [`feed`]: Discover feed operations
//! - [`helpers`]: Shared utilities (index resolution, etc.)

use crate::feed::FeedItem;
use crate::index::DisplayPage;
use serde::Serialize;

pub mod create;
pub mod edit;
pub mod favorite;
pub mod feed;
pub mod get;
pub mod helpers;
pub mod purge;
pub mod restore;
pub mod trash;
pub mod update;
pub mod view;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_pages: Vec<DisplayPage>,
    pub listed_pages: Vec<DisplayPage>,
    pub feed_items: Vec<FeedItem>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_pages(mut self, pages: Vec<DisplayPage>) -> Self {
        self.affected_pages = pages;
        self
    }

    pub fn with_listed_pages(mut self, pages: Vec<DisplayPage>) -> Self {
        self.listed_pages = pages;
        self
    }

    pub fn with_feed_items(mut self, items: Vec<FeedItem>) -> Self {
        self.feed_items = items;
        self
    }
}
