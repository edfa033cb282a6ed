use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LifeflowError, Result};
use crate::feed::{FeedItem, FeedKind, FeedStore};

/// Lists the discover feed, newest first.
pub fn list<F: FeedStore>(feed: &F) -> Result<CmdResult> {
    let items = feed.list_feed()?;
    let mut result = CmdResult::default().with_feed_items(items);
    if result.feed_items.is_empty() {
        result.add_message(CmdMessage::info("The feed is empty."));
    }
    Ok(result)
}

/// Publishes a new item to the feed.
pub fn publish<F: FeedStore>(
    feed: &mut F,
    kind: FeedKind,
    title: String,
    description: Option<String>,
    author: Option<String>,
    tags: Vec<String>,
) -> Result<CmdResult> {
    let mut item = FeedItem::new(kind, title);
    if let Some(description) = description {
        item.description = description;
    }
    if let Some(author) = author {
        item.author_name = author;
    }
    item.tags = tags;

    let stored = feed.publish(&item)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Published to the feed: {}",
        stored.title
    )));
    result.feed_items.push(stored);
    Ok(result)
}

/// Likes the feed item at the given 1-based position, as printed by
/// [`list`].
pub fn like<F: FeedStore>(feed: &mut F, position: usize) -> Result<CmdResult> {
    let items = feed.list_feed()?;
    if position == 0 || position > items.len() {
        return Err(LifeflowError::Api(format!(
            "No feed item at position {} (feed has {})",
            position,
            items.len()
        )));
    }
    let target = &items[position - 1];

    let mut result = CmdResult::default();
    match feed.like(&target.id)? {
        Some(item) => {
            result.add_message(CmdMessage::success(format!(
                "Liked \"{}\" ({} likes)",
                item.title, item.likes
            )));
            result.feed_items.push(item);
        }
        None => {
            // raced with a removal on the server; nothing to apply
            result.add_message(CmdMessage::warning(format!(
                "\"{}\" is no longer in the feed",
                target.title
            )));
        }
    }
    Ok(result)
}
