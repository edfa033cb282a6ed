//! # Discover Feed
//!
//! A flat, read-mostly stream of published items (templates, blog posts,
//! workspace updates) shown newest first. The feed is independent of the
//! page store: items are not pages and carry no block content.

use crate::error::Result;
use crate::ids;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a feed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedKind {
    Template,
    Blog,
    // the server stores this one snake_case
    #[serde(rename = "workspace_update")]
    WorkspaceUpdate,
}

impl FeedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::Template => "template",
            FeedKind::Blog => "blog",
            FeedKind::WorkspaceUpdate => "workspace_update",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One published item in the discover feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FeedKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub author_avatar: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl FeedItem {
    pub fn new(kind: FeedKind, title: impl Into<String>) -> Self {
        Self {
            id: ids::generate(),
            kind,
            title: title.into(),
            description: String::new(),
            author_name: String::new(),
            author_avatar: String::new(),
            likes: 0,
            tags: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Abstract interface for the discover feed.
pub trait FeedStore {
    /// List every item, newest first.
    fn list_feed(&self) -> Result<Vec<FeedItem>>;

    /// Publish an item. Returns it as stored.
    fn publish(&mut self, item: &FeedItem) -> Result<FeedItem>;

    /// Increment the like counter of one item. A missing id returns
    /// `Ok(None)` rather than an error; likes are best-effort.
    fn like(&mut self, id: &str) -> Result<Option<FeedItem>>;
}

/// In-memory feed for tests. The feed is server-side only; the local
/// backend runs without one.
#[derive(Debug, Default)]
pub struct InMemoryFeed {
    items: Vec<FeedItem>,
}

impl InMemoryFeed {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeedStore for InMemoryFeed {
    fn list_feed(&self) -> Result<Vec<FeedItem>> {
        let mut items = self.items.clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    fn publish(&mut self, item: &FeedItem) -> Result<FeedItem> {
        self.items.push(item.clone());
        Ok(item.clone())
    }

    fn like(&mut self, id: &str) -> Result<Option<FeedItem>> {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.likes += 1;
                Ok(Some(item.clone()))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn item_at(title: &str, age_secs: i64) -> FeedItem {
        let mut item = FeedItem::new(FeedKind::Blog, title);
        item.created_at = Utc::now() - Duration::seconds(age_secs);
        item
    }

    #[test]
    fn list_is_newest_first() {
        let mut feed = InMemoryFeed::new();
        feed.publish(&item_at("old", 100)).unwrap();
        feed.publish(&item_at("new", 1)).unwrap();
        feed.publish(&item_at("middle", 50)).unwrap();

        let titles: Vec<_> = feed
            .list_feed()
            .unwrap()
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["new", "middle", "old"]);
    }

    #[test]
    fn like_increments_counter() {
        let mut feed = InMemoryFeed::new();
        let item = feed.publish(&FeedItem::new(FeedKind::Template, "T")).unwrap();

        let liked = feed.like(&item.id).unwrap().unwrap();
        assert_eq!(liked.likes, 1);
        let liked = feed.like(&item.id).unwrap().unwrap();
        assert_eq!(liked.likes, 2);
    }

    #[test]
    fn like_missing_id_is_none_not_error() {
        let mut feed = InMemoryFeed::new();
        assert!(feed.like("ghost").unwrap().is_none());
    }

    #[test]
    fn item_serializes_server_field_names() {
        let mut item = FeedItem::new(FeedKind::WorkspaceUpdate, "Release");
        item.author_name = "Sarah".into();
        item.author_avatar = "SC".into();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "workspace_update");
        assert_eq!(json["authorName"], "Sarah");
        assert_eq!(json["authorAvatar"], "SC");
        assert_eq!(json["likes"], 0);
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn item_deserializes_with_missing_optionals() {
        let raw = r#"{"id":"f1","type":"blog","title":"Hi","createdAt":"2024-01-01T00:00:00Z"}"#;
        let item: FeedItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.kind, FeedKind::Blog);
        assert_eq!(item.likes, 0);
        assert!(item.tags.is_empty());
        assert!(item.description.is_empty());
        assert!(item.author_name.is_empty());
        assert!(item.author_avatar.is_empty());
    }
}
