use super::{PageStore, SaveStamp, WriteLedger};
use crate::error::{LifeflowError, Result};
use crate::feed::{FeedItem, FeedStore};
use crate::model::Page;
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

const DEFAULT_API_BASE: &str = "http://localhost:8080/";

/// HTTP page store against the lifeflow server API.
///
/// The server persists pages per user with the block list embedded as a
/// JSON string column, so [`WirePage`] translates between the canonical
/// [`Page`] shape and the server row on every call. One `RestStore` value
/// serves both the page API and the discover feed; clones share the HTTP
/// client and the write ledger.
///
/// Two server-side contract limits: the wire carries no version field, so
/// write ordering holds within this process only and the server keeps
/// whatever save arrives last; and the page listing returns only
/// non-deleted rows, so trashed pages drop out of [`PageStore::list`] on
/// this backend.
#[derive(Clone)]
pub struct RestStore {
    http: Client,
    base_url: Url,
    user_id: String,
    ledger: Rc<WriteLedger>,
}

impl fmt::Debug for RestStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestStore")
            .field("base_url", &self.base_url)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

impl RestStore {
    pub fn new(user_id: String) -> Result<Self> {
        let base_url = Url::parse(DEFAULT_API_BASE)
            .map_err(|e| LifeflowError::Api(format!("invalid default API URL: {}", e)))?;
        Self::with_base_url(user_id, base_url)
    }

    /// Builds a store from a configuration string, e.g.
    /// `http://localhost:8080/`.
    pub fn from_url_str(user_id: String, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| LifeflowError::Api(format!("invalid API URL {}: {}", base_url, e)))?;
        Self::with_base_url(user_id, base_url)
    }

    pub fn with_base_url(user_id: String, base_url: Url) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("lifeflow/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(LifeflowError::Http)?;
        Ok(Self {
            http,
            base_url,
            user_id,
            ledger: Rc::new(WriteLedger::new()),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| LifeflowError::Api(format!("invalid API URL {}: {}", path, e)))
    }

    fn check(&self, res: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LifeflowError::PageNotFound(res.url().path().to_string()));
        }
        if !status.is_success() {
            let body = res.text().unwrap_or_default();
            return Err(LifeflowError::Api(format!("server error {}: {}", status, body)));
        }
        Ok(res)
    }
}

impl PageStore for RestStore {
    fn list(&self) -> Result<Vec<Page>> {
        let mut url = self.endpoint("api/pages")?;
        url.query_pairs_mut().append_pair("userId", &self.user_id);
        debug!(url = %url, "listing pages");

        let res = self.http.get(url).send().map_err(LifeflowError::Http)?;
        let rows: Vec<WirePage> = self.check(res)?.json().map_err(LifeflowError::Http)?;
        Ok(rows.into_iter().map(WirePage::into_page).collect())
    }

    fn get(&self, id: &str) -> Result<Page> {
        // The server exposes only the per-user collection.
        self.list()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| LifeflowError::PageNotFound(id.to_string()))
    }

    fn save(&mut self, page: &Page) -> Result<()> {
        if !self.ledger.admit(&page.id, SaveStamp::next()) {
            debug!(page_id = %page.id, "dropping stale save");
            return Ok(());
        }
        let url = self.endpoint("api/pages")?;
        let wire = WirePage::from_page(page, &self.user_id)?;
        debug!(url = %url, page_id = %page.id, "saving page");

        let res = self
            .http
            .post(url)
            .json(&wire)
            .send()
            .map_err(LifeflowError::Http)?;
        self.check(res)?;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let url = self.endpoint(&format!("api/pages/{}", id))?;
        debug!(url = %url, "deleting page");

        let res = self.http.delete(url).send().map_err(LifeflowError::Http)?;
        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LifeflowError::PageNotFound(id.to_string()));
        }
        self.check(res)?;
        self.ledger.forget(id);
        Ok(())
    }
}

impl FeedStore for RestStore {
    fn list_feed(&self) -> Result<Vec<FeedItem>> {
        let url = self.endpoint("api/feed")?;
        let res = self.http.get(url).send().map_err(LifeflowError::Http)?;
        let mut items: Vec<FeedItem> = self.check(res)?.json().map_err(LifeflowError::Http)?;
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    fn publish(&mut self, item: &FeedItem) -> Result<FeedItem> {
        let url = self.endpoint("api/feed")?;
        let res = self
            .http
            .post(url)
            .json(item)
            .send()
            .map_err(LifeflowError::Http)?;
        self.check(res)?.json().map_err(LifeflowError::Http)
    }

    fn like(&mut self, id: &str) -> Result<Option<FeedItem>> {
        let url = self.endpoint(&format!("api/feed/{}/like", id))?;
        let res = self
            .http
            .post(url)
            .json(&json!({}))
            .send()
            .map_err(LifeflowError::Http)?;
        // the like endpoint answers with an empty body; 404 means the
        // item is gone
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.check(res)?;
        Ok(self.list_feed()?.into_iter().find(|i| i.id == id))
    }
}

/// Server row for a page. The block list travels as a JSON string in
/// `blocksJson`, and the boolean flags use the server's shorter names.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePage {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub blocks_json: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl WirePage {
    pub fn from_page(page: &Page, user_id: &str) -> Result<Self> {
        let blocks_json = serde_json::to_string(&page.blocks).map_err(LifeflowError::Serialization)?;
        Ok(Self {
            id: page.id.clone(),
            title: page.title.clone(),
            icon: Some(page.icon.clone()),
            cover_image: page.cover_image.clone(),
            blocks_json: Some(blocks_json),
            parent_id: page.parent_id.clone(),
            user_id: Some(user_id.to_string()),
            favorite: page.is_favorite,
            deleted: page.is_deleted,
            created_at: Some(page.created_at),
            updated_at: Some(page.updated_at),
            deleted_at: page.deleted_at,
        })
    }

    pub fn into_page(self) -> Page {
        let blocks = match self.blocks_json.as_deref() {
            None | Some("") => Vec::new(),
            Some(raw) => match serde_json::from_str(raw) {
                Ok(blocks) => blocks,
                Err(e) => {
                    warn!(page_id = %self.id, error = %e, "unreadable blocksJson, starting empty");
                    Vec::new()
                }
            },
        };
        let now = Utc::now();
        Page {
            id: self.id,
            title: crate::model::normalize_title(Some(self.title)),
            icon: self.icon.unwrap_or_else(|| crate::model::DEFAULT_ICON.to_string()),
            cover_image: self.cover_image,
            blocks,
            parent_id: self.parent_id,
            is_favorite: self.favorite,
            is_deleted: self.deleted,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
            deleted_at: self.deleted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, BlockKind};
    use std::io::{Read as _, Write as _};
    use std::net::TcpListener;

    fn store() -> RestStore {
        RestStore::new("user-1".into()).unwrap()
    }

    /// Answers one connection per canned `(status, body)` response, in
    /// order, then stops. Returns the base URL to point a store at.
    fn stub_server(responses: Vec<(u16, String)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().unwrap();
                read_request(&mut socket);
                let reason = match status {
                    200 => "OK",
                    404 => "Not Found",
                    _ => "Error",
                };
                let reply = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                socket.write_all(reply.as_bytes()).unwrap();
            }
        });
        format!("http://{}/", addr)
    }

    fn read_request(socket: &mut std::net::TcpStream) {
        let mut buf = vec![0u8; 8192];
        let mut filled = 0;
        let header_end = loop {
            let n = socket.read(&mut buf[filled..]).unwrap();
            filled += n;
            if let Some(pos) = buf[..filled].windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            if n == 0 {
                return;
            }
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
        let body_len = headers
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while filled < header_end + body_len {
            let n = socket.read(&mut buf[filled..]).unwrap();
            if n == 0 {
                return;
            }
            filled += n;
        }
    }

    #[test]
    fn endpoints_join_against_base() {
        let store = store();
        assert_eq!(
            store.endpoint("api/pages").unwrap().as_str(),
            "http://localhost:8080/api/pages"
        );
        assert_eq!(
            store.endpoint("api/feed/f1/like").unwrap().as_str(),
            "http://localhost:8080/api/feed/f1/like"
        );
    }

    #[test]
    fn custom_base_url_keeps_path_prefix() {
        let base = Url::parse("https://notes.example.com/lifeflow/").unwrap();
        let store = RestStore::with_base_url("u".into(), base).unwrap();
        assert_eq!(
            store.endpoint("api/pages").unwrap().as_str(),
            "https://notes.example.com/lifeflow/api/pages"
        );
    }

    #[test]
    fn like_accepts_empty_success_body() {
        let feed_json = r#"[{"id":"item-1","type":"blog","title":"Hi","likes":3,"createdAt":"2024-01-01T00:00:00Z"}]"#;
        let base = stub_server(vec![(200, String::new()), (200, feed_json.into())]);
        let mut store = RestStore::from_url_str("u".into(), &base).unwrap();

        let liked = store.like("item-1").unwrap().unwrap();
        assert_eq!(liked.title, "Hi");
        assert_eq!(liked.likes, 3);
    }

    #[test]
    fn like_missing_item_is_none() {
        let base = stub_server(vec![(404, String::new())]);
        let mut store = RestStore::from_url_str("u".into(), &base).unwrap();

        assert!(store.like("ghost").unwrap().is_none());
    }

    #[test]
    fn wire_page_round_trips_blocks_as_json_string() {
        let mut page = Page::new(Some("Note".into()), Some("parent-1".into()));
        page.blocks = vec![Block::with_content(BlockKind::Heading1, "Title".into())];
        page.is_favorite = true;

        let wire = WirePage::from_page(&page, "user-1").unwrap();
        assert_eq!(wire.user_id.as_deref(), Some("user-1"));
        assert!(wire.favorite);
        assert!(!wire.deleted);
        let raw = wire.blocks_json.clone().unwrap();
        assert!(raw.contains("\"type\":\"heading1\""));

        let back = wire.into_page();
        assert_eq!(back, page);
    }

    #[test]
    fn wire_page_serializes_server_field_names() {
        let page = Page::new(None, None);
        let wire = WirePage::from_page(&page, "u").unwrap();
        let json = serde_json::to_value(&wire).unwrap();

        assert!(json.get("blocksJson").is_some());
        assert!(json.get("favorite").is_some());
        assert!(json.get("deleted").is_some());
        assert!(json.get("userId").is_some());
        assert!(json.get("isFavorite").is_none());
        assert!(json.get("blocks").is_none());
    }

    #[test]
    fn malformed_blocks_json_falls_back_to_empty() {
        let wire = WirePage {
            id: "p1".into(),
            title: "T".into(),
            icon: None,
            cover_image: None,
            blocks_json: Some("{not json".into()),
            parent_id: None,
            user_id: None,
            favorite: false,
            deleted: false,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        };
        let page = wire.into_page();
        assert!(page.blocks.is_empty());
        assert_eq!(page.icon, "📄");
    }

    #[test]
    fn missing_blocks_json_falls_back_to_empty() {
        let raw = r#"{"id":"p1","title":"Server Page","favorite":true}"#;
        let wire: WirePage = serde_json::from_str(raw).unwrap();
        let page = wire.into_page();

        assert!(page.blocks.is_empty());
        assert!(page.is_favorite);
        assert_eq!(page.title, "Server Page");
    }
}
