use super::{PageStore, SaveStamp, WriteLedger};
use crate::error::{LifeflowError, Result};
use crate::model::Page;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// The collection file holding every page as one JSON array.
pub const PAGES_FILE: &str = "lifeflow-pages.json";

/// File-backed page store.
///
/// The whole page collection lives in a single `lifeflow-pages.json` under
/// the data directory, read in full on every operation and written back
/// atomically (tmp file plus rename). Pages that fail to deserialize
/// cleanly are normalized on load, never rejected, so a partially written
/// or hand-edited file does not lock the user out of their notes.
pub struct LocalStore {
    root: PathBuf,
    ledger: WriteLedger,
}

impl LocalStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ledger: WriteLedger::new(),
        }
    }

    pub fn pages_path(&self) -> PathBuf {
        self.root.join(PAGES_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(LifeflowError::Io)?;
        }
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Page>> {
        let path = self.pages_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path).map_err(LifeflowError::Io)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let pages: Vec<Page> =
            serde_json::from_str(&content).map_err(LifeflowError::Serialization)?;
        Ok(pages)
    }

    fn write_all(&self, pages: &[Page]) -> Result<()> {
        self.ensure_dir()?;

        let content = serde_json::to_string_pretty(pages).map_err(LifeflowError::Serialization)?;

        // Atomic write
        let tmp_path = self.root.join(format!(".pages-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(LifeflowError::Io)?;
        fs::rename(&tmp_path, self.pages_path()).map_err(LifeflowError::Io)?;

        Ok(())
    }
}

impl PageStore for LocalStore {
    fn list(&self) -> Result<Vec<Page>> {
        self.load_all()
    }

    fn get(&self, id: &str) -> Result<Page> {
        self.load_all()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| LifeflowError::PageNotFound(id.to_string()))
    }

    fn save(&mut self, page: &Page) -> Result<()> {
        if !self.ledger.admit(&page.id, SaveStamp::next()) {
            return Ok(());
        }
        let mut pages = self.load_all()?;
        match pages.iter_mut().find(|p| p.id == page.id) {
            Some(existing) => *existing = page.clone(),
            None => pages.push(page.clone()),
        }
        self.write_all(&pages)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let mut pages = self.load_all()?;
        let before = pages.len();
        pages.retain(|p| p.id != id);
        if pages.len() == before {
            return Err(LifeflowError::PageNotFound(id.to_string()));
        }
        self.write_all(&pages)?;
        self.ledger.forget(id);
        Ok(())
    }
}

/// Returns true when `path` looks like a lifeflow data directory.
pub fn is_data_dir(path: &Path) -> bool {
    path.join(PAGES_FILE).is_file()
}
