//! # Configuration
//!
//! Lifeflow configuration is managed by [`confique`], loading in priority
//! order:
//! 1. **Environment variables**: `LIFEFLOW_BACKEND`, `LIFEFLOW_DATA_DIR`,
//!    `LIFEFLOW_API_BASE_URL`, `LIFEFLOW_USER_ID`
//! 2. **Config file**: `lifeflow.toml` in the OS config directory (via the
//!    `directories` crate)
//! 3. **Compiled defaults**: via `#[config(default = ...)]`
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `backend` | `local` | `local` (JSON file) or `rest` (HTTP server) |
//! | `data_dir` | OS data dir | Where the local backend keeps its file |
//! | `api_base_url` | `http://localhost:8080/` | Server base URL for the rest backend |
//! | `user_id` | none | User scoping for the rest backend |

use crate::error::{LifeflowError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Which storage backend to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Local,
    Rest,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "local" => Ok(Backend::Local),
            "rest" => Ok(Backend::Rest),
            other => Err(format!("Unknown backend \"{}\" (use local or rest)", other)),
        }
    }
}

/// Configuration for lifeflow, stored in `lifeflow.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LifeflowConfig {
    /// Storage backend: "local" or "rest".
    #[config(default = "local", env = "LIFEFLOW_BACKEND")]
    pub backend: String,

    /// Directory for the local backend's page file. Defaults to the OS
    /// data directory.
    #[config(env = "LIFEFLOW_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the lifeflow server for the rest backend.
    #[config(default = "http://localhost:8080/", env = "LIFEFLOW_API_BASE_URL")]
    pub api_base_url: String,

    /// User id that scopes pages on the server.
    #[config(env = "LIFEFLOW_USER_ID")]
    pub user_id: Option<String>,
}

impl Default for LifeflowConfig {
    fn default() -> Self {
        Self {
            backend: "local".to_string(),
            data_dir: None,
            api_base_url: "http://localhost:8080/".to_string(),
            user_id: None,
        }
    }
}

impl LifeflowConfig {
    /// Loads configuration from the environment and the config file.
    pub fn load() -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = config_file() {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| LifeflowError::Store(format!("Failed to load configuration: {}", e)))
    }

    pub fn backend(&self) -> Result<Backend> {
        Backend::from_str(&self.backend).map_err(LifeflowError::Api)
    }

    /// Resolved data directory for the local backend.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| LifeflowError::Store("Cannot determine a data directory".to_string()))
    }

    /// User id for the rest backend, defaulting to the single-user id the
    /// server seeds.
    pub fn user_id(&self) -> String {
        self.user_id.clone().unwrap_or_else(|| "default".to_string())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "lifeflow")
}

fn config_file() -> Option<PathBuf> {
    let path = project_dirs()?.config_dir().join("lifeflow.toml");
    path.is_file().then_some(path)
}
