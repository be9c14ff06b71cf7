//! mdwiki: a small personal wiki server
//!
//! Pages are Markdown files in a single directory. They are viewed, edited
//! and saved over HTTP, and a search route scans every page on each query.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod search;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use error::{WikiError, WikiResult};

/// A wiki rooted at a base directory
#[derive(Debug, Clone)]
pub struct Wiki {
    /// Wiki configuration
    pub config: config::WikiConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding `<title>.md` page files
    pub pages_dir: PathBuf,
    /// Directory holding the HTML templates
    pub templates_dir: PathBuf,
    /// Directory served for paths that match no route
    pub public_dir: PathBuf,
}

impl Wiki {
    /// Open the wiki in `base_dir`, reading `wiki.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(config::CONFIG_FILE);

        let config = if config_path.exists() {
            config::WikiConfig::load(&config_path)?
        } else {
            config::WikiConfig::default()
        };

        let pages_dir = base_dir.join(&config.pages_dir);
        let templates_dir = base_dir.join(&config.templates_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            pages_dir,
            templates_dir,
            public_dir,
        })
    }

    pub fn store(&self) -> content::PageStore {
        content::PageStore::new(&self.pages_dir)
    }

    pub fn index(&self) -> search::SearchIndex {
        search::SearchIndex::new(&self.pages_dir)
    }
}
