//! Wiki configuration (wiki.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{WikiError, WikiResult};

/// Name of the configuration file inside a wiki's base directory
pub const CONFIG_FILE: &str = "wiki.yml";

/// Main wiki configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    /// Name shown in page headers
    pub title: String,
    /// Page that `/` redirects to
    pub front_page: String,

    // Directories, relative to the base directory
    pub pages_dir: String,
    pub templates_dir: String,
    pub public_dir: String,

    // Server
    pub ip: String,
    pub port: u16,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            title: "Wiki".to_string(),
            front_page: "Home".to_string(),

            pages_dir: "wiki-files".to_string(),
            templates_dir: "templates".to_string(),
            public_dir: "public".to_string(),

            ip: "localhost".to_string(),
            port: 8080,
        }
    }
}

impl WikiConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> WikiResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| WikiError::io(path, e))?;
        serde_yaml::from_str(&content).map_err(|source| WikiError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
