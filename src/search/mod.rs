//! Full-text search over the page files
//!
//! There is no persistent index: every query walks the pages directory
//! and reads each page, so results always reflect what is on disk.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::store::page_title;
use crate::content::Title;

/// A page whose body contains the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub title: Title,
    /// First line containing the query, trimmed
    pub excerpt: String,
}

/// On-demand scanner answering case-sensitive substring queries
#[derive(Debug, Clone)]
pub struct SearchIndex {
    pages_dir: PathBuf,
}

impl SearchIndex {
    pub fn new<P: AsRef<Path>>(pages_dir: P) -> Self {
        Self {
            pages_dir: pages_dir.as_ref().to_path_buf(),
        }
    }

    /// Pages containing `query`, ordered by file name
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        if query.is_empty() || !self.pages_dir.exists() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for entry in WalkDir::new(&self.pages_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            let Some(title) = page_title(path) else {
                continue;
            };

            let content = match fs::read(path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    tracing::warn!("Skipping {:?} during search: {}", path, e);
                    continue;
                }
            };

            if let Some(excerpt) = first_matching_line(&content, query) {
                hits.push(SearchHit {
                    title,
                    excerpt: excerpt.to_string(),
                });
            }
        }

        tracing::debug!("Search for {:?} matched {} pages", query, hits.len());
        hits
    }
}

/// A query spanning a newline matches no single line; the whole body
/// then stands in as the excerpt.
fn first_matching_line<'a>(content: &'a str, query: &str) -> Option<&'a str> {
    if !content.contains(query) {
        return None;
    }
    let line = content
        .lines()
        .find(|line| line.contains(query))
        .unwrap_or(content);
    Some(line.trim())
}
