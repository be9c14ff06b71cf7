//! Page store - pages live as `<title>.md` files in a single directory

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{Page, Title};
use crate::error::{WikiError, WikiResult};

/// Loads and saves pages under one root directory
#[derive(Debug, Clone)]
pub struct PageStore {
    root: PathBuf,
}

impl PageStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `title`
    pub fn path_for(&self, title: &Title) -> PathBuf {
        self.root.join(title.file_name())
    }

    /// Read a page from disk
    pub fn load(&self, title: &Title) -> WikiResult<Page> {
        let path = self.path_for(title);
        let bytes = fs::read(&path).map_err(|e| WikiError::io(&path, e))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Page::new(title.clone(), body))
    }

    /// Write a page to disk, creating the pages directory on first use
    pub fn save(&self, page: &Page) -> WikiResult<()> {
        fs::create_dir_all(&self.root).map_err(|e| WikiError::io(&self.root, e))?;

        let path = self.path_for(&page.title);
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&path).map_err(|e| WikiError::io(&path, e))?;
        file.write_all(page.body.as_bytes())
            .map_err(|e| WikiError::io(&path, e))?;

        tracing::debug!("Saved {:?} ({} bytes)", path, page.body.len());
        Ok(())
    }

    /// Titles of every stored page, sorted by name
    pub fn list(&self) -> WikiResult<Vec<Title>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut titles = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(self.root.as_path()).to_path_buf();
                WikiError::io(path, e.into())
            })?;
            if let Some(title) = page_title(entry.path()) {
                titles.push(title);
            }
        }

        Ok(titles)
    }
}

/// Title of a page file, or `None` for anything that is not `<title>.md`
pub(crate) fn page_title(path: &Path) -> Option<Title> {
    if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
        return None;
    }
    path.file_stem().and_then(|s| s.to_str()).and_then(Title::parse)
}
