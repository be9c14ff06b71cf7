//! Initialize a new wiki

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::CONFIG_FILE;
use crate::content::{Page, Title};
use crate::templates::{DEFAULT_STYLESHEET, DEFAULT_TEMPLATES};
use crate::Wiki;

const DEFAULT_CONFIG: &str = r#"# mdwiki configuration

# Name shown in page headers
title: Wiki
# Page that / redirects to
front_page: Home

# Directories, relative to this file
pages_dir: wiki-files
templates_dir: templates
public_dir: public

# Server
ip: localhost
port: 8080
"#;

const HOME_PAGE: &str = r#"# Welcome

This wiki keeps every page as a Markdown file.

- Follow the *edit* link to change this page.
- Visit `/view/AnyName` to start a new page.
- Use [search](/search) to find text across all pages.
"#;

/// Initialize a wiki in the given directory. Existing files are kept.
pub fn init_wiki(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    write_if_missing(&target_dir.join(CONFIG_FILE), DEFAULT_CONFIG)?;

    // Paths below honour a config file that was already there
    let wiki = Wiki::new(target_dir)?;

    fs::create_dir_all(&wiki.templates_dir)?;
    for (name, content) in DEFAULT_TEMPLATES {
        write_if_missing(&wiki.templates_dir.join(name), content)?;
    }

    fs::create_dir_all(&wiki.public_dir)?;
    write_if_missing(&wiki.public_dir.join("style.css"), DEFAULT_STYLESHEET)?;

    let store = wiki.store();
    fs::create_dir_all(store.root())?;
    if let Some(title) = Title::parse(&wiki.config.front_page) {
        if !store.path_for(&title).exists() {
            store.save(&Page::new(title, HOME_PAGE))?;
        }
    } else {
        tracing::warn!(
            "front_page {:?} is not a valid page title; no page created",
            wiki.config.front_page
        );
    }

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::debug!("Keeping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}
