//! List stored pages

use anyhow::Result;
use chrono::{DateTime, Local};
use std::fs;

use crate::Wiki;

/// One line per page: title, size and last modification time
pub fn run(wiki: &Wiki) -> Result<()> {
    let store = wiki.store();
    let titles = store.list()?;

    println!("Pages ({}):", titles.len());
    for title in titles {
        let metadata = fs::metadata(store.path_for(&title))?;
        let modified = metadata
            .modified()
            .ok()
            .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<24} {:>8} B  {}", title, metadata.len(), modified);
    }

    Ok(())
}
