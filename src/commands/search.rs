//! Search pages from the command line

use anyhow::Result;

use crate::Wiki;

pub fn run(wiki: &Wiki, query: &str) -> Result<()> {
    let hits = wiki.index().search(query);

    if hits.is_empty() {
        println!("No pages matched {:?}", query);
        return Ok(());
    }

    for hit in hits {
        println!("  {}: {}", hit.title, hit.excerpt);
    }
    Ok(())
}
