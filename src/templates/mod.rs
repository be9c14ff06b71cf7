//! HTML templates rendered with the Tera template engine
//!
//! The wiki reads `view.html`, `edit.html` and `search.html` from its
//! templates directory once, at start-up. The parsed set is never modified
//! afterwards and is shared by every request.

use serde::Serialize;
use std::path::Path;
use tera::{Context, Tera};

use crate::content::Page;
use crate::error::WikiResult;
use crate::search::SearchHit;

pub const VIEW_TEMPLATE: &str = "view.html";
pub const EDIT_TEMPLATE: &str = "edit.html";
pub const SEARCH_TEMPLATE: &str = "search.html";

/// Templates written by `mdwiki init`
pub const DEFAULT_TEMPLATES: [(&str, &str); 3] = [
    (VIEW_TEMPLATE, include_str!("defaults/view.html")),
    (EDIT_TEMPLATE, include_str!("defaults/edit.html")),
    (SEARCH_TEMPLATE, include_str!("defaults/search.html")),
];

/// Stylesheet written to the public directory by `mdwiki init`
pub const DEFAULT_STYLESHEET: &str = include_str!("defaults/style.css");

/// The two screens a page can be shown on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTemplate {
    View,
    Edit,
}

impl PageTemplate {
    pub fn file_name(self) -> &'static str {
        match self {
            PageTemplate::View => VIEW_TEMPLATE,
            PageTemplate::Edit => EDIT_TEMPLATE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct WikiData {
    title: String,
}

/// Template renderer holding the parsed wiki templates
pub struct TemplateRenderer {
    tera: Tera,
    wiki: WikiData,
}

impl TemplateRenderer {
    /// Parse all templates from `dir`; any missing or malformed file is an error
    pub fn load<P: AsRef<Path>>(dir: P, wiki_title: &str) -> WikiResult<Self> {
        let dir = dir.as_ref();
        let mut tera = Tera::default();

        tera.add_template_files(
            [VIEW_TEMPLATE, EDIT_TEMPLATE, SEARCH_TEMPLATE]
                .into_iter()
                .map(|name| (dir.join(name), Some(name)))
                .collect::<Vec<_>>(),
        )?;

        tracing::debug!("Loaded templates from {:?}", dir);

        Ok(Self {
            tera,
            wiki: WikiData {
                title: wiki_title.to_string(),
            },
        })
    }

    /// Render a page on the view or edit screen
    pub fn render_page(&self, template: PageTemplate, page: &Page) -> WikiResult<String> {
        let mut context = self.base_context();
        context.insert("page", page);
        self.render(template.file_name(), &context)
    }

    /// Render the search screen; `results` is `None` when nothing was searched
    pub fn render_search(&self, results: Option<(&str, &[SearchHit])>) -> WikiResult<String> {
        let mut context = self.base_context();
        let (query, hits) = results.unwrap_or(("", &[]));
        context.insert("searched", &results.is_some());
        context.insert("query", query);
        context.insert("hits", hits);
        self.render(SEARCH_TEMPLATE, &context)
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> WikiResult<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("wiki", &self.wiki);
        context
    }
}
