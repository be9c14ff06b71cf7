//! Page model

use serde::Serialize;
use std::fmt;

/// Alphanumeric page name; also the stem of the page's backing file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Accepts `[a-zA-Z0-9]+` and nothing else
    pub fn parse(s: &str) -> Option<Self> {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the page inside the pages directory
    pub fn file_name(&self) -> String {
        format!("{}.md", self.0)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// A wiki page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Page title
    pub title: Title,

    /// Markdown source, or rendered HTML once prepared for display
    pub body: String,
}

impl Page {
    pub fn new(title: Title, body: impl Into<String>) -> Self {
        Self {
            title,
            body: body.into(),
        }
    }

    /// A page that does not exist on disk yet
    pub fn blank(title: Title) -> Self {
        Self::new(title, String::new())
    }
}
