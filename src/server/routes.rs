//! Page routes - `/(view|edit|save)/<title>`
//!
//! This is the only place request input turns into a [`Title`]. Anything
//! that does not match the pattern exactly, including `..`, `/`, `.` or
//! percent-escapes in the title, is answered with 404.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use lazy_static::lazy_static;
use regex::Regex;

use crate::content::Title;

lazy_static! {
    static ref VALID_PATH: Regex = Regex::new(r"^/(edit|save|view)/([a-zA-Z0-9]+)$").unwrap();
}

/// What a page route asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Edit,
    Save,
}

impl Action {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "view" => Some(Action::View),
            "edit" => Some(Action::Edit),
            "save" => Some(Action::Save),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Edit => "edit",
            Action::Save => "save",
        }
    }

    /// URL path of this action for `title`
    pub fn path(self, title: &Title) -> String {
        format!("/{}/{}", self.keyword(), title)
    }
}

/// A request path that matched the page route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRoute {
    pub action: Action,
    pub title: Title,
}

/// Match a request path against the page route pattern
pub fn match_path(path: &str) -> Option<PageRoute> {
    let captures = VALID_PATH.captures(path)?;
    let action = Action::from_keyword(captures.get(1)?.as_str())?;
    let title = Title::parse(captures.get(2)?.as_str())?;
    Some(PageRoute { action, title })
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for PageRoute
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match_path(parts.uri.path()).ok_or(StatusCode::NOT_FOUND)
    }
}
