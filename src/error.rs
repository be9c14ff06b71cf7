//! Error types shared by the page store, search index and templates

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::error::Error as _;
use std::path::PathBuf;
use thiserror::Error;

pub type WikiResult<T> = Result<T, WikiError>;

/// Errors raised while serving the wiki
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("front_page {0:?} is not a valid page title")]
    InvalidFrontPage(String),

    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl WikiError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WikiError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying failure is a missing file
    pub fn is_not_found(&self) -> bool {
        matches!(self, WikiError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }

    /// Text sent to the client. Tera keeps the useful part of a render
    /// failure in its source chain, so that chain is spelled out here.
    fn response_body(&self) -> String {
        let WikiError::Template(err) = self else {
            return self.to_string();
        };
        let mut message = self.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        let body = self.response_body();
        tracing::error!("{}", body);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}
