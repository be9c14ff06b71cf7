//! Request handlers for the wiki routes

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use std::sync::Arc;

use super::routes::{Action, PageRoute};
use super::AppState;
use crate::content::{Page, Title};
use crate::error::WikiResult;
use crate::search::SearchHit;
use crate::templates::PageTemplate;

/// 302 Found; axum's `Redirect` only offers 303, 307 and 308
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Page files are read and written with `std::fs`; run that off the
/// async workers so a slow disk only holds up its own request.
async fn load_page(state: &AppState, title: &Title) -> WikiResult<WikiResult<Page>> {
    let store = state.store.clone();
    let title = title.clone();
    Ok(tokio::task::spawn_blocking(move || store.load(&title)).await?)
}

async fn save_page(state: &AppState, page: Page) -> WikiResult<Page> {
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || store.save(&page).map(|()| page)).await?
}

async fn search_pages(state: &AppState, query: &str) -> WikiResult<Vec<SearchHit>> {
    let index = state.index.clone();
    let query = query.to_string();
    Ok(tokio::task::spawn_blocking(move || index.search(&query)).await?)
}

/// `GET /view/<title>`
pub async fn view(State(state): State<Arc<AppState>>, route: PageRoute) -> WikiResult<Response> {
    let mut page = match load_page(&state, &route.title).await? {
        Ok(page) => page,
        Err(e) => {
            tracing::debug!("View of {} falls back to edit: {}", route.title, e);
            return Ok(found(&Action::Edit.path(&route.title)));
        }
    };

    // Display only; the stored file keeps its Markdown
    page.body = state.markdown.render(&page.body);

    let html = state.templates.render_page(PageTemplate::View, &page)?;
    Ok(Html(html).into_response())
}

/// `GET /edit/<title>`
pub async fn edit(
    State(state): State<Arc<AppState>>,
    route: PageRoute,
) -> WikiResult<Html<String>> {
    let page = load_page(&state, &route.title).await?.unwrap_or_else(|e| {
        if !e.is_not_found() {
            tracing::debug!("Editing {} from a blank page: {}", route.title, e);
        }
        Page::blank(route.title.clone())
    });

    let html = state.templates.render_page(PageTemplate::Edit, &page)?;
    Ok(Html(html))
}

#[derive(Debug, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    body: String,
}

/// `POST /save/<title>`
pub async fn save(
    State(state): State<Arc<AppState>>,
    route: PageRoute,
    Form(form): Form<SaveForm>,
) -> WikiResult<Response> {
    let page = save_page(&state, Page::new(route.title, form.body)).await?;

    tracing::info!("Saved page {}", page.title);
    Ok(found(&Action::View.path(&page.title)))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    query: Option<String>,
}

/// `GET /search[?query=...]`
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> WikiResult<Html<String>> {
    let html = match params.query.as_deref().filter(|q| !q.is_empty()) {
        None => state.templates.render_search(None)?,
        Some(query) => {
            let hits = search_pages(&state, query).await?;
            state.templates.render_search(Some((query, &hits)))?
        }
    };
    Ok(Html(html))
}

/// `GET /`
pub async fn front_page(State(state): State<Arc<AppState>>) -> Response {
    found(&Action::View.path(&state.front_page))
}
