//! Wiki HTTP server

mod handlers;
pub mod routes;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::{MarkdownRenderer, PageStore, Title};
use crate::error::{WikiError, WikiResult};
use crate::search::SearchIndex;
use crate::templates::TemplateRenderer;
use crate::Wiki;

/// Read-only state built once at start-up and shared by every request
pub struct AppState {
    pub store: PageStore,
    pub index: SearchIndex,
    pub templates: TemplateRenderer,
    pub markdown: MarkdownRenderer,
    pub front_page: Title,
}

impl AppState {
    /// Fails if any template is missing or malformed, or if the
    /// configured front page is not a valid title
    pub fn new(wiki: &Wiki) -> WikiResult<Self> {
        let front_page = Title::parse(&wiki.config.front_page)
            .ok_or_else(|| WikiError::InvalidFrontPage(wiki.config.front_page.clone()))?;

        Ok(Self {
            store: wiki.store(),
            index: wiki.index(),
            templates: TemplateRenderer::load(&wiki.templates_dir, &wiki.config.title)?,
            markdown: MarkdownRenderer::new(),
            front_page,
        })
    }
}

/// Build the router; paths that match no route are served from `public_dir`
pub fn build_router(state: Arc<AppState>, public_dir: &Path) -> Router {
    Router::new()
        .route("/", get(handlers::front_page))
        .route("/search", get(handlers::search))
        .route("/view/*title", get(handlers::view))
        .route("/edit/*title", get(handlers::edit))
        .route("/save/*title", post(handlers::save))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the wiki server and block until Ctrl+C
pub async fn start(wiki: &Wiki, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(
        AppState::new(wiki)
            .with_context(|| format!("failed to set up the wiki in {:?}", wiki.base_dir))?,
    );
    let app = build_router(state, &wiki.public_dir);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to listen on {}", addr))?;
    tracing::info!("Serving pages from {:?}", wiki.pages_dir);
    println!("Wiki running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use std::fs;
    use tower::ServiceExt;

    fn setup() -> (tempfile::TempDir, Wiki, Router) {
        let dir = tempfile::tempdir().unwrap();
        crate::commands::init::init_wiki(dir.path()).unwrap();
        let wiki = Wiki::new(dir.path()).unwrap();
        let app = app_for(&wiki);
        (dir, wiki, app)
    }

    fn app_for(wiki: &Wiki) -> Router {
        let state = Arc::new(AppState::new(wiki).unwrap());
        build_router(state, &wiki.public_dir)
    }

    async fn get(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_form(app: &Router, uri: &str, form: &str) -> Response {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    #[tokio::test]
    async fn test_view_missing_page_redirects_to_edit() {
        let (_dir, _wiki, app) = setup();
        let response = get(&app, "/view/Missing").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/edit/Missing");
    }

    #[tokio::test]
    async fn test_edit_missing_page_is_blank() {
        let (_dir, _wiki, app) = setup();
        let response = get(&app, "/edit/Missing").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Editing Missing"));
        assert!(html.contains(r#"cols="80"></textarea>"#));
    }

    #[tokio::test]
    async fn test_save_then_view_renders_markdown() {
        let (_dir, wiki, app) = setup();

        let response = post_form(&app, "/save/Home", "body=%23+Hi").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/view/Home");
        assert_eq!(fs::read_to_string(wiki.pages_dir.join("Home.md")).unwrap(), "# Hi");

        let response = get(&app, "/view/Home").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("<title>Home - Wiki</title>"));
    }

    #[tokio::test]
    async fn test_edit_shows_stored_source() {
        let (_dir, _wiki, app) = setup();
        post_form(&app, "/save/Notes", "body=**bold**").await;

        let html = body_text(get(&app, "/edit/Notes").await).await;
        assert!(html.contains("**bold**"));
    }

    #[tokio::test]
    async fn test_save_without_body_field_saves_empty_page() {
        let (_dir, wiki, app) = setup();
        let response = post_form(&app, "/save/Empty", "").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(fs::read_to_string(wiki.pages_dir.join("Empty.md")).unwrap(), "");
    }

    #[tokio::test]
    async fn test_save_failure_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        crate::commands::init::init_wiki(dir.path()).unwrap();
        fs::write(dir.path().join("wiki.yml"), "pages_dir: blocked\n").unwrap();
        fs::write(dir.path().join("blocked"), "a file, not a directory").unwrap();
        let wiki = Wiki::new(dir.path()).unwrap();
        let app = app_for(&wiki);

        let response = post_form(&app, "/save/Home", "body=text").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(header::LOCATION).is_none());
        assert!(body_text(response).await.contains("blocked"));
    }

    #[tokio::test]
    async fn test_invalid_titles_are_not_found() {
        let (_dir, _wiki, app) = setup();
        for uri in [
            "/view/..",
            "/view/Home.md",
            "/edit/a/b",
            "/edit/with%20space",
            "/view/..%2Fwiki.yml",
        ] {
            let response = get(&app, uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }

        let response = post_form(&app, "/save/a.b", "body=x").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unmatched_paths_are_not_found() {
        let (_dir, _wiki, app) = setup();
        for uri in ["/nothing", "/delete/Home", "/wiki.yml", "/wiki-files/Home.md", "/view.html"] {
            let response = get(&app, uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_static_assets_are_served() {
        let (_dir, _wiki, app) = setup();
        let response = get(&app, "/style.css").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("max-width"));
    }

    #[tokio::test]
    async fn test_search_without_query_shows_form() {
        let (_dir, _wiki, app) = setup();
        for uri in ["/search", "/search?query="] {
            let response = get(&app, uri).await;
            assert_eq!(response.status(), StatusCode::OK);
            let html = body_text(response).await;
            assert!(html.contains(r#"<form action="/search""#));
            assert!(!html.contains("No pages matched"));
        }
    }

    #[tokio::test]
    async fn test_search_finds_saved_page() {
        let (_dir, _wiki, app) = setup();
        post_form(&app, "/save/Greeting", "body=%23+Hi+there").await;

        let response = get(&app, "/search?query=Hi").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(r#"href="/view/Greeting""#));
    }

    #[tokio::test]
    async fn test_search_without_matches_is_ok() {
        let (_dir, _wiki, app) = setup();
        let response = get(&app, "/search?query=Zzyzx").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("No pages matched"));
    }

    #[tokio::test]
    async fn test_root_redirects_to_front_page() {
        let (_dir, _wiki, app) = setup();
        let response = get(&app, "/").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/view/Home");
    }

    #[tokio::test]
    async fn test_template_error_is_internal_error() {
        let (_dir, wiki, _app) = setup();
        fs::write(wiki.templates_dir.join("view.html"), "{{ page.nope.nope }}").unwrap();
        let app = app_for(&wiki);

        let response = get(&app, "/view/Home").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.starts_with("template error"));
    }

    #[test]
    fn test_missing_templates_prevent_start() {
        let dir = tempfile::tempdir().unwrap();
        let wiki = Wiki::new(dir.path()).unwrap();
        assert!(AppState::new(&wiki).is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_saves_and_searches() {
        let (_dir, wiki, app) = setup();

        let mut tasks = Vec::new();
        for i in 0..8 {
            let app = app.clone();
            tasks.push(tokio::spawn(async move {
                let uri = format!("/save/Page{i}");
                let response = post_form(&app, &uri, &format!("body=shared+marker+{i}")).await;
                assert_eq!(response.status(), StatusCode::FOUND);

                let response = get(&app, "/search?query=shared+marker").await;
                assert_eq!(response.status(), StatusCode::OK);
                body_text(response).await
            }));
        }
        for task in tasks {
            let html = task.await.unwrap();
            assert!(html.contains("href=\"/view/Page"));
        }

        let html = body_text(get(&app, "/search?query=shared+marker").await).await;
        for i in 0..8 {
            assert!(html.contains(&format!("href=\"/view/Page{i}\"")), "Page{i} missing");
            assert!(wiki.pages_dir.join(format!("Page{i}.md")).is_file());
        }
    }

    #[tokio::test]
    async fn test_page_routes_accept_one_method() {
        let (_dir, _wiki, app) = setup();

        let response = post_form(&app, "/view/Home", "body=x").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let response = post_form(&app, "/edit/Home", "body=x").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let response = get(&app, "/save/Home").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_root_follows_configured_front_page() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("wiki.yml"), "front_page: Start\n").unwrap();
        crate::commands::init::init_wiki(dir.path()).unwrap();
        let app = app_for(&Wiki::new(dir.path()).unwrap());

        let response = get(&app, "/").await;
        assert_eq!(location(&response), "/view/Start");
    }

    #[test]
    fn test_invalid_front_page_prevents_start() {
        let dir = tempfile::tempdir().unwrap();
        crate::commands::init::init_wiki(dir.path()).unwrap();
        fs::write(dir.path().join("wiki.yml"), "front_page: ../Home\n").unwrap();
        let wiki = Wiki::new(dir.path()).unwrap();

        let err = AppState::new(&wiki).err().unwrap();
        assert!(matches!(err, WikiError::InvalidFrontPage(_)));
    }
}
