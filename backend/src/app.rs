use std::path::{Component, PathBuf};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use shared::constants::{API_BASE_META_NAME, CONVENTIONAL_API_PREFIX, HEALTH_CHECK_ENDPOINT};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::config::ServerConfig;

#[derive(Clone)]
struct PageState {
    frontend_dir: Arc<PathBuf>,
    api_base_url: Option<Arc<str>>,
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub fn api_routes() -> Router {
    Router::new().route(HEALTH_CHECK_ENDPOINT, get(health_check))
}

/// Serves `api` both at the root and under `/api`, so clients reach it
/// whichever base they settle on.
pub fn mount_api(api: Router) -> Router {
    Router::new()
        .merge(api.clone())
        .nest(CONVENTIONAL_API_PREFIX, api)
}

pub fn router(config: &ServerConfig) -> Router {
    let state = PageState {
        frontend_dir: Arc::new(config.frontend_dir.clone()),
        api_base_url: config.api_base_url.as_deref().map(Arc::from),
    };

    let pages = Router::new()
        .route("/", get(serve_index))
        .route("/:page", get(serve_page))
        .with_state(state);

    mount_api(api_routes())
        .merge(pages)
        .nest_service("/static", ServeDir::new(config.frontend_dir.join("static")))
        .nest_service("/estilos", ServeDir::new(config.frontend_dir.join("estilos")))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn serve_index(State(state): State<PageState>) -> Response {
    render_page(&state, "index.html").await
}

async fn serve_page(State(state): State<PageState>, Path(page): Path<String>) -> Response {
    if !is_html_file_name(&page) {
        return StatusCode::NOT_FOUND.into_response();
    }

    render_page(&state, &page).await
}

/// A single `*.html` file name: no separators, no root, no `..`.
fn is_html_file_name(page: &str) -> bool {
    let mut components = std::path::Path::new(page).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    single_normal && page.ends_with(".html") && !page.contains(['/', '\\'])
}

async fn render_page(state: &PageState, file_name: &str) -> Response {
    let path = state.frontend_dir.join(file_name);

    let html = match tokio::fs::read_to_string(&path).await {
        Ok(html) => html,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Page not found: {:?}", path);
            return StatusCode::NOT_FOUND.into_response();
        }
        Err(e) => {
            error!("Error reading page {:?}: {}", path, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let html = match &state.api_base_url {
        Some(base) => inject_api_base_meta(&html, base),
        None => html,
    };

    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html).into_response()
}

/// Adds `<meta name="api-base-url">` right after `<head>` unless the page
/// already declares one. Pages without a `<head>` are left untouched.
pub fn inject_api_base_meta(html: &str, base: &str) -> String {
    let lowercase = html.to_ascii_lowercase();
    let declares_base = ["\"", "'", ""]
        .iter()
        .any(|quote| lowercase.contains(&format!("name={0}{1}{0}", quote, API_BASE_META_NAME)));
    if declares_base {
        return html.to_string();
    }

    let Some(head_start) = lowercase.find("<head>").or_else(|| lowercase.find("<head ")) else {
        return html.to_string();
    };
    let Some(head_end) = html[head_start..].find('>').map(|offset| head_start + offset + 1) else {
        return html.to_string();
    };

    format!(
        "{}\n    <meta name=\"{}\" content=\"{}\">{}",
        &html[..head_end],
        API_BASE_META_NAME,
        html_escape::encode_double_quoted_attribute(base),
        &html[head_end..]
    )
}
