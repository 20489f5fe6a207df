use axum::{Router, response::Html, routing::get};

use crate::application::http::server::app_state::AppState;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Upload page. The API key stays in the browser's localStorage.
pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn page_routes(root_path: &str) -> Router<AppState> {
    let index = if root_path.is_empty() {
        "/".to_string()
    } else {
        root_path.to_string()
    };

    Router::new().route(&index, get(index_page))
}
