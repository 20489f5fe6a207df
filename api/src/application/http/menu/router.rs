use super::handlers::{
    analyze_menu::{__path_analyze_menu, analyze_menu},
    get_providers::{__path_get_providers, get_providers},
};
use crate::application::http::server::app_state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use menujudge_core::domain::menu::ports::MenuAnalysisService;
use utoipa::OpenApi;

/// Room for multipart boundaries and part headers on top of the image itself
pub const MULTIPART_OVERHEAD: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(paths(analyze_menu, get_providers))]
pub struct MenuApiDoc;

pub fn menu_routes(state: AppState) -> Router<AppState> {
    let body_limit = state
        .service
        .max_upload_size()
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route(
            &format!("{}/api/analyze", state.args.server.root_path),
            post(analyze_menu).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(
            &format!("{}/api/providers", state.args.server.root_path),
            get(get_providers),
        )
}
