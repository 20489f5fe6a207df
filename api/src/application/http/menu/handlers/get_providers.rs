use axum::extract::State;
use menujudge_core::domain::menu::{ports::MenuAnalysisService, value_objects::ProviderKind};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProvidersResponse {
    pub default: ProviderKind,
    pub providers: Vec<ProviderKind>,
    /// Largest accepted image, in bytes
    pub max_upload_size: usize,
}

#[utoipa::path(
    get,
    path = "/providers",
    tag = "menu",
    summary = "List AI providers",
    description = "Providers a request can pick with `X-AI-Provider`, the one used when it does not, and the upload size limit",
    responses(
        (status = 200, body = ProvidersResponse)
    ),
)]
pub async fn get_providers(
    State(state): State<AppState>,
) -> Result<Response<ProvidersResponse>, ApiError> {
    Ok(Response::OK(ProvidersResponse {
        default: state.service.default_provider(),
        providers: state.service.available_providers(),
        max_upload_size: state.service.max_upload_size(),
    }))
}
