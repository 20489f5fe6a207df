use std::str::FromStr;

use axum::{
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response as AxumResponse},
};
use bytes::Bytes;
use menujudge_core::domain::{
    common::entities::app_errors::CoreError,
    menu::{
        entities::{AnalysisResult, Dish},
        ports::MenuAnalysisService,
        value_objects::{AnalyzeMenuInput, ApiKey, ProviderKind},
    },
};
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::{
    http::{
        render::render_dish_list,
        server::{
            api_entities::{
                api_error::{ApiError, ErrorBody},
                response::Response,
            },
            app_state::AppState,
        },
    },
    request_context::RequestContext,
};

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeMenuResponse {
    pub success: bool,
    pub dishes: Vec<Dish>,
    pub provider: ProviderKind,
    pub model: String,
    /// Seconds
    pub processing_time: f64,
    pub analysis_id: Uuid,
}

impl From<AnalysisResult> for AnalyzeMenuResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            success: true,
            dishes: result.dishes,
            provider: result.provider,
            model: result.model,
            processing_time: result.processing_time,
            analysis_id: result.analysis_id,
        }
    }
}

#[allow(dead_code)]
#[derive(ToSchema)]
pub struct AnalyzeMenuForm {
    /// PNG, JPEG or WebP photo of the menu
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    image: String,
}

struct UploadedImage {
    filename: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "menu",
    summary = "Analyze a menu photo",
    description = "Forwards the photo to the selected vision model and returns one record per dish. With `HX-Request: true` the answer is an HTML fragment instead of JSON.",
    request_body(content = AnalyzeMenuForm, content_type = "multipart/form-data"),
    params(
        ("X-API-Key" = String, Header, description = "Vendor API key, never stored"),
        ("X-AI-Provider" = Option<String>, Header, description = "claude, openai or gemini"),
        ("HX-Request" = Option<String>, Header, description = "`true` for an HTML fragment"),
    ),
    responses(
        (status = 200, body = AnalyzeMenuResponse),
        (status = 400, description = "Missing or invalid file, unknown provider, not a menu", body = ErrorBody),
        (status = 401, description = "Missing or rejected API key", body = ErrorBody),
        (status = 413, description = "File too large", body = ErrorBody),
        (status = 502, description = "AI provider failed or answered garbage", body = ErrorBody),
        (status = 503, description = "AI provider unreachable", body = ErrorBody),
    ),
)]
pub async fn analyze_menu(
    State(state): State<AppState>,
    context: RequestContext,
    multipart: Result<Multipart, MultipartRejection>,
) -> AxumResponse {
    let wants_html = context.wants_html;

    match run_analysis(&state, context, multipart).await {
        Ok(result) if wants_html => Html(render_dish_list(&result)).into_response(),
        Ok(result) => Response::OK(AnalyzeMenuResponse::from(result)).into_response(),
        Err(e) if wants_html => e.into_html_response(),
        Err(e) => e.into_response(),
    }
}

async fn run_analysis(
    state: &AppState,
    context: RequestContext,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<AnalysisResult, ApiError> {
    let api_key = ApiKey::new(context.api_key.unwrap_or_default()).map_err(|e| {
        warn!("No API key provided");
        ApiError::from(e)
    })?;

    let provider = context
        .provider
        .as_deref()
        .map(ProviderKind::from_str)
        .transpose()?;

    let mut multipart = multipart.map_err(|e| {
        warn!("Request is not a multipart upload: {}", e);
        ApiError::NoFile("No image file provided".to_string())
    })?;

    let max_upload_size = state.service.max_upload_size();
    let image = read_image_field(&mut multipart, max_upload_size)
        .await?
        .ok_or_else(|| {
            warn!("No image file in request");
            ApiError::NoFile("No image file provided".to_string())
        })?;

    state
        .service
        .analyze_menu(AnalyzeMenuInput {
            filename: image.filename,
            declared_mime: image.content_type,
            image_data: image.data,
            api_key,
            provider,
        })
        .await
        .map_err(|e| {
            if e.is_input_error() || matches!(e, CoreError::InvalidMenuImage(_)) {
                warn!("Analysis rejected: {}", e);
            } else {
                error!("Analysis failed: {}", e);
            }
            ApiError::from(e)
        })
}

async fn read_image_field(
    multipart: &mut Multipart,
    max_upload_size: usize,
) -> Result<Option<UploadedImage>, ApiError> {
    let to_api_error = |e: MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            warn!("Upload exceeded the request body limit");
            ApiError::from(CoreError::FileTooLarge {
                max: max_upload_size,
            })
        } else {
            warn!("Failed to read multipart field: {}", e);
            ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
        }
    };

    while let Some(field) = multipart.next_field().await.map_err(to_api_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(to_api_error)?;

        return Ok(Some(UploadedImage {
            filename,
            content_type,
            data,
        }));
    }

    Ok(None)
}
