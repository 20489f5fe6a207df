use axum::{
    Json,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use menujudge_core::domain::common::entities::app_errors::CoreError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::application::http::render::render_error;

pub const X_ERROR_CODE: HeaderName = HeaderName::from_static("x-error-code");

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    NoApiKey(String),

    #[error("{0}")]
    NoFile(String),

    #[error("{0}")]
    InvalidFile(String),

    #[error("{0}")]
    FileTooLarge(String),

    #[error("{0}")]
    UnknownProvider(String),

    #[error("{0}")]
    InvalidMenuImage(String),

    #[error("{0}")]
    InvalidApiKey(String),

    #[error("{0}")]
    AiError(String),

    #[error("{0}")]
    NetworkError(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoApiKey(_) | ApiError::InvalidApiKey(_) => StatusCode::UNAUTHORIZED,
            ApiError::NoFile(_)
            | ApiError::InvalidFile(_)
            | ApiError::UnknownProvider(_)
            | ApiError::InvalidMenuImage(_)
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::FileTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::AiError(_) => StatusCode::BAD_GATEWAY,
            ApiError::NetworkError(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NoApiKey(_) => "NO_API_KEY",
            ApiError::NoFile(_) => "NO_FILE",
            ApiError::InvalidFile(_) => "INVALID_FILE",
            ApiError::FileTooLarge(_) => "FILE_TOO_LARGE",
            ApiError::UnknownProvider(_) => "UNKNOWN_PROVIDER",
            ApiError::InvalidMenuImage(_) => "INVALID_MENU_IMAGE",
            ApiError::InvalidApiKey(_) => "INVALID_API_KEY",
            ApiError::AiError(_) => "AI_ERROR",
            ApiError::NetworkError(_) => "NETWORK_ERROR",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::InternalServerError(_) => "INTERNAL_ERROR",
        }
    }

    /// Heading of the HTML error partial
    pub fn title(&self) -> &'static str {
        match self {
            ApiError::NoApiKey(_) => "API key missing",
            ApiError::NoFile(_) => "No file",
            ApiError::InvalidFile(_) => "Invalid file",
            ApiError::FileTooLarge(_) => "File too large",
            ApiError::UnknownProvider(_) => "Unknown provider",
            ApiError::InvalidMenuImage(_) => "Not a menu",
            ApiError::InvalidApiKey(_) => "API key rejected",
            ApiError::AiError(_) => "AI analysis error",
            ApiError::NetworkError(_) => "Provider unreachable",
            ApiError::BadRequest(_) => "Bad request",
            ApiError::InternalServerError(_) => "Unexpected error",
        }
    }

    /// Renders the error as the htmx error partial instead of JSON.
    pub fn into_html_response(self) -> Response {
        let html = render_error(self.title(), &self.to_string(), Some(self.code()));
        let mut response = (self.status(), Html(html)).into_response();
        response
            .headers_mut()
            .insert(X_ERROR_CODE, HeaderValue::from_static(self.code()));
        response
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NoFile(message) => ApiError::NoFile(message),
            CoreError::InvalidImage(message) => ApiError::InvalidFile(message),
            CoreError::FileTooLarge { .. } => ApiError::FileTooLarge(error.to_string()),
            CoreError::MissingApiKey => ApiError::NoApiKey(
                "API key is required. Enter your API key in the settings panel.".to_string(),
            ),
            CoreError::InvalidApiKey(message) => ApiError::InvalidApiKey(message),
            CoreError::UnknownProvider(_) => ApiError::UnknownProvider(error.to_string()),
            CoreError::InvalidMenuImage(message) => ApiError::InvalidMenuImage(message),
            CoreError::InvalidLlmResponse(message) | CoreError::ExternalServiceError(message) => {
                ApiError::AiError(format!("AI analysis failed: {}", message))
            }
            CoreError::NetworkError(message) => ApiError::NetworkError(format!(
                "Could not reach the AI provider: {}",
                message
            )),
            CoreError::InternalServerError => ApiError::InternalServerError(
                "An unexpected error occurred. Please try again later.".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let body = ErrorBody {
            success: false,
            error: self.to_string(),
            code: code.to_string(),
        };

        let mut response = (status, Json(body)).into_response();
        response
            .headers_mut()
            .insert(X_ERROR_CODE, HeaderValue::from_static(code));
        response
    }
}
