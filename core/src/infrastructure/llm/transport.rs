use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::{common::entities::app_errors::CoreError, menu::value_objects::ProviderKind};

const ERROR_BODY_LIMIT: usize = 500;

/// Sends a vendor request and returns the body of a successful response.
pub(crate) async fn send(request: RequestBuilder, provider: ProviderKind) -> Result<String, CoreError> {
    let response = request.send().await.map_err(|e| {
        tracing::error!(provider = %provider, "LLM API request failed: {}", e);
        if e.is_timeout() {
            CoreError::NetworkError(format!("{} API request timed out", provider))
        } else {
            CoreError::NetworkError(format!("{} API unreachable: {}", provider, e))
        }
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| {
        tracing::error!(provider = %provider, "Failed to read LLM response body: {}", e);
        CoreError::NetworkError(format!("{} API response interrupted: {}", provider, e))
    })?;

    if status.is_success() {
        return Ok(body);
    }

    let excerpt = truncate(&body);
    tracing::error!(provider = %provider, %status, "LLM API error: {}", excerpt);

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CoreError::InvalidApiKey(format!(
            "{} API rejected the credential ({})",
            provider, status
        )),
        StatusCode::TOO_MANY_REQUESTS => CoreError::ExternalServiceError(format!(
            "{} API rate limited the request, try again later",
            provider
        )),
        _ => CoreError::ExternalServiceError(format!(
            "{} API returned error: {} - {}",
            provider, status, excerpt
        )),
    })
}

/// Decodes a vendor envelope
pub(crate) fn decode<T: DeserializeOwned>(body: &str, provider: ProviderKind) -> Result<T, CoreError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!(provider = %provider, "Failed to parse LLM response: {}", e);
        CoreError::InvalidLlmResponse(format!("Failed to parse {} response: {}", provider, e))
    })
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}
