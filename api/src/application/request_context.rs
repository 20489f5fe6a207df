use std::convert::Infallible;

use axum::{
    RequestPartsExt,
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

pub const X_API_KEY: &str = "x-api-key";
pub const X_AI_PROVIDER: &str = "x-ai-provider";
pub const HX_REQUEST: &str = "hx-request";

/// Per-request options the browser sends as headers.
///
/// Extraction never fails: a missing credential is reported by the handler
/// so that it can answer in the caller's format (JSON or HTML).
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub api_key: Option<String>,
    pub provider: Option<String>,
    pub wants_html: bool,
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let mut api_key = header_text(&parts.headers, X_API_KEY);
        if api_key.is_none() {
            api_key = extract_token_from_bearer(parts).await;
        }

        Ok(RequestContext {
            api_key,
            provider: header_text(&parts.headers, X_AI_PROVIDER),
            wants_html: header_text(&parts.headers, HX_REQUEST).as_deref() == Some("true"),
        })
    }
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

async fn extract_token_from_bearer(parts: &mut Parts) -> Option<String> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .ok()?;

    Some(bearer.token().to_string()).filter(|t| !t.is_empty())
}
