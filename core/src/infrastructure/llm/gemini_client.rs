use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        menu::{
            ports::VisionClient,
            schema::get_menu_analysis_schema,
            value_objects::{ApiKey, ImageFormat, ProviderKind},
        },
    },
    infrastructure::llm::transport,
};

#[derive(Debug, Clone)]
pub struct GeminiVisionClient {
    api_key: ApiKey,
    model_name: String,
    base_url: String,
    max_tokens: u32,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: &'static str,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

impl GeminiVisionClient {
    pub fn new(
        client: Client,
        api_key: ApiKey,
        model_name: String,
        base_url: String,
        max_tokens: u32,
    ) -> Self {
        Self {
            api_key,
            model_name,
            base_url,
            max_tokens,
            client,
        }
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model_name
        );

        let body = transport::send(
            self.client
                .post(&url)
                .header("x-goog-api-key", self.api_key.expose())
                .json(&request),
            self.kind(),
        )
        .await?;

        let gemini_response: GeminiResponse = transport::decode(&body, self.kind())?;

        let text = gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(CoreError::InvalidLlmResponse(
                "No response from LLM".to_string(),
            ));
        }

        Ok(text)
    }
}

impl VisionClient for GeminiVisionClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn model(&self) -> String {
        self.model_name.clone()
    }

    async fn generate_with_image(
        &self,
        prompt: String,
        image_data: Bytes,
        format: ImageFormat,
    ) -> Result<String, CoreError> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: format.mime_type(),
                            data: general_purpose::STANDARD.encode(&image_data),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: get_menu_analysis_schema(),
                max_output_tokens: self.max_tokens,
            },
        };

        self.call_gemini_api(request).await
    }
}
