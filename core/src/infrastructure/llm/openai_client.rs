use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        menu::{
            ports::VisionClient,
            value_objects::{ApiKey, ImageFormat, ProviderKind},
        },
    },
    infrastructure::llm::transport,
};

#[derive(Debug, Clone)]
pub struct OpenAiVisionClient {
    api_key: ApiKey,
    model_name: String,
    base_url: String,
    max_tokens: u32,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiVisionClient {
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
}

impl VisionClient for OpenAiVisionClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
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
        let data_url = format!(
            "data:{};base64,{}",
            format.mime_type(),
            general_purpose::STANDARD.encode(&image_data)
        );

        let request = ChatRequest {
            model: self.model_name.clone(),
            max_tokens: self.max_tokens,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text { text: prompt },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ],
            }],
        };

        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = transport::send(
            self.client
                .post(&url)
                .bearer_auth(self.api_key.expose())
                .json(&request),
            self.kind(),
        )
        .await?;

        let response: ChatResponse = transport::decode(&body, self.kind())?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| CoreError::InvalidLlmResponse("No response from LLM".to_string()))
    }
}
