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

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone)]
pub struct AnthropicVisionClient {
    api_key: ApiKey,
    model_name: String,
    base_url: String,
    max_tokens: u32,
    client: Client,
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Image { source: ImageSource },
    Text { text: String },
}

#[derive(Debug, Serialize)]
struct ImageSource {
    #[serde(rename = "type")]
    source_type: &'static str,
    media_type: &'static str,
    data: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

impl AnthropicVisionClient {
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

impl VisionClient for AnthropicVisionClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Claude
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
        let request = MessagesRequest {
            model: self.model_name.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentBlock::Image {
                        source: ImageSource {
                            source_type: "base64",
                            media_type: format.mime_type(),
                            data: general_purpose::STANDARD.encode(&image_data),
                        },
                    },
                    ContentBlock::Text { text: prompt },
                ],
            }],
        };

        let url = format!("{}/v1/messages", self.base_url);
        let body = transport::send(
            self.client
                .post(&url)
                .header("x-api-key", self.api_key.expose())
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&request),
            self.kind(),
        )
        .await?;

        let response: MessagesResponse = transport::decode(&body, self.kind())?;
        let text = response
            .content
            .into_iter()
            .filter_map(|block| match block {
                ResponseBlock::Text { text } => Some(text),
                ResponseBlock::Other => None,
            })
            .collect::<String>();

        if text.trim().is_empty() {
            return Err(CoreError::InvalidLlmResponse(
                "No response from LLM".to_string(),
            ));
        }

        Ok(text)
    }
}
