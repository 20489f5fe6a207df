use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;

use crate::{
    domain::{
        common::{LLMConfig, entities::app_errors::CoreError},
        menu::{
            ports::{VisionClient, VisionClientFactory},
            value_objects::{ApiKey, ImageFormat, ProviderKind},
        },
    },
    infrastructure::llm::{
        anthropic_client::AnthropicVisionClient, gemini_client::GeminiVisionClient,
        openai_client::OpenAiVisionClient,
    },
};

/// A vision client for whichever vendor the request selected
#[derive(Debug, Clone)]
pub enum VisionProvider {
    Claude(AnthropicVisionClient),
    OpenAi(OpenAiVisionClient),
    Gemini(GeminiVisionClient),
}

impl VisionClient for VisionProvider {
    fn kind(&self) -> ProviderKind {
        match self {
            Self::Claude(client) => client.kind(),
            Self::OpenAi(client) => client.kind(),
            Self::Gemini(client) => client.kind(),
        }
    }

    fn model(&self) -> String {
        match self {
            Self::Claude(client) => client.model(),
            Self::OpenAi(client) => client.model(),
            Self::Gemini(client) => client.model(),
        }
    }

    async fn generate_with_image(
        &self,
        prompt: String,
        image_data: Bytes,
        format: ImageFormat,
    ) -> Result<String, CoreError> {
        match self {
            Self::Claude(client) => client.generate_with_image(prompt, image_data, format).await,
            Self::OpenAi(client) => client.generate_with_image(prompt, image_data, format).await,
            Self::Gemini(client) => client.generate_with_image(prompt, image_data, format).await,
        }
    }
}

/// Builds vendor clients over one shared connection pool
#[derive(Debug, Clone)]
pub struct HttpVisionClientFactory {
    client: Client,
    config: LLMConfig,
}

impl HttpVisionClientFactory {
    pub fn new(config: LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Self { client, config })
    }
}

impl VisionClientFactory for HttpVisionClientFactory {
    type Client = VisionProvider;

    fn create(&self, kind: ProviderKind, api_key: &ApiKey) -> Result<Self::Client, CoreError> {
        let model = self.config.model_for(kind).to_string();
        let base_url = self.config.base_url_for(kind).to_string();
        let client = self.client.clone();
        let api_key = api_key.clone();
        let max_tokens = self.config.max_tokens;

        Ok(match kind {
            ProviderKind::Claude => VisionProvider::Claude(AnthropicVisionClient::new(
                client, api_key, model, base_url, max_tokens,
            )),
            ProviderKind::OpenAi => VisionProvider::OpenAi(OpenAiVisionClient::new(
                client, api_key, model, base_url, max_tokens,
            )),
            ProviderKind::Gemini => VisionProvider::Gemini(GeminiVisionClient::new(
                client, api_key, model, base_url, max_tokens,
            )),
        })
    }

    fn available_providers(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL.to_vec()
    }
}
