use bytes::Bytes;
use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    menu::{
        entities::AnalysisResult,
        value_objects::{AnalyzeMenuInput, ApiKey, ImageFormat, ProviderKind},
    },
};

/// Vision model client for one vendor, bound to one caller credential
#[cfg_attr(test, mockall::automock)]
pub trait VisionClient: Send + Sync {
    fn kind(&self) -> ProviderKind;

    fn model(&self) -> String;

    /// Sends the prompt and the image, returns the model's text answer
    fn generate_with_image(
        &self,
        prompt: String,
        image_data: Bytes,
        format: ImageFormat,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Builds vision clients for a given provider and request credential
#[cfg_attr(test, mockall::automock(type Client = MockVisionClient;))]
pub trait VisionClientFactory: Send + Sync {
    type Client: VisionClient;

    fn create(&self, kind: ProviderKind, api_key: &ApiKey) -> Result<Self::Client, CoreError>;

    fn available_providers(&self) -> Vec<ProviderKind>;
}

/// Service trait for menu analysis business logic
pub trait MenuAnalysisService: Send + Sync {
    fn analyze_menu(
        &self,
        input: AnalyzeMenuInput,
    ) -> impl Future<Output = Result<AnalysisResult, CoreError>> + Send;

    fn available_providers(&self) -> Vec<ProviderKind>;

    fn default_provider(&self) -> ProviderKind;

    fn max_upload_size(&self) -> usize;
}
