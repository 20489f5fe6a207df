use std::{sync::Arc, time::Instant};

use crate::domain::{
    common::entities::app_errors::CoreError,
    menu::{
        entities::AnalysisResult,
        parser::parse_menu_response,
        ports::{MenuAnalysisService, VisionClient, VisionClientFactory},
        prompt::build_menu_prompt,
        validation::validate_image,
        value_objects::{AnalyzeMenuInput, ProviderKind},
    },
};

#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub default_provider: ProviderKind,
    pub max_upload_size: usize,
    pub target_language: String,
}

pub struct MenuService<F> {
    factory: Arc<F>,
    settings: AnalysisSettings,
}

impl<F> Clone for MenuService<F> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
            settings: self.settings.clone(),
        }
    }
}

impl<F> MenuService<F>
where
    F: VisionClientFactory,
{
    pub fn new(factory: F, settings: AnalysisSettings) -> Self {
        Self {
            factory: Arc::new(factory),
            settings,
        }
    }
}

impl<F> MenuAnalysisService for MenuService<F>
where
    F: VisionClientFactory,
{
    async fn analyze_menu(&self, input: AnalyzeMenuInput) -> Result<AnalysisResult, CoreError> {
        // 1. Validate the upload, nothing leaves the process before this passes
        let format = validate_image(
            input.filename.as_deref(),
            input.declared_mime.as_deref(),
            &input.image_data,
            self.settings.max_upload_size,
        )?;

        // 2. Resolve the provider and bind a client to the caller's key
        let kind = input.provider.unwrap_or(self.settings.default_provider);
        let client = self.factory.create(kind, &input.api_key)?;

        tracing::info!(
            provider = %kind,
            model = %client.model(),
            size_bytes = input.image_data.len(),
            mime_type = format.mime_type(),
            "Analyzing menu image"
        );

        // 3. Call the provider and normalize its answer
        let started = Instant::now();
        let prompt = build_menu_prompt(&self.settings.target_language);
        let raw_response = client
            .generate_with_image(prompt, input.image_data, format)
            .await?;
        let dishes = parse_menu_response(&raw_response)?;
        let processing_time = started.elapsed().as_secs_f64();

        tracing::info!(
            provider = %kind,
            dishes = dishes.len(),
            "Analysis complete in {:.2}s",
            processing_time
        );

        Ok(AnalysisResult::new(
            dishes,
            raw_response,
            client.kind(),
            client.model(),
            processing_time,
        ))
    }

    fn available_providers(&self) -> Vec<ProviderKind> {
        self.factory.available_providers()
    }

    fn default_provider(&self) -> ProviderKind {
        self.settings.default_provider
    }

    fn max_upload_size(&self) -> usize {
        self.settings.max_upload_size
    }
}
