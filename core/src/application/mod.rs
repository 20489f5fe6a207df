use crate::{
    domain::{
        common::{MenuJudgeConfig, entities::app_errors::CoreError},
        menu::services::{AnalysisSettings, MenuService},
    },
    infrastructure::llm::HttpVisionClientFactory,
};

pub type MenuJudgeService = MenuService<HttpVisionClientFactory>;

pub fn create_service(config: MenuJudgeConfig) -> Result<MenuJudgeService, CoreError> {
    let settings = AnalysisSettings {
        default_provider: config.llm.default_provider,
        max_upload_size: config.upload.max_upload_size,
        target_language: config.llm.target_language.clone(),
    };
    let factory = HttpVisionClientFactory::new(config.llm)?;

    Ok(MenuService::new(factory, settings))
}
