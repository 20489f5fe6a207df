use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp};

use crate::domain::menu::value_objects::ProviderKind;

pub mod entities;

pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct MenuJudgeConfig {
    pub llm: LLMConfig,
    pub upload: UploadConfig,
}

#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub max_upload_size: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }
}

/// Vendor endpoints and models. Credentials are never part of this config:
/// every request brings its own key.
#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub default_provider: ProviderKind,
    pub anthropic_model: String,
    pub openai_model: String,
    pub gemini_model: String,
    pub anthropic_base_url: String,
    pub openai_base_url: String,
    pub gemini_base_url: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub target_language: String,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            default_provider: ProviderKind::Claude,
            anthropic_model: "claude-3-5-sonnet-20241022".to_string(),
            openai_model: "gpt-4o".to_string(),
            gemini_model: "gemini-2.0-flash".to_string(),
            anthropic_base_url: "https://api.anthropic.com".to_string(),
            openai_base_url: "https://api.openai.com".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 60,
            max_tokens: 4096,
            target_language: "English".to_string(),
        }
    }
}

impl LLMConfig {
    pub fn model_for(&self, kind: ProviderKind) -> &str {
        match kind {
            ProviderKind::Claude => &self.anthropic_model,
            ProviderKind::OpenAi => &self.openai_model,
            ProviderKind::Gemini => &self.gemini_model,
        }
    }

    pub fn base_url_for(&self, kind: ProviderKind) -> &str {
        let url = match kind {
            ProviderKind::Claude => &self.anthropic_base_url,
            ProviderKind::OpenAi => &self.openai_base_url,
            ProviderKind::Gemini => &self.gemini_base_url,
        };
        url.trim_end_matches('/')
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}
