use clap::{Args as ClapArgs, Parser};
use menujudge_core::domain::{
    common::{DEFAULT_MAX_UPLOAD_SIZE, LLMConfig, MenuJudgeConfig, UploadConfig},
    menu::value_objects::ProviderKind,
};
use url::Url;
use validator::Validate;

#[derive(Debug, Clone, Parser, Validate)]
#[command(name = "menujudge")]
#[command(about = "Photograph a restaurant menu, get every dish explained")]
pub struct Args {
    #[command(flatten)]
    #[validate(nested)]
    pub server: ServerArgs,

    #[command(flatten)]
    #[validate(nested)]
    pub upload: UploadArgs,

    #[command(flatten)]
    #[validate(nested)]
    pub llm: LlmArgs,

    #[command(flatten)]
    #[validate(nested)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs, Validate)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Prefix for every route, e.g. `/menujudge`
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs, Validate)]
pub struct UploadArgs {
    /// Largest accepted image, in bytes
    #[arg(long = "max-upload-size", env = "MAX_UPLOAD_SIZE", default_value_t = DEFAULT_MAX_UPLOAD_SIZE)]
    #[validate(range(min = 1))]
    pub max_upload_size: usize,
}

#[derive(Debug, Clone, ClapArgs, Validate)]
pub struct LlmArgs {
    /// Provider used when a request does not pick one: claude, openai or gemini
    #[arg(long = "ai-provider", env = "AI_PROVIDER", default_value = "claude")]
    pub provider: ProviderKind,

    #[arg(long = "anthropic-model", env = "ANTHROPIC_MODEL", default_value = "claude-3-5-sonnet-20241022")]
    pub anthropic_model: String,

    #[arg(long = "openai-model", env = "OPENAI_MODEL", default_value = "gpt-4o")]
    pub openai_model: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    #[arg(long = "anthropic-base-url", env = "ANTHROPIC_BASE_URL", default_value = "https://api.anthropic.com")]
    pub anthropic_base_url: Url,

    #[arg(long = "openai-base-url", env = "OPENAI_BASE_URL", default_value = "https://api.openai.com")]
    pub openai_base_url: Url,

    #[arg(
        long = "gemini-base-url",
        env = "GEMINI_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com"
    )]
    pub gemini_base_url: Url,

    #[arg(long = "llm-timeout-secs", env = "LLM_TIMEOUT_SECS", default_value_t = 60)]
    #[validate(range(min = 1))]
    pub timeout_secs: u64,

    #[arg(long = "llm-max-tokens", env = "LLM_MAX_TOKENS", default_value_t = 4096)]
    #[validate(range(min = 1))]
    pub max_tokens: u32,

    /// Language for translated names and descriptions
    #[arg(long = "target-language", env = "TARGET_LANGUAGE", default_value = "English")]
    #[validate(length(min = 1))]
    pub target_language: String,
}

#[derive(Debug, Clone, ClapArgs, Validate)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(
        long = "log-json",
        env = "LOG_JSON",
        action = clap::ArgAction::Set,
        default_value_t = false
    )]
    pub json: bool,
}

impl From<Args> for MenuJudgeConfig {
    fn from(args: Args) -> Self {
        MenuJudgeConfig {
            llm: LLMConfig {
                default_provider: args.llm.provider,
                anthropic_model: args.llm.anthropic_model,
                openai_model: args.llm.openai_model,
                gemini_model: args.llm.gemini_model,
                anthropic_base_url: args.llm.anthropic_base_url.to_string(),
                openai_base_url: args.llm.openai_base_url.to_string(),
                gemini_base_url: args.llm.gemini_base_url.to_string(),
                timeout_secs: args.llm.timeout_secs,
                max_tokens: args.llm.max_tokens,
                target_language: args.llm.target_language,
            },
            upload: UploadConfig {
                max_upload_size: args.upload.max_upload_size,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["menujudge"]);
        assert_eq!(args.server.port, 5000);
        assert_eq!(args.server.host, "127.0.0.1");
        assert_eq!(args.upload.max_upload_size, 10 * 1024 * 1024);
        assert_eq!(args.llm.provider, ProviderKind::Claude);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_zero_upload_size_is_rejected() {
        let args = Args::parse_from(["menujudge", "--max-upload-size", "0"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_unknown_provider_is_a_parse_error() {
        assert!(Args::try_parse_from(["menujudge", "--ai-provider", "mistral"]).is_err());
    }

    #[test]
    fn test_into_core_config() {
        let args = Args::parse_from([
            "menujudge",
            "--ai-provider",
            "gemini",
            "--openai-base-url",
            "http://127.0.0.1:9000",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ]);
        assert_eq!(args.server.allowed_origins.len(), 2);

        let config = MenuJudgeConfig::from(args);
        assert_eq!(config.llm.default_provider, ProviderKind::Gemini);
        assert_eq!(
            config.llm.base_url_for(ProviderKind::OpenAi),
            "http://127.0.0.1:9000"
        );
    }
}
