use secrecy::Secret;
use serde::Deserialize;
use service_core::config::{self as core_config, get_env, get_env_parsed, is_prod};
use service_core::error::AppError;
use std::time::Duration;

/// Default per-request timeout for upstream calls.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub service_name: String,
    pub gemini: GeminiSettings,
}

/// Where and how to reach the generative-language API.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    /// e.g. `https://generativelanguage.googleapis.com/v1beta`
    pub base_url: String,
    pub api_key: Secret<String>,
    /// e.g. `gemini-1.5-flash`
    pub model: String,
    pub request_timeout: Duration,
}

impl AiConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = is_prod();

        let timeout_secs = get_env_parsed(
            "GEMINI_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
            is_prod,
        )?;

        Ok(AiConfig {
            common,
            service_name: get_env("SERVICE_NAME", Some("ai-service"), is_prod)?,
            gemini: GeminiSettings {
                base_url: get_env(
                    "GEMINI_API_BASE_URL",
                    Some("https://generativelanguage.googleapis.com/v1beta"),
                    is_prod,
                )?,
                api_key: Secret::new(get_env("GEMINI_API_KEY", None, is_prod)?),
                model: get_env("GEMINI_API_MODEL", Some("gemini-1.5-flash"), is_prod)?,
                request_timeout: Duration::from_secs(timeout_secs),
            },
        })
    }

    /// Configuration pointing at an arbitrary API base, for tests and local stubs.
    pub fn with_base_url(port: u16, base_url: impl Into<String>, api_key: &str) -> Self {
        AiConfig {
            common: core_config::Config { port },
            service_name: "ai-service".to_string(),
            gemini: GeminiSettings {
                base_url: base_url.into(),
                api_key: Secret::new(api_key.to_string()),
                model: "gemini-1.5-flash".to_string(),
                request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            },
        }
    }
}
