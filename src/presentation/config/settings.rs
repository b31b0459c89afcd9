use std::fmt;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{AnalysisOptions, MissingApiKeyPolicy};
use crate::infrastructure::llm::OpenAiClientConfig;

use super::Environment;

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub extraction: ExtractionSettings,
    pub analysis: AnalysisSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub service_name: String,
    pub max_upload_mb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            service_name: "CareCompanion Backend".to_string(),
            max_upload_mb: 20,
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub chat_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub max_input_chars: usize,
    pub on_missing_api_key: MissingApiKeyPolicy,
}

impl Default for LlmSettings {
    fn default() -> Self {
        let defaults = OpenAiClientConfig::new("");
        Self {
            api_key: None,
            base_url: defaults.base_url,
            chat_model: defaults.model,
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
            timeout_secs: defaults.timeout.as_secs(),
            max_input_chars: AnalysisOptions::default().max_input_chars,
            on_missing_api_key: MissingApiKeyPolicy::default(),
        }
    }
}

impl fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_input_chars", &self.max_input_chars)
            .field("on_missing_api_key", &self.on_missing_api_key)
            .finish()
    }
}

impl LlmSettings {
    /// Client configuration, or `None` when no usable API key is set.
    pub fn client_config(&self) -> Option<OpenAiClientConfig> {
        let api_key = self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())?;
        Some(OpenAiClientConfig {
            api_key: api_key.to_string(),
            base_url: self.base_url.clone(),
            model: self.chat_model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    pub ocr: OcrSettings,
    pub pdf: PdfExtractionSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    pub binary_path: String,
    /// Tesseract language code(s), e.g. `deu` or `deu+eng`.
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            binary_path: "tesseract".to_string(),
            language: "deu".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PdfExtractionSettings {
    pub timeout_secs: u64,
}

impl Default for PdfExtractionSettings {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub min_text_chars: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            min_text_chars: AnalysisOptions::default().min_text_chars,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}

impl Settings {
    /// Layers the optional `appsettings.{env}` file and `APP_*` variables
    /// (`__` between sections, e.g. `APP_LLM__CHAT_MODEL`) over the defaults.
    /// `OPENAI_API_KEY` fills the API key when no other source set it.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let configuration = Config::builder()
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = configuration.try_deserialize()?;

        if settings.llm.api_key.is_none() {
            settings.llm.api_key = std::env::var(OPENAI_API_KEY_VAR)
                .ok()
                .filter(|k| !k.trim().is_empty());
        }

        Ok(settings)
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            min_text_chars: self.analysis.min_text_chars,
            max_input_chars: self.llm.max_input_chars,
            missing_api_key: self.llm.on_missing_api_key,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_mb * 1024 * 1024
    }
}
