//! Configuration management for the notice server.
//!
//! Configuration is layered, later sources winning:
//! - Built-in defaults
//! - A YAML file (`NOTICE_CONFIG`, or `notice.yaml` in the working directory)
//! - Environment variables
//! - Command-line flags

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// Config file looked up in the working directory when `NOTICE_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "notice.yaml";

const KNOWN_PROVIDERS: [&str; 2] = ["gemini", "google"];

/// How a generated notice is returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// `{"notice": "..."}`
    #[default]
    Json,
    /// Raw `text/html` body
    Html,
}

impl FromStr for ResponseFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            other => Err(AppError::Config(format!(
                "Unknown response format: {}. Supported: json, html",
                other
            ))),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Config file that was merged, if any
    pub config_file: Option<PathBuf>,

    /// HTTP listener and CORS
    pub server: ServerConfig,

    /// Model provider and generation parameters
    pub llm: LlmConfig,

    /// Prompt and output tunables
    pub notice: NoticeConfig,

    /// Explicit API key (`NOTICE_API_KEY`), checked before `llm.api_key_env`
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Log filter override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,

    /// Origins allowed by CORS
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            allowed_origins: vec![
                "https://serp.indigle.com".to_string(),
                "http://localhost:3000".to_string(),
            ],
        }
    }
}

/// Model provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    /// Base URL override for the provider API
    pub endpoint: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub response_mime_type: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemma-3-12b-it".to_string(),
            endpoint: None,
            api_key_env: "GEMINI_API_KEY".to_string(),
            max_output_tokens: 1024,
            temperature: 0.7,
            response_mime_type: "text/plain".to_string(),
        }
    }
}

/// Prompt and output tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NoticeConfig {
    /// Token the model sees for missing fields
    pub placeholder: String,
    /// Word ceiling stated in the instructions
    pub word_limit: u32,
    /// Infer missing fields from key details
    pub extract_fields: bool,
    /// Wrap output in an HTML document unless the request says otherwise
    pub wrap_document: bool,
    pub response_format: ResponseFormat,
    /// Ask the model to print today's date as the date of issue
    pub include_issue_date: bool,
    /// YAML file with extra notice types
    pub catalog_file: Option<PathBuf>,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            placeholder: "[Placeholder]".to_string(),
            word_limit: 120,
            extract_fields: true,
            wrap_document: false,
            response_format: ResponseFormat::Json,
            include_issue_date: false,
            catalog_file: None,
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    server: Option<ServerConfig>,
    llm: Option<LlmConfig>,
    notice: Option<NoticeConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub log_level: Option<String>,
    pub response_format: Option<ResponseFormat>,
    pub wrap_document: bool,
    pub verbose: bool,
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            server: ServerConfig::default(),
            llm: LlmConfig::default(),
            notice: NoticeConfig::default(),
            api_key: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and the process environment.
    ///
    /// Environment variables:
    /// - `NOTICE_CONFIG`: Path to the YAML config file
    /// - `NOTICE_BIND`: Listen address
    /// - `NOTICE_PROVIDER`: Model provider
    /// - `NOTICE_MODEL`: Model identifier
    /// - `NOTICE_API_KEY`: API key (otherwise `llm.apiKeyEnv` is consulted)
    /// - `NOTICE_RESPONSE_FORMAT`: `json` or `html`
    /// - `RUST_LOG`: Log filter
    /// - `NO_COLOR`: Disable colored output
    ///
    /// An explicit `config_file` takes precedence over `NOTICE_CONFIG`.
    ///
    /// # Example
    /// ```no_run
    /// use notice_core::config::AppConfig;
    ///
    /// let config = AppConfig::load(None).expect("Failed to load config");
    /// println!("Model: {}", config.llm.model);
    /// ```
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        let explicit = config_file
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("NOTICE_CONFIG").ok().map(PathBuf::from));
        let mut config = Self::load_from(explicit.as_deref())?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Defaults merged with a config file.
    ///
    /// An explicit path must exist; without one, `notice.yaml` is merged only
    /// when present.
    pub fn load_from(path: Option<&Path>) -> AppResult<Self> {
        let config = Self::default();

        match path {
            Some(path) if !path.exists() => Err(AppError::Config(format!(
                "Config file does not exist: {:?}",
                path
            ))),
            Some(path) => config.merge_yaml(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    config.merge_yaml(fallback)
                } else {
                    Ok(config)
                }
            }
        }
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();
        result.config_file = Some(path.to_path_buf());

        if let Some(server) = config_file.server {
            result.server = server;
        }

        if let Some(llm) = config_file.llm {
            result.llm = llm;
        }

        if let Some(notice) = config_file.notice {
            result.notice = notice;
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply environment variables read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("NOTICE_BIND") {
            self.server.bind = bind;
        }

        if let Some(provider) = lookup("NOTICE_PROVIDER") {
            self.llm.provider = provider;
        }

        if let Some(model) = lookup("NOTICE_MODEL") {
            self.llm.model = model;
        }

        if let Some(format) = lookup("NOTICE_RESPONSE_FORMAT") {
            self.notice.response_format = format.parse()?;
        }

        self.api_key = lookup("NOTICE_API_KEY").filter(|k| !k.trim().is_empty());

        if let Some(level) = lookup("RUST_LOG") {
            self.log_level = Some(level);
        }

        if lookup("NO_COLOR").is_some() {
            self.no_color = true;
        }

        Ok(())
    }

    /// Apply CLI overrides to the configuration.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(bind) = overrides.bind {
            self.server.bind = bind;
        }

        if let Some(provider) = overrides.provider {
            self.llm.provider = provider;
        }

        if let Some(model) = overrides.model {
            self.llm.model = model;
        }

        if let Some(log_level) = overrides.log_level {
            self.log_level = Some(log_level);
        }

        if let Some(format) = overrides.response_format {
            self.notice.response_format = format;
        }

        if overrides.wrap_document {
            self.notice.wrap_document = true;
        }

        if overrides.verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if overrides.no_color {
            self.no_color = true;
        }

        self
    }

    /// Resolve the model API key from the process environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|key| std::env::var(key).ok())
    }

    /// Resolve the model API key, checking `NOTICE_API_KEY` first.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        lookup(&self.llm.api_key_env).filter(|k| !k.trim().is_empty())
    }

    /// Message returned to callers when no API key is configured.
    pub fn missing_key_message(&self) -> String {
        format!(
            "API key missing. Set {} in environment variables.",
            self.llm.api_key_env
        )
    }

    /// Parsed listen address.
    pub fn bind_addr(&self) -> AppResult<SocketAddr> {
        self.server.bind.parse().map_err(|e| {
            AppError::Config(format!("Invalid bind address {}: {}", self.server.bind, e))
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> AppResult<()> {
        let provider = self.llm.provider.to_lowercase();
        if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.llm.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(AppError::Config(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.notice.word_limit == 0 {
            return Err(AppError::Config(
                "notice.wordLimit must be greater than zero".to_string(),
            ));
        }

        if self.notice.placeholder.trim().is_empty() {
            return Err(AppError::Config(
                "notice.placeholder cannot be empty".to_string(),
            ));
        }

        self.bind_addr()?;

        Ok(())
    }
}
