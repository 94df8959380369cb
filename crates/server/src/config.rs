//! # Application Configuration
//!
//! This module defines the configuration structure for `profilescout-server` and
//! the logic for loading it from a `config.yml` file and environment variables.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use profilescout::{
    enrich::{default_max_concurrency, EnrichOptions},
    extract::{DEFAULT_BLOCKED_URL_FRAGMENT, DEFAULT_PROFILE_MARKER},
    prompts::{SUMMARY_SYSTEM_PROMPT, SUMMARY_USER_PROMPT},
    providers::{
        ai::openai::{DEFAULT_OPENAI_API_URL, DEFAULT_OPENAI_MODEL},
        profile::linkedin::{DEFAULT_LINKEDIN_API_URL, DEFAULT_LINKEDIN_AUTH_URL},
        search::oxylabs::{SearchOptions, DEFAULT_OXYLABS_API_URL},
    },
};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::sync::OnceLock;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound on participants processed at once. Defaults to the CPU count plus four, capped at 32.
    #[serde(default)]
    pub max_concurrency: Option<usize>,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub prompts: PromptConfig,
}

fn default_port() -> u16 {
    9090
}

/// Settings for the web search provider.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub api_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub source: String,
    pub domain: String,
    pub geo_location: String,
    pub locale: String,
    pub pages: u32,
    pub limit: u32,
    /// Result URLs containing this fragment are ignored.
    pub blocked_url_fragment: String,
    /// The path prefix a profile URL must contain.
    pub profile_marker: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let options = SearchOptions::default();
        Self {
            api_url: DEFAULT_OXYLABS_API_URL.to_string(),
            username: None,
            password: None,
            source: options.source,
            domain: options.domain,
            geo_location: options.geo_location,
            locale: options.locale,
            pages: 1,
            limit: 5,
            blocked_url_fragment: DEFAULT_BLOCKED_URL_FRAGMENT.to_string(),
            profile_marker: DEFAULT_PROFILE_MARKER.to_string(),
        }
    }
}

impl SearchConfig {
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            source: self.source.clone(),
            domain: self.domain.clone(),
            geo_location: self.geo_location.clone(),
            locale: self.locale.clone(),
        }
    }
}

/// Settings for the profile provider session.
///
/// A cookie export takes precedence over account credentials.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ProfileConfig {
    pub api_url: String,
    pub auth_url: String,
    pub cookies_path: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_LINKEDIN_API_URL.to_string(),
            auth_url: DEFAULT_LINKEDIN_AUTH_URL.to_string(),
            cookies_path: None,
            username: None,
            password: None,
        }
    }
}

/// Settings for the chat-completion provider.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AiConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model_name: String,
    pub temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_OPENAI_API_URL.to_string(),
            api_key: None,
            model_name: DEFAULT_OPENAI_MODEL.to_string(),
            temperature: 0.0,
        }
    }
}

/// Prompt templates for the summary task. `{profile}` marks the profile data.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PromptConfig {
    pub summary_system_prompt: String,
    pub summary_user_prompt: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            summary_system_prompt: SUMMARY_SYSTEM_PROMPT.to_string(),
            summary_user_prompt: SUMMARY_USER_PROMPT.to_string(),
        }
    }
}

impl AppConfig {
    /// The pipeline options described by this configuration.
    pub fn enrich_options(&self) -> EnrichOptions {
        EnrichOptions {
            pages: self.search.pages,
            limit: self.search.limit,
            blocked_url_fragment: self.search.blocked_url_fragment.clone(),
            profile_marker: self.search.profile_marker.clone(),
            max_concurrency: self
                .max_concurrency
                .filter(|n| *n > 0)
                .unwrap_or_else(default_max_concurrency),
            system_prompt: self.prompts.summary_system_prompt.clone(),
            user_prompt: self.prompts.summary_user_prompt.clone(),
        }
    }
}

fn env_placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").expect("placeholder pattern is valid")
    })
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let expanded_content = env_placeholder().replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

// Substituted placeholders for unset variables come through as empty strings.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Loads the application configuration from a file and environment variables.
///
/// - Without an override, `config.yml` next to the server manifest is used if present.
/// - `${VAR}` placeholders in the file are replaced with environment values.
/// - `PORT` overrides the port; nested keys are overridden by `PROFILESCOUT_...`
///   variables (e.g. `PROFILESCOUT_AI__API_KEY`).
/// - `OPENAI_API_KEY` is used when no AI key is configured otherwise.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    let config_path = match config_path_override {
        Some(path) => {
            if !std::path::Path::new(path).exists() {
                return Err(ConfigError::NotFound(format!(
                    "Config file not found at '{path}'."
                )));
            }
            path.to_string()
        }
        None => format!("{}/config.yml", env!("CARGO_MANIFEST_DIR")),
    };

    match read_and_substitute(&config_path)? {
        Some(content) => {
            info!("Loading configuration from '{config_path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => info!("'{config_path}' not found. Using defaults and environment only."),
    }

    // Only `PORT` is read without the prefix.
    let port_env: config::Map<String, String> = env::var("PORT")
        .ok()
        .map(|port| ("PORT".to_string(), port))
        .into_iter()
        .collect();

    let settings = builder
        .add_source(Environment::default().source(Some(port_env)).try_parsing(true))
        .add_source(
            Environment::with_prefix("PROFILESCOUT")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    config.search.username = non_empty(config.search.username);
    config.search.password = non_empty(config.search.password);
    config.profile.cookies_path = non_empty(config.profile.cookies_path);
    config.profile.username = non_empty(config.profile.username);
    config.profile.password = non_empty(config.profile.password);
    config.ai.api_key =
        non_empty(config.ai.api_key).or_else(|| non_empty(env::var("OPENAI_API_KEY").ok()));

    Ok(config)
}
