use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GenieConfig {
    /// Generative model settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Relay server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Configuration for the generative model provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Model identifier (e.g., "gemini-2.5-flash")
    #[serde(default = "default_model")]
    pub model: String,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
    /// Transport timeout in seconds; no timeout when unset
    pub timeout: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: None,
            base_url: None,
            timeout: None,
        }
    }
}

/// Configuration for the relay server
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address the relay listens on
    #[serde(default = "default_addr")]
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_addr() -> String {
    "127.0.0.1:3000".to_string()
}

impl ProviderConfig {
    /// Resolve the API key: configuration first, then `GEMINI_API_KEY`, then `API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }
}

impl GenieConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_GENIE__ prefix
    /// 2. recipe-genie.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_GENIE__PROVIDER__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("recipe-genie").required(false))
            .add_source(
                Environment::with_prefix("RECIPE_GENIE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
