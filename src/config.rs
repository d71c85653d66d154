// Configuration loading via the 'config' crate and '.env' files.
// Layering: built-in defaults, then config.toml, then APP_* environment variables.

use anyhow::Result;
use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::models::{Country, Language, SearchCriteria};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_address: String,
    // Base URL of the keyword-metrics API
    pub keyword_api_url: String,
    pub proxy_url: Option<String>,
    pub default_country: Country,
    pub default_language: Language,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Self::defaults()?
            // Load from a configuration file (e.g., config.toml)
            .add_source(File::with_name("config").required(false))
            // Load from environment variables (e.g., APP_KEYWORD_API_URL)
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let builder = Config::builder()
            .set_default("server_address", "127.0.0.1:3000")?
            .set_default("keyword_api_url", "http://localhost:8501")?
            .set_default("default_country", Country::default().code())?
            .set_default("default_language", Language::default().code())?;
        Ok(builder)
    }

    /// Criteria a fresh session starts with.
    pub fn default_criteria(&self) -> SearchCriteria {
        SearchCriteria {
            country: self.default_country,
            language: self.default_language,
        }
    }
}
