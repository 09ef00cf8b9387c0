use crate::adapters::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::config::{DEFAULT_CATALOG_PATH, DEFAULT_PORTAL_URL};
use crate::domain::ports::{
    CompletionSettings, ConfigProvider, ListingSelectors, SourceKind, SourceSettings,
};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Args;

/// Settings taken from command-line flags and environment variables.
#[derive(Debug, Clone, Args)]
pub struct CliConfig {
    /// Commodity code CSV (class, item, description)
    #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
    pub catalog: String,

    /// Listing page with the open solicitations
    #[arg(long, default_value = DEFAULT_PORTAL_URL)]
    pub portal_url: String,

    /// Google AI API key; AI stages are mocked when absent
    #[arg(long, env = "GOOGLE_AI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub ai_endpoint: String,

    #[arg(long, default_value = "60")]
    pub ai_timeout_seconds: u64,

    /// How to read the listing page
    #[arg(long, value_enum, default_value = "webdriver")]
    pub source: SourceKind,

    /// WebDriver server, e.g. a local chromedriver
    #[arg(long, env = "WEBDRIVER_URL")]
    pub webdriver_url: Option<String>,

    /// Max seconds to wait for the first posting block to render
    #[arg(long, default_value = "10")]
    pub wait_seconds: u64,

    #[arg(long, default_value = "250")]
    pub poll_interval_ms: u64,

    #[arg(long, default_value = "30")]
    pub source_timeout_seconds: u64,

    #[arg(long, default_value = "div.p-20px.border-b")]
    pub block_selector: String,

    #[arg(long, default_value = "div.overflow-hidden.text-ellipsis")]
    pub title_selector: String,

    #[arg(long, default_value = r#"a[role="button"]"#)]
    pub link_selector: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn catalog_path(&self) -> &str {
        &self.catalog
    }

    fn portal_url(&self) -> &str {
        &self.portal_url
    }

    fn completion_settings(&self) -> CompletionSettings {
        CompletionSettings {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            endpoint: self.ai_endpoint.clone(),
            timeout_seconds: self.ai_timeout_seconds,
        }
    }

    fn source_settings(&self) -> SourceSettings {
        SourceSettings {
            kind: self.source,
            webdriver_url: self.webdriver_url.clone(),
            wait_seconds: self.wait_seconds,
            poll_interval_ms: self.poll_interval_ms,
            timeout_seconds: self.source_timeout_seconds,
            selectors: ListingSelectors {
                block: self.block_selector.clone(),
                title: self.title_selector.clone(),
                link: self.link_selector.clone(),
            },
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("catalog", &self.catalog)?;
        validation::validate_url("portal_url", &self.portal_url)?;
        validation::validate_url("ai_endpoint", &self.ai_endpoint)?;
        validation::validate_non_empty_string("model", &self.model)?;
        validation::validate_range("ai_timeout_seconds", self.ai_timeout_seconds, 1, 600)?;
        crate::config::validate_source_settings(&self.source_settings())?;

        tracing::debug!("CLI configuration validation passed");
        Ok(())
    }
}
