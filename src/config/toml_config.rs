use crate::adapters::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::config::{DEFAULT_CATALOG_PATH, DEFAULT_PORTAL_URL};
use crate::domain::ports::{
    CompletionSettings, ConfigProvider, ListingSelectors, SourceKind, SourceSettings,
};
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_CATALOG_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub portal_url: String,
    pub webdriver_url: Option<String>,
    pub wait_seconds: Option<u64>,
    pub poll_interval_ms: Option<u64>,
    pub timeout_seconds: Option<u64>,
    pub selectors: ListingSelectors,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::WebDriver,
            portal_url: DEFAULT_PORTAL_URL.to_string(),
            webdriver_url: None,
            wait_seconds: None,
            poll_interval_ms: None,
            timeout_seconds: None,
            selectors: ListingSelectors::default(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScoutError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ScoutError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GOOGLE_AI_API_KEY})；未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// 未替換成功的 `${VAR}` 視為沒有設定
    fn resolved(value: &Option<String>) -> Option<String> {
        value
            .as_ref()
            .filter(|v| !(v.starts_with("${") && v.ends_with('}')))
            .cloned()
    }

    pub fn validate_config(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_path("catalog.path", &self.catalog.path)?;
        validate_url("source.portal_url", &self.source.portal_url)?;

        let completion = self.completion_settings();
        validate_url("completion.endpoint", &completion.endpoint)?;
        validate_non_empty_string("completion.model", &completion.model)?;
        validate_range("completion.timeout_seconds", completion.timeout_seconds, 1, 600)?;

        crate::config::validate_source_settings(&self.source_settings())
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_path(&self) -> &str {
        &self.catalog.path
    }

    fn portal_url(&self) -> &str {
        &self.source.portal_url
    }

    fn completion_settings(&self) -> CompletionSettings {
        CompletionSettings {
            api_key: Self::resolved(&self.completion.api_key),
            model: self
                .completion
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: self
                .completion
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout_seconds: self.completion.timeout_seconds.unwrap_or(60),
        }
    }

    fn source_settings(&self) -> SourceSettings {
        SourceSettings {
            kind: self.source.kind,
            webdriver_url: Self::resolved(&self.source.webdriver_url),
            wait_seconds: self.source.wait_seconds.unwrap_or(10),
            poll_interval_ms: self.source.poll_interval_ms.unwrap_or(250),
            timeout_seconds: self.source.timeout_seconds.unwrap_or(30),
            selectors: self.source.selectors.clone(),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
