use crate::domain::model::Solicitation;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Prompt in, text out.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// The language model is optional: without credentials every stage falls back
/// to its mock or sentinel output instead of calling out.
#[derive(Clone)]
pub enum Completion {
    Configured(Arc<dyn CompletionModel>),
    Unconfigured,
}

impl Completion {
    pub fn configured<M: CompletionModel + 'static>(model: M) -> Self {
        Completion::Configured(Arc::new(model))
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Completion::Configured(_))
    }

    pub fn model(&self) -> Option<&dyn CompletionModel> {
        match self {
            Completion::Configured(model) => Some(model.as_ref()),
            Completion::Unconfigured => None,
        }
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Completion::Configured(_) => f.write_str("Completion::Configured"),
            Completion::Unconfigured => f.write_str("Completion::Unconfigured"),
        }
    }
}

/// Live list of open solicitations from a remote portal.
///
/// Implementations never fail: anything that goes wrong while reaching or
/// reading the portal is logged and reported as an empty list.
#[async_trait]
pub trait SolicitationSource: Send + Sync {
    async fn fetch_open(&self, portal_url: &str) -> Vec<Solicitation>;
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_path(&self) -> &str;
    fn portal_url(&self) -> &str;
    fn completion_settings(&self) -> CompletionSettings;
    fn source_settings(&self) -> SourceSettings;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SourceKind {
    #[cfg_attr(feature = "cli", value(name = "webdriver"))]
    WebDriver,
    Http,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSelectors {
    pub block: String,
    pub title: String,
    pub link: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            block: "div.p-20px.border-b".to_string(),
            title: "div.overflow-hidden.text-ellipsis".to_string(),
            link: r#"a[role="button"]"#.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    pub kind: SourceKind,
    pub webdriver_url: Option<String>,
    pub wait_seconds: u64,
    pub poll_interval_ms: u64,
    pub timeout_seconds: u64,
    pub selectors: ListingSelectors,
}
