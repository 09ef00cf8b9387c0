#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::domain::ports::{SourceKind, SourceSettings};
use crate::utils::error::Result;
use crate::utils::validation;

pub const DEFAULT_CATALOG_PATH: &str = "codes.csv";
pub const DEFAULT_PORTAL_URL: &str = "https://www.beaconbid.com/solicitations/city-of-memphis-95/open";

/// 來源設定檢查，CLI 與 TOML 共用
pub fn validate_source_settings(settings: &SourceSettings) -> Result<()> {
    // 未設定 URL 時改用停用來源，只檢查有給的值
    if settings.kind == SourceKind::WebDriver {
        if let Some(url) = settings.webdriver_url.as_deref().filter(|u| !u.trim().is_empty()) {
            validation::validate_url("source.webdriver_url", url)?;
        }
    }

    validation::validate_range("source.wait_seconds", settings.wait_seconds, 1, 120)?;
    validation::validate_range("source.poll_interval_ms", settings.poll_interval_ms, 10, 10_000)?;
    validation::validate_range("source.timeout_seconds", settings.timeout_seconds, 1, 600)?;
    validation::validate_css_selector("source.selectors.block", &settings.selectors.block)?;
    validation::validate_css_selector("source.selectors.title", &settings.selectors.title)?;
    validation::validate_css_selector("source.selectors.link", &settings.selectors.link)?;

    Ok(())
}
