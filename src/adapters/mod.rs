// Adapters layer: concrete implementations for external systems (language model, listing portal, http).

pub mod gemini;
#[cfg(feature = "server")]
pub mod http;
pub mod listing;
pub mod static_page;
pub mod webdriver;

use crate::domain::ports::{SolicitationSource, SourceKind, SourceSettings};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;

/// Picks the solicitation source named by the settings.
pub fn source_from_settings(settings: &SourceSettings) -> Result<Arc<dyn SolicitationSource>> {
    match settings.kind {
        SourceKind::WebDriver => {
            let Some(webdriver_url) = settings
                .webdriver_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
            else {
                tracing::warn!(
                    "⚠️ No WebDriver URL configured; open solicitations will not be fetched"
                );
                return Ok(Arc::new(static_page::DisabledSource));
            };
            let source = webdriver::WebDriverSource::new(
                webdriver_url,
                &settings.selectors,
                settings.timeout_seconds,
            )?
            .with_wait(
                Duration::from_secs(settings.wait_seconds),
                Duration::from_millis(settings.poll_interval_ms),
            );
            tracing::info!("🌐 Using WebDriver listing source at {}", webdriver_url);
            Ok(Arc::new(source))
        }
        SourceKind::Http => {
            let source =
                static_page::StaticPageSource::new(&settings.selectors, settings.timeout_seconds)?;
            tracing::info!("🌐 Using static HTTP listing source");
            Ok(Arc::new(source))
        }
        SourceKind::Disabled => Ok(Arc::new(static_page::DisabledSource)),
    }
}
