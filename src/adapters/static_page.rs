use crate::adapters::listing::ListingParser;
use crate::domain::model::Solicitation;
use crate::domain::ports::{ListingSelectors, SolicitationSource};
use crate::utils::error::{Result, ScoutError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Fetches the listing page with a plain GET, for portals that render
/// server-side.
pub struct StaticPageSource {
    client: Client,
    parser: ListingParser,
}

impl StaticPageSource {
    pub fn new(selectors: &ListingSelectors, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("contract-scout/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            parser: ListingParser::new(selectors)?,
        })
    }

    async fn scrape(&self, portal_url: &str) -> Result<Vec<Solicitation>> {
        let response = self.client.get(portal_url).send().await?;
        let status = response.status();
        tracing::debug!("Listing page status: {}", status);

        if !status.is_success() {
            return Err(ScoutError::BrowserError {
                message: format!("listing page returned {}", status),
            });
        }

        let html = response.text().await?;
        Ok(self.parser.parse(&html, portal_url))
    }
}

#[async_trait]
impl SolicitationSource for StaticPageSource {
    async fn fetch_open(&self, portal_url: &str) -> Vec<Solicitation> {
        match self.scrape(portal_url).await {
            Ok(listings) => listings,
            Err(e) => {
                tracing::error!("❌ Error fetching listing {}: {}", portal_url, e);
                Vec::new()
            }
        }
    }
}

/// Used when no listing source is configured.
pub struct DisabledSource;

#[async_trait]
impl SolicitationSource for DisabledSource {
    async fn fetch_open(&self, _portal_url: &str) -> Vec<Solicitation> {
        tracing::info!("📴 Solicitation source disabled, skipping scrape");
        Vec::new()
    }
}
