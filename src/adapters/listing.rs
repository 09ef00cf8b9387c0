//! Extracts (title, url) pairs from a rendered solicitation listing page.
//!
//! The portal shows one "posting block" per open solicitation. Inside each
//! block there is a title element and a "View" button linking to the detail
//! page. Both browser-driven and plain HTTP sources feed their HTML through
//! [`ListingParser`].

use crate::domain::model::Solicitation;
use crate::domain::ports::ListingSelectors;
use crate::utils::error::{Result, ScoutError};
use scraper::{ElementRef, Html, Selector};
use url::Url;

#[derive(Debug, Clone)]
pub struct ListingParser {
    block: Selector,
    title: Selector,
    link: Selector,
}

impl ListingParser {
    pub fn new(selectors: &ListingSelectors) -> Result<Self> {
        Ok(Self {
            block: parse_selector("selectors.block", &selectors.block)?,
            title: parse_selector("selectors.title", &selectors.title)?,
            link: parse_selector("selectors.link", &selectors.link)?,
        })
    }

    pub fn parse(&self, html: &str, portal_url: &str) -> Vec<Solicitation> {
        let base = match Url::parse(portal_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("⚠️ Portal URL '{}' is not absolute: {}", portal_url, e);
                return Vec::new();
            }
        };

        let doc = Html::parse_document(html);
        let mut listings = Vec::new();
        let mut blocks = 0usize;

        for block in doc.select(&self.block) {
            blocks += 1;
            match self.extract_block(block, &base) {
                Some(solicitation) => listings.push(solicitation),
                None => tracing::debug!("Scraper skipping block #{} without title or link", blocks),
            }
        }

        tracing::info!(
            "🔎 Found {} solicitation blocks, parsed {} links",
            blocks,
            listings.len()
        );
        listings
    }

    fn extract_block(&self, block: ElementRef<'_>, base: &Url) -> Option<Solicitation> {
        let title = block
            .select(&self.title)
            .next()
            .map(|el| normalize_text(el.text()))?;
        let href = block
            .select(&self.link)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(str::trim)?;

        if title.is_empty() || href.is_empty() {
            return None;
        }

        Some(Solicitation::new(title, resolve_href(base, href)?))
    }
}

fn parse_selector(field: &str, selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScoutError::InvalidConfigValueError {
        field: field.to_string(),
        value: selector.to_string(),
        reason: format!("Invalid CSS selector: {}", e),
    })
}

/// Rendered text of an element: inner whitespace collapsed, ends trimmed.
fn normalize_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Absolute hrefs are kept verbatim; relative ones resolve against the portal.
pub fn resolve_href(base: &Url, href: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    base.join(href).ok().map(|url| url.to_string())
}
