//! Solicitation source backed by a W3C WebDriver server (chromedriver,
//! geckodriver, selenium grid).
//!
//! The listing page is rendered client-side, so the page is loaded in a
//! headless browser, we wait until the first posting block shows up, and
//! then hand the rendered DOM to [`ListingParser`]. One browser session is
//! created per call and always deleted before the call returns. If the call
//! is cancelled mid-scan, dropping the `BrowserSession` sends the delete
//! from a background task.

use crate::adapters::listing::ListingParser;
use crate::domain::model::Solicitation;
use crate::domain::ports::{ListingSelectors, SolicitationSource};
use crate::utils::error::{Result, ScoutError};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

pub struct WebDriverSource {
    client: Client,
    webdriver_url: String,
    parser: ListingParser,
    block_selector: String,
    wait: Duration,
    poll_interval: Duration,
}

impl WebDriverSource {
    pub fn new(
        webdriver_url: impl Into<String>,
        selectors: &ListingSelectors,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            webdriver_url: webdriver_url.into(),
            parser: ListingParser::new(selectors)?,
            block_selector: selectors.block.clone(),
            wait: Duration::from_secs(10),
            poll_interval: Duration::from_millis(250),
        })
    }

    pub fn with_wait(mut self, wait: Duration, poll_interval: Duration) -> Self {
        self.wait = wait;
        self.poll_interval = poll_interval;
        self
    }

    async fn scrape(&self, portal_url: &str) -> Result<Vec<Solicitation>> {
        let mut session = self.open_session().await?;
        let outcome = self.scan(&session.id, portal_url).await;
        self.close_session(&mut session).await;
        outcome
    }

    async fn scan(&self, session: &str, portal_url: &str) -> Result<Vec<Solicitation>> {
        self.command(
            Method::POST,
            &format!("session/{}/url", session),
            Some(json!({ "url": portal_url })),
        )
        .await?;

        self.wait_for_blocks(session).await?;

        let source = self
            .command(Method::GET, &format!("session/{}/source", session), None)
            .await?;
        let html = source.as_str().ok_or_else(|| ScoutError::BrowserError {
            message: "page source was not a string".to_string(),
        })?;

        Ok(self.parser.parse(html, portal_url))
    }

    async fn open_session(&self) -> Result<BrowserSession> {
        let capabilities = json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": {
                        "args": ["--headless", "--no-sandbox", "--disable-dev-shm-usage"]
                    }
                }
            }
        });

        let value = self
            .command(Method::POST, "session", Some(capabilities))
            .await?;
        let session = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| ScoutError::BrowserError {
                message: "new session response had no sessionId".to_string(),
            })?;

        tracing::debug!("Opened browser session {}", session);
        Ok(BrowserSession {
            client: self.client.clone(),
            url: self.endpoint(&format!("session/{}", session)),
            id: session.to_string(),
            closed: false,
        })
    }

    async fn close_session(&self, session: &mut BrowserSession) {
        let path = format!("session/{}", session.id);
        match self.command(Method::DELETE, &path, None).await {
            Ok(_) => tracing::debug!("Closed browser session {}", session.id),
            Err(e) => tracing::warn!("⚠️ Failed to close browser session {}: {}", session.id, e),
        }
        session.closed = true;
    }

    /// Polls until at least one posting block exists or the wait expires.
    async fn wait_for_blocks(&self, session: &str) -> Result<()> {
        let deadline = Instant::now() + self.wait;
        let query = json!({ "using": "css selector", "value": self.block_selector });

        loop {
            let found = self
                .command(
                    Method::POST,
                    &format!("session/{}/elements", session),
                    Some(query.clone()),
                )
                .await?;

            if found.as_array().is_some_and(|elements| !elements.is_empty()) {
                return Ok(());
            }

            if Instant::now() >= deadline {
                return Err(ScoutError::BrowserError {
                    message: format!(
                        "no element matching '{}' after {:?}",
                        self.block_selector, self.wait
                    ),
                });
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.webdriver_url.trim_end_matches('/'), path)
    }

    /// Sends one WebDriver command and returns the `value` member of the reply.
    async fn command(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let mut request = self.client.request(method, self.endpoint(path));
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let mut payload: Value = response.json().await.unwrap_or(Value::Null);
        let value = payload.get_mut("value").map(Value::take).unwrap_or(Value::Null);

        if !status.is_success() {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .or_else(|| value.get("error").and_then(Value::as_str))
                .unwrap_or("unknown WebDriver error");
            return Err(ScoutError::BrowserError {
                message: format!("{} {}: {}", status, path, message),
            });
        }

        Ok(value)
    }
}

/// A live remote session. Deleted explicitly by `close_session`; if the
/// owning future is dropped first, `Drop` schedules the delete instead.
struct BrowserSession {
    client: Client,
    url: String,
    id: String,
    closed: bool,
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if self.closed {
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("⚠️ Browser session {} abandoned outside a runtime", self.id);
            return;
        };

        tracing::warn!("⚠️ Scrape cancelled, closing browser session {} in background", self.id);
        let request = self.client.delete(&self.url);
        let id = std::mem::take(&mut self.id);
        runtime.spawn(async move {
            match request.send().await {
                Ok(_) => tracing::debug!("Closed abandoned browser session {}", id),
                Err(e) => tracing::warn!("⚠️ Failed to close abandoned browser session {}: {}", id, e),
            }
        });
    }
}

#[async_trait]
impl SolicitationSource for WebDriverSource {
    async fn fetch_open(&self, portal_url: &str) -> Vec<Solicitation> {
        match self.scrape(portal_url).await {
            Ok(listings) => {
                if listings.is_empty() {
                    tracing::warn!("⚠️ Found blocks but couldn't parse any title/link pairs");
                } else {
                    tracing::info!("✅ Scraped {} solicitations from {}", listings.len(), portal_url);
                }
                listings
            }
            Err(e) => {
                tracing::error!("❌ Error scraping {} with browser: {}", portal_url, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const LISTING: &str = r#"<html><body>
        <div class="p-20px border-b">
          <div class="overflow-hidden text-ellipsis">Roof Repair</div>
          <a role="button" href="/solicitations/city-of-memphis-95/77">View</a>
        </div>
    </body></html>"#;

    fn source(server: &MockServer) -> WebDriverSource {
        WebDriverSource::new(server.base_url(), &ListingSelectors::default(), 5)
            .unwrap()
            .with_wait(Duration::from_millis(200), Duration::from_millis(50))
    }

    #[tokio::test]
    async fn test_full_session_scrapes_and_closes() {
        let server = MockServer::start();
        let new_session = server.mock(|when, then| {
            when.method(POST).path("/session").body_contains("--headless");
            then.status(200)
                .json_body(json!({"value": {"sessionId": "s1", "capabilities": {}}}));
        });
        let navigate = server.mock(|when, then| {
            when.method(POST)
                .path("/session/s1/url")
                .body_contains("https://www.beaconbid.com/open");
            then.status(200).json_body(json!({"value": null}));
        });
        let elements = server.mock(|when, then| {
            when.method(POST)
                .path("/session/s1/elements")
                .body_contains("div.p-20px.border-b");
            then.status(200).json_body(
                json!({"value": [{"element-6066-11e4-a52e-4f735466cecf": "e1"}]}),
            );
        });
        let page_source = server.mock(|when, then| {
            when.method(GET).path("/session/s1/source");
            then.status(200).json_body(json!({ "value": LISTING }));
        });
        let delete = server.mock(|when, then| {
            when.method(DELETE).path("/session/s1");
            then.status(200).json_body(json!({"value": null}));
        });

        let listings = source(&server)
            .fetch_open("https://www.beaconbid.com/open")
            .await;

        new_session.assert();
        navigate.assert();
        elements.assert();
        page_source.assert();
        delete.assert();
        assert_eq!(
            listings,
            vec![Solicitation::new(
                "Roof Repair",
                "https://www.beaconbid.com/solicitations/city-of-memphis-95/77"
            )]
        );
    }

    #[tokio::test]
    async fn test_wait_timeout_returns_empty_and_closes_session() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/session");
            then.status(200).json_body(json!({"value": {"sessionId": "s2"}}));
        });
        server.mock(|when, then| {
            when.method(POST).path("/session/s2/url");
            then.status(200).json_body(json!({"value": null}));
        });
        server.mock(|when, then| {
            when.method(POST).path("/session/s2/elements");
            then.status(200).json_body(json!({"value": []}));
        });
        let page_source = server.mock(|when, then| {
            when.method(GET).path("/session/s2/source");
            then.status(200).json_body(json!({ "value": LISTING }));
        });
        let delete = server.mock(|when, then| {
            when.method(DELETE).path("/session/s2");
            then.status(200).json_body(json!({"value": null}));
        });

        let listings = source(&server).fetch_open("https://portal.example/open").await;

        assert!(listings.is_empty());
        assert_eq!(page_source.hits(), 0);
        delete.assert();
    }

    #[tokio::test]
    async fn test_navigation_error_returns_empty_and_closes_session() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/session");
            then.status(200).json_body(json!({"value": {"sessionId": "s3"}}));
        });
        server.mock(|when, then| {
            when.method(POST).path("/session/s3/url");
            then.status(500).json_body(json!({
                "value": {"error": "unknown error", "message": "net::ERR_NAME_NOT_RESOLVED"}
            }));
        });
        let delete = server.mock(|when, then| {
            when.method(DELETE).path("/session/s3");
            then.status(200).json_body(json!({"value": null}));
        });

        let listings = source(&server).fetch_open("https://portal.example/open").await;

        assert!(listings.is_empty());
        delete.assert();
    }

    #[tokio::test]
    async fn test_cancelled_fetch_still_closes_session() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/session");
            then.status(200).json_body(json!({"value": {"sessionId": "s9"}}));
        });
        server.mock(|when, then| {
            when.method(POST).path("/session/s9/url");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!({"value": null}));
        });
        let delete = server.mock(|when, then| {
            when.method(DELETE).path("/session/s9");
            then.status(200).json_body(json!({"value": null}));
        });

        let source = source(&server);
        let outcome = tokio::time::timeout(
            Duration::from_millis(100),
            source.fetch_open("https://portal.example/open"),
        )
        .await;
        assert!(outcome.is_err());

        tokio::time::sleep(Duration::from_millis(800)).await;
        assert_eq!(delete.hits(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_webdriver_returns_empty() {
        let source = WebDriverSource::new("http://127.0.0.1:1", &ListingSelectors::default(), 2)
            .unwrap();
        let listings = source.fetch_open("https://portal.example/open").await;
        assert!(listings.is_empty());
    }
}
