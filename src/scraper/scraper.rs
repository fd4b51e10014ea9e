// scraper.rs
use crate::scraper::ScraperError;
use rand::Rng;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

const ZENROWS_ENDPOINT: &str = "https://api.zenrows.com/v1/";

/// Anything that can turn a search URL into page HTML.
pub trait PageSource: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, ScraperError>;
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub timeout: Duration,
    pub max_attempts: u64,
    /// When set, requests go through ZenRows instead of hitting the site directly.
    pub zenrows_api_key: Option<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            max_attempts: 3,
            zenrows_api_key: None,
        }
    }
}

pub struct RealtorScraper {
    client: Client,
    settings: FetchSettings,
}

impl RealtorScraper {
    pub fn new(settings: FetchSettings) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ScraperError::Transport(e.to_string()))?;

        Ok(Self { client, settings })
    }

    pub fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        const MAX_BACKOFF_SECS: u64 = 10;
        const JITTER_MAX_MILLIS: u64 = 1500;

        let attempts = self.settings.max_attempts.max(1);
        let mut last_err = None;

        for attempt in 1..=attempts {
            let start = Instant::now();

            match self.try_fetch_html(url) {
                Ok(html) => {
                    info!(attempt, elapsed = ?start.elapsed(), bytes = html.len(), "fetched {url}");
                    return Ok(html);
                }
                Err(e) => {
                    warn!(attempt, elapsed = ?start.elapsed(), error = %e, "fetch failed");

                    let retry = e.is_retryable() && attempt < attempts;
                    last_err = Some(e);
                    if !retry {
                        break;
                    }

                    let base = std::cmp::min(2 * attempt, MAX_BACKOFF_SECS);
                    let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_MILLIS);
                    std::thread::sleep(Duration::from_secs(base) + Duration::from_millis(jitter));
                }
            }
        }

        Err(last_err.unwrap_or_else(|| ScraperError::Transport("fetch retry loop failed".into())))
    }

    fn try_fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        match &self.settings.zenrows_api_key {
            Some(api_key) => self.try_fetch_via_zenrows(url, api_key),
            None => self.try_fetch_direct(url),
        }
    }

    fn try_fetch_direct(&self, url: &str) -> Result<String, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("https://www.google.com/"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let resp = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .map_err(|e| ScraperError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScraperError::Transport(format!("HTTP {status} from {url}")));
        }

        resp.text()
            .map_err(|e| ScraperError::Transport(e.to_string()))
    }

    fn try_fetch_via_zenrows(&self, url: &str, api_key: &str) -> Result<String, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("https://www.google.com/"));

        let mut params = HashMap::new();
        params.insert("url", url);
        params.insert("apikey", api_key);
        params.insert("original_status", "true");
        params.insert("mode", "auto");

        let resp = self
            .client
            .get(ZENROWS_ENDPOINT)
            .headers(headers)
            .query(&params)
            .send()
            .map_err(|e| ScraperError::Transport(e.to_string()))?;

        let status = resp.status();

        // ZenRows echoes the target site's status in a header.
        let original_status = resp
            .headers()
            .iter()
            .find(|(k, _)| k.as_str().contains("original"))
            .and_then(|(_, v)| v.to_str().ok())
            .unwrap_or("<none>")
            .to_string();

        let text = resp
            .text()
            .map_err(|e| ScraperError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ScraperError::Transport(format!(
                "ZenRows HTTP {status} ({original_status}): {text}"
            )));
        }

        if is_zenrows_error_body(&text) {
            return Err(ScraperError::Transport(format!(
                "ZenRows API error ({original_status}): {text}"
            )));
        }

        Ok(text)
    }
}

impl PageSource for RealtorScraper {
    fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        self.fetch_html(url)
    }
}

/// ZenRows reports failures as a JSON object with a `code` field, sometimes with a 200.
fn is_zenrows_error_body(text: &str) -> bool {
    if !text.trim_start().starts_with('{') {
        return false;
    }

    serde_json::from_str::<serde_json::Value>(text)
        .map(|json| json.get("code").is_some())
        .unwrap_or(false)
}
