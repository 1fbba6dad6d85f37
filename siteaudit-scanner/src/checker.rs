use crate::findings::{LinkClass, StatusOutcome};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// User-agent presented to audited sites. Some origins serve different
/// content (or block outright) when they see a non-browser agent.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/120";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MAX_REDIRECTS: usize = 5;

/// Issues status probes and page fetches for the crawl.
///
/// One checker wraps one pooled `reqwest::Client`; cloning is cheap and all
/// per-page probes share its connections. Every received HTTP status counts
/// as successful transport - 4xx/5xx are signals, not errors.
#[derive(Clone)]
pub struct LinkChecker {
    client: Client,
}

impl LinkChecker {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Probe a URL and report what came back. Single attempt, no retries:
    /// the audit favors finishing in bounded time over exhaustive accuracy.
    pub async fn check_status(&self, url: &str) -> StatusOutcome {
        match self.client.get(url).send().await {
            Ok(response) => {
                let code = response.status().as_u16();
                debug!("Probe {} -> {}", url, code);
                StatusOutcome::Status(code)
            }
            Err(e) => {
                debug!("Probe {} failed: {}", url, e);
                StatusOutcome::Failed
            }
        }
    }

    /// Fetch a page body for analysis. Any received status yields the body
    /// (an on-site 404 page is still worth analyzing); only transport
    /// failures return `None`.
    pub async fn fetch_page(&self, url: &str) -> Option<String> {
        match self.client.get(url).send().await {
            Ok(response) => match response.text().await {
                Ok(body) => Some(body),
                Err(e) => {
                    warn!("Failed to read body of {}: {}", url, e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                None
            }
        }
    }
}

impl Default for LinkChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Classification policy for anchor probes. Healthy 2xx links are not
/// reported at all; only anomalies become findings.
pub fn classify_anchor_status(outcome: StatusOutcome) -> Option<LinkClass> {
    match outcome {
        StatusOutcome::Failed => Some(LinkClass::RequestFailed),
        StatusOutcome::Status(code) if code >= 400 => Some(LinkClass::Broken),
        StatusOutcome::Status(code) if (300..400).contains(&code) => Some(LinkClass::Redirect),
        _ => None,
    }
}

/// Classification policy for image probes. Redirected images still render,
/// so unlike anchors a 3xx is not reported.
pub fn classify_image_status(outcome: StatusOutcome) -> Option<LinkClass> {
    match outcome {
        StatusOutcome::Failed => Some(LinkClass::BrokenImage),
        StatusOutcome::Status(code) if code >= 400 => Some(LinkClass::BrokenImage),
        _ => None,
    }
}
