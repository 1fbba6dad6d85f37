use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const PAGESPEED_API_URL: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";
pub const PAGESPEED_API_KEY_ENV: &str = "PAGESPEED_API_KEY";

/// Performance metrics distilled from two PageSpeed Insights runs (mobile
/// and desktop). Lab metrics come from the mobile run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub mobile_score: Option<u32>,
    pub desktop_score: Option<u32>,
    /// Largest Contentful Paint in seconds, rounded to two decimals.
    pub lcp_seconds: Option<f64>,
    /// Cumulative Layout Shift, rounded to two decimals.
    pub cls: Option<f64>,
    /// Total Blocking Time in whole milliseconds.
    pub tbt_ms: Option<u64>,
}

/// Thin client for the Google PageSpeed Insights v5 API.
///
/// The lighthouse payload is huge and mostly irrelevant, so responses are
/// navigated dynamically instead of modelled as typed structs. Missing
/// audits degrade to `None` fields, and any transport or API error is the
/// caller's cue to drop performance data from the aggregate report.
pub struct PageSpeedClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl PageSpeedClient {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url: api_url.into(),
            api_key,
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            PAGESPEED_API_URL,
            std::env::var(PAGESPEED_API_KEY_ENV).ok(),
        )
    }

    pub async fn fetch(&self, url: &str) -> Result<PerformanceReport, reqwest::Error> {
        let mobile = self.fetch_strategy(url, "mobile").await?;
        let desktop = self.fetch_strategy(url, "desktop").await?;

        Ok(PerformanceReport {
            mobile_score: category_score(&mobile),
            desktop_score: category_score(&desktop),
            lcp_seconds: audit_metric(&mobile, "largest-contentful-paint")
                .map(|ms| round2(ms / 1000.0)),
            cls: audit_metric(&mobile, "cumulative-layout-shift").map(round2),
            tbt_ms: audit_metric(&mobile, "total-blocking-time").map(|ms| ms.round() as u64),
        })
    }

    async fn fetch_strategy(&self, url: &str, strategy: &str) -> Result<Value, reqwest::Error> {
        debug!("PageSpeed {} run for {}", strategy, url);

        let mut query: Vec<(&str, &str)> = vec![("url", url), ("strategy", strategy)];
        if let Some(ref key) = self.api_key {
            query.push(("key", key));
        }

        self.client
            .get(&self.api_url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await
    }
}

impl Default for PageSpeedClient {
    fn default() -> Self {
        Self::from_env()
    }
}

fn category_score(data: &Value) -> Option<u32> {
    data.pointer("/lighthouseResult/categories/performance/score")
        .and_then(Value::as_f64)
        .map(|score| (score * 100.0).round() as u32)
}

fn audit_metric(data: &Value, audit: &str) -> Option<f64> {
    data.pointer(&format!("/lighthouseResult/audits/{}/numericValue", audit))
        .and_then(Value::as_f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
