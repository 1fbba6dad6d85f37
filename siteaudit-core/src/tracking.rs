use reqwest::Client;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use siteaudit_scanner::checker::BROWSER_USER_AGENT;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// How a detected tag ended up on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagSource {
    #[serde(rename = "Hard-coded")]
    HardCoded,
    #[serde(rename = "Via GTM")]
    ViaGtm,
    #[serde(rename = "Not Found")]
    NotFound,
}

impl fmt::Display for TagSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TagSource::HardCoded => "Hard-coded",
            TagSource::ViaGtm => "Via GTM",
            TagSource::NotFound => "Not Found",
        })
    }
}

/// Presence of the common analytics and advertising tags on the start page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingReport {
    pub page_url: String,
    pub ga4_present: bool,
    pub ga4_source: TagSource,
    pub gtm_present: bool,
    pub meta_pixel_present: bool,
    pub meta_pixel_source: TagSource,
}

/// Detects tracking tags by pattern-matching over the page's script text.
///
/// Only the start page is inspected; tags loaded by JavaScript at runtime
/// are invisible here (no rendering happens anywhere in this tool).
pub struct TrackingAuditor {
    client: Client,
}

impl TrackingAuditor {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    pub async fn audit(&self, url: &str) -> Result<TrackingReport, reqwest::Error> {
        let body = self.client.get(url).send().await?.text().await?;

        // Html is not Send; parsing stays after the last await.
        let scripts = collect_script_text(&body);
        debug!("Tracking audit of {}: {} bytes of script text", url, scripts.len());

        Ok(detect_tags(url, &scripts))
    }
}

impl Default for TrackingAuditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Concatenate every `<script>`'s inline text, or its `src` when it has no
/// body, into one haystack.
fn collect_script_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let script_selector = Selector::parse("script").unwrap();

    document
        .select(&script_selector)
        .map(|script| {
            let inline = script.inner_html();
            if inline.is_empty() {
                script.value().attr("src").unwrap_or_default().to_string()
            } else {
                inline
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The detection rules, pure over the concatenated script text.
pub fn detect_tags(page_url: &str, scripts: &str) -> TrackingReport {
    let gtm_present = scripts.contains("googletagmanager.com/gtm.js");

    let ga4_hardcoded = scripts.contains("gtag('config'");
    let ga4_via_gtm = gtm_present && scripts.contains("G-");

    let meta_hardcoded = scripts.contains("fbq('init'");
    let meta_via_gtm = gtm_present && scripts.to_lowercase().contains("facebook");

    TrackingReport {
        page_url: page_url.to_string(),
        ga4_present: ga4_hardcoded || ga4_via_gtm,
        ga4_source: if ga4_hardcoded {
            TagSource::HardCoded
        } else if ga4_via_gtm {
            TagSource::ViaGtm
        } else {
            TagSource::NotFound
        },
        gtm_present,
        meta_pixel_present: meta_hardcoded || meta_via_gtm,
        meta_pixel_source: if meta_hardcoded {
            TagSource::HardCoded
        } else if meta_via_gtm {
            TagSource::ViaGtm
        } else {
            TagSource::NotFound
        },
    }
}
