use crate::pagespeed::{PageSpeedClient, PerformanceReport};
use crate::tracking::{TrackingAuditor, TrackingReport};
use serde::{Deserialize, Serialize};
use siteaudit_scanner::error::Result;
use siteaudit_scanner::findings::{BrokenLinkFinding, FormFinding, SeoFinding};
use siteaudit_scanner::{Crawler, crawler::DEFAULT_PAGE_LIMIT};
use std::sync::Arc;
use tracing::{info, warn};

/// Options for configuring an audit run.
pub struct AuditOptions {
    pub url: String,
    pub page_limit: usize,
    pub check_performance: bool,
    pub check_tracking: bool,
}

impl AuditOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            page_limit: DEFAULT_PAGE_LIMIT,
            check_performance: true,
            check_tracking: true,
        }
    }
}

/// Callback for reporting audit progress to the caller's UI.
pub type AuditProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Everything one audit produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub url: String,
    pub generated_at: String,
    pub broken_links: Vec<BrokenLinkFinding>,
    pub seo_checks: Vec<SeoFinding>,
    pub form_checks: Vec<FormFinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<TrackingReport>,
}

/// Run the crawl and the optional third-party audits concurrently.
///
/// The crawl is the audit: its failure (malformed start URL) is the only
/// fatal path. Performance and tracking probes degrade to `None` on any
/// error so a flaky external API never sinks the findings.
pub async fn execute_audit(
    options: AuditOptions,
    progress_callback: Option<AuditProgressCallback>,
) -> Result<AuditReport> {
    let AuditOptions {
        url,
        page_limit,
        check_performance,
        check_tracking,
    } = options;

    info!("Audit started: {}", url);
    if let Some(ref callback) = progress_callback {
        callback(format!("Auditing {}", url));
    }

    let crawler = Crawler::new().with_page_limit(page_limit);
    let crawl_future = crawler.crawl(&url);

    let performance_future = async {
        if !check_performance {
            return None;
        }
        match PageSpeedClient::from_env().fetch(&url).await {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("PageSpeed audit failed for {}: {}", url, e);
                None
            }
        }
    };

    let tracking_future = async {
        if !check_tracking {
            return None;
        }
        match TrackingAuditor::new().audit(&url).await {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("Tracking audit failed for {}: {}", url, e);
                None
            }
        }
    };

    let (crawl, performance, tracking) =
        tokio::join!(crawl_future, performance_future, tracking_future);
    let findings = crawl?;

    if let Some(ref callback) = progress_callback {
        callback(format!(
            "Audit complete: {} pages, {} link findings",
            findings.seo_checks.len(),
            findings.broken_links.len()
        ));
    }

    Ok(AuditReport {
        url,
        generated_at: chrono::Utc::now().to_rfc3339(),
        broken_links: findings.broken_links,
        seo_checks: findings.seo_checks,
        form_checks: findings.form_checks,
        performance,
        tracking,
    })
}
