use crate::analyzer::{analyze_forms, analyze_seo};
use crate::audit::audit_page;
use crate::checker::LinkChecker;
use crate::error::{AuditError, Result};
use crate::findings::{CrawlFindings, StatusOutcome};
use crate::normalize::normalize_url;
use scraper::{Html, Selector};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_PAGE_LIMIT: usize = 5;

/// Bounded breadth-first crawler that drives the per-page audits.
///
/// The outer loop is strictly sequential: one page is fetched, analyzed,
/// audited and its links enqueued before the next dequeue. Parallelism lives
/// one level down, inside each page's link audit. Parallelizing the outer
/// loop would race the page-limit check and the host-scope containment, so
/// the frontier and visited set stay plain owned state.
pub struct Crawler {
    checker: LinkChecker,
    page_limit: usize,
}

impl Crawler {
    pub fn new() -> Self {
        Self {
            checker: LinkChecker::new(),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            checker: LinkChecker::with_timeout(timeout_secs),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = limit;
        self
    }

    /// Crawl from `start_url`, visiting at most the configured number of
    /// pages, and aggregate every page's findings.
    ///
    /// Only a start URL without a derivable hostname is fatal. A page that
    /// fails to fetch consumes its slot in the page budget but contributes
    /// no findings; the crawl moves on without retrying.
    pub async fn crawl(&self, start_url: &str) -> Result<CrawlFindings> {
        let parsed = Url::parse(start_url)
            .map_err(|e| AuditError::InvalidUrl(format!("{}: {}", start_url, e)))?;
        let base_host = parsed
            .host_str()
            .ok_or_else(|| AuditError::InvalidUrl(format!("no hostname in {}", start_url)))?
            .to_string();

        info!(
            "Starting crawl of {} (page limit {})",
            start_url, self.page_limit
        );

        // One probe per crawl; the flag is copied into every page's SEO
        // finding.
        let sitemap_accessible = self.sitemap_accessible(&parsed).await;

        let mut visited: HashSet<String> = HashSet::new();
        let mut frontier: VecDeque<String> = VecDeque::from([start_url.to_string()]);
        let mut findings = CrawlFindings::default();

        while visited.len() < self.page_limit
            && let Some(page_url) = frontier.pop_front()
        {
            // Duplicate enqueues are tolerated and filtered here.
            if !visited.insert(page_url.clone()) {
                continue;
            }

            info!("Crawling {}", page_url);

            let Some(html) = self.checker.fetch_page(&page_url).await else {
                warn!("Skipping {}: page could not be fetched", page_url);
                continue;
            };

            // `Html` is not Send; extract everything in one synchronous
            // block so only owned data crosses the awaits below.
            let (mut seo, forms, same_host_links) = {
                let document = Html::parse_document(&html);
                let seo = analyze_seo(&page_url, &document);
                let forms = analyze_forms(&page_url, &document);
                let links = collect_same_host_links(&page_url, &document, &base_host);
                (seo, forms, links)
            };

            seo.sitemap_accessible = sitemap_accessible;
            findings.seo_checks.push(seo);
            findings.form_checks.extend(forms);

            findings
                .broken_links
                .extend(audit_page(&self.checker, &page_url, &html).await);

            debug!(
                "Discovered {} same-host links on {}",
                same_host_links.len(),
                page_url
            );
            frontier.extend(same_host_links);
        }

        info!(
            "Crawl complete: {} pages visited, {} broken-link findings",
            visited.len(),
            findings.broken_links.len()
        );
        Ok(findings)
    }

    /// Probe `/sitemap.xml` relative to the start URL. Anything but a plain
    /// 200 - including transport failure - counts as not accessible.
    async fn sitemap_accessible(&self, start_url: &Url) -> bool {
        let Ok(sitemap_url) = start_url.join("/sitemap.xml") else {
            return false;
        };
        matches!(
            self.checker.check_status(sitemap_url.as_str()).await,
            StatusOutcome::Status(200)
        )
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect every anchor target that normalizes to the crawl's host scope.
/// Cross-host links are discovered (and audited elsewhere) but never
/// followed.
fn collect_same_host_links(page_url: &str, document: &Html, base_host: &str) -> Vec<String> {
    let anchor_selector = Selector::parse("a[href]").unwrap();

    document
        .select(&anchor_selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| normalize_url(href, page_url))
        .filter(|candidate| {
            Url::parse(candidate)
                .ok()
                .and_then(|u| u.host_str().map(|host| host == base_host))
                .unwrap_or(false)
        })
        .collect()
}
