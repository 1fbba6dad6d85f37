use crate::checker::{LinkChecker, classify_anchor_status, classify_image_status};
use crate::findings::{BrokenLinkFinding, LinkClass, MISSING_TARGET, StatusOutcome};
use crate::normalize::normalize_url;
use futures::future::join_all;
use scraper::{Html, Selector};
use tracing::debug;

/// Anchor text recorded for image findings.
const IMAGE_ANCHOR_TEXT: &str = "IMAGE";

enum ProbeKind {
    Anchor,
    Image,
}

/// A URL that survived normalization and still needs a network probe.
struct PendingProbe {
    target: String,
    anchor_text: String,
    kind: ProbeKind,
}

/// Audit every `<a>` and `<img>` on a page.
///
/// Elements that can never resolve (`href` missing, `#`, `javascript:`) are
/// recorded immediately without touching the network; targets that fail
/// normalization are silently skipped as out of scope. Everything else is
/// probed concurrently with unbounded fan-out - page link counts are small
/// in practice - and only anomalous outcomes become findings. The order of
/// findings within a page is not deterministic.
pub async fn audit_page(
    checker: &LinkChecker,
    page_url: &str,
    html: &str,
) -> Vec<BrokenLinkFinding> {
    // `Html` is not Send, so all document access happens in this block and
    // only owned strings cross the await below.
    let (mut findings, probes) = {
        let document = Html::parse_document(html);
        collect_probes(page_url, &document)
    };

    debug!(
        "Auditing {}: {} immediate findings, {} probes",
        page_url,
        findings.len(),
        probes.len()
    );

    let checks = probes.into_iter().map(|probe| async move {
        let status = checker.check_status(&probe.target).await;
        let classification = match probe.kind {
            ProbeKind::Anchor => classify_anchor_status(status),
            ProbeKind::Image => classify_image_status(status),
        };
        classification.map(|classification| BrokenLinkFinding {
            page_url: page_url.to_string(),
            target: probe.target,
            anchor_text: probe.anchor_text,
            status,
            classification,
        })
    });

    findings.extend(join_all(checks).await.into_iter().flatten());
    findings
}

fn collect_probes(
    page_url: &str,
    document: &Html,
) -> (Vec<BrokenLinkFinding>, Vec<PendingProbe>) {
    let anchor_selector = Selector::parse("a").unwrap();
    let img_selector = Selector::parse("img").unwrap();

    let mut findings = Vec::new();
    let mut probes = Vec::new();

    for anchor in document.select(&anchor_selector) {
        let href = anchor.value().attr("href");
        let anchor_text = anchor.text().collect::<String>().trim().to_string();

        match href {
            None | Some("") | Some("#") => {
                findings.push(invalid_link(page_url, href, anchor_text));
            }
            Some(href) if href.starts_with("javascript") => {
                findings.push(invalid_link(page_url, Some(href), anchor_text));
            }
            Some(href) => {
                if let Some(target) = normalize_url(href, page_url) {
                    probes.push(PendingProbe {
                        target,
                        anchor_text,
                        kind: ProbeKind::Anchor,
                    });
                }
            }
        }
    }

    for img in document.select(&img_selector) {
        let src = img.value().attr("src").unwrap_or_default();
        if let Some(target) = normalize_url(src, page_url) {
            probes.push(PendingProbe {
                target,
                anchor_text: IMAGE_ANCHOR_TEXT.to_string(),
                kind: ProbeKind::Image,
            });
        }
    }

    (findings, probes)
}

fn invalid_link(page_url: &str, href: Option<&str>, anchor_text: String) -> BrokenLinkFinding {
    BrokenLinkFinding {
        page_url: page_url.to_string(),
        target: href
            .filter(|h| !h.is_empty())
            .unwrap_or(MISSING_TARGET)
            .to_string(),
        anchor_text,
        status: StatusOutcome::NotChecked,
        classification: LinkClass::Invalid,
    }
}
