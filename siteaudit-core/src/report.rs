// Report rendering for completed audits

use crate::audit::AuditReport;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            _ => None,
        }
    }
}

const DIVIDER: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

pub fn generate_text_report(report: &AuditReport) -> String {
    let mut out = String::new();

    out.push_str(DIVIDER);
    out.push_str("                    SITEAUDIT WEBSITE AUDIT REPORT\n");
    out.push_str(DIVIDER);
    out.push('\n');
    out.push_str(&format!("Target:       {}\n", report.url));
    out.push_str(&format!("Generated:    {}\n", report.generated_at));
    out.push_str(&format!("Pages found:  {}\n", report.seo_checks.len()));
    out.push('\n');

    // Summary
    out.push_str(DIVIDER);
    out.push_str("SUMMARY\n");
    out.push_str(DIVIDER);
    out.push('\n');
    out.push_str(&format!(
        "  Link findings:  {}\n",
        report.broken_links.len()
    ));
    let form_issues = report
        .form_checks
        .iter()
        .filter(|f| !f.action_valid || !f.submit_reachable)
        .count();
    out.push_str(&format!(
        "  Forms checked:  {} ({} with issues)\n",
        report.form_checks.len(),
        form_issues
    ));
    let pages_missing_title = report
        .seo_checks
        .iter()
        .filter(|s| !s.title_present)
        .count();
    out.push_str(&format!(
        "  Pages missing a title:  {}\n",
        pages_missing_title
    ));
    out.push('\n');

    // Broken links
    if !report.broken_links.is_empty() {
        out.push_str(DIVIDER);
        out.push_str("LINK FINDINGS\n");
        out.push_str(DIVIDER);
        out.push('\n');
        for finding in &report.broken_links {
            out.push_str(&format!(
                "  [{}] {} ({})\n      on {}\n",
                finding.status, finding.target, finding.classification, finding.page_url
            ));
        }
        out.push('\n');
    }

    // SEO per page
    out.push_str(DIVIDER);
    out.push_str("SEO CHECKS\n");
    out.push_str(DIVIDER);
    out.push('\n');
    for seo in &report.seo_checks {
        out.push_str(&format!("  {}\n", seo.page_url));
        out.push_str(&format!(
            "      title: {}  meta description: {}  canonical: {}\n",
            present(seo.title_present),
            present(seo.meta_description_present),
            present(seo.canonical_present)
        ));
        out.push_str(&format!(
            "      h1 count: {}  images missing alt: {}  sitemap.xml: {}\n",
            seo.h1_count,
            seo.missing_alt_count,
            present(seo.sitemap_accessible)
        ));
    }
    out.push('\n');

    // Forms
    if !report.form_checks.is_empty() {
        out.push_str(DIVIDER);
        out.push_str("FORM CHECKS\n");
        out.push_str(DIVIDER);
        out.push('\n');
        for form in &report.form_checks {
            out.push_str(&format!(
                "  Form #{} on {} ({} {} field(s), action {})\n      {}\n",
                form.form_index,
                form.page_url,
                form.method,
                form.field_count,
                form.action,
                form.issue
            ));
        }
        out.push('\n');
    }

    // Performance
    if let Some(ref perf) = report.performance {
        out.push_str(DIVIDER);
        out.push_str("PERFORMANCE (PageSpeed Insights)\n");
        out.push_str(DIVIDER);
        out.push('\n');
        out.push_str(&format!(
            "  Mobile score:   {}\n",
            metric(perf.mobile_score.map(|s| s.to_string()))
        ));
        out.push_str(&format!(
            "  Desktop score:  {}\n",
            metric(perf.desktop_score.map(|s| s.to_string()))
        ));
        out.push_str(&format!(
            "  LCP:            {} s\n",
            metric(perf.lcp_seconds.map(|v| format!("{:.2}", v)))
        ));
        out.push_str(&format!(
            "  CLS:            {}\n",
            metric(perf.cls.map(|v| format!("{:.2}", v)))
        ));
        out.push_str(&format!(
            "  TBT:            {} ms\n",
            metric(perf.tbt_ms.map(|v| v.to_string()))
        ));
        out.push('\n');
    }

    // Tracking
    if let Some(ref tracking) = report.tracking {
        out.push_str(DIVIDER);
        out.push_str("TRACKING TAGS\n");
        out.push_str(DIVIDER);
        out.push('\n');
        out.push_str(&format!(
            "  GTM:         {}\n",
            yes_no(tracking.gtm_present)
        ));
        out.push_str(&format!(
            "  GA4:         {} ({})\n",
            yes_no(tracking.ga4_present),
            tracking.ga4_source
        ));
        out.push_str(&format!(
            "  Meta Pixel:  {} ({})\n",
            yes_no(tracking.meta_pixel_present),
            tracking.meta_pixel_source
        ));
        out.push('\n');
    }

    out.push_str(DIVIDER);
    out.push_str("                          End of Report\n");
    out.push_str(DIVIDER);

    out
}

pub fn generate_json_report(report: &AuditReport) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "siteaudit",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": report.generated_at,
                "format": "json"
            },
            "target": report.url,
            "summary": {
                "pages_crawled": report.seo_checks.len(),
                "broken_link_findings": report.broken_links.len(),
                "forms_checked": report.form_checks.len(),
            },
            "broken_links": report.broken_links,
            "seo_checks": report.seo_checks,
            "form_checks": report.form_checks,
            "performance": report.performance,
            "tracking": report.tracking,
        }
    });

    serde_json::to_string_pretty(&json_report)
}

/// Flatten the report into `section,pageUrl,detail,status,note` rows, the
/// shape downstream spreadsheets have always imported.
pub fn generate_csv_report(report: &AuditReport) -> String {
    let mut rows: Vec<[String; 5]> = Vec::new();

    for link in &report.broken_links {
        rows.push([
            "Broken Links".to_string(),
            link.page_url.clone(),
            link.target.clone(),
            link.status.to_string(),
            link.classification.to_string(),
        ]);
    }

    for seo in &report.seo_checks {
        rows.push([
            "SEO".to_string(),
            seo.page_url.clone(),
            format!("H1 Count: {}", seo.h1_count),
            if seo.title_present {
                "Title OK"
            } else {
                "Missing Title"
            }
            .to_string(),
            if seo.meta_description_present {
                "Meta OK"
            } else {
                "Missing Meta Description"
            }
            .to_string(),
        ]);
    }

    for form in &report.form_checks {
        rows.push([
            "Forms".to_string(),
            form.page_url.clone(),
            format!("Form #{}", form.form_index),
            if form.submit_reachable {
                "Clickable"
            } else {
                "Disabled"
            }
            .to_string(),
            form.issue.clone(),
        ]);
    }

    if let Some(ref perf) = report.performance {
        for (detail, score) in [
            ("Mobile Score", perf.mobile_score),
            ("Desktop Score", perf.desktop_score),
        ] {
            rows.push([
                "Performance".to_string(),
                report.url.clone(),
                detail.to_string(),
                score.map(|s| s.to_string()).unwrap_or_default(),
                String::new(),
            ]);
        }
    }

    if let Some(ref tracking) = report.tracking {
        rows.push([
            "Tracking".to_string(),
            report.url.clone(),
            "GA4".to_string(),
            yes_no(tracking.ga4_present).to_string(),
            tracking.ga4_source.to_string(),
        ]);
        rows.push([
            "Tracking".to_string(),
            report.url.clone(),
            "GTM".to_string(),
            yes_no(tracking.gtm_present).to_string(),
            String::new(),
        ]);
        rows.push([
            "Tracking".to_string(),
            report.url.clone(),
            "Meta Pixel".to_string(),
            yes_no(tracking.meta_pixel_present).to_string(),
            tracking.meta_pixel_source.to_string(),
        ]);
    }

    let mut csv = String::from("section,pageUrl,detail,status,note\n");
    for row in rows {
        let line = row
            .iter()
            .map(|field| csv_escape(field))
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }

    csv
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn metric(value: Option<String>) -> String {
    value.unwrap_or_else(|| "N/A".to_string())
}

fn present(value: bool) -> &'static str {
    if value { "present" } else { "MISSING" }
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_report_format_from_str() {
        assert_eq!(ReportFormat::from_str("text"), Some(ReportFormat::Text));
        assert_eq!(ReportFormat::from_str("JSON"), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::from_str("Csv"), Some(ReportFormat::Csv));
        assert_eq!(ReportFormat::from_str("html"), None);
    }
}
