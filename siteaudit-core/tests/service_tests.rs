// Tests for the external service wrappers (PageSpeed, tracking)

use serde_json::json;
use siteaudit_core::pagespeed::PageSpeedClient;
use siteaudit_core::tracking::{TagSource, TrackingAuditor};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn lighthouse_payload(score: f64) -> serde_json::Value {
    json!({
        "lighthouseResult": {
            "categories": { "performance": { "score": score } },
            "audits": {
                "largest-contentful-paint": { "numericValue": 2345.6 },
                "cumulative-layout-shift": { "numericValue": 0.024 },
                "total-blocking-time": { "numericValue": 187.2 }
            }
        }
    })
}

#[tokio::test]
async fn test_pagespeed_fetch_parses_both_strategies() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/runPagespeed"))
        .and(query_param("strategy", "mobile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lighthouse_payload(0.71)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/runPagespeed"))
        .and(query_param("strategy", "desktop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lighthouse_payload(0.93)))
        .mount(&mock_server)
        .await;

    let client = PageSpeedClient::new(format!("{}/runPagespeed", mock_server.uri()), None);
    let report = client.fetch("https://example.com").await.unwrap();

    assert_eq!(report.mobile_score, Some(71));
    assert_eq!(report.desktop_score, Some(93));
    assert_eq!(report.lcp_seconds, Some(2.35));
    assert_eq!(report.cls, Some(0.02));
    assert_eq!(report.tbt_ms, Some(187));
}

#[tokio::test]
async fn test_pagespeed_api_error_is_an_err() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/runPagespeed"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = PageSpeedClient::new(format!("{}/runPagespeed", mock_server.uri()), None);
    assert!(client.fetch("https://example.com").await.is_err());
}

#[tokio::test]
async fn test_pagespeed_sparse_payload_degrades_to_none_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/runPagespeed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "lighthouseResult": {} })))
        .mount(&mock_server)
        .await;

    let client = PageSpeedClient::new(format!("{}/runPagespeed", mock_server.uri()), None);
    let report = client.fetch("https://example.com").await.unwrap();

    assert_eq!(report.mobile_score, None);
    assert_eq!(report.desktop_score, None);
    assert_eq!(report.lcp_seconds, None);
    assert_eq!(report.cls, None);
    assert_eq!(report.tbt_ms, None);
}

#[tokio::test]
async fn test_tracking_audit_detects_gtm_script_src() {
    let mock_server = MockServer::start().await;

    let page = r#"<html><head>
        <script src="https://www.googletagmanager.com/gtm.js?id=GTM-ABC"></script>
        <script>dataLayer.push(['js', 'G-12345']);</script>
    </head><body></body></html>"#;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(page),
        )
        .mount(&mock_server)
        .await;

    let auditor = TrackingAuditor::new();
    let report = auditor.audit(&mock_server.uri()).await.unwrap();

    assert!(report.gtm_present);
    assert!(report.ga4_present);
    assert_eq!(report.ga4_source, TagSource::ViaGtm);
    assert!(!report.meta_pixel_present);
}

#[tokio::test]
async fn test_tracking_audit_transport_failure_is_err() {
    let auditor = TrackingAuditor::new();
    assert!(auditor.audit("http://127.0.0.1:1/").await.is_err());
}
