// End-to-end tests for the aggregate audit

use siteaudit_core::audit::{AuditOptions, execute_audit};
use siteaudit_scanner::AuditError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html")
        .set_body_string(body)
}

#[tokio::test]
async fn test_audit_aggregates_crawl_and_tracking() {
    let mock_server = MockServer::start().await;

    let page = format!(
        r##"<html><head>
            <title>Home</title>
            <script>gtag('config', 'G-TEST');</script>
        </head><body>
            <a href="{}/nowhere">gone</a>
            <form action="#"><button type="submit">Go</button></form>
        </body></html>"##,
        mock_server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(&page))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nowhere"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let mut options = AuditOptions::new(mock_server.uri());
    options.check_performance = false; // would hit the real PageSpeed API

    let report = execute_audit(options, None).await.unwrap();

    assert_eq!(report.broken_links.len(), 1);
    assert_eq!(report.seo_checks.len(), 1);
    assert_eq!(report.form_checks.len(), 1);
    assert!(report.performance.is_none());

    let tracking = report.tracking.expect("tracking audit should have run");
    assert!(tracking.ga4_present);
    assert!(!tracking.gtm_present);
}

#[tokio::test]
async fn test_audit_respects_page_limit() {
    let mock_server = MockServer::start().await;

    for i in 0..4 {
        let body = format!(r#"<a href="{}/p{}">next</a>"#, mock_server.uri(), i + 1);
        let p = if i == 0 {
            "/".to_string()
        } else {
            format!("/p{}", i)
        };
        Mock::given(method("GET"))
            .and(path(p))
            .respond_with(html_response(&body))
            .mount(&mock_server)
            .await;
    }

    let mut options = AuditOptions::new(mock_server.uri());
    options.page_limit = 3;
    options.check_performance = false;
    options.check_tracking = false;

    let report = execute_audit(options, None).await.unwrap();
    assert_eq!(report.seo_checks.len(), 3);
    assert!(report.tracking.is_none());
}

#[tokio::test]
async fn test_audit_malformed_url_is_fatal() {
    let mut options = AuditOptions::new("definitely not a url");
    options.check_performance = false;
    options.check_tracking = false;

    let result = execute_audit(options, None).await;
    assert!(matches!(result, Err(AuditError::InvalidUrl(_))));
}
