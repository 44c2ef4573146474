//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use sumi_gleaner::config::{Config, ProxyConfig};
use sumi_gleaner::crawler::{CrawlOptions, StepOutcome};
use sumi_gleaner::{export_data, CrawlState, Coordinator, ExportFormat, PageType};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with fast timeouts and no retries
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.user_agent.crawler_name = "TestGleaner".to_string();
    config.fetcher.timeout_ms = 2_000;
    config.fetcher.max_retries = 0;
    config.fetcher.retry_backoff_ms = 10;
    config
}

/// Crawl options with no politeness delay and no quality cutoff
fn test_options() -> CrawlOptions {
    CrawlOptions {
        delay_ms: 0,
        min_quality_score: 0,
        ..CrawlOptions::default()
    }
}

fn coordinator() -> Coordinator {
    Coordinator::from_config(&create_test_config()).expect("Failed to build coordinator")
}

/// An HTML page response
fn html_page(title: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, body
        ),
        "text/html",
    )
}

async fn mount_page(server: &MockServer, route: &str, title: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(title, body))
        .mount(server)
        .await;
}

async fn mount_never_requested(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page("Unexpected", ""))
        .expect(0)
        .mount(server)
        .await;
}

fn faq_body() -> String {
    let pairs: String = (1..=6)
        .map(|i| format!("<dt>How does feature {i} work?</dt><dd>It works as described.</dd>"))
        .collect();
    format!("<h1>Frequently asked</h1><dl>{}</dl>", pairs)
}

#[tokio::test]
async fn test_single_page_without_links() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "Home", "<p>Welcome to our small corner of the web.</p>").await;

    let options = CrawlOptions {
        max_pages: 10,
        ..test_options()
    };
    let result = coordinator()
        .crawl(&server.uri(), options)
        .await
        .expect("Crawl failed");

    assert_eq!(result.status, CrawlState::Completed);
    assert_eq!(result.pages_scanned, 1);
    assert_eq!(result.pages.len(), 1);

    let page = &result.pages[0];
    assert_eq!(page.depth, 0);
    assert_eq!(page.parent, None);
    assert_eq!(page.title, "Home");
    assert_eq!(page.page_type, PageType::Homepage);
    assert_eq!(result.domain, "127.0.0.1");
    assert!(result.site_structure.is_empty());
}

#[tokio::test]
async fn test_depth_limit_stops_chain() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "Home", r#"<a href="/a">A</a>"#).await;
    mount_page(&server, "/a", "A", r#"<a href="/b">B</a>"#).await;
    mount_never_requested(&server, "/b").await;

    let options = CrawlOptions {
        max_depth: 1,
        ..test_options()
    };
    let result = coordinator()
        .crawl(&server.uri(), options)
        .await
        .expect("Crawl failed");

    let urls: Vec<&str> = result.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, vec![server.uri(), format!("{}/a", server.uri())]);
    assert_eq!(result.pages_scanned, 2);
    assert_eq!(result.pages[1].depth, 1);
    assert_eq!(result.pages[1].parent.as_deref(), Some(server.uri().as_str()));
}

#[tokio::test]
async fn test_scope_rules_skip_urls() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        "Home",
        r#"
        <a href="/login">Log in</a>
        <a href="/private/area">Private</a>
        <a href="/files/manual.pdf">Manual</a>
        <a href="https://elsewhere.example.org/page">Partner</a>
        <a href="/contact#form">Contact</a>
        "#,
    )
    .await;
    mount_page(&server, "/contact", "Contact us", "<p>Write to us any time.</p>").await;
    mount_never_requested(&server, "/login").await;
    mount_never_requested(&server, "/private/area").await;
    mount_never_requested(&server, "/files/manual.pdf").await;

    let options = CrawlOptions {
        extra_skip_paths: vec!["/private".to_string()],
        ..test_options()
    };
    let result = coordinator()
        .crawl(&server.uri(), options)
        .await
        .expect("Crawl failed");

    let urls: Vec<&str> = result.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, vec![server.uri(), format!("{}/contact", server.uri())]);
    assert_eq!(result.pages[1].page_type, PageType::Contact);
}

#[tokio::test]
async fn test_first_step_leaves_only_admissible_children() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        "Home",
        r#"<a href="/about">About</a><a href="/login">Log in</a>"#,
    )
    .await;

    let mut coordinator = coordinator();
    coordinator
        .start(&server.uri(), test_options())
        .expect("Failed to start crawl");

    let outcome = coordinator.step().await.expect("Step failed");
    assert!(matches!(outcome, StepOutcome::Processed { .. }));
    assert_eq!(
        coordinator.frontier_urls(),
        vec![format!("{}/about", server.uri())]
    );
}

#[tokio::test]
async fn test_failed_fetch_does_not_stop_crawl() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        "Home",
        r#"<a href="/gone">Gone</a><a href="/ok">Ok</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/ok", "Ok", "").await;

    let result = coordinator()
        .crawl(&server.uri(), test_options())
        .await
        .expect("Crawl failed");

    assert_eq!(result.status, CrawlState::Completed);
    assert_eq!(result.pages_scanned, 3);
    let urls: Vec<&str> = result.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, vec![server.uri(), format!("{}/ok", server.uri())]);
}

#[tokio::test]
async fn test_quality_filter_keeps_faq() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        "Home",
        r#"<a href="/faq">FAQ</a><a href="/about">About</a>"#,
    )
    .await;
    mount_page(&server, "/faq", "Help", &faq_body()).await;
    mount_page(&server, "/about", "About", "<p>A short note.</p>").await;

    let options = CrawlOptions {
        min_quality_score: 30,
        ..test_options()
    };
    let result = coordinator()
        .crawl(&server.uri(), options)
        .await
        .expect("Crawl failed");

    assert_eq!(result.pages_scanned, 3);
    assert_eq!(result.pages.len(), 1);

    let faq = &result.pages[0];
    assert_eq!(faq.page_type, PageType::Faq);
    assert_eq!(faq.qa_items.len(), 6);
    assert!(faq.quality_score >= 45);
    assert_eq!(result.statistics.faq_pages, 1);
    assert_eq!(result.statistics.total_qa, 6);
}

#[tokio::test]
async fn test_cancellation_keeps_partial_results() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "Home", r#"<a href="/next">Next</a>"#).await;
    mount_never_requested(&server, "/next").await;

    let mut coordinator = coordinator();
    coordinator
        .start(&server.uri(), test_options())
        .expect("Failed to start crawl");
    coordinator.step().await.expect("Step failed");

    coordinator.cancel();
    let state = coordinator.run().await.expect("Run failed");
    assert_eq!(state, CrawlState::Stopped);

    let result = coordinator.finish().expect("Finish failed");
    assert_eq!(result.status, CrawlState::Stopped);
    assert_eq!(result.pages.len(), 1);
    assert_eq!(result.pages_scanned, 1);
}

#[tokio::test]
async fn test_invalid_start_url() {
    let mut coordinator = coordinator();
    let result = coordinator.crawl("not a url at all", test_options()).await;

    assert!(matches!(
        result,
        Err(sumi_gleaner::GleanerError::InvalidStartUrl { .. })
    ));
    assert_eq!(coordinator.state(), CrawlState::Failed);
}

#[tokio::test]
async fn test_relay_used_when_direct_fetch_fails() {
    let server = MockServer::start().await;
    let start_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/relay"))
        .and(query_param("url", start_url.as_str()))
        .respond_with(html_page("Relayed", "<p>Served through the relay service.</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = create_test_config();
    config.fetcher.proxies = vec![ProxyConfig {
        name: "test-relay".to_string(),
        template: format!("{}/relay?url={{url}}", server.uri()),
    }];

    let result = Coordinator::from_config(&config)
        .expect("Failed to build coordinator")
        .crawl(&start_url, test_options())
        .await
        .expect("Crawl failed");

    assert_eq!(result.pages.len(), 1);
    assert_eq!(result.pages[0].title, "Relayed");
}

#[tokio::test]
async fn test_csv_export_of_crawl() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "Home", r#"<a href="/faq">FAQ</a>"#).await;
    mount_page(&server, "/faq", "Help", &faq_body()).await;

    let result = coordinator()
        .crawl(&server.uri(), test_options())
        .await
        .expect("Crawl failed");

    let csv = export_data(&result.pages, ExportFormat::Csv, &result.domain)
        .expect("Export failed");
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "URL,Title,Type,Quality Score,Word Count,Q&A Count");
    assert!(lines[1].starts_with(&format!("{},Home,Homepage,", server.uri())));
    assert!(lines[2].starts_with(&format!("{}/faq,Help,FAQ,", server.uri())));
    assert!(lines[2].ends_with(",6"));
}
