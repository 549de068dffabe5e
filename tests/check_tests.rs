//! Integration tests for the analyzer
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! submit → check → list cycle against a temporary database.

use page_analyzer::config::Config;
use page_analyzer::storage::{SqliteStorage, Storage};
use page_analyzer::{Analyzer, AnalyzerError, Submission};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates an analyzer backed by a fresh database in a temp directory
fn create_analyzer(dir: &TempDir) -> Analyzer<SqliteStorage> {
    let db_path = dir.path().join("checks.db");
    let mut config = Config::default();
    config.database.path = db_path.display().to_string();
    config.http.timeout_secs = 5;
    config.http.connect_timeout_secs = 2;

    let storage = SqliteStorage::new(&db_path).expect("Failed to open DB");
    Analyzer::new(config, storage).expect("Failed to create analyzer")
}

async fn mount_page(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_check_extracts_seo_fields() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        200,
        "<html><head><title>T</title></head><body><h1>H</h1></body></html>",
    )
    .await;

    let dir = TempDir::new().unwrap();
    let analyzer = create_analyzer(&dir);

    let id = analyzer
        .submit_url(&format!("{}/some/path?q=1", server.uri()))
        .expect("Submit failed")
        .id();

    let check = analyzer.run_check(id).await.expect("Check failed");
    assert_eq!(check.url_id, id);
    assert_eq!(check.status_code, 200);
    assert_eq!(check.h1, "H");
    assert_eq!(check.title, "T");
    assert_eq!(check.description, "");

    let detail = analyzer.url_detail(id).unwrap();
    assert_eq!(detail.record.name, server.uri());
    assert_eq!(detail.checks, vec![check]);
}

#[tokio::test]
async fn test_check_reads_meta_description() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        200,
        r#"<html><head>
            <title>Shop</title>
            <meta name="description" content="Best prices in town">
        </head><body></body></html>"#,
    )
    .await;

    let dir = TempDir::new().unwrap();
    let analyzer = create_analyzer(&dir);
    let id = analyzer.submit_url(&server.uri()).unwrap().id();

    let check = analyzer.run_check(id).await.unwrap();
    assert_eq!(check.title, "Shop");
    assert_eq!(check.description, "Best prices in town");
    assert_eq!(check.h1, "");
}

#[tokio::test]
async fn test_server_error_records_nothing() {
    let server = MockServer::start().await;
    mount_page(&server, 500, "oops").await;

    let dir = TempDir::new().unwrap();
    let analyzer = create_analyzer(&dir);
    let id = analyzer.submit_url(&server.uri()).unwrap().id();

    let result = analyzer.run_check(id).await;
    assert!(matches!(result, Err(AnalyzerError::CheckFailed { .. })));

    assert!(analyzer.storage().list_checks_for_url(id).unwrap().is_empty());
    assert!(analyzer.list_urls().unwrap().is_empty());
    assert!(analyzer.storage().find_url_by_id(id).unwrap().is_some());
}

#[tokio::test]
async fn test_unreachable_host_records_nothing() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let dir = TempDir::new().unwrap();
    let analyzer = create_analyzer(&dir);
    let id = analyzer
        .submit_url(&format!("http://127.0.0.1:{}", port))
        .unwrap()
        .id();

    let result = analyzer.run_check(id).await;
    assert!(matches!(result, Err(AnalyzerError::CheckFailed { .. })));
    assert!(analyzer.storage().list_checks_for_url(id).unwrap().is_empty());
}

#[tokio::test]
async fn test_listing_reports_latest_check() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<title>First</title>"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(203).set_body_string("<title>Second</title>"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let analyzer = create_analyzer(&dir);
    let id = analyzer.submit_url(&server.uri()).unwrap().id();

    let first = analyzer.run_check(id).await.unwrap();
    let second = analyzer.run_check(id).await.unwrap();
    assert_eq!(first.title, "First");
    assert_eq!(second.title, "Second");

    let urls = analyzer.list_urls().unwrap();
    assert_eq!(urls.len(), 1);
    assert_eq!(urls[0].url_id, id);
    assert_eq!(urls[0].status_code, 203);
    assert_eq!(urls[0].created_at, second.created_at);

    let checks = analyzer.url_detail(id).unwrap().checks;
    assert_eq!(checks.len(), 2);
    assert_eq!(checks[0].id, second.id);
    assert_eq!(checks[1].id, first.id);
}

#[tokio::test]
async fn test_duplicate_submission_single_record() {
    let dir = TempDir::new().unwrap();
    let analyzer = create_analyzer(&dir);

    let first = analyzer.submit_url("https://example.com/one").unwrap();
    let second = analyzer.submit_url("HTTPS://EXAMPLE.com/two?x=1").unwrap();

    assert!(matches!(first, Submission::Added(_)));
    assert_eq!(second, Submission::Existing(first.id()));
    assert!(analyzer.storage().find_url_by_id(first.id() + 1).unwrap().is_none());
}

#[tokio::test]
async fn test_detail_for_unknown_id_is_not_found() {
    let dir = TempDir::new().unwrap();
    let analyzer = create_analyzer(&dir);

    assert!(matches!(
        analyzer.url_detail(404),
        Err(AnalyzerError::UrlNotFound(404))
    ));
}
