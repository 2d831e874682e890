//! Integration tests for `HttpFetcher`.
//!
//! Each test stands up a local `wiremock` server, so no real network traffic
//! is made.

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use carscrape_scraper::{HttpFetcher, PageFetcher, ScraperError};

fn test_fetcher() -> HttpFetcher {
    HttpFetcher::new(5, "carscrape-test/0.1").expect("failed to build test HttpFetcher")
}

#[tokio::test]
async fn returns_body_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cars/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let body = test_fetcher()
        .fetch(&format!("{}/cars/1", server.uri()))
        .await
        .expect("fetch should succeed");

    assert_eq!(body, "<html>ok</html>");
}

#[tokio::test]
async fn sends_configured_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/new-ads.php"))
        .and(query_param("page", "2"))
        .and(header("user-agent", "carscrape-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("index"))
        .expect(1)
        .mount(&server)
        .await;

    let body = test_fetcher()
        .fetch(&format!("{}/new-ads.php?page=2", server.uri()))
        .await
        .expect("fetch should succeed");

    assert_eq!(body, "index");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cars/404"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/cars/404", server.uri());
    let err = test_fetcher().fetch(&url).await.unwrap_err();

    match err {
        ScraperError::UnexpectedStatus { status, url: got } => {
            assert_eq!(status, 404);
            assert_eq!(got, url);
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cars/500"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_fetcher()
        .fetch(&format!("{}/cars/500", server.uri()))
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err, ScraperError::UnexpectedStatus { status: 500, .. }));
}

#[tokio::test]
async fn connection_failure_is_http_error() {
    // Bind then drop a listener so the port is closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr").port()
    };

    let err = test_fetcher()
        .fetch(&format!("http://127.0.0.1:{port}/cars/1"))
        .await
        .unwrap_err();

    assert!(matches!(err, ScraperError::Http(_)), "got: {err:?}");
    assert!(err.is_transport());
}
