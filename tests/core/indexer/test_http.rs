// Indexing a published docs site over HTTP

use docsift::core::config::{CachePolicy, Config, PathsSetting};
use docsift::core::indexer::{DocumentFetcher, HttpFetcher, RequestHeaders};
use docsift::core::services::Services;
use docsift::core::storage::MemoryStore;
use docsift::DocsiftError;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn remote_services(server: &MockServer, paths: PathsSetting) -> Services {
    let mut config = Config::default();
    config.source.base_url = Some(server.uri());
    config.search.paths = paths;
    Services::with_store(config, Arc::new(MemoryStore::new()))
}

#[tokio::test]
async fn test_http_fetch_sends_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/private/guide.md"))
        .and(header("x-docs-token", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("# Guide\n"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(server.uri(), Duration::from_secs(5)).unwrap();
    let mut headers = RequestHeaders::new();
    headers.insert("x-docs-token".to_string(), "s3cret".to_string());

    let text = fetcher.fetch("/private/guide.md", &headers).await.unwrap();
    assert_eq!(text, "# Guide\n");
}

#[tokio::test]
async fn test_http_error_status_is_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone.md"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(server.uri(), Duration::from_secs(5)).unwrap();
    let err = fetcher
        .fetch("gone.md", &RequestHeaders::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DocsiftError::FetchFailed(_)));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_remote_build_skips_missing_documents() {
    let server = MockServer::start().await;
    serve(&server, "/README.md", "# Home\n\nWelcome.\n").await;
    serve(&server, "/guide.md", "## Install :id=setup\n\nRun the installer.\n").await;
    Mock::given(method("GET"))
        .and(path("/missing.md"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let services = remote_services(
        &server,
        PathsSetting::List(vec!["/".into(), "guide".into(), "missing".into()]),
    );
    let report = services.build_index().await.unwrap();

    assert_eq!(report.documents_indexed, 2);
    assert_eq!(report.documents_failed, 1);
    assert!(services.store.contains(None, "/README.md"));

    let results = services.search.search("installer");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "guide.md#setup");
}

#[tokio::test]
async fn test_remote_sidebar_discovery() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/_sidebar.md",
        "- [Intro](intro.md)\n- [Elsewhere](https://example.org/x.md)\n- [API](./api/#top)\n",
    )
    .await;
    serve(&server, "/intro.md", "# Intro\n").await;
    serve(&server, "/api/README.md", "# API\n").await;

    let services = remote_services(&server, PathsSetting::Auto);
    assert_eq!(
        services.resolve_paths().await.unwrap(),
        vec!["intro.md", "api/"]
    );

    let report = services.build_index().await.unwrap();
    assert_eq!(report.documents_indexed, 2);
    assert!(services.store.contains(None, "api/README.md"));
}

#[tokio::test]
async fn test_manifest_paths() {
    let server = MockServer::start().await;
    serve(&server, "/paths.json", r#"["intro", "intro.md", "setup"]"#).await;
    serve(&server, "/intro.md", "# Intro\n").await;
    serve(&server, "/setup.md", "# Setup\n").await;

    let services = remote_services(&server, PathsSetting::Manifest("paths.json".into()));
    let report = services.build_index().await.unwrap();

    assert_eq!(report.paths_requested, 3);
    assert_eq!(report.paths_unique, 2);
    assert_eq!(report.documents_indexed, 2);
}

#[tokio::test]
async fn test_broken_manifest_falls_back_to_sidebar() {
    let server = MockServer::start().await;
    serve(&server, "/paths.json", "not json").await;
    serve(&server, "/_sidebar.md", "- [Intro](intro.md)\n").await;
    serve(&server, "/intro.md", "# Intro\n").await;

    let services = remote_services(&server, PathsSetting::Manifest("paths.json".into()));
    assert_eq!(services.resolve_paths().await.unwrap(), vec!["intro.md"]);
}

#[tokio::test]
async fn test_remote_without_sidebar_resolves_nothing() {
    let server = MockServer::start().await;

    let services = remote_services(&server, PathsSetting::Auto);
    assert!(services.resolve_paths().await.unwrap().is_empty());

    let report = services.build_index().await.unwrap();
    assert_eq!(report.paths_unique, 0);
    assert!(report.persisted);
}

#[tokio::test]
async fn test_trust_fresh_skips_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/intro.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string("# Intro\n"))
        .expect(1)
        .mount(&server)
        .await;

    let kv = Arc::new(MemoryStore::new());
    let mut config = Config::default();
    config.source.base_url = Some(server.uri());
    config.search.paths = PathsSetting::List(vec!["intro".into()]);
    config.search.cache_policy = CachePolicy::TrustFresh;

    let first = Services::with_store(config.clone(), kv.clone());
    assert_eq!(first.build_index().await.unwrap().documents_indexed, 1);

    let second = Services::with_store(config, kv);
    let report = second.build_index().await.unwrap();
    assert_eq!(report.documents_reused, 1);
    assert_eq!(report.documents_indexed, 0);
}
