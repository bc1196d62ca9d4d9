// Ranking and snippet tests over indexes built from the sample site

use crate::common::{build_test_index, create_test_services, entry, TestDocs};
use docsift::core::search::score_entries;
use docsift::core::services::Services;
use tempfile::TempDir;

const EM_TOKEN: &str = r#"<em class="search-keyword">token</em>"#;

async fn sample_services() -> (Services, TestDocs, TempDir) {
    let docs = TestDocs::sample();
    let (services, index_dir) = create_test_services(docs.path());
    services.build_index().await.unwrap();
    (services, docs, index_dir)
}

#[tokio::test]
async fn test_single_body_hit() {
    let (services, _docs, _dir) = sample_services().await;

    let results = services.search.search("installer");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "guide.md#setup");
    assert_eq!(results[0].title, "Install");
    assert_eq!(results[0].score, 2);
    assert_eq!(
        results[0].content,
        r#"Run the <em class="search-keyword">installer</em>...."#
    );
}

#[tokio::test]
async fn test_title_hits_outrank_body_hits() {
    let (services, _docs, _dir) = sample_services().await;

    let results = services.search.search("token");
    let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();

    assert_eq!(
        urls,
        vec![
            "api/reference.md#token",
            "api/reference.md#token-refresh",
            "guide.md#configure",
        ]
    );
    assert_eq!(results[0].score, 3);
    assert_eq!(results[1].score, 3);
    assert_eq!(results[2].score, 2);
    assert!(results[2].content.contains(EM_TOKEN));
}

#[tokio::test]
async fn test_query_is_case_and_accent_insensitive() {
    let (services, _docs, _dir) = sample_services().await;

    let plain = services.search.search("installer");
    assert_eq!(services.search.search("INSTALLER"), plain);
    assert_eq!(services.search.search("instàllér"), plain);
}

#[tokio::test]
async fn test_embedded_widgets_never_match() {
    let (services, _docs, _dir) = sample_services().await;

    assert!(services.search.search("video").is_empty());
    assert!(services
        .search
        .search("markup")
        .iter()
        .all(|r| !r.url.starts_with("faq.md")));
}

#[tokio::test]
async fn test_preamble_entry_is_searchable() {
    let (services, _docs, _dir) = sample_services().await;

    let results = services.search.search("welcome");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "/README.md");
    assert_eq!(results[0].title, "");
}

#[tokio::test]
async fn test_markdown_emphasis_is_stripped_before_matching() {
    let (services, _docs, _dir) = sample_services().await;

    let results = services.search.search("static documentation");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "/README.md#overview");
    // phrase plus each word, all body hits
    assert_eq!(results[0].score, 6);
    assert!(!results[0].content.contains("**"));
}

#[tokio::test]
async fn test_empty_and_separator_only_queries() {
    let (services, _docs, _dir) = sample_services().await;

    assert!(services.search.search("").is_empty());
    assert!(services.search.search("   ").is_empty());
    assert!(services.search.search("- / -").is_empty());
}

#[tokio::test]
async fn test_search_before_build_is_empty() {
    let docs = TestDocs::sample();
    let (services, _index_dir) = create_test_services(docs.path());

    assert!(services.search.search("token").is_empty());
}

#[tokio::test]
async fn test_partial_index_is_queryable() {
    let docs = TestDocs::sample();
    let (services, _index_dir) = create_test_services(docs.path());

    build_test_index(&services, &["guide.md"]).await;
    let results = services.search.search("token");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "guide.md#configure");
}

#[tokio::test]
async fn test_search_limited_truncates() {
    let (services, _docs, _dir) = sample_services().await;

    let limited = services.search.search_limited("token", 2);
    assert_eq!(limited.len(), 2);
    assert!(limited.iter().all(|r| r.score == 3));
}

#[test]
fn test_regex_metacharacters_are_literal() {
    let entries = vec![
        entry("a.md#calls", "Calls", "Use create() to start."),
        entry("b.md#other", "Other", "Use createX to start."),
    ];

    let results = score_entries(&entries, "create()");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "a.md#calls");
}

#[test]
fn test_html_in_body_is_escaped_in_snippet() {
    let entries = vec![entry("a.md#cast", "Cast", "Featuring Tom & Jerry.")];

    let results = score_entries(&entries, "tom");
    assert_eq!(results.len(), 1);
    assert!(results[0].content.contains("&amp; Jerry"));
    assert!(!results[0].content.contains(" & "));
}

#[test]
fn test_long_body_window_is_bounded() {
    let filler = "lorem ipsum ".repeat(30);
    let body = format!("{filler}needle {filler}");
    let entries = vec![entry("long.md#x", "Long", &body)];

    let results = score_entries(&entries, "needle");
    let content = &results[0].content;
    assert!(content.contains(r#"<em class="search-keyword">needle</em>"#));
    assert!(content.ends_with("..."));
    assert!(content.chars().count() < body.chars().count());
}
