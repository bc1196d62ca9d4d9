// Persisted index tests across service instances

use crate::common::{build_test_index, create_test_services, TestDocs};
use docsift::core::config::Config;
use docsift::core::services::Services;
use docsift::core::storage::{expires_key, index_key, FileStore, KeyValueStore};
use docsift::DocsiftError;
use std::path::Path;
use tempfile::TempDir;

fn services_at(docs_root: &Path, index_dir: &Path, namespace: Option<&str>) -> Services {
    let mut config = Config::default();
    config.source.root = docs_root.to_path_buf();
    config.storage.index_dir = index_dir.to_path_buf();
    config.search.namespace = namespace.map(str::to_string);
    Services::new(config)
}

#[tokio::test]
async fn test_snapshot_survives_restart() {
    let docs = TestDocs::sample();
    let (services, index_dir) = create_test_services(docs.path());
    let report = services.build_index().await.unwrap();
    assert!(report.persisted);

    let reopened = services_at(docs.path(), index_dir.path(), None);
    assert!(reopened.store.is_fresh(None));
    assert_eq!(reopened.store.load(None).unwrap(), Some(4));
    assert_eq!(reopened.store.entries(), services.store.entries());
    assert_eq!(
        reopened.search.search("installer"),
        services.search.search("installer")
    );
}

#[tokio::test]
async fn test_ensure_index_uses_fresh_copy() {
    let docs = TestDocs::sample();
    let (services, index_dir) = create_test_services(docs.path());
    services.build_index().await.unwrap();

    // Edits after the build are invisible until the copy expires
    std::fs::write(docs.path().join("guide.md"), "# Guide\n\nRewritten.\n").unwrap();

    let reopened = services_at(docs.path(), index_dir.path(), None);
    assert!(reopened.ensure_index().await.unwrap().is_none());
    assert_eq!(reopened.search.search("installer").len(), 1);
    assert!(reopened.search.search("rewritten").is_empty());
}

#[tokio::test]
async fn test_expired_copy_is_rebuilt() {
    let docs = TestDocs::sample();
    let (services, index_dir) = create_test_services(docs.path());
    services.build_index().await.unwrap();

    let kv = FileStore::open(index_dir.path()).unwrap();
    kv.set(&expires_key(None), "0").unwrap();

    let reopened = services_at(docs.path(), index_dir.path(), None);
    assert!(!reopened.store.is_fresh(None));

    let report = reopened.ensure_index().await.unwrap();
    let report = report.expect("expired copy triggers a build");
    assert_eq!(report.documents_indexed, 4);
    assert!(reopened.store.is_fresh(None));
}

#[tokio::test]
async fn test_fresh_expiry_without_snapshot_is_rebuilt() {
    let docs = TestDocs::sample();
    let index_dir = TempDir::new().unwrap();

    // Left behind by an interrupted persist
    let kv = FileStore::open(index_dir.path()).unwrap();
    let future = chrono::Utc::now().timestamp_millis() + 60_000;
    kv.set(&expires_key(None), &future.to_string()).unwrap();
    assert_eq!(kv.get(&index_key(None)).unwrap(), None);

    let services = services_at(docs.path(), index_dir.path(), None);
    let report = services.ensure_index().await.unwrap();
    assert!(report.is_some(), "missing snapshot triggers a build");
    assert_eq!(services.search.search("installer").len(), 1);
    assert!(kv.get(&index_key(None)).unwrap().is_some());
}

#[tokio::test]
async fn test_expiry_follows_max_age() {
    let docs = TestDocs::sample();
    let index_dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.source.root = docs.path().to_path_buf();
    config.storage.index_dir = index_dir.path().to_path_buf();
    config.search.max_age_ms = 5_000;
    let services = Services::new(config);

    let before = chrono::Utc::now().timestamp_millis();
    let report = build_test_index(&services, &["guide.md"]).await;
    let after = chrono::Utc::now().timestamp_millis();

    let expires_at = report.expires_at.unwrap();
    assert!(expires_at >= before + 5_000);
    assert!(expires_at <= after + 5_000);
    assert_eq!(services.store.stored_expiry(None).unwrap(), Some(expires_at));
}

#[tokio::test]
async fn test_namespaces_persist_independently() {
    let docs = TestDocs::sample();
    let index_dir = TempDir::new().unwrap();

    let v1 = services_at(docs.path(), index_dir.path(), Some("v1"));
    build_test_index(&v1, &["guide.md"]).await;
    let v2 = services_at(docs.path(), index_dir.path(), Some("v2"));
    build_test_index(&v2, &["api/reference.md"]).await;

    let kv = FileStore::open(index_dir.path()).unwrap();
    assert!(kv.get(&index_key(Some("v1"))).unwrap().is_some());
    assert!(kv.get(&index_key(Some("v2"))).unwrap().is_some());
    assert!(kv.get(&index_key(None)).unwrap().is_none());

    let reader = services_at(docs.path(), index_dir.path(), None);
    assert_eq!(reader.store.load(Some("v1")).unwrap(), Some(1));
    assert_eq!(reader.store.load(Some("v2")).unwrap(), Some(1));

    // Queries span every loaded namespace
    let urls: Vec<String> = reader
        .search
        .search("token")
        .into_iter()
        .map(|r| r.url)
        .collect();
    assert!(urls.contains(&"guide.md#configure".to_string()));
    assert!(urls.contains(&"api/reference.md#token".to_string()));
}

#[tokio::test]
async fn test_malformed_snapshot_is_discarded() {
    let docs = TestDocs::sample();
    let (services, index_dir) = create_test_services(docs.path());
    services.build_index().await.unwrap();

    let kv = FileStore::open(index_dir.path()).unwrap();
    kv.set(&index_key(None), "{not json").unwrap();

    let reopened = services_at(docs.path(), index_dir.path(), None);
    let err = reopened.store.load(None).unwrap_err();
    assert!(matches!(err, DocsiftError::InvalidSnapshot(_)));
    assert_eq!(reopened.store.document_count(), 0);

    // Still fresh on paper, but the broken snapshot forces a rebuild
    let report = reopened.ensure_index().await.unwrap();
    assert!(report.is_some());
    assert_eq!(reopened.search.search("installer").len(), 1);
}

#[tokio::test]
async fn test_clear_persisted_removes_both_keys() {
    let docs = TestDocs::sample();
    let (services, index_dir) = create_test_services(docs.path());
    services.build_index().await.unwrap();

    services.store.clear_persisted(None).unwrap();
    services.store.clear_namespace(None);

    let kv = FileStore::open(index_dir.path()).unwrap();
    assert!(kv.get(&expires_key(None)).unwrap().is_none());
    assert!(kv.get(&index_key(None)).unwrap().is_none());
    assert!(services.search.search("installer").is_empty());

    // Clearing twice is fine
    services.store.clear_persisted(None).unwrap();
}

#[tokio::test]
async fn test_unwritable_index_dir_keeps_memory_index() {
    let docs = TestDocs::sample();
    let blocker = TempDir::new().unwrap();
    let file = blocker.path().join("not-a-dir");
    std::fs::write(&file, "x").unwrap();

    let services = services_at(docs.path(), &file.join("index"), None);
    let report = build_test_index(&services, &["guide.md"]).await;

    assert_eq!(report.documents_indexed, 1);
    assert_eq!(services.search.search("installer").len(), 1);
}
