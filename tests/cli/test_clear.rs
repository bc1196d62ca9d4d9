//! Tests for clear-index CLI command

use crate::cli::test_helpers::create_cli_test_services;
use crate::common::TestDocs;
use docsift::cli::commands::clear::{execute, ClearArgs};
use docsift::cli::OutputFormat;
use docsift::core::storage::{index_key, FileStore, KeyValueStore};

/// Test clearing the default namespace
#[tokio::test]
async fn test_clear_default_namespace() {
    let docs = TestDocs::sample();
    let (services, index_temp) = create_cli_test_services(docs.path());
    services.build_index().await.unwrap();

    let result = execute(ClearArgs { namespace: None }, &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "clear should succeed: {:?}", result.err());

    assert!(!services.store.is_fresh(None));
    assert_eq!(services.store.document_count(), 0);
    let kv = FileStore::open(index_temp.path()).unwrap();
    assert!(kv.get(&index_key(None)).unwrap().is_none());
}

/// Test clearing one namespace leaves others alone
#[tokio::test]
async fn test_clear_named_namespace_json() {
    let docs = TestDocs::sample();
    let (services, _index_temp) = create_cli_test_services(docs.path());
    services.build_index().await.unwrap();

    let args = ClearArgs {
        namespace: Some("other".to_string()),
    };
    let result = execute(args, &services, OutputFormat::Json).await;
    assert!(result.is_ok());

    assert!(services.store.is_fresh(None));
    assert_eq!(services.store.document_count(), 4);
}

/// Test clearing when nothing was ever persisted
#[tokio::test]
async fn test_clear_nothing_persisted() {
    let docs = TestDocs::sample();
    let (services, _index_temp) = create_cli_test_services(docs.path());

    let result = execute(ClearArgs { namespace: None }, &services, OutputFormat::Human).await;
    assert!(result.is_ok());
}
