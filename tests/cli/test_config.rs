//! Tests for show-config CLI command

use crate::cli::test_helpers::create_cli_test_services;
use crate::common::TestDocs;
use docsift::cli::commands::config::{execute, ConfigArgs};
use docsift::cli::OutputFormat;
use docsift::core::config::Config;
use docsift::core::services::Services;
use std::sync::Arc;

/// Test config display in human format
#[tokio::test]
async fn test_config_human() {
    let docs = TestDocs::sample();
    let (services, _index_temp) = create_cli_test_services(docs.path());

    let args = ConfigArgs {
        show_secrets: false,
    };
    let result = execute(args, &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "show-config should succeed: {:?}", result.err());
}

/// Test config display in JSON with a remote source and headers
#[tokio::test]
async fn test_config_json_remote_source() {
    let index_temp = tempfile::TempDir::new().unwrap();
    let mut config = Config::default();
    config.storage.index_dir = index_temp.path().to_path_buf();
    config.source.base_url = Some("https://docs.example.com".to_string());
    config
        .source
        .request_headers
        .insert("authorization".to_string(), "Bearer abc".to_string());
    config.search.namespace = Some("v2".to_string());
    let services = Arc::new(Services::new(config));

    for show_secrets in [false, true] {
        let result = execute(ConfigArgs { show_secrets }, &services, OutputFormat::Json).await;
        assert!(result.is_ok());
    }
}
