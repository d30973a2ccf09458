use std::sync::Arc;

use reqwest::Method;
use serde_json::json;
use tracing_test::traced_test;

use super::*;
use crate::ConnectionConfig;
use crate::ConnectionError;
use crate::MockTransport;
use crate::Response;

fn config(version: Option<u8>) -> ConnectionConfig {
    ConnectionConfig {
        urls: vec!["http://a:9200".to_string()],
        version,
        healthcheck: false,
        ..ConnectionConfig::default()
    }
}

fn root_response(number: &str) -> Response {
    Response::new(
        200,
        json!({
            "name": "node-1",
            "cluster_name": "logging",
            "version": { "number": number }
        })
        .to_string(),
    )
}

#[test]
fn from_major_should_accept_supported_generations_only() {
    assert_eq!(BackendVersion::from_major(5).unwrap(), BackendVersion::V5);
    assert_eq!(BackendVersion::from_major(6).unwrap(), BackendVersion::V6);
    assert_eq!(BackendVersion::from_major(7).unwrap(), BackendVersion::V7);
    assert!(matches!(
        BackendVersion::from_major(8),
        Err(ConnectionError::UnsupportedVersion(v)) if v == "8"
    ));
}

#[test]
fn from_version_number_should_parse_major_component() {
    assert_eq!(BackendVersion::from_version_number("7.10.2").unwrap(), BackendVersion::V7);
    assert_eq!(BackendVersion::from_version_number("6.8.23").unwrap(), BackendVersion::V6);
    assert!(BackendVersion::from_version_number("2.4.6").is_err());
    assert!(BackendVersion::from_version_number("garbage").is_err());
}

#[test]
fn only_v5_lacks_watcher_support() {
    assert!(!BackendVersion::V5.supports_watcher());
    assert!(BackendVersion::V6.supports_watcher());
    assert!(BackendVersion::V7.supports_watcher());
}

#[tokio::test]
async fn detect_version_should_read_cluster_root() {
    let mut mock = MockTransport::new();
    mock.expect_perform()
        .withf(|request| request.method == Method::GET && request.segments.is_empty())
        .times(1)
        .returning(|_| Ok(root_response("6.8.0")));

    assert_eq!(detect_version(&mock).await.unwrap(), BackendVersion::V6);
}

#[tokio::test]
async fn detect_version_should_report_probe_failures() {
    let mut mock = MockTransport::new();
    mock.expect_perform()
        .times(1)
        .returning(|_| Ok(Response::new(401, r#"{"error":{"type":"security_exception","reason":"missing authentication credentials"},"status":401}"#)));

    match detect_version(&mock).await {
        Err(ConnectionError::ProbeStatus { status, details }) => {
            assert_eq!(status, 401);
            assert_eq!(details.kind.as_deref(), Some("security_exception"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
#[traced_test]
async fn build_should_use_explicit_version_without_probing() {
    let mut mock = MockTransport::new();
    mock.expect_urls().returning(|| vec!["http://a:9200".to_string()]);

    let handle = HandleBuilder::new(config(Some(7)))
        .transport(Arc::new(mock))
        .build()
        .await
        .unwrap();

    assert_eq!(handle.version(), BackendVersion::V7);
    assert_eq!(handle.adapter().version(), BackendVersion::V7);
    assert!(logs_contain("connected to Elasticsearch 7.x"));
}

#[tokio::test]
async fn build_should_detect_version_when_not_configured() {
    let mut mock = MockTransport::new();
    mock.expect_perform().times(1).returning(|_| Ok(root_response("5.6.16")));
    mock.expect_urls().returning(|| vec!["http://a:9200".to_string()]);

    let handle = HandleBuilder::new(config(None))
        .transport(Arc::new(mock))
        .build()
        .await
        .unwrap();

    assert_eq!(handle.version(), BackendVersion::V5);
}

#[tokio::test]
async fn build_should_fail_when_healthcheck_fails() {
    let mut mock = MockTransport::new();
    mock.expect_perform()
        .times(1)
        .returning(|_| Ok(Response::new(503, "")));

    let mut config = config(Some(6));
    config.healthcheck = true;

    let err = HandleBuilder::new(config)
        .transport(Arc::new(mock))
        .build()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ConnectionError::Healthcheck {
            version: BackendVersion::V6,
            ..
        }
    ));
}

#[tokio::test]
#[traced_test]
async fn build_should_warn_when_generation_has_no_watcher() {
    let mut mock = MockTransport::new();
    mock.expect_urls().returning(|| vec!["http://a:9200".to_string()]);

    let handle = HandleBuilder::new(config(Some(5)))
        .transport(Arc::new(mock))
        .build()
        .await
        .unwrap();

    assert!(!handle.version().supports_watcher());
    assert!(logs_contain("Elasticsearch 5.x has no watcher API"));
}
