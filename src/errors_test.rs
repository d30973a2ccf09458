use std::error::Error as _;

use crate::BackendError;
use crate::BackendVersion;
use crate::DiscoveryError;
use crate::Error;
use crate::ErrorDetails;
use crate::V6Error;
use crate::V7Error;
use crate::WatchError;

fn v7_status(status: u16) -> BackendError {
    BackendError::V7(V7Error::Status {
        status,
        details: ErrorDetails {
            kind: Some("exception".to_string()),
            reason: "boom".to_string(),
        },
    })
}

#[test]
fn test_client_status_error_display() {
    assert_eq!(v7_status(500).to_string(), "elastic7: Error 500 (exception: boom)");

    let v6 = V6Error::Status {
        status: 404,
        details: ErrorDetails {
            kind: None,
            reason: "not found".to_string(),
        },
    };
    assert_eq!(v6.to_string(), "elastic6: Error 404 (not found)");
}

#[test]
fn test_from_backend_maps_unsupported() {
    let err = WatchError::from_backend(
        "create",
        "w1",
        BackendError::Unsupported {
            version: BackendVersion::V5,
            operation: "put_watch",
        },
    );

    assert!(matches!(
        err,
        WatchError::Unsupported {
            operation: "create",
            version: BackendVersion::V5,
            ..
        }
    ));
    assert!(err.to_string().contains("not implemented prior to Elasticsearch 6"));
}

#[test]
fn test_from_backend_preserves_cause() {
    let err = WatchError::from_backend("update", "w1", v7_status(503));

    assert_eq!(
        err.to_string(),
        "failed to update watch w1: elastic7: Error 503 (exception: boom)"
    );
    let source = err.source().expect("cause is preserved");
    assert_eq!(source.to_string(), "elastic7: Error 503 (exception: boom)");
}

#[test]
fn test_ambiguous_keeps_probe_failure() {
    let err = WatchError::Ambiguous {
        watch_id: "w1".to_string(),
        source: v7_status(500),
    };

    assert_eq!(
        err.to_string(),
        "cannot determine whether watch w1 exists: elastic7: Error 500 (exception: boom)"
    );
    assert!(err.source().is_some());
}

#[test]
fn test_top_level_error_is_transparent() {
    let err: Error = WatchError::AlreadyExists {
        watch_id: "w1".to_string(),
    }
    .into();
    assert_eq!(err.to_string(), "watch already exists with ID: w1");

    let err: Error = DiscoveryError::InactiveLookup.into();
    assert_eq!(err.to_string(), "host lookup requires `active = true`");
}

#[test]
fn test_unsupported_is_detected() {
    assert!(BackendError::Unsupported {
        version: BackendVersion::V5,
        operation: "get_watch",
    }
    .is_unsupported());
    assert!(!v7_status(404).is_unsupported());
}

#[test]
fn test_top_level_error_names_operation_id_and_cause() {
    let err: Error = WatchError::from_backend("update", "w1", v7_status(503)).into();

    let rendered = err.to_string();
    assert!(rendered.contains("update"), "{}", rendered);
    assert!(rendered.contains("w1"), "{}", rendered);
    assert!(rendered.contains("Error 503 (exception: boom)"), "{}", rendered);
}

#[test]
fn test_invalid_body_names_parse_failure() {
    let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = WatchError::InvalidBody {
        watch_id: "w1".to_string(),
        source,
    };

    assert!(err
        .to_string()
        .starts_with("watch w1 body is not valid JSON: EOF while parsing"));
}
