use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Method;
use serde_json::json;
use serde_json::Value;

use crate::BackendHandle;
use crate::BackendVersion;
use crate::Request;
use crate::Response;
use crate::Transport;
use crate::TransportError;

#[derive(Debug, Clone)]
pub struct StoredWatch {
    pub body: Value,
    pub active: bool,
    pub version: i64,
}

/// In-memory emulation of one cluster's watcher REST API.
///
/// Speaks the path layout of the generation it was created for and counts every
/// request, so tests can assert on both stored state and call volume.
pub struct FakeCluster {
    version: BackendVersion,
    urls: Vec<String>,
    watches: Mutex<BTreeMap<String, StoredWatch>>,
    failures: Mutex<HashMap<&'static str, Response>>,
    calls: AtomicUsize,
}

impl FakeCluster {
    pub fn new(
        version: BackendVersion,
        urls: &[&str],
    ) -> Arc<Self> {
        Arc::new(Self {
            version,
            urls: urls.iter().map(|u| u.to_string()).collect(),
            watches: Mutex::new(BTreeMap::new()),
            failures: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn handle(self: &Arc<Self>) -> BackendHandle {
        BackendHandle::with_transport(self.version, self.clone())
    }

    /// Stores a watch directly, bypassing the API (a pre-existing, unmanaged watch).
    pub fn seed(
        &self,
        watch_id: &str,
        body: Value,
        active: bool,
    ) {
        self.watches.lock().insert(
            watch_id.to_string(),
            StoredWatch {
                body,
                active,
                version: 1,
            },
        );
    }

    pub fn stored(
        &self,
        watch_id: &str,
    ) -> Option<StoredWatch> {
        self.watches.lock().get(watch_id).cloned()
    }

    /// Answers every request of `action` with `response` from now on.
    ///
    /// Actions: `get`, `put`, `delete`, `_activate`, `_deactivate`.
    pub fn fail(
        &self,
        action: &'static str,
        response: Response,
    ) {
        self.failures.lock().insert(action, response);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn prefix(&self) -> &'static [&'static str] {
        match self.version {
            BackendVersion::V5 => &["_watcher_unavailable"],
            BackendVersion::V6 => &["_xpack", "watcher"],
            BackendVersion::V7 => &["_watcher"],
        }
    }

    fn version_number(&self) -> &'static str {
        match self.version {
            BackendVersion::V5 => "5.6.16",
            BackendVersion::V6 => "6.8.23",
            BackendVersion::V7 => "7.17.9",
        }
    }

    fn route(
        &self,
        request: &Request,
    ) -> Response {
        if request.segments.is_empty() && request.method == Method::GET {
            return ok(json!({
                "cluster_name": "fake",
                "version": { "number": self.version_number() }
            }));
        }

        let prefix = self.prefix();
        let segments: Vec<&str> = request.segments.iter().map(String::as_str).collect();
        if segments.len() < prefix.len() + 2
            || segments[..prefix.len()] != *prefix
            || segments[prefix.len()] != "watch"
        {
            return Response::new(
                400,
                json!({
                    "error": {
                        "type": "illegal_argument_exception",
                        "reason": format!("no handler found for uri [/{}]", segments.join("/"))
                    },
                    "status": 400
                })
                .to_string(),
            );
        }

        let watch_id = segments[prefix.len() + 1];
        let action = match (segments.get(prefix.len() + 2), &request.method) {
            (None, m) if *m == Method::GET => "get",
            (None, m) if *m == Method::PUT => "put",
            (None, m) if *m == Method::DELETE => "delete",
            (Some(&"_activate"), _) => "_activate",
            (Some(&"_deactivate"), _) => "_deactivate",
            _ => return Response::new(405, ""),
        };

        if let Some(failure) = self.failures.lock().get(action) {
            return failure.clone();
        }

        let mut watches = self.watches.lock();
        match action {
            "get" => match watches.get(watch_id) {
                Some(stored) => ok(json!({
                    "found": true,
                    "_id": watch_id,
                    "_version": stored.version,
                    "_seq_no": stored.version - 1,
                    "_primary_term": 1,
                    "status": {
                        "state": { "active": stored.active, "timestamp": "2024-01-01T00:00:00.000Z" },
                        "version": stored.version
                    },
                    "watch": stored.body
                })),
                None => Response::new(404, json!({ "found": false, "_id": watch_id }).to_string()),
            },
            "put" => {
                let body: Value = match request.body.as_deref().map(serde_json::from_str) {
                    Some(Ok(body)) => body,
                    _ => return Response::new(400, r#"{"error":"failed to parse watch","status":400}"#),
                };
                let created = !watches.contains_key(watch_id);
                let version = watches.get(watch_id).map(|w| w.version + 1).unwrap_or(1);
                // a put always (re)activates, like the real API without `?active=false`
                watches.insert(
                    watch_id.to_string(),
                    StoredWatch {
                        body,
                        active: true,
                        version,
                    },
                );
                Response::new(
                    if created { 201 } else { 200 },
                    json!({
                        "_id": watch_id,
                        "_version": version,
                        "_seq_no": version - 1,
                        "_primary_term": 1,
                        "created": created
                    })
                    .to_string(),
                )
            }
            "delete" => match watches.remove(watch_id) {
                Some(stored) => ok(json!({ "found": true, "_id": watch_id, "_version": stored.version })),
                None => Response::new(404, json!({ "found": false, "_id": watch_id }).to_string()),
            },
            activation => match watches.get_mut(watch_id) {
                Some(stored) => {
                    stored.active = activation == "_activate";
                    ok(json!({ "status": { "state": { "active": stored.active } } }))
                }
                None => Response::new(
                    404,
                    json!({
                        "error": {
                            "type": "resource_not_found_exception",
                            "reason": format!("Watch with id [{}] does not exist", watch_id)
                        },
                        "status": 404
                    })
                    .to_string(),
                ),
            },
        }
    }
}

#[async_trait]
impl Transport for FakeCluster {
    fn urls(&self) -> Vec<String> {
        self.urls.clone()
    }

    async fn perform(
        &self,
        request: Request,
    ) -> Result<Response, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.route(&request))
    }
}

fn ok(body: Value) -> Response {
    Response::new(200, body.to_string())
}
