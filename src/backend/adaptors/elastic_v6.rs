use serde::Deserialize;
use serde_json::Value;

use crate::WatchRecord;

#[derive(Debug, Clone, Deserialize)]
pub struct V6GetWatchResponse {
    #[serde(default)]
    pub found: bool,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub status: Option<V6WatchStatus>,
    #[serde(default)]
    pub watch: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V6WatchStatus {
    #[serde(default)]
    pub state: Option<V6WatchActivationState>,
    #[serde(default)]
    pub version: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V6WatchActivationState {
    pub active: bool,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V6PutWatchResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub created: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V6DeleteWatchResponse {
    #[serde(default)]
    pub found: bool,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V6ActivateWatchResponse {
    #[serde(default)]
    pub status: Option<V6WatchStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V6ClusterInfo {
    #[serde(default)]
    pub cluster_name: Option<String>,
    #[serde(default)]
    pub version: Option<V6VersionInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V6VersionInfo {
    pub number: String,
}

impl From<V6GetWatchResponse> for WatchRecord {
    fn from(response: V6GetWatchResponse) -> Self {
        let active = response
            .status
            .and_then(|status| status.state)
            .map(|state| state.active)
            .unwrap_or(false);

        WatchRecord {
            watch: response.watch.unwrap_or(Value::Null),
            active,
        }
    }
}

watcher_client! {
    /// Elasticsearch 6.x client for the X-Pack watcher API (`/_xpack/watcher/...`).
    ElasticV6Client {
        version: V6,
        error: V6Error,
        // 6.x keeps watcher under the X-Pack namespace
        prefix: &["_xpack", "watcher"],
        get: V6GetWatchResponse,
        put: V6PutWatchResponse,
        delete: V6DeleteWatchResponse,
        activate: V6ActivateWatchResponse,
        info: V6ClusterInfo,
    }
}
