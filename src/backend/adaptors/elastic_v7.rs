use serde::Deserialize;
use serde_json::Value;

use crate::WatchRecord;

#[derive(Debug, Clone, Deserialize)]
pub struct V7GetWatchResponse {
    #[serde(default)]
    pub found: bool,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: Option<i64>,
    #[serde(rename = "_seq_no", default)]
    pub seq_no: Option<i64>,
    #[serde(rename = "_primary_term", default)]
    pub primary_term: Option<i64>,
    #[serde(default)]
    pub status: Option<V7WatchStatus>,
    #[serde(default)]
    pub watch: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V7WatchStatus {
    #[serde(default)]
    pub state: Option<V7WatchActivationState>,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub last_checked: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V7WatchActivationState {
    pub active: bool,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V7PutWatchResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: Option<i64>,
    #[serde(rename = "_seq_no", default)]
    pub seq_no: Option<i64>,
    #[serde(rename = "_primary_term", default)]
    pub primary_term: Option<i64>,
    #[serde(default)]
    pub created: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V7DeleteWatchResponse {
    #[serde(default)]
    pub found: bool,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V7ActivateWatchResponse {
    #[serde(default)]
    pub status: Option<V7WatchStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V7ClusterInfo {
    #[serde(default)]
    pub cluster_name: Option<String>,
    #[serde(default)]
    pub version: Option<V7VersionInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V7VersionInfo {
    pub number: String,
}

impl From<V7GetWatchResponse> for WatchRecord {
    fn from(response: V7GetWatchResponse) -> Self {
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
    /// Elasticsearch 7.x client for the watcher API (`/_watcher/...`).
    ElasticV7Client {
        version: V7,
        error: V7Error,
        prefix: &["_watcher"],
        get: V7GetWatchResponse,
        put: V7PutWatchResponse,
        delete: V7DeleteWatchResponse,
        activate: V7ActivateWatchResponse,
        info: V7ClusterInfo,
    }
}
