use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tracing::warn;

use super::rest;
use crate::constants::*;
use crate::BackendError;
use crate::BackendVersion;
use crate::ClusterInfo;
use crate::EndpointSource;
use crate::Request;
use crate::Transport;
use crate::V5Error;
use crate::WatchAdapter;
use crate::WatchRecord;

#[derive(Debug, Clone, Deserialize)]
pub struct V5ClusterInfo {
    #[serde(default)]
    pub cluster_name: Option<String>,
    #[serde(default)]
    pub version: Option<V5VersionInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V5VersionInfo {
    pub number: String,
}

/// Elasticsearch 5.x client.
///
/// Watcher is not exposed on this generation: every watch operation fails with
/// [`BackendError::Unsupported`] before touching the network.
pub struct ElasticV5Client {
    transport: Arc<dyn Transport>,
}

impl ElasticV5Client {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn info(&self) -> Result<V5ClusterInfo, V5Error> {
        let response = rest::send(
            self.transport.as_ref(),
            BackendVersion::V5,
            OP_PING,
            Request::new(Method::GET, &[]),
        )
        .await?;

        if !response.is_success() {
            return Err(V5Error::Status {
                status: response.status,
                details: rest::error_details(response.status, &response.body),
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    fn unsupported(operation: &'static str) -> BackendError {
        warn!("{} requested on {}", operation, BackendVersion::V5);
        BackendError::Unsupported {
            version: BackendVersion::V5,
            operation,
        }
    }
}

impl EndpointSource for ElasticV5Client {
    fn effective_endpoints(&self) -> Vec<String> {
        self.transport.urls()
    }
}

#[async_trait]
impl WatchAdapter for ElasticV5Client {
    fn version(&self) -> BackendVersion {
        BackendVersion::V5
    }

    async fn ping(&self) -> Result<ClusterInfo, BackendError> {
        let info = self.info().await?;
        Ok(ClusterInfo {
            cluster_name: info.cluster_name,
            version_number: info.version.map(|v| v.number),
        })
    }

    async fn get_watch(
        &self,
        _watch_id: &str,
    ) -> Result<WatchRecord, BackendError> {
        Err(Self::unsupported(OP_GET_WATCH))
    }

    async fn put_watch(
        &self,
        _watch_id: &str,
        _body: &str,
    ) -> Result<(), BackendError> {
        Err(Self::unsupported(OP_PUT_WATCH))
    }

    async fn delete_watch(
        &self,
        _watch_id: &str,
    ) -> Result<(), BackendError> {
        Err(Self::unsupported(OP_DELETE_WATCH))
    }

    async fn activate_watch(
        &self,
        _watch_id: &str,
    ) -> Result<(), BackendError> {
        Err(Self::unsupported(OP_ACTIVATE_WATCH))
    }

    async fn deactivate_watch(
        &self,
        _watch_id: &str,
    ) -> Result<(), BackendError> {
        Err(Self::unsupported(OP_DEACTIVATE_WATCH))
    }

    fn is_not_found(
        &self,
        err: &BackendError,
    ) -> bool {
        matches!(err, BackendError::V5(V5Error::Status { status: 404, .. }))
    }
}
