use std::sync::Arc;

use reqwest::Method;
use serde::Deserialize;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::adaptors::rest;
use crate::BackendHandle;
use crate::BackendVersion;
use crate::ConnectionConfig;
use crate::ConnectionError;
use crate::HttpTransport;
use crate::Request;
use crate::Transport;

#[derive(Debug, Deserialize)]
struct RootInfo {
    version: RootVersion,
}

#[derive(Debug, Deserialize)]
struct RootVersion {
    number: String,
}

/// Turns a [`ConnectionConfig`] into a ready [`BackendHandle`].
///
/// The generation is fixed here, once: either from `connection.version` or by
/// reading `version.number` from the cluster root.
pub struct HandleBuilder {
    config: ConnectionConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl HandleBuilder {
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    /// Replaces the default `reqwest` transport
    pub fn transport(
        mut self,
        transport: Arc<dyn Transport>,
    ) -> Self {
        self.transport = Some(transport);
        self
    }

    pub async fn build(self) -> std::result::Result<BackendHandle, ConnectionError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&self.config)?),
        };

        let version = match self.config.version {
            Some(major) => BackendVersion::from_major(major)?,
            None => detect_version(transport.as_ref()).await?,
        };

        let handle = BackendHandle::with_transport(version, transport);

        if self.config.healthcheck {
            let cluster = handle
                .adapter()
                .ping()
                .await
                .map_err(|source| ConnectionError::Healthcheck { version, source })?;
            debug!("health check ok: {:?}", cluster);
        }

        if !version.supports_watcher() {
            warn!("{} has no watcher API; watch operations will fail as unsupported", version);
        }

        info!(
            "connected to {} via {:?}",
            version,
            handle.endpoints().effective_endpoints()
        );
        Ok(handle)
    }
}

/// Reads the major version from `GET /`.
pub async fn detect_version(transport: &dyn Transport) -> std::result::Result<BackendVersion, ConnectionError> {
    let response = transport.perform(Request::new(Method::GET, &[])).await?;

    if !response.is_success() {
        return Err(ConnectionError::ProbeStatus {
            status: response.status,
            details: rest::error_details(response.status, &response.body),
        });
    }

    let root: RootInfo = serde_json::from_str(&response.body)?;
    debug!("cluster reports version {}", root.version.number);
    BackendVersion::from_version_number(&root.version.number)
}
