use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::BackendHandle;
use crate::DiscoveryError;
use crate::EndpointSource;

/// Input of the host lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostQuery {
    /// Must be `true`; the lookup only answers for the active cluster
    pub active: bool,
}

impl Default for HostQuery {
    fn default() -> Self {
        Self { active: true }
    }
}

/// Result of the host lookup. Both fields are absent when the connection has no
/// static endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostRecord {
    pub id: Option<String>,
    pub url: Option<String>,
}

/// Reports the first endpoint the connection is actually using.
///
/// Works the same for every backend generation since it only reads the
/// connection's endpoint list, never the cluster.
pub fn discover_host(
    handle: &BackendHandle,
    query: &HostQuery,
) -> Result<HostRecord, DiscoveryError> {
    if !query.active {
        return Err(DiscoveryError::InactiveLookup);
    }

    let record = match first_endpoint(handle.endpoints()) {
        Some(url) => HostRecord {
            id: Some(url.clone()),
            url: Some(url),
        },
        None => {
            debug!("{} connection has no endpoints", handle.version());
            HostRecord::default()
        }
    };
    Ok(record)
}

pub fn first_endpoint(source: &dyn EndpointSource) -> Option<String> {
    source.effective_endpoints().into_iter().next()
}
