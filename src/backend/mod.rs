//! Version-polymorphic access to the Elasticsearch watcher API.
//!
//! A [`BackendHandle`] is built once per connection. It stores the adapter for the
//! generation it was built for, so every call dispatches through that adapter and
//! nothing above this module ever inspects a generation-specific type.

mod adapter;
mod adaptors;
mod builder;
mod transport;

#[cfg(test)]
mod builder_test;

pub use adapter::*;
pub use adaptors::*;
pub use builder::*;
pub use transport::*;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::ConnectionError;

/// Major generation of the Elasticsearch client a handle speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BackendVersion {
    V5,
    V6,
    V7,
}

impl BackendVersion {
    pub fn from_major(major: u8) -> std::result::Result<Self, ConnectionError> {
        match major {
            5 => Ok(BackendVersion::V5),
            6 => Ok(BackendVersion::V6),
            7 => Ok(BackendVersion::V7),
            other => Err(ConnectionError::UnsupportedVersion(other.to_string())),
        }
    }

    /// Parses a cluster `version.number` such as `"7.10.2"`.
    pub fn from_version_number(number: &str) -> std::result::Result<Self, ConnectionError> {
        let major = number
            .split('.')
            .next()
            .and_then(|major| major.trim().parse::<u8>().ok())
            .ok_or_else(|| ConnectionError::UnsupportedVersion(number.to_string()))?;

        Self::from_major(major).map_err(|_| ConnectionError::UnsupportedVersion(number.to_string()))
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            BackendVersion::V5 => "v5",
            BackendVersion::V6 => "v6",
            BackendVersion::V7 => "v7",
        }
    }

    pub fn supports_watcher(&self) -> bool {
        !matches!(self, BackendVersion::V5)
    }
}

impl fmt::Display for BackendVersion {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            BackendVersion::V5 => write!(f, "Elasticsearch 5.x"),
            BackendVersion::V6 => write!(f, "Elasticsearch 6.x"),
            BackendVersion::V7 => write!(f, "Elasticsearch 7.x"),
        }
    }
}

/// Connection to one cluster, tagged with the generation it was built for.
///
/// Cloning is cheap; clones share the same adapter and endpoint source.
#[derive(Clone)]
pub struct BackendHandle {
    version: BackendVersion,
    adapter: Arc<dyn WatchAdapter>,
    endpoints: Arc<dyn EndpointSource>,
}

impl BackendHandle {
    pub fn new(
        adapter: Arc<dyn WatchAdapter>,
        endpoints: Arc<dyn EndpointSource>,
    ) -> Self {
        Self {
            version: adapter.version(),
            adapter,
            endpoints,
        }
    }

    /// Wraps `transport` with the client of the requested generation.
    pub fn with_transport(
        version: BackendVersion,
        transport: Arc<dyn Transport>,
    ) -> Self {
        match version {
            BackendVersion::V5 => {
                let client = Arc::new(ElasticV5Client::new(transport));
                Self::new(client.clone(), client)
            }
            BackendVersion::V6 => {
                let client = Arc::new(ElasticV6Client::new(transport));
                Self::new(client.clone(), client)
            }
            BackendVersion::V7 => {
                let client = Arc::new(ElasticV7Client::new(transport));
                Self::new(client.clone(), client)
            }
        }
    }

    #[inline]
    pub fn version(&self) -> BackendVersion {
        self.version
    }

    #[inline]
    pub fn adapter(&self) -> &dyn WatchAdapter {
        self.adapter.as_ref()
    }

    #[inline]
    pub fn endpoints(&self) -> &dyn EndpointSource {
        self.endpoints.as_ref()
    }
}

impl fmt::Debug for BackendHandle {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("BackendHandle")
            .field("version", &self.version)
            .field("endpoints", &self.endpoints.effective_endpoints())
            .finish()
    }
}
