//! Watch Reconciler Error Hierarchy
//!
//! Errors are layered by how far they travel:
//! - transport and per-generation client errors stay inside the backend adapters,
//! - [`BackendError`] is what an adapter hands back to its caller,
//! - [`WatchError`] and [`DiscoveryError`] are the canonical taxonomy the rest of the
//!   crate (and the CLI) reasons about.

use std::fmt;

use config::ConfigError;

use crate::BackendVersion;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Watch lifecycle failures (create/read/update/delete/import)
    #[error(transparent)]
    Watch(#[from] WatchError),

    /// Endpoint discovery failures
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Failures while turning configuration into a live backend handle
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Configuration loading failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Loaded configuration failed validation
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Local file access (declared bodies, log files)
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Unrecoverable failures requiring process termination
    #[error("Fatal error: {0}")]
    Fatal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection was built without any static endpoint
    #[error("No endpoint configured for the connection")]
    NoEndpoints,

    /// Endpoint could not be combined with the request path
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// Every configured endpoint refused the connection or timed out
    #[error("All endpoints unreachable: {0}")]
    Unreachable(String),

    /// Request failed for reasons other than connectivity
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP client construction failure (TLS backend, invalid timeouts)
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Error details as reported in an Elasticsearch error body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetails {
    pub kind: Option<String>,
    pub reason: String,
}

impl fmt::Display for ErrorDetails {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match &self.kind {
            Some(kind) => write!(f, "{}: {}", kind, self.reason),
            None => write!(f, "{}", self.reason),
        }
    }
}

/// Errors raised by the Elasticsearch 5.x client
#[derive(Debug, thiserror::Error)]
pub enum V5Error {
    #[error("elastic5: Error {status} ({details})")]
    Status { status: u16, details: ErrorDetails },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("elastic5: cannot decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors raised by the Elasticsearch 6.x client
#[derive(Debug, thiserror::Error)]
pub enum V6Error {
    #[error("elastic6: Error {status} ({details})")]
    Status { status: u16, details: ErrorDetails },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("elastic6: cannot decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors raised by the Elasticsearch 7.x client
#[derive(Debug, thiserror::Error)]
pub enum V7Error {
    #[error("elastic7: Error {status} ({details})")]
    Status { status: u16, details: ErrorDetails },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("elastic7: cannot decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// What a version adapter returns. Only the adapter for the matching generation
/// may look inside the per-generation variants.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error(transparent)]
    V5(#[from] V5Error),

    #[error(transparent)]
    V6(#[from] V6Error),

    #[error(transparent)]
    V7(#[from] V7Error),

    /// Watcher API is not available on this backend generation
    #[error("{operation} is not implemented prior to Elasticsearch 6 (connected to {version})")]
    Unsupported {
        version: BackendVersion,
        operation: &'static str,
    },
}

impl BackendError {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, BackendError::Unsupported { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// Create found a watch with the same id already stored in the backend
    #[error("watch already exists with ID: {watch_id}")]
    AlreadyExists { watch_id: String },

    /// Backend generation has no watcher support
    #[error("cannot {operation} watch {watch_id}: watch resource not implemented prior to Elasticsearch 6 ({version})")]
    Unsupported {
        operation: &'static str,
        watch_id: String,
        version: BackendVersion,
    },

    /// Existence probe failed with something other than a confirmed not-found
    #[error("cannot determine whether watch {watch_id} exists: {source}")]
    Ambiguous {
        watch_id: String,
        #[source]
        source: BackendError,
    },

    /// Backend call failed; cause preserved
    #[error("failed to {operation} watch {watch_id}: {source}")]
    Backend {
        operation: &'static str,
        watch_id: String,
        #[source]
        source: BackendError,
    },

    /// Declared `body` is not a JSON document
    #[error("watch {watch_id} body is not valid JSON: {source}")]
    InvalidBody {
        watch_id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Declared fields violate the resource schema
    #[error("invalid watch declaration: {0}")]
    InvalidDeclaration(String),

    /// `watch_id` changed on a resource that already tracks another id
    #[error("watch_id cannot change from {tracked} to {declared}; the watch must be replaced")]
    ImmutableId { tracked: String, declared: String },

    /// Operation needs a tracked id but the resource has none
    #[error("cannot {operation} watch: resource has no id")]
    Untracked { operation: &'static str },

    /// Stored watch could not be turned back into JSON text
    #[error("cannot project stored watch {watch_id}: {source}")]
    Projection {
        watch_id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl WatchError {
    /// Maps an adapter failure for `operation` into the canonical taxonomy.
    pub(crate) fn from_backend(
        operation: &'static str,
        watch_id: &str,
        source: BackendError,
    ) -> Self {
        match source {
            BackendError::Unsupported { version, .. } => WatchError::Unsupported {
                operation,
                watch_id: watch_id.to_string(),
                version,
            },
            source => WatchError::Backend {
                operation,
                watch_id: watch_id.to_string(),
                source,
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The host lookup only answers for the active cluster
    #[error("host lookup requires `active = true`")]
    InactiveLookup,
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Cluster root answered with a non-success status while probing the version
    #[error("version probe failed with status {status}: {details}")]
    ProbeStatus { status: u16, details: ErrorDetails },

    #[error("cannot decode cluster info: {0}")]
    Decode(#[from] serde_json::Error),

    /// Major version outside the supported generations
    #[error("unsupported Elasticsearch version: {0}")]
    UnsupportedVersion(String),

    /// Health check through the version adapter failed
    #[error("health check against {version} failed: {source}")]
    Healthcheck {
        version: BackendVersion,
        #[source]
        source: BackendError,
    },
}
