use async_trait::async_trait;
use serde_json::Value;

use crate::BackendError;
use crate::BackendVersion;

/// Canonical result of a lookup against the backend.
#[derive(Debug)]
pub enum Outcome<T> {
    Found(T),
    NotFound,
    Failed(BackendError),
}

/// Stored watch as reported by the backend, independent of generation.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchRecord {
    /// Watch body as stored (trigger, input, condition, actions...)
    pub watch: Value,
    /// Runtime activation state (`status.state.active`)
    pub active: bool,
}

/// Minimal cluster identity returned by a health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterInfo {
    pub cluster_name: Option<String>,
    pub version_number: Option<String>,
}

/// Uniform watcher capability set, implemented once per client generation.
#[async_trait]
pub trait WatchAdapter: Send + Sync + 'static {
    fn version(&self) -> BackendVersion;

    async fn ping(&self) -> Result<ClusterInfo, BackendError>;

    async fn get_watch(
        &self,
        watch_id: &str,
    ) -> Result<WatchRecord, BackendError>;

    /// Full replacement of the stored watch body.
    async fn put_watch(
        &self,
        watch_id: &str,
        body: &str,
    ) -> Result<(), BackendError>;

    async fn delete_watch(
        &self,
        watch_id: &str,
    ) -> Result<(), BackendError>;

    async fn activate_watch(
        &self,
        watch_id: &str,
    ) -> Result<(), BackendError>;

    async fn deactivate_watch(
        &self,
        watch_id: &str,
    ) -> Result<(), BackendError>;

    /// True only for this generation's own not-found error shape.
    fn is_not_found(
        &self,
        err: &BackendError,
    ) -> bool;

    /// `get_watch` with not-found normalized away from the error path.
    async fn lookup_watch(
        &self,
        watch_id: &str,
    ) -> Outcome<WatchRecord> {
        match self.get_watch(watch_id).await {
            Ok(record) => Outcome::Found(record),
            Err(e) if self.is_not_found(&e) => Outcome::NotFound,
            Err(e) => Outcome::Failed(e),
        }
    }

    async fn set_active(
        &self,
        watch_id: &str,
        active: bool,
    ) -> Result<(), BackendError> {
        if active {
            self.activate_watch(watch_id).await
        } else {
            self.deactivate_watch(watch_id).await
        }
    }
}

/// Endpoints a live connection is actually using.
///
/// Exposed by the connection itself so the host lookup never has to re-derive
/// endpoints from configuration.
pub trait EndpointSource: Send + Sync + 'static {
    fn effective_endpoints(&self) -> Vec<String>;
}
