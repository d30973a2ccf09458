use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::constants::*;
use crate::BackendHandle;
use crate::Outcome;
use crate::ResourceKind;
use crate::WatchDeclaration;
use crate::WatchError;
use crate::WatchResource;
use crate::WatchState;

/// Create/Read/Update/Delete for one watch resource.
///
/// Every step is a fresh round trip through the handle's adapter and each step
/// runs only after the previous one succeeded: existence probe before put, put
/// before activation, activation before the read that refreshes state.
#[derive(Debug, Clone)]
pub struct WatchController {
    handle: BackendHandle,
    kind: ResourceKind,
}

impl WatchController {
    pub fn new(handle: BackendHandle) -> Self {
        Self {
            handle,
            kind: ResourceKind::XpackWatch,
        }
    }

    /// Serve declarations arriving under another resource type name.
    pub fn with_kind(
        mut self,
        kind: ResourceKind,
    ) -> Self {
        if let Some(message) = kind.deprecation_message() {
            warn!("{}", message);
        }
        self.kind = kind;
        self
    }

    #[inline]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Creates the watch unless one with the same id already exists.
    ///
    /// The id is recorded on `resource` as soon as the put succeeds. If the
    /// following activation call fails the error is returned but the resource
    /// keeps tracking the id, so the next run converges through [`update`]
    /// instead of tripping over the existing watch.
    ///
    /// [`update`]: WatchController::update
    pub async fn create(
        &self,
        resource: &mut WatchResource,
        declaration: &WatchDeclaration,
    ) -> Result<Option<WatchState>, WatchError> {
        declaration.validate()?;
        let watch_id = declaration.watch_id.as_str();
        let adapter = self.handle.adapter();

        match adapter.lookup_watch(watch_id).await {
            Outcome::Found(_) => {
                info!("watch exists: {}", watch_id);
                return Err(WatchError::AlreadyExists {
                    watch_id: watch_id.to_string(),
                });
            }
            Outcome::NotFound => {
                debug!("watch {} absent, creating", watch_id);
            }
            Outcome::Failed(e) if e.is_unsupported() => {
                return Err(WatchError::from_backend(LIFECYCLE_CREATE, watch_id, e));
            }
            Outcome::Failed(source) => {
                return Err(WatchError::Ambiguous {
                    watch_id: watch_id.to_string(),
                    source,
                });
            }
        }

        adapter
            .put_watch(watch_id, &declaration.body)
            .await
            .map_err(|e| WatchError::from_backend(LIFECYCLE_CREATE, watch_id, e))?;
        resource.set_id(watch_id);
        info!("Object ID: {}", watch_id);

        self.apply_activation(declaration).await?;

        self.read(resource).await
    }

    /// Refreshes `resource` from the backend.
    ///
    /// A watch that no longer exists is not an error: the tracked id and state
    /// are cleared and `None` is returned.
    pub async fn read(
        &self,
        resource: &mut WatchResource,
    ) -> Result<Option<WatchState>, WatchError> {
        let watch_id = resource
            .id()
            .ok_or(WatchError::Untracked {
                operation: LIFECYCLE_READ,
            })?
            .to_string();

        let record = match self.handle.adapter().lookup_watch(&watch_id).await {
            Outcome::Found(record) => record,
            Outcome::NotFound => {
                warn!("Watch ({}) not found, removing from state", watch_id);
                resource.clear();
                return Ok(None);
            }
            Outcome::Failed(e) => return Err(WatchError::from_backend(LIFECYCLE_READ, &watch_id, e)),
        };

        if record.watch.is_null() {
            warn!("watch {} has no stored definition", watch_id);
            return Err(WatchError::Projection {
                watch_id,
                source: serde::de::Error::missing_field("watch"),
            });
        }

        let body = serde_json::to_string(&record.watch).map_err(|source| WatchError::Projection {
            watch_id: watch_id.clone(),
            source,
        })?;

        let state = WatchState {
            watch_id,
            body,
            active: record.active,
        };
        resource.set_state(state.clone());
        Ok(Some(state))
    }

    /// Replaces the stored body, re-asserts activation and reads back.
    ///
    /// No existence check: the watch is expected to exist and be overwritten.
    pub async fn update(
        &self,
        resource: &mut WatchResource,
        declaration: &WatchDeclaration,
    ) -> Result<Option<WatchState>, WatchError> {
        declaration.validate()?;
        let watch_id = declaration.watch_id.as_str();

        match resource.id() {
            Some(tracked) if tracked != watch_id => {
                return Err(WatchError::ImmutableId {
                    tracked: tracked.to_string(),
                    declared: watch_id.to_string(),
                });
            }
            Some(_) => {}
            None => {
                return Err(WatchError::Untracked {
                    operation: LIFECYCLE_UPDATE,
                })
            }
        }

        self.handle
            .adapter()
            .put_watch(watch_id, &declaration.body)
            .await
            .map_err(|e| WatchError::from_backend(LIFECYCLE_UPDATE, watch_id, e))?;

        self.apply_activation(declaration).await?;

        self.read(resource).await
    }

    /// Deletes the watch. A watch that is already gone is reported as the
    /// backend's error, not treated as success.
    pub async fn delete(
        &self,
        resource: &mut WatchResource,
    ) -> Result<(), WatchError> {
        let watch_id = resource
            .id()
            .ok_or(WatchError::Untracked {
                operation: LIFECYCLE_DELETE,
            })?
            .to_string();

        self.handle
            .adapter()
            .delete_watch(&watch_id)
            .await
            .map_err(|e| WatchError::from_backend(LIFECYCLE_DELETE, &watch_id, e))?;

        info!("deleted watch {}", watch_id);
        resource.clear();
        Ok(())
    }

    /// Starts tracking an existing watch by id and reads it.
    pub async fn import(
        &self,
        resource: &mut WatchResource,
        watch_id: &str,
    ) -> Result<Option<WatchState>, WatchError> {
        if watch_id.trim().is_empty() {
            return Err(WatchError::Untracked {
                operation: LIFECYCLE_IMPORT,
            });
        }

        resource.set_id(watch_id);
        self.read(resource).await
    }

    async fn apply_activation(
        &self,
        declaration: &WatchDeclaration,
    ) -> Result<(), WatchError> {
        let watch_id = declaration.watch_id.as_str();
        let operation = if declaration.active {
            LIFECYCLE_ACTIVATE
        } else {
            LIFECYCLE_DEACTIVATE
        };

        self.handle
            .adapter()
            .set_active(watch_id, declaration.active)
            .await
            .map_err(|e| WatchError::from_backend(operation, watch_id, e))
    }
}
