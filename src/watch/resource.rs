use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::WatchError;

/// Resource type names a declaration can arrive under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    XpackWatch,
    /// Older alias, same schema and semantics
    DeprecatedWatch,
}

impl ResourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::XpackWatch => "elasticsearch_xpack_watch",
            ResourceKind::DeprecatedWatch => "elasticsearch_watch",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "elasticsearch_xpack_watch" => Some(ResourceKind::XpackWatch),
            "elasticsearch_watch" => Some(ResourceKind::DeprecatedWatch),
            _ => None,
        }
    }

    pub fn deprecation_message(&self) -> Option<&'static str> {
        match self {
            ResourceKind::XpackWatch => None,
            ResourceKind::DeprecatedWatch => Some(
                "elasticsearch_watch is deprecated, please use elasticsearch_xpack_watch resource instead.",
            ),
        }
    }
}

/// Declared field values for one watch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchDeclaration {
    /// Backend id of the watch; cannot change once created
    pub watch_id: String,
    /// Watch definition as JSON text
    pub body: String,
    /// Defaults to `true`
    #[serde(default = "default_active")]
    pub active: bool,
}

impl WatchDeclaration {
    pub fn new(
        watch_id: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            watch_id: watch_id.into(),
            body: body.into(),
            active: default_active(),
        }
    }

    pub fn with_active(
        mut self,
        active: bool,
    ) -> Self {
        self.active = active;
        self
    }

    pub fn validate(&self) -> Result<(), WatchError> {
        if self.watch_id.trim().is_empty() {
            return Err(WatchError::InvalidDeclaration("watch_id cannot be empty".into()));
        }

        serde_json::from_str::<Value>(&self.body).map_err(|source| WatchError::InvalidBody {
            watch_id: self.watch_id.clone(),
            source,
        })?;
        Ok(())
    }
}

fn default_active() -> bool {
    true
}

/// Canonical state of a watch as read back from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchState {
    pub watch_id: String,
    pub body: String,
    pub active: bool,
}

impl WatchState {
    /// Whether the stored watch already satisfies `declaration`.
    ///
    /// Bodies are compared as JSON documents, so formatting and key order never
    /// produce a difference.
    pub fn matches(
        &self,
        declaration: &WatchDeclaration,
    ) -> bool {
        self.watch_id == declaration.watch_id
            && self.active == declaration.active
            && json_equivalent(&self.body, &declaration.body)
    }
}

/// Per-resource record the declarative tool keeps between invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchResource {
    id: Option<String>,
    state: Option<WatchState>,
}

impl WatchResource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A resource already tracking `id`, e.g. loaded from saved state.
    pub fn tracked(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            state: None,
        }
    }

    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[inline]
    pub fn state(&self) -> Option<&WatchState> {
        self.state.as_ref()
    }

    pub(crate) fn set_id(
        &mut self,
        id: &str,
    ) {
        self.id = Some(id.to_string());
    }

    pub(crate) fn set_state(
        &mut self,
        state: WatchState,
    ) {
        self.state = Some(state);
    }

    pub(crate) fn clear(&mut self) {
        self.id = None;
        self.state = None;
    }
}

/// Re-serializes `json` in compact form.
pub fn normalize_json(json: &str) -> Result<String, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    serde_json::to_string(&value)
}

/// True when both strings hold the same JSON document.
///
/// Invalid JSON on either side never compares equal.
pub fn json_equivalent(
    left: &str,
    right: &str,
) -> bool {
    match (
        serde_json::from_str::<Value>(left),
        serde_json::from_str::<Value>(right),
    ) {
        (Ok(left), Ok(right)) => left == right,
        _ => false,
    }
}
